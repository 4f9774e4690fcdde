//! Synthesis and spectrum analysis configuration and constants.

use crate::audio::OscillatorParams;
use crate::error::{Error, Result};

/// Oscillator synthesis configuration
#[derive(Debug, Clone)]
pub struct SynthConfig {
    /// Host sample rate (Hz)
    /// Reference engine value: 48000
    pub sample_rate_hz: u32,

    /// Output magnitude below which a voice is considered inaudible.
    /// Checked against the last sample of each rendered buffer.
    pub audibility_threshold: f32,

    /// Oscillator parameters a voice starts with before any collision
    pub voice: OscillatorParams,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: audio_constants::SAMPLE_RATE_HZ,
            audibility_threshold: 1e-4,
            voice: OscillatorParams::default(),
        }
    }
}

impl SynthConfig {
    /// Validate configuration (sample rate > 0, positive mass, etc.)
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate_hz == 0 {
            return Err(Error::InvalidConfig("sample rate must be > 0".into()));
        }
        if !(self.audibility_threshold > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "audibility threshold must be > 0, got {}",
                self.audibility_threshold
            )));
        }
        if !(self.voice.mass > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "oscillator mass must be > 0, got {}",
                self.voice.mass
            )));
        }
        if self.voice.frequency_hz < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "oscillator frequency must be >= 0, got {}",
                self.voice.frequency_hz
            )));
        }
        Ok(())
    }
}

/// Analysis window applied before the FFT
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowFunction {
    Hann,

    /// 4-term Blackman-Harris: low leakage, wide main lobe
    #[default]
    BlackmanHarris,
}

/// Spectrum analysis configuration
#[derive(Debug, Clone)]
pub struct SpectrumConfig {
    /// FFT window size (must be power of 2, yields `fft_size / 2` magnitudes)
    /// Reference value: 1024 (= 512 magnitudes)
    pub fft_size: usize,

    /// Analysis frame interval (milliseconds)
    /// 16 ms ≈ one analyzer update per rendered frame at 60 FPS
    pub frame_interval_ms: u64,

    /// Capacity of the audio → analysis ring (samples)
    pub tap_capacity: usize,

    /// Window applied to each analysis block
    pub window: WindowFunction,
}

impl Default for SpectrumConfig {
    fn default() -> Self {
        Self {
            fft_size: 2 * audio_constants::SPECTRUM_SAMPLES,
            frame_interval_ms: 16,
            tap_capacity: 16 * 1024,
            window: WindowFunction::BlackmanHarris,
        }
    }
}

impl SpectrumConfig {
    /// Number of magnitudes each analysis frame produces
    pub fn magnitude_count(&self) -> usize {
        self.fft_size / 2
    }

    /// Validate configuration (FFT size must be power of 2 and match the analyzer)
    pub fn validate(&self) -> Result<()> {
        if !self.fft_size.is_power_of_two() {
            return Err(Error::InvalidConfig(format!(
                "FFT size must be power of 2, got {}",
                self.fft_size
            )));
        }
        if self.magnitude_count() != audio_constants::SPECTRUM_SAMPLES {
            return Err(Error::InvalidConfig(format!(
                "FFT size must produce {} magnitudes, got {}",
                audio_constants::SPECTRUM_SAMPLES,
                self.magnitude_count()
            )));
        }
        if self.tap_capacity < self.fft_size {
            return Err(Error::InvalidConfig(format!(
                "tap capacity {} smaller than FFT size {}",
                self.tap_capacity, self.fft_size
            )));
        }
        Ok(())
    }
}

/// Audio constants (compile-time, match the analyzer layout)
pub mod audio_constants {
    /// Reference host sample rate (Hz)
    pub const SAMPLE_RATE_HZ: u32 = 48_000;

    /// Magnitudes per spectrum frame
    pub const SPECTRUM_SAMPLES: usize = 512;

    /// Logarithmic bands the spectrum is folded into
    pub const BAND_COUNT: usize = 8;
}
