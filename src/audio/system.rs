//! Live output: hosts the oscillator voice on a cpal stream.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use super::fft::{spectrum_channel, SpectrumFrame, SpectrumTap};
use super::shared::OscillatorHandle;
use super::synth::OscillatorSynthesizer;
use crate::error::{Error, Result};
use crate::params::{SpectrumConfig, SynthConfig};

/// Frames rendered per pass through the scratch buffer
const SCRATCH_FRAMES: usize = 4096;

/// Audio system: output stream plus the control and analysis ends of the voice
pub struct AudioSystem {
    voice: OscillatorHandle,
    spectrum: SpectrumFrame,

    /// Audio output stream (kept alive)
    _stream: cpal::Stream,

    device_name: String,
    sample_rate_hz: u32,
    channels: usize,
}

impl AudioSystem {
    /// Open the default output device and start rendering.
    ///
    /// The voice runs at the device's sample rate, which may differ from
    /// `synth_config.sample_rate_hz`.
    pub fn new(synth_config: &SynthConfig, spectrum_config: &SpectrumConfig) -> Result<Self> {
        synth_config.validate()?;
        spectrum_config.validate()?;

        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| Error::AudioDevice("no default output device found".into()))?;
        let device_name = device
            .name()
            .unwrap_or_else(|_| "Unknown output device".to_owned());

        let supported = device
            .default_output_config()
            .map_err(|e| Error::AudioDevice(format!("failed to read output config: {e}")))?;
        let config = supported.config();
        let sample_rate_hz = config.sample_rate.0;
        let channels = config.channels as usize;

        if sample_rate_hz != synth_config.sample_rate_hz {
            log::info!(
                "device runs at {} Hz (configured {} Hz), following the device",
                sample_rate_hz,
                synth_config.sample_rate_hz
            );
        }
        let synth = OscillatorSynthesizer::new(&SynthConfig {
            sample_rate_hz,
            ..synth_config.clone()
        });
        let voice = synth.handle();
        let (tap, spectrum) = spectrum_channel(spectrum_config);

        let stream = match supported.sample_format() {
            cpal::SampleFormat::F32 => build_stream::<f32>(&device, &config, synth, tap)?,
            cpal::SampleFormat::I16 => build_stream::<i16>(&device, &config, synth, tap)?,
            cpal::SampleFormat::U16 => build_stream::<u16>(&device, &config, synth, tap)?,
            other => {
                return Err(Error::AudioDevice(format!(
                    "unsupported output sample format: {other:?}"
                )));
            }
        };

        stream
            .play()
            .map_err(|e| Error::AudioDevice(format!("failed to start stream: {e}")))?;

        log::info!(
            "audio: {} @ {} Hz, {} channels",
            device_name,
            sample_rate_hz,
            channels
        );

        Ok(Self {
            voice,
            spectrum,
            _stream: stream,
            device_name,
            sample_rate_hz,
            channels,
        })
    }

    /// Control-side handle to the hosted voice
    pub fn voice(&self) -> &OscillatorHandle {
        &self.voice
    }

    /// Drain the stream's tap and return the latest 512 magnitudes
    pub fn analyze(&mut self) -> &[f32] {
        self.spectrum.update()
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    pub fn sample_rate_hz(&self) -> u32 {
        self.sample_rate_hz
    }

    pub fn channels(&self) -> usize {
        self.channels
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    mut synth: OscillatorSynthesizer,
    mut tap: SpectrumTap,
) -> Result<cpal::Stream>
where
    T: cpal::SizedSample + cpal::FromSample<f32>,
{
    let channels = config.channels as usize;
    // Allocated here so the callback never has to
    let mut scratch = vec![0.0_f32; SCRATCH_FRAMES * channels.max(1)];

    device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                write_audio_buffer(data, channels, &mut synth, &mut tap, &mut scratch);
            },
            |err| log::error!("audio stream error: {err}"),
            None,
        )
        .map_err(|e| Error::AudioDevice(format!("failed to build output stream: {e}")))
}

/// Render into `scratch` and convert into the device buffer
fn write_audio_buffer<T>(
    output: &mut [T],
    channels: usize,
    synth: &mut OscillatorSynthesizer,
    tap: &mut SpectrumTap,
    scratch: &mut [f32],
) where
    T: cpal::SizedSample + cpal::FromSample<f32>,
{
    for chunk in output.chunks_mut(scratch.len()) {
        let rendered = &mut scratch[..chunk.len()];
        synth.render(rendered, channels);
        tap.push_interleaved(rendered, channels);

        for (out, &sample) in chunk.iter_mut().zip(rendered.iter()) {
            *out = T::from_sample(sample);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_audio_buffer_converts_and_taps() {
        let mut synth = OscillatorSynthesizer::new(&SynthConfig::default());
        synth.trigger(true);
        let (mut tap, mut frame) = spectrum_channel(&SpectrumConfig::default());

        // Scratch smaller than the device buffer forces several passes
        let mut scratch = vec![0.0; 64 * 2];
        let mut output = vec![0_i16; 300 * 2];
        write_audio_buffer(&mut output, 2, &mut synth, &mut tap, &mut scratch);

        assert!(output.iter().any(|&s| s != 0));
        for frame in output.chunks(2) {
            assert_eq!(frame[0], frame[1]);
        }
        assert_eq!(frame.drain(), 300);
    }

    #[test]
    fn test_idle_voice_writes_silence_in_device_format() {
        let mut synth = OscillatorSynthesizer::new(&SynthConfig::default());
        let (mut tap, _frame) = spectrum_channel(&SpectrumConfig::default());

        let mut scratch = vec![0.0; 128];
        let mut output = vec![0_u16; 64];
        write_audio_buffer(&mut output, 2, &mut synth, &mut tap, &mut scratch);

        // Silence is the midpoint of an unsigned format
        assert!(output.iter().all(|&s| s == 32768));
    }
}
