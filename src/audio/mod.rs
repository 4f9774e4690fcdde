//! Damped-oscillator synthesis, its cpal/WAV hosts, and spectrum analysis.
//!
//! The voice is split across two domains: [`OscillatorHandle`] on the
//! collision side, [`OscillatorSynthesizer`] inside the audio callback. The
//! rendered signal is tapped into [`SpectrumFrame`], whose 512 magnitudes
//! feed the 8-band [`SpectrumAnalyzer`] once per frame.

mod fft;
mod offline;
mod oscillator;
mod shared;
mod spectrum;
mod synth;
mod system;

pub use fft::{
    blackman_harris_window, hann_window, spectrum_channel, window_value, SpectrumFrame,
    SpectrumTap,
};
pub use offline::{render_to_wav, WavRecorder};
pub use oscillator::OscillatorParams;
pub use shared::OscillatorHandle;
pub use spectrum::{band_width, SpectrumAnalyzer};
pub use synth::OscillatorSynthesizer;
pub use system::AudioSystem;
