//! Audio-side oscillator voice: owns phase and renders interleaved buffers.

use std::f64::consts::TAU;
use std::sync::Arc;

use super::oscillator::OscillatorParams;
use super::shared::{ControlBlock, OscillatorHandle};
use crate::params::SynthConfig;

/// Real-time damped-oscillator voice
///
/// Lives on the audio thread. [`render`](Self::render) never blocks or
/// allocates; parameters and triggers arrive through the [`OscillatorHandle`]
/// obtained from [`handle`](Self::handle).
pub struct OscillatorSynthesizer {
    shared: Arc<ControlBlock>,
    sample_rate_hz: u32,
    audibility_threshold: f32,

    /// Elapsed synthesis time since the last trigger
    phase: f64,
    playing: bool,
    peak: f32,
    seen_generation: u64,
}

impl OscillatorSynthesizer {
    pub fn new(config: &SynthConfig) -> Self {
        Self {
            shared: Arc::new(ControlBlock::new(&config.voice)),
            sample_rate_hz: config.sample_rate_hz,
            audibility_threshold: config.audibility_threshold,
            phase: 0.0,
            playing: false,
            peak: 0.0,
            seen_generation: 0,
        }
    }

    /// Control-side handle for the collision domain
    pub fn handle(&self) -> OscillatorHandle {
        OscillatorHandle::new(Arc::clone(&self.shared))
    }

    /// Trigger and apply immediately, for single-threaded hosts and tests
    pub fn trigger(&mut self, force_restart: bool) -> bool {
        let accepted = self.shared.request_trigger(force_restart);
        self.poll_trigger();
        accepted
    }

    /// Consume a pending trigger, if any. Returns true when one was applied.
    pub fn poll_trigger(&mut self) -> bool {
        let generation = self.shared.trigger_generation();
        if generation == self.seen_generation {
            return false;
        }
        self.seen_generation = generation;
        self.phase = 0.0;
        self.peak = 0.0;
        self.playing = true;
        self.shared.publish_playing(true);
        true
    }

    /// Fill an interleaved buffer of `frames × channels` samples in place.
    ///
    /// The mono signal is written to every channel. An idle voice writes
    /// silence. If the last written sample is below the audibility threshold
    /// the voice goes idle.
    pub fn render(&mut self, data: &mut [f32], channels: usize) {
        self.poll_trigger();

        if !self.playing || channels == 0 || data.len() < channels {
            data.fill(0.0);
            return;
        }

        let params = self.shared.snapshot();
        let increment = self.phase_increment(&params);
        let mut last = 0.0_f32;

        for frame in data.chunks_mut(channels) {
            self.phase += increment;
            last = params.sample(self.phase);
            self.peak = self.peak.max(last.abs());
            frame.fill(last);
        }

        self.shared.publish_peak(self.peak);

        if last.abs() < self.audibility_threshold {
            self.playing = false;
            // A trigger that raced this buffer keeps the published flag set;
            // it is consumed at the next buffer.
            if self.shared.trigger_generation() == self.seen_generation {
                self.shared.publish_playing(false);
            }
        }
    }

    fn phase_increment(&self, params: &OscillatorParams) -> f64 {
        TAU * params.frequency_hz as f64 / self.sample_rate_hz as f64
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn peak_amplitude(&self) -> f32 {
        self.peak
    }

    pub fn sample_rate_hz(&self) -> u32 {
        self.sample_rate_hz
    }
}
