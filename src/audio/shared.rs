//! Lock-free parameter handoff between the collision domain and the audio callback.
//!
//! # Handoff policy
//!
//! Exactly one control side (collision handling) writes parameters and issues
//! triggers; exactly one audio side reads them. Nothing here ever blocks:
//!
//! - Every parameter is an `f32` stored as bits in an `AtomicU32`. Single
//!   fields are never torn.
//! - The audio side snapshots all parameters once per buffer. A write lands at
//!   the next buffer boundary at the latest, and a group of fields written
//!   while a buffer is being rendered may be observed half-updated for that
//!   one buffer.
//! - Triggers bump a generation counter with `Release` ordering. The audio side
//!   loads it with `Acquire`, so parameters written before a trigger are
//!   visible when the trigger is consumed.
//! - `playing` and the observed peak are published back by the audio side.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;

use super::oscillator::OscillatorParams;

/// `f32` stored as raw bits
#[derive(Debug)]
struct AtomicF32(AtomicU32);

impl AtomicF32 {
    fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    fn store(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }
}

/// State shared by an [`OscillatorHandle`] and its synthesizer
#[derive(Debug)]
pub(crate) struct ControlBlock {
    rest_amplitude: AtomicF32,
    mass: AtomicF32,
    damping: AtomicF32,
    stiffness: AtomicF32,
    frequency_hz: AtomicF32,
    volume: AtomicF32,
    volume_multiplier: AtomicF32,

    trigger_generation: AtomicU64,
    playing: AtomicBool,
    peak_amplitude: AtomicF32,
}

impl ControlBlock {
    pub(crate) fn new(params: &OscillatorParams) -> Self {
        Self {
            rest_amplitude: AtomicF32::new(params.rest_amplitude),
            mass: AtomicF32::new(params.mass),
            damping: AtomicF32::new(params.damping),
            stiffness: AtomicF32::new(params.stiffness),
            frequency_hz: AtomicF32::new(params.frequency_hz),
            volume: AtomicF32::new(params.volume),
            volume_multiplier: AtomicF32::new(params.volume_multiplier),
            trigger_generation: AtomicU64::new(0),
            playing: AtomicBool::new(false),
            peak_amplitude: AtomicF32::new(0.0),
        }
    }

    pub(crate) fn snapshot(&self) -> OscillatorParams {
        OscillatorParams {
            rest_amplitude: self.rest_amplitude.load(),
            mass: self.mass.load(),
            damping: self.damping.load(),
            stiffness: self.stiffness.load(),
            frequency_hz: self.frequency_hz.load(),
            volume: self.volume.load(),
            volume_multiplier: self.volume_multiplier.load(),
        }
    }

    fn store(&self, params: &OscillatorParams) {
        self.rest_amplitude.store(params.rest_amplitude);
        self.mass.store(params.mass);
        self.damping.store(params.damping);
        self.stiffness.store(params.stiffness);
        self.frequency_hz.store(params.frequency_hz.max(0.0));
        self.volume.store(params.volume);
        self.volume_multiplier.store(params.volume_multiplier);
    }

    /// Idle → Playing always; Playing → Playing only when forced
    pub(crate) fn request_trigger(&self, force_restart: bool) -> bool {
        if self.playing.load(Ordering::Acquire) && !force_restart {
            return false;
        }
        self.peak_amplitude.store(0.0);
        self.playing.store(true, Ordering::Release);
        self.trigger_generation.fetch_add(1, Ordering::Release);
        true
    }

    pub(crate) fn trigger_generation(&self) -> u64 {
        self.trigger_generation.load(Ordering::Acquire)
    }

    pub(crate) fn publish_playing(&self, playing: bool) {
        self.playing.store(playing, Ordering::Release);
    }

    pub(crate) fn publish_peak(&self, peak: f32) {
        self.peak_amplitude.store(peak);
    }
}

/// Control-side handle to one oscillator voice
///
/// Cheap to clone; every method is wait-free.
#[derive(Debug, Clone)]
pub struct OscillatorHandle {
    shared: Arc<ControlBlock>,
}

impl OscillatorHandle {
    pub(crate) fn new(shared: Arc<ControlBlock>) -> Self {
        Self { shared }
    }

    /// Current parameter set as last written
    pub fn params(&self) -> OscillatorParams {
        self.shared.snapshot()
    }

    /// Replace the whole parameter set
    pub fn set_params(&self, params: &OscillatorParams) {
        self.shared.store(params);
    }

    pub fn set_damping(&self, damping: f32) {
        self.shared.damping.store(damping);
    }

    /// Negative frequencies are stored as 0 so phase never runs backwards
    pub fn set_frequency(&self, frequency_hz: f32) {
        self.shared.frequency_hz.store(frequency_hz.max(0.0));
    }

    pub fn set_volume_multiplier(&self, multiplier: f32) {
        self.shared.volume_multiplier.store(multiplier);
    }

    /// Request a (re)start of the decay curve.
    ///
    /// Returns false when the voice is already playing and `force_restart` is
    /// not set. The audio side resets phase and peak at its next buffer.
    pub fn trigger(&self, force_restart: bool) -> bool {
        self.shared.request_trigger(force_restart)
    }

    /// Whether the voice is audible (as last published by the audio side)
    pub fn is_playing(&self) -> bool {
        self.shared.playing.load(Ordering::Acquire)
    }

    /// Largest output magnitude since the last trigger
    pub fn peak_amplitude(&self) -> f32 {
        self.shared.peak_amplitude.load()
    }
}
