//! Per-body glue from collision events to the body's oscillator voice.

use super::contact::{CollisionEvent, CollisionFeatures};
use super::impulse_log::ImpulseSlot;
use super::mapper::{map_parameters, MappedParams};
use crate::audio::OscillatorHandle;
use crate::geometry::{GeometryProfile, ShapeNode};
use crate::params::{GeometrySettings, MappingCalibration};

/// A sounding body: its geometry, its voice and its impulse log entry
pub struct CollisionSound {
    profile: GeometryProfile,
    calibration: MappingCalibration,
    voice: OscillatorHandle,
    impulses: ImpulseSlot,

    /// Trigger the voice on every collision
    pub play_on_collision: bool,

    /// Write mapped damping into the voice before triggering
    pub adjust_params_on_collision: bool,
}

impl CollisionSound {
    /// Attach a voice to `body`, computing its geometry profile once
    pub fn new(
        body: &ShapeNode,
        settings: GeometrySettings,
        calibration: MappingCalibration,
        voice: OscillatorHandle,
        impulses: ImpulseSlot,
    ) -> Self {
        Self {
            profile: GeometryProfile::new(body, settings),
            calibration,
            voice,
            impulses,
            play_on_collision: true,
            adjust_params_on_collision: true,
        }
    }

    /// Handle one collision against this body
    ///
    /// Runs on the collision side only; never touches the audio thread beyond
    /// the handle's atomic writes.
    pub fn on_collision(&mut self, event: &CollisionEvent) -> MappedParams {
        let features = CollisionFeatures::from_event(event);
        let mapped = map_parameters(&features, &self.profile, &self.calibration);

        if self.adjust_params_on_collision {
            self.voice.set_damping(mapped.damping);
        }
        if self.play_on_collision {
            self.voice.trigger(mapped.force_restart);
        }
        self.impulses.record(features.impulse_magnitude);

        log::debug!(
            "collision: impulse {:.3} velocity {:.3} contacts {} -> damping {:.5}",
            features.impulse_magnitude,
            features.relative_velocity_magnitude,
            event.contacts.len(),
            mapped.damping
        );

        mapped
    }

    /// Re-sum the body's shapes after they changed
    pub fn recalculate_geometry(&mut self, body: &ShapeNode) {
        self.profile.recalculate(body);
    }

    pub fn profile(&self) -> &GeometryProfile {
        &self.profile
    }

    pub fn voice(&self) -> &OscillatorHandle {
        &self.voice
    }

    pub fn calibration(&self) -> &MappingCalibration {
        &self.calibration
    }
}
