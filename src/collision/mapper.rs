//! Maps collision features and body geometry onto oscillator parameters.

use super::contact::CollisionFeatures;
use crate::geometry::GeometryProfile;
use crate::params::MappingCalibration;

/// Result of mapping one collision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MappedParams {
    /// Damping to write into the oscillator
    pub damping: f32,

    /// Always true: every collision restarts the decay curve
    pub force_restart: bool,

    pub velocity_normalized: f32,
    pub volume_normalized: f32,
    pub surface_area_normalized: f32,
    pub impulse_normalized: f32,
}

/// Pure mapping: identical inputs always give identical outputs.
///
/// Stronger impulses lower the damping so harder hits ring longer:
/// `damping = damping_base − damping_span × impulse / impulse_scale`.
pub fn map_parameters(
    features: &CollisionFeatures,
    profile: &GeometryProfile,
    calibration: &MappingCalibration,
) -> MappedParams {
    let impulse_normalized = features.impulse_magnitude / calibration.impulse_scale;

    let mut damping = calibration.damping_base - calibration.damping_span * impulse_normalized;
    if calibration.clamp_damping {
        damping = damping.max(0.0);
    }

    MappedParams {
        damping,
        force_restart: true,
        velocity_normalized: features.relative_velocity_magnitude / calibration.velocity_scale,
        volume_normalized: profile.volume() / calibration.volume_scale,
        surface_area_normalized: profile.surface_area() / calibration.surface_area_scale,
        impulse_normalized,
    }
}
