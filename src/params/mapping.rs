//! Calibration for mapping collision features onto oscillator parameters.

use crate::error::{Error, Result};

/// Reference scales for normalizing collision and geometry quantities
#[derive(Debug, Clone)]
pub struct MappingCalibration {
    /// Relative velocity treated as 1.0 (world units per second)
    /// Typical impacts land around 50
    pub velocity_scale: f32,

    /// Body volume treated as 1.0 (cubic world units)
    /// A unit capsule lands around 10
    pub volume_scale: f32,

    /// Body surface area treated as 1.0 (square world units)
    pub surface_area_scale: f32,

    /// Impulse magnitude treated as 1.0 (newton-seconds)
    /// Strong impulses land around 30
    pub impulse_scale: f32,

    /// Damping of a zero-impulse collision
    /// Formula: damping = damping_base - damping_span * impulse_normalized
    pub damping_base: f32,

    /// Damping removed per unit of normalized impulse
    pub damping_span: f32,

    /// Keep damping non-negative for impulses beyond the calibrated range
    pub clamp_damping: bool,
}

impl Default for MappingCalibration {
    fn default() -> Self {
        Self {
            velocity_scale: 350.0,
            volume_scale: 27.0,
            surface_area_scale: 27.0,
            impulse_scale: 150.0,
            damping_base: 0.012,
            damping_span: 0.01,
            clamp_damping: true,
        }
    }
}

impl MappingCalibration {
    /// Validate configuration (all scales must be positive)
    pub fn validate(&self) -> Result<()> {
        let scales = [
            ("velocity_scale", self.velocity_scale),
            ("volume_scale", self.volume_scale),
            ("surface_area_scale", self.surface_area_scale),
            ("impulse_scale", self.impulse_scale),
        ];
        for (name, value) in scales {
            if !(value > 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "{} must be > 0, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}
