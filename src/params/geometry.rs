//! Geometry estimation settings.

use crate::error::{Error, Result};

/// Sphere volume formula selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SphereVolume {
    /// (4/3)·π·r³
    #[default]
    Exact,

    /// π·r³, reproducing engines that evaluated 4/3 in integer arithmetic.
    /// Only useful to match calibration tuned against those values.
    LegacyTruncated,
}

/// Per-entity geometry settings
#[derive(Debug, Clone)]
pub struct GeometrySettings {
    /// Sum shapes attached to descendant nodes as well
    pub include_children: bool,

    /// Sphere volume formula
    pub sphere_volume: SphereVolume,

    /// Material density (mass units per cubic world unit)
    pub density: f32,

    /// Fraction of the enclosed volume that is solid (0..=1)
    pub fill_ratio: f32,
}

impl Default for GeometrySettings {
    fn default() -> Self {
        Self {
            include_children: true,
            sphere_volume: SphereVolume::Exact,
            density: 0.1,
            fill_ratio: 1.0,
        }
    }
}

impl GeometrySettings {
    /// Validate configuration (density >= 0, fill ratio within 0..=1)
    pub fn validate(&self) -> Result<()> {
        if !(self.density >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "density must be >= 0, got {}",
                self.density
            )));
        }
        if !(0.0..=1.0).contains(&self.fill_ratio) {
            return Err(Error::InvalidConfig(format!(
                "fill ratio must be within 0..=1, got {}",
                self.fill_ratio
            )));
        }
        Ok(())
    }
}
