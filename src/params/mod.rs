//! Parameter definitions with physical units and documented semantics.
//!
//! All calibration constants are extracted here with:
//! - Physical units (Hz, seconds, world units, etc.)
//! - Documented ranges and meanings
//! - A `validate()` per config struct

mod audio;
mod geometry;
mod mapping;
mod render;

// Re-export all types
pub use audio::{audio_constants, SpectrumConfig, SynthConfig, WindowFunction};
pub use geometry::{GeometrySettings, SphereVolume};
pub use mapping::MappingCalibration;
pub use render::RecordingConfig;
