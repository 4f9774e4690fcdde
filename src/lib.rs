//! impactsound - collision-driven sound synthesis
//!
//! Collisions are reduced to a few physical quantities, combined with the
//! struck body's volume and surface area, and mapped onto a damped harmonic
//! oscillator rendered in the audio callback. An 8-band analyzer monitors
//! the result.

pub mod audio;
pub mod cli;
pub mod collision;
pub mod error;
pub mod geometry;
pub mod params;
pub mod scene;

pub use error::{Error, Result};
