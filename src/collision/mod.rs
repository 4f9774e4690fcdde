//! Collision handling: event reduction, parameter mapping, per-body sound glue.

mod contact;
mod impulse_log;
mod mapper;
mod sound;

pub use contact::{CollisionEvent, CollisionFeatures, Contact};
pub use impulse_log::{ImpulseLog, ImpulseSlot};
pub use mapper::{map_parameters, MappedParams};
pub use sound::CollisionSound;
