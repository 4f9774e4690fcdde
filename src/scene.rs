//! Scripted demo scene: one sounding body and a deterministic impact sequence.

use glam::Vec3;

use crate::collision::{CollisionEvent, Contact};
use crate::geometry::{Shape, ShapeNode, TriangleMesh};

/// Impulse range the script sweeps through (N·s)
const MIN_IMPULSE: f32 = 10.0;
const MAX_IMPULSE: f32 = 150.0;

/// The demo body: a capsule with a small cube-mesh attachment
pub fn demo_body() -> ShapeNode {
    let handle = ShapeNode::new(vec![Shape::Mesh(TriangleMesh::cube(0.5))]);
    ShapeNode::new(vec![Shape::Capsule {
        radius: 0.5,
        height: 2.0,
    }])
    .with_scale(Vec3::splat(1.5))
    .with_child(handle)
}

/// Evenly spaced impacts of varying strength
#[derive(Debug, Clone)]
pub struct ImpactScript {
    count: usize,
    interval_secs: f64,
    next: usize,
}

impl ImpactScript {
    pub fn new(count: usize, interval_ms: u64) -> Self {
        Self {
            count,
            interval_secs: interval_ms as f64 / 1000.0,
            next: 0,
        }
    }

    /// Start time of impact `index` (seconds)
    pub fn time_of(&self, index: usize) -> f64 {
        index as f64 * self.interval_secs
    }

    /// Time the last impact fires, or 0 with no impacts
    pub fn duration_secs(&self) -> f64 {
        self.time_of(self.count.saturating_sub(1))
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.count
    }

    /// Next impact whose start time is at or before `time_secs`
    pub fn due(&mut self, time_secs: f64) -> Option<CollisionEvent> {
        if self.is_finished() || self.time_of(self.next) > time_secs {
            return None;
        }
        let event = Self::event(self.next, self.count);
        self.next += 1;
        Some(event)
    }

    /// Impact `index` of `count`: impulse ramps from weak to strong,
    /// alternating between one and four contacts.
    pub fn event(index: usize, count: usize) -> CollisionEvent {
        let t = if count > 1 {
            index as f32 / (count - 1) as f32
        } else {
            1.0
        };
        let impulse = MIN_IMPULSE + (MAX_IMPULSE - MIN_IMPULSE) * t;

        let contacts = if index % 2 == 0 {
            vec![Contact {
                point: Vec3::new(0.0, -1.5, 0.0),
                normal: Vec3::Y,
                separation: -0.002,
            }]
        } else {
            [(-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0), (1.0, 1.0)]
                .iter()
                .map(|&(x, z)| Contact {
                    point: Vec3::new(x * 0.4, -1.5, z * 0.4),
                    normal: Vec3::new(x * 0.1, 1.0, z * 0.1).normalize(),
                    separation: -0.001,
                })
                .collect()
        };

        CollisionEvent {
            contacts,
            impulse: Vec3::new(0.0, impulse, 0.0),
            relative_velocity: Vec3::new(0.0, -impulse / 3.0, 0.0),
        }
    }
}
