//! Per-shape volume and surface area formulas.

use std::f32::consts::PI;

use glam::Vec3;

use super::mesh::TriangleMesh;
use crate::params::SphereVolume;

/// Collision shape primitive attached to an entity
#[derive(Debug, Clone)]
pub enum Shape {
    /// Box with edge lengths along x, y, z
    Box { size: Vec3 },

    Sphere { radius: f32 },

    /// Capsule: `height` is the full tip-to-tip length including both caps
    Capsule { radius: f32, height: f32 },

    Mesh(TriangleMesh),

    /// Anything else, described only by its axis-aligned bounds size
    Other { bounds_size: Vec3 },
}

impl Shape {
    /// Volume in cubic world units (unscaled)
    pub fn volume(&self, sphere_volume: SphereVolume) -> f32 {
        match self {
            Shape::Box { size } => size.x * size.y * size.z,
            Shape::Sphere { radius } => {
                let coefficient = match sphere_volume {
                    SphereVolume::Exact => 4.0 / 3.0,
                    SphereVolume::LegacyTruncated => 1.0,
                };
                coefficient * PI * radius.powi(3)
            }
            Shape::Capsule { radius, height } => {
                let r = *radius;
                let a = cylinder_length(r, *height);
                PI * (r * r) * 2.0 * ((4.0 / 3.0) * r + a)
            }
            Shape::Mesh(mesh) => mesh.volume(),
            // Rough approximation, not a real estimate
            Shape::Other { bounds_size } => bounds_size.x * bounds_size.y * bounds_size.z / 3.0,
        }
    }

    /// Surface area in square world units (unscaled)
    pub fn surface_area(&self) -> f32 {
        match self {
            Shape::Box { size } => 2.0 * (size.x * size.y + size.x * size.z + size.y * size.z),
            Shape::Sphere { radius } => 4.0 * PI * radius * radius,
            Shape::Capsule { radius, height } => {
                let r = *radius;
                let a = cylinder_length(r, *height);
                2.0 * PI * r * (2.0 * r + a)
            }
            Shape::Mesh(mesh) => mesh.surface_area(),
            Shape::Other { bounds_size } => bounds_size.length_squared() * 12.0,
        }
    }

    /// Short name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Box { .. } => "box",
            Shape::Sphere { .. } => "sphere",
            Shape::Capsule { .. } => "capsule",
            Shape::Mesh(_) => "mesh",
            Shape::Other { .. } => "other",
        }
    }
}

/// Length of the cylindrical section between the two caps
fn cylinder_length(radius: f32, height: f32) -> f32 {
    (height - 2.0 * radius).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() <= 1e-4 * b.abs().max(1.0)
    }

    #[test]
    fn test_unit_box() {
        let unit = Shape::Box { size: Vec3::ONE };

        assert_eq!(unit.volume(SphereVolume::Exact), 1.0);
        assert_eq!(unit.surface_area(), 6.0);
    }

    #[test]
    fn test_box_dimensions() {
        let slab = Shape::Box {
            size: Vec3::new(2.0, 3.0, 4.0),
        };

        assert_eq!(slab.volume(SphereVolume::Exact), 24.0);
        assert_eq!(slab.surface_area(), 52.0);
    }

    #[test]
    fn test_sphere_formulas() {
        let ball = Shape::Sphere { radius: 2.0 };

        assert!(approx(ball.surface_area(), 4.0 * PI * 4.0));
        assert!(approx(ball.volume(SphereVolume::Exact), 4.0 / 3.0 * PI * 8.0));
        assert!(approx(ball.volume(SphereVolume::LegacyTruncated), PI * 8.0));
    }

    #[test]
    fn test_capsule_with_cylinder() {
        let capsule = Shape::Capsule {
            radius: 0.5,
            height: 2.0,
        };

        // a = 1.0
        let expected_volume = PI * 0.25 * 2.0 * ((4.0 / 3.0) * 0.5 + 1.0);
        let expected_area = 2.0 * PI * 0.5 * (1.0 + 1.0);
        assert!(approx(capsule.volume(SphereVolume::Exact), expected_volume));
        assert!(approx(capsule.surface_area(), expected_area));
    }

    #[test]
    fn test_capsule_shorter_than_caps_has_no_cylinder() {
        let squat = Shape::Capsule {
            radius: 1.0,
            height: 0.5,
        };
        let exact = Shape::Capsule {
            radius: 1.0,
            height: 2.0,
        };

        assert_eq!(
            squat.volume(SphereVolume::Exact),
            exact.volume(SphereVolume::Exact)
        );
        assert_eq!(squat.surface_area(), exact.surface_area());
    }

    #[test]
    fn test_mesh_shape_delegates() {
        let cube = Shape::Mesh(TriangleMesh::cube(1.0));

        assert!(approx(cube.volume(SphereVolume::Exact), 1.0));
        assert!(approx(cube.surface_area(), 6.0));
    }

    #[test]
    fn test_unsupported_shape_fallback() {
        let other = Shape::Other {
            bounds_size: Vec3::new(3.0, 1.0, 1.0),
        };

        assert!(approx(other.volume(SphereVolume::Exact), 1.0));
        assert!(approx(other.surface_area(), 11.0 * 12.0));
    }
}
