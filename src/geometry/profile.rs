//! Entity-level geometry profile: summed, scale-corrected shape estimates.

use glam::Vec3;

use super::shape::Shape;
use crate::params::GeometrySettings;

/// Fill ratio below which a body counts as hollow
const HOLLOW_FILL_RATIO: f32 = 0.05;

/// An entity's shapes plus its descendants, as supplied by the scene
#[derive(Debug, Clone)]
pub struct ShapeNode {
    pub shapes: Vec<Shape>,

    /// Local scale of this node's transform
    pub local_scale: Vec3,

    pub children: Vec<ShapeNode>,
}

impl ShapeNode {
    pub fn new(shapes: Vec<Shape>) -> Self {
        Self {
            shapes,
            local_scale: Vec3::ONE,
            children: Vec::new(),
        }
    }

    pub fn with_scale(mut self, local_scale: Vec3) -> Self {
        self.local_scale = local_scale;
        self
    }

    pub fn with_child(mut self, child: ShapeNode) -> Self {
        self.children.push(child);
        self
    }

    /// Uniform scale factor: mean of the three local-scale axes
    pub fn mean_scale(&self) -> f32 {
        (self.local_scale.x + self.local_scale.y + self.local_scale.z) / 3.0
    }

    /// Visit this node's shapes, then (optionally) every descendant's
    fn for_each_shape(&self, include_children: bool, visit: &mut impl FnMut(&Shape)) {
        self.shapes.iter().for_each(&mut *visit);
        if include_children {
            for child in &self.children {
                child.for_each_shape(true, visit);
            }
        }
    }
}

/// Cached volume / surface-area estimate for one entity
///
/// Created once with the entity and refreshed only through
/// [`GeometryProfile::recalculate`]. May allocate and walk large meshes, so it
/// never runs on the audio thread.
#[derive(Debug, Clone)]
pub struct GeometryProfile {
    settings: GeometrySettings,
    volume: f32,
    surface_area: f32,
    shape_count: usize,
}

impl GeometryProfile {
    /// Build a profile and compute it immediately
    pub fn new(entity: &ShapeNode, settings: GeometrySettings) -> Self {
        let mut profile = Self {
            settings,
            volume: 0.0,
            surface_area: 0.0,
            shape_count: 0,
        };
        profile.recalculate(entity);
        profile
    }

    /// Re-sum every shape of `entity`
    ///
    /// Each contribution is scaled by the entity's mean scale: cubed for
    /// volume, squared for area. Descendant shapes use the entity's scale too.
    pub fn recalculate(&mut self, entity: &ShapeNode) {
        let s = entity.mean_scale();
        let volume_scale = s * s * s;
        let area_scale = s * s;
        let sphere_volume = self.settings.sphere_volume;

        let mut volume = 0.0_f32;
        let mut surface_area = 0.0_f32;
        let mut shape_count = 0;

        entity.for_each_shape(self.settings.include_children, &mut |shape| {
            if let Shape::Other { .. } = shape {
                log::warn!(
                    "no exact formula for '{}' shape, using bounding-box heuristic",
                    shape.kind()
                );
            }
            volume += shape.volume(sphere_volume) * volume_scale;
            surface_area += shape.surface_area() * area_scale;
            shape_count += 1;
        });

        // Negative scale axes can flip the sign; profiles are never negative
        self.volume = volume.abs();
        self.surface_area = surface_area.abs();
        self.shape_count = shape_count;

        log::debug!(
            "geometry recalculated: {} shapes, volume {:.4}, surface {:.4}",
            self.shape_count,
            self.volume,
            self.surface_area
        );
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn surface_area(&self) -> f32 {
        self.surface_area
    }

    pub fn shape_count(&self) -> usize {
        self.shape_count
    }

    pub fn settings(&self) -> &GeometrySettings {
        &self.settings
    }

    pub fn is_hollow(&self) -> bool {
        self.settings.fill_ratio < HOLLOW_FILL_RATIO
    }

    /// volume × density × fill ratio
    pub fn estimated_mass(&self) -> f32 {
        self.volume * self.settings.density * self.settings.fill_ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::TriangleMesh;
    use std::f32::consts::PI;

    fn unit_box() -> Shape {
        Shape::Box { size: Vec3::ONE }
    }

    #[test]
    fn test_unit_box_profile() {
        let profile = GeometryProfile::new(&ShapeNode::new(vec![unit_box()]), Default::default());

        assert_eq!(profile.volume(), 1.0);
        assert_eq!(profile.surface_area(), 6.0);
        assert_eq!(profile.shape_count(), 1);
    }

    #[test]
    fn test_scale_cubes_volume_and_squares_area() {
        let entity = ShapeNode::new(vec![Shape::Sphere { radius: 1.0 }]);
        let base = GeometryProfile::new(&entity, Default::default());

        let scaled_entity = entity.clone().with_scale(Vec3::splat(2.0));
        let scaled = GeometryProfile::new(&scaled_entity, Default::default());

        assert!((scaled.volume() - base.volume() * 8.0).abs() < 1e-4);
        assert!((scaled.surface_area() - base.surface_area() * 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_scale_uses_mean_of_axes() {
        // Mean of (1, 2, 3) = 2
        let entity = ShapeNode::new(vec![unit_box()]).with_scale(Vec3::new(1.0, 2.0, 3.0));
        let profile = GeometryProfile::new(&entity, Default::default());

        assert!((profile.volume() - 8.0).abs() < 1e-5);
        assert!((profile.surface_area() - 24.0).abs() < 1e-5);
    }

    #[test]
    fn test_children_included_by_default() {
        let entity = ShapeNode::new(vec![unit_box()])
            .with_child(ShapeNode::new(vec![Shape::Sphere { radius: 1.0 }]));

        let with_children = GeometryProfile::new(&entity, Default::default());
        assert_eq!(with_children.shape_count(), 2);
        assert!((with_children.surface_area() - (6.0 + 4.0 * PI)).abs() < 1e-4);

        let settings = GeometrySettings {
            include_children: false,
            ..Default::default()
        };
        let root_only = GeometryProfile::new(&entity, settings);
        assert_eq!(root_only.shape_count(), 1);
        assert_eq!(root_only.volume(), 1.0);
    }

    #[test]
    fn test_children_use_root_scale() {
        let entity = ShapeNode::new(vec![])
            .with_scale(Vec3::splat(3.0))
            .with_child(ShapeNode::new(vec![unit_box()]).with_scale(Vec3::splat(10.0)));
        let profile = GeometryProfile::new(&entity, Default::default());

        assert!((profile.volume() - 27.0).abs() < 1e-4);
    }

    #[test]
    fn test_recalculate_replaces_cached_values() {
        let mut entity = ShapeNode::new(vec![unit_box()]);
        let mut profile = GeometryProfile::new(&entity, Default::default());

        entity.shapes.push(Shape::Mesh(TriangleMesh::cube(1.0)));
        assert_eq!(profile.shape_count(), 1);

        profile.recalculate(&entity);
        assert_eq!(profile.shape_count(), 2);
        assert!((profile.volume() - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_empty_entity_is_zero() {
        let profile = GeometryProfile::new(&ShapeNode::new(vec![]), Default::default());

        assert_eq!(profile.volume(), 0.0);
        assert_eq!(profile.surface_area(), 0.0);
        assert_eq!(profile.shape_count(), 0);
    }

    #[test]
    fn test_hollow_and_mass() {
        let settings = GeometrySettings {
            density: 2.0,
            fill_ratio: 0.5,
            ..Default::default()
        };
        let profile = GeometryProfile::new(&ShapeNode::new(vec![unit_box()]), settings);

        assert!(!profile.is_hollow());
        assert_eq!(profile.estimated_mass(), 1.0);

        let shell = GeometrySettings {
            fill_ratio: 0.01,
            ..Default::default()
        };
        assert!(GeometryProfile::new(&ShapeNode::new(vec![unit_box()]), shell).is_hollow());
    }
}
