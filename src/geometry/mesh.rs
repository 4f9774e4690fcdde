//! Indexed triangle mesh with divergence-theorem volume and surface area.

use glam::Vec3;

use crate::error::{Error, Result};

/// Indexed triangle mesh (three indices per triangle)
///
/// Volume assumes a closed, consistently wound surface. Open or non-manifold
/// meshes are accepted but their volume is meaningless; only index validity
/// is checked on construction.
#[derive(Debug, Clone)]
pub struct TriangleMesh {
    vertices: Vec<Vec3>,
    indices: Vec<u32>,
}

impl TriangleMesh {
    /// Build a mesh, rejecting partial triangles and out-of-range indices
    pub fn new(vertices: Vec<Vec3>, indices: Vec<u32>) -> Result<Self> {
        if indices.len() % 3 != 0 {
            return Err(Error::InvalidMesh(format!(
                "index count {} is not a multiple of 3",
                indices.len()
            )));
        }
        if let Some(&bad) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            return Err(Error::InvalidMesh(format!(
                "index {} out of range for {} vertices",
                bad,
                vertices.len()
            )));
        }
        Ok(Self { vertices, indices })
    }

    /// Axis-aligned cube centred on the origin, outward-facing winding
    pub fn cube(size: f32) -> Self {
        let h = size * 0.5;
        let vertices = vec![
            Vec3::new(-h, -h, -h),
            Vec3::new(h, -h, -h),
            Vec3::new(h, h, -h),
            Vec3::new(-h, h, -h),
            Vec3::new(-h, -h, h),
            Vec3::new(h, -h, h),
            Vec3::new(h, h, h),
            Vec3::new(-h, h, h),
        ];
        #[rustfmt::skip]
        let indices = vec![
            0, 2, 1, 0, 3, 2, // -Z
            4, 5, 6, 4, 6, 7, // +Z
            0, 1, 5, 0, 5, 4, // -Y
            3, 7, 6, 3, 6, 2, // +Y
            0, 4, 7, 0, 7, 3, // -X
            1, 2, 6, 1, 6, 5, // +X
        ];
        Self { vertices, indices }
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    fn triangles(&self) -> impl Iterator<Item = (Vec3, Vec3, Vec3)> + '_ {
        self.indices.chunks_exact(3).map(|tri| {
            (
                self.vertices[tri[0] as usize],
                self.vertices[tri[1] as usize],
                self.vertices[tri[2] as usize],
            )
        })
    }

    /// Enclosed volume: |Σ signed tetrahedron volume against the origin|
    pub fn volume(&self) -> f32 {
        let signed: f32 = self
            .triangles()
            .map(|(a, b, c)| a.dot(b.cross(c)) / 6.0)
            .sum();
        signed.abs()
    }

    /// Total area: ½ Σ |cross(e1, e2)|
    pub fn surface_area(&self) -> f32 {
        // Accumulate in f64, large meshes lose precision otherwise
        let sum: f64 = self
            .triangles()
            .map(|(a, b, c)| (b - a).cross(c - a).length() as f64)
            .sum();
        (sum / 2.0) as f32
    }

    /// Size of the axis-aligned bounding box
    pub fn bounds_size(&self) -> Vec3 {
        let Some(&first) = self.vertices.first() else {
            return Vec3::ZERO;
        };
        let (min, max) = self
            .vertices
            .iter()
            .fold((first, first), |(min, max), &v| (min.min(v), max.max(v)));
        max - min
    }
}
