use glam::Vec2;
use shared_structs::Triangle;

use crate::geometry::{self, Normalized};
use crate::util;

/// Surface point reconstructed from a triangle hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Primitive {
    pub normal: Normalized,
    pub uv: Vec2,
}

impl Primitive {
    /// Interpolates `triangle` at barycentric `position`, flipping v into texture space.
    pub fn from_triangle(triangle: &Triangle, position: Vec2) -> Self {
        let [n0, n1, n2] = triangle.normals;
        let normal = geometry::normalize(util::barycentric(n0, n1, n2, position));

        let [uv0, uv1, uv2] = triangle.uvs;
        let mut uv = util::barycentric(uv0, uv1, uv2, position);
        uv.y = 1.0 - uv.y;

        Self { normal, uv }
    }
}
