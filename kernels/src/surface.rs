use glam::{Vec2, Vec3};

use crate::bsdf::{BSDF, PBR};
use crate::geometry::Normalized;
use crate::material::{Albedo, Material};
use crate::primitive::Primitive;

/// A shading point: the interpolated primitive plus the material it was hit on.
#[derive(Clone, Copy, Debug)]
pub struct Surface<'a> {
    pub primitive: Primitive,
    pub material: Material<'a>,
}

impl<'a> Surface<'a> {
    pub fn new(primitive: Primitive, material: Material<'a>) -> Self {
        Self { primitive, material }
    }

    pub fn normal(&self) -> Normalized {
        self.primitive.normal
    }

    pub fn uv(&self) -> Vec2 {
        self.primitive.uv
    }

    pub fn albedo(&self) -> Albedo {
        self.material.albedo_at(self.uv())
    }

    pub fn roughness(&self) -> f32 {
        self.material.roughness_at(self.uv())
    }

    pub fn metalness(&self) -> f32 {
        self.material.metalness_at(self.uv())
    }

    pub fn is_metallic(&self) -> bool {
        self.material.is_metallic_at(self.uv())
    }

    /// Radiance reflected toward `view` for unit light arriving from `light`.
    /// Both directions point away from the surface.
    pub fn color_with(&self, light: &Normalized, view: &Normalized) -> Vec3 {
        let bsdf = PBR {
            albedo: self.albedo(),
            roughness: self.roughness(),
        };
        bsdf.evaluate(&self.normal(), light, view)
    }
}
