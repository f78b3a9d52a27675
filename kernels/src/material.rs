use glam::{Vec2, Vec3, Vec4, Vec4Swizzles};
use shared_structs::{ImageView, Sampler, ROUGHNESS_FLOOR};

use crate::util;

// Reflectance at normal incidence shared by all dielectrics.
const DIELECTRIC_F0: f32 = 0.04;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Albedo {
    pub diffuse: Vec3,
    pub specular: Vec3,
}

/// Metal-roughness material. Both textures are expected in linear space.
#[derive(Clone, Copy, Debug)]
pub struct Material<'a> {
    pub albedo: ImageView<'a>,
    pub metal_roughness: ImageView<'a>, // R = metalness, G = roughness
}

impl<'a> Material<'a> {
    pub fn new(albedo: ImageView<'a>, metal_roughness: ImageView<'a>) -> Self {
        Self {
            albedo,
            metal_roughness,
        }
    }

    pub fn raw_albedo_at(&self, uv: Vec2) -> Vec4 {
        self.albedo.sample(Sampler::LINEAR_REPEAT, uv)
    }

    pub fn albedo_at(&self, uv: Vec2) -> Albedo {
        let metalness = self.metalness_at(uv);
        let raw = self.raw_albedo_at(uv).xyz();

        Albedo {
            diffuse: util::lerp(Vec3::ZERO, raw, 1.0 - metalness),
            specular: util::lerp(Vec3::splat(DIELECTRIC_F0), raw, metalness),
        }
    }

    pub fn metalness_at(&self, uv: Vec2) -> f32 {
        self.metal_roughness.sample(Sampler::LINEAR_REPEAT, uv).x.clamp(0.0, 1.0)
    }

    pub fn is_metallic_at(&self, uv: Vec2) -> bool {
        self.metalness_at(uv) == 1.0
    }

    pub fn roughness_at(&self, uv: Vec2) -> f32 {
        self.metal_roughness.sample(Sampler::LINEAR_REPEAT, uv).y.max(ROUGHNESS_FLOOR)
    }
}
