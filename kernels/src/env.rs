use glam::{Vec2, Vec3, Vec4Swizzles};
use shared_structs::{ImageView, Sampler};

use crate::cube::{CubeChain, CubeView};
use crate::geometry::{self, Normalized};
use crate::intersection::Ray;
use crate::material::Albedo;
use crate::surface::Surface;

/// Baked image-based lighting: irradiance, roughness-indexed prefiltered
/// reflections and the split-sum BRDF table.
#[derive(Clone, Copy, Debug)]
pub struct Env<'a> {
    pub irradiance: CubeView<'a>,
    pub specular: CubeChain<'a>,
    pub lut: ImageView<'a>, // x = cosNV, y = roughness; R = scale, G = bias
}

impl<'a> Env<'a> {
    pub fn new(irradiance: CubeView<'a>, specular: CubeChain<'a>, lut: ImageView<'a>) -> Self {
        Self {
            irradiance,
            specular,
            lut,
        }
    }

    pub fn diffuse(&self, albedo: &Albedo, normal: &Normalized) -> Vec3 {
        albedo.diffuse * self.irradiance.sample(Sampler::LINEAR_CLAMP, normal.value()).xyz()
    }

    /// `view` points from the surface toward the eye.
    pub fn specular(&self, albedo: &Albedo, roughness: f32, normal: &Normalized, view: &Normalized) -> Vec3 {
        let reflected = geometry::reflect(-view.value(), normal);
        let lod = roughness * (self.specular.level_count() - 1) as f32;
        let color = self.specular.sample_lod(Sampler::LINEAR_CLAMP, reflected, lod).xyz();

        let n_dot_v = normal.saturated_dot(view);
        let brdf = self.lut.sample(Sampler::LINEAR_CLAMP, Vec2::new(n_dot_v, roughness));
        (albedo.specular * brdf.x + Vec3::splat(brdf.y)) * color
    }

    pub fn color_with(&self, albedo: &Albedo, roughness: f32, normal: &Normalized, view: &Normalized) -> Vec3 {
        self.diffuse(albedo, normal) + self.specular(albedo, roughness, normal, view)
    }

    pub fn compute(&self, surface: &Surface, view: &Normalized) -> Vec3 {
        self.color_with(&surface.albedo(), surface.roughness(), &surface.normal(), view)
    }
}

/// What a ray sees when it leaves the scene.
#[derive(Clone, Copy, Debug)]
pub struct Background<'a> {
    pub cube: CubeView<'a>,
}

impl<'a> Background<'a> {
    pub fn color_for(&self, ray: &Ray) -> Vec3 {
        self.cube.sample(Sampler::LINEAR_CLAMP, ray.direction).xyz()
    }
}
