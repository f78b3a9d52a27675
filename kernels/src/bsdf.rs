use core::f32::consts::PI;

use glam::Vec3;

use crate::geometry::{self, Normalized};
use crate::material::Albedo;

type Spectrum = Vec3;

/// Remapping of roughness to the Schlick-GGX `k` term.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeometryUsage {
    /// Punctual and directional lights: `k = (roughness + 1)^2 / 8`.
    Analytic,
    /// Image-based lighting: `k = roughness^2 / 2`.
    ImageBased,
}

impl GeometryUsage {
    fn k(self, roughness: f32) -> f32 {
        match self {
            GeometryUsage::Analytic => (roughness + 1.0) * (roughness + 1.0) / 8.0,
            GeometryUsage::ImageBased => roughness * roughness / 2.0,
        }
    }
}

pub trait BSDF {
    /// Reflected radiance toward `view` per unit irradiance arriving from `light`,
    /// already multiplied by the cosine at the surface.
    fn evaluate(&self, normal: &Normalized, light: &Normalized, view: &Normalized) -> Spectrum;
}

pub struct Lambertian {
    pub albedo: Spectrum,
}

impl Lambertian {
    pub fn compute(albedo: Spectrum) -> Spectrum {
        albedo / PI
    }
}

impl BSDF for Lambertian {
    fn evaluate(&self, normal: &Normalized, light: &Normalized, _view: &Normalized) -> Spectrum {
        Self::compute(self.albedo) * normal.saturated_dot(light)
    }
}

// GGX / Trowbridge-Reitz normal distribution.
pub fn distribution(roughness: f32, normal: &Normalized, halfway: &Normalized) -> f32 {
    let alpha = roughness * roughness;
    let alpha2 = alpha * alpha;
    let n_dot_h = normal.saturated_dot(halfway);
    let d = n_dot_h * n_dot_h * (alpha2 - 1.0) + 1.0;
    alpha2 / (PI * d * d)
}

// Schlick-GGX geometry function from https://learnopengl.com/pbr/theory
pub fn geometry_schlick(roughness: f32, normal: &Normalized, v: &Normalized, usage: GeometryUsage) -> f32 {
    let k = usage.k(roughness);
    let n_dot_v = normal.saturated_dot(v);
    n_dot_v / (n_dot_v * (1.0 - k) + k)
}

pub fn geometry_smith(
    roughness: f32,
    normal: &Normalized,
    light: &Normalized,
    view: &Normalized,
    usage: GeometryUsage,
) -> f32 {
    geometry_schlick(roughness, normal, light, usage) * geometry_schlick(roughness, normal, view, usage)
}

pub fn fresnel_schlick(f0: Spectrum, view: &Normalized, halfway: &Normalized) -> Spectrum {
    let v_dot_h = view.saturated_dot(halfway);
    f0 + (Vec3::ONE - f0) * (1.0 - v_dot_h).powi(5)
}

/// The specular lobe `D * G * F / (4 * cosNL * cosNV)`, with both cosines kept off zero.
pub fn cook_torrance(
    d: f32,
    g: f32,
    f: Spectrum,
    normal: &Normalized,
    light: &Normalized,
    view: &Normalized,
) -> Spectrum {
    let n_dot_l = normal.dot(light).clamp(1e-3, 1.0);
    let n_dot_v = normal.dot(view).clamp(1e-3, 1.0);
    d * g * f / (4.0 * n_dot_l * n_dot_v)
}

/// Metallic-workflow surface response: Lambertian diffuse plus Cook-Torrance specular.
pub struct PBR {
    pub albedo: Albedo,
    pub roughness: f32,
}

impl BSDF for PBR {
    fn evaluate(&self, normal: &Normalized, light: &Normalized, view: &Normalized) -> Spectrum {
        let halfway = geometry::normalize_or(light.value() + view.value(), *normal);
        let n_dot_l = normal.saturated_dot(light);
        let fresnel = fresnel_schlick(self.albedo.specular, view, &halfway);

        let diffuse = (Vec3::ONE - fresnel) * Lambertian::compute(self.albedo.diffuse) * n_dot_l;

        let d_term = distribution(self.roughness, normal, &halfway);
        let g_term = geometry_smith(self.roughness, normal, light, view, GeometryUsage::Analytic);
        let specular = cook_torrance(d_term, g_term, fresnel, normal, light, view) * n_dot_l;

        diffuse + specular
    }
}
