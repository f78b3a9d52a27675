use glam::{Vec3, Vec4, Vec4Swizzles};
use shared_structs::Sampler;

use crate::coordinate::{self, InScreen};
use crate::cube::CubeView;
use crate::geometry::Normalized;
use crate::sample::{CosineWeighted, Ggx};
use crate::sequence::Hammersley;

fn mean_of(sample_count: u32, mut radiance: impl FnMut(u32) -> Vec3) -> Vec3 {
    if sample_count == 0 {
        return Vec3::ZERO;
    }
    let mut sum = Vec3::ZERO;
    for i in 0..sample_count {
        sum += radiance(i);
    }
    sum / sample_count as f32
}

/// Cosine-weighted hemispherical mean of `source` around `normal`.
pub fn irradiance(source: &CubeView, normal: &Normalized, sample_count: u32) -> Vec3 {
    mean_of(sample_count, |i| {
        let u = Hammersley::distribute(sample_count, i);
        let direction = CosineWeighted::sample(u, normal);
        source.sample(Sampler::LINEAR_CLAMP, direction.value()).xyz()
    })
}

/// GGX-weighted mean of `source` around `normal` for one roughness.
pub fn prefiltered(source: &CubeView, normal: &Normalized, roughness: f32, sample_count: u32) -> Vec3 {
    mean_of(sample_count, |i| {
        let u = Hammersley::distribute(sample_count, i);
        let direction = Ggx::sample(u, roughness, normal);
        source.sample(Sampler::LINEAR_CLAMP, direction.value()).xyz()
    })
}

/// Irradiance texel `coordinate` of a destination atlas with faces of `size`.
pub fn irradiance_at(source: &CubeView, coordinate: InScreen, size: u32, sample_count: u32) -> Vec4 {
    let normal = coordinate::direction_for(coordinate, size);
    irradiance(source, &normal, sample_count).extend(1.0)
}

/// Prefiltered texel `coordinate` of a destination atlas with faces of `size`.
pub fn prefiltered_at(
    source: &CubeView,
    coordinate: InScreen,
    size: u32,
    roughness: f32,
    sample_count: u32,
) -> Vec4 {
    let normal = coordinate::direction_for(coordinate, size);
    prefiltered(source, &normal, roughness, sample_count).extend(1.0)
}
