use core::f32::consts::PI;

use glam::{Vec2, Vec3};

use crate::geometry::{self, Normalized};

/// Cosine-weighted hemisphere sampling around a normal.
pub struct CosineWeighted;

impl CosineWeighted {
    pub fn sample(u: Vec2, normal: &Normalized) -> Normalized {
        let r = u.x.sqrt();
        let phi = 2.0 * PI * u.y;

        let local = Vec3::new(r * phi.cos(), r * phi.sin(), (1.0 - u.x).sqrt());
        geometry::normalize(geometry::align_from_tangent(local, normal))
    }
}

/// GGX (Trowbridge-Reitz) importance sampling of the halfway vector around a normal.
// https://blog.selfshadow.com/publications/s2013-shading-course/karis/s2013_pbs_epic_notes_v2.pdf
pub struct Ggx;

impl Ggx {
    pub fn sample(u: Vec2, roughness: f32, normal: &Normalized) -> Normalized {
        let a = roughness * roughness;
        let a2 = a * a;

        let cos_theta = ((1.0 - u.y) / (1.0 + (a2 - 1.0) * u.y)).sqrt();
        let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
        let phi = 2.0 * PI * u.x;

        let local = Vec3::new(sin_theta * phi.cos(), sin_theta * phi.sin(), cos_theta);
        geometry::normalize(geometry::align_from_tangent(local, normal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::normalize;
    use crate::sequence::Hammersley;

    #[test]
    fn cosine_samples_stay_in_hemisphere() {
        let normal = normalize(Vec3::new(0.2, 0.7, -0.4));
        for i in 0..256 {
            let direction = CosineWeighted::sample(Hammersley::distribute(256, i), &normal);
            assert!(direction.dot(&normal) >= -1e-5);
        }
    }

    #[test]
    fn cosine_sample_at_origin_is_the_normal() {
        let normal = normalize(Vec3::new(-1.0, 0.5, 0.25));
        let direction = CosineWeighted::sample(Vec2::ZERO, &normal);
        assert!(direction.value().abs_diff_eq(normal.value(), 1e-5));
    }

    #[test]
    fn ggx_concentrates_with_low_roughness() {
        let normal = Normalized::Y;
        let mean_cos = |roughness: f32| {
            (0..256)
                .map(|i| Ggx::sample(Hammersley::distribute(256, i), roughness, &normal).dot(&normal))
                .sum::<f32>()
                / 256.0
        };
        let smooth = mean_cos(0.1);
        let rough = mean_cos(0.9);
        assert!(smooth > 0.99);
        assert!(rough < smooth);
        assert!(rough > 0.0);
    }

    #[test]
    fn samplers_share_a_tangent_frame() {
        // With u.y = 0 the GGX lobe points along the normal, and with u = 0 the
        // cosine lobe does too; azimuth 0 must map to the same tangent for both.
        let normal = normalize(Vec3::new(0.1, 0.9, 0.3));
        let diffuse = CosineWeighted::sample(Vec2::new(0.5, 0.0), &normal);
        let specular = Ggx::sample(Vec2::new(0.0, 0.5), 1.0, &normal);
        let tangent = geometry::align_from_tangent(Vec3::X, &normal);
        assert!(diffuse.value().dot(tangent) > 0.0);
        assert!(specular.value().dot(tangent) > 0.0);
    }
}
