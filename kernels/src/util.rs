use core::ops::{Add, Mul};

use glam::{Vec2, Vec3};

/// `a * (1 - t) + b * t`; exact at both ends.
pub fn lerp<T>(a: T, b: T, t: f32) -> T
where
    T: Mul<f32, Output = T> + Add<Output = T>,
{
    a * (1.0 - t) + b * t
}

/// Interpolates triangle vertex attributes with weights `(1 - u - v, u, v)`.
pub fn barycentric<T>(a: T, b: T, c: T, weights: Vec2) -> T
where
    T: Mul<f32, Output = T> + Add<Output = T>,
{
    a * (1.0 - weights.x - weights.y) + b * weights.x + c * weights.y
}

pub fn mask_nan(v: Vec3) -> Vec3 {
    if v.is_finite() {
        v
    } else {
        Vec3::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn barycentric_hits_vertices_exactly() {
        let (a, b, c) = (Vec3::new(0.1, 0.2, 0.3), Vec3::new(4.0, 5.0, 6.0), Vec3::new(-7.0, 8.5, 9.25));
        assert_eq!(barycentric(a, b, c, Vec2::new(0.0, 0.0)), a);
        assert_eq!(barycentric(a, b, c, Vec2::new(1.0, 0.0)), b);
        assert_eq!(barycentric(a, b, c, Vec2::new(0.0, 1.0)), c);
    }

    #[test]
    fn lerp_endpoints() {
        let (a, b) = (Vec3::splat(0.04), Vec3::new(0.3, 0.6, 0.9));
        assert_eq!(lerp(a, b, 0.0), a);
        assert_eq!(lerp(a, b, 1.0), b);
        assert_eq!(lerp(2.0f32, 4.0, 0.5), 3.0);
    }
}
