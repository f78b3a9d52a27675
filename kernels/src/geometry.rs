use glam::Vec3;

const NORMALIZED_TOLERANCE: f32 = 1e-3;

/// A direction that is known to be unit length.
///
/// The only way to get one is [`normalize`] (or one of the axis constants), so
/// anything typed `Normalized` can skip re-normalizing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Normalized(Vec3);

impl Normalized {
    pub const X: Self = Self(Vec3::X);
    pub const Y: Self = Self(Vec3::Y);
    pub const Z: Self = Self(Vec3::Z);
    pub const NEG_X: Self = Self(Vec3::NEG_X);
    pub const NEG_Y: Self = Self(Vec3::NEG_Y);
    pub const NEG_Z: Self = Self(Vec3::NEG_Z);

    fn new(value: Vec3) -> Self {
        debug_assert!(
            (value.length() - 1.0).abs() < NORMALIZED_TOLERANCE,
            "direction is not unit length: {:?}",
            value
        );
        Self(value)
    }

    pub fn value(&self) -> Vec3 {
        self.0
    }

    pub fn dot(&self, other: &Normalized) -> f32 {
        self.0.dot(other.0)
    }

    /// Dot product clamped to `[0, 1]`.
    pub fn saturated_dot(&self, other: &Normalized) -> f32 {
        self.dot(other).clamp(0.0, 1.0)
    }
}

impl core::ops::Neg for Normalized {
    type Output = Normalized;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

pub trait ToNormalized {
    fn to_normalized(self) -> Normalized;
}

impl ToNormalized for Vec3 {
    fn to_normalized(self) -> Normalized {
        Normalized::new(self.normalize())
    }
}

impl ToNormalized for Normalized {
    fn to_normalized(self) -> Normalized {
        self
    }
}

pub fn normalize(value: impl ToNormalized) -> Normalized {
    value.to_normalized()
}

/// Like [`normalize`], but falls back to `fallback` for (near) zero-length input.
pub fn normalize_or(value: Vec3, fallback: Normalized) -> Normalized {
    value.try_normalize().map(Normalized::new).unwrap_or(fallback)
}

pub fn reflect(incident: Vec3, normal: &Normalized) -> Vec3 {
    let normal = normal.value();
    incident - normal * 2.0 * incident.dot(normal)
}

pub fn align_as(v: Vec3, forward: Vec3, right: Vec3, up: Vec3) -> Vec3 {
    v.x * right + v.y * up + v.z * forward
}

/// Rotates a tangent-space vector (z = `normal`) into world space.
///
/// Both the diffuse and the specular samplers go through here, so the frame
/// for a given normal is always the same.
pub fn align_from_tangent(v: Vec3, normal: &Normalized) -> Vec3 {
    let normal = normal.value();
    let helper = if normal.z.abs() < 0.999 {
        Vec3::Z
    } else {
        Vec3::X
    };
    let tangent = helper.cross(normal).normalize();
    let bitangent = normal.cross(tangent);

    align_as(v, normal, tangent, bitangent)
}
