//! Addressing for cube maps stored as a vertical strip atlas: `size` wide,
//! `6 * size` tall, faces stacked top to bottom in [`Face`] order.

use glam::{UVec2, Vec2, Vec3};

use crate::geometry::{self, Normalized};

#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Face {
    PositiveX,
    NegativeX,
    PositiveY,
    NegativeY,
    PositiveZ,
    NegativeZ,
}

impl Face {
    pub const COUNT: u32 = 6;

    pub const ALL: [Face; 6] = [
        Face::PositiveX,
        Face::NegativeX,
        Face::PositiveY,
        Face::NegativeY,
        Face::PositiveZ,
        Face::NegativeZ,
    ];

    pub fn from_index(index: u32) -> Face {
        debug_assert!(index < Self::COUNT, "face index out of range: {}", index);
        Self::ALL[(index % Self::COUNT) as usize]
    }

    pub fn index(self) -> u32 {
        self as u32
    }

    /// The face whose axis dominates `direction`.
    pub fn for_direction(direction: Vec3) -> Face {
        let abs = direction.abs();
        if abs.x >= abs.y && abs.x >= abs.z {
            if direction.x >= 0.0 {
                Face::PositiveX
            } else {
                Face::NegativeX
            }
        } else if abs.y >= abs.z {
            if direction.y >= 0.0 {
                Face::PositiveY
            } else {
                Face::NegativeY
            }
        } else if direction.z >= 0.0 {
            Face::PositiveZ
        } else {
            Face::NegativeZ
        }
    }
}

/// Pixel in the whole atlas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InScreen(pub UVec2);

impl InScreen {
    pub fn face(&self, size: u32) -> Face {
        Face::from_index(self.0.y / size)
    }

    pub fn in_face(&self, size: u32) -> InFace {
        InFace(self.0 % size)
    }

    pub fn from_face(face: Face, coordinate: InFace, size: u32) -> InScreen {
        InScreen(UVec2::new(coordinate.0.x, face.index() * size + coordinate.0.y))
    }
}

/// Pixel within one face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InFace(pub UVec2);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InUV(pub Vec2);

impl InUV {
    pub fn from_face(coordinate: InFace, size: u32) -> InUV {
        InUV(coordinate.0.as_vec2() / size as f32)
    }

    /// Center of texel `coordinate`, where bilinear sampling returns the stored value unblended.
    pub fn from_texel_center(coordinate: InFace, size: u32) -> InUV {
        InUV((coordinate.0.as_vec2() + 0.5) / size as f32)
    }

    pub fn from_screen(coordinate: InScreen, size: UVec2) -> InUV {
        InUV(coordinate.0.as_vec2() / size.as_vec2())
    }

    /// UV on `face` that `direction` passes through. Inverse of [`InNdc::from_uv_in_face`].
    pub fn from_direction(direction: Vec3, face: Face) -> InUV {
        let p = match face {
            Face::PositiveX | Face::NegativeX => direction / direction.x.abs(),
            Face::PositiveY | Face::NegativeY => direction / direction.y.abs(),
            Face::PositiveZ | Face::NegativeZ => direction / direction.z.abs(),
        };
        let (x, y) = match face {
            Face::PositiveX => (-p.z, p.y),
            Face::NegativeX => (p.z, p.y),
            Face::PositiveY => (p.x, -p.z),
            Face::NegativeY => (p.x, p.z),
            Face::PositiveZ => (p.x, p.y),
            Face::NegativeZ => (-p.x, p.y),
        };
        InUV(Vec2::new((x + 1.0) * 0.5, (1.0 - y) * 0.5))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InNdc(pub Vec3);

impl InNdc {
    /// Front-facing projection of `uv` at depth `z`; v grows downwards.
    pub fn from_uv(coordinate: InUV, z: f32) -> InNdc {
        let uv = coordinate.0;
        InNdc(Vec3::new(uv.x * 2.0 - 1.0, uv.y * -2.0 + 1.0, z))
    }

    pub fn from_uv_in_face(coordinate: InUV, face: Face) -> InNdc {
        let ndc = Self::from_uv(coordinate, 0.0).0;
        let value = match face {
            Face::PositiveX => Vec3::new(1.0, ndc.y, -ndc.x),
            Face::NegativeX => Vec3::new(-1.0, ndc.y, ndc.x),
            Face::PositiveY => Vec3::new(ndc.x, 1.0, -ndc.y),
            Face::NegativeY => Vec3::new(ndc.x, -1.0, ndc.y),
            Face::PositiveZ => Vec3::new(ndc.x, ndc.y, 1.0),
            Face::NegativeZ => Vec3::new(-ndc.x, ndc.y, -1.0),
        };
        InNdc(value)
    }

    pub fn direction(&self) -> Normalized {
        geometry::normalize(self.0)
    }
}

/// Outward direction through the center of atlas pixel `coordinate` of a cube with faces of `size`.
pub fn direction_for(coordinate: InScreen, size: u32) -> Normalized {
    let face = coordinate.face(size);
    let uv = InUV::from_texel_center(coordinate.in_face(size), size);
    InNdc::from_uv_in_face(uv, face).direction()
}
