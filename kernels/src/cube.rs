use glam::{Vec3, Vec4};
use shared_structs::{AddressMode, ImageView, Sampler};

use crate::coordinate::{Face, InFace, InScreen, InUV};

/// A single cube map level stored as a vertical strip atlas.
#[derive(Clone, Copy, Debug)]
pub struct CubeView<'a> {
    atlas: ImageView<'a>,
}

impl<'a> CubeView<'a> {
    pub fn new(atlas: ImageView<'a>) -> Self {
        debug_assert_eq!(atlas.height(), atlas.width() * Face::COUNT, "cube atlas must be width x 6*width");
        Self { atlas }
    }

    pub fn size(&self) -> u32 {
        self.atlas.width()
    }

    pub fn atlas(&self) -> ImageView<'a> {
        self.atlas
    }

    pub fn face(&self, face: Face) -> ImageView<'a> {
        self.atlas.rows(face.index() * self.size(), self.size())
    }

    pub fn face_for(&self, coordinate: InScreen) -> Face {
        coordinate.face(self.size())
    }

    pub fn coordinate_in_face(&self, coordinate: InScreen) -> InFace {
        coordinate.in_face(self.size())
    }

    pub fn read_in_face(&self, coordinate: InScreen) -> Vec4 {
        self.face(self.face_for(coordinate)).read(self.coordinate_in_face(coordinate).0)
    }

    /// Samples along `direction`; filtering never crosses a face edge.
    pub fn sample(&self, sampler: Sampler, direction: Vec3) -> Vec4 {
        let face = Face::for_direction(direction);
        let uv = InUV::from_direction(direction, face);
        self.face(face).sample(sampler.with_address(AddressMode::ClampToEdge), uv.0)
    }
}

/// Cube map levels of decreasing size, indexed by level of detail.
#[derive(Clone, Copy, Debug)]
pub struct CubeChain<'a> {
    levels: &'a [CubeView<'a>],
}

impl<'a> CubeChain<'a> {
    pub fn new(levels: &'a [CubeView<'a>]) -> Self {
        debug_assert!(!levels.is_empty(), "cube chain needs at least one level");
        Self { levels }
    }

    pub fn level_count(&self) -> u32 {
        self.levels.len() as u32
    }

    pub fn level(&self, level: u32) -> &CubeView<'a> {
        &self.levels[level as usize]
    }

    /// Linearly blends the two levels around `lod`, clamped to the chain.
    pub fn sample_lod(&self, sampler: Sampler, direction: Vec3, lod: f32) -> Vec4 {
        let max_level = self.level_count() - 1;
        let lod = lod.clamp(0.0, max_level as f32);
        let lower = lod.floor() as u32;
        let upper = (lower + 1).min(max_level);
        let t = lod - lower as f32;

        let a = self.level(lower).sample(sampler, direction);
        if upper == lower || t == 0.0 {
            return a;
        }
        let b = self.level(upper).sample(sampler, direction);
        a.lerp(b, t)
    }
}
