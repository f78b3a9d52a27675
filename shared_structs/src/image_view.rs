// Read-only view of a linear RGBA texture, used wherever shading code samples an image.

use glam::{IVec2, UVec2, Vec2, Vec4};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Filter {
    Nearest,
    Linear,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressMode {
    Repeat,
    ClampToEdge,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sampler {
    pub filter: Filter,
    pub address: AddressMode,
}

impl Sampler {
    pub const LINEAR_REPEAT: Self = Self {
        filter: Filter::Linear,
        address: AddressMode::Repeat,
    };

    pub const LINEAR_CLAMP: Self = Self {
        filter: Filter::Linear,
        address: AddressMode::ClampToEdge,
    };

    pub const NEAREST_CLAMP: Self = Self {
        filter: Filter::Nearest,
        address: AddressMode::ClampToEdge,
    };

    pub fn with_address(self, address: AddressMode) -> Self {
        Self { address, ..self }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ImageView<'a> {
    width: u32,
    height: u32,
    texels: &'a [Vec4],
}

impl<'a> ImageView<'a> {
    pub const fn new(texels: &'a [Vec4], width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            texels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }

    pub fn texels(&self) -> &'a [Vec4] {
        self.texels
    }

    /// Rows `first_row..first_row + rows` as a standalone view.
    pub fn rows(&self, first_row: u32, rows: u32) -> ImageView<'a> {
        let start = first_row as usize * self.width as usize;
        let end = start + rows as usize * self.width as usize;
        ImageView::new(&self.texels[start..end], self.width, rows)
    }

    pub fn read(&self, coord: UVec2) -> Vec4 {
        self.texels[coord.y as usize * self.width as usize + coord.x as usize]
    }

    fn read_addressed(&self, coord: IVec2, address: AddressMode) -> Vec4 {
        let (width, height) = (self.width as i32, self.height as i32);
        let (x, y) = match address {
            AddressMode::Repeat => (coord.x.rem_euclid(width), coord.y.rem_euclid(height)),
            AddressMode::ClampToEdge => (coord.x.clamp(0, width - 1), coord.y.clamp(0, height - 1)),
        };
        self.texels[y as usize * self.width as usize + x as usize]
    }

    pub fn sample(&self, sampler: Sampler, uv: Vec2) -> Vec4 {
        let scaled_uv = uv * Vec2::new(self.width as f32, self.height as f32);
        match sampler.filter {
            Filter::Nearest => self.read_addressed(scaled_uv.floor().as_ivec2(), sampler.address),
            Filter::Linear => {
                // Texel centers sit at half-integer coordinates.
                let centered = scaled_uv - 0.5;
                let floor_uv = centered.floor();
                let frac_uv = centered - floor_uv;
                let base = floor_uv.as_ivec2();

                let c00 = self.read_addressed(base, sampler.address);
                let c10 = self.read_addressed(base + IVec2::new(1, 0), sampler.address);
                let c01 = self.read_addressed(base + IVec2::new(0, 1), sampler.address);
                let c11 = self.read_addressed(base + IVec2::new(1, 1), sampler.address);

                let a = c00.lerp(c10, frac_uv.x);
                let b = c01.lerp(c11, frac_uv.x);
                a.lerp(b, frac_uv.y)
            }
        }
    }
}
