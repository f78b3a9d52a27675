use std::path::Path;

use glam::Vec4;
use image::{DynamicImage, ImageBuffer, Rgba32FImage};
use kernels::cube::CubeView;
use shared_structs::ImageView;

use crate::error::{Error, Result};

/// Owned linear RGBA texture, row-major from the top-left texel.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    pub texels: Vec<Vec4>,
}

impl Texture {
    pub fn new(width: u32, height: u32, texels: Vec<Vec4>) -> Self {
        debug_assert_eq!(texels.len(), width as usize * height as usize);
        Self { width, height, texels }
    }

    pub fn solid(width: u32, height: u32, color: Vec4) -> Self {
        Self::new(width, height, vec![color; width as usize * height as usize])
    }

    /// Blank cube atlas with faces of `size`.
    pub fn cube(size: u32) -> Self {
        Self::solid(size, size * 6, Vec4::ZERO)
    }

    pub fn view(&self) -> ImageView<'_> {
        ImageView::new(&self.texels, self.width, self.height)
    }

    /// The texture as a cube map. Fails unless it is a vertical strip of six square faces.
    pub fn cube_view(&self) -> Result<CubeView<'_>> {
        validate_cube_atlas(self.width, self.height)?;
        Ok(CubeView::new(self.view()))
    }

    pub fn from_dynamic_image(image: DynamicImage) -> Self {
        let (width, height) = (image.width(), image.height());
        let buffer = image.into_rgba32f();
        let texels = buffer
            .pixels()
            .map(|p| Vec4::new(p[0], p[1], p[2], p[3]))
            .collect();
        Self::new(width, height, texels)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::from_dynamic_image(load_dynamic_image(path.as_ref())?))
    }

    pub fn load_cube_atlas(path: impl AsRef<Path>) -> Result<Self> {
        let texture = Self::load(path)?;
        validate_cube_atlas(texture.width, texture.height)?;
        Ok(texture)
    }

    pub fn to_image(&self) -> Result<Rgba32FImage> {
        let raw: Vec<f32> = bytemuck::cast_slice(&self.texels).to_vec();
        ImageBuffer::from_raw(self.width, self.height, raw).ok_or(Error::TextureSize {
            width: self.width,
            height: self.height,
            texels: self.texels.len(),
        })
    }

    /// Saves as 8-bit PNG, clamping to `[0, 1]`.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let image = DynamicImage::ImageRgba32F(self.to_image()?).into_rgba8();
        image.save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }
}

fn validate_cube_atlas(width: u32, height: u32) -> Result<()> {
    if width == 0 || width.checked_mul(6) != Some(height) {
        return Err(Error::InvalidCubeAtlas { width, height });
    }
    Ok(())
}

fn load_dynamic_image(path: &Path) -> Result<DynamicImage> {
    // Image crate does not by default decode .hdr images as HDR
    if path.extension().map_or(false, |ext| ext.eq_ignore_ascii_case("hdr")) {
        let hdr_decoder = image::codecs::hdr::HdrDecoder::new(std::io::BufReader::new(std::fs::File::open(path)?))?;
        let width = hdr_decoder.metadata().width;
        let height = hdr_decoder.metadata().height;
        let buffer = hdr_decoder.read_image_hdr()?;
        let raw: Vec<f32> = buffer.into_iter().flat_map(|c| [c[0], c[1], c[2]]).collect();
        let image = ImageBuffer::from_raw(width, height, raw).ok_or_else(|| {
            image::ImageError::Limits(image::error::LimitError::from_kind(
                image::error::LimitErrorKind::DimensionError,
            ))
        })?;
        return Ok(DynamicImage::ImageRgb32F(image));
    }

    Ok(image::io::Reader::open(path)?.decode()?)
}
