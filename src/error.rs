use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("cube atlas must be width x 6*width, got {width}x{height}")]
    InvalidCubeAtlas { width: u32, height: u32 },
    #[error("texture is {width}x{height} but holds {texels} texels")]
    TextureSize { width: u32, height: u32, texels: usize },
    #[error("sample count must be at least 1")]
    ZeroSampleCount,
    #[error("at least one specular level is required")]
    ZeroSpecularLevels,
    #[error("piece {piece} of mesh {mesh} refers to missing material {material}")]
    InvalidMaterialIndex { mesh: usize, piece: usize, material: usize },
    #[error("instance {instance} refers to missing mesh {mesh}")]
    InvalidMeshIndex { instance: usize, mesh: usize },
    #[error("ray buffer has {rays} rays but the output holds {outputs}")]
    RayBufferMismatch { rays: usize, outputs: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
