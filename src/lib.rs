pub mod bvh;
pub mod error;
pub mod prelight;
pub mod scene;
pub mod texture;
pub mod trace;

pub use error::{Error, Result};
pub use prelight::{bake, PrelitMaps};
pub use scene::{Scene, World};
pub use texture::Texture;
pub use trace::{shade, Lighting};

pub use kernels;
pub use shared_structs;
