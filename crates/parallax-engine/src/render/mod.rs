//! GPU rendering subsystem.
//!
//! Scene objects own their GPU resources (buffers, textures, bind groups) and
//! create them lazily on first draw; the shared render pipeline is cached per
//! surface format in `ParallaxPipeline`.
//!
//! Convention:
//! - world space is right-handed, +Y up, camera looks down -Z by default
//! - clip space depth is `[0, 1]`; the depth buffer is cleared to 1.0

mod ctx;
mod error;
mod image;
mod pipeline;
mod texture;
mod uniforms;
mod vertex;

pub use ctx::{RenderCtx, RenderTarget};
pub use error::AssetError;
pub use image::ImageData;
pub use pipeline::ParallaxPipeline;
pub use texture::{Texture, TextureKind};
pub use uniforms::{ObjectUniforms, ShadingFlags};
pub use vertex::{MeshVertex, FLOATS_PER_VERTEX};
