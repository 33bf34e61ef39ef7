use std::path::Path;

use super::AssetError;

/// Decoded RGBA8 pixels ready for GPU upload.
///
/// Rows are stored top to bottom, which is the order `image` decodes them and
/// the order wgpu expects for `v = 0` at the top of the texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl ImageData {
    /// Loads an image (PNG or binary/ASCII PPM) from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(AssetError::NotFound(path.to_path_buf()));
        }

        log::debug!("loading image from {}", path.display());

        let img = ::image::open(path).map_err(|source| AssetError::Decode {
            name: path.display().to_string(),
            source,
        })?;

        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        log::info!("loaded image {width}x{height} from {}", path.display());

        Self::from_raw(rgba.into_raw(), width, height)
    }

    /// Decodes an in-memory image; `name` is only used in error messages.
    pub fn from_bytes(name: &str, bytes: &[u8]) -> Result<Self, AssetError> {
        let img = ::image::load_from_memory(bytes).map_err(|source| AssetError::Decode {
            name: name.to_string(),
            source,
        })?;

        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_raw(rgba.into_raw(), width, height)
    }

    /// Wraps raw RGBA8 pixels, checking that the length matches the size.
    pub fn from_raw(data: Vec<u8>, width: u32, height: u32) -> Result<Self, AssetError> {
        if width == 0 || height == 0 {
            return Err(AssetError::InvalidData(format!(
                "image has zero size ({width}x{height})"
            )));
        }

        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(AssetError::InvalidData(format!(
                "expected {expected} bytes for {width}x{height} RGBA, got {}",
                data.len()
            )));
        }

        Ok(Self { data, width, height })
    }

    /// Single-color image.
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixels = width.max(1) as usize * height.max(1) as usize;
        Self {
            data: color.repeat(pixels),
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Normal map whose every texel encodes the unperturbed tangent-space
    /// normal `(0, 0, 1)`.
    pub fn flat_normal_map() -> Self {
        Self::solid_color(1, 1, [128, 128, 255, 255])
    }

    /// Depth map with zero depth everywhere; parallax mapping leaves UVs untouched.
    pub fn flat_depth_map() -> Self {
        Self::solid_color(1, 1, [0, 0, 0, 255])
    }

    /// Bytes in one row of pixels.
    pub fn bytes_per_row(&self) -> u32 {
        self.width * 4
    }
}
