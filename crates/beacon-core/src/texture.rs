//! Image textures for the ground, the orbiting spheres and the backdrop.
//!
//! Files are decoded on the loading side (a worker thread natively, the
//! fetch task on the web) into a full RGBA8 mip chain, then handed to the
//! runtime like any other late resource.

use image::imageops::{self, FilterType};
use image::RgbaImage;
use thiserror::Error;

/// Where a loaded image is used in the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageSlot {
    /// Color map of the ground plane.
    Ground,
    /// Color and normal map of both spheres.
    Sphere,
    /// Full-screen backdrop behind everything else.
    Background,
}

impl ImageSlot {
    pub const ALL: [ImageSlot; 3] = [ImageSlot::Ground, ImageSlot::Sphere, ImageSlot::Background];

    pub fn file_name(self) -> &'static str {
        match self {
            ImageSlot::Ground => "map.jpg",
            ImageSlot::Sphere => "Material_2077.jpg",
            ImageSlot::Background => "space.jpg",
        }
    }

    /// `file_name` under `dir`, joined with a single `/`.
    pub fn path_in(self, dir: &str) -> String {
        let dir = dir.trim_end_matches('/');
        if dir.is_empty() {
            self.file_name().to_string()
        } else {
            format!("{}/{}", dir, self.file_name())
        }
    }

    /// Whether the image is also sampled as tangent-space normals, which
    /// must bypass sRGB decoding.
    pub fn has_normal_map(self) -> bool {
        matches!(self, ImageSlot::Sphere)
    }
}

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("image has zero size")]
    Empty,
}

/// A decoded image with its mip chain, level 0 first.
#[derive(Clone, Debug)]
pub struct TextureImage {
    pub slot: ImageSlot,
    pub mips: Vec<RgbaImage>,
}

impl TextureImage {
    /// Decode PNG or JPEG bytes.
    pub fn decode(slot: ImageSlot, bytes: &[u8]) -> Result<Self, TextureError> {
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        Self::from_rgba(slot, rgba)
    }

    pub fn from_rgba(slot: ImageSlot, base: RgbaImage) -> Result<Self, TextureError> {
        if base.width() == 0 || base.height() == 0 {
            return Err(TextureError::Empty);
        }
        Ok(Self {
            slot,
            mips: mip_chain(base),
        })
    }

    pub fn width(&self) -> u32 {
        self.mips.first().map_or(0, |m| m.width())
    }

    pub fn height(&self) -> u32 {
        self.mips.first().map_or(0, |m| m.height())
    }
}

/// Number of levels down to 1×1 for a `width` × `height` base.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    (width.max(height).max(1) as f32).log2().floor() as u32 + 1
}

/// Base image followed by successively halved copies, each dimension
/// clamped to at least one texel.
pub fn mip_chain(base: RgbaImage) -> Vec<RgbaImage> {
    let levels = mip_level_count(base.width(), base.height()) as usize;
    let mut chain = Vec::with_capacity(levels);
    chain.push(base);
    while chain.len() < levels {
        let Some(prev) = chain.last() else {
            break;
        };
        let w = (prev.width() / 2).max(1);
        let h = (prev.height() / 2).max(1);
        let next = imageops::resize(prev, w, h, FilterType::Triangle);
        chain.push(next);
    }
    chain
}
