//! Shared types for the icofold sampler.

use serde::{Deserialize, Serialize};

/// Re-export `RgbImage` so downstream crates can reference panorama and
/// atlas buffers without depending on `image` directly.
pub use image::RgbImage;

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Create dimensions from explicit width and height.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Dimensions of an image buffer.
    #[must_use]
    pub fn of_image(image: &RgbImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
        }
    }
}

/// Configuration for unwrapping a panorama.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnwrapConfig {
    /// Pixel length of a triangular face's base edge. Must be at least 1.
    pub resolution: u32,

    /// Circular offset of face columns in the atlas, in `[-2, 2]`.
    /// Rotates which meridian appears at the atlas's left edge.
    pub face_offset: i32,
}

impl UnwrapConfig {
    /// Default face base-edge resolution in pixels.
    pub const DEFAULT_RESOLUTION: u32 = 600;

    /// Default face column offset.
    pub const DEFAULT_FACE_OFFSET: i32 = 0;
}

impl Default for UnwrapConfig {
    fn default() -> Self {
        Self {
            resolution: Self::DEFAULT_RESOLUTION,
            face_offset: Self::DEFAULT_FACE_OFFSET,
        }
    }
}

/// Errors that can occur while sampling or unwrapping.
///
/// All validation happens eagerly at the start of an operation, so a
/// failed call never produces partial output.
#[derive(Debug, thiserror::Error)]
pub enum UnwrapError {
    /// An equirectangular image or target shape is not twice as wide as
    /// it is tall.
    #[error("image of {width}x{height} does not have a 2:1 (w:h) aspect ratio")]
    AspectRatio {
        /// Offending width in pixels.
        width: u32,
        /// Offending height in pixels.
        height: u32,
    },

    /// The face offset falls outside `[-2, 2]`.
    #[error("face offset must lie in [-2, 2], got {0}")]
    FaceOffsetOutOfRange(i32),

    /// The face resolution is zero.
    #[error("face resolution must be at least 1")]
    ZeroResolution,
}
