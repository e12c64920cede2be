//! icofold-sampler: Icosahedral unwrapping of equirectangular panoramas
//! (sans-IO).
//!
//! Projects a 360x180 degree equirectangular panorama onto the 20 faces
//! of a regular icosahedron inscribed in the unit sphere, then unwraps
//! the faces into a flat atlas image.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! image buffers and returns image buffers. Decoding, encoding, and the
//! command-line surface live in the `icofold` binary crate.

pub mod geometry;
pub mod raster;
pub mod sampler;
pub mod sphere;
pub mod types;

pub use geometry::{FACE_COUNT, FACES, Icosahedron, VERTEX_COUNT};
pub use raster::{Orientation, TriangleMask, triangle_height};
pub use sampler::IcoSampler;
pub use types::{Dimensions, RgbImage, UnwrapConfig, UnwrapError};

/// Unwrap an equirectangular panorama into an icosahedral atlas.
///
/// Convenience driver over [`IcoSampler`]: builds the sampler for
/// `config.resolution` and unwraps with `config.face_offset`. Callers
/// unwrapping many panoramas at one resolution should construct an
/// [`IcoSampler`] once instead, since geometry and triangle masks are
/// reusable across inputs.
///
/// # Steps
///
/// 1. Build the icosahedron geometry and the up/down triangle masks
/// 2. For each of the 20 faces, generate its 3D sample grid and gather
///    colors from the panorama (nearest neighbor)
/// 3. Scatter all faces into the atlas net, offset by `face_offset`
///
/// # Errors
///
/// Returns [`UnwrapError::ZeroResolution`] if `config.resolution` is 0.
/// Returns [`UnwrapError::AspectRatio`] if the panorama is not 2:1 (w:h).
/// Returns [`UnwrapError::FaceOffsetOutOfRange`] if `config.face_offset`
/// is outside `[-2, 2]`.
pub fn unwrap(eq_image: &RgbImage, config: &UnwrapConfig) -> Result<RgbImage, UnwrapError> {
    let sampler = IcoSampler::new(config.resolution)?;
    sampler.unwrap(eq_image, config.face_offset)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn unwrap_produces_atlas_shape() {
        let panorama = RgbImage::new(40, 20);
        let config = UnwrapConfig {
            resolution: 10,
            face_offset: 0,
        };
        let atlas = unwrap(&panorama, &config).unwrap();
        assert_eq!(atlas.width(), 55);
        assert_eq!(atlas.height(), 3 * triangle_height(10));
    }

    #[test]
    fn unwrap_rejects_zero_resolution() {
        let panorama = RgbImage::new(40, 20);
        let config = UnwrapConfig {
            resolution: 0,
            face_offset: 0,
        };
        assert!(matches!(
            unwrap(&panorama, &config),
            Err(UnwrapError::ZeroResolution),
        ));
    }

    #[test]
    fn unwrap_rejects_bad_aspect_ratio() {
        let panorama = RgbImage::new(40, 21);
        let config = UnwrapConfig {
            resolution: 10,
            face_offset: 0,
        };
        assert!(matches!(
            unwrap(&panorama, &config),
            Err(UnwrapError::AspectRatio {
                width: 40,
                height: 21,
            }),
        ));
    }

    #[test]
    fn unwrap_rejects_out_of_range_offset() {
        let panorama = RgbImage::new(40, 20);
        for face_offset in [-3, 3, 17] {
            let config = UnwrapConfig {
                resolution: 10,
                face_offset,
            };
            assert!(matches!(
                unwrap(&panorama, &config),
                Err(UnwrapError::FaceOffsetOutOfRange(o)) if o == face_offset,
            ));
        }
    }
}
