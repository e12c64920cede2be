//! Conversions between 3D unit vectors, polar angles, and equirectangular
//! pixel coordinates.
//!
//! Conventions: `phi` is the longitude in `[-pi, pi]` measured with
//! `atan2(x, z)`, `theta` is the latitude in `[-pi/2, pi/2]` measured with
//! `asin(y)`. Pixel `(0, 0)` is the top-left corner of the panorama, so
//! negative `y` in 3D is "up" in the image.

use std::f64::consts::{PI, TAU};

use nalgebra::Vector3;

use crate::types::{Dimensions, UnwrapError};

/// Convert a 3D unit vector to polar angles `(phi, theta)`.
///
/// No length check is performed; passing a non-unit vector yields
/// meaningless angles. Callers must normalize first.
#[must_use]
pub fn xyz_to_polar(v: Vector3<f64>) -> (f64, f64) {
    (v.x.atan2(v.z), v.y.asin())
}

/// Convert polar angles to pixel coordinates in an equirectangular image
/// of the given dimensions.
///
/// The returned coordinates are fractional; `(-0.5, -0.5)` is the outer
/// corner of the top-left pixel.
///
/// # Errors
///
/// Returns [`UnwrapError::AspectRatio`] unless `dims` is 2:1 (w:h).
pub fn polar_to_equi(
    phi: f64,
    theta: f64,
    dims: Dimensions,
) -> Result<(f64, f64), UnwrapError> {
    check_aspect_ratio(dims)?;

    let x = (phi / TAU + 0.5).mul_add(f64::from(dims.width), -0.5);
    let y = (theta / PI + 0.5).mul_add(f64::from(dims.height), -0.5);
    Ok((x, y))
}

/// Convert equirectangular pixel coordinates back to polar angles.
///
/// Exact inverse of [`polar_to_equi`]. Not used by the sampling pipeline
/// itself; exposed for callers going the other way.
#[must_use]
pub fn equi_to_polar(x: f64, y: f64, dims: Dimensions) -> (f64, f64) {
    let phi = ((x + 0.5) / f64::from(dims.width) - 0.5) * TAU;
    let theta = ((y + 0.5) / f64::from(dims.height) - 0.5) * PI;
    (phi, theta)
}

/// Check that a shape has the 2:1 aspect ratio required of
/// equirectangular images.
///
/// # Errors
///
/// Returns [`UnwrapError::AspectRatio`] if `width != 2 * height`.
pub fn check_aspect_ratio(dims: Dimensions) -> Result<(), UnwrapError> {
    if dims.width == 2 * dims.height {
        Ok(())
    } else {
        Err(UnwrapError::AspectRatio {
            width: dims.width,
            height: dims.height,
        })
    }
}
