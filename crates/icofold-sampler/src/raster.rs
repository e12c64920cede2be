//! Rasterization of the canonical equilateral face triangle.
//!
//! A face is sampled on a `resolution x round(resolution * sqrt(3)/2)`
//! pixel canvas holding an equilateral triangle whose base is either the
//! top edge (apex pointing down) or the bottom edge (apex pointing up).
//! The filled pixel set is computed once per `(resolution, orientation)`
//! and reused both as a scatter target in atlas space and, through
//! [`TriangleMask::face_local_points`], as the canonical flat triangle
//! that gets projected onto the sphere.

use image::{GrayImage, Luma};
use imageproc::drawing::draw_polygon_mut;
use imageproc::point::Point;
use nalgebra::Vector3;

/// Which edge of the canvas an equilateral face triangle sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Base on the bottom edge, apex pointing up.
    Up,
    /// Base on the top edge, apex pointing down.
    Down,
}

impl Orientation {
    /// Returns `true` for [`Orientation::Up`].
    #[must_use]
    pub const fn is_up(self) -> bool {
        matches!(self, Self::Up)
    }
}

/// Pixel height of the triangle canvas for a given base resolution.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn triangle_height(resolution: u32) -> u32 {
    (f64::from(resolution) * 3.0_f64.sqrt() / 2.0).round() as u32
}

/// The integer pixels lying inside (boundary included) an equilateral
/// triangle of a given base resolution and orientation.
///
/// Pixels are stored in row-major scan order. Consumers treat the set as
/// unordered, but the order is stable so that up and down masks align
/// pixel-for-pixel with the color sequences sampled through them.
#[derive(Debug, Clone)]
pub struct TriangleMask {
    orientation: Orientation,
    width: u32,
    height: u32,
    pixels: Vec<(u32, u32)>,
}

impl TriangleMask {
    /// Rasterize the triangle for `(resolution, orientation)`.
    #[must_use]
    pub fn new(resolution: u32, orientation: Orientation) -> Self {
        let width = resolution;
        let height = triangle_height(resolution);
        let pixels = match resolution {
            0 => Vec::new(),
            // All three corners coincide on a 1x1 canvas, which the
            // polygon filler rejects as degenerate.
            1 => vec![(0, 0)],
            _ => fill_triangle(width, height, orientation),
        };
        Self {
            orientation,
            width,
            height,
            pixels,
        }
    }

    /// Orientation this mask was built for.
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Canvas width in pixels (the base resolution).
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// The filled pixels in row-major order.
    #[must_use]
    pub fn pixels(&self) -> &[(u32, u32)] {
        &self.pixels
    }

    /// Number of filled pixels.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Returns `true` if no pixels were filled.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// The mask pixels as homogeneous points in the local face frame:
    /// origin moved to the triangle's centroid, coordinates divided by
    /// the base resolution, and a constant third coordinate of 1.
    ///
    /// In this frame the triangle has edge length 1 and lies in the
    /// `z = 1` plane, ready to be scaled and rotated into its true
    /// position on the sphere.
    #[must_use]
    pub fn face_local_points(&self) -> Vec<Vector3<f64>> {
        let center_x = self.width / 2;
        // The centroid sits a third of the way up from the base: at
        // 2/3 height for an apex-up triangle, 1/3 for apex-down.
        let thirds = if self.orientation.is_up() { 2 } else { 1 };
        let center_y = thirds * self.height / 3;
        let scale = f64::from(self.width);

        self.pixels
            .iter()
            .map(|&(x, y)| {
                Vector3::new(
                    (f64::from(x) - f64::from(center_x)) / scale,
                    (f64::from(y) - f64::from(center_y)) / scale,
                    1.0,
                )
            })
            .collect()
    }
}

/// Fill the triangle (boundary included) into a binary canvas and collect
/// the lit pixels row-major.
#[allow(clippy::cast_possible_wrap)]
fn fill_triangle(width: u32, height: u32, orientation: Orientation) -> Vec<(u32, u32)> {
    let x = width as i32;
    let y = height as i32;
    let corners = match orientation {
        Orientation::Down => [
            Point::new(x - 1, 0),
            Point::new(0, 0),
            Point::new(x / 2, y - 1),
        ],
        Orientation::Up => [
            Point::new(0, y - 1),
            Point::new(x - 1, y - 1),
            Point::new(x / 2, 0),
        ],
    };

    let mut canvas = GrayImage::new(width, height);
    draw_polygon_mut(&mut canvas, &corners, Luma([255]));

    let mut pixels = Vec::new();
    for py in 0..height {
        for px in 0..width {
            if canvas.get_pixel(px, py)[0] != 0 {
                pixels.push((px, py));
            }
        }
    }
    pixels
}
