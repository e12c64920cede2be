//! The icosahedral sampler: projects equirectangular panoramas onto the
//! 20 faces of a unit-sphere icosahedron and unwraps them into an atlas.
//!
//! Geometry (vertices, edge length) and the two canonical triangle masks
//! are built once at construction and reused for every face and every
//! input image; per-face sample grids are recomputed on each call.

use image::{Rgb, RgbImage};
use nalgebra::{Rotation3, Vector3};

use crate::geometry::{FACE_COUNT, Icosahedron};
use crate::raster::{Orientation, TriangleMask, triangle_height};
use crate::sphere::{check_aspect_ratio, polar_to_equi, xyz_to_polar};
use crate::types::{Dimensions, UnwrapError};

/// Background color of unwritten atlas pixels.
const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// Samples equirectangular panoramas through an inscribed icosahedron.
///
/// `resolution` is the pixel length of a face's base edge. The unwrapped
/// atlas produced by [`IcoSampler::unwrap`] has shape
/// `round(5.5 * resolution) x 3 * round(resolution * sqrt(3)/2)`.
#[derive(Debug, Clone)]
pub struct IcoSampler {
    resolution: u32,
    icosahedron: Icosahedron,
    mask_up: TriangleMask,
    mask_down: TriangleMask,
}

impl IcoSampler {
    /// Create a sampler for the given face base-edge resolution.
    ///
    /// # Errors
    ///
    /// Returns [`UnwrapError::ZeroResolution`] if `resolution` is 0.
    pub fn new(resolution: u32) -> Result<Self, UnwrapError> {
        if resolution == 0 {
            return Err(UnwrapError::ZeroResolution);
        }
        Ok(Self {
            resolution,
            icosahedron: Icosahedron::unit(),
            mask_up: TriangleMask::new(resolution, Orientation::Up),
            mask_down: TriangleMask::new(resolution, Orientation::Down),
        })
    }

    /// The face base-edge resolution in pixels.
    #[must_use]
    pub const fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Edge length of the inscribed icosahedron.
    #[must_use]
    pub const fn edge_length(&self) -> f64 {
        self.icosahedron.edge_length()
    }

    const fn mask(&self, orientation: Orientation) -> &TriangleMask {
        match orientation {
            Orientation::Up => &self.mask_up,
            Orientation::Down => &self.mask_down,
        }
    }

    /// Orientation of a face, read off the pole-axis coordinate of its
    /// first two vertices. This agrees with the band arithmetic used for
    /// atlas placement only because of the fixed vertex ordering in the
    /// face table; neither derivation may be swapped for the other.
    fn face_orientation(&self, face_no: usize) -> Orientation {
        let [a, b, _] = self.icosahedron.face_vertices(face_no);
        if a.y < b.y {
            Orientation::Up
        } else {
            Orientation::Down
        }
    }

    /// 3D world-space position of every sample pixel of face `face_no`.
    ///
    /// The canonical flat triangle is scaled to the icosahedron's edge
    /// length, pushed out to the face plane's distance from the sphere
    /// center, and rotated so its centroid lands on the face's true
    /// position on the sphere.
    ///
    /// # Panics
    ///
    /// Panics if `face_no >= 20`.
    #[must_use]
    pub fn face_xyz(&self, face_no: usize) -> Vec<Vector3<f64>> {
        let [a, b, c] = self.icosahedron.face_vertices(face_no);
        let centroid = (a + b + c) / 3.0;
        // Distance from the sphere center to the flat face, not 1: the
        // face plane sits inside the sphere.
        let depth = centroid.norm();
        let center = centroid / depth;

        let edge = self.icosahedron.edge_length();
        let (phi, theta) = xyz_to_polar(center);
        let rotation = Rotation3::from_euler_angles(-theta, phi, 0.0);

        self.mask(self.face_orientation(face_no))
            .face_local_points()
            .into_iter()
            .map(|p| rotation * Vector3::new(p.x * edge, p.y * edge, p.z * depth))
            .collect()
    }

    /// Colors of face `face_no` sampled nearest-neighbor from an
    /// equirectangular panorama, in mask pixel order.
    ///
    /// Each sample position is treated as a ray from the sphere center
    /// and looked up in the panorama at the nearest pixel. Indices that
    /// fall outside the buffer wrap horizontally (longitude is circular)
    /// and clamp vertically (latitude ends at the poles).
    ///
    /// # Errors
    ///
    /// Returns [`UnwrapError::AspectRatio`] unless the panorama is 2:1.
    ///
    /// # Panics
    ///
    /// Panics if `face_no >= 20`.
    pub fn face_rgb(&self, face_no: usize, eq_image: &RgbImage) -> Result<Vec<Rgb<u8>>, UnwrapError> {
        let dims = Dimensions::of_image(eq_image);
        check_aspect_ratio(dims)?;

        self.face_xyz(face_no)
            .into_iter()
            .map(|p| {
                let ray = p.normalize();
                let (phi, theta) = xyz_to_polar(ray);
                let (x, y) = polar_to_equi(phi, theta, dims)?;
                let (px, py) = nearest_pixel(x, y, dims);
                Ok(*eq_image.get_pixel(px, py))
            })
            .collect()
    }

    /// Reconstruct face `face_no` as a standalone triangle image.
    ///
    /// The sampled colors are scattered back onto the raw mask pixels of
    /// a `resolution x round(resolution * sqrt(3)/2)` canvas; pixels
    /// outside the triangle stay black.
    ///
    /// # Errors
    ///
    /// Returns [`UnwrapError::AspectRatio`] unless the panorama is 2:1.
    ///
    /// # Panics
    ///
    /// Panics if `face_no >= 20`.
    pub fn face_image(&self, face_no: usize, eq_image: &RgbImage) -> Result<RgbImage, UnwrapError> {
        let colors = self.face_rgb(face_no, eq_image)?;
        let mask = self.mask(self.face_orientation(face_no));

        let mut canvas = RgbImage::new(self.resolution, triangle_height(self.resolution));
        scatter(&mut canvas, mask, &colors, 0, 0);
        Ok(canvas)
    }

    /// Project a panorama onto the icosahedron and unwrap all 20 faces
    /// into a flat atlas.
    ///
    /// The atlas is the standard icosahedral net: the top band of five
    /// apex-up faces, the middle ten faces interleaved into one zigzag
    /// strip, and the bottom band of five apex-down faces. `face_offset`
    /// rotates which of the five longitudinal positions each band member
    /// lands in, choosing the meridian at the atlas's left edge.
    ///
    /// # Errors
    ///
    /// Returns [`UnwrapError::AspectRatio`] unless the panorama is 2:1,
    /// or [`UnwrapError::FaceOffsetOutOfRange`] if `face_offset` is
    /// outside `[-2, 2]`.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        clippy::cast_sign_loss
    )]
    pub fn unwrap(&self, eq_image: &RgbImage, face_offset: i32) -> Result<RgbImage, UnwrapError> {
        check_aspect_ratio(Dimensions::of_image(eq_image))?;
        if !(-2..=2).contains(&face_offset) {
            return Err(UnwrapError::FaceOffsetOutOfRange(face_offset));
        }

        let colors: Vec<Vec<Rgb<u8>>> = (0..FACE_COUNT)
            .map(|face_no| self.face_rgb(face_no, eq_image))
            .collect::<Result<_, _>>()?;

        let resolution = f64::from(self.resolution);
        let h_res = triangle_height(self.resolution);
        let atlas_width = (5.5 * resolution).round() as u32;
        let mut canvas = RgbImage::from_pixel(atlas_width, 3 * h_res, BACKGROUND);

        for num in 0..5 {
            let loc = (face_offset + 2 + num as i32).rem_euclid(5) as u32;
            // Bands 1-2 start half a face in; bands 3-4 sit on the column
            // grid. Bands 2 and 3 share rows, interleaving into the
            // equatorial zigzag strip.
            let x_half = ((f64::from(loc) + 0.5) * resolution).round() as u32;
            let x_grid = loc * self.resolution;

            scatter(&mut canvas, &self.mask_up, &colors[num], x_half, 0);
            scatter(&mut canvas, &self.mask_down, &colors[5 + num], x_half, h_res);
            scatter(&mut canvas, &self.mask_up, &colors[10 + num], x_grid, h_res);
            scatter(&mut canvas, &self.mask_down, &colors[15 + num], x_grid, 2 * h_res);
        }

        Ok(canvas)
    }
}

/// Truncate fractional panorama coordinates to pixel indices, wrapping
/// the longitude axis and clamping the latitude axis.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn nearest_pixel(x: f64, y: f64, dims: Dimensions) -> (u32, u32) {
    let px = (x as i64).rem_euclid(i64::from(dims.width));
    let py = (y as i64).clamp(0, i64::from(dims.height) - 1);
    (px as u32, py as u32)
}

/// Write a face's colors through its mask at an atlas offset.
///
/// Masks of neighboring faces cover disjoint pixel sets, so scatter order
/// does not matter.
fn scatter(canvas: &mut RgbImage, mask: &TriangleMask, colors: &[Rgb<u8>], x0: u32, y0: u32) {
    for (&(x, y), color) in mask.pixels().iter().zip(colors) {
        canvas.put_pixel(x0 + x, y0 + y, *color);
    }
}
