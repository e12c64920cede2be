//! Regular icosahedron inscribed in a sphere, aligned so that the north
//! and south poles are vertices.
//!
//! Vertex 0 is the north pole `(0, -1, 0)` (negative y is "up" in image
//! space, see [`crate::sphere`]), vertex 11 is the south pole, and the
//! remaining ten vertices form two latitude rings at `+-atan(1/2)` whose
//! longitudes are interleaved by 36 degrees. This is the unique
//! vertex-transitive placement with both poles on vertices, and it is the
//! placement the fixed face table below is written against.

use nalgebra::{Rotation3, Vector3};

/// Number of vertices of the icosahedron.
pub const VERTEX_COUNT: usize = 12;

/// Number of triangular faces of the icosahedron.
pub const FACE_COUNT: usize = 20;

/// Vertex indices of the 20 faces, in 4 bands of 5.
///
/// The band a face belongs to fixes both its 3D orientation and its row in
/// the unwrapped atlas: top band apex-up around the north pole, second
/// band apex-down, third band apex-up (the two middle bands interleave
/// into the equatorial zigzag), bottom band apex-down around the south
/// pole. The ordering of indices within each triple is deliberate: the
/// orientation test in the sampler compares the first two vertices.
#[rustfmt::skip]
pub const FACES: [[usize; 3]; FACE_COUNT] = [
    [ 0,  1,  2], [ 0,  2,  3], [ 0,  3,  4], [ 0,  4,  5], [ 0,  5,  1],
    [ 6,  1,  2], [ 7,  2,  3], [ 8,  3,  4], [ 9,  4,  5], [10,  5,  1],
    [ 1, 10,  6], [ 2,  6,  7], [ 3,  7,  8], [ 4,  8,  9], [ 5,  9, 10],
    [11, 10,  6], [11,  6,  7], [11,  7,  8], [11,  8,  9], [11,  9, 10],
];

/// A regular icosahedron inscribed in a sphere of a given radius.
#[derive(Debug, Clone)]
pub struct Icosahedron {
    vertices: [Vector3<f64>; VERTEX_COUNT],
    edge_length: f64,
}

impl Icosahedron {
    /// Build the icosahedron inscribed in a sphere of radius `radius`.
    #[must_use]
    pub fn new(radius: f64) -> Self {
        let vertices = build_vertices(radius);
        // All edges of a regular icosahedron are equal; vertices 0 and 1
        // share one, so its length serves as the global scale factor.
        let edge_length = (vertices[0] - vertices[1]).norm();
        Self {
            vertices,
            edge_length,
        }
    }

    /// The icosahedron inscribed in the unit sphere.
    #[must_use]
    pub fn unit() -> Self {
        Self::new(1.0)
    }

    /// All 12 vertex positions.
    #[must_use]
    pub const fn vertices(&self) -> &[Vector3<f64>; VERTEX_COUNT] {
        &self.vertices
    }

    /// Edge length shared by all 30 edges.
    #[must_use]
    pub const fn edge_length(&self) -> f64 {
        self.edge_length
    }

    /// The three vertex positions of face `face_no`, in face-table order.
    ///
    /// # Panics
    ///
    /// Panics if `face_no >= FACE_COUNT`.
    #[must_use]
    pub fn face_vertices(&self, face_no: usize) -> [Vector3<f64>; 3] {
        FACES[face_no].map(|i| self.vertices[i])
    }
}

impl Default for Icosahedron {
    fn default() -> Self {
        Self::unit()
    }
}

/// Place the 12 vertices: poles first and last, then the two latitude
/// rings rotated out of the reference axis `(0, 0, 1)`.
fn build_vertices(radius: f64) -> [Vector3<f64>; VERTEX_COUNT] {
    // Latitude of the two rings and longitude step between columns.
    let ring_latitude = 0.5_f64.atan();
    let step = 36.0_f64.to_radians();

    let mut vertices = [Vector3::zeros(); VERTEX_COUNT];
    vertices[0] = Vector3::new(0.0, -1.0, 0.0);
    for i in 0..10 {
        // Ring 0 (northern) sits at even longitude columns, ring 1
        // (southern) at odd ones, giving the 36 degree interleave.
        let ring = i / 5;
        #[allow(clippy::cast_precision_loss)]
        let offset = (2 * (i % 5) + ring) as f64;
        let sign = if ring == 0 { 1.0 } else { -1.0 };
        let rotation = Rotation3::from_euler_angles(sign * ring_latitude, offset * step, 0.0);
        vertices[i + 1] = rotation * Vector3::z();
    }
    vertices[11] = Vector3::new(0.0, 1.0, 0.0);

    for v in &mut vertices {
        *v = v.normalize() * radius;
    }
    vertices
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    /// Every undirected edge appearing in the face table.
    fn edges() -> Vec<(usize, usize)> {
        let mut edges = Vec::new();
        for face in &FACES {
            for (a, b) in [(face[0], face[1]), (face[1], face[2]), (face[2], face[0])] {
                let edge = (a.min(b), a.max(b));
                if !edges.contains(&edge) {
                    edges.push(edge);
                }
            }
        }
        edges
    }

    #[test]
    fn vertices_lie_on_the_sphere() {
        for radius in [1.0, 0.5, 7.25] {
            let ico = Icosahedron::new(radius);
            for v in ico.vertices() {
                assert_relative_eq!(v.norm(), radius, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn scaling_preserves_direction() {
        let unit = Icosahedron::unit();
        let scaled = Icosahedron::new(3.0);
        for (u, s) in unit.vertices().iter().zip(scaled.vertices()) {
            assert_relative_eq!(u * 3.0, *s, epsilon = 1e-12);
        }
    }

    #[test]
    fn poles_are_vertices() {
        let ico = Icosahedron::unit();
        assert_relative_eq!(ico.vertices()[0], Vector3::new(0.0, -1.0, 0.0));
        assert_relative_eq!(ico.vertices()[11], Vector3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn rings_sit_at_expected_latitude() {
        let ico = Icosahedron::unit();
        let lat = 0.5_f64.atan().sin();
        for i in 1..=5 {
            assert_relative_eq!(ico.vertices()[i].y, -lat, epsilon = 1e-12);
        }
        for i in 6..=10 {
            assert_relative_eq!(ico.vertices()[i].y, lat, epsilon = 1e-12);
        }
    }

    #[test]
    fn face_table_covers_exactly_30_edges() {
        assert_eq!(edges().len(), 30);
    }

    #[test]
    fn all_edges_have_equal_length() {
        let ico = Icosahedron::unit();
        for (a, b) in edges() {
            let length = (ico.vertices()[a] - ico.vertices()[b]).norm();
            assert_relative_eq!(length, ico.edge_length(), epsilon = 1e-12);
        }
    }

    #[test]
    fn edge_length_matches_closed_form() {
        // Circumradius-1 icosahedron: edge = 4 / sqrt(10 + 2*sqrt(5)).
        let expected = 4.0 / (10.0 + 2.0 * 5.0_f64.sqrt()).sqrt();
        assert_relative_eq!(Icosahedron::unit().edge_length(), expected, epsilon = 1e-12);
    }

    #[test]
    fn face_vertices_match_table() {
        let ico = Icosahedron::unit();
        let [a, b, c] = ico.face_vertices(7);
        assert_relative_eq!(a, ico.vertices()[8]);
        assert_relative_eq!(b, ico.vertices()[3]);
        assert_relative_eq!(c, ico.vertices()[4]);
    }
}
