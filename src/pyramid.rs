//! Pyramid mesh construction.
//!
//! Builds the four-sided pyramid (a cone approximated with four radial
//! segments) that the net/quadrant UV remapping operates on.
//!
//! # Vertex ordering contract
//!
//! The remapping in [`crate::netmap`] depends on the exact emission order of
//! this builder, so that order is part of the public contract rather than an
//! implementation detail:
//!
//! - Lateral face `f` (0..4) covers the angular sector `[f·90°, (f+1)·90°)`
//!   around the vertical axis, with base vertex `i` at angle `i·90°`
//!   measured as `(r·sin θ, −h/2, r·cos θ)`.
//! - Each lateral face's vertex slots are `[apex, base_a, base_b]`, where
//!   `base_a` sits at the sector's start angle and `base_b` at its end.
//!
//! Tests below verify both properties from vertex positions instead of
//! assuming them from array offsets.

use std::f64::consts::FRAC_PI_2;

use nalgebra::{Point2, Point3};

use crate::error::{PyramidError, Result};
use crate::mesh::{Face, FaceKind, TexturedMesh, Vertex};

/// Number of lateral faces in the pyramid.
pub const LATERAL_FACES: usize = 4;

/// Build a four-sided pyramid with the given base radius and height.
///
/// The solid is centered on the origin: apex at `(0, height/2, 0)`, base
/// ring at `y = −height/2`, base center at `(0, −height/2, 0)`. It is
/// triangulated into 4 lateral faces and 4 base faces.
///
/// Default UVs assign each lateral face the whole `[0,1]²` image square
/// independently; they are meant to be overwritten by
/// [`crate::netmap::remap_to_net`] before the mesh is textured.
///
/// # Errors
///
/// Returns [`PyramidError::InvalidParameter`] if `base_radius` or `height`
/// is not a finite positive number.
pub fn pyramid(base_radius: f64, height: f64) -> Result<TexturedMesh> {
    if !base_radius.is_finite() || base_radius <= 0.0 {
        return Err(PyramidError::invalid_param(
            "base_radius",
            base_radius,
            "must be a positive finite number",
        ));
    }
    if !height.is_finite() || height <= 0.0 {
        return Err(PyramidError::invalid_param(
            "height",
            height,
            "must be a positive finite number",
        ));
    }

    let half_h = height / 2.0;
    let apex = Point3::new(0.0, half_h, 0.0);
    let base_center = Point3::new(0.0, -half_h, 0.0);

    // Base ring vertex i at angle i * 90 degrees.
    let ring: Vec<Point3<f64>> = (0..LATERAL_FACES)
        .map(|i| {
            let theta = i as f64 * FRAC_PI_2;
            Point3::new(base_radius * theta.sin(), -half_h, base_radius * theta.cos())
        })
        .collect();

    let mut faces = Vec::with_capacity(LATERAL_FACES * 2);

    // Lateral faces: [apex, base_a, base_b], outward winding.
    for f in 0..LATERAL_FACES {
        let a = ring[f];
        let b = ring[(f + 1) % LATERAL_FACES];
        faces.push(Face::new(
            [
                Vertex::new(apex, Point2::new(0.5, 1.0)),
                Vertex::new(a, Point2::new(0.0, 0.0)),
                Vertex::new(b, Point2::new(1.0, 0.0)),
            ],
            FaceKind::Lateral,
        ));
    }

    // Base fan around the base center, wound to face downward. UVs are a
    // planar map of the ring; the base is not rendered in normal use.
    for f in 0..LATERAL_FACES {
        let a = ring[f];
        let b = ring[(f + 1) % LATERAL_FACES];
        faces.push(Face::new(
            [
                Vertex::new(base_center, Point2::new(0.5, 0.5)),
                Vertex::new(b, planar_uv(b, base_radius)),
                Vertex::new(a, planar_uv(a, base_radius)),
            ],
            FaceKind::Base,
        ));
    }

    Ok(TexturedMesh::from_faces(faces))
}

/// Map a base-ring position into [0,1]² by projecting onto the base plane.
fn planar_uv(p: Point3<f64>, base_radius: f64) -> Point2<f64> {
    Point2::new(
        0.5 + p.x / (2.0 * base_radius),
        0.5 + p.z / (2.0 * base_radius),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pyramid_face_counts() {
        let mesh = pyramid(2.0, 3.0).unwrap();

        assert_eq!(mesh.num_faces(), 8);
        assert_eq!(mesh.num_lateral_faces(), 4);
    }

    #[test]
    fn test_rejects_nonpositive_parameters() {
        assert!(matches!(
            pyramid(0.0, 3.0),
            Err(PyramidError::InvalidParameter { name: "base_radius", .. })
        ));
        assert!(matches!(
            pyramid(2.0, 0.0),
            Err(PyramidError::InvalidParameter { name: "height", .. })
        ));
        assert!(pyramid(-1.0, 3.0).is_err());
        assert!(pyramid(2.0, -0.5).is_err());
    }

    #[test]
    fn test_rejects_nonfinite_parameters() {
        assert!(pyramid(f64::NAN, 3.0).is_err());
        assert!(pyramid(2.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_no_nan_geometry() {
        let mesh = pyramid(2.0, 3.0).unwrap();
        for face in mesh.faces() {
            for vert in &face.vertices {
                assert!(vert.position.coords.iter().all(|c| c.is_finite()));
                assert!(vert.uv.coords.iter().all(|c| c.is_finite()));
            }
        }
    }

    #[test]
    fn test_apex_slot_contract() {
        // Slot 0 of every lateral face must be the shared apex, verified
        // from positions rather than assumed.
        let mesh = pyramid(2.0, 3.0).unwrap();
        let apex = mesh.apex_position().expect("lateral faces share an apex");

        assert!((apex - Point3::new(0.0, 1.5, 0.0)).norm() < 1e-12);
        for face in mesh.lateral_faces() {
            assert!((face.vertices[0].position - apex).norm() < 1e-12);
        }
    }

    #[test]
    fn test_angular_order_contract() {
        // base_a of face f sits at angle f * 90 degrees, base_b at the
        // next multiple, with x = r sin(theta) and z = r cos(theta).
        let r = 2.0;
        let mesh = pyramid(r, 3.0).unwrap();

        for (f, face) in mesh.lateral_faces().enumerate() {
            let theta_a = f as f64 * FRAC_PI_2;
            let theta_b = (f + 1) as f64 * FRAC_PI_2;
            let a = face.vertices[1].position;
            let b = face.vertices[2].position;

            assert!((a.x - r * theta_a.sin()).abs() < 1e-12, "face {f} base_a.x");
            assert!((a.z - r * theta_a.cos()).abs() < 1e-12, "face {f} base_a.z");
            assert!((b.x - r * theta_b.sin()).abs() < 1e-12, "face {f} base_b.x");
            assert!((b.z - r * theta_b.cos()).abs() < 1e-12, "face {f} base_b.z");
        }
    }

    #[test]
    fn test_consecutive_faces_share_base_vertices() {
        let mesh = pyramid(2.0, 3.0).unwrap();
        let lateral: Vec<_> = mesh.lateral_faces().collect();

        for f in 0..lateral.len() {
            let b = lateral[f].vertices[2].position;
            let next_a = lateral[(f + 1) % lateral.len()].vertices[1].position;
            assert!((b - next_a).norm() < 1e-12, "faces {f} and next share an edge");
        }
    }

    #[test]
    fn test_default_uvs_span_unit_square_per_face() {
        let mesh = pyramid(2.0, 3.0).unwrap();
        for face in mesh.lateral_faces() {
            assert_eq!(face.vertices[0].uv, Point2::new(0.5, 1.0));
            assert_eq!(face.vertices[1].uv, Point2::new(0.0, 0.0));
            assert_eq!(face.vertices[2].uv, Point2::new(1.0, 0.0));
        }
    }
}
