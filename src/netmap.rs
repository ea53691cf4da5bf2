//! Net/quadrant UV remapping.
//!
//! A freshly built pyramid textures each lateral face with the whole image,
//! so all four sides show the same picture: visually incoherent when more
//! than one side is in view. This module rewrites the lateral UVs into a
//! "net" layout instead: the image is treated as a unit square sliced into
//! four triangular quadrants meeting at the center, one per face, in the
//! same angular order as the faces themselves.
//!
//! Every face's apex is pinned to the image center `(0.5, 0.5)`, and its two
//! base vertices to consecutive edge midpoints of the square. Laid flat
//! edge-to-edge, the four triangles cover the image exactly once as a
//! pinwheel, so adjacent 3D faces share a boundary line through the image
//! center and the wrap reads as one continuous picture across the pyramid's
//! vertical edges.
//!
//! ```text
//!        (0.5, 0)
//!        /  |  \
//!    f0 /   |   \ f1
//!      /    |    \
//! (0, 0.5)--+--(1, 0.5)
//!      \    |    /
//!    f3 \   |   / f2
//!        \  |  /
//!        (0.5, 1)
//! ```
//!
//! The quadrant table below assumes the builder's documented vertex
//! ordering ([`crate::pyramid`]): face `f` covers the sector starting at
//! `f·90°`, with slots `[apex, base_a, base_b]`. A generator emitting
//! lateral faces in a different order would need a permuted table.

use nalgebra::Point2;

use crate::error::{PyramidError, Result};
use crate::mesh::TexturedMesh;
use crate::pyramid::LATERAL_FACES;

/// Where every lateral face's apex lands: the image center.
const UV_CENTER: [f64; 2] = [0.5, 0.5];

/// Quadrant corners `[base_a, base_b]` per face, as `(u, v)` pairs on the
/// unit square's boundary. Consecutive faces share a corner, which is what
/// makes the wrap continuous across the pyramid's vertical edges.
const QUADRANT_CORNERS: [[[f64; 2]; 2]; LATERAL_FACES] = [
    [[0.0, 0.5], [0.5, 0.0]], // left-mid to top-mid
    [[0.5, 0.0], [1.0, 0.5]], // top-mid to right-mid
    [[1.0, 0.5], [0.5, 1.0]], // right-mid to bottom-mid
    [[0.5, 1.0], [0.0, 0.5]], // bottom-mid to left-mid
];

/// Overwrite the mesh's lateral-face UVs with the net/quadrant layout.
///
/// Mutates the mesh in place and marks its UV buffer dirty so the render
/// side re-uploads it. Base faces are left untouched. Assigning fixed
/// constants makes the operation idempotent.
///
/// # Errors
///
/// Returns [`PyramidError::UnsupportedTopology`] if the mesh does not have
/// exactly four lateral faces; the quadrant table is only valid for the
/// four-sided pyramid.
pub fn remap_to_net(mesh: &mut TexturedMesh) -> Result<()> {
    let lateral_faces = mesh.num_lateral_faces();
    if lateral_faces != LATERAL_FACES {
        return Err(PyramidError::UnsupportedTopology { lateral_faces });
    }

    for (f, face) in mesh.lateral_faces_mut().enumerate() {
        let [a, b] = QUADRANT_CORNERS[f];
        face.vertices[0].uv = Point2::new(UV_CENTER[0], UV_CENTER[1]);
        face.vertices[1].uv = Point2::new(a[0], a[1]);
        face.vertices[2].uv = Point2::new(b[0], b[1]);
    }

    mesh.mark_uv_dirty();
    log::debug!("remapped {lateral_faces} lateral faces to net layout");
    Ok(())
}

#[cfg(test)]
mod tests {
    use nalgebra::{Point2, Point3};

    use super::*;
    use crate::mesh::{Face, FaceKind, TexturedMesh, Vertex};
    use crate::pyramid::pyramid;

    fn pyramid_mesh() -> TexturedMesh {
        pyramid(2.0, 3.0).unwrap()
    }

    #[test]
    fn test_apex_maps_to_image_center() {
        let mut mesh = pyramid_mesh();
        remap_to_net(&mut mesh).unwrap();

        for face in mesh.lateral_faces() {
            assert_eq!(face.vertices[0].uv, Point2::new(0.5, 0.5));
        }
    }

    #[test]
    fn test_base_corners_match_quadrant_table() {
        let mut mesh = pyramid_mesh();
        remap_to_net(&mut mesh).unwrap();

        let expected = [
            [(0.0, 0.5), (0.5, 0.0)],
            [(0.5, 0.0), (1.0, 0.5)],
            [(1.0, 0.5), (0.5, 1.0)],
            [(0.5, 1.0), (0.0, 0.5)],
        ];

        for (f, face) in mesh.lateral_faces().enumerate() {
            let (au, av) = expected[f][0];
            let (bu, bv) = expected[f][1];
            assert_eq!(face.vertices[1].uv, Point2::new(au, av), "face {f} base_a");
            assert_eq!(face.vertices[2].uv, Point2::new(bu, bv), "face {f} base_b");
        }
    }

    #[test]
    fn test_adjacent_faces_share_a_corner() {
        let mut mesh = pyramid_mesh();
        remap_to_net(&mut mesh).unwrap();

        let lateral: Vec<_> = mesh.lateral_faces().collect();
        for f in 0..lateral.len() {
            let b = lateral[f].vertices[2].uv;
            let next_a = lateral[(f + 1) % lateral.len()].vertices[1].uv;
            assert_eq!(b, next_a, "faces {f} and next meet at a shared corner");
        }
    }

    #[test]
    fn test_remap_is_idempotent() {
        let mut once = pyramid_mesh();
        remap_to_net(&mut once).unwrap();

        let mut twice = once.clone();
        remap_to_net(&mut twice).unwrap();

        for (a, b) in once.faces().iter().zip(twice.faces().iter()) {
            for (va, vb) in a.vertices.iter().zip(b.vertices.iter()) {
                assert_eq!(va.uv, vb.uv);
            }
        }
    }

    #[test]
    fn test_base_faces_untouched() {
        let mut mesh = pyramid_mesh();
        let before: Vec<_> = mesh
            .faces()
            .iter()
            .filter(|f| f.kind == FaceKind::Base)
            .cloned()
            .collect();

        remap_to_net(&mut mesh).unwrap();

        let after: Vec<_> = mesh
            .faces()
            .iter()
            .filter(|f| f.kind == FaceKind::Base)
            .cloned()
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_marks_uv_dirty() {
        let mut mesh = pyramid_mesh();
        mesh.clear_uv_dirty();

        remap_to_net(&mut mesh).unwrap();
        assert!(mesh.uv_dirty());
    }

    #[test]
    fn test_rejects_wrong_lateral_count() {
        // A three-sided pyramid: the quadrant table does not apply.
        let apex = Vertex::new(Point3::new(0.0, 1.0, 0.0), Point2::new(0.5, 1.0));
        let ring: Vec<_> = (0..3)
            .map(|i| {
                let theta = i as f64 * std::f64::consts::TAU / 3.0;
                Vertex::new(
                    Point3::new(theta.sin(), 0.0, theta.cos()),
                    Point2::new(0.0, 0.0),
                )
            })
            .collect();
        let faces = (0..3)
            .map(|f| Face::new([apex, ring[f], ring[(f + 1) % 3]], FaceKind::Lateral))
            .collect();
        let mut mesh = TexturedMesh::from_faces(faces);

        match remap_to_net(&mut mesh) {
            Err(PyramidError::UnsupportedTopology { lateral_faces }) => {
                assert_eq!(lateral_faces, 3);
            }
            other => panic!("expected UnsupportedTopology, got {other:?}"),
        }
    }

    #[test]
    fn test_failed_remap_leaves_uvs_unchanged() {
        let apex = Vertex::new(Point3::new(0.0, 1.0, 0.0), Point2::new(0.5, 1.0));
        let a = Vertex::new(Point3::new(1.0, 0.0, 0.0), Point2::new(0.0, 0.0));
        let b = Vertex::new(Point3::new(0.0, 0.0, 1.0), Point2::new(1.0, 0.0));
        let mut mesh =
            TexturedMesh::from_faces(vec![Face::new([apex, a, b], FaceKind::Lateral)]);
        mesh.clear_uv_dirty();

        assert!(remap_to_net(&mut mesh).is_err());
        assert_eq!(mesh.faces()[0].vertices[0].uv, Point2::new(0.5, 1.0));
        assert!(!mesh.uv_dirty());
    }
}
