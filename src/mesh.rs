//! Core mesh data structures.
//!
//! This module provides a minimal face-vertex triangle mesh with per-vertex
//! texture coordinates. Unlike an indexed or half-edge representation, every
//! face owns its three vertex records outright, so two faces meeting at the
//! same 3D position can carry different UVs there. The net/quadrant remapping
//! in [`crate::netmap`] depends on exactly that: the apex is one geometric
//! point but each lateral face pins its own copy to the image center.
//!
//! # Face kinds
//!
//! Faces are tagged [`FaceKind::Lateral`] (the slanted, textured sides) or
//! [`FaceKind::Base`] (the bottom triangulation, never remapped). Lateral
//! faces are stored in angular order around the apex; see
//! [`crate::pyramid::pyramid`] for the exact ordering contract.

use nalgebra::{Point2, Point3};

/// A single face-vertex record: a 3D position plus a 2D texture coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position in model space.
    pub position: Point3<f64>,
    /// Texture coordinate, nominally in [0, 1]².
    pub uv: Point2<f64>,
}

impl Vertex {
    /// Create a vertex from a position and a UV coordinate.
    pub fn new(position: Point3<f64>, uv: Point2<f64>) -> Self {
        Self { position, uv }
    }
}

/// Classification of a face within the pyramid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceKind {
    /// One of the slanted triangular sides sharing the apex.
    Lateral,
    /// Part of the base triangulation (not texture-mapped).
    Base,
}

/// A triangular face: three vertex records plus a kind tag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// The three vertex records, in winding order.
    ///
    /// For lateral faces the slot order is `[apex, base_a, base_b]`.
    pub vertices: [Vertex; 3],
    /// Whether this face is a lateral side or part of the base.
    pub kind: FaceKind,
}

impl Face {
    /// Create a face from three vertices and a kind.
    pub fn new(vertices: [Vertex; 3], kind: FaceKind) -> Self {
        Self { vertices, kind }
    }
}

/// An ordered sequence of triangular faces with per-vertex UVs.
///
/// The mesh tracks a UV-dirty flag so the render side knows when the UV
/// buffer must be re-uploaded to the GPU after a remap.
#[derive(Debug, Clone)]
pub struct TexturedMesh {
    faces: Vec<Face>,
    uv_dirty: bool,
}

impl TexturedMesh {
    /// Create a mesh from a list of faces.
    ///
    /// The UV-dirty flag starts set: a freshly built mesh has never had its
    /// UVs uploaded.
    pub fn from_faces(faces: Vec<Face>) -> Self {
        Self {
            faces,
            uv_dirty: true,
        }
    }

    /// All faces, in storage order.
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Mutable access to all faces.
    pub fn faces_mut(&mut self) -> &mut [Face] {
        &mut self.faces
    }

    /// Iterate over the lateral faces in angular order.
    pub fn lateral_faces(&self) -> impl Iterator<Item = &Face> {
        self.faces.iter().filter(|f| f.kind == FaceKind::Lateral)
    }

    /// Iterate mutably over the lateral faces in angular order.
    pub fn lateral_faces_mut(&mut self) -> impl Iterator<Item = &mut Face> {
        self.faces
            .iter_mut()
            .filter(|f| f.kind == FaceKind::Lateral)
    }

    /// Number of lateral faces.
    pub fn num_lateral_faces(&self) -> usize {
        self.lateral_faces().count()
    }

    /// Total number of faces.
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Whether the UV coordinates have changed since the last upload.
    pub fn uv_dirty(&self) -> bool {
        self.uv_dirty
    }

    /// Mark the UV buffer as needing re-upload.
    pub fn mark_uv_dirty(&mut self) {
        self.uv_dirty = true;
    }

    /// Clear the UV-dirty flag after the buffer has been uploaded.
    pub fn clear_uv_dirty(&mut self) {
        self.uv_dirty = false;
    }

    /// Find the apex: the unique position shared by all lateral faces.
    ///
    /// Checks slot 0 of every lateral face against the first one (the
    /// builder's documented slot contract). Returns `None` if the mesh has
    /// no lateral faces or the slots disagree.
    pub fn apex_position(&self) -> Option<Point3<f64>> {
        let mut lateral = self.lateral_faces();
        let apex = lateral.next()?.vertices[0].position;
        for face in lateral {
            let p = face.vertices[0].position;
            if (p - apex).norm() > 1e-12 {
                return None;
            }
        }
        Some(apex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f64, y: f64, z: f64) -> Vertex {
        Vertex::new(Point3::new(x, y, z), Point2::new(0.0, 0.0))
    }

    fn lateral(apex: Vertex, a: Vertex, b: Vertex) -> Face {
        Face::new([apex, a, b], FaceKind::Lateral)
    }

    #[test]
    fn test_face_kind_filtering() {
        let apex = v(0.0, 1.0, 0.0);
        let mesh = TexturedMesh::from_faces(vec![
            lateral(apex, v(1.0, 0.0, 0.0), v(0.0, 0.0, 1.0)),
            Face::new([v(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0), v(0.0, 0.0, 1.0)], FaceKind::Base),
            lateral(apex, v(0.0, 0.0, 1.0), v(-1.0, 0.0, 0.0)),
        ]);

        assert_eq!(mesh.num_faces(), 3);
        assert_eq!(mesh.num_lateral_faces(), 2);
    }

    #[test]
    fn test_uv_dirty_lifecycle() {
        let mut mesh = TexturedMesh::from_faces(vec![]);
        // Fresh meshes have never been uploaded
        assert!(mesh.uv_dirty());

        mesh.clear_uv_dirty();
        assert!(!mesh.uv_dirty());

        mesh.mark_uv_dirty();
        assert!(mesh.uv_dirty());
    }

    #[test]
    fn test_apex_position_shared() {
        let apex = v(0.0, 2.0, 0.0);
        let mesh = TexturedMesh::from_faces(vec![
            lateral(apex, v(1.0, 0.0, 0.0), v(0.0, 0.0, 1.0)),
            lateral(apex, v(0.0, 0.0, 1.0), v(-1.0, 0.0, 0.0)),
        ]);

        assert_eq!(mesh.apex_position(), Some(Point3::new(0.0, 2.0, 0.0)));
    }

    #[test]
    fn test_apex_position_disagreement() {
        let mesh = TexturedMesh::from_faces(vec![
            lateral(v(0.0, 2.0, 0.0), v(1.0, 0.0, 0.0), v(0.0, 0.0, 1.0)),
            lateral(v(0.0, 3.0, 0.0), v(0.0, 0.0, 1.0), v(-1.0, 0.0, 0.0)),
        ]);

        assert_eq!(mesh.apex_position(), None);
    }

    #[test]
    fn test_apex_position_empty() {
        let mesh = TexturedMesh::from_faces(vec![]);
        assert_eq!(mesh.apex_position(), None);
    }
}
