//! # Apexwrap
//!
//! Wrap a photo seamlessly onto the four triangular sides of a pyramid.
//!
//! A four-sided pyramid textured naively shows four disjoint copies of the
//! same image, one per face. Apexwrap instead remaps the lateral texture
//! coordinates into a "net" layout: every face's apex samples the image
//! center and each face's base edge samples one quadrant of the image
//! boundary, so the four faces form one continuous unwrapped picture around
//! the apex.
//!
//! The library provides the mesh data model, the pyramid builder, the
//! net/quadrant UV remapper, the redraw-request policy, and the
//! upload-generation tracker. The interactive wgpu viewer that puts them
//! together lives in the `apexwrap-view` binary.
//!
//! ## Quick Start
//!
//! ```
//! use apexwrap::prelude::*;
//!
//! // Build the pyramid and remap its UVs to the net layout
//! let mut mesh = pyramid(2.0, 3.0).unwrap();
//! remap_to_net(&mut mesh).unwrap();
//!
//! // Every lateral face now pivots around the image center
//! for face in mesh.lateral_faces() {
//!     assert_eq!(face.vertices[0].uv.x, 0.5);
//!     assert_eq!(face.vertices[0].uv.y, 0.5);
//! }
//! ```
//!
//! ## Driving a renderer
//!
//! ```
//! use apexwrap::prelude::*;
//!
//! let mut policy = RedrawPolicy::new();
//! let mut uploads = UploadTracker::new();
//!
//! // A new image upload begins; its completion carries the id back
//! let id = uploads.begin();
//!
//! // ... decode finishes later ...
//! if uploads.is_current(id) {
//!     policy.on_mutation(Mutation::MeshReplaced);
//! }
//! assert!(policy.take_redraw());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod mesh;
pub mod netmap;
pub mod policy;
pub mod pyramid;
pub mod upload;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use apexwrap::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{PyramidError, Result};
    pub use crate::mesh::{Face, FaceKind, TexturedMesh, Vertex};
    pub use crate::netmap::remap_to_net;
    pub use crate::policy::{Mutation, RedrawPolicy};
    pub use crate::pyramid::{pyramid, LATERAL_FACES};
    pub use crate::upload::{UploadId, UploadTracker};
}

// Re-export nalgebra types for convenience
pub use nalgebra;

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_build_then_remap_pipeline() {
        let mut mesh = pyramid(2.0, 3.0).unwrap();
        remap_to_net(&mut mesh).unwrap();

        assert_eq!(mesh.num_lateral_faces(), LATERAL_FACES);
        assert!(mesh.uv_dirty());
        assert!(mesh.apex_position().is_some());
    }

    #[test]
    fn test_replacing_upload_keeps_only_newest() {
        // Upload image A, then image B before A's texture finishes
        // loading: only B may ever reach the screen.
        let mut uploads = UploadTracker::new();
        let mut policy = RedrawPolicy::new();

        let a = uploads.begin();
        let b = uploads.begin();

        let mut attached = Vec::new();
        for (id, name) in [(b, "B"), (a, "A")] {
            if uploads.is_current(id) {
                attached.push(name);
                policy.on_mutation(Mutation::MeshReplaced);
            }
        }

        assert_eq!(attached, vec!["B"]);
        assert!(policy.take_redraw());
    }
}
