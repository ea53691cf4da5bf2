//! GPU mesh buffer management for the viewer.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use apexwrap::mesh::TexturedMesh;
use apexwrap::nalgebra::Vector3;

/// GPU vertex with position, normal, and UV coordinates.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    /// Vertex buffer layout for wgpu.
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // position
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                // normal
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                // uv
                wgpu::VertexAttribute {
                    offset: (std::mem::size_of::<[f32; 3]>() * 2) as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// Mesh data uploaded to the GPU.
pub struct GpuMesh {
    /// Vertex buffer containing positions, normals, and UVs.
    pub vertex_buffer: wgpu::Buffer,
    /// Number of vertices to draw (3 per face, non-indexed).
    pub num_vertices: u32,
}

impl GpuMesh {
    /// Create GPU buffers from a textured mesh.
    ///
    /// Every face already owns its three vertex records, so the upload is
    /// non-indexed with flat (per-face) normals. Clears the mesh's UV-dirty
    /// flag: after this call the GPU buffer reflects the current UVs.
    pub fn from_textured_mesh(device: &wgpu::Device, mesh: &mut TexturedMesh) -> Self {
        let mut vertices = Vec::with_capacity(mesh.num_faces() * 3);

        for face in mesh.faces() {
            let [v0, v1, v2] = face.vertices;
            let normal = face_normal(
                Vector3::new(v0.position.x, v0.position.y, v0.position.z),
                Vector3::new(v1.position.x, v1.position.y, v1.position.z),
                Vector3::new(v2.position.x, v2.position.y, v2.position.z),
            );

            for v in [v0, v1, v2] {
                vertices.push(Vertex {
                    position: [v.position.x as f32, v.position.y as f32, v.position.z as f32],
                    normal,
                    uv: [v.uv.x as f32, v.uv.y as f32],
                });
            }
        }

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Pyramid Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        mesh.clear_uv_dirty();

        Self {
            vertex_buffer,
            num_vertices: vertices.len() as u32,
        }
    }
}

/// Unit normal of a triangle, or +y for degenerate faces.
fn face_normal(p0: Vector3<f64>, p1: Vector3<f64>, p2: Vector3<f64>) -> [f32; 3] {
    let n = (p1 - p0).cross(&(p2 - p0));
    let len = n.norm();
    if len > 1e-12 {
        [(n.x / len) as f32, (n.y / len) as f32, (n.z / len) as f32]
    } else {
        [0.0, 1.0, 0.0]
    }
}
