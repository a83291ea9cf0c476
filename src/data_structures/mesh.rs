//! Meshes: immutable vertex/index buffer pairs.
//!
//! A [`Mesh`] owns one GPU vertex buffer and one GPU index buffer, both
//! written exactly once at creation. Multiple entities reference the same
//! mesh through the scene's mesh arena, so a handful of buffers can back an
//! arbitrary number of drawn objects.

use anyhow::ensure;
use wgpu::util::DeviceExt;

use crate::data_structures::model::SceneVertex;

/// An immutable vertex/index buffer pair plus the number of indices to draw.
///
/// The buffer contents are fixed at creation and never rewritten. Cloning a
/// `Mesh` clones the buffer handles, not the GPU memory; wgpu reference
/// counts the underlying resources, so the memory is released once the last
/// clone is dropped. The accessors hand out plain borrows and have no effect
/// on resource lifetime.
#[derive(Clone, Debug)]
pub struct Mesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl Mesh {
    /// Upload the given vertex and index arrays into freshly created
    /// immutable buffers.
    ///
    /// Fails if either array is empty; no partial state is retained in that
    /// case. Indices are 32-bit and index/vertex offsets during drawing are
    /// always zero, so `indices` addresses `vertices` directly.
    pub fn new(
        device: &wgpu::Device,
        name: &str,
        vertices: &[SceneVertex],
        indices: &[u32],
    ) -> anyhow::Result<Self> {
        ensure!(
            !vertices.is_empty(),
            "mesh {:?} has no vertices, refusing to create a zero-size buffer",
            name
        );
        ensure!(
            !indices.is_empty(),
            "mesh {:?} has no indices, refusing to create a zero-size buffer",
            name
        );

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Vertex Buffer", name)),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Index Buffer", name)),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Ok(Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
        })
    }

    pub fn vertex_buffer(&self) -> &wgpu::Buffer {
        &self.vertex_buffer
    }

    pub fn index_buffer(&self) -> &wgpu::Buffer {
        &self.index_buffer
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }
}
