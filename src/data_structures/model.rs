//! Vertex definitions and GPU vertex-layout descriptions.
//!
//! Every vertex type that is stored in a GPU buffer implements [`Vertex`] to
//! describe its memory layout to the render pipeline.

/// Describes the GPU memory layout of one vertex type.
///
/// Implementors return the `wgpu::VertexBufferLayout` that the render
/// pipeline uses to interpret the raw buffer bytes.
pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

/// A scene vertex: position, normal and per-vertex colour.
///
/// This is the one vertex format the fixed shader pair consumes. Geometry is
/// authored directly as arrays of these and uploaded once into an immutable
/// vertex buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

impl SceneVertex {
    pub fn new(position: [f32; 3], normal: [f32; 3], color: [f32; 3]) -> Self {
        Self {
            position,
            normal,
            color,
        }
    }
}

/**
 * As we store vertex data directly in GPU memory we need to tell what the
 * bytes refer to:
 *
 * offset: zero as we want to use the full space.
 * stride: length of one vertex
 *
 * Stride layout here: position + normal + colour as three 3d vectors.
 */
impl Vertex for SceneVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<SceneVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    // corresponds to the @location in the shader file.
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}
