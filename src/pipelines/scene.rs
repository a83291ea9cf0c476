//! The fixed shader pair and its per-entity uniform resources.
//!
//! [`SceneShader`] owns the one render pipeline every entity is drawn with
//! and a uniform buffer of per-entity world matrices addressed with dynamic
//! offsets. All world matrices for a frame are committed with a single
//! [`upload_worlds`](SceneShader::upload_worlds) call before the render pass
//! starts; during the pass each draw selects its slot by offset.

use std::mem;

use crate::{
    data_structures::{
        model::{SceneVertex, Vertex},
        texture::Texture,
    },
    render::EntityDraw,
};

/// Per-entity data as the vertex stage consumes it: the world matrix,
/// uploaded transposed. The shader applies it with vector-times-matrix,
/// which exactly undoes the transpose.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct EntityUniform {
    pub world: [[f32; 4]; 4],
}

/// Initial number of world-matrix slots; the buffer grows when a frame
/// batches more entities than this.
const INITIAL_WORLD_SLOTS: u32 = 64;

/// The fixed vertex/pixel shader pair plus the per-entity uniform ring.
#[derive(Debug)]
pub struct SceneShader {
    pub render_pipeline: wgpu::RenderPipeline,
    pub world_buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
    slots: u32,
    stride: u32,
}

impl SceneShader {
    pub fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
        light_bind_group_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        // Dynamic offsets must land on the device's uniform alignment, so
        // each matrix occupies one aligned slot.
        let align = device.limits().min_uniform_buffer_offset_alignment;
        let size = mem::size_of::<EntityUniform>() as u32;
        let stride = size.div_ceil(align) * align;

        let bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: wgpu::BufferSize::new(size as u64),
                    },
                    count: None,
                }],
                label: Some("entity_bind_group_layout"),
            });

        let (world_buffer, bind_group) =
            mk_world_buffer(device, &bind_group_layout, INITIAL_WORLD_SLOTS, stride);

        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Scene Pipeline Layout"),
                bind_group_layouts: &[
                    camera_bind_group_layout,
                    &bind_group_layout,
                    light_bind_group_layout,
                ],
                push_constant_ranges: &[],
            });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("scene_shader.wgsl").into()),
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            cache: None,
            label: Some("Scene Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[SceneVertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: color_format,
                    blend: Some(wgpu::BlendState {
                        alpha: wgpu::BlendComponent::REPLACE,
                        color: wgpu::BlendComponent::REPLACE,
                    }),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // The built-in geometry is authored with mixed winding, so
                // both faces stay visible.
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: Texture::DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        Self {
            render_pipeline,
            world_buffer,
            bind_group,
            bind_group_layout,
            slots: INITIAL_WORLD_SLOTS,
            stride,
        }
    }

    /// Commit all pending world matrices for this frame in one write.
    ///
    /// Must run before the render pass that consumes them; slot `i` in the
    /// buffer corresponds to `batch[i]` and is selected during the pass via
    /// [`world_offset`](Self::world_offset).
    pub fn upload_worlds(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        batch: &[EntityDraw],
    ) {
        if batch.is_empty() {
            return;
        }
        if batch.len() as u32 > self.slots {
            self.grow(device, batch.len() as u32);
        }
        let stride = self.stride as usize;
        let mut bytes = vec![0u8; batch.len() * stride];
        for (i, draw) in batch.iter().enumerate() {
            let uniform = EntityUniform { world: draw.world };
            bytes[i * stride..i * stride + mem::size_of::<EntityUniform>()]
                .copy_from_slice(bytemuck::bytes_of(&uniform));
        }
        queue.write_buffer(&self.world_buffer, 0, &bytes);
    }

    /// Byte offset of slot `index` into the world buffer.
    pub fn world_offset(&self, index: usize) -> u32 {
        index as u32 * self.stride
    }

    fn grow(&mut self, device: &wgpu::Device, wanted: u32) {
        let mut slots = self.slots;
        while slots < wanted {
            slots *= 2;
        }
        log::info!(
            "growing the entity uniform buffer from {} to {} slots",
            self.slots,
            slots
        );
        let (world_buffer, bind_group) =
            mk_world_buffer(device, &self.bind_group_layout, slots, self.stride);
        self.world_buffer = world_buffer;
        self.bind_group = bind_group;
        self.slots = slots;
    }
}

fn mk_world_buffer(
    device: &wgpu::Device,
    bind_group_layout: &wgpu::BindGroupLayout,
    slots: u32,
    stride: u32,
) -> (wgpu::Buffer, wgpu::BindGroup) {
    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Entity World Buffer"),
        size: slots as u64 * stride as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    // The binding window covers one slot; dynamic offsets move it.
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout: bind_group_layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer: &buffer,
                offset: 0,
                size: wgpu::BufferSize::new(mem::size_of::<EntityUniform>() as u64),
            }),
        }],
        label: Some("entity_bind_group"),
    });
    (buffer, bind_group)
}
