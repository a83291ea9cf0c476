//! Per-entity draw submission.
//!
//! The scene produces one [`EntityDraw`] per entity each frame; this module
//! turns the batch into indexed draw calls inside an already-open render
//! pass. The pass itself (clear, depth attachment, submit, present) is owned
//! by the frame driver in [`crate::app`], which keeps "clear once, present
//! once" per frame in a single place.

use crate::{
    pipelines::scene::SceneShader,
    scene::{MeshId, Scene},
};

/// Data for drawing one entity: the mesh to bind and the entity's world
/// matrix, already transposed for the vertex stage.
#[derive(Clone, Copy, Debug)]
pub struct EntityDraw {
    pub mesh: MeshId,
    pub world: [[f32; 4]; 4],
}

/// Issue one indexed draw per batch entry, in batch order.
///
/// Expects the batch's world matrices to have been committed via
/// [`SceneShader::upload_worlds`] before the pass began; slot `i` belongs to
/// `batch[i]`. Pipeline and the per-frame bind groups (camera, light) are
/// bound once up front. Entries whose mesh id no longer resolves are skipped
/// with a warning instead of faulting the frame.
pub fn draw_scene(
    render_pass: &mut wgpu::RenderPass<'_>,
    shader: &SceneShader,
    camera_bind_group: &wgpu::BindGroup,
    light_bind_group: &wgpu::BindGroup,
    scene: &Scene,
    batch: &[EntityDraw],
) {
    render_pass.set_pipeline(&shader.render_pipeline);
    render_pass.set_bind_group(0, camera_bind_group, &[]);
    render_pass.set_bind_group(2, light_bind_group, &[]);

    for (i, draw) in batch.iter().enumerate() {
        let Some(mesh) = scene.mesh(draw.mesh) else {
            log::warn!(
                "you attempted to render an entity whose mesh {:?} is not in the scene",
                draw.mesh
            );
            continue;
        };
        if mesh.index_count() == 0 {
            log::warn!("you attempted to render a mesh with zero indices");
            continue;
        }
        render_pass.set_bind_group(1, &shader.bind_group, &[shader.world_offset(i)]);
        render_pass.set_vertex_buffer(0, mesh.vertex_buffer().slice(..));
        render_pass.set_index_buffer(mesh.index_buffer().slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..mesh.index_count(), 0, 0..1);
    }
}
