//! Application host and frame loop.
//!
//! This module owns the winit event loop and drives the frame cycle: fold
//! incoming events into the input state, run the update phase to completion
//! (quit check, scene motion rules, camera advance, camera uniform commit),
//! then run the draw phase (one clear, one indexed draw per entity, one
//! present). Update always finishes before drawing starts, and a frame is
//! presented exactly once.
//!
//! # Lifecycle
//!
//! 1. [`run`] builds the event loop and an [`App`] around a scene constructor
//! 2. `resumed` creates the window, the GPU [`Context`] and the scene
//! 3. every `RedrawRequested` runs one update+draw cycle and schedules the next

use std::{iter, sync::Arc};

use instant::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::KeyCode,
    window::Window,
};

use crate::{
    context::Context,
    data_structures::texture::Texture,
    input::{InputState, MouseButtonState},
    render,
    scene::Scene,
};

/// Builds the scene once the GPU device exists.
///
/// [`Scene::basic_geometry`] fits this directly:
/// `run(Box::new(Scene::basic_geometry))`.
pub type SceneConstructor = Box<dyn FnOnce(&wgpu::Device) -> anyhow::Result<Scene>>;

/// Application state bundle: GPU context, scene, input and surface status.
#[derive(Debug)]
struct AppState {
    ctx: Context,
    scene: Scene,
    input: InputState,
    is_surface_configured: bool,
}

impl AppState {
    async fn new(window: Arc<Window>, constructor: SceneConstructor) -> Self {
        let ctx = match Context::new(window).await {
            Ok(ctx) => ctx,
            Err(e) => panic!(
                "App initialization failed. Cannot create the main context: {}",
                e
            ),
        };
        let scene = match constructor(&ctx.device) {
            Ok(scene) => scene,
            Err(e) => panic!("App initialization failed. Cannot build the scene: {}", e),
        };
        Self {
            ctx,
            scene,
            input: InputState::new(),
            is_surface_configured: false,
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.ctx.config.width = width;
            self.ctx.config.height = height;
            self.is_surface_configured = true;
            self.ctx.projection.resize(width, height);
            self.ctx
                .surface
                .configure(&self.ctx.device, &self.ctx.config);
            self.ctx.depth_texture = Texture::create_depth_texture(
                &self.ctx.device,
                [self.ctx.config.width, self.ctx.config.height],
                "depth_texture",
            );
        }
    }

    /// The update phase of one frame; runs to completion before drawing.
    fn update(&mut self, dt: Duration, total_time: Duration) {
        self.scene.update(&self.input, dt, total_time);

        let camera = &mut self.ctx.camera;
        camera.controller.update(&mut camera.camera, dt);
        camera
            .uniform
            .update_view_proj(&camera.camera, &self.ctx.projection);
        // Commit the once-per-frame uniforms; the per-entity worlds are
        // committed in render() right before the pass consumes them.
        self.ctx.queue.write_buffer(
            &camera.buffer,
            0,
            bytemuck::cast_slice(&[camera.uniform]),
        );
    }

    /// The draw phase of one frame: clear once, draw every entity, present
    /// once.
    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        // invoke main render loop
        self.ctx.window.request_redraw();

        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return Ok(());
        }

        let batch = self.scene.frame_batch();
        self.ctx
            .shader
            .upload_worlds(&self.ctx.device, &self.ctx.queue, &batch);

        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder: wgpu::CommandEncoder =
            self.ctx
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Render Encoder"),
                });
        {
            let mut render_pass: wgpu::RenderPass<'_> =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Render Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(self.ctx.clear_colour),
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                        view: &self.ctx.depth_texture.view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    }),
                    occlusion_query_set: None,
                    timestamp_writes: None,
                });

            render::draw_scene(
                &mut render_pass,
                &self.ctx.shader,
                &self.ctx.camera.bind_group,
                &self.ctx.light.bind_group,
                &self.scene,
                &batch,
            );
        }

        self.ctx.queue.submit(iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

pub struct App {
    async_runtime: tokio::runtime::Runtime,
    state: Option<AppState>,
    // We use Option to `take()` the constructor after use.
    constructor: Option<SceneConstructor>,
    last_time: Instant,
    start_time: Instant,
}

impl App {
    fn new(constructor: SceneConstructor) -> Self {
        let async_runtime = tokio::runtime::Runtime::new().unwrap();
        Self {
            async_runtime,
            state: None,
            constructor: Some(constructor),
            last_time: Instant::now(),
            start_time: Instant::now(),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(constructor) = self.constructor.take() else {
            // Some platforms resume more than once; the state already exists.
            return;
        };

        let window_attributes = Window::default_attributes().with_title("scene-ngin");
        let window = Arc::new(event_loop.create_window(window_attributes).unwrap());

        let state = self.async_runtime.block_on(AppState::new(window, constructor));
        self.state = Some(state);
        self.last_time = Instant::now();
        self.start_time = Instant::now();
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };
        // Dragging with the left button held turns the camera.
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            if state.input.mouse_pressed == MouseButtonState::Left {
                state.ctx.camera.controller.handle_mouse(dx, dy);
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        state.input.handle_window_event(&event);
        state.ctx.camera.controller.handle_window_events(&event);

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::RedrawRequested => {
                let dt = self.last_time.elapsed();
                self.last_time = Instant::now();
                let total_time = self.start_time.elapsed();

                if state.input.key_down(KeyCode::Escape) {
                    event_loop.exit();
                    return;
                }

                state.update(dt, total_time);

                match state.render() {
                    Ok(_) => {}
                    // Reconfigure the surface if it's lost or outdated
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = state.ctx.window.inner_size();
                        state.resize(size.width, size.height);
                    }
                    Err(e) => {
                        log::error!("Unable to render {}", e);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Run the renderer with the given scene until the window closes or Escape
/// is pressed.
pub fn run(constructor: SceneConstructor) -> anyhow::Result<()> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    };

    let event_loop = EventLoop::new()?;
    let mut app = App::new(constructor);
    event_loop.run_app(&mut app)?;

    Ok(())
}
