//! scene-ngin
//!
//! A lightweight, cross-platform 3D scene renderer. This crate owns a small
//! surface for composing scenes out of shared mesh buffers and entity
//! transforms, and for driving an update/draw frame loop that issues one
//! indexed draw call per entity. The design emphasizes clear resource
//! ownership, per-object uniform batching and a minimal runtime surface
//! suitable for embedding in native applications.
//!
//! High-level modules
//! - `camera`: camera types, controller and uniforms for view/projection
//! - `context`: central GPU and window context that owns device/queue/shader
//! - `data_structures`: engine data models (meshes, entities, vertices)
//! - `input`: polled keyboard and mouse state for per-frame game logic
//! - `scene`: scene composition, per-frame motion rules and draw batching
//! - `pipelines`: the fixed render pipeline and its uniform resources
//! - `render`: per-entity draw submission into an open render pass
//! - `app`: window/event-loop host that runs the update/draw cycle
//!

pub mod app;
pub mod camera;
pub mod context;
pub mod data_structures;
pub mod input;
pub mod pipelines;
pub mod render;
pub mod scene;

// Re-exports commonly used types for convenience in downstream code.
pub use winit::dpi::PhysicalPosition;
pub use cgmath::*;
pub use winit::event::DeviceEvent;
pub use winit::event::WindowEvent;
pub use winit::keyboard::KeyCode;
pub use wgpu::*;
