//! Render pipeline definitions and their uniform resources.
//!
//! - `scene` owns the fixed vertex/pixel shader pair and the per-entity
//!   world-matrix uniform ring
//! - `light` owns the directional light uniform bound to the pixel stage

pub mod light;
pub mod scene;
