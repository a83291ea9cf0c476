//! Engine data structures: vertices, meshes, entities and textures.
//!
//! This module contains the core data types for scene representation:
//!
//! - `model` contains the vertex definition and GPU vertex-layout trait
//! - `mesh` is an immutable vertex/index buffer pair shared between entities
//! - `entity` holds a position/rotation/scale pose and its derived world matrix
//! - `texture` contains the depth texture wrapper used by the render pass

pub mod entity;
pub mod mesh;
pub mod model;
pub mod texture;
