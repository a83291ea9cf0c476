//! Entities: posed instances of a mesh.
//!
//! An [`Entity`] pairs a position/rotation/scale pose with the id of the
//! mesh it draws. The 4x4 world matrix is derived from the pose and cached;
//! every mutating setter re-derives it immediately, so reading the matrix
//! right after a setter always observes the new pose.

use cgmath::{Matrix4, Quaternion, Rad, Rotation3, SquareMatrix, Vector3};

use crate::scene::MeshId;

/// Rotation from Euler angles in radians, applied roll (z) first, then
/// pitch (x), then yaw (y).
fn rotation_quat(angles: Vector3<f32>) -> Quaternion<f32> {
    Quaternion::from_angle_y(Rad(angles.y))
        * Quaternion::from_angle_x(Rad(angles.x))
        * Quaternion::from_angle_z(Rad(angles.z))
}

/// A drawable object: one mesh reference plus a world-space pose.
///
/// Many entities may reference the same mesh; the mesh arena in
/// [`crate::scene::Scene`] owns the geometry. The cached world matrix is
/// always `Translation(position) * Rotation(rotation) * Scale(scale)` for
/// the current pose.
#[derive(Clone, Debug)]
pub struct Entity {
    position: Vector3<f32>,
    rotation: Vector3<f32>,
    scale: Vector3<f32>,
    world: Matrix4<f32>,
    mesh: MeshId,
}

impl Entity {
    /// Create an entity at the origin with no rotation and unit scale,
    /// bound to the given mesh.
    pub fn new(mesh: MeshId) -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
            world: Matrix4::identity(),
            mesh,
        }
    }

    /// Re-derive the world matrix from the current pose.
    ///
    /// The time parameters exist for symmetry with time-driven callers; the
    /// derivation itself is a pure function of the stored pose. Animation
    /// over time lives in the scene's update rules, which mutate the pose
    /// through the setters below.
    pub fn update(&mut self, _delta_time: f32, _total_time: f32) {
        self.world = self.derive_world();
    }

    /// Move along `velocity` rotated by the orientation implied by
    /// `direction` (Euler angles), independent of the entity's own rotation.
    pub fn move_dir(&mut self, direction: Vector3<f32>, velocity: Vector3<f32>) {
        self.position += rotation_quat(direction) * velocity;
        self.world = self.derive_world();
    }

    /// Move along `velocity` rotated by the entity's own rotation, i.e.
    /// relative to where the entity is currently facing.
    pub fn move_forward(&mut self, velocity: Vector3<f32>) {
        self.position += rotation_quat(self.rotation) * velocity;
        self.world = self.derive_world();
    }

    pub fn world_matrix(&self) -> Matrix4<f32> {
        self.world
    }

    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    pub fn rotation(&self) -> Vector3<f32> {
        self.rotation
    }

    pub fn scale(&self) -> Vector3<f32> {
        self.scale
    }

    pub fn mesh(&self) -> MeshId {
        self.mesh
    }

    pub fn set_position(&mut self, position: Vector3<f32>) {
        self.position = position;
        self.world = self.derive_world();
    }

    pub fn set_rotation(&mut self, rotation: Vector3<f32>) {
        self.rotation = rotation;
        self.world = self.derive_world();
    }

    pub fn set_scale(&mut self, scale: Vector3<f32>) {
        self.scale = scale;
        self.world = self.derive_world();
    }

    pub fn set_mesh(&mut self, mesh: MeshId) {
        self.mesh = mesh;
    }

    /// Raw override of the cached matrix. The next pose mutation or
    /// [`update`](Self::update) replaces it with the derived value again.
    pub fn set_world_matrix(&mut self, world: Matrix4<f32>) {
        self.world = world;
    }

    fn derive_world(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from(rotation_quat(self.rotation))
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }
}
