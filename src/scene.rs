//! Scene composition and per-frame motion rules.
//!
//! A [`Scene`] owns the mesh arena and the entity arena, plus role markers
//! that drive the built-in motion rules: a player entity steered by held
//! keys, spinner entities that accumulate rotation, and pulser entities
//! whose scale follows a triangular wave. Each frame the driver calls
//! [`update`](Scene::update) (which also re-derives every entity's world
//! matrix) and then [`frame_batch`](Scene::frame_batch) to collect the draw
//! data for the render pass.
//!
//! Meshes and entities are addressed by arena ids instead of references or
//! raw positions, so holding an id can never dangle into freed memory; a
//! stale id simply fails the checked lookup.

use cgmath::{Matrix, Vector3, VectorSpace};
use instant::Duration;
use winit::keyboard::KeyCode;

use crate::{
    data_structures::{
        entity::Entity,
        mesh::Mesh,
        model::SceneVertex,
    },
    input::InputState,
    render::EntityDraw,
};

/// Stable handle of a mesh in the scene's mesh arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeshId(pub usize);

/// Stable handle of an entity in the scene's entity arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntityId(pub usize);

/// How fast the player entity moves, in units per second.
const PLAYER_SPEED: f32 = 5.0;

/// Pulsing scale bounds; the triangular wave lerps between them.
const SCALE_MIN: Vector3<f32> = Vector3::new(0.75, 0.75, 0.75);
const SCALE_MAX: Vector3<f32> = Vector3::new(1.25, 1.25, 1.25);

/// Triangular wave with period 2: rises through the fractional part of an
/// even-numbered second, falls through the fractional part of an odd one.
pub fn pulse_rate(total_time: f32) -> f32 {
    let frac = total_time - total_time.trunc();
    if (total_time as i64) % 2 == 0 {
        frac
    } else {
        1.0 - frac
    }
}

/// The set of drawable objects and the rules that move them.
#[derive(Debug, Default)]
pub struct Scene {
    meshes: Vec<Mesh>,
    entities: Vec<Entity>,
    player: Option<EntityId>,
    spinners: Vec<EntityId>,
    pulsers: Vec<EntityId>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move a mesh into the arena and return its handle. The arena is
    /// append-only, so handles stay valid for the life of the scene.
    pub fn add_mesh(&mut self, mesh: Mesh) -> MeshId {
        self.meshes.push(mesh);
        MeshId(self.meshes.len() - 1)
    }

    pub fn mesh(&self, id: MeshId) -> Option<&Mesh> {
        self.meshes.get(id.0)
    }

    pub fn add_entity(&mut self, entity: Entity) -> EntityId {
        self.entities.push(entity);
        EntityId(self.entities.len() - 1)
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.0)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id.0)
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Mark the entity steered by the movement keys.
    pub fn set_player(&mut self, id: EntityId) {
        self.player = Some(id);
    }

    /// Mark an entity as continuously rotating. All spinners share one
    /// rotation value, accumulated on the first of them.
    pub fn add_spinner(&mut self, id: EntityId) {
        self.spinners.push(id);
    }

    /// Mark an entity as scale-pulsing with the triangular wave.
    pub fn add_pulser(&mut self, id: EntityId) {
        self.pulsers.push(id);
    }

    /// Apply one frame of motion rules, then re-derive every entity's world
    /// matrix. Runs to completion before any drawing happens.
    pub fn update(&mut self, input: &InputState, dt: Duration, total_time: Duration) {
        let dt = dt.as_secs_f32();
        let total_time = total_time.as_secs_f32();

        // Steer the player relative to its own facing.
        if let Some(player) = self.player {
            let step = PLAYER_SPEED * dt;
            let moves: [(KeyCode, Vector3<f32>); 6] = [
                (KeyCode::KeyI, Vector3::new(0.0, step, 0.0)),
                (KeyCode::KeyK, Vector3::new(0.0, -step, 0.0)),
                (KeyCode::KeyL, Vector3::new(step, 0.0, 0.0)),
                (KeyCode::KeyJ, Vector3::new(-step, 0.0, 0.0)),
                (KeyCode::KeyO, Vector3::new(0.0, 0.0, step)),
                (KeyCode::KeyU, Vector3::new(0.0, 0.0, -step)),
            ];
            if let Some(entity) = self.entities.get_mut(player.0) {
                for (key, velocity) in moves {
                    if input.key_down(key) {
                        entity.move_forward(velocity);
                    }
                }
            }
        }

        // Accumulate the shared spin on the first spinner's rotation and
        // apply it to all of them.
        let spin = self
            .spinners
            .first()
            .and_then(|id| self.entity(*id))
            .map(|entity| {
                let mut rotation = entity.rotation();
                rotation.z += dt;
                rotation
            });
        if let Some(rotation) = spin {
            for id in self.spinners.clone() {
                if let Some(entity) = self.entities.get_mut(id.0) {
                    entity.set_rotation(rotation);
                }
            }
        }

        // Pulse the scale of the marked entities.
        let rate = pulse_rate(total_time);
        let scale = SCALE_MIN.lerp(SCALE_MAX, rate);
        for id in self.pulsers.clone() {
            if let Some(entity) = self.entities.get_mut(id.0) {
                entity.set_scale(scale);
            }
        }

        for entity in &mut self.entities {
            entity.update(dt, total_time);
        }
    }

    /// Collect one [`EntityDraw`] per entity, in arena order, with the world
    /// matrix transposed the way the vertex stage consumes it.
    pub fn frame_batch(&self) -> Vec<EntityDraw> {
        self.entities
            .iter()
            .map(|entity| EntityDraw {
                mesh: entity.mesh(),
                world: entity.world_matrix().transpose().into(),
            })
            .collect()
    }

    /// The built-in demo scene: a triangle and two quads, instanced by six
    /// entities with all three motion roles in play.
    pub fn basic_geometry(device: &wgpu::Device) -> anyhow::Result<Self> {
        const RED: [f32; 3] = [1.0, 0.0, 0.0];
        const GREEN: [f32; 3] = [0.0, 1.0, 0.0];
        const BLUE: [f32; 3] = [0.0, 0.0, 1.0];
        // All of the built-in geometry lies in the z=0 plane and faces +z.
        const N: [f32; 3] = [0.0, 0.0, 1.0];

        let mut scene = Scene::new();

        let triangle_vertices = [
            SceneVertex::new([0.0, 1.0, 0.0], N, RED),
            SceneVertex::new([1.5, -1.0, 0.0], N, BLUE),
            SceneVertex::new([-1.5, -1.0, 0.0], N, GREEN),
        ];
        let triangle = scene.add_mesh(Mesh::new(
            device,
            "triangle",
            &triangle_vertices,
            &[0, 1, 2],
        )?);

        let right_quad_vertices = [
            SceneVertex::new([2.0, 1.0, 0.0], N, RED),
            SceneVertex::new([3.5, -1.0, 0.0], N, GREEN),
            SceneVertex::new([2.0, -1.0, 0.0], N, BLUE),
            SceneVertex::new([3.5, 1.0, 0.0], N, GREEN),
        ];
        let right_quad = scene.add_mesh(Mesh::new(
            device,
            "right quad",
            &right_quad_vertices,
            &[0, 1, 2, 0, 3, 1],
        )?);

        let left_quad_vertices = [
            SceneVertex::new([-2.0, 1.0, 0.0], N, BLUE),
            SceneVertex::new([-2.0, -1.0, 0.0], N, RED),
            SceneVertex::new([-3.5, -1.0, 0.0], N, GREEN),
            SceneVertex::new([-3.5, 1.0, 0.0], N, GREEN),
        ];
        let left_quad = scene.add_mesh(Mesh::new(
            device,
            "left quad",
            &left_quad_vertices,
            &[0, 1, 2, 3, 0, 2],
        )?);

        let player = scene.add_entity(Entity::new(triangle));
        scene.set_player(player);

        let spinner = scene.add_entity(Entity::new(triangle));
        scene.add_spinner(spinner);

        let pulser_right = scene.add_entity(Entity::new(right_quad));
        scene.add_pulser(pulser_right);
        let pulser_left = scene.add_entity(Entity::new(left_quad));
        scene.add_pulser(pulser_left);

        let spinner_right = scene.add_entity(Entity::new(right_quad));
        scene.add_spinner(spinner_right);
        let spinner_left = scene.add_entity(Entity::new(left_quad));
        scene.add_spinner(spinner_left);

        Ok(scene)
    }
}
