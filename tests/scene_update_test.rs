use std::time::Duration;

use cgmath::{Matrix, Vector3};
use scene_ngin::data_structures::entity::Entity;
use scene_ngin::input::InputState;
use scene_ngin::scene::{EntityId, MeshId, Scene, pulse_rate};
use winit::keyboard::KeyCode;

const DT: Duration = Duration::from_millis(16);

fn scene_with_entities(count: usize) -> (Scene, Vec<EntityId>) {
    let mut scene = Scene::new();
    let ids = (0..count)
        .map(|_| scene.add_entity(Entity::new(MeshId(0))))
        .collect();
    (scene, ids)
}

#[test]
fn should_follow_the_triangular_pulse_wave() {
    assert_eq!(pulse_rate(0.0), 0.0);
    assert_eq!(pulse_rate(0.25), 0.25);
    // Midpoint of the rising edge.
    assert_eq!(pulse_rate(0.5), 0.5);
    // Odd-numbered seconds fall instead of rise.
    assert_eq!(pulse_rate(1.25), 0.75);
    assert_eq!(pulse_rate(1.5), 0.5);
    assert_eq!(pulse_rate(2.25), 0.25);
}

#[test]
fn should_scale_pulsers_to_unit_at_the_wave_midpoint() {
    let (mut scene, ids) = scene_with_entities(1);
    scene.add_pulser(ids[0]);

    scene.update(&InputState::new(), DT, Duration::from_secs_f32(0.5));

    // Halfway between 0.75 and 1.25 on every axis.
    let scale = scene.entity(ids[0]).unwrap().scale();
    assert_eq!(scale, Vector3::new(1.0, 1.0, 1.0));
}

#[test]
fn should_move_the_player_on_held_keys() {
    let (mut scene, ids) = scene_with_entities(1);
    scene.set_player(ids[0]);

    let mut input = InputState::new();
    input.keys_down.insert(KeyCode::KeyI);

    scene.update(&input, Duration::from_secs(1), Duration::from_secs(1));

    // KeyI moves up at 5 units/s; one second passed.
    let position = scene.entity(ids[0]).unwrap().position();
    assert!((position.y - 5.0).abs() < 1e-5, "got {:?}", position);
    assert_eq!(position.x, 0.0);
    assert_eq!(position.z, 0.0);
}

#[test]
fn should_not_move_the_player_without_input() {
    let (mut scene, ids) = scene_with_entities(1);
    scene.set_player(ids[0]);

    scene.update(&InputState::new(), Duration::from_secs(1), Duration::from_secs(1));

    let position = scene.entity(ids[0]).unwrap().position();
    assert_eq!(position, Vector3::new(0.0, 0.0, 0.0));
}

#[test]
fn should_spin_all_spinners_together() {
    let (mut scene, ids) = scene_with_entities(2);
    scene.add_spinner(ids[0]);
    scene.add_spinner(ids[1]);

    let input = InputState::new();
    scene.update(&input, Duration::from_secs_f32(0.5), Duration::from_secs_f32(0.5));
    scene.update(&input, Duration::from_secs_f32(0.5), Duration::from_secs(1));

    for id in ids {
        let rotation = scene.entity(id).unwrap().rotation();
        assert!((rotation.z - 1.0).abs() < 1e-5, "got {:?}", rotation);
        assert_eq!(rotation.x, 0.0);
        assert_eq!(rotation.y, 0.0);
    }
}

#[test]
fn should_batch_one_draw_per_entity_in_arena_order() {
    let mut scene = Scene::new();
    let a = scene.add_entity(Entity::new(MeshId(0)));
    let b = scene.add_entity(Entity::new(MeshId(1)));
    scene.entity_mut(a).unwrap().set_position(Vector3::new(-2.0, 0.0, 0.0));
    scene.entity_mut(b).unwrap().set_position(Vector3::new(2.0, 0.0, 0.0));

    scene.update(&InputState::new(), DT, DT);
    let batch = scene.frame_batch();

    assert_eq!(batch.len(), 2);
    assert_eq!(batch[0].mesh, MeshId(0));
    assert_eq!(batch[1].mesh, MeshId(1));
    assert_ne!(batch[0].world, batch[1].world);

    // Each entry carries the entity's world matrix transposed; for an affine
    // transform that puts the translation into the first rows' last column.
    let expected: [[f32; 4]; 4] = scene.entities()[0].world_matrix().transpose().into();
    assert_eq!(batch[0].world, expected);
    assert_eq!(batch[0].world[0][3], -2.0);
    assert_eq!(batch[1].world[0][3], 2.0);
}

#[test]
fn should_fail_the_lookup_for_a_dangling_mesh_id() {
    let scene = Scene::new();
    assert!(scene.mesh(MeshId(7)).is_none());
}

#[test]
fn should_keep_ids_valid_as_the_arena_grows() {
    let (mut scene, ids) = scene_with_entities(1);
    scene.entity_mut(ids[0]).unwrap().set_position(Vector3::new(1.0, 0.0, 0.0));

    // Growing the arena must not invalidate previously handed out ids.
    for _ in 0..32 {
        scene.add_entity(Entity::new(MeshId(0)));
    }
    let position = scene.entity(ids[0]).unwrap().position();
    assert_eq!(position, Vector3::new(1.0, 0.0, 0.0));
}
