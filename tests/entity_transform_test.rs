use std::f32::consts::FRAC_PI_2;

use cgmath::{Matrix4, Vector3, Vector4};
use scene_ngin::data_structures::entity::Entity;
use scene_ngin::scene::MeshId;

fn transform_point(matrix: Matrix4<f32>, point: [f32; 3]) -> [f32; 3] {
    let v = matrix * Vector4::new(point[0], point[1], point[2], 1.0);
    [v.x, v.y, v.z]
}

fn assert_close(actual: [f32; 3], expected: [f32; 3]) {
    for (a, e) in actual.iter().zip(expected.iter()) {
        assert!(
            (a - e).abs() < 1e-5,
            "expected {:?} but got {:?}",
            expected,
            actual
        );
    }
}

#[test]
fn should_default_to_identity_world_matrix() {
    let entity = Entity::new(MeshId(0));
    for probe in [[0.0, 0.0, 0.0], [1.0, 2.0, 3.0], [-4.5, 0.25, 9.0]] {
        assert_close(transform_point(entity.world_matrix(), probe), probe);
    }
}

#[test]
fn should_compose_translation_rotation_scale_in_that_order() {
    let mut entity = Entity::new(MeshId(0));
    entity.set_position(Vector3::new(10.0, 0.0, 0.0));
    entity.set_rotation(Vector3::new(0.0, FRAC_PI_2, 0.0));
    entity.set_scale(Vector3::new(2.0, 2.0, 2.0));
    entity.update(0.016, 1.0);

    // Scale applies first, then the yaw about +y, then the translation:
    // (1,0,0) -> (2,0,0) -> (0,0,-2) -> (10,0,-2).
    assert_close(
        transform_point(entity.world_matrix(), [1.0, 0.0, 0.0]),
        [10.0, 0.0, -2.0],
    );
    // A point on the rotation axis only scales and translates.
    assert_close(
        transform_point(entity.world_matrix(), [0.0, 1.0, 0.0]),
        [10.0, 2.0, 0.0],
    );
}

#[test]
fn should_observe_the_new_pose_directly_after_a_setter() {
    let mut entity = Entity::new(MeshId(0));
    entity.set_position(Vector3::new(0.0, 3.0, 0.0));

    // No update() call in between; setters re-derive the matrix eagerly.
    assert_close(
        transform_point(entity.world_matrix(), [0.0, 0.0, 0.0]),
        [0.0, 3.0, 0.0],
    );
}

#[test]
fn should_move_forward_straight_with_identity_rotation() {
    let mut entity = Entity::new(MeshId(0));
    entity.move_forward(Vector3::new(0.0, 5.0, 0.0));

    let position = entity.position();
    assert_close([position.x, position.y, position.z], [0.0, 5.0, 0.0]);
}

#[test]
fn should_move_forward_relative_to_own_facing() {
    let mut entity = Entity::new(MeshId(0));
    entity.set_rotation(Vector3::new(0.0, FRAC_PI_2, 0.0));
    entity.move_forward(Vector3::new(0.0, 0.0, 1.0));

    // A quarter turn about +y maps +z onto +x.
    let position = entity.position();
    assert_close([position.x, position.y, position.z], [1.0, 0.0, 0.0]);
}

#[test]
fn should_move_by_the_supplied_direction_ignoring_own_rotation() {
    let mut entity = Entity::new(MeshId(0));
    entity.set_rotation(Vector3::new(0.0, 0.0, 1.0));
    entity.move_dir(Vector3::new(0.0, FRAC_PI_2, 0.0), Vector3::new(0.0, 0.0, 1.0));

    let position = entity.position();
    assert_close([position.x, position.y, position.z], [1.0, 0.0, 0.0]);
}

#[test]
fn should_rederive_the_matrix_after_a_raw_override() {
    let mut entity = Entity::new(MeshId(0));
    entity.set_world_matrix(Matrix4::from_translation(Vector3::new(5.0, 0.0, 0.0)));
    assert_close(
        transform_point(entity.world_matrix(), [0.0, 0.0, 0.0]),
        [5.0, 0.0, 0.0],
    );

    // The next update derives from the (unchanged) pose again.
    entity.update(0.016, 1.0);
    assert_close(
        transform_point(entity.world_matrix(), [0.0, 0.0, 0.0]),
        [0.0, 0.0, 0.0],
    );
}
