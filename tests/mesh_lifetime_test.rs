#[cfg(feature = "integration-tests")]
mod common;

#[test]
#[cfg(feature = "integration-tests")]
fn should_keep_buffers_alive_in_a_copy() {
    use std::mem;

    use crate::common::test_utils::{create_test_device, triangle_vertices};
    use scene_ngin::data_structures::{mesh::Mesh, model::SceneVertex};

    let runtime = tokio::runtime::Runtime::new().unwrap();
    let (device, _queue) = runtime.block_on(create_test_device());

    let (vertices, indices) = triangle_vertices();
    let original = Mesh::new(&device, "triangle", &vertices, &indices).unwrap();
    let copy = original.clone();
    drop(original);

    // The copy still owns live buffers of the full original size.
    assert_eq!(copy.index_count(), 3);
    assert_eq!(
        copy.vertex_buffer().size(),
        (3 * mem::size_of::<SceneVertex>()) as u64
    );
    assert_eq!(copy.index_buffer().size(), (3 * mem::size_of::<u32>()) as u64);
}

#[test]
#[cfg(feature = "integration-tests")]
fn should_reject_empty_geometry() {
    use crate::common::test_utils::{create_test_device, triangle_vertices};
    use scene_ngin::data_structures::mesh::Mesh;

    let runtime = tokio::runtime::Runtime::new().unwrap();
    let (device, _queue) = runtime.block_on(create_test_device());

    let (vertices, indices) = triangle_vertices();
    assert!(Mesh::new(&device, "no vertices", &[], &indices).is_err());
    assert!(Mesh::new(&device, "no indices", &vertices, &[]).is_err());
}
