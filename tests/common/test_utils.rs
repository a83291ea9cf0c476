use scene_ngin::data_structures::model::SceneVertex;

/// A minimal 3-vertex / 3-index triangle, the smallest drawable mesh.
#[allow(dead_code)]
pub fn triangle_vertices() -> ([SceneVertex; 3], [u32; 3]) {
    let normal = [0.0, 0.0, 1.0];
    (
        [
            SceneVertex::new([0.0, 1.0, 0.0], normal, [1.0, 0.0, 0.0]),
            SceneVertex::new([1.5, -1.0, 0.0], normal, [0.0, 0.0, 1.0]),
            SceneVertex::new([-1.5, -1.0, 0.0], normal, [0.0, 1.0, 0.0]),
        ],
        [0, 1, 2],
    )
}

/// Acquire a headless device and queue for tests that talk to the GPU.
///
/// Panics when no adapter is available; such environments should run the
/// default test set without the `integration-tests` feature instead.
#[cfg(feature = "integration-tests")]
pub async fn create_test_device() -> (wgpu::Device, wgpu::Queue) {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::PRIMARY | wgpu::Backends::GL,
        ..Default::default()
    });

    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: None,
            force_fallback_adapter: false,
        })
        .await
        .expect("no GPU adapter available for integration tests");

    adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: Some("test device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            memory_hints: Default::default(),
            trace: wgpu::Trace::Off,
        })
        .await
        .expect("failed to create the test device")
}
