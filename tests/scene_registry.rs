use glam::Mat4;
use vr_workbench::scene_impl::{
    CameraData, ClusteredRenderer, SceneImplementation, SceneImplementationRegistry,
    CLUSTERED_RENDERER_NAME,
};

#[test]
fn builtin_registry_defaults_to_the_clustered_renderer() {
    let registry = SceneImplementationRegistry::with_builtin().expect("builtin registration");
    assert_eq!(registry.default_name(), Some(CLUSTERED_RENDERER_NAME));
    assert!(registry.description(CLUSTERED_RENDERER_NAME).is_some());

    let mut implementation = registry.create(None).expect("default implementation");
    implementation.init().expect("stub init");

    // The stub carries no geometry yet but the whole frame path is callable.
    assert!(implementation.create_geometry_instance(1).is_none());
    let camera = CameraData { z_near: 0.05, z_far: 100.0, ..CameraData::default() };
    let frame = implementation.create_frame_data(&camera, &CameraData::default());
    assert_eq!(frame.camera.z_far, 100.0);
    assert_eq!(frame.prev_camera.projection, Mat4::IDENTITY);
    let mut buffers = implementation.create_render_buffers(2048, 2048, 2);
    assert_eq!(buffers.view_count, 2);
    implementation.render_scene(&frame, &mut buffers);
}

#[test]
fn duplicate_registration_is_a_fatal_configuration_error() {
    let mut registry = SceneImplementationRegistry::with_builtin().expect("builtin registration");
    let err = registry
        .register(CLUSTERED_RENDERER_NAME, "second copy", || Box::new(ClusteredRenderer::default()))
        .expect_err("duplicate name must be rejected");
    assert!(err.to_string().contains("already registered"), "got: {err}");
    // The first registration stays intact.
    assert_eq!(registry.description(CLUSTERED_RENDERER_NAME), Some("Clustered Vulkan scene renderer"));
}

#[test]
fn first_registration_becomes_the_default() {
    let mut registry = SceneImplementationRegistry::new();
    assert!(registry.create(None).is_none(), "empty registry has nothing to create");

    registry.register("forward", "Forward renderer", || Box::new(ClusteredRenderer::default())).unwrap();
    registry.register("mobile", "Mobile renderer", || Box::new(ClusteredRenderer::default())).unwrap();
    assert_eq!(registry.default_name(), Some("forward"));
    assert!(registry.create(None).is_some());
}

#[test]
fn unknown_name_yields_nothing_rather_than_the_default() {
    let registry = SceneImplementationRegistry::with_builtin().expect("builtin registration");
    assert!(registry.create(Some("path_traced")).is_none());
    assert!(registry.create(Some(CLUSTERED_RENDERER_NAME)).is_some());
}
