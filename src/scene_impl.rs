use anyhow::{bail, Result};
use glam::{Mat4, Vec2, Vec3};
use std::collections::HashMap;

pub const MAX_RENDER_VIEWS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryInstanceId(pub u64);

/// Camera and projection info for one rendered view set.
#[derive(Debug, Clone, Copy)]
pub struct CameraData {
    pub transform: Mat4,
    pub projection: Mat4,
    pub z_near: f32,
    pub z_far: f32,
    pub orthogonal: bool,
    pub view_count: u32,
    pub taa_jitter: Vec2,
    pub view_eye_offset: [Vec3; MAX_RENDER_VIEWS],
    pub view_projection: [Mat4; MAX_RENDER_VIEWS],
}

impl Default for CameraData {
    fn default() -> Self {
        Self {
            transform: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            z_near: 0.0,
            z_far: 0.0,
            orthogonal: false,
            view_count: 1,
            taa_jitter: Vec2::ZERO,
            view_eye_offset: [Vec3::ZERO; MAX_RENDER_VIEWS],
            view_projection: [Mat4::IDENTITY; MAX_RENDER_VIEWS],
        }
    }
}

/// One frame's snapshot of camera/view data, current and previous frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameData {
    pub camera: CameraData,
    pub prev_camera: CameraData,
}

/// Render-target buffer set an implementation renders into.
#[derive(Debug, Clone, Copy)]
pub struct RenderBuffers {
    pub width: u32,
    pub height: u32,
    pub view_count: u32,
}

/// Per-object render state owned by an implementation.
pub trait GeometryInstance {
    fn set_transform(&mut self, transform: Mat4);
    fn set_layer_mask(&mut self, mask: u32);
    fn set_transparency(&mut self, transparency: f32);
}

/// A pluggable scene-rendering implementation. The engine bootstrap picks one
/// by name from the registry and drives it once per frame.
pub trait SceneImplementation {
    fn init(&mut self) -> Result<()>;

    fn create_geometry_instance(&mut self, base: u64) -> Option<GeometryInstanceId>;
    fn geometry_instance_mut(&mut self, id: GeometryInstanceId) -> Option<&mut dyn GeometryInstance>;

    fn create_frame_data(&self, camera: &CameraData, prev_camera: &CameraData) -> FrameData;
    fn create_render_buffers(&self, width: u32, height: u32, view_count: u32) -> RenderBuffers;

    fn render_scene(&mut self, frame: &FrameData, buffers: &mut RenderBuffers);
}

pub type SceneImplementationFactory = fn() -> Box<dyn SceneImplementation>;

struct RegistryEntry {
    description: String,
    factory: SceneImplementationFactory,
}

/// Named factories for scene implementations. The first registration becomes
/// the default; registering a name twice is a configuration error the
/// bootstrap treats as fatal.
#[derive(Default)]
pub struct SceneImplementationRegistry {
    implementations: HashMap<String, RegistryEntry>,
    default_name: Option<String>,
}

impl SceneImplementationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the implementations this crate ships.
    pub fn with_builtin() -> Result<Self> {
        let mut registry = Self::new();
        registry.register(CLUSTERED_RENDERER_NAME, "Clustered Vulkan scene renderer", || {
            Box::new(ClusteredRenderer::default())
        })?;
        Ok(registry)
    }

    pub fn register(
        &mut self,
        name: &str,
        description: &str,
        factory: SceneImplementationFactory,
    ) -> Result<()> {
        if self.implementations.contains_key(name) {
            bail!("Scene implementation '{name}' already registered");
        }
        self.implementations
            .insert(name.to_string(), RegistryEntry { description: description.to_string(), factory });
        eprintln!("[render] registered scene implementation '{name}'");
        if self.default_name.is_none() {
            self.default_name = Some(name.to_string());
        }
        Ok(())
    }

    /// Instantiates the named implementation, or the default when no name is
    /// given. Unknown names yield nothing rather than the default.
    pub fn create(&self, name: Option<&str>) -> Option<Box<dyn SceneImplementation>> {
        let key = name.or(self.default_name.as_deref())?;
        self.implementations.get(key).map(|entry| (entry.factory)())
    }

    pub fn default_name(&self) -> Option<&str> {
        self.default_name.as_deref()
    }

    pub fn description(&self, name: &str) -> Option<&str> {
        self.implementations.get(name).map(|entry| entry.description.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.implementations.keys().map(|name| name.as_str())
    }
}

pub const CLUSTERED_RENDERER_NAME: &str = "clustered";

/// Clustered scene renderer. Registration skeleton only; the rendering hooks
/// are not implemented yet.
#[derive(Default)]
pub struct ClusteredRenderer;

impl SceneImplementation for ClusteredRenderer {
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    fn create_geometry_instance(&mut self, _base: u64) -> Option<GeometryInstanceId> {
        // TODO implement once geometry storage lands
        None
    }

    fn geometry_instance_mut(&mut self, _id: GeometryInstanceId) -> Option<&mut dyn GeometryInstance> {
        None
    }

    fn create_frame_data(&self, camera: &CameraData, prev_camera: &CameraData) -> FrameData {
        FrameData { camera: *camera, prev_camera: *prev_camera }
    }

    fn create_render_buffers(&self, width: u32, height: u32, view_count: u32) -> RenderBuffers {
        RenderBuffers { width, height, view_count }
    }

    fn render_scene(&mut self, _frame: &FrameData, _buffers: &mut RenderBuffers) {}
}
