use crate::avatar::{Avatar, TrackingInput};
use crate::config::ShellConfig;
use crate::events::AddressedEvent;
use crate::surface::{Pose, Surface, SurfaceId};
use glam::{Quat, Vec2, Vec3};

/// The VR editor shell: an avatar plus the default dock layout mounted on
/// its HUD. Window content itself is rendered by the host editor; the shell
/// owns placement and interaction.
pub struct VrShell {
    config: ShellConfig,
    avatar: Avatar,
    next_surface: u32,
    left_dock: SurfaceId,
    right_dock: SurfaceId,
}

impl VrShell {
    pub fn new(config: &ShellConfig) -> Self {
        let mut shell = Self {
            config: config.clone(),
            avatar: Avatar::new(config),
            next_surface: 0,
            left_dock: SurfaceId(0),
            right_dock: SurfaceId(0),
        };

        let size = Vec2::new(config.docks.width, config.docks.height);
        let yaw = config.docks.yaw_degrees.to_radians();
        let lateral = config.docks.lateral_offset;
        shell.left_dock = shell
            .create_window(size, Pose::new(Vec3::new(-lateral, 0.0, 0.0), Quat::from_rotation_y(yaw)));
        shell.right_dock = shell
            .create_window(size, Pose::new(Vec3::new(lateral, 0.0, 0.0), Quat::from_rotation_y(-yaw)));
        shell
    }

    /// Mounts a new window on the HUD at `local`, relative to the HUD root.
    pub fn create_window(&mut self, content_size: Vec2, local: Pose) -> SurfaceId {
        let id = SurfaceId(self.next_surface);
        self.next_surface += 1;
        let surface = Surface::new(id, content_size, self.config.interaction.viewport_scale)
            .with_press_distance(self.config.interaction.press_distance);
        self.avatar.mount_window(surface, local);
        id
    }

    pub fn close_window(&mut self, id: SurfaceId) -> bool {
        self.avatar.unmount_window(id).is_some()
    }

    pub fn left_dock(&self) -> SurfaceId {
        self.left_dock
    }

    pub fn right_dock(&self) -> SurfaceId {
        self.right_dock
    }

    pub fn avatar(&self) -> &Avatar {
        &self.avatar
    }

    pub fn avatar_mut(&mut self) -> &mut Avatar {
        &mut self.avatar
    }

    pub fn forward_key(&mut self, id: SurfaceId, keycode: u32, pressed: bool) {
        self.avatar.forward_key(id, keycode, pressed);
    }

    pub fn tick(&mut self, input: &TrackingInput, delta: f32) -> Vec<AddressedEvent> {
        self.avatar.tick(input, delta)
    }
}
