use glam::{Quat, Vec2, Vec3};

pub(crate) const DEFAULT_VIEWPORT_SCALE: f32 = 0.00075;
pub(crate) const DEFAULT_PRESS_DISTANCE: f32 = 0.01;

const PLANE_EPSILON: f32 = 1e-8;

/// Position plus orientation, the transform unit for everything in the shell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Pose {
    pub const IDENTITY: Self = Self { position: Vec3::ZERO, rotation: Quat::IDENTITY };

    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self { position, rotation: Quat::IDENTITY }
    }

    /// Forward axis, the negated third basis column.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.rotation * point + self.position
    }

    pub fn inverse_transform_point(&self, point: Vec3) -> Vec3 {
        self.rotation.inverse() * (point - self.position)
    }
}

impl std::ops::Mul for Pose {
    type Output = Pose;

    fn mul(self, rhs: Pose) -> Pose {
        Pose { position: self.rotation * rhs.position + self.position, rotation: self.rotation * rhs.rotation }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub u32);

/// One interactive UI surface mounted in 3D space.
///
/// The mounting layer owns `pose`; the surface owns its content size and the
/// 3D-to-2D scale. Ray and poke tests share the plane defined by the pose.
pub struct Surface {
    pub id: SurfaceId,
    pub pose: Pose,
    /// Logical content size in content units (width, height).
    pub content_size: Vec2,
    /// World meters per content unit.
    pub viewport_scale: f32,
    /// Distance from the plane at which a fingertip counts as pressing.
    pub press_distance: f32,
    pub(crate) latched_pointer: Option<usize>,
    pub(crate) last_pointer_pos: Vec2,
}

impl Surface {
    pub fn new(id: SurfaceId, content_size: Vec2, viewport_scale: f32) -> Self {
        Self {
            id,
            pose: Pose::IDENTITY,
            content_size,
            viewport_scale,
            press_distance: DEFAULT_PRESS_DISTANCE,
            latched_pointer: None,
            last_pointer_pos: Vec2::ZERO,
        }
    }

    pub fn with_press_distance(mut self, press_distance: f32) -> Self {
        self.press_distance = press_distance;
        self
    }

    /// Pointer index currently holding this surface's press latch, if any.
    pub fn latched_pointer(&self) -> Option<usize> {
        self.latched_pointer
    }

    pub fn last_pointer_position(&self) -> Vec2 {
        self.last_pointer_pos
    }

    /// Intersects a ray with the surface plane. Hits from either side count;
    /// the user may just as well poke the ray through the back of the screen.
    pub fn intersect_ray(&self, origin: Vec3, direction: Vec3) -> Option<Vec3> {
        let normal = self.pose.forward();
        let denom = normal.dot(direction);
        if denom.abs() < PLANE_EPSILON {
            return None;
        }
        let t = normal.dot(self.pose.position - origin) / denom;
        if t < 0.0 {
            return None;
        }
        Some(origin + direction * t)
    }

    /// Maps a plane-local position to content coordinates. Local up maps to
    /// content down.
    pub fn content_from_local(&self, local: Vec2) -> Vec2 {
        Vec2::new(
            0.5 * self.content_size.x + local.x / self.viewport_scale,
            0.5 * self.content_size.y - local.y / self.viewport_scale,
        )
    }

    /// Content bounds are half-open: the far edge itself is outside.
    pub fn contains(&self, content: Vec2) -> bool {
        content.x >= 0.0 && content.x < self.content_size.x && content.y >= 0.0 && content.y < self.content_size.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pose_composition_applies_parent_rotation() {
        let parent = Pose::new(Vec3::new(0.0, 1.0, 0.0), Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
        let child = Pose::from_position(Vec3::new(0.0, 0.0, -2.0));
        let composed = parent * child;
        assert!(composed.position.distance(Vec3::new(-2.0, 1.0, 0.0)) < 1e-5);
    }

    #[test]
    fn inverse_transform_round_trips() {
        let pose = Pose::new(Vec3::new(1.0, 2.0, 3.0), Quat::from_rotation_y(0.7));
        let point = Vec3::new(-0.4, 0.9, 2.2);
        let round = pose.transform_point(pose.inverse_transform_point(point));
        assert!(round.distance(point) < 1e-5);
    }

    #[test]
    fn ray_hits_plane_from_both_sides() {
        let surface = Surface::new(SurfaceId(0), Vec2::new(1000.0, 1000.0), 0.001);
        let front = surface.intersect_ray(Vec3::new(0.1, 0.1, 1.0), Vec3::NEG_Z);
        assert!(front.is_some());
        let back = surface.intersect_ray(Vec3::new(0.1, 0.1, -1.0), Vec3::Z);
        assert!(back.is_some());
        let away = surface.intersect_ray(Vec3::new(0.1, 0.1, 1.0), Vec3::Z);
        assert!(away.is_none());
    }

    #[test]
    fn parallel_ray_misses() {
        let surface = Surface::new(SurfaceId(0), Vec2::new(100.0, 100.0), 0.001);
        assert!(surface.intersect_ray(Vec3::new(0.0, 0.0, 1.0), Vec3::X).is_none());
    }

    #[test]
    fn content_mapping_flips_y() {
        let surface = Surface::new(SurfaceId(0), Vec2::new(1152.0, 648.0), 0.002);
        let center = surface.content_from_local(Vec2::ZERO);
        assert_eq!(center, Vec2::new(576.0, 324.0));
        let top_left = surface.content_from_local(Vec2::new(-1.152, 0.648));
        assert!(top_left.distance(Vec2::new(0.0, 0.0)) < 1e-2, "got {top_left:?}");
        let bottom_right = surface.content_from_local(Vec2::new(1.152, -0.648));
        assert!(bottom_right.distance(Vec2::new(1152.0, 648.0)) < 1e-2, "got {bottom_right:?}");
    }

    #[test]
    fn content_bounds_are_half_open() {
        let surface = Surface::new(SurfaceId(0), Vec2::new(1152.0, 648.0), 0.002);
        assert!(surface.contains(Vec2::new(0.0, 0.0)));
        assert!(surface.contains(Vec2::new(1151.9, 647.9)));
        assert!(!surface.contains(Vec2::new(1152.0, 647.9)), "width itself is outside");
        assert!(!surface.contains(Vec2::new(1151.9, 648.0)), "height itself is outside");
        assert!(!surface.contains(Vec2::new(-0.1, 100.0)));
    }
}
