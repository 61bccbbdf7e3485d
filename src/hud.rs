use crate::surface::Pose;
use glam::{Mat3, Quat, Vec3};

pub(crate) const HUD_MIN_HEIGHT: f32 = 0.5;
pub(crate) const HUD_START_MOVING_DISTANCE: f32 = 0.2;
pub(crate) const HUD_STOP_MOVING_DISTANCE: f32 = 0.01;
pub(crate) const HUD_START_CENTERING_DOT: f32 = 0.0;
pub(crate) const HUD_STOP_CENTERING_DOT: f32 = 0.99;

/// Hardware-reported pose quality. The HUD only distinguishes none from
/// not-none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingConfidence {
    None,
    Limited,
    High,
}

/// Outcome of the per-tick confidence gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingGate {
    /// No confidence: leave everything exactly where it is.
    Frozen,
    /// First tick after re-acquisition: reposition without smoothing.
    Resumed,
    Tracking,
}

/// Edge detector over the tracking confidence signal. The user is likely not
/// wearing the headset while confidence is none; the first tracked tick after
/// that snaps the HUD instead of easing it across the room.
#[derive(Debug, Default)]
pub struct TrackingGuard {
    tracking: bool,
}

impl TrackingGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    pub fn gate(&mut self, confidence: TrackingConfidence) -> TrackingGate {
        if confidence == TrackingConfidence::None {
            self.tracking = false;
            TrackingGate::Frozen
        } else if !self.tracking {
            self.tracking = true;
            TrackingGate::Resumed
        } else {
            TrackingGate::Tracking
        }
    }
}

/// Keeps the HUD pivot trailing the head: position clamped to a minimum
/// height, orientation flattened to yaw. Two hysteresis channels (moving,
/// centering) keep the HUD still while the head hovers near the anchor,
/// which prevents motion sickness from a HUD that chases every small
/// head movement.
#[derive(Debug)]
pub struct HudFollower {
    pivot: Pose,
    vertical_offset: f32,
    moving: bool,
    centering: bool,
}

impl HudFollower {
    pub fn new(eye_height: f32, vertical_offset: f32) -> Self {
        // Eye height is assumed until tracking tells us better.
        Self {
            pivot: Pose::from_position(Vec3::new(0.0, eye_height + vertical_offset, 0.0)),
            vertical_offset,
            moving: true,
            centering: true,
        }
    }

    pub fn pivot(&self) -> Pose {
        self.pivot
    }

    pub fn vertical_offset(&self) -> f32 {
        self.vertical_offset
    }

    pub fn set_vertical_offset(&mut self, offset: f32) {
        self.vertical_offset = offset;
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn is_centering(&self) -> bool {
        self.centering
    }

    /// Advances the pivot toward the head-relative anchor. Returns true when
    /// the pivot transform changed this tick.
    pub fn update(&mut self, head: &Pose, gate: TrackingGate, delta: f32) -> bool {
        if gate == TrackingGate::Frozen {
            return false;
        }

        let mut desired_position = head.position;
        desired_position.y = HUD_MIN_HEIGHT.max(head.position.y + self.vertical_offset);

        // Yaw-only facing: project the head's back axis onto the horizontal
        // plane. Degenerate when looking straight up or down; keep the
        // current facing in that case.
        let mut flat = head.rotation * Vec3::Z;
        flat.y = 0.0;
        let desired_forward = if flat.length_squared() > f32::EPSILON {
            flat.normalize()
        } else {
            (self.pivot.rotation * Vec3::Z).normalize()
        };

        if gate == TrackingGate::Resumed {
            let right = Vec3::Y.cross(desired_forward).normalize();
            self.pivot.position = desired_position;
            self.pivot.rotation = Quat::from_mat3(&Mat3::from_cols(right, Vec3::Y, desired_forward));
            self.moving = false;
            self.centering = false;
            return true;
        }

        let mut changed = false;

        // Start moving once the anchor drifts past the outer threshold, keep
        // moving until we settle inside the inner one.
        let distance = self.pivot.position.distance(desired_position);
        let move_threshold =
            if self.moving { HUD_STOP_MOVING_DISTANCE } else { HUD_START_MOVING_DISTANCE };
        if distance > move_threshold {
            self.pivot.position = self.pivot.position.lerp(desired_position, delta);
            self.moving = true;
            changed = true;
        } else {
            self.moving = false;
        }

        let hud_forward = (self.pivot.rotation * Vec3::Z).normalize();
        let dot = desired_forward.dot(hud_forward).clamp(-1.0, 1.0);
        let center_threshold =
            if self.centering { HUD_STOP_CENTERING_DOT } else { HUD_START_CENTERING_DOT };
        if dot < center_threshold {
            let cross = desired_forward.cross(hud_forward);
            let axis = if cross.y > 0.0 { Vec3::NEG_Y } else { Vec3::Y };
            self.pivot.rotation = Quat::from_axis_angle(axis, delta * dot.acos()) * self.pivot.rotation;
            self.centering = true;
            changed = true;
        } else {
            self.centering = false;
        }

        if changed {
            // Keep the basis orthonormal; incremental rotations drift.
            self.pivot.rotation = self.pivot.rotation.normalize();
        }
        changed
    }
}
