use crate::config::ShellConfig;
use crate::events::{AddressedEvent, SurfaceEvent, SurfaceEventQueue};
use crate::hud::{HudFollower, TrackingConfidence, TrackingGuard};
use crate::interaction::{dispatch_pointers, PointerSample};
use crate::surface::{Pose, Surface, SurfaceId};
use crate::time::DeltaHistory;
use glam::Vec3;

pub const HAND_COUNT: usize = 2;

/// Poke tip rides slightly in front of the grip pose.
const POKE_TIP_OFFSET: Vec3 = Vec3::new(0.0, 0.0, -0.01);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandSide {
    Left,
    Right,
}

impl HandSide {
    pub fn index(self) -> usize {
        match self {
            HandSide::Left => 0,
            HandSide::Right => 1,
        }
    }
}

/// One hand's tracked state for a tick.
#[derive(Debug, Clone, Copy)]
pub struct HandInput {
    pub pose: Pose,
    pub select: bool,
}

impl HandInput {
    pub fn idle() -> Self {
        Self { pose: Pose::IDENTITY, select: false }
    }
}

/// Everything the avatar consumes from the XR layer in one tick, passed in
/// explicitly so a test can drive the whole shell with synthetic sequences.
#[derive(Debug, Clone, Copy)]
pub struct TrackingInput {
    pub head: Pose,
    pub confidence: TrackingConfidence,
    pub hands: [HandInput; HAND_COUNT],
}

#[derive(Debug)]
struct Hand {
    side: HandSide,
    select_was: bool,
}

/// The player's presence in the editor space: two hands driving pointers, a
/// head-following HUD pivot, and the windows mounted on it.
///
/// Window world transforms are recomputed from the pivot before pointer
/// resolution, so ray and poke tests never see a stale HUD frame.
pub struct Avatar {
    guard: TrackingGuard,
    hud: HudFollower,
    hud_distance: f32,
    hands: [Hand; HAND_COUNT],
    ray_hand: HandSide,
    surfaces: Vec<Surface>,
    window_locals: Vec<Pose>,
    events: SurfaceEventQueue,
    perf: DeltaHistory,
    show_performance_info: bool,
}

impl Avatar {
    pub fn new(config: &ShellConfig) -> Self {
        Self {
            guard: TrackingGuard::new(),
            hud: HudFollower::new(config.hud.eye_height, config.hud.vertical_offset),
            hud_distance: config.hud.distance,
            hands: [
                Hand { side: HandSide::Left, select_was: false },
                Hand { side: HandSide::Right, select_was: false },
            ],
            ray_hand: HandSide::Right,
            surfaces: Vec::new(),
            window_locals: Vec::new(),
            events: SurfaceEventQueue::new(),
            perf: DeltaHistory::new(),
            show_performance_info: config.show_performance_info,
        }
    }

    pub fn hud_pivot(&self) -> Pose {
        self.hud.pivot()
    }

    pub fn hud_distance(&self) -> f32 {
        self.hud_distance
    }

    pub fn set_hud_distance(&mut self, distance: f32) {
        self.hud_distance = distance;
    }

    pub fn hud_offset(&self) -> f32 {
        self.hud.vertical_offset()
    }

    pub fn set_hud_offset(&mut self, offset: f32) {
        self.hud.set_vertical_offset(offset);
    }

    pub fn ray_hand(&self) -> HandSide {
        self.ray_hand
    }

    pub fn set_ray_hand(&mut self, side: HandSide) {
        self.ray_hand = side;
    }

    pub fn mount_window(&mut self, surface: Surface, local: Pose) {
        if self.surfaces.iter().any(|existing| existing.id == surface.id) {
            eprintln!("[avatar] window {} already mounted, ignoring.", surface.id.0);
            return;
        }
        self.surfaces.push(surface);
        self.window_locals.push(local);
    }

    pub fn unmount_window(&mut self, id: SurfaceId) -> Option<Surface> {
        let index = match self.surfaces.iter().position(|surface| surface.id == id) {
            Some(index) => index,
            None => {
                eprintln!("[avatar] window {} is not mounted, ignoring.", id.0);
                return None;
            }
        };
        self.window_locals.remove(index);
        Some(self.surfaces.remove(index))
    }

    pub fn surface(&self, id: SurfaceId) -> Option<&Surface> {
        self.surfaces.iter().find(|surface| surface.id == id)
    }

    pub fn window_count(&self) -> usize {
        self.surfaces.len()
    }

    /// Forwards a key event straight to a window's content, bypassing the
    /// pointer pipeline.
    pub fn forward_key(&mut self, id: SurfaceId, keycode: u32, pressed: bool) {
        if self.surfaces.iter().all(|surface| surface.id != id) {
            eprintln!("[avatar] window {} is not mounted, dropping key event.", id.0);
            return;
        }
        self.events.push(id, SurfaceEvent::Key { keycode, pressed });
    }

    pub fn performance_fps(&self) -> Option<f32> {
        self.show_performance_info.then(|| self.perf.fps())
    }

    /// One simulation tick: resolve the HUD transform first, then walk the
    /// pointers over the windows and return whatever events they synthesized.
    pub fn tick(&mut self, input: &TrackingInput, delta: f32) -> Vec<AddressedEvent> {
        // The ray follows whichever hand last pressed select.
        for (index, hand) in self.hands.iter_mut().enumerate() {
            let select = input.hands[index].select;
            if select && !hand.select_was {
                self.ray_hand = hand.side;
            }
            hand.select_was = select;
        }

        let gate = self.guard.gate(input.confidence);
        self.hud.update(&input.head, gate, delta);

        let root = self.hud.pivot() * Pose::from_position(Vec3::new(0.0, 0.0, -self.hud_distance));
        for (surface, local) in self.surfaces.iter_mut().zip(self.window_locals.iter()) {
            surface.pose = root * *local;
        }

        let pointers = self.pointer_samples(input);
        dispatch_pointers(&pointers, &mut self.surfaces, &mut self.events);

        self.perf.push(delta);
        self.events.drain()
    }

    fn pointer_samples(&self, input: &TrackingInput) -> [PointerSample; HAND_COUNT] {
        std::array::from_fn(|index| {
            let tip = input.hands[index].pose * Pose::from_position(POKE_TIP_OFFSET);
            let direction =
                if self.ray_hand == self.hands[index].side { tip.forward() } else { Vec3::ZERO };
            PointerSample { origin: tip.position, direction, select: input.hands[index].select }
        })
    }
}
