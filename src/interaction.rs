use crate::events::{ButtonMask, SurfaceEvent, SurfaceEventQueue};
use crate::surface::Surface;
use glam::{Vec2, Vec3};

/// One tracked pointer's pose for a tick. A zero direction disables the ray
/// and leaves the pointer poke-only.
#[derive(Debug, Clone, Copy)]
pub struct PointerSample {
    pub origin: Vec3,
    pub direction: Vec3,
    pub select: bool,
}

impl PointerSample {
    pub fn poke_only(origin: Vec3, select: bool) -> Self {
        Self { origin, direction: Vec3::ZERO, select }
    }
}

/// Tests one pointer against one surface and synthesizes mouse-style events
/// into `events`. Returns true when the pointer made contact this call, hit
/// or press, so the caller stops offering this pointer to later surfaces.
///
/// Whichever pointer presses the surface first wins; contact from any other
/// pointer is invisible to the surface until the holder releases.
pub fn ray_and_poke(
    surface: &mut Surface,
    pointer: usize,
    sample: &PointerSample,
    events: &mut SurfaceEventQueue,
) -> bool {
    let mut pos = Vec2::ZERO;
    let mut ray_hit = false;
    let mut pressed = false;

    if sample.direction != Vec3::ZERO {
        if let Some(point) = surface.intersect_ray(sample.origin, sample.direction) {
            let local = surface.pose.inverse_transform_point(point);
            let candidate = surface.content_from_local(local.truncate());
            if surface.contains(candidate) {
                pos = candidate;
                ray_hit = true;
                pressed = sample.select;
            }
        }
    }

    // Near-field poke, independent of the ray. Depth is unsigned: touching
    // from behind counts, the finger may have gone through the screen.
    let local_origin = surface.pose.inverse_transform_point(sample.origin);
    let depth = local_origin.z.abs();
    if depth < surface.press_distance {
        let candidate = surface.content_from_local(local_origin.truncate());
        if surface.contains(candidate) {
            // Poke takes precedence over the ray.
            pos = candidate;
            pressed = true;
        }
    }

    if pressed || ray_hit {
        if (pressed && surface.latched_pointer == Some(pointer))
            || (!pressed && surface.latched_pointer.is_none())
        {
            if pos != surface.last_pointer_pos {
                let relative = pos - surface.last_pointer_pos;
                let pressure =
                    ((surface.press_distance - depth) / surface.press_distance).clamp(0.0, 1.0);
                let buttons = if pressed { ButtonMask::PRIMARY } else { ButtonMask::empty() };
                events.push(surface.id, SurfaceEvent::Motion { position: pos, relative, pressure, buttons });
                surface.last_pointer_pos = pos;
            }
        } else if pressed && surface.latched_pointer.is_none() {
            surface.latched_pointer = Some(pointer);
            surface.last_pointer_pos = pos;
            events.push(surface.id, SurfaceEvent::Press { position: pos, buttons: ButtonMask::PRIMARY });
        } else if !pressed && surface.latched_pointer == Some(pointer) {
            surface.latched_pointer = None;
            surface.last_pointer_pos = pos;
            events.push(surface.id, SurfaceEvent::Release { position: pos, buttons: ButtonMask::empty() });
        }

        // Handled even without movement: the pointer is close enough to the
        // surface to claim it for this tick.
        return true;
    }

    if surface.latched_pointer == Some(pointer) {
        // The latch holder left the surface entirely; release at the last
        // known position.
        let position = surface.last_pointer_pos;
        events.push(surface.id, SurfaceEvent::Release { position, buttons: ButtonMask::empty() });
        surface.latched_pointer = None;
    }

    false
}

/// Walks every pointer over the surfaces in fixed priority order. The first
/// surface that reports contact claims the pointer for the tick; overlapping
/// surfaces are not ranked by distance, earlier in the list wins.
pub fn dispatch_pointers(
    pointers: &[PointerSample],
    surfaces: &mut [Surface],
    events: &mut SurfaceEventQueue,
) {
    for (index, sample) in pointers.iter().enumerate() {
        for surface in surfaces.iter_mut() {
            if ray_and_poke(surface, index, sample, events) {
                break;
            }
        }
    }
}
