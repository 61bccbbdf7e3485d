use crate::surface::SurfaceId;
use bitflags::bitflags;
use glam::Vec2;
use smallvec::SmallVec;
use std::fmt;

bitflags! {
    /// Button state carried on synthesized pointer events. The shell emulates
    /// a single button mouse.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ButtonMask: u8 {
        const PRIMARY = 1 << 0;
    }
}

/// Event synthesized against one surface's content coordinate space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceEvent {
    Motion { position: Vec2, relative: Vec2, pressure: f32, buttons: ButtonMask },
    Press { position: Vec2, buttons: ButtonMask },
    Release { position: Vec2, buttons: ButtonMask },
    /// Text input forwarded verbatim, bypassing the pointer pipeline.
    Key { keycode: u32, pressed: bool },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AddressedEvent {
    pub surface: SurfaceId,
    pub event: SurfaceEvent,
}

impl fmt::Display for SurfaceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceEvent::Motion { position, relative, pressure, buttons } => write!(
                f,
                "Motion pos=({:.1},{:.1}) rel=({:.1},{:.1}) pressure={:.3} buttons={:#04b}",
                position.x, position.y, relative.x, relative.y, pressure, buttons.bits()
            ),
            SurfaceEvent::Press { position, buttons } => {
                write!(f, "Press pos=({:.1},{:.1}) buttons={:#04b}", position.x, position.y, buttons.bits())
            }
            SurfaceEvent::Release { position, buttons } => {
                write!(f, "Release pos=({:.1},{:.1}) buttons={:#04b}", position.x, position.y, buttons.bits())
            }
            SurfaceEvent::Key { keycode, pressed } => {
                write!(f, "Key keycode={keycode} pressed={pressed}")
            }
        }
    }
}

impl fmt::Display for AddressedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface={} {}", self.surface.0, self.event)
    }
}

/// Per-tick event queue. Producers push during the tick pass; the single
/// consumer drains once the tick is resolved.
#[derive(Default)]
pub struct SurfaceEventQueue {
    events: SmallVec<[AddressedEvent; 16]>,
}

impl SurfaceEventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, surface: SurfaceId, event: SurfaceEvent) {
        self.events.push(AddressedEvent { surface, event });
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn drain(&mut self) -> Vec<AddressedEvent> {
        self.events.drain(..).collect()
    }
}
