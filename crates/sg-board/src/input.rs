//! Pointer input normalization.
//!
//! The embedding shell sees heterogeneous events: mouse events carry client
//! coordinates directly, touch events carry them on the first touch point,
//! and either may be absent. [`normalize`] folds both shapes into a single
//! canvas-local [`InputEvent`]; events carrying neither are logged and
//! dropped without touching any state.

/// A normalized pointer event in canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    PointerUp { x: f32, y: f32 },
}

/// Which phase of a pointer gesture a raw event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

/// A raw pointer sample as delivered by the shell, before normalization.
/// Coordinates are in client space; at most one of `mouse` / `touch` is
/// expected to be set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawPointer {
    pub phase: PointerPhase,
    pub mouse: Option<(f32, f32)>,
    pub touch: Option<(f32, f32)>,
}

/// Normalize a raw pointer sample against the canvas origin (the top-left
/// of the canvas in client space). Returns `None` for events with neither
/// mouse nor touch coordinates.
pub fn normalize(raw: &RawPointer, origin: (f32, f32)) -> Option<InputEvent> {
    let (cx, cy) = match raw.mouse.or(raw.touch) {
        Some(p) => p,
        None => {
            log::warn!("pointer event with no mouse or touch coordinates ignored");
            return None;
        }
    };
    let x = cx - origin.0;
    let y = cy - origin.1;
    Some(match raw.phase {
        PointerPhase::Down => InputEvent::PointerDown { x, y },
        PointerPhase::Move => InputEvent::PointerMove { x, y },
        PointerPhase::Up => InputEvent::PointerUp { x, y },
    })
}
