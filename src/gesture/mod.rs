//! Drag and resize gestures
//!
//! Each window carries its own gesture state (`idle -> dragging/resizing ->
//! idle`). Updates are computed from the baseline captured at `begin_*`, so
//! replaying the same pointer position any number of times lands on the same
//! geometry.

mod resize;

pub use resize::{resize_geometry, ResizeAnchor};

use serde::Serialize;
use tracing::debug;

use crate::geometry::{clamp_position, Geometry, Position, Size};
use crate::window::WindowRecord;

/// Pointer location in container coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Pointer {
    pub x: i32,
    pub y: i32,
}

impl Pointer {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Delta from `origin` to this pointer
    pub fn delta_from(&self, origin: Pointer) -> (i32, i32) {
        (
            self.x.saturating_sub(origin.x),
            self.y.saturating_sub(origin.y),
        )
    }
}

/// Baseline of a drag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DragData {
    pub pointer_start: Pointer,
    pub initial_position: Position,
}

/// Baseline of a resize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResizeData {
    pub anchor: ResizeAnchor,
    pub pointer_start: Pointer,
    pub initial_geometry: Geometry,
}

/// State of the gesture on one window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum GestureState {
    /// No gesture in progress
    #[default]
    Idle,
    /// The window follows the pointer
    Dragging(DragData),
    /// One edge or corner follows the pointer
    Resizing(ResizeData),
}

impl GestureState {
    pub fn is_idle(&self) -> bool {
        matches!(self, GestureState::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, GestureState::Dragging(_))
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self, GestureState::Resizing(_))
    }
}

/// Gestures are refused on maximized or minimized windows
pub(crate) fn accepts_gesture(window: &WindowRecord) -> bool {
    !window.is_maximized && !window.is_minimized
}

/// Record the drag baseline. Returns false when the window refuses gestures.
pub(crate) fn begin_drag(window: &mut WindowRecord, pointer: Pointer) -> bool {
    if !accepts_gesture(window) {
        return false;
    }
    window.gesture = GestureState::Dragging(DragData {
        pointer_start: pointer,
        initial_position: window.geometry.position(),
    });
    debug!("Drag started on {} at {pointer:?}", window.id);
    true
}

/// Move the window to follow `pointer`. Returns the old and new position when
/// the geometry changed.
pub(crate) fn update_drag(
    window: &mut WindowRecord,
    pointer: Pointer,
    container: Size,
) -> Option<(Position, Position)> {
    let GestureState::Dragging(data) = window.gesture else {
        return None;
    };
    let (dx, dy) = pointer.delta_from(data.pointer_start);
    let candidate = data.initial_position.offset(dx, dy);
    let next = clamp_position(container, window.geometry.size(), candidate);

    let previous = window.geometry.position();
    if previous == next {
        return None;
    }
    window.geometry = Geometry::from_parts(next, window.geometry.size());
    Some((previous, next))
}

/// Leave the dragging state; geometry is untouched
pub(crate) fn end_drag(window: &mut WindowRecord) -> bool {
    if window.gesture.is_dragging() {
        window.gesture = GestureState::Idle;
        debug!("Drag ended on {} at {}", window.id, window.geometry);
        true
    } else {
        false
    }
}

/// Record the resize baseline. Returns false when the window refuses gestures.
pub(crate) fn begin_resize(window: &mut WindowRecord, anchor: ResizeAnchor, pointer: Pointer) -> bool {
    if !accepts_gesture(window) || !anchor.is_valid() {
        return false;
    }
    window.gesture = GestureState::Resizing(ResizeData {
        anchor,
        pointer_start: pointer,
        initial_geometry: window.geometry,
    });
    debug!("Resize ({anchor}) started on {} at {pointer:?}", window.id);
    true
}

/// Resize the window so the anchored edges follow `pointer`. Returns the old
/// and new geometry when it changed.
pub(crate) fn update_resize(
    window: &mut WindowRecord,
    pointer: Pointer,
    container: Size,
) -> Option<(Geometry, Geometry)> {
    let GestureState::Resizing(data) = window.gesture else {
        return None;
    };
    let (dx, dy) = pointer.delta_from(data.pointer_start);
    let next = resize_geometry(
        data.initial_geometry,
        data.anchor,
        dx,
        dy,
        container,
        window.min_size,
    );

    let previous = window.geometry;
    if previous == next {
        return None;
    }
    window.geometry = next;
    Some((previous, next))
}

/// Leave the resizing state
pub(crate) fn end_resize(window: &mut WindowRecord) -> bool {
    if window.gesture.is_resizing() {
        window.gesture = GestureState::Idle;
        debug!("Resize ended on {} at {}", window.id, window.geometry);
        true
    } else {
        false
    }
}

/// Abort whatever gesture is running
pub(crate) fn cancel(window: &mut WindowRecord) {
    if !window.gesture.is_idle() {
        debug!("Cancelled gesture on {}", window.id);
        window.gesture = GestureState::Idle;
    }
}
