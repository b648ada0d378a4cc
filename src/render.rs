//! Render seam
//!
//! The engine never draws. After each mutating call the manager diffs the
//! registry against what it last pushed and forwards only the changes to a
//! [`RenderSink`].

use std::collections::HashMap;

use crate::geometry::Geometry;
use crate::window::{WindowId, WindowRecord};

/// Receiver of geometry, stacking and focus updates
pub trait RenderSink {
    fn apply_geometry(&mut self, window_id: WindowId, geometry: Geometry);

    fn apply_z_index(&mut self, window_id: WindowId, z_index: u32);

    fn apply_focus_visual(&mut self, window_id: WindowId, focused: bool);

    /// Minimized windows are hidden, restored ones shown again
    fn apply_visibility(&mut self, _window_id: WindowId, _visible: bool) {}

    /// The window is gone; drop whatever was kept for it
    fn window_removed(&mut self, _window_id: WindowId) {}
}

/// Sink that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl RenderSink for NullRenderer {
    fn apply_geometry(&mut self, _window_id: WindowId, _geometry: Geometry) {}

    fn apply_z_index(&mut self, _window_id: WindowId, _z_index: u32) {}

    fn apply_focus_visual(&mut self, _window_id: WindowId, _focused: bool) {}
}

/// One call received by a [`RecordingRenderer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOp {
    Geometry(WindowId, Geometry),
    ZIndex(WindowId, u32),
    Focus(WindowId, bool),
    Visibility(WindowId, bool),
    Removed(WindowId),
}

impl RenderOp {
    pub fn window_id(&self) -> WindowId {
        match self {
            RenderOp::Geometry(id, _)
            | RenderOp::ZIndex(id, _)
            | RenderOp::Focus(id, _)
            | RenderOp::Visibility(id, _)
            | RenderOp::Removed(id) => *id,
        }
    }
}

/// Sink that keeps every call, for tests and debugging
#[derive(Debug, Default, Clone)]
pub struct RecordingRenderer {
    ops: Vec<RenderOp>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[RenderOp] {
        &self.ops
    }

    /// Take the recorded calls, leaving the log empty
    pub fn drain(&mut self) -> Vec<RenderOp> {
        std::mem::take(&mut self.ops)
    }
}

impl RenderSink for RecordingRenderer {
    fn apply_geometry(&mut self, window_id: WindowId, geometry: Geometry) {
        self.ops.push(RenderOp::Geometry(window_id, geometry));
    }

    fn apply_z_index(&mut self, window_id: WindowId, z_index: u32) {
        self.ops.push(RenderOp::ZIndex(window_id, z_index));
    }

    fn apply_focus_visual(&mut self, window_id: WindowId, focused: bool) {
        self.ops.push(RenderOp::Focus(window_id, focused));
    }

    fn apply_visibility(&mut self, window_id: WindowId, visible: bool) {
        self.ops.push(RenderOp::Visibility(window_id, visible));
    }

    fn window_removed(&mut self, window_id: WindowId) {
        self.ops.push(RenderOp::Removed(window_id));
    }
}

/// What the sink last received for one window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Applied {
    geometry: Geometry,
    z_index: u32,
    focused: bool,
    visible: bool,
}

/// Tracks pushed state and emits the difference on sync
#[derive(Debug, Default)]
pub(crate) struct RenderSync {
    applied: HashMap<WindowId, Applied>,
}

impl RenderSync {
    /// Push the changes of `windows` (in the given order) to `sink`
    pub(crate) fn sync<'a, R, I>(&mut self, sink: &mut R, windows: I) -> usize
    where
        R: RenderSink,
        I: IntoIterator<Item = &'a WindowRecord>,
    {
        let mut pushed = 0;
        for window in windows {
            let now = Applied {
                geometry: window.geometry(),
                z_index: window.z_index(),
                focused: window.is_focused(),
                visible: window.is_visible(),
            };
            let before = self.applied.insert(window.id(), now);
            let id = window.id();

            if before.map(|b| b.geometry) != Some(now.geometry) {
                sink.apply_geometry(id, now.geometry);
                pushed += 1;
            }
            if before.map(|b| b.z_index) != Some(now.z_index) {
                sink.apply_z_index(id, now.z_index);
                pushed += 1;
            }
            if before.map(|b| b.focused) != Some(now.focused) {
                sink.apply_focus_visual(id, now.focused);
                pushed += 1;
            }
            if before.map(|b| b.visible) != Some(now.visible) {
                sink.apply_visibility(id, now.visible);
                pushed += 1;
            }
        }
        pushed
    }

    /// Forget a removed window and tell the sink
    pub(crate) fn remove<R: RenderSink>(&mut self, sink: &mut R, window_id: WindowId) {
        if self.applied.remove(&window_id).is_some() {
            sink.window_removed(window_id);
        }
    }
}
