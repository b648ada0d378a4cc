//! Window bookkeeping for casement
//!
//! This module holds the window record and the components that maintain it:
//! the registry, the z-order allocator, the focus controller and the
//! manager facade that ties them to rendering and events.

mod consistency;
mod focus;
mod id;
mod manager;
mod registry;
mod zorder;

pub use consistency::{check_consistency, validate, ConsistencyError};
pub use focus::FocusController;
pub use id::{OwnerId, WindowId};
pub use manager::WindowManager;
pub use registry::WindowRegistry;
pub use zorder::ZOrderAllocator;

pub(crate) use id::IdAllocator;

use serde::Serialize;

use crate::geometry::{Geometry, Size, DEFAULT_MIN_SIZE};
use crate::gesture::GestureState;

/// The four reachable minimize/maximize states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WindowState {
    Normal,
    Minimized,
    Maximized,
    MinimizedWhileMaximized,
}

/// Per-window options accepted at registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowOptions {
    /// Display title, carried for renderers and logs
    pub title: Option<String>,
    /// Resize floor; falls back to the configured minimum
    pub min_size: Option<Size>,
    /// Focus the window right after registering it
    pub focus: bool,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            title: None,
            min_size: None,
            focus: true,
        }
    }
}

impl WindowOptions {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn with_min_size(mut self, min_size: Size) -> Self {
        self.min_size = Some(min_size);
        self
    }

    pub fn without_focus(mut self) -> Self {
        self.focus = false;
        self
    }
}

/// One open window, owned exclusively by the [`WindowRegistry`]
///
/// Fields are only writable inside the crate; callers read through the
/// accessors and mutate through [`WindowManager`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowRecord {
    pub(crate) id: WindowId,
    pub(crate) owner: OwnerId,
    pub(crate) title: Option<String>,
    pub(crate) z_index: u32,
    pub(crate) is_focused: bool,
    pub(crate) is_minimized: bool,
    pub(crate) is_maximized: bool,
    pub(crate) is_main_window: bool,
    pub(crate) geometry: Geometry,
    /// Snapshot taken by minimize/maximize
    pub(crate) saved_geometry: Option<Geometry>,
    /// Bounds to return to when leaving the maximized state
    pub(crate) restore_geometry: Option<Geometry>,
    pub(crate) min_size: Size,
    pub(crate) gesture: GestureState,
    pub(crate) created_at: u64,
}

impl WindowRecord {
    pub(crate) fn new(
        id: WindowId,
        owner: OwnerId,
        geometry: Geometry,
        z_index: u32,
        created_at: u64,
    ) -> Self {
        Self {
            id,
            owner,
            title: None,
            z_index,
            is_focused: false,
            is_minimized: false,
            is_maximized: false,
            is_main_window: false,
            geometry,
            saved_geometry: None,
            restore_geometry: None,
            min_size: DEFAULT_MIN_SIZE,
            gesture: GestureState::Idle,
            created_at,
        }
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn owner(&self) -> &OwnerId {
        &self.owner
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn z_index(&self) -> u32 {
        self.z_index
    }

    pub fn is_focused(&self) -> bool {
        self.is_focused
    }

    pub fn is_minimized(&self) -> bool {
        self.is_minimized
    }

    pub fn is_maximized(&self) -> bool {
        self.is_maximized
    }

    pub fn is_main_window(&self) -> bool {
        self.is_main_window
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn saved_geometry(&self) -> Option<Geometry> {
        self.saved_geometry
    }

    pub fn restore_geometry(&self) -> Option<Geometry> {
        self.restore_geometry
    }

    pub fn min_size(&self) -> Size {
        self.min_size
    }

    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    /// Current position in the minimize/maximize state machine
    pub fn state(&self) -> WindowState {
        match (self.is_minimized, self.is_maximized) {
            (false, false) => WindowState::Normal,
            (true, false) => WindowState::Minimized,
            (false, true) => WindowState::Maximized,
            (true, true) => WindowState::MinimizedWhileMaximized,
        }
    }

    /// Visible windows are drawn; minimized ones are hidden
    pub fn is_visible(&self) -> bool {
        !self.is_minimized
    }
}
