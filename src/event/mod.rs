//! Event system for casement
//!
//! Window state changes are published as [`WindowEvent`]s to registered
//! listeners. Per-window close/minimize/maximize hooks live in a table of
//! their own, so records stay plain data and a hook's lifetime is managed
//! apart from the record's (close hooks fire once, then the window's hooks
//! are dropped).

use std::collections::HashMap;
use std::time::Instant;

use crate::geometry::{Geometry, Position};
use crate::window::{OwnerId, WindowId};

/// Window-related events
#[derive(Debug, Clone, PartialEq)]
pub enum WindowEvent {
    /// A new window was registered
    Created {
        window_id: WindowId,
        owner: OwnerId,
        geometry: Geometry,
        timestamp: Instant,
    },

    /// A window was unregistered
    Closed {
        window_id: WindowId,
        owner: OwnerId,
        was_main: bool,
        timestamp: Instant,
    },

    /// A window gained focus
    Focused {
        window_id: WindowId,
        timestamp: Instant,
    },

    /// A window lost focus
    Unfocused {
        window_id: WindowId,
        timestamp: Instant,
    },

    /// A window was minimized
    Minimized {
        window_id: WindowId,
        timestamp: Instant,
    },

    /// A minimized window was restored
    Restored {
        window_id: WindowId,
        timestamp: Instant,
    },

    /// A window was maximized
    Maximized {
        window_id: WindowId,
        timestamp: Instant,
    },

    /// A maximized window went back to its previous bounds
    Unmaximized {
        window_id: WindowId,
        timestamp: Instant,
    },

    /// A window was moved by a drag
    Moved {
        window_id: WindowId,
        old_position: Position,
        new_position: Position,
        timestamp: Instant,
    },

    /// A window was resized
    Resized {
        window_id: WindowId,
        old_geometry: Geometry,
        new_geometry: Geometry,
        timestamp: Instant,
    },
}

impl WindowEvent {
    /// Window the event is about
    pub fn window_id(&self) -> WindowId {
        match self {
            WindowEvent::Created { window_id, .. }
            | WindowEvent::Closed { window_id, .. }
            | WindowEvent::Focused { window_id, .. }
            | WindowEvent::Unfocused { window_id, .. }
            | WindowEvent::Minimized { window_id, .. }
            | WindowEvent::Restored { window_id, .. }
            | WindowEvent::Maximized { window_id, .. }
            | WindowEvent::Unmaximized { window_id, .. }
            | WindowEvent::Moved { window_id, .. }
            | WindowEvent::Resized { window_id, .. } => *window_id,
        }
    }

    /// Short event name, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            WindowEvent::Created { .. } => "created",
            WindowEvent::Closed { .. } => "closed",
            WindowEvent::Focused { .. } => "focused",
            WindowEvent::Unfocused { .. } => "unfocused",
            WindowEvent::Minimized { .. } => "minimized",
            WindowEvent::Restored { .. } => "restored",
            WindowEvent::Maximized { .. } => "maximized",
            WindowEvent::Unmaximized { .. } => "unmaximized",
            WindowEvent::Moved { .. } => "moved",
            WindowEvent::Resized { .. } => "resized",
        }
    }
}

/// Event listener trait
pub trait EventListener {
    /// Called when an event occurs
    fn on_event(&mut self, event: &WindowEvent);
}

impl<F> EventListener for F
where
    F: FnMut(&WindowEvent),
{
    fn on_event(&mut self, event: &WindowEvent) {
        self(event)
    }
}

/// Owner/process lifecycle callback.
///
/// Called once per unregistered window; the owner decides whether closing
/// that window ends the application.
pub trait OwnerLifecycle {
    fn on_window_closed(&mut self, owner: &OwnerId, window_id: WindowId);
}

/// Which per-window hook to register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookKind {
    Close,
    Minimize,
    Maximize,
}

type Hook = Box<dyn FnMut(WindowId)>;

/// Event bus for distributing events to listeners and hooks
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<Box<dyn EventListener>>,
    hooks: HashMap<WindowId, Vec<(HookKind, Hook)>>,
    lifecycle: Option<Box<dyn OwnerLifecycle>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners_count", &self.listeners.len())
            .field("hooked_windows", &self.hooks.len())
            .field("has_lifecycle", &self.lifecycle.is_some())
            .finish()
    }
}

impl EventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event listener
    pub fn subscribe(&mut self, listener: Box<dyn EventListener>) {
        self.listeners.push(listener);
    }

    /// Install the owner lifecycle callback, replacing any previous one
    pub fn set_lifecycle(&mut self, lifecycle: Box<dyn OwnerLifecycle>) {
        self.lifecycle = Some(lifecycle);
    }

    /// Attach a hook to one window
    pub fn add_hook(&mut self, window_id: WindowId, kind: HookKind, hook: Hook) {
        self.hooks.entry(window_id).or_default().push((kind, hook));
    }

    /// Drop every hook attached to `window_id`
    pub fn remove_hooks(&mut self, window_id: WindowId) -> usize {
        self.hooks.remove(&window_id).map_or(0, |hooks| hooks.len())
    }

    /// Number of hooks attached to `window_id`
    pub fn hook_count(&self, window_id: WindowId) -> usize {
        self.hooks.get(&window_id).map_or(0, Vec::len)
    }

    /// Emit an event to all listeners and matching hooks
    pub fn emit(&mut self, event: WindowEvent) {
        tracing::trace!("event {} for {}", event.kind(), event.window_id());

        let hook_kind = match &event {
            WindowEvent::Closed { .. } => Some(HookKind::Close),
            WindowEvent::Minimized { .. } => Some(HookKind::Minimize),
            WindowEvent::Maximized { .. } => Some(HookKind::Maximize),
            _ => None,
        };
        if let Some(kind) = hook_kind {
            self.run_hooks(event.window_id(), kind);
        }

        if let WindowEvent::Closed {
            window_id, owner, ..
        } = &event
        {
            let dropped = self.remove_hooks(*window_id);
            tracing::trace!("dropped {dropped} hooks of {window_id}");
            if let Some(lifecycle) = self.lifecycle.as_mut() {
                lifecycle.on_window_closed(owner, *window_id);
            }
        }

        for listener in &mut self.listeners {
            listener.on_event(&event);
        }
    }

    fn run_hooks(&mut self, window_id: WindowId, kind: HookKind) {
        if let Some(hooks) = self.hooks.get_mut(&window_id) {
            for (hook_kind, hook) in hooks.iter_mut() {
                if *hook_kind == kind {
                    hook(window_id);
                }
            }
        }
    }
}
