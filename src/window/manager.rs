//! Window Manager
//!
//! The facade every caller goes through. It owns one registry, one z-order
//! allocator and one focus controller, queries the container bounds on every
//! clamp, and after each mutating call:
//! - emits the matching [`WindowEvent`]s (which also run per-window hooks)
//! - pushes changed geometry, z-index and focus visuals to the [`RenderSink`]
//! - asserts registry consistency in debug builds

use std::fmt;
use std::time::Instant;

use tracing::{debug, info, warn};

use super::{
    check_consistency, validate, ConsistencyError, FocusController, WindowId, WindowOptions,
    WindowRecord, WindowRegistry, ZOrderAllocator,
};
use crate::config::Config;
use crate::error::{CasementError, CasementResult, OptionExt};
use crate::event::{EventBus, EventListener, HookKind, OwnerLifecycle, WindowEvent};
use crate::geometry::{clamp_geometry, ContainerBounds, Geometry, Size, DEFAULT_MIN_SIZE};
use crate::gesture::{self, Pointer, ResizeAnchor};
use crate::render::{NullRenderer, RenderSink, RenderSync};

/// Window registry, stacking, focus and gestures behind one API
pub struct WindowManager<R: RenderSink = NullRenderer> {
    registry: WindowRegistry,
    zorder: ZOrderAllocator,
    focus: FocusController,
    container: Box<dyn ContainerBounds>,
    min_size: Size,
    focus_new_windows: bool,
    events: EventBus,
    renderer: R,
    render_sync: RenderSync,
}

impl<R: RenderSink> fmt::Debug for WindowManager<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowManager")
            .field("registry", &self.registry)
            .field("zorder", &self.zorder)
            .field("focus", &self.focus)
            .field("container", &self.container.bounds())
            .field("min_size", &self.min_size)
            .field("events", &self.events)
            .finish()
    }
}

impl<R: RenderSink> WindowManager<R> {
    /// Create a manager with default window options
    pub fn new(zorder: ZOrderAllocator, container: Box<dyn ContainerBounds>, renderer: R) -> Self {
        Self {
            registry: WindowRegistry::new(),
            zorder,
            focus: FocusController::new(),
            container,
            min_size: DEFAULT_MIN_SIZE,
            focus_new_windows: true,
            events: EventBus::new(),
            renderer,
            render_sync: RenderSync::default(),
        }
    }

    /// Create a manager from a validated configuration
    pub fn from_config(
        config: &Config,
        container: Box<dyn ContainerBounds>,
        renderer: R,
    ) -> CasementResult<Self> {
        config.validate()?;
        let mut manager = Self::new(config.z_order()?, container, renderer);
        manager.min_size = config.min_size;
        manager.focus_new_windows = config.focus_new_windows;
        Ok(manager)
    }

    /// Register a window for `owner` and return a snapshot of its record.
    ///
    /// The window is focused unless `opts.focus` is false or the
    /// configuration turned focusing new windows off.
    pub fn register(
        &mut self,
        owner: &str,
        geometry: Geometry,
        opts: WindowOptions,
    ) -> CasementResult<WindowRecord> {
        let container = self.container.bounds();
        let id = self.registry.register(
            owner,
            geometry,
            &opts,
            &self.zorder,
            container,
            self.min_size,
        )?;

        let record = self.snapshot(id)?;
        self.events.emit(WindowEvent::Created {
            window_id: id,
            owner: record.owner.clone(),
            geometry: record.geometry,
            timestamp: Instant::now(),
        });

        if opts.focus && self.focus_new_windows {
            self.focus_window(id)?;
        }

        self.after_mutation();
        self.snapshot(id)
    }

    /// Remove a window.
    ///
    /// Unknown ids are a silent no-op so racing close paths are harmless.
    /// Clears the focus reference if it pointed here; nothing is refocused.
    pub fn unregister(&mut self, id: WindowId) -> Option<WindowRecord> {
        let Some(record) = self.registry.unregister(id) else {
            debug!("Unregister of unknown {id} ignored");
            return None;
        };

        if self.focus.forget(id) {
            debug!("Focus reference cleared with {id}");
        }
        self.render_sync.remove(&mut self.renderer, id);
        self.events.emit(WindowEvent::Closed {
            window_id: id,
            owner: record.owner.clone(),
            was_main: record.is_main_window,
            timestamp: Instant::now(),
        });

        self.after_mutation();
        Some(record)
    }

    /// Focus a window, restoring it first when minimized
    pub fn focus(&mut self, id: WindowId) -> CasementResult<()> {
        let minimized = self
            .registry
            .get(id)
            .map(|w| w.is_minimized)
            .ok_or(CasementError::WindowNotFound(id))?;
        if minimized {
            self.restore_window(id)?;
        }
        self.focus_window(id)?;
        self.after_mutation();
        Ok(())
    }

    /// The focus reference.
    ///
    /// Minimizing the focused window leaves the reference in place (with the
    /// record's `is_focused` cleared) until another window is focused.
    pub fn focused(&self) -> Option<WindowId> {
        self.focus.focused()
    }

    /// Hide a window, remembering its geometry. No-op when already minimized.
    pub fn minimize(&mut self, id: WindowId) -> CasementResult<()> {
        let window = self
            .registry
            .get_mut(id)
            .ok_or(CasementError::WindowNotFound(id))?;
        if window.is_minimized {
            return Ok(());
        }

        gesture::cancel(window);
        window.saved_geometry = Some(window.geometry);
        window.is_minimized = true;
        let lost_focus = std::mem::replace(&mut window.is_focused, false);
        debug!("Minimized {id} from {}", window.geometry);

        if lost_focus {
            self.emit_unfocused(id);
        }
        self.events.emit(WindowEvent::Minimized {
            window_id: id,
            timestamp: Instant::now(),
        });

        self.after_mutation();
        Ok(())
    }

    /// Show a minimized window again. No-op when not minimized.
    ///
    /// Maximized windows come back covering the container; others return to
    /// the geometry saved at minimize. `auto_focus` focuses the window
    /// afterwards without going back through [`WindowManager::focus`].
    pub fn restore(&mut self, id: WindowId, auto_focus: bool) -> CasementResult<()> {
        if !self.restore_window(id)? {
            return Ok(());
        }
        if auto_focus {
            self.focus_window(id)?;
        }
        self.after_mutation();
        Ok(())
    }

    /// Cover the whole container and lift above the overlay.
    ///
    /// No-op when already maximized; a minimized window must be restored
    /// first.
    pub fn maximize(&mut self, id: WindowId) -> CasementResult<()> {
        let container = self.container.bounds();
        let window = self
            .registry
            .get_mut(id)
            .ok_or(CasementError::WindowNotFound(id))?;
        if window.is_maximized {
            return Ok(());
        }
        if window.is_minimized {
            warn!("Refusing to maximize minimized {id}");
            return Err(CasementError::InvalidArgument(format!(
                "{id} is minimized and cannot be maximized"
            )));
        }

        gesture::cancel(window);
        window.saved_geometry = Some(window.geometry);
        window.restore_geometry = Some(window.geometry);
        window.is_maximized = true;
        window.geometry = Geometry::covering(container);
        debug!("Maximized {id} to {}", window.geometry);

        self.zorder.elevate(self.registry.table_mut(), id)?;
        self.events.emit(WindowEvent::Maximized {
            window_id: id,
            timestamp: Instant::now(),
        });

        self.after_mutation();
        Ok(())
    }

    /// Leave the maximized state, returning to the pre-maximize geometry.
    ///
    /// The window drops back into the normal z pool on top of it, unless it
    /// is unfocused and was never elevated, in which case its z-index stays.
    pub fn restore_maximize(&mut self, id: WindowId) -> CasementResult<()> {
        let container = self.container.bounds();
        let window = self
            .registry
            .get_mut(id)
            .ok_or(CasementError::WindowNotFound(id))?;
        if !window.is_maximized {
            return Ok(());
        }
        if window.is_minimized {
            warn!("Refusing to unmaximize minimized {id}");
            return Err(CasementError::InvalidArgument(format!(
                "{id} is minimized; restore it before unmaximizing"
            )));
        }

        let target = window
            .restore_geometry
            .take()
            .or(window.saved_geometry)
            .unwrap_or(window.geometry);
        window.saved_geometry = None;
        window.is_maximized = false;
        window.geometry = clamp_geometry(container, target, window.min_size);
        let demote = window.is_focused || self.zorder.is_elevated(window.z_index);
        debug!("Unmaximized {id} to {}", window.geometry);

        if demote {
            self.zorder.demote(self.registry.table_mut(), id)?;
        }
        self.events.emit(WindowEvent::Unmaximized {
            window_id: id,
            timestamp: Instant::now(),
        });

        self.after_mutation();
        Ok(())
    }

    /// Start dragging. Returns `Ok(false)` when the window is maximized or
    /// minimized; otherwise the window is focused.
    pub fn begin_drag(&mut self, id: WindowId, pointer: Pointer) -> CasementResult<bool> {
        let window = self
            .registry
            .get_mut(id)
            .ok_or(CasementError::WindowNotFound(id))?;
        if !gesture::begin_drag(window, pointer) {
            warn!("Drag rejected on {id} ({:?})", window.state());
            return Ok(false);
        }
        self.focus_window(id)?;
        self.after_mutation();
        Ok(true)
    }

    /// Follow the pointer. Returns whether the window moved.
    pub fn update_drag(&mut self, id: WindowId, pointer: Pointer) -> CasementResult<bool> {
        let container = self.container.bounds();
        let window = self
            .registry
            .get_mut(id)
            .ok_or(CasementError::WindowNotFound(id))?;
        let Some((old_position, new_position)) = gesture::update_drag(window, pointer, container)
        else {
            return Ok(false);
        };

        self.events.emit(WindowEvent::Moved {
            window_id: id,
            old_position,
            new_position,
            timestamp: Instant::now(),
        });
        self.after_mutation();
        Ok(true)
    }

    /// Finish dragging. Returns whether a drag was in progress.
    pub fn end_drag(&mut self, id: WindowId) -> CasementResult<bool> {
        let window = self
            .registry
            .get_mut(id)
            .ok_or(CasementError::WindowNotFound(id))?;
        let ended = gesture::end_drag(window);
        self.after_mutation();
        Ok(ended)
    }

    /// Start resizing from `anchor`. Same rejection rules as a drag.
    pub fn begin_resize(
        &mut self,
        id: WindowId,
        anchor: ResizeAnchor,
        pointer: Pointer,
    ) -> CasementResult<bool> {
        let window = self
            .registry
            .get_mut(id)
            .ok_or(CasementError::WindowNotFound(id))?;
        if !gesture::begin_resize(window, anchor, pointer) {
            warn!("Resize ({anchor}) rejected on {id} ({:?})", window.state());
            return Ok(false);
        }
        self.focus_window(id)?;
        self.after_mutation();
        Ok(true)
    }

    /// Move the anchored edges to follow the pointer. Returns whether the
    /// geometry changed.
    pub fn update_resize(&mut self, id: WindowId, pointer: Pointer) -> CasementResult<bool> {
        let container = self.container.bounds();
        let window = self
            .registry
            .get_mut(id)
            .ok_or(CasementError::WindowNotFound(id))?;
        let Some((old_geometry, new_geometry)) = gesture::update_resize(window, pointer, container)
        else {
            return Ok(false);
        };

        self.events.emit(WindowEvent::Resized {
            window_id: id,
            old_geometry,
            new_geometry,
            timestamp: Instant::now(),
        });
        self.after_mutation();
        Ok(true)
    }

    /// Finish resizing. Returns whether a resize was in progress.
    pub fn end_resize(&mut self, id: WindowId) -> CasementResult<bool> {
        let window = self
            .registry
            .get_mut(id)
            .ok_or(CasementError::WindowNotFound(id))?;
        let ended = gesture::end_resize(window);
        self.after_mutation();
        Ok(ended)
    }

    /// Re-clamp every window against the current container bounds.
    ///
    /// Maximized windows (minimized or not) snap to the new full bounds.
    /// Running drags and resizes are cancelled since their baselines belong
    /// to the old bounds. Returns how many windows changed geometry.
    pub fn container_resized(&mut self) -> usize {
        let container = self.container.bounds();
        let ids: Vec<WindowId> = self.registry.all().iter().map(|w| w.id).collect();

        let mut changed = Vec::new();
        for id in ids {
            let Some(window) = self.registry.get_mut(id) else {
                continue;
            };
            gesture::cancel(window);
            let next = if window.is_maximized {
                Geometry::covering(container)
            } else {
                clamp_geometry(container, window.geometry, window.min_size)
            };
            if next != window.geometry {
                changed.push((id, window.geometry, next));
                window.geometry = next;
            }
        }

        info!("Container is now {container}, {} windows re-clamped", changed.len());
        let count = changed.len();
        for (window_id, old_geometry, new_geometry) in changed {
            self.events.emit(WindowEvent::Resized {
                window_id,
                old_geometry,
                new_geometry,
                timestamp: Instant::now(),
            });
        }
        self.after_mutation();
        count
    }

    /// Swap the bounds provider and re-clamp against it
    pub fn set_container(&mut self, container: Box<dyn ContainerBounds>) -> usize {
        self.container = container;
        self.container_resized()
    }

    /// Compact the normal z pool. Returns how many windows were reassigned.
    pub fn renormalize(&mut self) -> usize {
        let reassigned = self.zorder.renormalize(self.registry.table_mut());
        self.after_mutation();
        reassigned
    }

    /// Current container bounds, as reported by the provider
    pub fn container(&self) -> Size {
        self.container.bounds()
    }

    pub fn get(&self, id: WindowId) -> Option<&WindowRecord> {
        self.registry.get(id)
    }

    pub fn registry(&self) -> &WindowRegistry {
        &self.registry
    }

    pub fn zorder(&self) -> &ZOrderAllocator {
        &self.zorder
    }

    /// Whether any window is maximized right now
    pub fn any_maximized(&self) -> bool {
        self.registry.any_maximized()
    }

    /// Full invariant check, including geometry against the container
    pub fn validate(&self) -> Result<(), Vec<ConsistencyError>> {
        validate(
            &self.registry,
            &self.focus,
            &self.zorder,
            Some(self.container.bounds()),
        )
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    /// Register an event listener
    pub fn subscribe(&mut self, listener: impl EventListener + 'static) {
        self.events.subscribe(Box::new(listener));
    }

    /// Install the owner lifecycle callback
    pub fn set_lifecycle(&mut self, lifecycle: impl OwnerLifecycle + 'static) {
        self.events.set_lifecycle(Box::new(lifecycle));
    }

    /// Run `hook` when `id` is unregistered
    pub fn on_close(
        &mut self,
        id: WindowId,
        hook: impl FnMut(WindowId) + 'static,
    ) -> CasementResult<()> {
        self.add_hook(id, HookKind::Close, Box::new(hook))
    }

    /// Run `hook` each time `id` is minimized
    pub fn on_minimize(
        &mut self,
        id: WindowId,
        hook: impl FnMut(WindowId) + 'static,
    ) -> CasementResult<()> {
        self.add_hook(id, HookKind::Minimize, Box::new(hook))
    }

    /// Run `hook` each time `id` is maximized
    pub fn on_maximize(
        &mut self,
        id: WindowId,
        hook: impl FnMut(WindowId) + 'static,
    ) -> CasementResult<()> {
        self.add_hook(id, HookKind::Maximize, Box::new(hook))
    }

    fn add_hook(
        &mut self,
        id: WindowId,
        kind: HookKind,
        hook: Box<dyn FnMut(WindowId)>,
    ) -> CasementResult<()> {
        if !self.registry.contains(id) {
            return Err(CasementError::WindowNotFound(id));
        }
        self.events.add_hook(id, kind, hook);
        Ok(())
    }

    fn snapshot(&self, id: WindowId) -> CasementResult<WindowRecord> {
        self.registry
            .get(id)
            .cloned()
            .ok_or_log(|| CasementError::WindowNotFound(id))
    }

    /// Apply focus and emit the resulting events; never restores
    fn focus_window(&mut self, id: WindowId) -> CasementResult<()> {
        let change = self
            .focus
            .apply(self.registry.table_mut(), &self.zorder, id)?;
        if let Some(previous) = change.unfocused {
            self.emit_unfocused(previous);
        }
        if change.gained {
            self.events.emit(WindowEvent::Focused {
                window_id: id,
                timestamp: Instant::now(),
            });
        }
        Ok(())
    }

    /// Clear the minimized state; never focuses. Returns false when the
    /// window was not minimized.
    fn restore_window(&mut self, id: WindowId) -> CasementResult<bool> {
        let container = self.container.bounds();
        let window = self
            .registry
            .get_mut(id)
            .ok_or(CasementError::WindowNotFound(id))?;
        if !window.is_minimized {
            return Ok(false);
        }

        window.is_minimized = false;
        let saved = window.saved_geometry.take();
        let maximized = window.is_maximized;
        window.geometry = if maximized {
            Geometry::covering(container)
        } else {
            clamp_geometry(container, saved.unwrap_or(window.geometry), window.min_size)
        };
        debug!("Restored {id} to {}", window.geometry);

        if maximized {
            self.zorder.elevate(self.registry.table_mut(), id)?;
        }
        self.events.emit(WindowEvent::Restored {
            window_id: id,
            timestamp: Instant::now(),
        });
        Ok(true)
    }

    fn emit_unfocused(&mut self, id: WindowId) {
        self.events.emit(WindowEvent::Unfocused {
            window_id: id,
            timestamp: Instant::now(),
        });
    }

    /// Push render changes in ascending z order and check invariants
    fn after_mutation(&mut self) {
        let mut windows = self.registry.all();
        windows.sort_by_key(|w| w.z_index);
        self.render_sync.sync(&mut self.renderer, windows);

        debug_assert!(check_consistency(&self.registry, &self.focus, &self.zorder));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{RecordingRenderer, RenderOp};
    use std::cell::RefCell;
    use std::rc::Rc;

    const SCREEN: Size = Size {
        width: 1920,
        height: 1080,
    };

    fn manager() -> WindowManager<RecordingRenderer> {
        WindowManager::new(
            ZOrderAllocator::default(),
            Box::new(SCREEN),
            RecordingRenderer::new(),
        )
    }

    fn open(wm: &mut WindowManager<RecordingRenderer>, owner: &str) -> WindowId {
        wm.register(owner, Geometry::new(100, 100, 800, 600), WindowOptions::default())
            .unwrap()
            .id()
    }

    #[test]
    fn register_focuses_and_renders() {
        let mut wm = manager();
        let id = open(&mut wm, "editor");

        assert_eq!(wm.focused(), Some(id));
        assert!(wm.get(id).unwrap().is_focused());
        let ops = wm.renderer_mut().drain();
        assert!(ops.contains(&RenderOp::Geometry(id, Geometry::new(100, 100, 800, 600))));
        assert!(ops.contains(&RenderOp::ZIndex(id, 1001)));
        assert!(ops.contains(&RenderOp::Focus(id, true)));
    }

    #[test]
    fn register_without_focus_leaves_reference() {
        let mut wm = manager();
        let a = open(&mut wm, "editor");
        let b = wm
            .register("mail", Geometry::new(0, 0, 400, 300), WindowOptions::default().without_focus())
            .unwrap();

        assert!(!b.is_focused());
        assert_eq!(wm.focused(), Some(a));
    }

    #[test]
    fn focus_unknown_window_is_an_error() {
        let mut wm = manager();
        let err = wm.focus(WindowId::new(9)).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn focus_restores_minimized_window() {
        let mut wm = manager();
        let a = open(&mut wm, "editor");
        wm.minimize(a).unwrap();
        wm.focus(a).unwrap();

        let window = wm.get(a).unwrap();
        assert!(!window.is_minimized());
        assert!(window.is_focused());
        assert_eq!(window.geometry(), Geometry::new(100, 100, 800, 600));
    }

    #[test]
    fn minimize_hides_and_restore_shows() {
        let mut wm = manager();
        let a = open(&mut wm, "editor");
        wm.renderer_mut().drain();

        wm.minimize(a).unwrap();
        assert_eq!(
            wm.renderer_mut().drain(),
            vec![RenderOp::Focus(a, false), RenderOp::Visibility(a, false)]
        );

        wm.restore(a, false).unwrap();
        assert_eq!(wm.renderer_mut().drain(), vec![RenderOp::Visibility(a, true)]);
        assert!(!wm.get(a).unwrap().is_focused());
    }

    #[test]
    fn restore_with_auto_focus() {
        let mut wm = manager();
        let a = open(&mut wm, "editor");
        let b = open(&mut wm, "mail");
        wm.minimize(a).unwrap();
        wm.restore(a, true).unwrap();

        assert_eq!(wm.focused(), Some(a));
        assert!(!wm.get(b).unwrap().is_focused());
        assert!(wm.get(a).unwrap().z_index() > wm.get(b).unwrap().z_index());
    }

    #[test]
    fn maximize_of_minimized_window_is_rejected() {
        let mut wm = manager();
        let a = open(&mut wm, "editor");
        wm.minimize(a).unwrap();
        assert!(matches!(
            wm.maximize(a),
            Err(CasementError::InvalidArgument(_))
        ));
        assert!(!wm.get(a).unwrap().is_maximized());
    }

    #[test]
    fn minimize_while_maximized_round_trip() {
        let mut wm = manager();
        let a = open(&mut wm, "editor");
        wm.maximize(a).unwrap();
        wm.minimize(a).unwrap();
        assert_eq!(wm.get(a).unwrap().state(), crate::window::WindowState::MinimizedWhileMaximized);
        assert!(wm.restore_maximize(a).is_err());

        wm.restore(a, false).unwrap();
        let window = wm.get(a).unwrap();
        assert_eq!(window.geometry(), Geometry::covering(SCREEN));
        assert!(wm.zorder().is_elevated(window.z_index()));

        wm.restore_maximize(a).unwrap();
        assert_eq!(wm.get(a).unwrap().geometry(), Geometry::new(100, 100, 800, 600));
    }

    #[test]
    fn unfocused_unmaximize_drops_to_top_of_pool() {
        let mut wm = manager();
        let a = open(&mut wm, "editor");
        let b = open(&mut wm, "mail");
        wm.maximize(a).unwrap();
        wm.focus(b).unwrap();
        assert!(wm.zorder().is_elevated(wm.get(a).unwrap().z_index()));

        wm.restore_maximize(a).unwrap();
        let za = wm.get(a).unwrap().z_index();
        assert!(!wm.zorder().is_elevated(za));
        assert!(za > wm.get(b).unwrap().z_index());
    }

    #[test]
    fn hooks_fire_and_are_dropped_on_close() {
        let fired = Rc::new(RefCell::new(Vec::new()));
        let mut wm = manager();
        let a = open(&mut wm, "editor");

        let sink = fired.clone();
        wm.on_maximize(a, move |id| sink.borrow_mut().push(("max", id))).unwrap();
        let sink = fired.clone();
        wm.on_close(a, move |id| sink.borrow_mut().push(("close", id))).unwrap();

        wm.maximize(a).unwrap();
        wm.unregister(a);
        wm.unregister(a);

        assert_eq!(*fired.borrow(), vec![("max", a), ("close", a)]);
        assert_eq!(wm.events_mut().hook_count(a), 0);
        assert!(wm.on_minimize(a, |_| {}).is_err());
    }

    #[test]
    fn unregister_clears_focus_and_renderer_state() {
        let mut wm = manager();
        let a = open(&mut wm, "editor");
        wm.renderer_mut().drain();

        let record = wm.unregister(a).unwrap();
        assert!(record.is_main_window());
        assert_eq!(wm.focused(), None);
        assert_eq!(wm.renderer().ops(), &[RenderOp::Removed(a)]);
    }

    #[test]
    fn container_shrink_reclamps_windows() {
        let container = crate::geometry::SharedContainer::new(SCREEN);
        let mut wm = WindowManager::new(
            ZOrderAllocator::default(),
            Box::new(container.clone()),
            NullRenderer,
        );
        let a = wm
            .register("editor", Geometry::new(1000, 400, 800, 600), WindowOptions::default())
            .unwrap()
            .id();
        let b = wm
            .register("mail", Geometry::new(0, 0, 400, 300), WindowOptions::default())
            .unwrap()
            .id();
        wm.maximize(b).unwrap();

        container.set(Size::new(1280, 720));
        assert_eq!(wm.container_resized(), 2);
        assert_eq!(wm.get(a).unwrap().geometry(), Geometry::new(480, 120, 800, 600));
        assert_eq!(wm.get(b).unwrap().geometry(), Geometry::covering(Size::new(1280, 720)));
        assert_eq!(wm.validate(), Ok(()));
    }

    #[test]
    fn from_config_applies_bounds_and_min_size() {
        let config = crate::config::parser::parse_config(
            "z_base 10\nz_max 50\noverlay_z 60\nmin_size 100x100\nfocus_new_windows no",
        )
        .unwrap();
        let mut wm = WindowManager::from_config(&config, Box::new(SCREEN), NullRenderer).unwrap();
        let a = wm
            .register("editor", Geometry::new(0, 0, 10, 10), WindowOptions::default())
            .unwrap();

        assert_eq!(a.z_index(), 11);
        assert_eq!(a.geometry(), Geometry::new(0, 0, 100, 100));
        assert_eq!(wm.focused(), None);
    }
}
