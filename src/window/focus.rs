//! Focus tracking
//!
//! The controller holds the single focus reference. A minimized window keeps
//! the reference (its `is_focused` flag is cleared) until some other window is
//! explicitly focused; nothing here picks a replacement on its own.

use tracing::debug;

use super::registry::WindowTable;
use super::{WindowId, ZOrderAllocator};
use crate::error::{CasementError, CasementResult};

/// Result of applying focus to a window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusChange {
    /// Window whose `is_focused` flag was cleared, if any
    pub unfocused: Option<WindowId>,
    /// Whether the target went from unfocused to focused
    pub gained: bool,
}

/// Owner of the single focus reference
#[derive(Debug, Default)]
pub struct FocusController {
    focused: Option<WindowId>,
}

impl FocusController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently referenced window, which may be minimized
    pub fn focused(&self) -> Option<WindowId> {
        self.focused
    }

    /// Move focus to `target`, which must exist and not be minimized.
    ///
    /// Normal windows are bumped to the top of the z-order. Maximized windows
    /// keep their elevated value and are only re-elevated when it regressed.
    pub(crate) fn apply(
        &mut self,
        windows: &mut WindowTable,
        zorder: &ZOrderAllocator,
        target: WindowId,
    ) -> CasementResult<FocusChange> {
        let window = windows
            .get(&target)
            .ok_or(CasementError::WindowNotFound(target))?;
        if window.is_minimized {
            return Err(CasementError::InvalidArgument(format!(
                "{target} is minimized and cannot take focus"
            )));
        }
        let gained = !window.is_focused;

        let mut unfocused = None;
        if let Some(previous) = self.focused.filter(|p| *p != target) {
            if let Some(prev) = windows.get_mut(&previous) {
                if prev.is_focused {
                    prev.is_focused = false;
                    unfocused = Some(previous);
                }
            }
        }

        let window = windows
            .get_mut(&target)
            .ok_or(CasementError::WindowNotFound(target))?;
        window.is_focused = true;
        let maximized = window.is_maximized;
        self.focused = Some(target);

        if maximized {
            zorder.elevate(windows, target)?;
        } else {
            zorder.bump(windows, target)?;
        }

        debug!("Focused {target} (previous: {unfocused:?})");
        Ok(FocusChange { unfocused, gained })
    }

    /// Drop the reference if it points at `id`
    pub(crate) fn forget(&mut self, id: WindowId) -> bool {
        if self.focused == Some(id) {
            self.focused = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Geometry;
    use crate::window::{OwnerId, WindowRecord};

    fn table(count: u32) -> WindowTable {
        (1..=count)
            .map(|i| {
                let id = WindowId::new(i);
                let record = WindowRecord::new(
                    id,
                    OwnerId::parse("app").unwrap(),
                    Geometry::new(0, 0, 400, 300),
                    1000 + i,
                    i as u64,
                );
                (id, record)
            })
            .collect()
    }

    #[test]
    fn focus_moves_flag_and_raises() {
        let zorder = ZOrderAllocator::default();
        let mut windows = table(3);
        let mut focus = FocusController::new();

        focus.apply(&mut windows, &zorder, WindowId::new(1)).unwrap();
        let change = focus.apply(&mut windows, &zorder, WindowId::new(2)).unwrap();

        assert_eq!(change.unfocused, Some(WindowId::new(1)));
        assert!(!windows[&WindowId::new(1)].is_focused);
        assert!(windows[&WindowId::new(2)].is_focused);
        assert!(windows[&WindowId::new(2)].z_index > windows[&WindowId::new(1)].z_index);
        assert_eq!(focus.focused(), Some(WindowId::new(2)));
    }

    #[test]
    fn refocusing_keeps_z_index() {
        let zorder = ZOrderAllocator::default();
        let mut windows = table(2);
        let mut focus = FocusController::new();

        focus.apply(&mut windows, &zorder, WindowId::new(1)).unwrap();
        let z = windows[&WindowId::new(1)].z_index;
        let change = focus.apply(&mut windows, &zorder, WindowId::new(1)).unwrap();

        assert!(!change.gained);
        assert_eq!(change.unfocused, None);
        assert_eq!(windows[&WindowId::new(1)].z_index, z);
    }

    #[test]
    fn minimized_target_is_rejected() {
        let zorder = ZOrderAllocator::default();
        let mut windows = table(1);
        windows.get_mut(&WindowId::new(1)).unwrap().is_minimized = true;
        let mut focus = FocusController::new();

        assert!(focus.apply(&mut windows, &zorder, WindowId::new(1)).is_err());
        assert_eq!(focus.focused(), None);
    }

    #[test]
    fn maximized_focus_reelevates_regressed_value() {
        let zorder = ZOrderAllocator::default();
        let mut windows = table(2);
        windows.get_mut(&WindowId::new(1)).unwrap().is_maximized = true;
        let mut focus = FocusController::new();

        focus.apply(&mut windows, &zorder, WindowId::new(1)).unwrap();
        assert!(zorder.is_elevated(windows[&WindowId::new(1)].z_index));
    }

    #[test]
    fn forget_only_clears_matching_reference() {
        let zorder = ZOrderAllocator::default();
        let mut windows = table(2);
        let mut focus = FocusController::new();
        focus.apply(&mut windows, &zorder, WindowId::new(1)).unwrap();

        assert!(!focus.forget(WindowId::new(2)));
        assert!(focus.forget(WindowId::new(1)));
        assert_eq!(focus.focused(), None);
    }
}
