//! Window state consistency checks
//!
//! Debug-mode checks to ensure the registry, its owner index and the focus
//! reference agree with each other after every mutation.

use std::collections::{HashMap, HashSet};

use tracing::error;

use super::{FocusController, OwnerId, WindowId, WindowRegistry, ZOrderAllocator};
use crate::geometry::{Geometry, Size};

/// One invariant breach found by [`validate`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConsistencyError {
    #[error("{first} and {second} share z-index {z_index}")]
    DuplicateZIndex {
        first: WindowId,
        second: WindowId,
        z_index: u32,
    },

    #[error("{0:?} are all marked focused")]
    MultipleFocused(Vec<WindowId>),

    #[error("{0} is focused while minimized")]
    FocusedWhileMinimized(WindowId),

    #[error("{window} is marked focused but the focus reference is {reference:?}")]
    FocusReferenceMismatch {
        window: WindowId,
        reference: Option<WindowId>,
    },

    #[error("owner {owner} has {count} main windows")]
    MainWindowCount { owner: OwnerId, count: usize },

    #[error("owner {owner}: main window is {actual}, earliest window is {expected}")]
    MainWindowNotEarliest {
        owner: OwnerId,
        actual: WindowId,
        expected: WindowId,
    },

    #[error("owner index and records disagree about {0}")]
    OwnerIndexMismatch(WindowId),

    #[error("owner {0} has an empty index entry")]
    EmptyOwnerEntry(OwnerId),

    #[error("{window} holds elevated z-index {z_index} without being maximized")]
    ElevatedWhileNormal { window: WindowId, z_index: u32 },

    #[error("{window} is gesturing while maximized or minimized")]
    GestureWhileLocked { window: WindowId },

    #[error("{window} at {geometry} leaves the {container} container")]
    OutsideContainer {
        window: WindowId,
        geometry: Geometry,
        container: Size,
    },

    #[error("maximized {window} is at {geometry} instead of covering {container}")]
    MaximizedNotCovering {
        window: WindowId,
        geometry: Geometry,
        container: Size,
    },
}

/// Collect every invariant breach.
///
/// Geometry is only checked when `container` is given: the host may shrink
/// the container before telling the manager, and records catch up on the
/// next `container_resized`.
pub fn validate(
    registry: &WindowRegistry,
    focus: &FocusController,
    zorder: &ZOrderAllocator,
    container: Option<Size>,
) -> Result<(), Vec<ConsistencyError>> {
    let mut errors = Vec::new();

    // Check 1: z-indices are unique
    let mut seen: HashMap<u32, WindowId> = HashMap::new();
    for window in registry.all() {
        if let Some(first) = seen.insert(window.z_index, window.id) {
            errors.push(ConsistencyError::DuplicateZIndex {
                first,
                second: window.id,
                z_index: window.z_index,
            });
        }
        if !window.is_maximized && zorder.is_elevated(window.z_index) {
            errors.push(ConsistencyError::ElevatedWhileNormal {
                window: window.id,
                z_index: window.z_index,
            });
        }
        if !window.gesture.is_idle() && (window.is_maximized || window.is_minimized) {
            errors.push(ConsistencyError::GestureWhileLocked { window: window.id });
        }
    }

    // Check 2: a single focused window, visible and referenced
    let focused: Vec<WindowId> = registry
        .all()
        .into_iter()
        .filter(|w| w.is_focused)
        .map(|w| w.id)
        .collect();
    if focused.len() > 1 {
        errors.push(ConsistencyError::MultipleFocused(focused.clone()));
    }
    for id in &focused {
        if registry.get(*id).is_some_and(|w| w.is_minimized) {
            errors.push(ConsistencyError::FocusedWhileMinimized(*id));
        }
        if focus.focused() != Some(*id) {
            errors.push(ConsistencyError::FocusReferenceMismatch {
                window: *id,
                reference: focus.focused(),
            });
        }
    }

    // Check 3: owner index mirrors the records
    let mut indexed = HashSet::new();
    for (owner, ids) in registry.owner_index() {
        if ids.is_empty() {
            errors.push(ConsistencyError::EmptyOwnerEntry(owner.clone()));
        }
        for id in ids {
            indexed.insert(*id);
            if registry.get(*id).map(|w| &w.owner) != Some(owner) {
                errors.push(ConsistencyError::OwnerIndexMismatch(*id));
            }
        }
    }
    for id in registry.window_ids() {
        if !indexed.contains(&id) {
            errors.push(ConsistencyError::OwnerIndexMismatch(id));
        }
    }

    // Check 4: exactly one main window per owner, the earliest created
    for owner in registry.owners() {
        let windows = registry.list_by_owner(owner.as_str());
        let mains: Vec<WindowId> = windows
            .iter()
            .filter(|w| w.is_main_window)
            .map(|w| w.id)
            .collect();
        if mains.len() != 1 {
            errors.push(ConsistencyError::MainWindowCount {
                owner: owner.clone(),
                count: mains.len(),
            });
            continue;
        }
        if let Some(earliest) = windows.iter().min_by_key(|w| (w.created_at, w.id)) {
            if earliest.id != mains[0] {
                errors.push(ConsistencyError::MainWindowNotEarliest {
                    owner: owner.clone(),
                    actual: mains[0],
                    expected: earliest.id,
                });
            }
        }
    }

    // Check 5: geometry stays inside the container
    if let Some(container) = container {
        for window in registry.all() {
            if window.is_maximized {
                if window.geometry != Geometry::covering(container) {
                    errors.push(ConsistencyError::MaximizedNotCovering {
                        window: window.id,
                        geometry: window.geometry,
                        container,
                    });
                }
            } else if fits(window.min_size, container) && !window.geometry.is_contained_in(container) {
                errors.push(ConsistencyError::OutsideContainer {
                    window: window.id,
                    geometry: window.geometry,
                    container,
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Containment is only promised when the minimum size fits
fn fits(min: Size, container: Size) -> bool {
    min.width <= container.width && min.height <= container.height
}

/// Check consistency of window state, logging each breach
#[cfg(debug_assertions)]
pub fn check_consistency(
    registry: &WindowRegistry,
    focus: &FocusController,
    zorder: &ZOrderAllocator,
) -> bool {
    match validate(registry, focus, zorder, None) {
        Ok(()) => true,
        Err(errors) => {
            for err in &errors {
                error!("{err}");
            }
            error!("Window state consistency check FAILED");
            false
        }
    }
}

/// No-op in release builds
#[cfg(not(debug_assertions))]
pub fn check_consistency(
    _registry: &WindowRegistry,
    _focus: &FocusController,
    _zorder: &ZOrderAllocator,
) -> bool {
    true
}
