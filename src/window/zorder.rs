//! Stacking order allocation
//!
//! Normal windows draw from the pool `base_z + 1 .. max_z`. Maximized windows
//! are lifted into a separate elevated pool above `overlay_z` (the taskbar
//! reservation) and are left alone when the normal pool is compacted.

use tracing::{debug, warn};

use super::registry::WindowTable;
use super::{WindowId, WindowRecord};
use crate::error::{CasementError, CasementResult};

/// Assigns and renormalizes z-indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZOrderAllocator {
    base_z: u32,
    max_z: u32,
    overlay_z: u32,
}

impl ZOrderAllocator {
    pub const DEFAULT_BASE_Z: u32 = 1000;
    pub const DEFAULT_MAX_Z: u32 = 99_999;
    pub const DEFAULT_OVERLAY_Z: u32 = 100_000;

    /// Build an allocator; requires `base_z < max_z < overlay_z` and room
    /// above `overlay_z` for one elevated value per possible window
    pub fn new(base_z: u32, max_z: u32, overlay_z: u32) -> CasementResult<Self> {
        if base_z.saturating_add(1) >= max_z {
            return Err(CasementError::Config(format!(
                "z_base {base_z} leaves no room below z_max {max_z}"
            )));
        }
        if max_z >= overlay_z {
            return Err(CasementError::Config(format!(
                "z_max {max_z} must stay below overlay_z {overlay_z}"
            )));
        }
        if overlay_z.checked_add(max_z - base_z).is_none() {
            return Err(CasementError::Config(format!(
                "overlay_z {overlay_z} leaves no room for elevated windows"
            )));
        }
        Ok(Self {
            base_z,
            max_z,
            overlay_z,
        })
    }

    pub fn base_z(&self) -> u32 {
        self.base_z
    }

    pub fn max_z(&self) -> u32 {
        self.max_z
    }

    pub fn overlay_z(&self) -> u32 {
        self.overlay_z
    }

    /// Whether `z` sits above the overlay reservation
    pub fn is_elevated(&self, z: u32) -> bool {
        z > self.overlay_z
    }

    /// Next z-index above `current_max`, never below the base
    pub fn allocate(&self, current_max: Option<u32>) -> u32 {
        current_max.unwrap_or(0).max(self.base_z) + 1
    }

    /// Maximized windows holding an elevated value sit outside the normal pool
    pub(crate) fn is_pinned(&self, window: &WindowRecord) -> bool {
        window.is_maximized && self.is_elevated(window.z_index)
    }

    /// Highest z-index in the normal pool, optionally ignoring one window
    pub(crate) fn max_pool_z(&self, windows: &WindowTable, exclude: Option<WindowId>) -> Option<u32> {
        windows
            .values()
            .filter(|w| Some(w.id) != exclude && !self.is_pinned(w))
            .map(|w| w.z_index)
            .max()
    }

    /// Allocate a z-index for a window about to be inserted
    pub(crate) fn allocate_in(&self, windows: &mut WindowTable) -> CasementResult<u32> {
        let next = self.allocate(self.max_pool_z(windows, None));
        if next < self.max_z {
            return Ok(next);
        }

        warn!("z-order pool reached {next}, renormalizing before allocation");
        self.renormalize(windows);
        let next = self.allocate(self.max_pool_z(windows, None));
        if next >= self.max_z {
            return Err(self.exhausted(windows.len()));
        }
        Ok(next)
    }

    /// Raise `target` above every other normal-pool window.
    ///
    /// Returns whether the z-index changed. A window already on top keeps its
    /// value, as does a pinned (elevated maximized) window.
    pub(crate) fn bump(&self, windows: &mut WindowTable, target: WindowId) -> CasementResult<bool> {
        let window = windows
            .get(&target)
            .ok_or(CasementError::WindowNotFound(target))?;
        if self.is_pinned(window) {
            return Ok(false);
        }
        let current = window.z_index;
        let on_top = match self.max_pool_z(windows, Some(target)) {
            Some(others) => current > others,
            None => current > self.base_z && current < self.max_z,
        };
        if on_top {
            return Ok(false);
        }
        self.raise(windows, target)
    }

    /// Move `target` back into the normal pool, on top of it
    pub(crate) fn demote(&self, windows: &mut WindowTable, target: WindowId) -> CasementResult<bool> {
        if !windows.contains_key(&target) {
            return Err(CasementError::WindowNotFound(target));
        }
        self.raise(windows, target)
    }

    fn raise(&self, windows: &mut WindowTable, target: WindowId) -> CasementResult<bool> {
        let next = self.allocate(self.max_pool_z(windows, Some(target)));
        if next < self.max_z {
            let window = windows
                .get_mut(&target)
                .ok_or(CasementError::WindowNotFound(target))?;
            let changed = window.z_index != next;
            debug!("z-index of {target}: {} -> {next}", window.z_index);
            window.z_index = next;
            return Ok(changed);
        }

        warn!("z-order pool reached {next} while raising {target}, renormalizing");
        self.compact(windows, Some(target));
        let z = windows
            .get(&target)
            .map(|w| w.z_index)
            .ok_or(CasementError::WindowNotFound(target))?;
        if z >= self.max_z {
            return Err(self.exhausted(windows.len()));
        }
        Ok(true)
    }

    /// Compact the normal pool into `base_z + 1 ..` keeping relative order.
    ///
    /// Returns how many windows were reassigned.
    pub(crate) fn renormalize(&self, windows: &mut WindowTable) -> usize {
        self.compact(windows, None)
    }

    /// Dense reassignment of the normal pool; `top` (if any) goes last
    fn compact(&self, windows: &mut WindowTable, top: Option<WindowId>) -> usize {
        let mut pool: Vec<(bool, u32, WindowId)> = windows
            .values()
            .filter(|w| !self.is_pinned(w))
            .map(|w| (Some(w.id) == top, w.z_index, w.id))
            .collect();
        pool.sort_unstable();

        let mut reassigned = 0;
        for (offset, (_, old_z, id)) in pool.into_iter().enumerate() {
            let new_z = self.base_z.saturating_add(1 + offset as u32);
            if let Some(window) = windows.get_mut(&id) {
                if old_z != new_z {
                    window.z_index = new_z;
                    reassigned += 1;
                }
            }
        }
        debug!("Renormalized z-order, {reassigned} windows reassigned");
        reassigned
    }

    /// Lift `target` above the overlay reservation unless it already is.
    pub(crate) fn elevate(&self, windows: &mut WindowTable, target: WindowId) -> CasementResult<bool> {
        let current = windows
            .get(&target)
            .map(|w| w.z_index)
            .ok_or(CasementError::WindowNotFound(target))?;
        if self.is_elevated(current) {
            return Ok(false);
        }

        let next = match self.next_elevated(windows, target) {
            Some(next) => next,
            None => {
                warn!("Elevated pool reached u32::MAX while elevating {target}, compacting");
                self.compact_elevated(windows, target);
                self.next_elevated(windows, target).ok_or_else(|| {
                    CasementError::InvariantViolation(format!(
                        "no elevated z-index left above {}",
                        self.overlay_z
                    ))
                })?
            }
        };
        if let Some(window) = windows.get_mut(&target) {
            debug!("Elevating {target}: {current} -> {next}");
            window.z_index = next;
        }
        Ok(true)
    }

    /// One above the highest elevated value other than `target`'s
    fn next_elevated(&self, windows: &WindowTable, target: WindowId) -> Option<u32> {
        windows
            .values()
            .filter(|w| w.id != target && self.is_elevated(w.z_index))
            .map(|w| w.z_index)
            .max()
            .unwrap_or(self.overlay_z)
            .checked_add(1)
    }

    /// Dense reassignment of the elevated pool from `overlay_z + 1`
    fn compact_elevated(&self, windows: &mut WindowTable, target: WindowId) {
        let mut pool: Vec<(u32, WindowId)> = windows
            .values()
            .filter(|w| w.id != target && self.is_elevated(w.z_index))
            .map(|w| (w.z_index, w.id))
            .collect();
        pool.sort_unstable();

        for (offset, (_, id)) in pool.into_iter().enumerate() {
            if let Some(window) = windows.get_mut(&id) {
                window.z_index = self.overlay_z.saturating_add(1 + offset as u32);
            }
        }
    }

    fn exhausted(&self, count: usize) -> CasementError {
        CasementError::InvariantViolation(format!(
            "z-order pool {}..{} cannot hold {count} windows",
            self.base_z, self.max_z
        ))
    }
}

impl Default for ZOrderAllocator {
    fn default() -> Self {
        Self {
            base_z: Self::DEFAULT_BASE_Z,
            max_z: Self::DEFAULT_MAX_Z,
            overlay_z: Self::DEFAULT_OVERLAY_Z,
        }
    }
}
