//! Window registry for tracking all open windows

use std::collections::HashMap;

use tracing::{debug, info};

use super::{IdAllocator, OwnerId, WindowId, WindowOptions, WindowRecord, ZOrderAllocator};
use crate::error::CasementResult;
use crate::geometry::{clamp_geometry, Geometry, Size};

/// Primary storage for window records
pub(crate) type WindowTable = HashMap<WindowId, WindowRecord>;

/// Central registry for all windows of one desktop instance
#[derive(Debug, Default)]
pub struct WindowRegistry {
    /// Map from WindowId to WindowRecord
    windows: WindowTable,
    /// Map from owner to its windows, in creation order
    by_owner: HashMap<OwnerId, Vec<WindowId>>,
    /// Source of ids and creation ticks
    ids: IdAllocator,
}

impl WindowRegistry {
    /// Create a new empty window registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create and insert a record for `owner`.
    ///
    /// The z-index comes from `zorder`, the geometry is clamped to
    /// `container`, and the owner's main window is recomputed.
    pub fn register(
        &mut self,
        owner: &str,
        geometry: Geometry,
        opts: &WindowOptions,
        zorder: &ZOrderAllocator,
        container: Size,
        default_min: Size,
    ) -> CasementResult<WindowId> {
        let owner = OwnerId::parse(owner)?;
        let id = self.ids.next_window_id()?;
        let z_index = zorder.allocate_in(&mut self.windows)?;
        let min_size = opts.min_size.unwrap_or(default_min);
        let geometry = clamp_geometry(container, geometry, min_size);

        let mut record = WindowRecord::new(id, owner.clone(), geometry, z_index, self.ids.tick());
        record.title = opts.title.clone();
        record.min_size = min_size;

        self.windows.insert(id, record);
        self.by_owner.entry(owner.clone()).or_default().push(id);
        self.recompute_main_window(&owner);

        info!("Registered {id} for owner {owner} at {geometry}, z {z_index}");
        Ok(id)
    }

    /// Remove a window from the registry.
    ///
    /// Unknown ids are ignored; two close paths may race on the same window.
    pub fn unregister(&mut self, id: WindowId) -> Option<WindowRecord> {
        let record = self.windows.remove(&id)?;

        if let Some(ids) = self.by_owner.get_mut(&record.owner) {
            ids.retain(|w| *w != id);
            if ids.is_empty() {
                self.by_owner.remove(&record.owner);
            }
        }
        self.recompute_main_window(&record.owner);

        info!("Unregistered {id} (owner {})", record.owner);
        Some(record)
    }

    /// Re-derive the main window of `owner`: the earliest created window
    /// wins, every other window of the owner is cleared.
    pub fn recompute_main_window(&mut self, owner: &OwnerId) -> Option<WindowId> {
        let ids = self.by_owner.get(owner)?;
        let main = ids
            .iter()
            .filter_map(|id| self.windows.get(id))
            .min_by_key(|w| (w.created_at, w.id))
            .map(|w| w.id)?;

        for id in ids {
            if let Some(window) = self.windows.get_mut(id) {
                window.is_main_window = *id == main;
            }
        }
        debug!("Main window of {owner} is {main}");
        Some(main)
    }

    /// Get a window by ID
    pub fn get(&self, id: WindowId) -> Option<&WindowRecord> {
        self.windows.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: WindowId) -> Option<&mut WindowRecord> {
        self.windows.get_mut(&id)
    }

    /// Whether `id` is registered
    pub fn contains(&self, id: WindowId) -> bool {
        self.windows.contains_key(&id)
    }

    /// Windows of one owner, oldest first. The owner is trimmed the same
    /// way registration trims it.
    pub fn list_by_owner(&self, owner: &str) -> Vec<&WindowRecord> {
        self.by_owner
            .get(owner.trim())
            .map(|ids| ids.iter().filter_map(|id| self.windows.get(id)).collect())
            .unwrap_or_default()
    }

    /// All windows, ordered by id
    pub fn all(&self) -> Vec<&WindowRecord> {
        let mut windows: Vec<_> = self.windows.values().collect();
        windows.sort_by_key(|w| w.id);
        windows
    }

    /// Iterate over all windows (unordered)
    pub fn iter(&self) -> impl Iterator<Item = (WindowId, &WindowRecord)> {
        self.windows.iter().map(|(id, window)| (*id, window))
    }

    /// Get all window IDs
    pub fn window_ids(&self) -> impl Iterator<Item = WindowId> + '_ {
        self.windows.keys().copied()
    }

    /// Owners with at least one window
    pub fn owners(&self) -> impl Iterator<Item = &OwnerId> {
        self.by_owner.keys()
    }

    /// Highest z-index outside the elevated pool
    pub fn max_normal_z(&self, zorder: &ZOrderAllocator) -> Option<u32> {
        zorder.max_pool_z(&self.windows, None)
    }

    /// Whether any window is currently maximized
    pub fn any_maximized(&self) -> bool {
        self.windows.values().any(|w| w.is_maximized)
    }

    /// Get the count of windows
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub(crate) fn table_mut(&mut self) -> &mut WindowTable {
        &mut self.windows
    }

    pub(crate) fn owner_index(&self) -> &HashMap<OwnerId, Vec<WindowId>> {
        &self.by_owner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CasementError;
    use crate::geometry::DEFAULT_MIN_SIZE;

    const SCREEN: Size = Size {
        width: 1920,
        height: 1080,
    };

    fn add(registry: &mut WindowRegistry, owner: &str) -> WindowId {
        registry
            .register(
                owner,
                Geometry::new(10, 10, 640, 480),
                &WindowOptions::default(),
                &ZOrderAllocator::default(),
                SCREEN,
                DEFAULT_MIN_SIZE,
            )
            .unwrap()
    }

    #[test]
    fn register_rejects_missing_owner() {
        let mut registry = WindowRegistry::new();
        let err = registry
            .register(
                "",
                Geometry::default(),
                &WindowOptions::default(),
                &ZOrderAllocator::default(),
                SCREEN,
                DEFAULT_MIN_SIZE,
            )
            .unwrap_err();
        assert!(matches!(err, CasementError::MissingOwner));
        assert!(registry.is_empty());
    }

    #[test]
    fn first_window_per_owner_is_main() {
        let mut registry = WindowRegistry::new();
        let a = add(&mut registry, "editor");
        let b = add(&mut registry, "editor");
        let c = add(&mut registry, "mail");

        assert!(registry.get(a).unwrap().is_main_window());
        assert!(!registry.get(b).unwrap().is_main_window());
        assert!(registry.get(c).unwrap().is_main_window());
    }

    #[test]
    fn main_window_moves_to_next_oldest() {
        let mut registry = WindowRegistry::new();
        let a = add(&mut registry, "editor");
        let b = add(&mut registry, "editor");
        let c = add(&mut registry, "editor");

        registry.unregister(a);
        assert!(registry.get(b).unwrap().is_main_window());
        assert!(!registry.get(c).unwrap().is_main_window());
    }

    #[test]
    fn owner_entry_dropped_when_empty() {
        let mut registry = WindowRegistry::new();
        let a = add(&mut registry, "editor");
        assert_eq!(registry.list_by_owner("editor").len(), 1);
        registry.unregister(a);
        assert!(registry.list_by_owner("editor").is_empty());
        assert_eq!(registry.owners().count(), 0);
    }

    #[test]
    fn owner_lookup_trims_like_registration() {
        let mut registry = WindowRegistry::new();
        let a = add(&mut registry, " editor ");
        assert_eq!(registry.get(a).unwrap().owner().as_str(), "editor");

        let padded: Vec<WindowId> = registry.list_by_owner(" editor ").iter().map(|w| w.id()).collect();
        assert_eq!(padded, vec![a]);
        assert_eq!(registry.list_by_owner("editor").len(), 1);
    }

    #[test]
    fn unregister_unknown_is_ignored() {
        let mut registry = WindowRegistry::new();
        let a = add(&mut registry, "editor");
        assert!(registry.unregister(a).is_some());
        assert!(registry.unregister(a).is_none());
        assert!(registry.unregister(WindowId::new(77)).is_none());
    }

    #[test]
    fn z_indices_are_sequential() {
        let mut registry = WindowRegistry::new();
        let a = add(&mut registry, "editor");
        let b = add(&mut registry, "mail");
        assert_eq!(registry.get(a).unwrap().z_index(), 1001);
        assert_eq!(registry.get(b).unwrap().z_index(), 1002);
    }
}
