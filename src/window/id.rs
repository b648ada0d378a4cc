//! Type-safe ID types for window management
//!
//! This module provides strongly-typed IDs that:
//! - Cannot be zero (using NonZeroU64)
//! - Cannot be accidentally mixed up (different types)
//! - Are generated per registry, so independent managers never share state

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::num::NonZeroU64;

use crate::error::{CasementError, CasementResult};

/// Unique identifier for windows
///
/// This ID is guaranteed to be:
/// - Non-zero (can use Option<WindowId> without overhead)
/// - Unique within the registry that issued it
/// - Type-safe (cannot be confused with owner identifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct WindowId(NonZeroU64);

impl WindowId {
    /// Create a WindowId from a raw value
    ///
    /// Returns None if the value is zero
    pub fn from_raw(id: u64) -> Option<Self> {
        NonZeroU64::new(id).map(WindowId)
    }

    /// Create a WindowId for testing
    ///
    /// # Panics
    /// Panics if id is zero
    pub fn new(id: u32) -> Self {
        WindowId(NonZeroU64::new(id as u64).expect("WindowId cannot be zero"))
    }

    /// Get the raw ID value
    pub fn get(&self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Window({})", self.0)
    }
}

/// Monotonic source of window ids and creation ticks
#[derive(Debug)]
pub(crate) struct IdAllocator {
    next_id: u64,
    clock: u64,
}

impl IdAllocator {
    pub(crate) fn new() -> Self {
        Self {
            next_id: 1,
            clock: 0,
        }
    }

    /// Issue the next window id
    pub(crate) fn next_window_id(&mut self) -> CasementResult<WindowId> {
        let id = WindowId::from_raw(self.next_id).ok_or_else(|| {
            CasementError::InvariantViolation("window id counter wrapped".to_string())
        })?;
        self.next_id = self.next_id.checked_add(1).ok_or_else(|| {
            CasementError::InvariantViolation("window id counter overflow".to_string())
        })?;
        Ok(id)
    }

    /// Advance the creation clock; strictly increasing per registry
    pub(crate) fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Identifier of the process or application that owns windows
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    /// Parse an owner id, rejecting empty or blank values
    pub fn parse(raw: &str) -> CasementResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CasementError::MissingOwner);
        }
        Ok(OwnerId(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for OwnerId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_id_is_unique() {
        let mut ids = IdAllocator::new();
        let id1 = ids.next_window_id().unwrap();
        let id2 = ids.next_window_id().unwrap();
        assert_ne!(id1, id2);
        assert_eq!(id1.get(), 1);
    }

    #[test]
    fn allocators_are_independent() {
        let mut a = IdAllocator::new();
        let mut b = IdAllocator::new();
        assert_eq!(a.next_window_id().unwrap(), b.next_window_id().unwrap());
    }

    #[test]
    fn window_id_from_raw_rejects_zero() {
        assert!(WindowId::from_raw(0).is_none());
        assert!(WindowId::from_raw(1).is_some());
    }

    #[test]
    fn clock_is_strictly_increasing() {
        let mut ids = IdAllocator::new();
        let first = ids.tick();
        assert!(ids.tick() > first);
    }

    #[test]
    fn owner_rejects_blank() {
        assert!(matches!(OwnerId::parse(""), Err(CasementError::MissingOwner)));
        assert!(matches!(OwnerId::parse("   "), Err(CasementError::MissingOwner)));
        assert_eq!(OwnerId::parse(" notes ").unwrap().as_str(), "notes");
    }
}
