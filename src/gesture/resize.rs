//! Resize anchors and the edge arithmetic behind a resize gesture

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::CasementError;
use crate::geometry::{Geometry, Size};

bitflags::bitflags! {
    /// Edges that move while resizing
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ResizeAnchor: u32 {
        const TOP = 1;
        const BOTTOM = 2;
        const LEFT = 4;
        const TOP_LEFT = 5;
        const BOTTOM_LEFT = 6;
        const RIGHT = 8;
        const TOP_RIGHT = 9;
        const BOTTOM_RIGHT = 10;
    }
}

impl ResizeAnchor {
    /// Whether the anchor names exactly one edge or corner
    pub fn is_valid(&self) -> bool {
        let horizontal = self.contains(ResizeAnchor::LEFT) && self.contains(ResizeAnchor::RIGHT);
        let vertical = self.contains(ResizeAnchor::TOP) && self.contains(ResizeAnchor::BOTTOM);
        !self.is_empty() && !horizontal && !vertical
    }

    pub fn as_str(&self) -> &'static str {
        ANCHOR_NAMES
            .iter()
            .find(|(anchor, _)| anchor == self)
            .map(|(_, name)| *name)
            .unwrap_or("invalid")
    }
}

const ANCHOR_NAMES: [(ResizeAnchor, &str); 8] = [
    (ResizeAnchor::TOP, "top"),
    (ResizeAnchor::BOTTOM, "bottom"),
    (ResizeAnchor::LEFT, "left"),
    (ResizeAnchor::RIGHT, "right"),
    (ResizeAnchor::TOP_LEFT, "top-left"),
    (ResizeAnchor::TOP_RIGHT, "top-right"),
    (ResizeAnchor::BOTTOM_LEFT, "bottom-left"),
    (ResizeAnchor::BOTTOM_RIGHT, "bottom-right"),
];

impl fmt::Display for ResizeAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResizeAnchor {
    type Err = CasementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ANCHOR_NAMES
            .iter()
            .find(|(_, name)| *name == s)
            .map(|(anchor, _)| *anchor)
            .ok_or_else(|| CasementError::InvalidArgument(format!("unknown resize anchor '{s}'")))
    }
}

impl Serialize for ResizeAnchor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Compute the geometry for a pointer delta applied to `initial`.
///
/// The edge opposite the anchor stays put. Sizes are floored at `min` and
/// capped so the fixed edge plus the size stays inside `container`; the
/// moved edge's position is derived from the capped size, so the two can
/// never disagree.
pub fn resize_geometry(
    initial: Geometry,
    anchor: ResizeAnchor,
    dx: i32,
    dy: i32,
    container: Size,
    min: Size,
) -> Geometry {
    let (left, width) = resize_axis(
        initial.left,
        initial.width,
        dx,
        anchor.contains(ResizeAnchor::LEFT),
        anchor.contains(ResizeAnchor::RIGHT),
        container.width,
        min.width,
    );
    let (top, height) = resize_axis(
        initial.top,
        initial.height,
        dy,
        anchor.contains(ResizeAnchor::TOP),
        anchor.contains(ResizeAnchor::BOTTOM),
        container.height,
        min.height,
    );
    Geometry::new(left, top, width, height)
}

fn resize_axis(
    start: i32,
    extent: i32,
    delta: i32,
    moves_start: bool,
    moves_end: bool,
    bound: i32,
    min: i32,
) -> (i32, i32) {
    if moves_end {
        let room = bound.saturating_sub(start);
        let size = extent.saturating_add(delta).min(room).max(min);
        (start, size)
    } else if moves_start {
        let far = start.saturating_add(extent).min(bound);
        let size = extent.saturating_sub(delta).min(far).max(min);
        // Only a container narrower than `min` can push this below zero.
        (far.saturating_sub(size).max(0), size)
    } else {
        (start, extent)
    }
}
