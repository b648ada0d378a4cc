//! Container-relative geometry and the clamp functions
//!
//! Every geometry change (register, drag, resize, restore, container resize)
//! goes through these functions. They are pure and never fail: a window that
//! cannot fit its container degrades to the top-left corner instead.

use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Smallest size a window may be resized or registered to.
pub const DEFAULT_MIN_SIZE: Size = Size {
    width: 300,
    height: 200,
};

/// Top-left corner of a window, relative to the container
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub left: i32,
    pub top: i32,
}

impl Position {
    pub const ORIGIN: Position = Position { left: 0, top: 0 };

    pub fn new(left: i32, top: i32) -> Self {
        Self { left, top }
    }

    /// Offset by a pointer delta
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            left: self.left.saturating_add(dx),
            top: self.top.saturating_add(dy),
        }
    }
}

/// Width and height in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Full window rectangle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Geometry {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl Geometry {
    pub fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn from_parts(position: Position, size: Size) -> Self {
        Self {
            left: position.left,
            top: position.top,
            width: size.width,
            height: size.height,
        }
    }

    /// Geometry covering the whole container
    pub fn covering(container: Size) -> Self {
        Self::from_parts(Position::ORIGIN, container)
    }

    pub fn position(&self) -> Position {
        Position::new(self.left, self.top)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> i32 {
        self.left.saturating_add(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.top.saturating_add(self.height)
    }

    /// Whether the rectangle lies fully inside `container`
    pub fn is_contained_in(&self, container: Size) -> bool {
        self.left >= 0
            && self.top >= 0
            && self.right() <= container.width
            && self.bottom() <= container.height
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{}+{}+{}",
            self.width, self.height, self.left, self.top
        )
    }
}

/// Clamp a desired position so a window of `size` stays inside `container`.
///
/// A window wider (or taller) than the container is pinned to 0 on that axis;
/// containment cannot hold in that case and the caller gets the best effort.
pub fn clamp_position(container: Size, size: Size, desired: Position) -> Position {
    Position {
        left: clamp_axis(desired.left, container.width, size.width),
        top: clamp_axis(desired.top, container.height, size.height),
    }
}

fn clamp_axis(desired: i32, container: i32, extent: i32) -> i32 {
    if extent > container {
        return 0;
    }
    desired.min(container - extent).max(0)
}

/// Clamp a desired size so a window at `pos` ends inside `container`,
/// never going below `min`.
///
/// The floor wins over the ceiling: a container smaller than `min` yields
/// `min`, which then overflows the container.
pub fn clamp_size(container: Size, pos: Position, desired: Size, min: Size) -> Size {
    Size {
        width: desired
            .width
            .min(container.width.saturating_sub(pos.left))
            .max(min.width),
        height: desired
            .height
            .min(container.height.saturating_sub(pos.top))
            .max(min.height),
    }
}

/// Clamp a whole rectangle: the size is capped to the container first, then
/// the position is slid so that size fits.
pub fn clamp_geometry(container: Size, desired: Geometry, min: Size) -> Geometry {
    let size = clamp_size(container, Position::ORIGIN, desired.size(), min);
    let position = clamp_position(container, size, desired.position());
    Geometry::from_parts(position, size)
}

/// Supplies the drawable area on demand. Never cached by the engine.
pub trait ContainerBounds {
    fn bounds(&self) -> Size;
}

impl ContainerBounds for Size {
    fn bounds(&self) -> Size {
        *self
    }
}

/// Container size handle shared between the host and the window manager
#[derive(Debug, Clone, Default)]
pub struct SharedContainer(Rc<Cell<Size>>);

impl SharedContainer {
    pub fn new(size: Size) -> Self {
        Self(Rc::new(Cell::new(size)))
    }

    pub fn set(&self, size: Size) {
        self.0.set(size);
    }

    pub fn get(&self) -> Size {
        self.0.get()
    }
}

impl ContainerBounds for SharedContainer {
    fn bounds(&self) -> Size {
        self.0.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Size = Size {
        width: 1920,
        height: 1080,
    };

    #[test]
    fn position_pulls_negative_coordinates_in() {
        let pos = clamp_position(SCREEN, Size::new(800, 600), Position::new(-50, -1));
        assert_eq!(pos, Position::new(0, 0));
    }

    #[test]
    fn position_pushes_overflow_back() {
        let pos = clamp_position(SCREEN, Size::new(800, 600), Position::new(1500, 900));
        assert_eq!(pos, Position::new(1120, 480));
    }

    #[test]
    fn oversized_window_pins_to_origin() {
        let pos = clamp_position(
            Size::new(640, 480),
            Size::new(800, 600),
            Position::new(30, 40),
        );
        assert_eq!(pos, Position::ORIGIN);
    }

    #[test]
    fn size_is_floored_and_capped() {
        let min = DEFAULT_MIN_SIZE;
        assert_eq!(
            clamp_size(SCREEN, Position::new(100, 100), Size::new(10, 10), min),
            min
        );
        assert_eq!(
            clamp_size(SCREEN, Position::new(1000, 500), Size::new(5000, 5000), min),
            Size::new(920, 580)
        );
    }

    #[test]
    fn floor_beats_ceiling_in_tiny_container() {
        let size = clamp_size(
            Size::new(200, 100),
            Position::ORIGIN,
            Size::new(150, 90),
            DEFAULT_MIN_SIZE,
        );
        assert_eq!(size, DEFAULT_MIN_SIZE);
    }

    #[test]
    fn geometry_keeps_size_and_slides_position() {
        let clamped = clamp_geometry(
            SCREEN,
            Geometry::new(1800, 0, 800, 600),
            DEFAULT_MIN_SIZE,
        );
        assert_eq!(clamped, Geometry::new(1120, 0, 800, 600));
    }

    #[test]
    fn clamp_output_is_always_contained() {
        let containers = [Size::new(300, 200), Size::new(1024, 768), SCREEN];
        let desired = [-5000, -1, 0, 17, 299, 640, 1919, 4000];
        for container in containers {
            for &left in &desired {
                for &top in &desired {
                    for &w in &desired {
                        for &h in &desired {
                            let g = clamp_geometry(
                                container,
                                Geometry::new(left, top, w, h),
                                DEFAULT_MIN_SIZE,
                            );
                            assert!(
                                g.is_contained_in(container),
                                "{g} escapes {container}"
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn shared_container_reflects_updates() {
        let shared = SharedContainer::new(SCREEN);
        let view = shared.clone();
        shared.set(Size::new(800, 600));
        assert_eq!(view.bounds(), Size::new(800, 600));
    }
}
