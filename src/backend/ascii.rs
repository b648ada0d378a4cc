//! ASCII renderer backend for testing
//!
//! This backend keeps what the manager pushed through [`RenderSink`] and
//! draws it as box art, lowest z-index first, so overlapping windows hide
//! the ones below them.

use std::collections::HashMap;

use crate::geometry::{Geometry, Size};
use crate::render::RenderSink;
use crate::window::{WindowId, ZOrderAllocator};

/// ASCII grid dimensions
const DEFAULT_WIDTH: usize = 96;
const DEFAULT_HEIGHT: usize = 27;

/// Box drawing characters for one window style
#[derive(Debug, Clone, Copy)]
struct BoxStyle {
    tl: char,
    tr: char,
    bl: char,
    br: char,
    h: char,
    v: char,
}

// Normal window (single line)
const NORMAL: BoxStyle = BoxStyle {
    tl: '┌',
    tr: '┐',
    bl: '└',
    br: '┘',
    h: '─',
    v: '│',
};

// Focused window (double line)
const FOCUSED: BoxStyle = BoxStyle {
    tl: '╔',
    tr: '╗',
    bl: '╚',
    br: '╝',
    h: '═',
    v: '║',
};

// Window above the overlay (heavy)
const ELEVATED: BoxStyle = BoxStyle {
    tl: '┏',
    tr: '┓',
    bl: '┗',
    br: '┛',
    h: '━',
    v: '┃',
};

/// Last state pushed for one window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AsciiWindow {
    pub id: WindowId,
    pub geometry: Geometry,
    pub z_index: u32,
    pub focused: bool,
    pub visible: bool,
}

impl AsciiWindow {
    fn new(id: WindowId) -> Self {
        Self {
            id,
            geometry: Geometry::default(),
            z_index: 0,
            focused: false,
            visible: true,
        }
    }
}

/// ASCII render sink
#[derive(Debug, Clone)]
pub struct AsciiRenderer {
    /// Grid dimensions
    width: usize,
    height: usize,

    /// Window state as last pushed
    windows: HashMap<WindowId, AsciiWindow>,

    /// Windows above this z-index are drawn with heavy lines
    overlay_z: u32,
}

impl Default for AsciiRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl AsciiRenderer {
    /// Create a new ASCII renderer with the given grid dimensions
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            windows: HashMap::new(),
            overlay_z: ZOrderAllocator::DEFAULT_OVERLAY_Z,
        }
    }

    /// Use a non-default overlay reservation for the heavy style
    pub fn with_overlay_z(mut self, overlay_z: u32) -> Self {
        self.overlay_z = overlay_z;
        self
    }

    /// Get the width of the ASCII grid
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the height of the ASCII grid
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn window(&self, id: WindowId) -> Option<&AsciiWindow> {
        self.windows.get(&id)
    }

    /// Windows in drawing order (ascending z-index)
    pub fn stacking(&self) -> Vec<&AsciiWindow> {
        let mut windows: Vec<_> = self.windows.values().collect();
        windows.sort_by_key(|w| (w.z_index, w.id));
        windows
    }

    fn entry(&mut self, id: WindowId) -> &mut AsciiWindow {
        self.windows.entry(id).or_insert_with(|| AsciiWindow::new(id))
    }

    /// Render the current state, scaling `container` onto the grid
    pub fn render(&self, container: Size) -> String {
        let mut grid = vec![vec![' '; self.width]; self.height];
        let scale_x = self.width as f64 / container.width.max(1) as f64;
        let scale_y = self.height as f64 / container.height.max(1) as f64;

        for window in self.stacking().into_iter().filter(|w| w.visible) {
            let rect = GridRect::from_geometry(window.geometry, scale_x, scale_y, self.width, self.height);
            let style = if window.z_index > self.overlay_z {
                ELEVATED
            } else if window.focused {
                FOCUSED
            } else {
                NORMAL
            };
            draw_window(&mut grid, rect, style, window);
        }

        // Convert grid to string
        let mut output = String::with_capacity((self.width + 1) * self.height * 3);
        for row in &grid {
            output.extend(row.iter());
            output.push('\n');
        }
        output
    }
}

impl RenderSink for AsciiRenderer {
    fn apply_geometry(&mut self, window_id: WindowId, geometry: Geometry) {
        self.entry(window_id).geometry = geometry;
    }

    fn apply_z_index(&mut self, window_id: WindowId, z_index: u32) {
        self.entry(window_id).z_index = z_index;
    }

    fn apply_focus_visual(&mut self, window_id: WindowId, focused: bool) {
        self.entry(window_id).focused = focused;
    }

    fn apply_visibility(&mut self, window_id: WindowId, visible: bool) {
        self.entry(window_id).visible = visible;
    }

    fn window_removed(&mut self, window_id: WindowId) {
        self.windows.remove(&window_id);
    }
}

/// Inclusive cell bounds of a window on the grid
#[derive(Debug, Clone, Copy)]
struct GridRect {
    x1: usize,
    y1: usize,
    x2: usize,
    y2: usize,
}

impl GridRect {
    fn from_geometry(geometry: Geometry, scale_x: f64, scale_y: f64, width: usize, height: usize) -> Self {
        let cell = |value: i32, scale: f64, limit: usize| -> usize {
            ((value.max(0) as f64 * scale) as usize).min(limit - 1)
        };
        Self {
            x1: cell(geometry.left, scale_x, width),
            y1: cell(geometry.top, scale_y, height),
            x2: cell(geometry.right(), scale_x, width + 1).saturating_sub(1).min(width - 1),
            y2: cell(geometry.bottom(), scale_y, height + 1).saturating_sub(1).min(height - 1),
        }
    }
}

/// Draw a window: clear its area, then the border and label
fn draw_window(grid: &mut [Vec<char>], rect: GridRect, style: BoxStyle, window: &AsciiWindow) {
    let GridRect { x1, y1, x2, y2 } = rect;
    // Ensure bounds are valid
    if x2 <= x1 || y2 <= y1 {
        return;
    }

    for row in grid.iter_mut().take(y2 + 1).skip(y1) {
        row[x1..=x2].fill(' ');
    }

    // Top and bottom borders
    grid[y1][x1] = style.tl;
    grid[y1][x2] = style.tr;
    grid[y2][x1] = style.bl;
    grid[y2][x2] = style.br;
    for x in (x1 + 1)..x2 {
        grid[y1][x] = style.h;
        grid[y2][x] = style.h;
    }

    // Side borders
    for row in grid.iter_mut().take(y2).skip(y1 + 1) {
        row[x1] = style.v;
        row[x2] = style.v;
    }

    // Window id and focus marker in the top-left corner
    if y1 + 1 < y2 {
        let mut label = window.id.get().to_string();
        if window.focused {
            label.push_str(" [F]");
        }
        for (x, ch) in ((x1 + 2)..x2).zip(label.chars()) {
            grid[y1 + 1][x] = ch;
        }
    }
}
