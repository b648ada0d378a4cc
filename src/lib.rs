//! casement - window registry and geometry engine for a desktop shell
//!
//! casement keeps the book on every open window of a desktop-environment
//! shell and nothing else:
//!
//! - **Registry**: window records, owners, and each owner's main window
//! - **Stacking**: z-index allocation with renormalization, plus an elevated
//!   band above the taskbar for maximized windows
//! - **Focus and window state**: single focus, minimize/maximize/restore
//! - **Gestures**: drag and edge/corner resize, clamped to the container
//!
//! Drawing is someone else's job; the engine pushes geometry, stacking and
//! focus changes through a narrow [`render::RenderSink`] after every call.
//!
//! # Architecture
//!
//! - [`window`]: records, registry, z-order, focus and the [`WindowManager`] facade
//! - [`geometry`]: rectangles and the clamp functions
//! - [`gesture`]: drag/resize state machine and anchor arithmetic
//! - [`event`]: window events, listeners and per-window hooks
//! - [`render`]: the render seam and in-memory sinks
//! - [`backend`]: the ASCII renderer used for replay and tests
//! - [`command`]: the replay script language
//! - [`config`]: sway-style configuration

#![warn(rust_2018_idioms)]

pub mod backend;
pub mod command;
pub mod config;
pub mod error;
pub mod event;
pub mod geometry;
pub mod gesture;
pub mod render;
pub mod window;

pub use error::{CasementError, CasementResult};
pub use window::{WindowId, WindowManager, WindowOptions, WindowRecord};
