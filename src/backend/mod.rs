//! Render sink implementations

pub mod ascii;

pub use ascii::AsciiRenderer;
