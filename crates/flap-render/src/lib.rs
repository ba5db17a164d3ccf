#![forbid(unsafe_code)]

//! Render kernel: colors, cells, buffers, and rectangles.
//!
//! Widgets in `flap-widgets` draw into a [`buffer::Buffer`]; presenting the
//! buffer to a terminal is left to the host.

pub mod buffer;
pub mod cell;
pub mod geometry;

pub use buffer::Buffer;
pub use cell::{Cell, PackedRgba, StyleFlags};
pub use geometry::Rect;
