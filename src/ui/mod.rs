//! Drawing surfaces and terminal output.
//!
//! - **canvas**: off-screen grid with line/box drawing and junction blending
//! - **terminal**: crossterm implementation of the `Driver` trait
//!
//! # Flow
//!
//! ```text
//! Canvas::draw_box / border / print
//!     ↓
//! Canvas::present(driver)  → move_cursor + write_cell per drawn cell, flush
//! ```

pub mod canvas;
pub mod terminal;

pub use canvas::{Canvas, Rect};
pub use terminal::CrosstermDriver;
