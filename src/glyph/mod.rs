//! Box-drawing glyphs.
//!
//! - **role**: the fifteen glyph roles and junction resolution (`transform`)
//! - **style**: line families and dash details, user-defined glyph tables
//! - **matrix**: static (style, role) to code point table
//! - **set**: styled glyph sets ready to draw
//!
//! # Flow
//!
//! ```text
//! LineStyle ──┐
//! Attributes ─┼─> StyledGlyphSet::new ──> RenderedCell per GlyphRole
//! ColourSlot ─┘          │
//!                  GlyphMatrix (built-in styles)
//! ```

pub mod matrix;
pub mod role;
pub mod set;
pub mod style;

pub use matrix::GlyphMatrix;
pub use role::GlyphRole;
pub use set::StyledGlyphSet;
pub use style::{LineDetail, LineStyle, UserGlyphs};
