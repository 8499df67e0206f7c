//! cellterm - character-cell terminal toolkit
//!
//! Draws styled text, lines and boxes on a grid of cells. Each cell carries a
//! glyph, display attributes and a colour pair; this crate owns the parts
//! that are more than a pass-through to the terminal:
//!
//! - **Colour pairs**: the terminal offers a fixed number of numbered pairs.
//!   `ColourSlotRegistry` hands them out per palette, reuses released ids and
//!   reports exhaustion instead of overwriting live pairs.
//! - **Box drawing**: `GlyphRole` encodes what each line piece looks like as a
//!   3x3 occupancy mask, so overlapping pieces resolve to the right junction.
//!   `GlyphMatrix` maps every built-in line style and role to its code point.
//!
//! # Example
//!
//! ```
//! use cellterm::{Attributes, Canvas, Colour, HeadlessDriver, LineStyle, Palette, Rect, Session};
//!
//! # fn main() -> cellterm::Result<()> {
//! let mut session = Session::new(HeadlessDriver::new(20, 5));
//! let slot = session.acquire(Palette::new(Colour::Yellow, Colour::Blue))?;
//! let glyphs = session.glyphs(LineStyle::default(), Attributes::BOLD, slot)?;
//!
//! let mut canvas = Canvas::new(20, 5);
//! canvas.draw_box(Rect::new(0, 0, 10, 5), &glyphs);
//! canvas.draw_box(Rect::new(9, 0, 10, 5), &glyphs);
//! session.present(&canvas)?;
//! session.end()?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod glyph;
pub mod ui;

pub use crate::core::attributes::Attributes;
pub use crate::core::cell::{RawCell, RenderedCell};
pub use crate::core::colour::{Colour, Palette, Rgb};
pub use crate::core::driver::{Capabilities, Driver, HeadlessDriver};
pub use crate::core::error::{Error, ReleaseRefusal, Result};
pub use crate::core::registry::{ColourSlot, ColourSlotRegistry};
pub use crate::core::session::Session;
pub use crate::glyph::{GlyphMatrix, GlyphRole, LineDetail, LineStyle, StyledGlyphSet, UserGlyphs};
pub use crate::ui::{Canvas, CrosstermDriver, Rect};
