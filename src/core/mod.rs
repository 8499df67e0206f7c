//! Core cell and colour components.
//!
//! - **colour**: colours, palettes and RGB definitions
//! - **attributes**: text attribute flags
//! - **cell**: rendered cells and their raw driver form
//! - **registry**: colour pair bookkeeping
//! - **driver**: the terminal driver boundary and an in-memory driver
//! - **session**: a driver plus the colour pairs bound on it
//!
//! # Architecture
//!
//! ```text
//! Session
//! ├── Driver (pairs, colours, cell output)
//! └── ColourSlotRegistry
//!     └── ColourSlot (pair id + palette)
//!         └── RenderedCell (code point + attributes + slot)
//! ```

pub mod attributes;
pub mod cell;
pub mod colour;
pub mod driver;
pub mod error;
pub mod registry;
pub mod session;
