//! Rendered cells
//!
//! A `RenderedCell` is the smallest drawable unit: one code point, its display
//! attributes and the colour slot it is painted with. `RawCell` is the same
//! triple in the driver's terms, with the slot reduced to its pair id.

use unicode_width::UnicodeWidthChar;

use super::attributes::Attributes;
use super::error::{Error, Result};
use super::registry::{ColourSlot, ColourSlotRegistry};

/// Cell as stored by the driver
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RawCell {
    pub code_point: u32,
    pub attributes: Attributes,
    pub pair: u16,
}

/// Fully specified drawable cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderedCell {
    ch: char,
    attributes: Attributes,
    slot: ColourSlot,
}

impl RenderedCell {
    /// Combine a code point with attributes and a colour slot.
    ///
    /// Code points that are not Unicode scalars, or that take no column when
    /// drawn (controls, combining marks), cannot stand alone in a cell.
    pub fn new(code_point: u32, attributes: Attributes, slot: ColourSlot) -> Result<Self> {
        let rejected = || Error::CellRejected {
            code_point,
            attributes,
            pair: slot.id(),
        };

        let ch = char::from_u32(code_point).ok_or_else(rejected)?;
        match ch.width() {
            Some(w) if w > 0 => {}
            _ => return Err(rejected()),
        }

        Ok(Self {
            ch,
            attributes,
            slot,
        })
    }

    /// Rebuild a cell read back from the driver
    pub fn decode(raw: RawCell, registry: &ColourSlotRegistry) -> Result<Self> {
        let slot = registry.lookup(raw.pair)?;
        Self::new(raw.code_point, raw.attributes, slot)
    }

    /// Split into the triple the cell was built from
    pub fn decompose(&self) -> (u32, Attributes, ColourSlot) {
        (self.ch as u32, self.attributes, self.slot)
    }

    pub fn raw(&self) -> RawCell {
        RawCell {
            code_point: self.ch as u32,
            attributes: self.attributes,
            pair: self.slot.id(),
        }
    }

    pub fn code_point(&self) -> u32 {
        self.ch as u32
    }

    pub fn character(&self) -> char {
        self.ch
    }

    pub fn attributes(&self) -> Attributes {
        self.attributes
    }

    pub fn colour_slot(&self) -> ColourSlot {
        self.slot
    }

    /// Columns occupied on screen
    pub fn width(&self) -> usize {
        self.ch.width().unwrap_or(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::colour::{Colour, Palette};
    use crate::core::driver::HeadlessDriver;

    #[test]
    fn test_decompose_returns_inputs() {
        let slot = ColourSlot::default_slot();
        let cell = RenderedCell::new(0x250c, Attributes::BOLD, slot).unwrap();
        assert_eq!(cell.decompose(), (0x250c, Attributes::BOLD, slot));
        assert_eq!(cell.character(), '┌');
        assert_eq!(cell.width(), 1);
    }

    #[test]
    fn test_rejects_invalid_code_points() {
        let slot = ColourSlot::default_slot();
        // Surrogate
        assert!(matches!(
            RenderedCell::new(0xd800, Attributes::NORMAL, slot),
            Err(Error::CellRejected { code_point: 0xd800, pair: 0, .. })
        ));
        // Control character
        assert!(RenderedCell::new(0x07, Attributes::NORMAL, slot).is_err());
        // Combining acute accent
        assert!(RenderedCell::new(0x0301, Attributes::NORMAL, slot).is_err());
    }

    #[test]
    fn test_wide_character_accepted() {
        let cell = RenderedCell::new('日' as u32, Attributes::NORMAL, ColourSlot::default_slot())
            .unwrap();
        assert_eq!(cell.width(), 2);
    }

    #[test]
    fn test_decode_through_registry() {
        let mut driver = HeadlessDriver::new(10, 5);
        let mut registry = ColourSlotRegistry::new(8);
        let slot = registry
            .acquire(&mut driver, Palette::new(Colour::Red, Colour::Black))
            .unwrap();
        let cell = RenderedCell::new('x' as u32, Attributes::UNDERLINE, slot).unwrap();

        let decoded = RenderedCell::decode(cell.raw(), &registry).unwrap();
        assert_eq!(decoded, cell);

        let orphan = RawCell {
            pair: 7,
            ..cell.raw()
        };
        assert!(matches!(
            RenderedCell::decode(orphan, &registry),
            Err(Error::NotDefined(7))
        ));
    }
}
