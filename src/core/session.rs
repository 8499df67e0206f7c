//! Terminal session
//!
//! A session owns the driver and the colour pair registry, so the pair table
//! lives exactly as long as the connection to the terminal it describes.
//! Ending (or dropping) the session unbinds every pair it allocated.

use tracing::{debug, info, warn};

use super::attributes::Attributes;
use super::cell::RenderedCell;
use super::colour::{Colour, Palette, Rgb};
use super::driver::{Capabilities, Driver};
use super::error::{Error, Result};
use super::registry::{ColourSlot, ColourSlotRegistry};
use crate::glyph::{LineStyle, StyledGlyphSet};
use crate::ui::canvas::Canvas;

/// A driver together with the colour pairs bound on it
pub struct Session<D: Driver> {
    driver: D,
    registry: ColourSlotRegistry,
    capabilities: Capabilities,
}

impl<D: Driver> Session<D> {
    /// Open a session sized to the driver's pair limit
    pub fn new(driver: D) -> Self {
        let capabilities = driver.capabilities();
        let pairs = if capabilities.supports_colour {
            capabilities.max_colour_pairs
        } else {
            0
        };
        Self::with_pair_limit(driver, pairs)
    }

    /// Open a session allowing at most `max_pairs` pairs besides pair 0.
    ///
    /// The limit is clamped to what the driver reports.
    pub fn with_pair_limit(driver: D, max_pairs: u16) -> Self {
        let capabilities = driver.capabilities();
        let limit = max_pairs.min(capabilities.max_colour_pairs);
        info!(
            "Session opened: {}x{}, {} colours, {} colour pairs",
            capabilities.columns, capabilities.lines, capabilities.colours, limit
        );

        Self {
            driver,
            registry: ColourSlotRegistry::new(limit),
            capabilities,
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn registry(&self) -> &ColourSlotRegistry {
        &self.registry
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn acquire(&mut self, palette: Palette) -> Result<ColourSlot> {
        self.registry.acquire(&mut self.driver, palette)
    }

    pub fn acquire_pinned(&mut self, palette: Palette) -> Result<ColourSlot> {
        self.registry.acquire_pinned(&mut self.driver, palette)
    }

    pub fn release(&mut self, slot: ColourSlot) -> Result<()> {
        self.registry.release(&mut self.driver, slot)
    }

    pub fn lookup(&self, id: u16) -> Result<ColourSlot> {
        self.registry.lookup(id)
    }

    /// Unbind every pair except pair 0
    pub fn reset_colours(&mut self) -> Result<()> {
        self.registry.reset_all(&mut self.driver)
    }

    /// Redefine the content of a colour
    pub fn define_colour(&mut self, colour: Colour, rgb: Rgb) -> Result<()> {
        if !self.capabilities.can_change_colour {
            return Err(Error::ColourDefinition {
                colour,
                rgb,
                source: std::io::Error::new(
                    std::io::ErrorKind::Unsupported,
                    "terminal cannot change colours",
                ),
            });
        }

        self.driver
            .define_colour(colour.code(), rgb)
            .map_err(|source| Error::ColourDefinition {
                colour,
                rgb,
                source,
            })?;
        debug!("Defined {} as ({})", colour, rgb);
        Ok(())
    }

    /// Render every role of `style` with the given attributes and colours
    pub fn glyphs(
        &self,
        style: LineStyle,
        attributes: Attributes,
        slot: ColourSlot,
    ) -> Result<StyledGlyphSet> {
        StyledGlyphSet::new(style, attributes, slot)
    }

    /// Draw a canvas on the terminal
    pub fn present(&mut self, canvas: &Canvas) -> Result<()> {
        canvas.present(&mut self.driver)
    }

    /// Tear down the colour pairs. Safe to call more than once.
    pub fn end(&mut self) -> Result<()> {
        if self.registry.len() > 1 {
            info!("Session ending, releasing {} colour pairs", self.registry.len() - 1);
        }
        self.registry.reset_all(&mut self.driver)?;
        self.driver.flush()?;
        Ok(())
    }
}

impl Session<super::driver::HeadlessDriver> {
    /// Read back and decode the cell at a position
    pub fn cell_at(&self, col: u16, row: u16) -> Result<Option<RenderedCell>> {
        self.driver
            .cell(col, row)
            .map(|raw| RenderedCell::decode(raw, &self.registry))
            .transpose()
    }
}

impl<D: Driver> Drop for Session<D> {
    fn drop(&mut self) {
        if let Err(e) = self.registry.reset_all(&mut self.driver) {
            warn!("Failed to release colour pairs on drop: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::driver::HeadlessDriver;
    use crate::glyph::{GlyphRole, LineDetail};

    #[test]
    fn test_session_sizes_registry_from_driver() {
        let session = Session::new(HeadlessDriver::with_pair_limit(80, 24, 12));
        assert_eq!(session.registry().capacity(), 12);

        let session = Session::with_pair_limit(HeadlessDriver::with_pair_limit(80, 24, 12), 40);
        assert_eq!(session.registry().capacity(), 12);

        let session = Session::new(HeadlessDriver::with_pair_limit(80, 24, 0));
        assert_eq!(session.registry().capacity(), 0);
    }

    #[test]
    fn test_session_acquire_release() {
        let mut session = Session::new(HeadlessDriver::new(80, 24));
        let slot = session
            .acquire(Palette::new(Colour::Yellow, Colour::Blue))
            .unwrap();
        assert_eq!(slot.id(), 1);
        assert_eq!(session.driver().pair(1), Some((3, 4)));
        assert_eq!(session.lookup(1).unwrap(), slot);

        session.release(slot).unwrap();
        assert!(session.lookup(1).is_err());
        assert_eq!(session.driver().pair(1), None);
    }

    #[test]
    fn test_end_unbinds_everything() {
        let mut session = Session::new(HeadlessDriver::new(80, 24));
        session
            .acquire_pinned(Palette::new(Colour::Red, Colour::Black))
            .unwrap();
        session
            .acquire(Palette::new(Colour::Green, Colour::Black))
            .unwrap();

        session.end().unwrap();
        assert_eq!(session.driver().bound_pairs(), 0);
        assert_eq!(session.registry().len(), 1);
        // Second end is a no-op
        session.end().unwrap();
    }

    #[test]
    fn test_define_colour() {
        let mut session = Session::new(HeadlessDriver::new(80, 24));
        let rgb = Rgb::new(1000, 500, 0).unwrap();
        session.define_colour(Colour::user_defined(10), rgb).unwrap();
        assert_eq!(session.driver().colour(26), Some(rgb));

        // The driver refuses to redefine the default colour
        assert!(matches!(
            session.define_colour(Colour::Default, rgb),
            Err(Error::ColourDefinition { .. })
        ));
    }

    #[test]
    fn test_glyphs_and_read_back() {
        let mut session = Session::new(HeadlessDriver::new(10, 3));
        let slot = session
            .acquire(Palette::new(Colour::Cyan, Colour::Default))
            .unwrap();
        let glyphs = session
            .glyphs(LineStyle::Heavy(LineDetail::Normal), Attributes::BOLD, slot)
            .unwrap();
        let corner = *glyphs.cell(GlyphRole::UpperLeftCorner);

        let mut canvas = Canvas::new(10, 3);
        canvas.put_glyph(2, 1, &glyphs, GlyphRole::UpperLeftCorner);
        session.present(&canvas).unwrap();

        assert_eq!(session.cell_at(2, 1).unwrap(), Some(corner));
        assert_eq!(session.cell_at(3, 1).unwrap(), None);

        // Once the pair is gone the stored cell no longer decodes
        session.release(slot).unwrap();
        assert!(matches!(session.cell_at(2, 1), Err(Error::NotDefined(1))));
    }
}
