//! Line and box drawing surface.
//!
//! A `Canvas` is an off-screen grid of rendered cells. Every cell drawn
//! through `put_glyph` also remembers the `GlyphRole` it plays, so that a
//! later line crossing it can be blended into the right junction:
//!
//! ```text
//! draw_box(0,0,5,3)   draw_box(4,0,5,3)   result
//! ┌───┐               ┌───┐               ┌───┬───┐
//! │   │                   │   │           │   │   │
//! └───┘               └───┘               └───┴───┘
//! ```
//!
//! Junctions whose arms would point off the canvas are clipped, so a cross
//! drawn on the top row becomes an upper tee.

use tracing::debug;
use unicode_width::UnicodeWidthChar;

use crate::core::attributes::Attributes;
use crate::core::cell::RenderedCell;
use crate::core::driver::Driver;
use crate::core::error::Result;
use crate::core::registry::ColourSlot;
use crate::glyph::{GlyphRole, StyledGlyphSet};

/// Rectangle in cell coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Last column inside the rectangle
    fn right(&self) -> u16 {
        self.x.saturating_add(self.width.saturating_sub(1))
    }

    /// Last row inside the rectangle
    fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height.saturating_sub(1))
    }
}

#[derive(Clone, Copy, Debug)]
struct CanvasCell {
    cell: RenderedCell,
    role: Option<GlyphRole>,
}

/// Off-screen grid of cells
pub struct Canvas {
    cols: u16,
    rows: u16,
    cells: Vec<Option<CanvasCell>>,
}

impl Canvas {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            cells: vec![None; cols as usize * rows as usize],
        }
    }

    pub fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    /// Whole canvas as a rectangle
    pub fn area(&self) -> Rect {
        Rect::new(0, 0, self.cols, self.rows)
    }

    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = None);
    }

    /// Cell drawn at a position
    pub fn cell(&self, col: u16, row: u16) -> Option<&RenderedCell> {
        self.index(col, row)
            .and_then(|i| self.cells[i].as_ref())
            .map(|c| &c.cell)
    }

    /// Role of the glyph drawn at a position, `None` for text or empty cells
    pub fn role_at(&self, col: u16, row: u16) -> Option<GlyphRole> {
        self.index(col, row)
            .and_then(|i| self.cells[i])
            .and_then(|c| c.role)
    }

    /// Write text starting at a position; anything past the right edge is cut.
    ///
    /// Wide characters take two columns, the second one is left empty.
    pub fn print(
        &mut self,
        col: u16,
        row: u16,
        text: &str,
        attributes: Attributes,
        slot: ColourSlot,
    ) -> Result<()> {
        if row >= self.rows {
            return Ok(());
        }

        let mut x = col as usize;
        for ch in text.chars() {
            let width = ch.width().unwrap_or(0);
            if width == 0 {
                continue;
            }
            if x + width > self.cols as usize {
                break;
            }

            let cell = RenderedCell::new(ch as u32, attributes, slot)?;
            let i = row as usize * self.cols as usize + x;
            self.cells[i] = Some(CanvasCell { cell, role: None });
            for spill in 1..width {
                self.cells[i + spill] = None;
            }
            x += width;
        }
        Ok(())
    }

    /// Draw one box-drawing glyph, merging it with what is already there
    pub fn put_glyph(&mut self, col: u16, row: u16, glyphs: &StyledGlyphSet, role: GlyphRole) {
        let Some(i) = self.index(col, row) else {
            return;
        };

        let blended = match self.cells[i].and_then(|c| c.role) {
            Some(existing) => existing.transform(role, true).unwrap_or(role),
            None => role,
        };
        let resolved = self.clip(col, row, blended);

        self.cells[i] = Some(CanvasCell {
            cell: *glyphs.cell(resolved),
            role: Some(resolved),
        });
    }

    pub fn horizontal_line(&mut self, col: u16, row: u16, len: u16, glyphs: &StyledGlyphSet) {
        for x in col..col.saturating_add(len).min(self.cols) {
            self.put_glyph(x, row, glyphs, GlyphRole::HorizontalLine);
        }
    }

    pub fn vertical_line(&mut self, col: u16, row: u16, len: u16, glyphs: &StyledGlyphSet) {
        for y in row..row.saturating_add(len).min(self.rows) {
            self.put_glyph(col, y, glyphs, GlyphRole::VerticalLine);
        }
    }

    /// Outline a rectangle. Rectangles one cell thin degrade to a line.
    pub fn draw_box(&mut self, rect: Rect, glyphs: &StyledGlyphSet) {
        self.outline(
            rect,
            glyphs,
            [
                GlyphRole::HorizontalLine,
                GlyphRole::HorizontalLine,
                GlyphRole::VerticalLine,
                GlyphRole::VerticalLine,
            ],
        );
    }

    /// Frame the whole canvas using the window-border roles
    pub fn border(&mut self, glyphs: &StyledGlyphSet) {
        self.outline(
            self.area(),
            glyphs,
            [
                GlyphRole::UpperHorizontalLine,
                GlyphRole::LowerHorizontalLine,
                GlyphRole::LeftVerticalLine,
                GlyphRole::RightVerticalLine,
            ],
        );
    }

    /// Edges are given as [top, bottom, left, right]
    fn outline(&mut self, rect: Rect, glyphs: &StyledGlyphSet, edges: [GlyphRole; 4]) {
        if rect.width == 0 || rect.height == 0 {
            return;
        }
        if rect.height == 1 {
            self.horizontal_line(rect.x, rect.y, rect.width, glyphs);
            return;
        }
        if rect.width == 1 {
            self.vertical_line(rect.x, rect.y, rect.height, glyphs);
            return;
        }

        let (left, top, right, bottom) = (rect.x, rect.y, rect.right(), rect.bottom());
        debug!("Outline {}x{} at ({}, {})", rect.width, rect.height, left, top);

        self.put_glyph(left, top, glyphs, GlyphRole::UpperLeftCorner);
        self.put_glyph(right, top, glyphs, GlyphRole::UpperRightCorner);
        self.put_glyph(left, bottom, glyphs, GlyphRole::LowerLeftCorner);
        self.put_glyph(right, bottom, glyphs, GlyphRole::LowerRightCorner);

        for x in left.saturating_add(1)..right {
            self.put_glyph(x, top, glyphs, edges[0]);
            self.put_glyph(x, bottom, glyphs, edges[1]);
        }
        for y in top.saturating_add(1)..bottom {
            self.put_glyph(left, y, glyphs, edges[2]);
            self.put_glyph(right, y, glyphs, edges[3]);
        }
    }

    /// Remove arms reaching past the canvas edge when a junction remains
    fn clip(&self, col: u16, row: u16, role: GlyphRole) -> GlyphRole {
        let mut outside = 0;
        if row == 0 {
            outside |= GlyphRole::UP;
        }
        if row + 1 == self.rows {
            outside |= GlyphRole::DOWN;
        }
        if col == 0 {
            outside |= GlyphRole::LEFT;
        }
        if col + 1 == self.cols {
            outside |= GlyphRole::RIGHT;
        }

        match role.without(outside) {
            Some(clipped) if clipped != role.canonical() => clipped,
            _ => role,
        }
    }

    /// Canvas contents as text, one line per row with trailing blanks trimmed
    pub fn to_text(&self) -> String {
        let mut output = String::new();
        for row in 0..self.rows {
            let line: String = (0..self.cols)
                .map(|col| self.cell(col, row).map_or(' ', |c| c.character()))
                .collect();
            output.push_str(line.trim_end());
            output.push('\n');
        }
        output
    }

    /// Write every drawn cell to the driver and flush
    pub fn present<D: Driver + ?Sized>(&self, driver: &mut D) -> Result<()> {
        let mut written = 0usize;
        for row in 0..self.rows {
            for col in 0..self.cols {
                if let Some(cell) = self.cell(col, row) {
                    driver.move_cursor(col, row)?;
                    driver.write_cell(cell.raw())?;
                    written += 1;
                }
            }
        }
        driver.flush()?;
        debug!("Presented {} cells", written);
        Ok(())
    }

    fn index(&self, col: u16, row: u16) -> Option<usize> {
        if col < self.cols && row < self.rows {
            Some(row as usize * self.cols as usize + col as usize)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::colour::{Colour, Palette};
    use crate::core::driver::HeadlessDriver;
    use crate::core::registry::ColourSlotRegistry;
    use crate::glyph::{LineDetail, LineStyle};

    fn light() -> StyledGlyphSet {
        StyledGlyphSet::new(
            LineStyle::Light(LineDetail::Normal),
            Attributes::NORMAL,
            ColourSlot::default_slot(),
        )
        .unwrap()
    }

    #[test]
    fn test_single_box() {
        let mut canvas = Canvas::new(6, 4);
        canvas.draw_box(Rect::new(1, 0, 4, 3), &light());
        assert_eq!(canvas.to_text(), " ┌──┐\n │  │\n └──┘\n\n");
        assert_eq!(canvas.role_at(1, 0), Some(GlyphRole::UpperLeftCorner));
        assert_eq!(canvas.role_at(2, 1), None);
    }

    #[test]
    fn test_adjacent_boxes_share_tees() {
        let mut canvas = Canvas::new(10, 4);
        let glyphs = light();
        canvas.draw_box(Rect::new(0, 0, 5, 3), &glyphs);
        canvas.draw_box(Rect::new(4, 0, 5, 3), &glyphs);
        assert_eq!(
            canvas.to_text(),
            "┌───┬───┐\n│   │   │\n└───┴───┘\n\n"
        );
        assert_eq!(canvas.role_at(4, 0), Some(GlyphRole::UpperTee));
        assert_eq!(canvas.role_at(4, 2), Some(GlyphRole::LowerTee));
    }

    #[test]
    fn test_crossing_lines_make_plus() {
        let mut canvas = Canvas::new(5, 5);
        let glyphs = light();
        canvas.horizontal_line(0, 2, 5, &glyphs);
        canvas.vertical_line(2, 0, 5, &glyphs);
        assert_eq!(canvas.role_at(2, 2), Some(GlyphRole::Plus));
        assert_eq!(canvas.cell(2, 2).unwrap().character(), '┼');
    }

    #[test]
    fn test_line_across_border_clips_to_tee() {
        let mut canvas = Canvas::new(7, 5);
        let glyphs = light();
        canvas.border(&glyphs);
        canvas.vertical_line(3, 0, 5, &glyphs);
        canvas.horizontal_line(0, 2, 7, &glyphs);

        assert_eq!(
            canvas.to_text(),
            "┌──┬──┐\n│  │  │\n├──┼──┤\n│  │  │\n└──┴──┘\n"
        );
        // Plain edge cells keep their border role
        assert_eq!(canvas.role_at(1, 0), Some(GlyphRole::UpperHorizontalLine));
        assert_eq!(canvas.role_at(6, 1), Some(GlyphRole::RightVerticalLine));
    }

    #[test]
    fn test_plus_on_top_row_becomes_upper_tee() {
        let mut canvas = Canvas::new(3, 3);
        let glyphs = light();
        canvas.put_glyph(1, 0, &glyphs, GlyphRole::Plus);
        assert_eq!(canvas.role_at(1, 0), Some(GlyphRole::UpperTee));

        // Bottom-right cell keeps only the arms pointing inwards
        canvas.put_glyph(2, 2, &glyphs, GlyphRole::Plus);
        assert_eq!(canvas.role_at(2, 2), Some(GlyphRole::LowerRightCorner));
    }

    #[test]
    fn test_later_style_wins_the_glyph() {
        let mut canvas = Canvas::new(5, 3);
        let heavy = StyledGlyphSet::new(
            LineStyle::Heavy(LineDetail::Normal),
            Attributes::NORMAL,
            ColourSlot::default_slot(),
        )
        .unwrap();
        canvas.horizontal_line(0, 1, 5, &light());
        canvas.vertical_line(2, 0, 3, &heavy);
        assert_eq!(canvas.cell(2, 1).unwrap().character(), '╋');
        assert_eq!(canvas.cell(1, 1).unwrap().character(), '─');
    }

    #[test]
    fn test_text_replaces_glyphs() {
        let mut canvas = Canvas::new(8, 1);
        let slot = ColourSlot::default_slot();
        canvas.horizontal_line(0, 0, 8, &light());
        canvas.print(1, 0, "ab", Attributes::BOLD, slot).unwrap();
        assert_eq!(canvas.to_text(), "─ab─────\n");
        assert_eq!(canvas.role_at(1, 0), None);

        // A line drawn over text does not blend with it
        canvas.put_glyph(1, 0, &light(), GlyphRole::VerticalLine);
        assert_eq!(canvas.cell(1, 0).unwrap().character(), '│');
    }

    #[test]
    fn test_print_clips_and_handles_wide_chars() {
        let mut canvas = Canvas::new(5, 2);
        let slot = ColourSlot::default_slot();
        canvas.print(0, 0, "日本語", Attributes::NORMAL, slot).unwrap();
        assert_eq!(canvas.cell(0, 0).unwrap().character(), '日');
        assert!(canvas.cell(1, 0).is_none());
        assert_eq!(canvas.cell(2, 0).unwrap().character(), '本');
        assert!(canvas.cell(4, 0).is_none());

        // Rows past the bottom are ignored
        canvas.print(0, 9, "x", Attributes::NORMAL, slot).unwrap();
    }

    #[test]
    fn test_degenerate_rects() {
        let mut canvas = Canvas::new(4, 3);
        let glyphs = light();
        canvas.draw_box(Rect::new(0, 0, 0, 3), &glyphs);
        assert_eq!(canvas.to_text(), "\n\n\n");
        canvas.draw_box(Rect::new(0, 1, 4, 1), &glyphs);
        assert_eq!(canvas.to_text(), "\n────\n\n");
    }

    #[test]
    fn test_rect_at_coordinate_limit() {
        let mut canvas = Canvas::new(6, 3);
        let glyphs = light();
        canvas.draw_box(Rect::new(u16::MAX - 1, 0, 5, 3), &glyphs);
        canvas.draw_box(Rect::new(0, u16::MAX, 4, u16::MAX), &glyphs);
        assert_eq!(canvas.to_text(), "\n\n\n");

        // Far edges saturate and fall off the canvas
        canvas.draw_box(Rect::new(3, 0, u16::MAX, 3), &glyphs);
        assert_eq!(canvas.to_text(), "   ┌──\n   │\n   └──\n");
    }

    #[test]
    fn test_present_writes_raw_cells() {
        let mut driver = HeadlessDriver::new(6, 3);
        let mut registry = ColourSlotRegistry::new(4);
        let slot = registry
            .acquire(&mut driver, Palette::new(Colour::Green, Colour::Black))
            .unwrap();
        let glyphs =
            StyledGlyphSet::new(LineStyle::Double, Attributes::BOLD, slot).unwrap();

        let mut canvas = Canvas::new(6, 3);
        canvas.border(&glyphs);
        canvas.print(1, 1, "hi", Attributes::NORMAL, slot).unwrap();
        canvas.present(&mut driver).unwrap();

        assert_eq!(driver.contents(), canvas.to_text());
        assert_eq!(driver.contents(), "╔════╗\n║hi  ║\n╚════╝\n");
        assert_eq!(driver.flushes(), 1);

        let corner = driver.cell(0, 0).unwrap();
        assert_eq!(corner.pair, slot.id());
        assert_eq!(corner.attributes, Attributes::BOLD);
        let decoded = RenderedCell::decode(corner, &registry).unwrap();
        assert_eq!(decoded.colour_slot(), slot);
    }
}
