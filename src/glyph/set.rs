//! Ready-to-draw glyph sets

use tracing::debug;

use super::matrix::GlyphMatrix;
use super::role::GlyphRole;
use super::style::LineStyle;
use crate::core::attributes::Attributes;
use crate::core::cell::RenderedCell;
use crate::core::error::Result;
use crate::core::registry::ColourSlot;

/// All fifteen roles of one line style, rendered with fixed attributes and colours.
///
/// Built eagerly: construction either renders every role or fails. For
/// `UserDefined` styles the caller's cells are taken verbatim and the
/// attributes and slot passed here are ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyledGlyphSet {
    style: LineStyle,
    cells: Vec<RenderedCell>,
}

impl StyledGlyphSet {
    pub fn new(style: LineStyle, attributes: Attributes, slot: ColourSlot) -> Result<Self> {
        let cells = match &style {
            LineStyle::UserDefined(glyphs) => glyphs.cells().to_vec(),
            builtin => GlyphRole::ALL
                .iter()
                .map(|role| {
                    RenderedCell::new(GlyphMatrix::code_point(builtin, *role), attributes, slot)
                })
                .collect::<Result<Vec<_>>>()?,
        };
        debug!("Built {} glyph set ({}, {})", style, attributes, slot);

        Ok(Self { style, cells })
    }

    pub fn style(&self) -> &LineStyle {
        &self.style
    }

    /// Rendered cell for `role`
    pub fn cell(&self, role: GlyphRole) -> &RenderedCell {
        &self.cells[role.index()]
    }

    /// Cells in `GlyphRole::ALL` order
    pub fn iter(&self) -> impl Iterator<Item = (GlyphRole, &RenderedCell)> {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, cell)| (GlyphRole::ALL[i], cell))
    }
}
