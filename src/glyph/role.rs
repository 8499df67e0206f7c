//! Box-drawing glyph roles and junction resolution
//!
//! Each role carries an occupancy code: a 3x3 picture of the cell it is drawn
//! in, read row by row from the top-left, where a set bit means the glyph
//! reaches into that neighbour (the middle bit is the cell itself):
//!
//! ```text
//!                       000
//! UpperLeftCorner  ┌    011   0b000_011_010
//!                       010
//!
//!                       000
//! HorizontalLine   ─    111   0b000_111_000
//!                       000
//! ```
//!
//! Two pieces meeting in one cell combine by OR-ing their codes and looking
//! the result up again:
//!
//! ```text
//! ┌  0b000_011_010
//! ─  0b000_111_000
//!    ─────────────
//! ┬  0b000_111_010  UpperTee
//! ```
//!
//! The four edge variants (`UpperHorizontalLine`, `LowerHorizontalLine`,
//! `LeftVerticalLine`, `RightVerticalLine`) are used for window borders. Their
//! codes sit on the outer ring of the grid so they stay distinct; they only
//! combine with other pieces once remapped to the plain lines.

use std::fmt;

/// Position a box-drawing character plays
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GlyphRole {
    UpperLeftCorner,
    LowerLeftCorner,
    UpperRightCorner,
    LowerRightCorner,
    RightTee,
    LeftTee,
    LowerTee,
    UpperTee,
    HorizontalLine,
    UpperHorizontalLine,
    LowerHorizontalLine,
    VerticalLine,
    LeftVerticalLine,
    RightVerticalLine,
    Plus,
}

impl GlyphRole {
    pub const COUNT: usize = 15;

    /// Every role, in declaration order (`ALL[r.index()] == r`)
    pub const ALL: [GlyphRole; GlyphRole::COUNT] = [
        GlyphRole::UpperLeftCorner,
        GlyphRole::LowerLeftCorner,
        GlyphRole::UpperRightCorner,
        GlyphRole::LowerRightCorner,
        GlyphRole::RightTee,
        GlyphRole::LeftTee,
        GlyphRole::LowerTee,
        GlyphRole::UpperTee,
        GlyphRole::HorizontalLine,
        GlyphRole::UpperHorizontalLine,
        GlyphRole::LowerHorizontalLine,
        GlyphRole::VerticalLine,
        GlyphRole::LeftVerticalLine,
        GlyphRole::RightVerticalLine,
        GlyphRole::Plus,
    ];

    /// Neighbour above the cell
    pub const UP: u16 = 0b010_000_000;
    /// Neighbour below the cell
    pub const DOWN: u16 = 0b000_000_010;
    /// Neighbour left of the cell
    pub const LEFT: u16 = 0b000_100_000;
    /// Neighbour right of the cell
    pub const RIGHT: u16 = 0b000_001_000;

    /// 9-bit occupancy code
    pub const fn code(self) -> u16 {
        match self {
            GlyphRole::UpperLeftCorner => 0b000_011_010,
            GlyphRole::LowerLeftCorner => 0b010_011_000,
            GlyphRole::UpperRightCorner => 0b000_110_010,
            GlyphRole::LowerRightCorner => 0b010_110_000,
            GlyphRole::RightTee => 0b010_110_010,
            GlyphRole::LeftTee => 0b010_011_010,
            GlyphRole::LowerTee => 0b010_111_000,
            GlyphRole::UpperTee => 0b000_111_010,
            GlyphRole::HorizontalLine => 0b000_111_000,
            GlyphRole::UpperHorizontalLine => 0b111_000_000,
            GlyphRole::LowerHorizontalLine => 0b000_000_111,
            GlyphRole::VerticalLine => 0b010_010_010,
            GlyphRole::LeftVerticalLine => 0b100_100_100,
            GlyphRole::RightVerticalLine => 0b001_001_001,
            GlyphRole::Plus => 0b010_111_010,
        }
    }

    /// Role with exactly this occupancy code
    pub const fn from_code(code: u16) -> Option<GlyphRole> {
        let role = match code {
            0b000_011_010 => GlyphRole::UpperLeftCorner,
            0b010_011_000 => GlyphRole::LowerLeftCorner,
            0b000_110_010 => GlyphRole::UpperRightCorner,
            0b010_110_000 => GlyphRole::LowerRightCorner,
            0b010_110_010 => GlyphRole::RightTee,
            0b010_011_010 => GlyphRole::LeftTee,
            0b010_111_000 => GlyphRole::LowerTee,
            0b000_111_010 => GlyphRole::UpperTee,
            0b000_111_000 => GlyphRole::HorizontalLine,
            0b111_000_000 => GlyphRole::UpperHorizontalLine,
            0b000_000_111 => GlyphRole::LowerHorizontalLine,
            0b010_010_010 => GlyphRole::VerticalLine,
            0b100_100_100 => GlyphRole::LeftVerticalLine,
            0b001_001_001 => GlyphRole::RightVerticalLine,
            0b010_111_010 => GlyphRole::Plus,
            _ => return None,
        };
        Some(role)
    }

    /// Position in `ALL`
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Whether this is one of the window-border pseudo roles
    pub const fn is_edge_variant(self) -> bool {
        matches!(
            self,
            GlyphRole::UpperHorizontalLine
                | GlyphRole::LowerHorizontalLine
                | GlyphRole::LeftVerticalLine
                | GlyphRole::RightVerticalLine
        )
    }

    /// Edge variants collapsed onto the plain lines, everything else unchanged
    pub const fn canonical(self) -> GlyphRole {
        match self {
            GlyphRole::UpperHorizontalLine | GlyphRole::LowerHorizontalLine => {
                GlyphRole::HorizontalLine
            }
            GlyphRole::LeftVerticalLine | GlyphRole::RightVerticalLine => GlyphRole::VerticalLine,
            role => role,
        }
    }

    /// Glyph to draw where `self` and `other` meet in one cell.
    ///
    /// With `remap`, edge variants are first replaced by their plain line.
    /// Returns `None` when the combined occupancy matches no role, which is
    /// the normal outcome for unremapped edge variants.
    pub const fn transform(self, other: GlyphRole, remap: bool) -> Option<GlyphRole> {
        let (a, b) = if remap {
            (self.canonical(), other.canonical())
        } else {
            (self, other)
        };
        GlyphRole::from_code(a.code() | b.code())
    }

    /// Drop the arms of this glyph that reach into the given neighbours.
    ///
    /// Returns `None` when what remains is not a drawable role (for example a
    /// line with one arm removed).
    pub const fn without(self, neighbours: u16) -> Option<GlyphRole> {
        GlyphRole::from_code(self.canonical().code() & !neighbours)
    }
}

impl fmt::Display for GlyphRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GlyphRole::UpperLeftCorner => "upper left corner",
            GlyphRole::LowerLeftCorner => "lower left corner",
            GlyphRole::UpperRightCorner => "upper right corner",
            GlyphRole::LowerRightCorner => "lower right corner",
            GlyphRole::RightTee => "right tee",
            GlyphRole::LeftTee => "left tee",
            GlyphRole::LowerTee => "lower tee",
            GlyphRole::UpperTee => "upper tee",
            GlyphRole::HorizontalLine => "horizontal line",
            GlyphRole::UpperHorizontalLine => "upper horizontal line",
            GlyphRole::LowerHorizontalLine => "lower horizontal line",
            GlyphRole::VerticalLine => "vertical line",
            GlyphRole::LeftVerticalLine => "left vertical line",
            GlyphRole::RightVerticalLine => "right vertical line",
            GlyphRole::Plus => "plus",
        };
        write!(f, "{}", name)
    }
}
