//! Line styles

use std::fmt;

use super::role::GlyphRole;
use super::set::StyledGlyphSet;
use crate::core::cell::RenderedCell;

/// Dash pattern of light and heavy lines
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LineDetail {
    #[default]
    Normal,
    /// Half line reaching left (horizontal) or up (vertical)
    LeftDash,
    /// Half line reaching right (horizontal) or down (vertical)
    RightDash,
    DoubleDash,
    TripleDash,
    QuadrupleDash,
}

impl LineDetail {
    pub const ALL: [LineDetail; 6] = [
        LineDetail::Normal,
        LineDetail::LeftDash,
        LineDetail::RightDash,
        LineDetail::DoubleDash,
        LineDetail::TripleDash,
        LineDetail::QuadrupleDash,
    ];

    pub fn by_name(name: &str) -> Option<Self> {
        let detail = match name.trim().to_lowercase().replace('_', "-").as_str() {
            "normal" | "solid" => LineDetail::Normal,
            "left-dash" => LineDetail::LeftDash,
            "right-dash" => LineDetail::RightDash,
            "double-dash" => LineDetail::DoubleDash,
            "triple-dash" => LineDetail::TripleDash,
            "quadruple-dash" => LineDetail::QuadrupleDash,
            _ => return None,
        };
        Some(detail)
    }
}

impl fmt::Display for LineDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LineDetail::Normal => "normal",
            LineDetail::LeftDash => "left dash",
            LineDetail::RightDash => "right dash",
            LineDetail::DoubleDash => "double dash",
            LineDetail::TripleDash => "triple dash",
            LineDetail::QuadrupleDash => "quadruple dash",
        };
        write!(f, "{}", name)
    }
}

/// Caller-supplied glyphs, one rendered cell per role
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserGlyphs {
    cells: [RenderedCell; GlyphRole::COUNT],
}

impl UserGlyphs {
    /// Start from a copy of an existing set's cells
    pub fn from_set(base: &StyledGlyphSet) -> Self {
        Self {
            cells: std::array::from_fn(|i| *base.cell(GlyphRole::ALL[i])),
        }
    }

    /// Replace the cell used for `role`
    pub fn set(&mut self, role: GlyphRole, cell: RenderedCell) {
        self.cells[role.index()] = cell;
    }

    /// Builder form of `set`
    pub fn with(mut self, role: GlyphRole, cell: RenderedCell) -> Self {
        self.set(role, cell);
        self
    }

    pub fn cell(&self, role: GlyphRole) -> &RenderedCell {
        &self.cells[role.index()]
    }

    pub(crate) fn cells(&self) -> &[RenderedCell] {
        &self.cells
    }
}

/// Visual family of a drawn line
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LineStyle {
    /// `+`, `-` and `|`
    Ascii,
    Light(LineDetail),
    /// Light lines with arc corners
    Rounded,
    Heavy(LineDetail),
    Double,
    UserDefined(Box<UserGlyphs>),
}

impl Default for LineStyle {
    fn default() -> Self {
        LineStyle::Light(LineDetail::Normal)
    }
}

impl LineStyle {
    /// Every style served by the glyph matrix
    pub fn builtin() -> Vec<LineStyle> {
        let mut styles = vec![LineStyle::Ascii];
        styles.extend(LineDetail::ALL.iter().map(|d| LineStyle::Light(*d)));
        styles.push(LineStyle::Rounded);
        styles.extend(LineDetail::ALL.iter().map(|d| LineStyle::Heavy(*d)));
        styles.push(LineStyle::Double);
        styles
    }

    pub fn user_defined(glyphs: UserGlyphs) -> Self {
        LineStyle::UserDefined(Box::new(glyphs))
    }

    /// Resolve a configuration name; `detail` only applies to light and heavy
    pub fn by_name(name: &str, detail: LineDetail) -> Option<Self> {
        let style = match name.trim().to_lowercase().as_str() {
            "ascii" | "plain" => LineStyle::Ascii,
            "light" | "single" => LineStyle::Light(detail),
            "rounded" | "round" => LineStyle::Rounded,
            "heavy" | "thick" => LineStyle::Heavy(detail),
            "double" => LineStyle::Double,
            _ => return None,
        };
        Some(style)
    }

    pub fn is_user_defined(&self) -> bool {
        matches!(self, LineStyle::UserDefined(_))
    }
}

impl fmt::Display for LineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineStyle::Ascii => write!(f, "ascii"),
            LineStyle::Light(LineDetail::Normal) => write!(f, "light"),
            LineStyle::Light(detail) => write!(f, "light ({})", detail),
            LineStyle::Rounded => write!(f, "rounded"),
            LineStyle::Heavy(LineDetail::Normal) => write!(f, "heavy"),
            LineStyle::Heavy(detail) => write!(f, "heavy ({})", detail),
            LineStyle::Double => write!(f, "double"),
            LineStyle::UserDefined(_) => write!(f, "user defined"),
        }
    }
}
