//! Code points for every built-in (style, role) pair
//!
//! Rows follow `LineStyle::builtin()` order, columns follow `GlyphRole::ALL`.
//! Dashed variants only change the straight lines; corners, tees and the
//! cross keep the solid glyph of their family.

use super::role::GlyphRole;
use super::style::{LineDetail, LineStyle};

type Row = [u32; GlyphRole::COUNT];

/// Build one row from corner/tee/cross glyphs and the straight lines
const fn row(
    corners: [u32; 4],
    tees: [u32; 4],
    horizontal: u32,
    vertical: u32,
    plus: u32,
) -> Row {
    [
        corners[0], corners[1], corners[2], corners[3],
        tees[0], tees[1], tees[2], tees[3],
        horizontal, horizontal, horizontal,
        vertical, vertical, vertical,
        plus,
    ]
}

//                     ┌       └       ┐       ┘
const LIGHT_CORNERS: [u32; 4] = [0x250c, 0x2514, 0x2510, 0x2518];
//                     ┤       ├       ┴       ┬
const LIGHT_TEES: [u32; 4] = [0x2524, 0x251c, 0x2534, 0x252c];
//                     ╭       ╰       ╮       ╯
const ROUNDED_CORNERS: [u32; 4] = [0x256d, 0x2570, 0x256e, 0x256f];
//                     ┏       ┗       ┓       ┛
const HEAVY_CORNERS: [u32; 4] = [0x250f, 0x2517, 0x2513, 0x251b];
//                     ┫       ┣       ┻       ┳
const HEAVY_TEES: [u32; 4] = [0x252b, 0x2523, 0x253b, 0x2533];

const fn light(horizontal: u32, vertical: u32) -> Row {
    row(LIGHT_CORNERS, LIGHT_TEES, horizontal, vertical, 0x253c)
}

const fn heavy(horizontal: u32, vertical: u32) -> Row {
    row(HEAVY_CORNERS, HEAVY_TEES, horizontal, vertical, 0x254b)
}

static MATRIX: [Row; 15] = [
    // Ascii
    row([0x2b; 4], [0x2b; 4], 0x2d, 0x7c, 0x2b),
    // Light: ─ │, ╴ ╵, ╶ ╷, ╌ ╎, ┄ ┆, ┈ ┊
    light(0x2500, 0x2502),
    light(0x2574, 0x2575),
    light(0x2576, 0x2577),
    light(0x254c, 0x254e),
    light(0x2504, 0x2506),
    light(0x2508, 0x250a),
    // Rounded: light tees, lines and cross
    row(ROUNDED_CORNERS, LIGHT_TEES, 0x2500, 0x2502, 0x253c),
    // Heavy: ━ ┃, ╸ ╹, ╺ ╻, ╍ ╏, ┅ ┇, ┉ ┋
    heavy(0x2501, 0x2503),
    heavy(0x2578, 0x2579),
    heavy(0x257a, 0x257b),
    heavy(0x254d, 0x254f),
    heavy(0x2505, 0x2507),
    heavy(0x2509, 0x250b),
    // Double: ╔ ╚ ╗ ╝, ╣ ╠ ╩ ╦, ═ ║ ╬
    row(
        [0x2554, 0x255a, 0x2557, 0x255d],
        [0x2563, 0x2560, 0x2569, 0x2566],
        0x2550,
        0x2551,
        0x256c,
    ),
];

const fn detail_offset(detail: LineDetail) -> usize {
    match detail {
        LineDetail::Normal => 0,
        LineDetail::LeftDash => 1,
        LineDetail::RightDash => 2,
        LineDetail::DoubleDash => 3,
        LineDetail::TripleDash => 4,
        LineDetail::QuadrupleDash => 5,
    }
}

/// Static glyph lookup table
pub struct GlyphMatrix;

impl GlyphMatrix {
    /// Whether the matrix serves `style` (everything but `UserDefined`)
    pub fn covers(style: &LineStyle) -> bool {
        Self::row_index(style).is_some()
    }

    /// Code point drawn for `role` in `style`.
    ///
    /// # Panics
    ///
    /// Panics for `LineStyle::UserDefined`, whose glyphs never come from the
    /// matrix.
    pub fn code_point(style: &LineStyle, role: GlyphRole) -> u32 {
        match Self::row_index(style) {
            Some(row) => MATRIX[row][role.index()],
            None => panic!("{} line styles are not in the glyph matrix", style),
        }
    }

    fn row_index(style: &LineStyle) -> Option<usize> {
        match style {
            LineStyle::Ascii => Some(0),
            LineStyle::Light(detail) => Some(1 + detail_offset(*detail)),
            LineStyle::Rounded => Some(7),
            LineStyle::Heavy(detail) => Some(8 + detail_offset(*detail)),
            LineStyle::Double => Some(14),
            LineStyle::UserDefined(_) => None,
        }
    }
}
