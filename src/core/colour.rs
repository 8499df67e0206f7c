//! Colours and palettes
//!
//! A `Colour` is one of the sixteen named terminal colours, the terminal's
//! default colour, or an entry of the 240-colour extension table. The driver
//! addresses colours by a numeric code:
//!
//! ```text
//! Default        -1
//! Black..White    0..=7
//! BrightBlack..  8..=15
//! UserDefined(n) 16 + n   (n in 0..=239)
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};

use super::error::{Error, Result};

/// Highest valid offset into the extended colour table
pub const MAX_USER_COLOUR: u8 = 239;

/// Code of the first extended colour
const USER_COLOUR_BASE: i16 = 16;

/// Terminal colour
#[derive(Clone, Copy, Debug)]
pub enum Colour {
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
    /// Offset into the extended colour table, `0..=239`
    UserDefined(u8),
}

const NAMED: [Colour; 16] = [
    Colour::Black,
    Colour::Red,
    Colour::Green,
    Colour::Yellow,
    Colour::Blue,
    Colour::Magenta,
    Colour::Cyan,
    Colour::White,
    Colour::BrightBlack,
    Colour::BrightRed,
    Colour::BrightGreen,
    Colour::BrightYellow,
    Colour::BrightBlue,
    Colour::BrightMagenta,
    Colour::BrightCyan,
    Colour::BrightWhite,
];

impl Colour {
    /// Create an extended colour.
    ///
    /// # Panics
    ///
    /// Panics if `code` is above 239; an out-of-range code is a caller bug.
    pub fn user_defined(code: u8) -> Self {
        assert!(
            code <= MAX_USER_COLOUR,
            "user defined colour code must be between 0 and {}, got {}",
            MAX_USER_COLOUR,
            code
        );
        Colour::UserDefined(code)
    }

    /// Numeric code understood by the driver
    pub fn code(&self) -> i16 {
        match *self {
            Colour::Default => -1,
            Colour::Black => 0,
            Colour::Red => 1,
            Colour::Green => 2,
            Colour::Yellow => 3,
            Colour::Blue => 4,
            Colour::Magenta => 5,
            Colour::Cyan => 6,
            Colour::White => 7,
            Colour::BrightBlack => 8,
            Colour::BrightRed => 9,
            Colour::BrightGreen => 10,
            Colour::BrightYellow => 11,
            Colour::BrightBlue => 12,
            Colour::BrightMagenta => 13,
            Colour::BrightCyan => 14,
            Colour::BrightWhite => 15,
            Colour::UserDefined(code) => {
                assert!(
                    code <= MAX_USER_COLOUR,
                    "user defined colour code must be between 0 and {}, got {}",
                    MAX_USER_COLOUR,
                    code
                );
                USER_COLOUR_BASE + code as i16
            }
        }
    }

    /// Decode a driver colour code.
    ///
    /// # Panics
    ///
    /// Panics for codes outside `-1..=255`; the driver never reports those.
    pub fn from_code(code: i16) -> Self {
        match code {
            -1 => Colour::Default,
            0..=15 => NAMED[code as usize],
            16..=255 => Colour::UserDefined((code - USER_COLOUR_BASE) as u8),
            _ => panic!("colour code {} is outside the driver range -1..=255", code),
        }
    }

    /// Whether this is one of the eight bright shadow colours
    pub fn is_bright(&self) -> bool {
        (8..=15).contains(&self.code())
    }

    /// Resolve a configuration name such as `red`, `bright-red` or `colour-42`
    pub fn by_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase().replace('_', "-");

        let user = name
            .strip_prefix("colour-")
            .or_else(|| name.strip_prefix("color-"));
        if let Some(code) = user {
            return code
                .parse::<u8>()
                .ok()
                .filter(|c| *c <= MAX_USER_COLOUR)
                .map(Colour::UserDefined);
        }

        let colour = match name.as_str() {
            "default" => Colour::Default,
            "black" => Colour::Black,
            "red" => Colour::Red,
            "green" => Colour::Green,
            "yellow" => Colour::Yellow,
            "blue" => Colour::Blue,
            "magenta" => Colour::Magenta,
            "cyan" => Colour::Cyan,
            "white" => Colour::White,
            "bright-black" | "grey" | "gray" => Colour::BrightBlack,
            "bright-red" => Colour::BrightRed,
            "bright-green" => Colour::BrightGreen,
            "bright-yellow" => Colour::BrightYellow,
            "bright-blue" => Colour::BrightBlue,
            "bright-magenta" => Colour::BrightMagenta,
            "bright-cyan" => Colour::BrightCyan,
            "bright-white" => Colour::BrightWhite,
            _ => return None,
        };
        Some(colour)
    }
}

impl PartialEq for Colour {
    fn eq(&self, other: &Self) -> bool {
        self.code() == other.code()
    }
}

impl Eq for Colour {}

impl Hash for Colour {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code().hash(state);
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Colour::Default => write!(f, "default"),
            Colour::Black => write!(f, "black"),
            Colour::Red => write!(f, "red"),
            Colour::Green => write!(f, "green"),
            Colour::Yellow => write!(f, "yellow"),
            Colour::Blue => write!(f, "blue"),
            Colour::Magenta => write!(f, "magenta"),
            Colour::Cyan => write!(f, "cyan"),
            Colour::White => write!(f, "white"),
            Colour::BrightBlack => write!(f, "bright black"),
            Colour::BrightRed => write!(f, "bright red"),
            Colour::BrightGreen => write!(f, "bright green"),
            Colour::BrightYellow => write!(f, "bright yellow"),
            Colour::BrightBlue => write!(f, "bright blue"),
            Colour::BrightMagenta => write!(f, "bright magenta"),
            Colour::BrightCyan => write!(f, "bright cyan"),
            Colour::BrightWhite => write!(f, "bright white"),
            Colour::UserDefined(code) => write!(f, "colour {}", code),
        }
    }
}

/// Foreground/background colour pairing
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Palette {
    pub foreground: Colour,
    pub background: Colour,
}

impl Palette {
    /// The terminal's own colours, always bound to pair 0
    pub const DEFAULT: Palette = Palette {
        foreground: Colour::Default,
        background: Colour::Default,
    };

    pub const fn new(foreground: Colour, background: Colour) -> Self {
        Self {
            foreground,
            background,
        }
    }

    pub fn is_default(&self) -> bool {
        *self == Self::DEFAULT
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {}", self.foreground, self.background)
    }
}

/// Colour content on the 0..=1000 scale terminals use for colour redefinition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    red: u16,
    green: u16,
    blue: u16,
}

impl Rgb {
    pub const MAX: u16 = 1000;

    pub fn new(red: u16, green: u16, blue: u16) -> Result<Self> {
        if red > Self::MAX || green > Self::MAX || blue > Self::MAX {
            return Err(Error::InvalidRgb { red, green, blue });
        }
        Ok(Self { red, green, blue })
    }

    pub fn red(&self) -> u16 {
        self.red
    }

    pub fn green(&self) -> u16 {
        self.green
    }

    pub fn blue(&self) -> u16 {
        self.blue
    }

    /// Scale down to 8-bit channels
    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        let scale = |c: u16| ((c as u32 * 255 + 500) / 1000) as u8;
        (scale(self.red), scale(self.green), scale(self.blue))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "red: {}, green: {}, blue: {}", self.red, self.green, self.blue)
    }
}
