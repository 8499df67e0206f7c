//! Crossterm-backed terminal driver.
//!
//! ANSI terminals have no colour pair table, so the driver keeps one itself
//! and resolves the pair of every written cell into explicit foreground and
//! background colours. Colours redefined through `define_colour` are emitted
//! as 24-bit RGB from then on.
//!
//! ```text
//! RawCell { 'x', BOLD, pair 3 }
//!     │  pairs[3] = (2, -1)
//!     ▼
//! SGR reset, fg AnsiValue(2), bg Reset, Bold, Print('x')
//! ```

use std::collections::HashMap;
use std::io::{self, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::{
        self, Attribute, Color as CtColor, Print, SetAttribute, SetBackgroundColor,
        SetForegroundColor,
    },
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing::debug;

use crate::core::attributes::Attributes;
use crate::core::cell::RawCell;
use crate::core::colour::Rgb;
use crate::core::driver::{Capabilities, Driver};

/// Attributes with a crossterm equivalent
const SGR: [(Attributes, Attribute); 8] = [
    (Attributes::BOLD, Attribute::Bold),
    (Attributes::DIM, Attribute::Dim),
    (Attributes::ITALIC, Attribute::Italic),
    (Attributes::UNDERLINE, Attribute::Underlined),
    (Attributes::BLINK, Attribute::SlowBlink),
    (Attributes::REVERSE, Attribute::Reverse),
    (Attributes::STANDOUT, Attribute::Reverse),
    (Attributes::INVISIBLE, Attribute::Hidden),
];

/// Driver writing crossterm commands to `W`
pub struct CrosstermDriver<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    colours: u16,
    max_colour_pairs: u16,
    pairs: HashMap<u16, (i16, i16)>,
    redefined: HashMap<i16, Rgb>,
    entered: bool,
}

impl CrosstermDriver<io::Stdout> {
    /// Driver for the controlling terminal
    pub fn stdout() -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        Ok(Self::with_size(
            io::stdout(),
            cols,
            rows,
            style::available_color_count(),
        ))
    }
}

impl<W: Write> CrosstermDriver<W> {
    /// Pair limit reported for terminals with at least 8 colours
    pub const DEFAULT_PAIRS: u16 = 255;

    pub fn with_size(out: W, cols: u16, rows: u16, colours: u16) -> Self {
        let max_colour_pairs = if colours >= 8 { Self::DEFAULT_PAIRS } else { 0 };
        debug!(
            "Crossterm driver: {}x{}, {} colours, {} pairs",
            cols, rows, colours, max_colour_pairs
        );
        Self {
            out,
            cols,
            rows,
            colours,
            max_colour_pairs,
            pairs: HashMap::new(),
            redefined: HashMap::new(),
            entered: false,
        }
    }

    /// Switch to raw mode and the alternate screen
    pub fn enter(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(self.out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        self.entered = true;
        Ok(())
    }

    /// Restore the terminal. Does nothing unless `enter` was called.
    pub fn leave(&mut self) -> io::Result<()> {
        if !self.entered {
            return Ok(());
        }
        execute!(
            self.out,
            SetAttribute(Attribute::Reset),
            Show,
            LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()?;
        self.entered = false;
        Ok(())
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    fn colour(&self, code: i16) -> CtColor {
        if let Some(rgb) = self.redefined.get(&code) {
            let (r, g, b) = rgb.to_rgb8();
            return CtColor::Rgb { r, g, b };
        }
        match u8::try_from(code) {
            Ok(index) => CtColor::AnsiValue(index),
            Err(_) => CtColor::Reset,
        }
    }
}

impl<W: Write> Driver for CrosstermDriver<W> {
    fn capabilities(&self) -> Capabilities {
        Capabilities {
            lines: self.rows,
            columns: self.cols,
            colours: self.colours,
            max_colour_pairs: self.max_colour_pairs,
            supports_colour: self.max_colour_pairs > 0,
            can_change_colour: self.colours >= 256,
        }
    }

    fn bind_colour_pair(&mut self, id: u16, foreground: i16, background: i16) -> io::Result<()> {
        if id == 0 || id > self.max_colour_pairs {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("pair {} is outside 1..={}", id, self.max_colour_pairs),
            ));
        }
        self.pairs.insert(id, (foreground, background));
        Ok(())
    }

    fn unbind_colour_pair(&mut self, id: u16) -> io::Result<()> {
        self.pairs
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, format!("pair {} is not bound", id))
            })
    }

    fn define_colour(&mut self, code: i16, rgb: Rgb) -> io::Result<()> {
        if code < 0 || code >= self.colours as i16 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "colour {} cannot be redefined on a {}-colour terminal",
                    code, self.colours
                ),
            ));
        }
        self.redefined.insert(code, rgb);
        Ok(())
    }

    fn move_cursor(&mut self, col: u16, row: u16) -> io::Result<()> {
        if col >= self.cols || row >= self.rows {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("({}, {}) is outside {}x{}", col, row, self.cols, self.rows),
            ));
        }
        queue!(self.out, MoveTo(col, row))
    }

    fn write_cell(&mut self, cell: RawCell) -> io::Result<()> {
        let (fg, bg) = match cell.pair {
            0 => (-1, -1),
            id => *self.pairs.get(&id).ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, format!("pair {} is not bound", id))
            })?,
        };
        let ch = char::from_u32(cell.code_point).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("U+{:04X} is not a character", cell.code_point),
            )
        })?;

        let (fg, bg) = (self.colour(fg), self.colour(bg));
        queue!(
            self.out,
            SetAttribute(Attribute::Reset),
            SetForegroundColor(fg),
            SetBackgroundColor(bg)
        )?;
        for (flag, attribute) in SGR.iter() {
            if cell.attributes.contains(*flag) {
                queue!(self.out, SetAttribute(*attribute))?;
            }
        }
        queue!(self.out, Print(ch))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

impl<W: Write> Drop for CrosstermDriver<W> {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}
