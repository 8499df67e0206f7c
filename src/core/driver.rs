//! The terminal driver boundary
//!
//! Everything that talks to a physical terminal goes through `Driver`. The
//! glyph and colour logic in this crate only ever binds pairs, writes cells
//! and flushes; window creation, input and refresh scheduling live with the
//! driver implementation.
//!
//! Two drivers ship with the crate:
//!
//! - **HeadlessDriver**: in-memory grid, used by tests and `--headless`
//! - **CrosstermDriver** (`ui::terminal`): real terminal output via crossterm

use std::collections::HashMap;
use std::io;

use super::cell::RawCell;
use super::colour::Rgb;

/// What the attached terminal can do
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capabilities {
    pub lines: u16,
    pub columns: u16,
    /// Number of addressable colours
    pub colours: u16,
    /// Highest colour pair id the driver can bind (pair 0 excluded)
    pub max_colour_pairs: u16,
    pub supports_colour: bool,
    pub can_change_colour: bool,
}

/// External terminal driver
pub trait Driver {
    fn capabilities(&self) -> Capabilities;

    /// Bind pair `id` to the given foreground/background colour codes
    fn bind_colour_pair(&mut self, id: u16, foreground: i16, background: i16) -> io::Result<()>;

    /// Forget the binding of pair `id`
    fn unbind_colour_pair(&mut self, id: u16) -> io::Result<()>;

    /// Redefine the content of colour `code`
    fn define_colour(&mut self, code: i16, rgb: Rgb) -> io::Result<()>;

    fn move_cursor(&mut self, col: u16, row: u16) -> io::Result<()>;

    /// Write one cell at the cursor and advance the cursor past it
    fn write_cell(&mut self, cell: RawCell) -> io::Result<()>;

    /// Push pending output to the terminal
    fn flush(&mut self) -> io::Result<()>;
}

/// In-memory driver
pub struct HeadlessDriver {
    cols: u16,
    rows: u16,
    max_colour_pairs: u16,
    cells: Vec<Option<RawCell>>,
    pairs: HashMap<u16, (i16, i16)>,
    colours: HashMap<i16, Rgb>,
    cursor: (u16, u16),
    flushes: usize,
}

impl HeadlessDriver {
    /// Default pair limit, matching a 256-pair terminal minus pair 0
    pub const DEFAULT_PAIRS: u16 = 255;

    pub fn new(cols: u16, rows: u16) -> Self {
        Self::with_pair_limit(cols, rows, Self::DEFAULT_PAIRS)
    }

    pub fn with_pair_limit(cols: u16, rows: u16, max_colour_pairs: u16) -> Self {
        Self {
            cols,
            rows,
            max_colour_pairs,
            cells: vec![None; cols as usize * rows as usize],
            pairs: HashMap::new(),
            colours: HashMap::new(),
            cursor: (0, 0),
            flushes: 0,
        }
    }

    /// Cell written at a position, if any
    pub fn cell(&self, col: u16, row: u16) -> Option<RawCell> {
        self.index(col, row).and_then(|i| self.cells[i])
    }

    /// Colour codes bound to a pair
    pub fn pair(&self, id: u16) -> Option<(i16, i16)> {
        self.pairs.get(&id).copied()
    }

    pub fn bound_pairs(&self) -> usize {
        self.pairs.len()
    }

    pub fn colour(&self, code: i16) -> Option<Rgb> {
        self.colours.get(&code).copied()
    }

    pub fn cursor(&self) -> (u16, u16) {
        self.cursor
    }

    pub fn flushes(&self) -> usize {
        self.flushes
    }

    /// Screen contents as text, one line per row
    pub fn contents(&self) -> String {
        let mut output = String::new();
        for row in 0..self.rows {
            let line: String = (0..self.cols)
                .map(|col| {
                    self.cell(col, row)
                        .and_then(|c| char::from_u32(c.code_point))
                        .unwrap_or(' ')
                })
                .collect();
            output.push_str(line.trim_end());
            output.push('\n');
        }
        output
    }

    fn index(&self, col: u16, row: u16) -> Option<usize> {
        if col < self.cols && row < self.rows {
            Some(row as usize * self.cols as usize + col as usize)
        } else {
            None
        }
    }
}

impl Driver for HeadlessDriver {
    fn capabilities(&self) -> Capabilities {
        Capabilities {
            lines: self.rows,
            columns: self.cols,
            colours: 256,
            max_colour_pairs: self.max_colour_pairs,
            supports_colour: self.max_colour_pairs > 0,
            can_change_colour: true,
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
        match self.pairs.remove(&id) {
            Some(_) => Ok(()),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("pair {} is not bound", id),
            )),
        }
    }

    fn define_colour(&mut self, code: i16, rgb: Rgb) -> io::Result<()> {
        if !(0..=255).contains(&code) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("colour {} cannot be redefined", code),
            ));
        }
        self.colours.insert(code, rgb);
        Ok(())
    }

    fn move_cursor(&mut self, col: u16, row: u16) -> io::Result<()> {
        if col >= self.cols || row >= self.rows {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("({}, {}) is outside {}x{}", col, row, self.cols, self.rows),
            ));
        }
        self.cursor = (col, row);
        Ok(())
    }

    fn write_cell(&mut self, cell: RawCell) -> io::Result<()> {
        let (col, row) = self.cursor;
        let index = self.index(col, row).ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "cursor is past the screen edge")
        })?;
        self.cells[index] = Some(cell);
        self.cursor = (col + 1, row);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Ok(())
    }
}
