//! Error types for colour pair and cell operations

use std::fmt;
use std::io;

use thiserror::Error;

use super::attributes::Attributes;
use super::colour::{Colour, Palette, Rgb};

/// Why a colour pair could not be released
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReleaseRefusal {
    /// Pair 0 belongs to the default palette
    Reserved,
    /// No live slot has this id
    NotLive,
    /// The slot was acquired as pinned
    Pinned,
}

impl fmt::Display for ReleaseRefusal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseRefusal::Reserved => write!(f, "it is reserved for the default palette"),
            ReleaseRefusal::NotLive => write!(f, "it is not allocated"),
            ReleaseRefusal::Pinned => write!(f, "it was acquired as pinned"),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("All {max} colour pairs are in use")]
    ResourceExhausted { max: u16 },

    #[error("Failed to bind colour pair {id} to {palette}: {source}")]
    AllocationFailed {
        id: u16,
        palette: Palette,
        #[source]
        source: io::Error,
    },

    #[error("Colour pair {id} cannot be released: {reason}")]
    InvalidRelease { id: u16, reason: ReleaseRefusal },

    #[error("Failed to unbind colour pair {id} ({palette}): {source}")]
    ReleaseFailed {
        id: u16,
        palette: Palette,
        #[source]
        source: io::Error,
    },

    #[error("Colour pair {0} is not defined")]
    NotDefined(u16),

    #[error("Cannot render U+{code_point:04X} with attributes ({attributes}) on colour pair {pair}")]
    CellRejected {
        code_point: u32,
        attributes: Attributes,
        pair: u16,
    },

    #[error("RGB components must be within 0..=1000 (red: {red}, green: {green}, blue: {blue})")]
    InvalidRgb { red: u16, green: u16, blue: u16 },

    #[error("Failed to define {colour} as ({rgb}): {source}")]
    ColourDefinition {
        colour: Colour,
        rgb: Rgb,
        #[source]
        source: io::Error,
    },

    #[error("Terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
