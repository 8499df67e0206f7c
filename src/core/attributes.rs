//! Display attributes carried by every rendered cell

use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// Cell display attributes. The empty set is "normal".
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Attributes: u32 {
        const STANDOUT    = 1 << 0;
        const UNDERLINE   = 1 << 1;
        const REVERSE     = 1 << 2;
        const BLINK       = 1 << 3;
        const DIM         = 1 << 4;
        const BOLD        = 1 << 5;
        const ALT_CHARSET = 1 << 6;
        const INVISIBLE   = 1 << 7;
        const PROTECT     = 1 << 8;
        const HORIZONTAL  = 1 << 9;
        const LEFT        = 1 << 10;
        const LOW         = 1 << 11;
        const RIGHT       = 1 << 12;
        const TOP         = 1 << 13;
        const VERTICAL    = 1 << 14;
        const ITALIC      = 1 << 15;
    }
}

const NAMES: [(Attributes, &str); 16] = [
    (Attributes::STANDOUT, "standout"),
    (Attributes::UNDERLINE, "underline"),
    (Attributes::REVERSE, "reverse"),
    (Attributes::BLINK, "blink"),
    (Attributes::DIM, "dim"),
    (Attributes::BOLD, "bold"),
    (Attributes::ALT_CHARSET, "alternate character set"),
    (Attributes::INVISIBLE, "invisible"),
    (Attributes::PROTECT, "protect"),
    (Attributes::HORIZONTAL, "horizontal"),
    (Attributes::LEFT, "left"),
    (Attributes::LOW, "low"),
    (Attributes::RIGHT, "right"),
    (Attributes::TOP, "top"),
    (Attributes::VERTICAL, "vertical"),
    (Attributes::ITALIC, "italic"),
];

impl Attributes {
    pub const NORMAL: Attributes = Attributes::empty();

    /// Resolve a single configuration name (`bold`, `underline`, ...)
    pub fn by_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase().replace(['_', '-'], " ");
        if name == "normal" {
            return Some(Self::NORMAL);
        }
        if name == "altcharset" || name == "alt charset" {
            return Some(Self::ALT_CHARSET);
        }
        NAMES
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(flag, _)| *flag)
    }
}

impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "normal");
        }
        let mut first = true;
        for (flag, name) in NAMES.iter() {
            if self.contains(*flag) {
                if !first {
                    write!(f, ", ")?;
                }
                write!(f, "{}", name)?;
                first = false;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Attributes::NORMAL.to_string(), "normal");
        assert_eq!(Attributes::BOLD.to_string(), "bold");
        assert_eq!(
            (Attributes::UNDERLINE | Attributes::ITALIC).to_string(),
            "underline, italic"
        );
    }

    #[test]
    fn test_by_name() {
        assert_eq!(Attributes::by_name("Bold"), Some(Attributes::BOLD));
        assert_eq!(Attributes::by_name("alt_charset"), Some(Attributes::ALT_CHARSET));
        assert_eq!(Attributes::by_name("Alt-Charset"), Some(Attributes::ALT_CHARSET));
        assert_eq!(Attributes::by_name("alt char set"), None);
        assert_eq!(
            Attributes::by_name("alternate-character-set"),
            Some(Attributes::ALT_CHARSET)
        );
        assert_eq!(Attributes::by_name("altcharset"), Some(Attributes::ALT_CHARSET));
        assert_eq!(Attributes::by_name("normal"), Some(Attributes::NORMAL));
        assert_eq!(Attributes::by_name("sparkly"), None);
    }
}
