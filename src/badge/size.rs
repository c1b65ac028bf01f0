use std::{fmt, str::FromStr};

use crate::clients::errors::Error;

// Text column starts 56px in and keeps 24px clear of the right edge.
const TEXT_INSET: u32 = 56 + 24;
// Upper estimate of one 14px semibold glyph.
const APPROX_CHAR_WIDTH: u32 = 8;

/// Canvas width preset of a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SizeClass {
    Small,
    #[default]
    Medium,
    Large,
}

impl SizeClass {
    pub const ALL: [SizeClass; 3] = [SizeClass::Small, SizeClass::Medium, SizeClass::Large];

    pub fn width(self) -> u32 {
        match self {
            SizeClass::Small => 480,
            SizeClass::Medium => 720,
            SizeClass::Large => 960,
        }
    }

    /// Share of the canvas width taken by a full-length bar.
    pub fn fill_ratio(self) -> f64 {
        match self {
            SizeClass::Small => 0.55,
            SizeClass::Medium => 0.71,
            SizeClass::Large => 0.75,
        }
    }

    pub fn max_bar_width(self) -> u32 {
        (f64::from(self.width()) * self.fill_ratio()).floor() as u32
    }

    /// Longest title or artist line, in characters, that fits between the text column
    /// and the right edge of the card. Longer lines get cut with an ellipsis.
    pub fn max_title_chars(self) -> usize {
        ((self.width() - TEXT_INSET) / APPROX_CHAR_WIDTH) as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SizeClass::Small => "small",
            SizeClass::Medium => "medium",
            SizeClass::Large => "large",
        }
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SizeClass {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" | "s" => Ok(SizeClass::Small),
            "medium" | "m" => Ok(SizeClass::Medium),
            "large" | "l" => Ok(SizeClass::Large),
            other => Err(Error::ConfigurationError(format!(
                "unknown size class {other:?}, expected small, medium or large"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_grow_with_size() {
        let widths: Vec<u32> = SizeClass::ALL.iter().map(|s| s.width()).collect();
        assert_eq!(widths, vec![480, 720, 960]);
        assert!(SizeClass::ALL.iter().all(|s| s.max_bar_width() < s.width()));
    }

    #[test]
    fn max_bar_width_is_floored_ratio() {
        assert_eq!(SizeClass::Small.max_bar_width(), 264);
        assert_eq!(SizeClass::Medium.max_bar_width(), 511);
        assert_eq!(SizeClass::Large.max_bar_width(), 720);
    }

    #[test]
    fn title_budget_fills_the_text_column() {
        assert_eq!(SizeClass::Small.max_title_chars(), 50);
        assert_eq!(SizeClass::Medium.max_title_chars(), 80);
        assert_eq!(SizeClass::Large.max_title_chars(), 110);
    }

    #[test]
    fn parses_names() {
        assert_eq!("Large".parse::<SizeClass>().unwrap(), SizeClass::Large);
        assert_eq!(" s ".parse::<SizeClass>().unwrap(), SizeClass::Small);
        assert!("huge".parse::<SizeClass>().is_err());
        for size in SizeClass::ALL {
            assert_eq!(size.to_string().parse::<SizeClass>().unwrap(), size);
        }
    }
}
