use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::*;

/// One of the five cell colors printed on the sheet.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Color {
    Yellow,
    Green,
    Orange,
    Blue,
    Red,
}

impl Color {
    pub const ALL: [Color; 5] = [
        Color::Yellow,
        Color::Green,
        Color::Orange,
        Color::Blue,
        Color::Red,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Decodes a lower-case layout letter.
    pub const fn from_letter(letter: char) -> Option<Self> {
        use Color::*;
        match letter {
            'y' => Some(Yellow),
            'g' => Some(Green),
            'o' => Some(Orange),
            'b' => Some(Blue),
            'r' => Some(Red),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        use Color::*;
        match self {
            Yellow => "yellow",
            Green => "green",
            Orange => "orange",
            Blue => "blue",
            Red => "red",
        }
    }

    /// Position in [`Color::ALL`], used to index per-color tallies.
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn flag(self) -> ColorSet {
        use Color::*;
        match self {
            Yellow => ColorSet::YELLOW,
            Green => ColorSet::GREEN,
            Orange => ColorSet::ORANGE,
            Blue => ColorSet::BLUE,
            Red => ColorSet::RED,
        }
    }
}

bitflags! {
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct ColorSet: u8 {
        const YELLOW = 1;
        const GREEN  = 1 << 1;
        const ORANGE = 1 << 2;
        const BLUE   = 1 << 3;
        const RED    = 1 << 4;
    }
}

impl ColorSet {
    pub const fn has(self, color: Color) -> bool {
        self.contains(color.flag())
    }

    /// Empty sets match every color, as an unfiltered toolbar does.
    pub const fn matches(self, color: Color) -> bool {
        self.is_empty() || self.has(color)
    }

    pub fn toggled(self, color: Color) -> Self {
        self ^ color.flag()
    }
}

/// Immutable per-cell description decoded from the layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub color: Color,
    pub has_star: bool,
}

impl Field {
    /// Upper-case letters mark starred cells.
    pub fn decode(letter: char) -> Result<Self> {
        let lower = letter.to_ascii_lowercase();
        let color = Color::from_letter(lower).ok_or(GameError::UnknownColor(letter))?;
        Ok(Self {
            color,
            has_star: lower != letter,
        })
    }
}
