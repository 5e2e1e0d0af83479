use serde::{Deserialize, Serialize};

use crate::*;

pub const CROSS: char = '✗';
pub const STAR: char = '★';

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Opacity {
    Full,
    Half,
    Faded,
    Dim,
}

impl Opacity {
    pub const fn value(self) -> f32 {
        use Opacity::*;
        match self {
            Full => 1.0,
            Half => 0.5,
            Faded => 0.25,
            Dim => 0.2,
        }
    }
}

impl GameState {
    /// Cells outside the sheet are drawn [`Opacity::Dim`].
    pub fn cell_opacity(&self, coords: Coord2) -> Opacity {
        let filter = self.highlight();
        let Some(field) = self.field_at(coords) else {
            return Opacity::Dim;
        };

        if !filter.colors.matches(field.color) {
            return Opacity::Dim;
        }
        if !filter.reachable_only {
            return Opacity::Full;
        }

        match self.reach_level(coords) {
            ReachLevel::Direct => Opacity::Full,
            ReachLevel::Indirect => Opacity::Half,
            ReachLevel::Unreachable => Opacity::Dim,
        }
    }

    /// Opacity of a toolbar color swatch.
    pub fn color_opacity(&self, color: Color) -> Opacity {
        if self.highlight().colors.matches(color) {
            Opacity::Full
        } else {
            Opacity::Faded
        }
    }

    /// Symbol drawn inside a cell: a cross once crossed, a star while a starred cell is still open.
    pub fn cell_glyph(&self, coords: Coord2) -> Option<char> {
        if self.is_crossed(coords) {
            Some(CROSS)
        } else {
            self.field_at(coords)
                .filter(|field| field.has_star)
                .map(|_| STAR)
        }
    }
}
