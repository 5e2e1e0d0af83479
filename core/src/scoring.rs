use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Signed score unit, star penalties push totals below zero.
pub type Points = i32;

pub const COLOR_BONUS_FIRST: Points = 5;
pub const COLOR_BONUS_SECOND: Points = 3;
pub const STAR_PENALTY: Points = -2;
pub const JOKER_POINTS: Points = 1;

/// Every score component shown on the sheet, recomputed from scratch on each call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub bonus_points: Points,
    pub column_points: Points,
    pub joker_points: Points,
    pub star_penalty: Points,
    pub total: Points,
    pub missing_by_color: [CellCount; Color::COUNT],
    pub missing_stars: CellCount,
    pub column_complete: Vec<bool>,
}

impl ScoreBreakdown {
    pub fn missing(&self, color: Color) -> CellCount {
        self.missing_by_color[color.index()]
    }

    pub fn color_complete(&self, color: Color) -> bool {
        self.missing(color) == 0
    }

    pub fn is_column_complete(&self, col: Coord) -> bool {
        self.column_complete
            .get(usize::from(col))
            .copied()
            .unwrap_or(false)
    }
}

impl GameState {
    pub fn compute_score(&self) -> ScoreBreakdown {
        let (cols, rows) = self.size();

        let mut missing_by_color = [0; Color::COUNT];
        let mut missing_stars: CellCount = 0;
        let mut column_complete = Vec::with_capacity(usize::from(cols));

        for x in 0..cols {
            let mut complete = true;
            for y in 0..rows {
                let coords = (x, y);
                if self.is_crossed(coords) {
                    continue;
                }

                complete = false;
                let Some(field) = self.field_at(coords) else {
                    continue;
                };
                missing_by_color[field.color.index()] += 1;
                if field.has_star {
                    missing_stars += 1;
                }
            }
            column_complete.push(complete);
        }

        let bonus_points: Points = Color::ALL
            .into_iter()
            .filter(|color| missing_by_color[color.index()] == 0)
            .map(|color| {
                if self.is_color_claimed(color) {
                    COLOR_BONUS_SECOND
                } else {
                    COLOR_BONUS_FIRST
                }
            })
            .sum();

        let column_points: Points = (0..cols)
            .filter(|&col| column_complete[usize::from(col)])
            .filter_map(|col| {
                let bonus = self.layout().column_bonus(col)?;
                Some(Points::from(bonus.tier(self.is_column_claimed(col))))
            })
            .sum();

        let joker_points = JOKER_POINTS * self.crossed_jokers() as Points;
        let star_penalty = STAR_PENALTY * Points::from(missing_stars);

        ScoreBreakdown {
            bonus_points,
            column_points,
            joker_points,
            star_penalty,
            total: bonus_points + column_points + joker_points + star_penalty,
            missing_by_color,
            missing_stars,
            column_complete,
        }
    }
}
