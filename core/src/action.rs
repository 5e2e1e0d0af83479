use serde::{Deserialize, Serialize};

use crate::*;

/// A single flag flip on the sheet.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToggleAction {
    /// Cross or un-cross one grid cell.
    Cell(Coord2),
    /// Mark a column's first-tier bonus as taken by another player.
    ColumnClaimed(Coord),
    /// Mark a color's first-tier bonus as taken by another player.
    ColorClaimed(Color),
    Joker(usize),
    HighlightColor(Color),
    ReachableOnly,
}

impl GameState {
    /// Returns the snapshot that follows from flipping `action`, leaving `self` untouched.
    ///
    /// Crossing a cell requires it to be directly reachable; un-crossing is always allowed.
    pub fn apply_toggle(&self, action: ToggleAction) -> Result<Self> {
        if let Err(err) = self.check_toggle(action) {
            log::trace!("toggle rejected: {:?} ({})", action, err);
            return Err(err);
        }

        let mut next = self.clone();
        next.flip(action);
        log::debug!("toggle applied: {:?}", action);
        Ok(next)
    }

    pub fn can_apply(&self, action: ToggleAction) -> bool {
        self.check_toggle(action).is_ok()
    }

    /// Whether applying `action` would clear a flag that is currently set.
    ///
    /// Callers ask the player before clearing, the core never prompts.
    pub fn requires_confirmation(&self, action: ToggleAction) -> bool {
        use ToggleAction::*;

        match action {
            Cell(coords) => {
                self.layout().validate_coords(coords).is_ok() && self.is_crossed(coords)
            }
            ColumnClaimed(col) => self.is_column_claimed(col),
            ColorClaimed(color) => self.is_color_claimed(color),
            Joker(index) => self.is_joker_crossed(index),
            HighlightColor(_) | ReachableOnly => false,
        }
    }

    fn check_toggle(&self, action: ToggleAction) -> Result<()> {
        use ToggleAction::*;

        match action {
            Cell(coords) => {
                let coords = self.layout().validate_coords(coords)?;
                if self.is_crossed(coords) || self.is_reachable(coords, Reach::Direct) {
                    Ok(())
                } else {
                    Err(GameError::Unreachable(coords))
                }
            }
            ColumnClaimed(col) => self.layout().validate_column(col).map(|_| ()),
            Joker(index) if index >= JOKER_COUNT => Err(GameError::InvalidJoker),
            Joker(_) | ColorClaimed(_) | HighlightColor(_) | ReachableOnly => Ok(()),
        }
    }
}
