use alloc::vec;
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Number of joker marks on every sheet.
pub const JOKER_COUNT: usize = 8;

/// Rendering hint picked in the toolbar, never consulted by the rules.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightFilter {
    pub colors: ColorSet,
    pub reachable_only: bool,
}

impl Default for HighlightFilter {
    fn default() -> Self {
        Self {
            colors: ColorSet::empty(),
            reachable_only: true,
        }
    }
}

/// Immutable snapshot of one player's sheet.
///
/// Queries borrow it, mutations go through [`GameState::apply_toggle`] and hand back a new snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGameState")]
pub struct GameState {
    layout: Layout,
    grid: Array2<bool>,
    highlight: HighlightFilter,
    column_claimed: Vec<bool>,
    colors_claimed: ColorSet,
    jokers: [bool; JOKER_COUNT],
}

/// Unchecked wire form of [`GameState`], the grid and column flags must fit the layout.
#[derive(Deserialize)]
struct RawGameState {
    layout: Layout,
    grid: Array2<bool>,
    highlight: HighlightFilter,
    column_claimed: Vec<bool>,
    colors_claimed: ColorSet,
    jokers: [bool; JOKER_COUNT],
}

impl TryFrom<RawGameState> for GameState {
    type Error = GameError;

    fn try_from(raw: RawGameState) -> Result<Self> {
        let [cols, rows] = raw.layout.size().to_nd_index();
        if raw.grid.dim() != (cols, rows) || raw.column_claimed.len() != cols {
            return Err(GameError::InvalidBoardShape);
        }

        Ok(Self {
            layout: raw.layout,
            grid: raw.grid,
            highlight: raw.highlight,
            column_claimed: raw.column_claimed,
            colors_claimed: raw.colors_claimed,
            jokers: raw.jokers,
        })
    }
}

impl GameState {
    pub fn new(layout: Layout) -> Self {
        let size = layout.size();
        let column_claimed = vec![false; usize::from(size.0)];
        Self {
            layout,
            grid: Array2::default(size.to_nd_index()),
            highlight: HighlightFilter::default(),
            column_claimed,
            colors_claimed: ColorSet::empty(),
            jokers: [false; JOKER_COUNT],
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn size(&self) -> Coord2 {
        self.layout.size()
    }

    pub fn highlight(&self) -> HighlightFilter {
        self.highlight
    }

    pub fn field_at(&self, coords: Coord2) -> Option<Field> {
        self.layout.field_at(coords)
    }

    /// Cells outside the sheet read as not crossed.
    pub fn is_crossed(&self, coords: Coord2) -> bool {
        self.grid
            .get(coords.to_nd_index())
            .copied()
            .unwrap_or(false)
    }

    pub fn crossed_count(&self) -> CellCount {
        self.grid
            .iter()
            .filter(|&&crossed| crossed)
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX)
    }

    pub fn is_column_claimed(&self, col: Coord) -> bool {
        self.column_claimed
            .get(usize::from(col))
            .copied()
            .unwrap_or(false)
    }

    pub fn colors_claimed(&self) -> ColorSet {
        self.colors_claimed
    }

    pub fn is_color_claimed(&self, color: Color) -> bool {
        self.colors_claimed.has(color)
    }

    pub fn is_joker_crossed(&self, index: usize) -> bool {
        self.jokers.get(index).copied().unwrap_or(false)
    }

    pub fn jokers(&self) -> [bool; JOKER_COUNT] {
        self.jokers
    }

    pub fn crossed_jokers(&self) -> usize {
        self.jokers.iter().filter(|&&crossed| crossed).count()
    }

    /// Flips one flag in place, bounds are checked by the caller.
    pub(crate) fn flip(&mut self, action: ToggleAction) {
        use ToggleAction::*;

        match action {
            Cell(coords) => {
                let cell = &mut self.grid[coords.to_nd_index()];
                *cell = !*cell;
            }
            ColumnClaimed(col) => {
                let claimed = &mut self.column_claimed[usize::from(col)];
                *claimed = !*claimed;
            }
            ColorClaimed(color) => self.colors_claimed = self.colors_claimed.toggled(color),
            Joker(index) => self.jokers[index] = !self.jokers[index],
            HighlightColor(color) => {
                self.highlight.colors = self.highlight.colors.toggled(color);
            }
            ReachableOnly => self.highlight.reachable_only = !self.highlight.reachable_only,
        }
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.layout.iter_neighbors(coords)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Layout::classic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn new_state_starts_blank() {
        let state = GameState::default();

        assert_eq!(state.size(), (15, 7));
        assert_eq!(state.crossed_count(), 0);
        assert!(state.layout().iter_coords().all(|pos| !state.is_crossed(pos)));
        assert!((0..15).all(|col| !state.is_column_claimed(col)));
        assert!(state.colors_claimed().is_empty());
        assert_eq!(state.crossed_jokers(), 0);
        assert_eq!(state.highlight(), HighlightFilter::default());
        assert!(state.highlight().reachable_only);
    }

    #[test]
    fn flip_toggles_exactly_one_flag() {
        let mut state = GameState::default();

        state.flip(ToggleAction::Cell((3, 4)));
        state.flip(ToggleAction::Joker(2));
        state.flip(ToggleAction::ColorClaimed(Color::Red));
        state.flip(ToggleAction::ColumnClaimed(14));

        assert!(state.is_crossed((3, 4)));
        assert_eq!(state.crossed_count(), 1);
        assert!(state.is_joker_crossed(2));
        assert_eq!(state.crossed_jokers(), 1);
        assert!(state.is_color_claimed(Color::Red));
        assert!(state.is_column_claimed(14));

        state.flip(ToggleAction::Cell((3, 4)));
        assert!(!state.is_crossed((3, 4)));
    }

    #[test]
    fn out_of_range_reads_are_false() {
        let state = GameState::default();
        assert!(!state.is_column_claimed(15));
        assert!(!state.is_joker_crossed(JOKER_COUNT));
        assert!(!state.is_crossed((15, 0)));
        assert!(!state.is_crossed((0, 7)));
        assert_eq!(state.field_at((15, 0)), None);
    }

    #[test]
    fn snapshot_survives_serialization() {
        let mut state = GameState::default();
        state.flip(ToggleAction::Cell((7, 0)));
        state.flip(ToggleAction::HighlightColor(Color::Blue));

        let json = serde_json::to_string(&state).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, state);
    }

    #[test]
    fn short_column_flags_are_rejected_on_load() {
        let mut value = serde_json::to_value(GameState::default()).unwrap();
        value["column_claimed"].as_array_mut().unwrap().truncate(2);

        let result = serde_json::from_value::<GameState>(value);

        let err = result.unwrap_err().to_string();
        assert!(err.contains("Board shape does not match declared size"), "{err}");
    }

    #[test]
    fn grid_must_match_layout_on_load() {
        let mut value = serde_json::to_value(GameState::default()).unwrap();
        value["grid"] = serde_json::to_value(Array2::<bool>::default([3, 3])).unwrap();

        assert!(serde_json::from_value::<GameState>(value).is_err());
    }

    #[test]
    fn loaded_snapshot_accepts_every_column_claim() {
        let json = serde_json::to_string(&GameState::default()).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();

        let state = (0..restored.layout().col_count()).fold(restored, |state, col| {
            state.apply_toggle(ToggleAction::ColumnClaimed(col)).unwrap()
        });
        assert!((0..15).all(|col| state.is_column_claimed(col)));
    }
}
