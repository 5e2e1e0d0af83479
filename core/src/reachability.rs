use alloc::collections::BTreeSet;
use alloc::vec;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// How far a reachability query may look.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reach {
    /// Crossed, in the free column, or next to a crossed cell.
    Direct,
    /// Direct, or connected to a directly reachable cell through uncrossed cells of the same color.
    Indirect,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReachLevel {
    Unreachable,
    Indirect,
    Direct,
}

impl GameState {
    /// Out-of-bounds coordinates are never reachable.
    pub fn is_reachable(&self, coords: Coord2, mode: Reach) -> bool {
        if self.layout().validate_coords(coords).is_err() {
            return false;
        }

        match mode {
            Reach::Direct => self.is_directly_reachable(coords),
            Reach::Indirect => self.is_indirectly_reachable(coords),
        }
    }

    pub fn reach_level(&self, coords: Coord2) -> ReachLevel {
        if self.is_reachable(coords, Reach::Direct) {
            ReachLevel::Direct
        } else if self.is_reachable(coords, Reach::Indirect) {
            ReachLevel::Indirect
        } else {
            ReachLevel::Unreachable
        }
    }

    pub fn reachable_cells(&self, mode: Reach) -> Vec<Coord2> {
        self.layout()
            .iter_coords()
            .filter(|&coords| self.is_reachable(coords, mode))
            .collect()
    }

    fn is_directly_reachable(&self, coords: Coord2) -> bool {
        self.layout().is_free_column(coords.0)
            || self.is_crossed(coords)
            || self.iter_neighbors(coords).any(|pos| self.is_crossed(pos))
    }

    fn is_indirectly_reachable(&self, start: Coord2) -> bool {
        let Some(Field { color, .. }) = self.field_at(start) else {
            return false;
        };
        let mut visited = BTreeSet::from([start]);
        let mut to_visit = vec![start];

        while let Some(coords) = to_visit.pop() {
            if self.is_directly_reachable(coords) {
                return true;
            }

            to_visit.extend(
                self.iter_neighbors(coords)
                    .filter(|&pos| self.field_at(pos).is_some_and(|field| field.color == color))
                    .filter(|&pos| visited.insert(pos)),
            );
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crossed(cells: &[Coord2]) -> GameState {
        let mut state = GameState::default();
        for &coords in cells {
            state.flip(ToggleAction::Cell(coords));
        }
        state
    }

    fn monochrome(free_column: Option<Coord>) -> GameState {
        let layout = Layout::parse(&["yyyyyyy"; 15], &[ColumnBonus::new(1, 0); 15], free_column)
            .unwrap();
        GameState::new(layout)
    }

    #[test]
    fn free_column_is_always_reachable() {
        for state in [GameState::default(), crossed(&[(0, 0), (14, 6), (3, 3)])] {
            for row in 0..7 {
                assert!(state.is_reachable((7, row), Reach::Direct));
                assert!(state.is_reachable((7, row), Reach::Indirect));
            }
        }
    }

    #[test]
    fn empty_sheet_only_free_column_is_direct() {
        let state = GameState::default();
        let direct = state.reachable_cells(Reach::Direct);
        assert_eq!(direct.len(), 7);
        assert!(direct.iter().all(|&(col, _)| col == 7));
    }

    #[test]
    fn crossed_cells_are_reachable_in_both_modes() {
        let state = crossed(&[(0, 0), (12, 3)]);
        for coords in [(0, 0), (12, 3)] {
            assert!(state.is_reachable(coords, Reach::Direct));
            assert!(state.is_reachable(coords, Reach::Indirect));
        }
    }

    #[test]
    fn orthogonal_neighbors_of_a_cross_are_direct() {
        let state = crossed(&[(3, 3)]);
        for coords in [(2, 3), (4, 3), (3, 2), (3, 4)] {
            assert!(state.is_reachable(coords, Reach::Direct), "{coords:?}");
        }
        for coords in [(2, 2), (4, 4), (5, 3)] {
            assert!(!state.is_reachable(coords, Reach::Direct), "{coords:?}");
        }
    }

    #[test]
    fn direct_implies_indirect() {
        for state in [
            GameState::default(),
            crossed(&[(0, 0)]),
            crossed(&[(7, 3), (8, 3), (9, 3)]),
            crossed(&[(14, 0), (2, 5)]),
        ] {
            for coords in state.layout().iter_coords() {
                if state.is_reachable(coords, Reach::Direct) {
                    assert!(state.is_reachable(coords, Reach::Indirect), "{coords:?}");
                }
            }
        }
    }

    #[test]
    fn same_color_chain_reaches_free_column() {
        let state = GameState::default();

        // orange at G2 touches orange at H2
        assert_eq!(state.reach_level((6, 1)), ReachLevel::Indirect);
        // the yellow region around A1..G1 never touches column H
        assert_eq!(state.reach_level((6, 0)), ReachLevel::Unreachable);
        assert_eq!(state.reach_level((7, 0)), ReachLevel::Direct);
    }

    #[test]
    fn crossing_opens_neighbors() {
        let state = crossed(&[(7, 0)]);
        assert_eq!(state.reach_level((6, 0)), ReachLevel::Direct);
        assert_eq!(state.reach_level((8, 0)), ReachLevel::Direct);
        // yellow region behind G1 now chains to the direct cell
        assert_eq!(state.reach_level((3, 0)), ReachLevel::Indirect);
    }

    #[test]
    fn monochrome_sheet_terminates() {
        let state = monochrome(None);
        assert!(state.reachable_cells(Reach::Indirect).is_empty());

        let mut state = monochrome(None);
        state.flip(ToggleAction::Cell((0, 0)));
        assert!(!state.is_reachable((14, 6), Reach::Direct));
        assert!(state.is_reachable((14, 6), Reach::Indirect));
        assert_eq!(state.reachable_cells(Reach::Indirect).len(), 105);
    }

    #[test]
    fn monochrome_sheet_with_free_column_is_fully_indirect() {
        let state = monochrome(Some(7));
        assert_eq!(state.reachable_cells(Reach::Indirect).len(), 105);
        assert_eq!(state.reachable_cells(Reach::Direct).len(), 7);
    }

    #[test]
    fn out_of_bounds_is_unreachable() {
        let state = GameState::default();
        assert!(!state.is_reachable((15, 0), Reach::Direct));
        assert!(!state.is_reachable((0, 7), Reach::Indirect));
    }
}
