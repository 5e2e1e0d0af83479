use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Columns of the classic sheet, column `A` first, each read top to bottom.
pub const CLASSIC_COLUMNS: [&str; 15] = [
    "goBbrry", "gggroBy", "gYrrobb", "ygggoRb", "yYgoorb", "yygOrrb", "yoGbbrr", "Gorbbyy",
    "brrgoYy", "bBrgooy", "bbyyoRg", "Ooyyrbg", "yooorbG", "yggRrbo", "yggbrOo",
];

pub const CLASSIC_BONUS: [ColumnBonus; 15] = [
    ColumnBonus::new(5, 3),
    ColumnBonus::new(3, 2),
    ColumnBonus::new(3, 2),
    ColumnBonus::new(3, 2),
    ColumnBonus::new(2, 1),
    ColumnBonus::new(2, 1),
    ColumnBonus::new(2, 1),
    ColumnBonus::new(1, 0),
    ColumnBonus::new(2, 1),
    ColumnBonus::new(2, 1),
    ColumnBonus::new(2, 1),
    ColumnBonus::new(3, 2),
    ColumnBonus::new(3, 2),
    ColumnBonus::new(3, 2),
    ColumnBonus::new(5, 3),
];

/// Column `H` starts every game, its cells are always reachable.
pub const CLASSIC_FREE_COLUMN: Coord = 7;

/// Points for completing a column, first to finish or second.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnBonus {
    pub first: u8,
    pub second: u8,
}

impl ColumnBonus {
    pub const fn new(first: u8, second: u8) -> Self {
        Self { first, second }
    }

    pub const fn tier(self, claimed: bool) -> u8 {
        if claimed { self.second } else { self.first }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLayout")]
pub struct Layout {
    fields: Array2<Field>,
    column_bonus: Vec<ColumnBonus>,
    free_column: Option<Coord>,
}

/// Unchecked wire form of [`Layout`], validated before it becomes one.
#[derive(Deserialize)]
struct RawLayout {
    fields: Array2<Field>,
    column_bonus: Vec<ColumnBonus>,
    free_column: Option<Coord>,
}

impl TryFrom<RawLayout> for Layout {
    type Error = GameError;

    fn try_from(raw: RawLayout) -> Result<Self> {
        let (col_count, row_count) = raw.fields.dim();
        check_shape(col_count, row_count, &raw.column_bonus, raw.free_column)?;
        Ok(Self {
            fields: raw.fields,
            column_bonus: raw.column_bonus,
            free_column: raw.free_column,
        })
    }
}

fn check_shape(
    col_count: usize,
    row_count: usize,
    column_bonus: &[ColumnBonus],
    free_column: Option<Coord>,
) -> Result<()> {
    if col_count == 0 || row_count == 0 {
        return Err(GameError::EmptyLayout);
    }
    if Coord::try_from(col_count).is_err() || Coord::try_from(row_count).is_err() {
        return Err(GameError::InvalidCoords);
    }
    if column_bonus.len() != col_count {
        return Err(GameError::BonusTableMismatch);
    }
    if free_column.is_some_and(|col| usize::from(col) >= col_count) {
        return Err(GameError::InvalidFreeColumn);
    }
    Ok(())
}

impl Layout {
    /// Builds a layout from one letter string per column.
    pub fn parse(
        columns: &[&str],
        column_bonus: &[ColumnBonus],
        free_column: Option<Coord>,
    ) -> Result<Self> {
        let col_count = columns.len();
        let row_count = columns.first().map_or(0, |col| col.chars().count());
        check_shape(col_count, row_count, column_bonus, free_column)?;

        let mut decoded = Vec::with_capacity(col_count * row_count);
        for column in columns {
            if column.chars().count() != row_count {
                return Err(GameError::RaggedLayout);
            }
            for letter in column.chars() {
                decoded.push(Field::decode(letter)?);
            }
        }

        let fields = Array2::from_shape_vec((col_count, row_count), decoded)
            .map_err(|_| GameError::RaggedLayout)?;

        Ok(Self {
            fields,
            column_bonus: column_bonus.to_vec(),
            free_column,
        })
    }

    pub fn classic() -> Self {
        Self::parse(
            &CLASSIC_COLUMNS,
            &CLASSIC_BONUS,
            Some(CLASSIC_FREE_COLUMN),
        )
        .expect("classic layout is well-formed")
    }

    pub fn size(&self) -> Coord2 {
        grid_size(&self.fields)
    }

    pub fn col_count(&self) -> Coord {
        self.size().0
    }

    pub fn row_count(&self) -> Coord {
        self.size().1
    }

    pub fn total_cells(&self) -> CellCount {
        let (cols, rows) = self.size();
        mult(cols, rows)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn validate_column(&self, col: Coord) -> Result<Coord> {
        if col < self.col_count() {
            Ok(col)
        } else {
            Err(GameError::InvalidColumn)
        }
    }

    /// `None` outside the sheet, use indexing when the coordinates are known to be valid.
    pub fn field_at(&self, coords: Coord2) -> Option<Field> {
        self.fields.get(coords.to_nd_index()).copied()
    }

    pub fn free_column(&self) -> Option<Coord> {
        self.free_column
    }

    pub fn is_free_column(&self, col: Coord) -> bool {
        self.free_column == Some(col)
    }

    pub fn column_bonus(&self, col: Coord) -> Option<ColumnBonus> {
        self.column_bonus.get(usize::from(col)).copied()
    }

    /// Header letter printed above a column, `A` for the first one.
    pub fn column_label(&self, col: Coord) -> Option<char> {
        if col >= self.col_count() {
            return None;
        }
        char::from_u32(u32::from('A') + u32::from(col)).filter(char::is_ascii_uppercase)
    }

    pub fn star_count(&self) -> CellCount {
        self.fields
            .iter()
            .filter(|field| field.has_star)
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX)
    }

    pub fn color_cell_count(&self, color: Color) -> CellCount {
        self.fields
            .iter()
            .filter(|field| field.color == color)
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX)
    }

    /// Every coordinate in column-major order.
    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (cols, rows) = self.size();
        (0..cols).flat_map(move |x| (0..rows).map(move |y| (x, y)))
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.fields.iter_neighbors(coords)
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::classic()
    }
}

impl Index<Coord2> for Layout {
    type Output = Field;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.fields[coords.to_nd_index()]
    }
}
