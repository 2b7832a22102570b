use core::ops::Index;
use ndarray::Array2;
use serde::Serialize;

use crate::*;

/// One square of the board.
///
/// Only the generator writes `is_mine` and `adjacent_mine_count`; once a board
/// is handed to a [`GameSession`] both are read-only.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Cell {
    is_mine: bool,
    is_revealed: bool,
    is_flagged: bool,
    adjacent_mine_count: u8,
}

impl Cell {
    pub const fn is_mine(&self) -> bool {
        self.is_mine
    }

    pub const fn is_revealed(&self) -> bool {
        self.is_revealed
    }

    pub const fn is_flagged(&self) -> bool {
        self.is_flagged
    }

    /// Mines among the in-bounds neighbours. Always 0 for mine cells.
    pub const fn adjacent_mine_count(&self) -> u8 {
        self.adjacent_mine_count
    }

    /// Neither revealed nor flagged.
    pub const fn is_hidden(&self) -> bool {
        !self.is_revealed && !self.is_flagged
    }

    pub(crate) fn set_mine(&mut self) {
        self.is_mine = true;
    }

    pub(crate) fn set_adjacent_mine_count(&mut self, count: u8) {
        self.adjacent_mine_count = count;
    }

    pub(crate) fn reveal(&mut self) {
        self.is_revealed = true;
    }

    pub(crate) fn toggle_flag(&mut self) -> bool {
        self.is_flagged = !self.is_flagged;
        self.is_flagged
    }
}

/// A generated board. Only the generators build one, so the stored mine count
/// and every adjacency count always agree with the mines on the grid.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
}

impl Board {
    /// Blank board for `spec`: no mines, nothing revealed or flagged.
    pub(crate) fn blank(spec: &BoardSpec) -> Self {
        Self {
            cells: Array2::default((usize::from(spec.rows), usize::from(spec.cols))),
            mine_count: 0,
        }
    }

    /// Size as `(cols, rows)`.
    pub fn size(&self) -> Coord2 {
        (self.cols(), self.rows())
    }

    pub fn rows(&self) -> Coord {
        self.cells.dim().0.try_into().unwrap_or(Coord::MAX)
    }

    pub fn cols(&self) -> Coord {
        self.cells.dim().1.try_into().unwrap_or(Coord::MAX)
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.rows(), self.cols())
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mine_count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (cols, rows) = self.size();
        if coords.0 < cols && coords.1 < rows {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn get(&self, coords: Coord2) -> Option<&Cell> {
        self.cells.get(coords.to_nd_index())
    }

    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> &mut Cell {
        &mut self.cells[coords.to_nd_index()]
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    pub fn count_neighbors(&self, coords: Coord2, pred: impl Fn(&Cell) -> bool) -> u8 {
        let count = self.iter_neighbors(coords).filter(|&pos| pred(&self[pos])).count();
        // at most 8 neighbours
        count as u8
    }

    /// All cells in row-major order with their `(col, row)` coordinates.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, &Cell)> {
        self.cells
            .indexed_iter()
            .map(|((row, col), cell)| ((col as Coord, row as Coord), cell))
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.iter_cells()
            .filter(|(_, cell)| cell.is_mine())
            .map(|(coords, _)| coords)
    }

    pub(crate) fn place_mine(&mut self, coords: Coord2) -> bool {
        let cell = self.cell_mut(coords);
        if cell.is_mine() {
            return false;
        }
        cell.set_mine();
        self.mine_count += 1;
        true
    }

    pub(crate) fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn blank_board_has_spec_shape_and_default_cells() {
        let board = Board::blank(&BoardSpec::new(3, 5, 2).unwrap());

        assert_eq!(board.size(), (5, 3));
        assert_eq!(board.total_cells(), 15);
        assert_eq!(board.mine_count(), 0);
        assert!(board.iter_cells().all(|(_, cell)| *cell == Cell::default()));
        assert!(board[(4, 2)].is_hidden());
    }

    #[test]
    fn coords_are_col_row() {
        let mut board = Board::blank(&BoardSpec::new(2, 4, 1).unwrap());

        assert!(board.place_mine((3, 1)));
        assert!(!board.place_mine((3, 1)));
        assert_eq!(board.mine_count(), 1);
        assert!(board.cells()[[1, 3]].is_mine());
        assert_eq!(board.iter_mines().collect::<Vec<_>>(), [(3, 1)]);

        assert_eq!(board.validate_coords((3, 1)), Ok((3, 1)));
        assert_eq!(board.validate_coords((4, 0)), Err(GameError::InvalidCoords));
        assert_eq!(board.validate_coords((0, 2)), Err(GameError::InvalidCoords));
        assert!(board.get((0, 2)).is_none());
    }

    #[test]
    fn safe_cell_count_never_underflows() {
        let board = Board {
            cells: Array2::default((1, 2)),
            mine_count: 9,
        };
        assert_eq!(board.safe_cell_count(), 0);

        let board = Board::from_mine_coords((2, 1), &[(0, 0)]).unwrap();
        assert_eq!(board.safe_cell_count(), 1);
    }

    #[test]
    fn serialized_board_keeps_generated_counts() {
        let board = Board::from_mine_coords((2, 1), &[(0, 0)]).unwrap();
        let json = serde_json::to_value(&board).unwrap();

        assert_eq!(json["mine_count"], 1);
        assert_eq!(board.iter_mines().count(), 1);
        assert_eq!(board[(1, 0)].adjacent_mine_count(), 1);
    }

    #[test]
    fn flag_toggles_back_to_hidden() {
        let mut cell = Cell::default();
        assert!(cell.toggle_flag());
        assert!(!cell.is_hidden());
        assert!(!cell.toggle_flag());
        assert!(cell.is_hidden());
    }
}
