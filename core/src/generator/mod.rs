use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Strategy that turns a [`BoardSpec`] into a fully generated board: mines placed
/// and adjacency counts computed.
pub trait BoardGenerator {
    fn generate(self, spec: BoardSpec) -> Result<Board>;
}

/// Allocates a blank board. Fails before allocating anything if `spec` is invalid.
pub fn create_board(spec: &BoardSpec) -> Result<Board> {
    spec.validate().inspect_err(|err| {
        log::warn!("Refusing to create board for {:?}: {}", spec, err);
    })?;
    Ok(Board::blank(spec))
}

/// Stores the neighbour mine count on every safe cell. Mine cells keep 0.
pub fn compute_adjacency(board: &mut Board) {
    let (cols, rows) = board.size();
    for row in 0..rows {
        for col in 0..cols {
            let coords = (col, row);
            if board[coords].is_mine() {
                continue;
            }
            let count = board.count_neighbors(coords, Cell::is_mine);
            board.cell_mut(coords).set_adjacent_mine_count(count);
        }
    }
}

/// Checks that `board` was created for `spec` and still has room for its mines.
fn check_capacity(board: &Board, spec: &BoardSpec) -> Result<()> {
    spec.validate()?;
    if board.size() != spec.size() {
        return Err(GameError::InvalidBoardShape);
    }
    if board.mine_count().saturating_add(spec.mine_count) >= board.total_cells() {
        return Err(GameError::TooManyMines);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_board_rejects_invalid_spec() {
        let spec = BoardSpec::new_unchecked(4, 4, 16);
        assert_eq!(create_board(&spec), Err(GameError::TooManyMines));

        let spec = BoardSpec::new_unchecked(0, 4, 1);
        assert_eq!(create_board(&spec), Err(GameError::EmptyBoard));
    }

    #[test]
    fn adjacency_matches_hand_computed_values() {
        // . . . .
        // . * . .
        // . . * .
        // . . . *
        let board = Board::from_mine_coords((4, 4), &[(1, 1), (2, 2), (3, 3)]).unwrap();

        assert_eq!(board[(0, 0)].adjacent_mine_count(), 1);
        assert_eq!(board[(1, 0)].adjacent_mine_count(), 1);
        assert_eq!(board[(2, 1)].adjacent_mine_count(), 2);
        assert_eq!(board[(1, 2)].adjacent_mine_count(), 2);
        assert_eq!(board[(3, 2)].adjacent_mine_count(), 2);
        assert_eq!(board[(3, 0)].adjacent_mine_count(), 0);
        assert_eq!(board[(0, 3)].adjacent_mine_count(), 0);
        // mines keep zero
        assert_eq!(board[(2, 2)].adjacent_mine_count(), 0);
    }

    #[test]
    fn adjacency_equals_neighbor_mine_count_everywhere() {
        for seed in 0..8 {
            let board = RandomBoardGenerator::new(seed)
                .generate(GameMode::Hard.board_spec())
                .unwrap();
            for (coords, cell) in board.iter_cells() {
                if cell.is_mine() {
                    continue;
                }
                let expected = board
                    .iter_neighbors(coords)
                    .filter(|&pos| board[pos].is_mine())
                    .count();
                assert_eq!(usize::from(cell.adjacent_mine_count()), expected, "at {:?}", coords);
            }
        }
    }

    #[test]
    fn capacity_check_rejects_mismatched_board() {
        let board = create_board(&BoardSpec::new(3, 3, 1).unwrap()).unwrap();
        let other = BoardSpec::new(3, 4, 1).unwrap();
        assert_eq!(check_capacity(&board, &other), Err(GameError::InvalidBoardShape));
    }
}
