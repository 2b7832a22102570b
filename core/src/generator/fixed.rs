use alloc::vec::Vec;

use super::*;

/// Places mines at caller-chosen coordinates, for hand-made puzzles and tests.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedBoardGenerator {
    mines: Vec<Coord2>,
}

impl FixedBoardGenerator {
    pub fn new(mines: impl IntoIterator<Item = Coord2>) -> Self {
        Self {
            mines: mines.into_iter().collect(),
        }
    }
}

impl BoardGenerator for FixedBoardGenerator {
    fn generate(self, spec: BoardSpec) -> Result<Board> {
        let mut board = create_board(&spec)?;
        for coords in self.mines {
            let coords = board.validate_coords(coords)?;
            if !board.place_mine(coords) {
                log::warn!("Duplicate mine at {:?}", coords);
                return Err(GameError::MineCountMismatch);
            }
        }
        if board.mine_count() != spec.mine_count {
            return Err(GameError::MineCountMismatch);
        }
        compute_adjacency(&mut board);
        Ok(board)
    }
}

impl Board {
    /// Builds a board of `size` `(cols, rows)` with mines at exactly `mine_coords`.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mine_count = mine_coords
            .len()
            .try_into()
            .map_err(|_| GameError::TooManyMines)?;
        let spec = BoardSpec::new(size.1, size.0, mine_count)?;
        FixedBoardGenerator::new(mine_coords.iter().copied()).generate(spec)
    }
}
