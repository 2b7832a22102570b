use rand::Rng;

use super::*;

/// Purely random generation: mines are spread uniformly over the whole board.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, spec: BoardSpec) -> Result<Board> {
        use rand::prelude::*;

        let mut board = create_board(&spec)?;
        let mut rng = SmallRng::seed_from_u64(self.seed);
        place_mines(&mut board, &spec, &mut rng)?;
        compute_adjacency(&mut board);

        log::debug!(
            "Generated {}x{} board with {} mines from seed {}",
            spec.cols,
            spec.rows,
            board.mine_count(),
            self.seed
        );
        Ok(board)
    }
}

/// Places exactly `spec.mine_count` new mines by rejection sampling: draw a cell,
/// keep it only if it is not a mine yet.
pub fn place_mines<R: Rng + ?Sized>(
    board: &mut Board,
    spec: &BoardSpec,
    rng: &mut R,
) -> Result<()> {
    check_capacity(board, spec)?;

    let mut placed: CellCount = 0;
    let mut draws: u32 = 0;
    while placed < spec.mine_count {
        let coords = (rng.random_range(0..spec.cols), rng.random_range(0..spec.rows));
        draws += 1;
        if board.place_mine(coords) {
            placed += 1;
        }
    }

    log::trace!("Placed {} mines in {} draws", placed, draws);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn places_exact_mine_count_for_every_mode() {
        for mode in GameMode::ALL {
            for seed in 0..4 {
                let spec = mode.board_spec();
                let board = RandomBoardGenerator::new(seed).generate(spec).unwrap();
                let mines = board.iter_cells().filter(|(_, cell)| cell.is_mine()).count();

                assert_eq!(mines, usize::from(spec.mine_count), "{} seed {}", mode, seed);
                assert_eq!(board.mine_count(), spec.mine_count);
                assert_eq!(board.size(), spec.size());
            }
        }
    }

    #[test]
    fn easy_board_has_ten_mines() {
        let board = RandomBoardGenerator::new(7)
            .generate(GameMode::Easy.board_spec())
            .unwrap();
        assert_eq!(board.iter_mines().count(), 10);
        assert!(board.iter_cells().all(|(_, cell)| !cell.is_revealed() && !cell.is_flagged()));
    }

    #[test]
    fn same_seed_same_layout() {
        let spec = GameMode::Medium.board_spec();
        let a = RandomBoardGenerator::new(42).generate(spec).unwrap();
        let b = RandomBoardGenerator::new(42).generate(spec).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn dense_board_leaves_exactly_one_safe_cell() {
        let spec = BoardSpec::new(3, 3, 8).unwrap();
        let board = RandomBoardGenerator::new(3).generate(spec).unwrap();
        assert_eq!(board.safe_cell_count(), 1);
        assert_eq!(board.iter_mines().count(), 8);
    }

    #[test]
    fn refuses_to_overfill_a_board() {
        let spec = BoardSpec::new(2, 2, 2).unwrap();
        let mut board = create_board(&spec).unwrap();
        let mut rng = SmallRng::seed_from_u64(0);

        place_mines(&mut board, &spec, &mut rng).unwrap();
        assert_eq!(
            place_mines(&mut board, &spec, &mut rng),
            Err(GameError::TooManyMines)
        );
        assert_eq!(board.mine_count(), 2);
    }
}
