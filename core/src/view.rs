use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What the host may paint for one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub col: Coord,
    pub row: Coord,
    /// Known only once the cell is revealed or the game is over.
    pub is_mine: Option<bool>,
    pub is_revealed: bool,
    pub is_flagged: bool,
    /// The mine that ended the game.
    pub is_exploded: bool,
    /// Present on revealed safe cells.
    pub adjacent_mine_count: Option<u8>,
}

/// Read-only projection of a [`GameSession`], rebuilt after every change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    pub rows: Coord,
    pub cols: Coord,
    pub cell_size_hint: f32,
    pub status: GameStatus,
    pub mines_left: isize,
    pub cells: Array2<CellView>,
}

impl BoardView {
    pub fn from_session(session: &GameSession, cell_size_hint: f32) -> Self {
        let board = session.board();
        let status = session.status();
        let triggered = session.triggered_mine();

        let cells = Array2::from_shape_fn(board.cells().dim(), |(row, col)| {
            let coords = (col as Coord, row as Coord);
            let cell = board[coords];
            let known = cell.is_revealed() || status.is_over();
            CellView {
                col: coords.0,
                row: coords.1,
                is_mine: known.then_some(cell.is_mine()),
                is_revealed: cell.is_revealed(),
                is_flagged: cell.is_flagged(),
                is_exploded: triggered == Some(coords),
                adjacent_mine_count: (cell.is_revealed() && !cell.is_mine())
                    .then_some(cell.adjacent_mine_count()),
            }
        });

        Self {
            rows: board.rows(),
            cols: board.cols(),
            cell_size_hint,
            status,
            mines_left: session.mines_left(),
            cells,
        }
    }

    pub fn cell(&self, coords: Coord2) -> Option<&CellView> {
        self.cells.get(coords.to_nd_index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(size: Coord2, mines: &[Coord2]) -> GameSession {
        GameSession::new(Board::from_mine_coords(size, mines).unwrap())
    }

    #[test]
    fn hides_mines_and_counts_while_playing() {
        let mut game = session((3, 1), &[(0, 0)]);
        game.reveal((1, 0)).unwrap();
        game.toggle_flag((0, 0)).unwrap();

        let view = BoardView::from_session(&game, 2.0);

        assert_eq!((view.rows, view.cols), (1, 3));
        assert_eq!(view.status, GameStatus::Playing);
        assert_eq!(view.mines_left, 0);

        let flagged = view.cell((0, 0)).unwrap();
        assert_eq!(flagged.is_mine, None);
        assert!(flagged.is_flagged);
        assert_eq!(flagged.adjacent_mine_count, None);

        let open = view.cell((1, 0)).unwrap();
        assert_eq!(open.is_mine, Some(false));
        assert_eq!(open.adjacent_mine_count, Some(1));

        let hidden = view.cell((2, 0)).unwrap();
        assert_eq!((hidden.col, hidden.row), (2, 0));
        assert_eq!(hidden.is_mine, None);
        assert_eq!(hidden.adjacent_mine_count, None);
    }

    #[test]
    fn exposes_mines_once_game_is_over() {
        let mut game = session((2, 2), &[(1, 0)]);
        game.reveal((1, 0)).unwrap();

        let view = BoardView::from_session(&game, 2.0);

        assert_eq!(view.status, GameStatus::Detonating);
        let mine = view.cell((1, 0)).unwrap();
        assert_eq!(mine.is_mine, Some(true));
        assert!(mine.is_exploded);
        assert!(!mine.is_revealed);
        assert_eq!(view.cell((0, 1)).unwrap().is_mine, Some(false));
        assert!(view.cell((2, 0)).is_none());
    }
}
