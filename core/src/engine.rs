use alloc::vec;
use alloc::vec::Vec;
use core::ops::BitOr;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Valid transitions:
/// - Ready -> Playing (first safe reveal)
/// - Ready/Playing -> Won
/// - Ready/Playing -> Detonating (a mine was revealed)
/// - Detonating -> Lost (loss sequence drained)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    Ready,
    Playing,
    Won,
    Detonating,
    Lost,
}

impl GameStatus {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    /// No more player input is accepted.
    pub const fn is_over(self) -> bool {
        matches!(self, Self::Won | Self::Detonating | Self::Lost)
    }

    pub const fn is_lost(self) -> bool {
        matches!(self, Self::Detonating | Self::Lost)
    }

    /// Nothing will change anymore, not even through the loss sequence.
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

/// Merges outcomes of a multi-cell reveal, a mine wins over everything.
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (HitMine, _) => HitMine,
            (_, HitMine) => HitMine,
            (Won, _) => Won,
            (_, Won) => Won,
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}

/// State of one round, from the first click to win or loss.
///
/// Owns its [`Board`] exclusively; the host reads it through `&self` accessors or
/// a [`BoardView`] and only changes it through the input methods below.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSession {
    board: Board,
    status: GameStatus,
    revealed_safe_count: CellCount,
    flagged_count: CellCount,
    triggered_mine: Option<Coord2>,
}

impl GameSession {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            status: GameStatus::default(),
            revealed_safe_count: 0,
            flagged_count: 0,
            triggered_mine: None,
        }
    }

    pub fn generate(spec: BoardSpec, generator: impl BoardGenerator) -> Result<Self> {
        generator.generate(spec).map(Self::new)
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn spec(&self) -> BoardSpec {
        BoardSpec::new_unchecked(self.board.rows(), self.board.cols(), self.board.mine_count())
    }

    pub fn revealed_safe_count(&self) -> CellCount {
        self.revealed_safe_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// Mines minus flags; negative when the player over-flags.
    pub fn mines_left(&self) -> isize {
        (self.board.mine_count() as isize) - (self.flagged_count as isize)
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        self.board.get(coords).copied().ok_or(GameError::InvalidCoords)
    }

    /// Whether a chord on `coords` would open its neighbours.
    pub fn can_reveal_surrounding(&self, coords: Coord2) -> bool {
        if self.status.is_over() {
            return false;
        }

        match self.board.get(coords) {
            Some(cell) if cell.is_revealed() && cell.adjacent_mine_count() > 0 => {
                self.board.count_neighbors(coords, Cell::is_flagged) == cell.adjacent_mine_count()
            }
            _ => false,
        }
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.board.validate_coords(coords)?;

        if self.status.is_over() {
            return Ok(MarkOutcome::NoChange);
        }

        let cell = self.board.cell_mut(coords);
        if cell.is_revealed() {
            return Ok(MarkOutcome::NoChange);
        }

        if cell.toggle_flag() {
            self.flagged_count += 1;
            log::debug!("Flagged {:?}", coords);
        } else {
            self.flagged_count -= 1;
            log::debug!("Unflagged {:?}", coords);
        }
        Ok(MarkOutcome::Changed)
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.board.validate_coords(coords)?;
        Ok(self.reveal_cell(coords))
    }

    /// Chord: when the flags around a revealed number account for all of its
    /// mines, reveal every other neighbour. Flags are trusted, not checked.
    pub fn reveal_surrounding(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.board.validate_coords(coords)?;

        if !self.can_reveal_surrounding(coords) {
            return Ok(RevealOutcome::NoChange);
        }

        log::debug!("Chord at {:?}", coords);
        let neighbors: SmallVec<[Coord2; 8]> = self.board.iter_neighbors(coords).collect();
        Ok(neighbors
            .into_iter()
            .map(|pos| self.reveal_cell(pos))
            .fold(RevealOutcome::NoChange, BitOr::bitor))
    }

    /// Mines not revealed yet, the one that ended the game first.
    pub fn unrevealed_mines(&self) -> Vec<Coord2> {
        let triggered = self.triggered_mine;
        let mut mines: Vec<Coord2> = triggered
            .filter(|&coords| !self.board[coords].is_revealed())
            .into_iter()
            .collect();
        mines.extend(
            self.board
                .iter_mines()
                .filter(|&coords| Some(coords) != triggered && !self.board[coords].is_revealed()),
        );
        mines
    }

    fn reveal_cell(&mut self, coords: Coord2) -> RevealOutcome {
        if self.status.is_over() {
            return RevealOutcome::NoChange;
        }

        let cell = self.board[coords];
        if !cell.is_hidden() {
            return RevealOutcome::NoChange;
        }

        if cell.is_mine() {
            self.triggered_mine = Some(coords);
            self.status = GameStatus::Detonating;
            log::info!("Mine hit at {:?}, game lost", coords);
            return RevealOutcome::HitMine;
        }

        // `is_revealed` doubles as the visited set, a cell is opened at most once
        let mut to_visit = vec![coords];
        let mut opened: CellCount = 0;
        while let Some(visit_coords) = to_visit.pop() {
            let cell = self.board.cell_mut(visit_coords);
            if !cell.is_hidden() || cell.is_mine() {
                continue;
            }

            cell.reveal();
            opened += 1;
            let count = cell.adjacent_mine_count();
            log::trace!("Opened {:?}, adjacent mines: {}", visit_coords, count);

            if count == 0 {
                to_visit.extend(
                    self.board
                        .iter_neighbors(visit_coords)
                        .filter(|&pos| self.board[pos].is_hidden()),
                );
            }
        }

        self.revealed_safe_count += opened;
        log::debug!(
            "Revealed {} cell(s) from {:?}, {}/{} safe cells open",
            opened,
            coords,
            self.revealed_safe_count,
            self.board.safe_cell_count()
        );

        if self.revealed_safe_count == self.board.safe_cell_count() {
            self.status = GameStatus::Won;
            log::info!("All safe cells revealed, game won");
            RevealOutcome::Won
        } else {
            if self.status.is_ready() {
                self.status = GameStatus::Playing;
            }
            RevealOutcome::Revealed
        }
    }

    /// Reveals one mine of the loss sequence. Only valid while detonating.
    pub(crate) fn detonate(&mut self, coords: Coord2) -> bool {
        if !matches!(self.status, GameStatus::Detonating) || self.board.get(coords).is_none() {
            return false;
        }

        let cell = self.board.cell_mut(coords);
        if !cell.is_mine() || cell.is_revealed() {
            return false;
        }
        cell.reveal();
        log::trace!("Detonated mine at {:?}", coords);
        true
    }

    pub(crate) fn finish_loss(&mut self) {
        if matches!(self.status, GameStatus::Detonating) {
            self.status = GameStatus::Lost;
            log::info!("Loss sequence finished");
        }
    }
}
