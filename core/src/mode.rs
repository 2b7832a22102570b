use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

/// Board dimensions and mine count for one round.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSpec {
    pub rows: Coord,
    pub cols: Coord,
    pub mine_count: CellCount,
}

impl BoardSpec {
    pub const fn new_unchecked(rows: Coord, cols: Coord, mine_count: CellCount) -> Self {
        Self {
            rows,
            cols,
            mine_count,
        }
    }

    pub fn new(rows: Coord, cols: Coord, mine_count: CellCount) -> Result<Self> {
        let spec = Self::new_unchecked(rows, cols, mine_count);
        spec.validate()?;
        Ok(spec)
    }

    /// Requires a non-empty board with `0 < mine_count < rows * cols`.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GameError::EmptyBoard);
        }
        if self.mine_count == 0 {
            return Err(GameError::NoMines);
        }
        if self.mine_count >= self.total_cells() {
            return Err(GameError::TooManyMines);
        }
        Ok(())
    }

    /// Size as `(cols, rows)`, the same order as cell coordinates.
    pub const fn size(&self) -> Coord2 {
        (self.cols, self.rows)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    pub const fn safe_cell_count(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mine_count)
    }
}

/// Fixed catalogue of difficulty presets, in menu order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameMode {
    #[default]
    Easy,
    Medium,
    Hard,
    VeryHard,
    Insane,
    Extreme,
}

impl GameMode {
    pub const ALL: [GameMode; 6] = [
        GameMode::Easy,
        GameMode::Medium,
        GameMode::Hard,
        GameMode::VeryHard,
        GameMode::Insane,
        GameMode::Extreme,
    ];

    pub const fn board_spec(self) -> BoardSpec {
        use GameMode::*;
        match self {
            Easy => BoardSpec::new_unchecked(8, 8, 10),
            Medium => BoardSpec::new_unchecked(12, 12, 24),
            Hard => BoardSpec::new_unchecked(16, 16, 40),
            VeryHard => BoardSpec::new_unchecked(20, 20, 80),
            Insane => BoardSpec::new_unchecked(24, 24, 120),
            Extreme => BoardSpec::new_unchecked(30, 30, 200),
        }
    }

    pub const fn name(self) -> &'static str {
        use GameMode::*;
        match self {
            Easy => "EASY",
            Medium => "MEDIUM",
            Hard => "HARD",
            VeryHard => "VERY_HARD",
            Insane => "INSANE",
            Extreme => "EXTREME",
        }
    }

    /// Looks a preset up by its position in the menu.
    pub fn from_index(index: usize) -> Result<Self> {
        Self::ALL.get(index).copied().ok_or(GameError::UnknownMode)
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GameMode {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|mode| name_matches(mode.name(), s))
            .ok_or(GameError::UnknownMode)
    }
}

/// Case-insensitive, and a space may stand in for an underscore.
fn name_matches(name: &str, input: &str) -> bool {
    name.len() == input.len()
        && name
            .bytes()
            .zip(input.bytes())
            .all(|(a, b)| a.eq_ignore_ascii_case(&b) || (a == b'_' && b == b' '))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_matches_presets() {
        let expected = [
            (8, 8, 10),
            (12, 12, 24),
            (16, 16, 40),
            (20, 20, 80),
            (24, 24, 120),
            (30, 30, 200),
        ];
        for (mode, (rows, cols, mines)) in GameMode::ALL.into_iter().zip(expected) {
            let spec = mode.board_spec();
            assert_eq!((spec.rows, spec.cols, spec.mine_count), (rows, cols, mines));
            assert_eq!(spec.validate(), Ok(()), "{} should be valid", mode);
        }
    }

    #[test]
    fn lookup_by_index_and_name() {
        assert_eq!(GameMode::from_index(0), Ok(GameMode::Easy));
        assert_eq!(GameMode::from_index(5), Ok(GameMode::Extreme));
        assert_eq!(GameMode::from_index(6), Err(GameError::UnknownMode));
        assert_eq!(GameMode::Insane.index(), 4);

        assert_eq!("very_hard".parse(), Ok(GameMode::VeryHard));
        assert_eq!(" Very Hard ".parse(), Ok(GameMode::VeryHard));
        assert_eq!("nightmare".parse::<GameMode>(), Err(GameError::UnknownMode));
    }

    #[test]
    fn spec_validation_rejects_degenerate_boards() {
        assert_eq!(BoardSpec::new(0, 8, 1), Err(GameError::EmptyBoard));
        assert_eq!(BoardSpec::new(8, 0, 1), Err(GameError::EmptyBoard));
        assert_eq!(BoardSpec::new(8, 8, 0), Err(GameError::NoMines));
        assert_eq!(BoardSpec::new(2, 2, 4), Err(GameError::TooManyMines));
        assert_eq!(BoardSpec::new(2, 2, 3).map(|s| s.safe_cell_count()), Ok(1));
    }

    #[test]
    fn serializes_with_catalogue_names() {
        let json = serde_json::to_string(&GameMode::VeryHard).unwrap();
        assert_eq!(json, "\"VERY_HARD\"");
        let mode: GameMode = serde_json::from_str("\"EXTREME\"").unwrap();
        assert_eq!(mode, GameMode::Extreme);
    }
}
