//! Typed Team-Season Records
//! One `Row` per team per season, plus the postseason round labels.

use serde::Serialize;
use std::collections::HashMap;

/// Furthest postseason round a team reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum PostseasonRound {
    /// First Four
    R68,
    R64,
    R32,
    /// Sweet Sixteen
    S16,
    /// Elite Eight
    E8,
    /// Final Four
    F4,
    /// Lost the championship game
    #[serde(rename = "2ND")]
    RunnerUp,
    Champions,
}

/// Bracket rounds in order, the columns of the advancement heatmap.
pub const BRACKET_ROUNDS: [PostseasonRound; 7] = [
    PostseasonRound::R64,
    PostseasonRound::R32,
    PostseasonRound::S16,
    PostseasonRound::E8,
    PostseasonRound::F4,
    PostseasonRound::RunnerUp,
    PostseasonRound::Champions,
];

impl PostseasonRound {
    /// Parse a POSTSEASON cell. `NA`, blanks and unknown labels yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "R68" => Some(Self::R68),
            "R64" => Some(Self::R64),
            "R32" => Some(Self::R32),
            "S16" => Some(Self::S16),
            "E8" => Some(Self::E8),
            "F4" => Some(Self::F4),
            "2ND" => Some(Self::RunnerUp),
            "Champions" => Some(Self::Champions),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::R68 => "R68",
            Self::R64 => "R64",
            Self::R32 => "R32",
            Self::S16 => "S16",
            Self::E8 => "E8",
            Self::F4 => "F4",
            Self::RunnerUp => "2ND",
            Self::Champions => "Champions",
        }
    }

    /// Column of this round in `BRACKET_ROUNDS`; `None` for the First Four.
    pub fn bracket_index(&self) -> Option<usize> {
        BRACKET_ROUNDS.iter().position(|round| round == self)
    }
}

/// A raw CSV record: column name to cell text. Null cells are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    cells: HashMap<String, String>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from (column, cell) pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            cells: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    pub fn insert(&mut self, column: impl Into<String>, cell: impl Into<String>) {
        self.cells.insert(column.into(), cell.into());
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// One team-season record.
///
/// Float fields use NaN when the source cell was missing or not numeric;
/// integer fields use `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub team: String,
    pub conference: String,
    pub games: Option<u32>,
    pub wins: Option<u32>,
    /// BARTHAG: chance of beating an average D1 team, in [0, 1].
    pub power_rating: f64,
    /// Turnovers per 100 possessions
    pub turnover_rate: f64,
    pub two_pt_pct: f64,
    pub three_pt_pct: f64,
    pub two_pt_pct_allowed: f64,
    pub three_pt_pct_allowed: f64,
    pub effective_fg_pct: f64,
    pub effective_fg_pct_allowed: f64,
    /// Wins above bubble, signed.
    pub wins_above_bubble: f64,
    pub postseason: Option<PostseasonRound>,
    /// Tournament seed, always within 1..=16 when present.
    pub seed: Option<u8>,
    pub season: Option<i32>,
}

impl Default for Row {
    fn default() -> Self {
        Self {
            team: String::new(),
            conference: String::new(),
            games: None,
            wins: None,
            power_rating: f64::NAN,
            turnover_rate: f64::NAN,
            two_pt_pct: f64::NAN,
            three_pt_pct: f64::NAN,
            two_pt_pct_allowed: f64::NAN,
            three_pt_pct_allowed: f64::NAN,
            effective_fg_pct: f64::NAN,
            effective_fg_pct_allowed: f64::NAN,
            wins_above_bubble: f64::NAN,
            postseason: None,
            seed: None,
            season: None,
        }
    }
}

impl Row {
    /// Wins divided by games played, within [0, 1]. NaN if either is
    /// missing, no games were played, or wins exceed games.
    pub fn win_pct(&self) -> f64 {
        let (Some(wins), Some(games)) = (self.wins, self.games) else {
            return f64::NAN;
        };
        if games == 0 || wins > games {
            return f64::NAN;
        }
        f64::from(wins) / f64::from(games)
    }

    pub fn made_tournament(&self) -> bool {
        self.seed.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_round_labels() {
        for round in BRACKET_ROUNDS {
            assert_eq!(PostseasonRound::from_label(round.label()), Some(round));
        }
        assert_eq!(
            PostseasonRound::from_label("2ND"),
            Some(PostseasonRound::RunnerUp)
        );
        assert_eq!(
            PostseasonRound::from_label(" E8 "),
            Some(PostseasonRound::E8)
        );
        assert_eq!(PostseasonRound::from_label("NA"), None);
        assert_eq!(PostseasonRound::from_label(""), None);
        assert_eq!(PostseasonRound::from_label("champions"), None);
    }

    #[test]
    fn test_bracket_index() {
        assert_eq!(PostseasonRound::R64.bracket_index(), Some(0));
        assert_eq!(PostseasonRound::Champions.bracket_index(), Some(6));
        assert_eq!(PostseasonRound::R68.bracket_index(), None);
    }

    #[test]
    fn test_win_pct() {
        let row = Row {
            games: Some(30),
            wins: Some(24),
            ..Row::default()
        };
        assert_relative_eq!(row.win_pct(), 0.8, epsilon = 1e-12);

        let no_games = Row {
            games: Some(0),
            wins: Some(0),
            ..Row::default()
        };
        assert!(no_games.win_pct().is_nan());
        assert!(Row::default().win_pct().is_nan());

        let impossible = Row {
            games: Some(30),
            wins: Some(35),
            ..Row::default()
        };
        assert!(impossible.win_pct().is_nan());
    }

    #[test]
    fn test_raw_row_lookup() {
        let raw = RawRow::from_pairs([("TEAM", "Gonzaga"), ("CONF", "WCC")]);
        assert_eq!(raw.get("TEAM"), Some("Gonzaga"));
        assert_eq!(raw.get("SEED"), None);
        assert_eq!(raw.len(), 2);
    }
}
