//! Field Mapper Module
//! Projects raw CSV records into typed `Row`s (numeric parsing, field renaming).

use super::row::{PostseasonRound, RawRow, Row};

pub const COL_TEAM: &str = "TEAM";
pub const COL_CONF: &str = "CONF";
pub const COL_GAMES: &str = "G";
pub const COL_WINS: &str = "W";
pub const COL_POWER_RATING: &str = "BARTHAG";
pub const COL_TURNOVER_RATE: &str = "TOR";
pub const COL_TWO_PT: &str = "2P_O";
pub const COL_THREE_PT: &str = "3P_O";
pub const COL_TWO_PT_ALLOWED: &str = "2P_D";
pub const COL_THREE_PT_ALLOWED: &str = "3P_D";
pub const COL_EFG: &str = "EFG_O";
pub const COL_EFG_ALLOWED: &str = "EFG_D";
pub const COL_WAB: &str = "WAB";
pub const COL_POSTSEASON: &str = "POSTSEASON";
pub const COL_SEED: &str = "SEED";
pub const COL_YEAR: &str = "YEAR";

/// Header columns every dataset must carry.
pub const REQUIRED_COLUMNS: [&str; 16] = [
    COL_TEAM,
    COL_CONF,
    COL_GAMES,
    COL_WINS,
    COL_POWER_RATING,
    COL_TURNOVER_RATE,
    COL_TWO_PT,
    COL_THREE_PT,
    COL_TWO_PT_ALLOWED,
    COL_THREE_PT_ALLOWED,
    COL_EFG,
    COL_EFG_ALLOWED,
    COL_WAB,
    COL_POSTSEASON,
    COL_SEED,
    COL_YEAR,
];

/// Maps raw records to typed rows. Never fails: bad cells become sentinels.
pub struct FieldMapper;

impl FieldMapper {
    /// Map one raw record.
    pub fn map_row(raw: &RawRow) -> Row {
        let games: Option<u32> = Self::parse_int(raw.get(COL_GAMES));
        // Wins can never exceed games played
        let wins = Self::parse_int::<u32>(raw.get(COL_WINS))
            .filter(|&wins| games.map_or(true, |games| wins <= games));

        Row {
            team: Self::text(raw, COL_TEAM),
            conference: Self::text(raw, COL_CONF),
            games,
            wins,
            power_rating: Self::parse_float(raw.get(COL_POWER_RATING)),
            turnover_rate: Self::parse_float(raw.get(COL_TURNOVER_RATE)),
            two_pt_pct: Self::parse_float(raw.get(COL_TWO_PT)),
            three_pt_pct: Self::parse_float(raw.get(COL_THREE_PT)),
            two_pt_pct_allowed: Self::parse_float(raw.get(COL_TWO_PT_ALLOWED)),
            three_pt_pct_allowed: Self::parse_float(raw.get(COL_THREE_PT_ALLOWED)),
            effective_fg_pct: Self::parse_float(raw.get(COL_EFG)),
            effective_fg_pct_allowed: Self::parse_float(raw.get(COL_EFG_ALLOWED)),
            wins_above_bubble: Self::parse_float(raw.get(COL_WAB)),
            postseason: raw.get(COL_POSTSEASON).and_then(PostseasonRound::from_label),
            seed: Self::parse_int::<u8>(raw.get(COL_SEED))
                .filter(|seed| (1..=16).contains(seed)),
            season: Self::parse_int(raw.get(COL_YEAR)),
        }
    }

    /// Map a whole dataset, preserving order.
    pub fn map_rows(raw_rows: &[RawRow]) -> Vec<Row> {
        raw_rows.iter().map(Self::map_row).collect()
    }

    fn text(raw: &RawRow, column: &str) -> String {
        raw.get(column)
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    }

    /// Parse a float cell, NaN on anything unparseable.
    pub fn parse_float(cell: Option<&str>) -> f64 {
        cell.and_then(|s| s.trim().parse::<f64>().ok())
            .unwrap_or(f64::NAN)
    }

    /// Parse an integer cell. Whole-valued floats ("3.0") are accepted.
    pub fn parse_int<T: TryFrom<i64>>(cell: Option<&str>) -> Option<T> {
        let text = cell?.trim();
        let value = match text.parse::<i64>() {
            Ok(v) => v,
            Err(_) => {
                let f = text.parse::<f64>().ok()?;
                if !f.is_finite() || f.fract() != 0.0 {
                    return None;
                }
                f as i64
            }
        };
        T::try_from(value).ok()
    }
}
