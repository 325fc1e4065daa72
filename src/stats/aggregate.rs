//! Aggregation Module
//! Group-and-count over rows and the seed x round advancement matrix.

use crate::data::{PostseasonRound, Row, BRACKET_ROUNDS};
use serde::Serialize;
use std::collections::HashMap;

/// Number of seed lines in a tournament region.
pub const SEED_COUNT: usize = 16;

/// Number of bracket rounds tracked by the advancement matrix.
pub const ROUND_COUNT: usize = BRACKET_ROUNDS.len();

/// One group and its member count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupEntry {
    pub key: String,
    pub count: usize,
}

/// Group counts in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupCount {
    entries: Vec<GroupEntry>,
}

impl GroupCount {
    pub fn entries(&self) -> &[GroupEntry] {
        &self.entries
    }

    pub fn get(&self, key: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.count)
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts, equal to the number of rows that were grouped.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|entry| entry.count).sum()
    }

    /// Entries by descending count, ties broken by key.
    pub fn sorted_by_count(&self) -> Vec<GroupEntry> {
        let mut sorted = self.entries.clone();
        // Stable sorts: by key first, then by descending count
        sorted.sort_by(|a, b| a.key.cmp(&b.key));
        sorted.sort_by(|a, b| b.count.cmp(&a.count));
        sorted
    }
}

/// Share of each seed line that reached each bracket round in one season.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdvancementMatrix {
    pub season: i32,
    pub rounds: [PostseasonRound; ROUND_COUNT],
    /// `cells[seed - 1][round]`, fractions in [0, 1].
    pub cells: [[f64; ROUND_COUNT]; SEED_COUNT],
    /// Teams per seed line used as the row denominators.
    pub seed_totals: [usize; SEED_COUNT],
}

impl AdvancementMatrix {
    /// Row for a seed (1-based).
    pub fn seed_row(&self, seed: u8) -> Option<&[f64; ROUND_COUNT]> {
        let idx = usize::from(seed).checked_sub(1)?;
        self.cells.get(idx)
    }

    pub fn get(&self, seed: u8, round: PostseasonRound) -> Option<f64> {
        let round_idx = round.bracket_index()?;
        self.seed_row(seed).map(|row| row[round_idx])
    }
}

/// Group-by aggregations over the dataset.
pub struct Aggregator;

impl Aggregator {
    /// Count items per key. Every item lands in exactly one group.
    pub fn group_count<T, F>(items: &[T], key: F) -> GroupCount
    where
        F: Fn(&T) -> &str,
    {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut entries: Vec<GroupEntry> = Vec::new();

        for item in items {
            let k = key(item);
            match index.get(k) {
                Some(&pos) => entries[pos].count += 1,
                None => {
                    index.insert(k.to_string(), entries.len());
                    entries.push(GroupEntry {
                        key: k.to_string(),
                        count: 1,
                    });
                }
            }
        }

        GroupCount { entries }
    }

    /// Build the advancement matrix for one season.
    ///
    /// Reaching a round counts as reaching every earlier round, so each row
    /// is non-increasing left to right. Rows without a seed or a postseason
    /// label are ignored entirely; First Four teams count toward their seed
    /// line's total but reach no bracket round.
    pub fn advancement_matrix(rows: &[Row], season: i32) -> AdvancementMatrix {
        let mut reached = [[0usize; ROUND_COUNT]; SEED_COUNT];
        let mut seed_totals = [0usize; SEED_COUNT];

        for row in rows.iter().filter(|row| row.season == Some(season)) {
            let (Some(seed), Some(round)) = (row.seed, row.postseason) else {
                continue;
            };
            let Some(seed_idx) = usize::from(seed)
                .checked_sub(1)
                .filter(|&idx| idx < SEED_COUNT)
            else {
                continue;
            };

            seed_totals[seed_idx] += 1;
            if let Some(round_idx) = round.bracket_index() {
                for cell in &mut reached[seed_idx][..=round_idx] {
                    *cell += 1;
                }
            }
        }

        let mut cells = [[0.0; ROUND_COUNT]; SEED_COUNT];
        for (seed_idx, row) in cells.iter_mut().enumerate() {
            // Empty seed lines divide by one and stay at zero
            let total = seed_totals[seed_idx].max(1) as f64;
            for (cell, &count) in row.iter_mut().zip(reached[seed_idx].iter()) {
                *cell = count as f64 / total;
            }
        }

        AdvancementMatrix {
            season,
            rounds: BRACKET_ROUNDS,
            cells,
            seed_totals,
        }
    }
}
