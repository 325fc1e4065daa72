//! CSV Data Loader Module
//! Reads the season statistics CSV into raw records using Polars.

use super::mapper::REQUIRED_COLUMNS;
use super::row::RawRow;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Missing required columns: {0}")]
    MissingColumns(String),
}

/// Loads the dataset with Polars. Every column is read as text; parsing
/// numbers is left to the field mapper.
pub struct DataLoader {
    rows: Vec<RawRow>,
    columns: Vec<String>,
    file_path: Option<PathBuf>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            columns: Vec::new(),
            file_path: None,
        }
    }

    /// Load a CSV file. Replaces anything loaded before.
    pub fn load_csv(&mut self, file_path: impl AsRef<Path>) -> Result<&[RawRow], LoaderError> {
        let file_path = file_path.as_ref();
        self.file_path = Some(file_path.to_path_buf());

        // Schema inference disabled: all columns come back as strings
        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(0))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        let columns: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|required| !columns.iter().any(|c| c == required))
            .collect();
        if !missing.is_empty() {
            return Err(LoaderError::MissingColumns(missing.join(", ")));
        }

        self.rows = Self::to_raw_rows(&df, &columns)?;
        self.columns = columns;

        log::info!(
            "Loaded {} rows, {} columns from {}",
            self.rows.len(),
            self.columns.len(),
            file_path.display()
        );

        Ok(&self.rows)
    }

    fn to_raw_rows(df: &DataFrame, columns: &[String]) -> Result<Vec<RawRow>, LoaderError> {
        let mut text_columns = Vec::with_capacity(columns.len());
        for name in columns {
            let column = df.column(name)?.cast(&DataType::String)?;
            text_columns.push((name.as_str(), column));
        }

        let mut rows = vec![RawRow::new(); df.height()];
        for (name, column) in &text_columns {
            let ca = column.as_materialized_series().str()?;
            for (row, cell) in rows.iter_mut().zip(ca.into_iter()) {
                if let Some(cell) = cell {
                    row.insert(*name, cell);
                }
            }
        }

        Ok(rows)
    }

    /// Records from the last successful load.
    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    /// Header columns from the last successful load.
    pub fn get_columns(&self) -> &[String] {
        &self.columns
    }

    pub fn get_row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn get_file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }
}
