//! Data module - CSV loading and typed row mapping

mod loader;
mod mapper;
mod row;

pub use loader::{DataLoader, LoaderError};
pub use mapper::{FieldMapper, REQUIRED_COLUMNS};
pub use row::{PostseasonRound, RawRow, Row, BRACKET_ROUNDS};
