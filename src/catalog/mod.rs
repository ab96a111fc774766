//! Level catalog: level records and the levels.json loader.

pub mod loader;
pub mod types;

pub use loader::{load_catalog, parse_levels, Catalog, CatalogError};
pub use types::{AnswerRule, LevelRecord, MalformedRule};
