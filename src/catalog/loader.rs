//! Loading the level catalog from levels.json.

use super::types::LevelRecord;
use std::fs;
use std::ops::Index;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Ordered, non-empty list of levels for a playthrough.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    levels: Vec<LevelRecord>,
}

impl Catalog {
    /// Build a catalog. Returns `None` for an empty level list.
    pub fn from_levels(levels: Vec<LevelRecord>) -> Option<Self> {
        if levels.is_empty() {
            return None;
        }
        for (index, level) in levels.iter().enumerate() {
            if let Some(reason) = level.malformed() {
                tracing::warn!(
                    level = index + 1,
                    %reason,
                    "malformed level record, answers will always be marked incorrect"
                );
            }
        }
        Some(Self { levels })
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always false; kept for the `len`/`is_empty` pairing.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LevelRecord> {
        self.levels.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelRecord> {
        self.levels.iter()
    }

    pub fn into_shared(self) -> Arc<Catalog> {
        Arc::new(self)
    }
}

impl Index<usize> for Catalog {
    type Output = LevelRecord;

    fn index(&self, index: usize) -> &LevelRecord {
        &self.levels[index]
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{} contains no levels", path.display())]
    Empty { path: PathBuf },
}

/// Parse a JSON array of level records.
pub fn parse_levels(json: &str) -> Result<Vec<LevelRecord>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Read and parse a levels file into a catalog.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let json = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let levels = parse_levels(&json).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = Catalog::from_levels(levels).ok_or_else(|| CatalogError::Empty {
        path: path.to_path_buf(),
    })?;
    tracing::info!(path = %path.display(), levels = catalog.len(), "catalog loaded");
    Ok(catalog)
}
