use std::collections::HashMap;
use std::path::Path;

use crate::ConfigError;

/// Read-only mapping from canonical species name to its localized name.
///
/// Keys are matched exactly (case and whitespace sensitive).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameTable {
    entries: HashMap<String, String>,
}

impl NameTable {
    #[must_use]
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn get(&self, species: &str) -> Option<&str> {
        self.entries.get(species).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for NameTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Load the species name table from a flat JSON object.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read or is not a string-to-string object.
pub fn load_names(path: &Path) -> Result<NameTable, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let entries: HashMap<String, String> =
        serde_json::from_str(&content).map_err(|e| ConfigError::NamesParse {
            path: path.display().to_string(),
            source: e,
        })?;

    Ok(NameTable::new(entries))
}
