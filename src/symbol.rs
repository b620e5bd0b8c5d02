//! Icon symbols that can be attached to a [`TaskList`](crate::list::TaskList)
//!
//! The set of selectable symbols is fixed. It ships with the crate (`resources/listSymbols.json`) and is parsed once per process.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// The bundled catalog, embedded at build time
static BUNDLED_SYMBOLS: &str = include_str!("../resources/listSymbols.json");
const BUNDLED_ORIGIN: &str = "listSymbols.json (bundled)";

static CATALOG: Lazy<SymbolCatalog> = Lazy::new(|| {
    match SymbolCatalog::from_json_str(BUNDLED_SYMBOLS, BUNDLED_ORIGIN) {
        Ok(catalog) => catalog,
        // The resource is part of the build. If it does not parse, this build is broken
        Err(err) => panic!("Couldn't load the bundled symbol catalog: {}", err),
    }
});


/// An icon identifier
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
}

impl Symbol {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self { name: name.into() }
    }
}


#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("unable to read symbol catalog {path:?}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("unable to parse symbol catalog {origin}: {source}")]
    Decode { origin: String, source: serde_json::Error },
    #[error("symbol #{index} of {origin} has an empty name")]
    EmptyName { origin: String, index: usize },
}

/// A read-only list of symbols
#[derive(Clone, Debug, PartialEq)]
pub struct SymbolCatalog {
    symbols: Vec<Symbol>,
}

impl SymbolCatalog {
    /// The catalog that ships with this crate.
    ///
    /// # Panics
    /// Panics on first use if the bundled resource is malformed
    pub fn bundled() -> &'static SymbolCatalog {
        &CATALOG
    }

    /// Parse a catalog from a JSON array of `{"name": ...}` objects.
    /// `origin` is only used in error messages
    pub fn from_json_str(json: &str, origin: &str) -> Result<Self, CatalogError> {
        let symbols: Vec<Symbol> = serde_json::from_str(json)
            .map_err(|source| CatalogError::Decode { origin: origin.to_string(), source })?;

        if let Some(index) = symbols.iter().position(|s| s.name.trim().is_empty()) {
            return Err(CatalogError::EmptyName { origin: origin.to_string(), index });
        }

        log::debug!("Loaded {} symbols from {}", symbols.len(), origin);
        Ok(Self { symbols })
    }

    /// Load a catalog from a file
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| CatalogError::Io { path: path.to_path_buf(), source })?;
        Self::from_json_str(&content, &path.display().to_string())
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.iter().find(|s| s.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// The symbol that is pre-selected when creating a new list
    pub fn default_symbol(&self) -> Option<&Symbol> {
        self.symbols.first()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
