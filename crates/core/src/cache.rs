//! Symbol-map persistence.
//!
//! A fetched symbol map can be written to disk and read back later, which
//! keeps rendering usable without network access. Files are plain JSON
//! objects mapping token text to icon URIs, written with sorted keys so
//! saved maps diff cleanly.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::mana::SymbolMap;

/// File name used inside the cache directory.
pub const SYMBOL_MAP_FILE: &str = "symbols.json";

#[derive(Debug)]
pub enum CacheError {
    Io(String),
    NotFound(String),
    Malformed(String),
}

impl std::fmt::Display for CacheError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheError::Io(msg) => write!(f, "IO error: {}", msg),
            CacheError::NotFound(path) => write!(f, "No saved symbol map at {}", path),
            CacheError::Malformed(msg) => write!(f, "Malformed symbol map: {}", msg),
        }
    }
}

impl std::error::Error for CacheError {}

impl From<std::io::Error> for CacheError {
    fn from(err: std::io::Error) -> Self {
        CacheError::Io(err.to_string())
    }
}

/// Write the symbol map under `cache_dir`, creating the directory when
/// needed. Returns the path of the written file.
pub fn save_symbol_map(cache_dir: &Path, symbols: &SymbolMap) -> Result<PathBuf, CacheError> {
    fs::create_dir_all(cache_dir)?;
    let path = cache_dir.join(SYMBOL_MAP_FILE);
    write_symbol_map_file(&path, symbols)?;
    Ok(path)
}

/// Read a symbol map previously written by [`save_symbol_map`].
pub fn load_symbol_map(cache_dir: &Path) -> Result<SymbolMap, CacheError> {
    let path = cache_dir.join(SYMBOL_MAP_FILE);
    if !path.exists() {
        return Err(CacheError::NotFound(path.display().to_string()));
    }
    read_symbol_map_file(&path)
}

/// Write the symbol map to an explicit file path.
pub fn write_symbol_map_file(path: &Path, symbols: &SymbolMap) -> Result<(), CacheError> {
    let sorted: BTreeMap<&String, &String> = symbols.iter().collect();
    let json = serde_json::to_string_pretty(&sorted)
        .map_err(|e| CacheError::Malformed(e.to_string()))?;
    fs::write(path, json)?;
    Ok(())
}

/// Read a symbol map from an explicit file path.
pub fn read_symbol_map_file(path: &Path) -> Result<SymbolMap, CacheError> {
    let json = fs::read_to_string(path)?;
    serde_json::from_str(&json).map_err(|e| CacheError::Malformed(e.to_string()))
}
