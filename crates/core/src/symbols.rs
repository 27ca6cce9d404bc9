//! Symbol catalog models and the token → icon map.

use serde::{Deserialize, Serialize};

use crate::mana::SymbolMap;

/// One entry of the symbology catalog.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CardSymbol {
    /// Token text, braces included, e.g. `{G}` or `{2/W}`.
    pub symbol: String,
    #[serde(default)]
    pub svg_uri: Option<String>,
    #[serde(default)]
    pub english: Option<String>,
    #[serde(default)]
    pub represents_mana: bool,
}

/// Envelope returned by the symbology endpoint.
#[derive(Debug, Deserialize, Clone)]
pub struct SymbolList {
    #[serde(default)]
    pub data: Vec<CardSymbol>,
}

/// Build the map the renderer consumes. Entries without an icon URI are
/// skipped so their tokens hit the renderer's fallback fragment instead of
/// producing images with empty sources.
pub fn symbol_map(symbols: &[CardSymbol]) -> SymbolMap {
    symbols
        .iter()
        .filter_map(|entry| {
            entry
                .svg_uri
                .as_ref()
                .map(|uri| (entry.symbol.clone(), uri.clone()))
        })
        .collect()
}
