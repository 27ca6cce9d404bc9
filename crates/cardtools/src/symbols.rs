use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::prelude::{println, *};
use colored::Colorize;

use cardtools_core::cache;
use cardtools_core::mana::SymbolMap;

use crate::store::CardStore;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct App {
    /// Output as JSON (token → icon URI map)
    #[arg(long)]
    pub json: bool,

    /// Save the map to the cache directory for offline rendering
    #[arg(long)]
    pub save: bool,

    /// Write the map to an explicit path instead of the cache directory
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Fetching the symbology catalog...");
    }

    let client = crate::api::create_client(&global)?;
    let mut store = CardStore::new(client);
    store.fetch_symbols().await;

    let symbols = store.state.symbol_map();
    if symbols.is_empty() {
        return Err(eyre!("No mana symbols available"));
    }

    if let Some(path) = &app.out {
        cache::write_symbol_map_file(path, symbols).map_err(|e| eyre!("{}", e))?;
        println!("Saved {} symbols to {}", symbols.len(), path.display());
    } else if app.save {
        let dir = symbol_cache_dir()?;
        let path = cache::save_symbol_map(&dir, symbols).map_err(|e| eyre!("{}", e))?;
        println!("Saved {} symbols to {}", symbols.len(), path.display());
    }

    if app.json {
        println!("{}", format_symbols_json(symbols)?);
    } else if app.out.is_none() && !app.save {
        print!("{}", format_symbols_text(symbols));
    }

    Ok(())
}

/// Cache directory for saved symbol maps.
pub(crate) fn symbol_cache_dir() -> Result<PathBuf> {
    let base = dirs_next::cache_dir().ok_or_eyre("Unable to determine the cache directory")?;
    Ok(base.join("cardtools"))
}

/// Convert the symbol map to JSON with stable key order
fn format_symbols_json(symbols: &SymbolMap) -> Result<String> {
    let sorted: BTreeMap<&String, &String> = symbols.iter().collect();
    serde_json::to_string_pretty(&sorted).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

/// Convert the symbol map to a two-column table
fn format_symbols_text(symbols: &SymbolMap) -> String {
    let sorted: BTreeMap<&String, &String> = symbols.iter().collect();

    let mut table = new_table();
    table.add_row(prettytable::row![
        "Symbol".bold().green(),
        "Icon".bold().green()
    ]);
    for (token, uri) in sorted {
        table.add_row(prettytable::row![token, uri]);
    }

    let mut result = table.to_string();
    result.push_str(&format!("{} symbols\n", symbols.len()));
    result
}
