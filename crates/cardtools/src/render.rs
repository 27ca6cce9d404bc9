use std::path::PathBuf;

use crate::prelude::{eprintln, println, *};

use cardtools_core::cache::{self, CacheError};
use cardtools_core::mana::{self, SymbolMap};
use cardtools_core::sanitize::AllowList;

use crate::store::CardStore;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct App {
    /// Card text containing {G}-style tokens
    #[clap(env = "CARDTOOLS_TEXT")]
    pub text: String,

    /// Read the symbol map from a JSON file (token → icon URI)
    #[arg(long, value_name = "PATH")]
    pub map: Option<PathBuf>,

    /// Use the cached symbol map instead of fetching the catalog
    #[arg(long)]
    pub offline: bool,

    /// CSS class for icon and fallback fragments
    #[arg(long, default_value = mana::DEFAULT_ICON_CLASS)]
    pub class: String,

    /// Keep literal newlines instead of emitting <br/> elements
    #[arg(long)]
    pub no_breaks: bool,

    /// Pass the markup through the allow-list sanitizer
    #[arg(long)]
    pub sanitize: bool,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let symbols = load_symbols(&app, &global).await?;

    if global.verbose {
        // Keep stdout clean: it carries nothing but the markup.
        eprintln!("Rendering with {} known symbols...", symbols.len());
    }

    println!("{}", render_html(&app, &symbols));
    Ok(())
}

fn render_html(app: &App, symbols: &SymbolMap) -> String {
    let options = mana::RenderOptions {
        icon_class: app.class.clone(),
        newlines_to_breaks: !app.no_breaks,
    };

    if app.sanitize {
        mana::render_mana_html_with(Some(&app.text), symbols, &options, Some(&AllowList))
    } else {
        mana::render_mana_html(Some(&app.text), symbols, &options)
    }
}

/// Resolve the symbol map: an explicit file wins, then the cache when
/// offline, otherwise a best-effort catalog fetch.
async fn load_symbols(app: &App, global: &crate::Global) -> Result<SymbolMap> {
    if let Some(path) = &app.map {
        return cache::read_symbol_map_file(path)
            .map_err(|e| eyre!("Failed to read symbol map {}: {}", path.display(), e));
    }

    if app.offline {
        let dir = crate::symbols::symbol_cache_dir()?;
        return match cache::load_symbol_map(&dir) {
            Ok(map) => Ok(map),
            Err(CacheError::NotFound(path)) => {
                eprintln!("Warning: no saved symbol map at {path}; tokens will render as text");
                Ok(SymbolMap::new())
            }
            Err(e) => Err(eyre!("{}", e)),
        };
    }

    let client = crate::api::create_client(global)?;
    let mut store = CardStore::new(client);
    store.fetch_symbols().await;
    Ok(std::mem::take(&mut store.state.symbols))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_app(text: &str) -> App {
        App {
            text: text.to_string(),
            map: None,
            offline: false,
            class: mana::DEFAULT_ICON_CLASS.to_string(),
            no_breaks: false,
            sanitize: false,
        }
    }

    fn create_test_map() -> SymbolMap {
        let mut map = SymbolMap::new();
        map.insert("{G}".to_string(), "https://icons.example/G.svg".to_string());
        map
    }

    #[test]
    fn test_render_html_substitutes_tokens() {
        let app = create_test_app("Add {G}.");
        let html = render_html(&app, &create_test_map());

        assert_eq!(
            html,
            r#"Add <img src="https://icons.example/G.svg" alt="{G}" class="mana-symbol" title="{G}" />."#
        );
    }

    #[test]
    fn test_render_html_custom_class() {
        let mut app = create_test_app("{Q}");
        app.class = "cost-icon".to_string();

        let html = render_html(&app, &SymbolMap::new());

        assert_eq!(html, r#"<span class="cost-icon">{Q}</span>"#);
    }

    #[test]
    fn test_render_html_no_breaks_flag() {
        let mut app = create_test_app("a\nb");
        app.no_breaks = true;

        assert_eq!(render_html(&app, &SymbolMap::new()), "a\nb");
        app.no_breaks = false;
        assert_eq!(render_html(&app, &SymbolMap::new()), "a<br/>b");
    }

    #[test]
    fn test_render_html_sanitize_flag_keeps_output() {
        let mut app = create_test_app("Add {G}.\nDraw a card.");
        let plain = render_html(&app, &create_test_map());

        app.sanitize = true;
        assert_eq!(render_html(&app, &create_test_map()), plain);
    }
}
