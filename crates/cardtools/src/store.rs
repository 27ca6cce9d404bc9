//! Fetch actions: the imperative shell around the pure application state.
//!
//! Every action calls the API, then records the outcome through the state's
//! setters. Fatal lookups surface their error to the caller after recording
//! it; the secondary lookups (printings, autocomplete, symbols) only warn,
//! because the main result is still usable without them.

use cardtools_core::card::{Card, CardList, Catalog};
use cardtools_core::store::{AppState, SearchMetaUpdate};
use cardtools_core::symbols::{symbol_map, SymbolList};

use crate::api::ApiClient;
use crate::prelude::*;

/// How to look up a single card.
#[derive(Debug, Clone)]
pub enum CardLookup {
    /// Exact card id.
    Id(String),
    /// Fuzzy name match.
    Named(String),
}

pub struct CardStore {
    client: ApiClient,
    pub state: AppState,
}

impl CardStore {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: AppState::new(),
        }
    }

    /// Run a fresh search, replacing any previous results.
    pub async fn fetch_cards(&mut self, query: &str) -> Result<()> {
        let query = query.trim();
        if query.is_empty() {
            self.state
                .set_error(Some("Search query cannot be empty.".to_string()));
            self.state.set_cards(Vec::new());
            return Ok(());
        }

        self.state.set_loading(true);
        self.state.set_error(None);

        let result = self
            .client
            .get::<CardList>("/cards/search", &[("q", query)])
            .await;
        self.state.set_loading(false);

        match result {
            Ok(list) => {
                self.state.set_cards(list.data);
                self.state.set_search_meta(SearchMetaUpdate {
                    query: Some(query.to_string()),
                    next_page: list.next_page,
                    has_more: list.has_more,
                });
                Ok(())
            }
            Err(err) => {
                let message = err.to_string();
                self.state.set_error(Some(message.clone()));
                self.state.set_cards(Vec::new());
                Err(eyre!(message))
            }
        }
    }

    /// Follow the stored next-page link and append its results. Does
    /// nothing when no link is stored.
    pub async fn fetch_next_page(&mut self) -> Result<()> {
        let next_page = match self.state.search.next_page.clone() {
            Some(url) => url,
            None => return Ok(()),
        };

        self.state.set_loading(true);
        self.state.set_error(None);

        let result = self.client.get_url::<CardList>(&next_page, &[]).await;
        self.state.set_loading(false);

        match result {
            Ok(list) => {
                self.state.append_cards(list.data);
                self.state.set_search_meta(SearchMetaUpdate {
                    query: None,
                    next_page: list.next_page,
                    has_more: list.has_more,
                });
                Ok(())
            }
            Err(err) => {
                let message = err.to_string();
                self.state.set_error(Some(message.clone()));
                Err(eyre!(message))
            }
        }
    }

    /// Load one card and, when it carries an oracle id, its printings.
    pub async fn fetch_card(&mut self, lookup: CardLookup) -> Result<Card> {
        self.state.set_loading(true);
        self.state.set_error(None);
        self.state.set_card(None);

        let result = match &lookup {
            CardLookup::Id(id) => {
                let path = format!("/cards/{}", urlencoding::encode(id));
                self.client.get::<Card>(&path, &[]).await
            }
            CardLookup::Named(name) => {
                self.client
                    .get::<Card>("/cards/named", &[("fuzzy", name.as_str())])
                    .await
            }
        };

        match result {
            Ok(card) => {
                self.state.set_card(Some(card.clone()));
                if let Some(oracle_id) = card.oracle_id.clone() {
                    self.fetch_printings(&oracle_id).await;
                }
                self.state.set_loading(false);
                Ok(card)
            }
            Err(err) => {
                let message = err.to_string();
                self.state.set_error(Some(message.clone()));
                self.state.set_card(None);
                self.state.set_loading(false);
                Err(eyre!(message))
            }
        }
    }

    /// Load every printing sharing an oracle id. Never fatal: the detail
    /// view works without the printings list.
    pub async fn fetch_printings(&mut self, oracle_id: &str) {
        if oracle_id.is_empty() {
            self.state
                .set_error(Some("Oracle ID is missing for printings.".to_string()));
            return;
        }

        self.state.set_error(None);

        let query = format!("oracleid:{oracle_id}");
        let result = self
            .client
            .get::<CardList>(
                "/cards/search",
                &[("q", query.as_str()), ("unique", "prints")],
            )
            .await;

        match result {
            Ok(list) => self.state.set_printings(list.data),
            Err(err) => {
                let message = err.to_string();
                self.state.set_error(Some(message.clone()));
                self.state.set_printings(Vec::new());
                eprintln!("Warning: Failed to fetch printings: {message}");
            }
        }
    }

    /// Update name suggestions for a partial query. Anything shorter than
    /// two characters clears the list without a request.
    pub async fn fetch_autocomplete(&mut self, query: &str) {
        if query.chars().count() < 2 {
            self.state.set_autocomplete(Vec::new());
            return;
        }

        let result = self
            .client
            .get::<Catalog>("/cards/autocomplete", &[("q", query)])
            .await;

        match result {
            Ok(catalog) => self.state.set_autocomplete(catalog.data),
            Err(err) => {
                eprintln!("Warning: Autocomplete failed: {err}");
                self.state.set_autocomplete(Vec::new());
            }
        }
    }

    /// Build the symbol map from the symbology catalog. Best effort: when
    /// the fetch fails the map stays empty and the renderer falls back to
    /// text fragments.
    pub async fn fetch_symbols(&mut self) {
        match self.client.get::<SymbolList>("/symbology", &[]).await {
            Ok(list) => self.state.set_symbols(symbol_map(&list.data)),
            Err(err) => {
                eprintln!("Warning: Failed to fetch mana symbols: {err}");
            }
        }
    }
}
