//! Pure application state.
//!
//! Everything the tool knows between API calls lives here. The shell runs
//! the fetches and records their results through the setters; the shape and
//! the bookkeeping rules are deterministic and tested without any I/O.

use crate::card::{best_image_uri, Card};
use crate::mana::SymbolMap;

/// Search bookkeeping: the active query and where the next page lives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchMeta {
    pub query: String,
    /// Absolute URL of the next result page, when the API offered one.
    pub next_page: Option<String>,
    pub has_more: bool,
}

/// Fields of a search-meta update. A `None` query leaves the stored query
/// untouched, so follow-up pages keep the query that started the search.
#[derive(Debug, Clone, Default)]
pub struct SearchMetaUpdate {
    pub query: Option<String>,
    pub next_page: Option<String>,
    pub has_more: bool,
}

/// Application state. Setters are last-write-wins; error and loading are
/// plain flags the fetch actions toggle around their work.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub cards: Vec<Card>,
    pub card: Option<Card>,
    pub search: SearchMeta,
    pub printings: Vec<Card>,
    pub symbols: SymbolMap,
    pub autocomplete: Vec<String>,
    pub loading: bool,
    pub error: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the result list (a fresh search).
    pub fn set_cards(&mut self, cards: Vec<Card>) {
        self.cards = cards;
    }

    /// Extend the result list (a follow-up page).
    pub fn append_cards(&mut self, cards: Vec<Card>) {
        self.cards.extend(cards);
    }

    pub fn set_card(&mut self, card: Option<Card>) {
        self.card = card;
    }

    /// Record pagination state. `has_more` is forced on whenever a next-page
    /// link is present.
    pub fn set_search_meta(&mut self, update: SearchMetaUpdate) {
        if let Some(query) = update.query {
            self.search.query = query;
        }
        self.search.has_more = update.has_more || update.next_page.is_some();
        self.search.next_page = update.next_page;
    }

    pub fn set_printings(&mut self, printings: Vec<Card>) {
        self.printings = printings;
    }

    pub fn set_symbols(&mut self, symbols: SymbolMap) {
        self.symbols = symbols;
    }

    pub fn set_autocomplete(&mut self, suggestions: Vec<String>) {
        self.autocomplete = suggestions;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    /// Best displayable image for the currently loaded card.
    pub fn current_card_image(&self) -> Option<&str> {
        self.card.as_ref().and_then(best_image_uri)
    }

    pub fn symbol_map(&self) -> &SymbolMap {
        &self.symbols
    }
}
