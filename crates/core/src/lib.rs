//! Core library for cardtools
//!
//! This crate is the pure half of the cardtools application: deterministic
//! transformation functions with zero I/O. The `cardtools` binary owns the
//! HTTP client and the terminal; everything here can be exercised with
//! fixture data alone, no mocking required.
//!
//! # Module Organization
//!
//! - [`mana`]: the mana-token renderer, turning card text with `{G}`-style
//!   tokens into HTML
//! - [`sanitize`]: optional allow-list sanitation of rendered markup
//! - [`card`]: card API domain models and output transforms
//! - [`symbols`]: symbology catalog models and the token → icon map
//! - [`store`]: application state and its bookkeeping rules
//! - [`cache`]: symbol-map persistence for offline rendering
//!
//! The split exists so the rendering and state rules stay ignorant of where
//! data comes from or where output goes. Same input, same output, always.

pub mod cache;
pub mod card;
pub mod mana;
pub mod sanitize;
pub mod store;
pub mod symbols;
