//! Card API domain models and pure transforms over them.
//!
//! Only the fields the tool actually reads are modeled; everything else in
//! the API payloads is ignored during deserialization.

use serde::{Deserialize, Serialize};

use crate::store::SearchMeta;

/// Card image variants keyed by size.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ImageUris {
    #[serde(default)]
    pub small: Option<String>,
    #[serde(default)]
    pub normal: Option<String>,
    #[serde(default)]
    pub large: Option<String>,
    #[serde(default)]
    pub png: Option<String>,
}

/// One face of a multi-faced card.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct CardFace {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mana_cost: Option<String>,
    #[serde(default)]
    pub type_line: Option<String>,
    #[serde(default)]
    pub oracle_text: Option<String>,
    #[serde(default)]
    pub power: Option<String>,
    #[serde(default)]
    pub toughness: Option<String>,
    #[serde(default)]
    pub image_uris: Option<ImageUris>,
}

/// A single card as returned by the API.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Card {
    pub id: String,
    #[serde(default)]
    pub oracle_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub released_at: Option<String>,
    #[serde(default)]
    pub mana_cost: Option<String>,
    #[serde(default)]
    pub type_line: Option<String>,
    #[serde(default)]
    pub oracle_text: Option<String>,
    #[serde(default)]
    pub flavor_text: Option<String>,
    #[serde(default)]
    pub power: Option<String>,
    #[serde(default)]
    pub toughness: Option<String>,
    #[serde(default)]
    pub set: String,
    #[serde(default)]
    pub set_name: String,
    #[serde(default)]
    pub collector_number: String,
    #[serde(default)]
    pub rarity: String,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub scryfall_uri: Option<String>,
    #[serde(default)]
    pub image_uris: Option<ImageUris>,
    #[serde(default)]
    pub card_faces: Option<Vec<CardFace>>,
}

/// Paginated list envelope returned by the search endpoint. The next-page
/// link, when present, is an absolute URL.
#[derive(Debug, Deserialize, Clone)]
pub struct CardList {
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_page: Option<String>,
    #[serde(default)]
    pub data: Vec<Card>,
}

/// Catalog envelope: a plain list of strings (autocomplete results).
#[derive(Debug, Deserialize, Clone)]
pub struct Catalog {
    #[serde(default)]
    pub data: Vec<String>,
}

/// Error envelope sent with non-2xx responses.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiError {
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

/// Pick the best available image for a card: large, then normal, then the
/// first face's large or normal for cards whose images live on the faces.
pub fn best_image_uri(card: &Card) -> Option<&str> {
    if let Some(images) = &card.image_uris {
        if let Some(uri) = &images.large {
            return Some(uri);
        }
        if let Some(uri) = &images.normal {
            return Some(uri);
        }
    }

    let face = card.card_faces.as_ref()?.first()?;
    let images = face.image_uris.as_ref()?;
    if let Some(uri) = &images.large {
        return Some(uri);
    }
    images.normal.as_deref()
}

/// Compact one-line view of a card for list output.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CardSummary {
    pub id: String,
    pub name: String,
    pub mana_cost: Option<String>,
    pub type_line: Option<String>,
    pub set: String,
    pub set_name: String,
    pub collector_number: String,
    pub rarity: String,
    pub released_at: Option<String>,
}

pub fn summarize_card(card: &Card) -> CardSummary {
    CardSummary {
        id: card.id.clone(),
        name: card.name.clone(),
        mana_cost: card.mana_cost.clone(),
        type_line: card.type_line.clone(),
        set: card.set.clone(),
        set_name: card.set_name.clone(),
        collector_number: card.collector_number.clone(),
        rarity: card.rarity.clone(),
        released_at: card.released_at.clone(),
    }
}

/// Search results together with the pagination bookkeeping, shaped for
/// machine-readable output.
#[derive(Debug, Serialize)]
pub struct SearchOutput {
    pub query: String,
    pub count: usize,
    pub has_more: bool,
    pub next_page: Option<String>,
    pub cards: Vec<CardSummary>,
}

pub fn build_search_output(cards: &[Card], search: &SearchMeta) -> SearchOutput {
    SearchOutput {
        query: search.query.clone(),
        count: cards.len(),
        has_more: search.has_more,
        next_page: search.next_page.clone(),
        cards: cards.iter().map(summarize_card).collect(),
    }
}

/// A card detail together with its resolved image and sibling printings,
/// shaped for machine-readable output.
#[derive(Debug, Serialize)]
pub struct CardOutput {
    pub card: Card,
    pub image: Option<String>,
    pub printings: Vec<CardSummary>,
}

pub fn build_card_output(card: &Card, printings: &[Card]) -> CardOutput {
    CardOutput {
        card: card.clone(),
        image: best_image_uri(card).map(str::to_string),
        printings: printings.iter().map(summarize_card).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_card() -> Card {
        Card {
            id: "f2b9983e-20d4-4d12-9e2c-ec6d9a345787".to_string(),
            oracle_id: Some("562d71b9-1646-474e-9293-55da6947a758".to_string()),
            name: "Ancient Brontodon".to_string(),
            released_at: Some("2017-09-29".to_string()),
            mana_cost: Some("{5}{G}{G}".to_string()),
            type_line: Some("Creature — Dinosaur".to_string()),
            oracle_text: Some("".to_string()),
            flavor_text: None,
            power: Some("9".to_string()),
            toughness: Some("9".to_string()),
            set: "xln".to_string(),
            set_name: "Ixalan".to_string(),
            collector_number: "175".to_string(),
            rarity: "common".to_string(),
            artist: Some("Jonas De Ro".to_string()),
            scryfall_uri: None,
            image_uris: None,
            card_faces: None,
        }
    }

    fn images(large: Option<&str>, normal: Option<&str>) -> ImageUris {
        ImageUris {
            small: None,
            normal: normal.map(str::to_string),
            large: large.map(str::to_string),
            png: None,
        }
    }

    #[test]
    fn test_best_image_uri_prefers_large() {
        let mut card = sample_card();
        card.image_uris = Some(images(Some("large.jpg"), Some("normal.jpg")));
        assert_eq!(best_image_uri(&card), Some("large.jpg"));
    }

    #[test]
    fn test_best_image_uri_falls_back_to_normal() {
        let mut card = sample_card();
        card.image_uris = Some(images(None, Some("normal.jpg")));
        assert_eq!(best_image_uri(&card), Some("normal.jpg"));
    }

    #[test]
    fn test_best_image_uri_uses_first_face() {
        let mut card = sample_card();
        card.image_uris = Some(ImageUris::default());
        card.card_faces = Some(vec![
            CardFace {
                name: "Front".to_string(),
                image_uris: Some(images(Some("face-large.jpg"), None)),
                ..CardFace::default()
            },
            CardFace {
                name: "Back".to_string(),
                image_uris: Some(images(Some("back-large.jpg"), None)),
                ..CardFace::default()
            },
        ]);
        assert_eq!(best_image_uri(&card), Some("face-large.jpg"));
    }

    #[test]
    fn test_best_image_uri_face_normal_when_no_large() {
        let mut card = sample_card();
        card.card_faces = Some(vec![CardFace {
            name: "Front".to_string(),
            image_uris: Some(images(None, Some("face-normal.jpg"))),
            ..CardFace::default()
        }]);
        assert_eq!(best_image_uri(&card), Some("face-normal.jpg"));
    }

    #[test]
    fn test_best_image_uri_none_available() {
        let card = sample_card();
        assert_eq!(best_image_uri(&card), None);
    }

    #[test]
    fn test_summarize_card() {
        let summary = summarize_card(&sample_card());
        assert_eq!(summary.name, "Ancient Brontodon");
        assert_eq!(summary.mana_cost.as_deref(), Some("{5}{G}{G}"));
        assert_eq!(summary.set, "xln");
        assert_eq!(summary.collector_number, "175");
    }

    #[test]
    fn test_build_search_output() {
        let cards = vec![sample_card(), sample_card()];
        let search = SearchMeta {
            query: "t:dinosaur".to_string(),
            next_page: Some("https://api.example.com/cards/search?page=2".to_string()),
            has_more: true,
        };
        let output = build_search_output(&cards, &search);
        assert_eq!(output.query, "t:dinosaur");
        assert_eq!(output.count, 2);
        assert!(output.has_more);
        assert_eq!(output.cards.len(), 2);
        assert_eq!(output.cards[0], summarize_card(&cards[0]));
    }

    #[test]
    fn test_build_card_output_resolves_image() {
        let mut card = sample_card();
        card.image_uris = Some(images(Some("large.jpg"), None));
        let output = build_card_output(&card, &[sample_card()]);
        assert_eq!(output.image.as_deref(), Some("large.jpg"));
        assert_eq!(output.printings.len(), 1);
    }

    #[test]
    fn test_card_deserialization_ignores_unknown_fields() {
        let json = r#"{
            "object": "card",
            "id": "f2b9983e-20d4-4d12-9e2c-ec6d9a345787",
            "oracle_id": "562d71b9-1646-474e-9293-55da6947a758",
            "name": "Ancient Brontodon",
            "released_at": "2017-09-29",
            "mana_cost": "{5}{G}{G}",
            "cmc": 7.0,
            "type_line": "Creature — Dinosaur",
            "oracle_text": "",
            "power": "9",
            "toughness": "9",
            "legalities": {"standard": "not_legal"},
            "set": "xln",
            "set_name": "Ixalan",
            "collector_number": "175",
            "rarity": "common",
            "image_uris": {"normal": "https://img.example/normal.jpg"}
        }"#;

        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.name, "Ancient Brontodon");
        assert_eq!(card.mana_cost.as_deref(), Some("{5}{G}{G}"));
        assert_eq!(best_image_uri(&card), Some("https://img.example/normal.jpg"));
    }

    #[test]
    fn test_card_list_deserialization_defaults() {
        let list: CardList = serde_json::from_str(r#"{"object": "list", "data": []}"#).unwrap();
        assert!(!list.has_more);
        assert!(list.next_page.is_none());
        assert!(list.data.is_empty());
    }

    #[test]
    fn test_api_error_deserialization() {
        let json = r#"{
            "object": "error",
            "code": "not_found",
            "status": 404,
            "details": "No card found with the given ID"
        }"#;
        let error: ApiError = serde_json::from_str(json).unwrap();
        assert_eq!(error.status, Some(404));
        assert_eq!(error.code.as_deref(), Some("not_found"));
        assert_eq!(error.details.as_deref(), Some("No card found with the given ID"));
    }

    #[test]
    fn test_catalog_deserialization() {
        let json = r#"{"object": "catalog", "data": ["Lightning Bolt", "Lightning Helix"]}"#;
        let catalog: Catalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.data.len(), 2);
    }
}
