use crate::prelude::{println, *};
use colored::Colorize;
use regex::Regex;

use cardtools_core::card::{best_image_uri, Card};

use crate::store::CardLookup;

pub mod autocomplete;
pub mod search;
pub mod show;

#[derive(Debug, clap::Parser)]
#[command(name = "card")]
#[command(about = "Card search, detail and autocomplete operations")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Search cards with the full-text query syntax
    #[clap(name = "search")]
    Search(search::SearchOptions),

    /// Show one card by id, API URL or fuzzy name
    #[clap(name = "show")]
    Show(show::ShowOptions),

    /// Suggest card names for a partial query
    #[clap(name = "autocomplete")]
    Autocomplete(autocomplete::AutocompleteOptions),
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Card API Base: {}", global.base_url);
        println!();
    }

    match app.command {
        Commands::Search(options) => search::run(options, global).await,
        Commands::Show(options) => show::run(options, global).await,
        Commands::Autocomplete(options) => autocomplete::run(options, global).await,
    }
}

/// Decide how to look up `input`: a UUID is a card id, an API card URL
/// carries the id in its path, anything else is treated as a fuzzy name.
pub fn parse_lookup(input: &str) -> CardLookup {
    let re = Regex::new(
        r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$",
    )
    .unwrap();
    if re.is_match(input) {
        return CardLookup::Id(input.to_lowercase());
    }

    if let Some(id) = extract_card_id(input) {
        return CardLookup::Id(id);
    }

    CardLookup::Named(input.to_string())
}

/// Pull a card id out of an API card URL such as
/// `https://api.scryfall.com/cards/<id>`.
fn extract_card_id(input: &str) -> Option<String> {
    let re = Regex::new(
        r"(?i)/cards/([0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12})",
    )
    .unwrap();
    re.captures(input)
        .and_then(|caps| caps.get(1))
        .map(|id| id.as_str().to_lowercase())
}

/// Print the standard card detail view: name line, metadata table, rules
/// text and, when present, the printings table.
pub fn display_card(card: &Card, printings: &[Card]) {
    println!();
    println!(
        "{} {}",
        card.name.bold().cyan(),
        card.mana_cost.as_deref().unwrap_or("").bright_white()
    );
    println!();

    let mut table = new_table();
    if let Some(type_line) = &card.type_line {
        table.add_row(prettytable::row!["Type".bold().green(), type_line]);
    }
    table.add_row(prettytable::row![
        "Set".bold().green(),
        format!("{} ({})", card.set_name, card.set.to_uppercase())
    ]);
    table.add_row(prettytable::row![
        "Number".bold().green(),
        card.collector_number
    ]);
    table.add_row(prettytable::row![
        "Rarity".bold().green(),
        rarity_colored(&card.rarity)
    ]);
    if let (Some(power), Some(toughness)) = (&card.power, &card.toughness) {
        table.add_row(prettytable::row![
            "P/T".bold().green(),
            format!("{power}/{toughness}")
        ]);
    }
    if let Some(released_at) = &card.released_at {
        table.add_row(prettytable::row!["Released".bold().green(), released_at]);
    }
    if let Some(artist) = &card.artist {
        table.add_row(prettytable::row!["Artist".bold().green(), artist]);
    }
    if let Some(image) = best_image_uri(card) {
        table.add_row(prettytable::row![
            "Image".bold().green(),
            image.cyan().underline()
        ]);
    }
    if let Some(uri) = &card.scryfall_uri {
        table.add_row(prettytable::row![
            "Page".bold().green(),
            uri.cyan().underline()
        ]);
    }
    table.printstd();

    if let Some(oracle_text) = &card.oracle_text {
        if !oracle_text.is_empty() {
            println!();
            println!("{}", oracle_text);
        }
    }

    if let Some(faces) = &card.card_faces {
        for face in faces {
            println!();
            println!(
                "{} {}",
                face.name.bold(),
                face.mana_cost.as_deref().unwrap_or("")
            );
            if let Some(type_line) = &face.type_line {
                println!("{}", type_line.bright_black());
            }
            if let Some(text) = &face.oracle_text {
                if !text.is_empty() {
                    println!("{}", text);
                }
            }
        }
    }

    if let Some(flavor_text) = &card.flavor_text {
        println!();
        println!("{}", flavor_text.italic().bright_black());
    }

    if !printings.is_empty() {
        println!();
        println!(
            "{}",
            format!("PRINTINGS ({})", printings.len()).bold().yellow()
        );
        let mut table = new_table();
        table.add_row(prettytable::row![
            "Set".bold().green(),
            "Number".bold().green(),
            "Rarity".bold().green(),
            "Released".bold().green(),
            "Id".bold().green()
        ]);
        for printing in printings {
            table.add_row(prettytable::row![
                format!("{} ({})", printing.set_name, printing.set.to_uppercase()),
                printing.collector_number,
                printing.rarity,
                printing.released_at.as_deref().unwrap_or("-"),
                printing.id
            ]);
        }
        table.printstd();
    }
    println!();
}

fn rarity_colored(rarity: &str) -> colored::ColoredString {
    match rarity {
        "common" => rarity.white(),
        "uncommon" => rarity.bright_cyan(),
        "rare" => rarity.yellow(),
        "mythic" => rarity.bright_red(),
        _ => rarity.magenta(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lookup_uuid_is_id() {
        let lookup = parse_lookup("f2b9983e-20d4-4d12-9e2c-ec6d9a345787");
        assert!(matches!(
            lookup,
            CardLookup::Id(id) if id == "f2b9983e-20d4-4d12-9e2c-ec6d9a345787"
        ));
    }

    #[test]
    fn test_parse_lookup_uppercase_uuid_is_normalized() {
        let lookup = parse_lookup("F2B9983E-20D4-4D12-9E2C-EC6D9A345787");
        assert!(matches!(
            lookup,
            CardLookup::Id(id) if id == "f2b9983e-20d4-4d12-9e2c-ec6d9a345787"
        ));
    }

    #[test]
    fn test_parse_lookup_api_url_carries_id() {
        let lookup = parse_lookup(
            "https://api.scryfall.com/cards/f2b9983e-20d4-4d12-9e2c-ec6d9a345787",
        );
        assert!(matches!(
            lookup,
            CardLookup::Id(id) if id == "f2b9983e-20d4-4d12-9e2c-ec6d9a345787"
        ));
    }

    #[test]
    fn test_parse_lookup_name_is_fuzzy() {
        let lookup = parse_lookup("Lightning Bolt");
        assert!(matches!(
            lookup,
            CardLookup::Named(name) if name == "Lightning Bolt"
        ));
    }

    #[test]
    fn test_parse_lookup_non_card_url_is_fuzzy() {
        // Site URLs without an id in the path fall back to a name lookup.
        let lookup = parse_lookup("https://scryfall.com/sets/xln");
        assert!(matches!(lookup, CardLookup::Named(_)));
    }

    #[test]
    fn test_rarity_colored_keeps_text() {
        for rarity in ["common", "uncommon", "rare", "mythic", "special"] {
            assert!(rarity_colored(rarity).to_string().contains(rarity));
        }
    }
}
