use crate::prelude::{println, *};

use cardtools_core::card::{build_card_output, CardOutput};

use crate::store::{CardLookup, CardStore};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ShowOptions {
    /// Card id, API card URL or fuzzy card name
    #[clap(env = "CARDTOOLS_CARD")]
    pub card: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: ShowOptions, global: crate::Global) -> Result<()> {
    let lookup = super::parse_lookup(&options.card);

    if global.verbose {
        match &lookup {
            CardLookup::Id(id) => println!("Looking up card by id {id}..."),
            CardLookup::Named(name) => println!("Looking up card named {name:?}..."),
        }
    }

    let client = crate::api::create_client(&global)?;
    let mut store = CardStore::new(client);
    let card = store.fetch_card(lookup).await?;

    if global.verbose {
        if let Some(image) = store.state.current_card_image() {
            println!("Card image: {image}");
        }
        println!();
    }

    if options.json {
        let output = build_card_output(&card, &store.state.printings);
        println!("{}", format_card_json(&output)?);
    } else {
        super::display_card(&card, &store.state.printings);
    }

    Ok(())
}

/// Convert card output to JSON string
fn format_card_json(output: &CardOutput) -> Result<String> {
    serde_json::to_string_pretty(output).map_err(|e| eyre!("JSON serialization failed: {}", e))
}
