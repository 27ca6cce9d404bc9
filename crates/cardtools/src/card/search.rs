use crate::prelude::{println, *};
use colored::Colorize;

use cardtools_core::card::{build_search_output, CardSummary, SearchOutput};

use crate::store::CardStore;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct SearchOptions {
    /// Full-text search query, e.g. "t:goblin cmc<3"
    #[clap(env = "CARDTOOLS_QUERY")]
    pub query: String,

    /// Number of result pages to fetch, following next-page links
    #[arg(short, long, default_value = "1")]
    pub pages: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: SearchOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Searching cards matching {:?}...", options.query);
    }

    let client = crate::api::create_client(&global)?;
    let mut store = CardStore::new(client);

    store.fetch_cards(&options.query).await?;
    // A blank query records an error without failing the fetch.
    if let Some(error) = store.state.error.clone() {
        return Err(eyre!(error));
    }

    let mut fetched = 1;
    while fetched < options.pages && store.state.search.next_page.is_some() {
        store.fetch_next_page().await?;
        fetched += 1;
    }

    let output = build_search_output(&store.state.cards, &store.state.search);

    if options.json {
        output_json(&output)?;
    } else {
        output_formatted(&output, &options)?;
    }

    Ok(())
}

/// Convert search output to JSON string
fn format_search_json(output: &SearchOutput) -> Result<String> {
    serde_json::to_string_pretty(output).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

/// Convert search output to formatted text with colors
fn format_search_text(output: &SearchOutput, options: &SearchOptions) -> String {
    let mut result = String::new();

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&format!(
        "{}\n",
        format!("CARD SEARCH: {} ({} shown)", output.query, output.count)
            .bright_cyan()
            .bold()
    ));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_cyan()));

    if output.cards.is_empty() {
        result.push_str(&format!("\n{}\n", "No cards matched this query.".yellow()));
    } else {
        for (idx, card) in output.cards.iter().enumerate() {
            result.push_str(&format!(
                "\n{} {} {}\n",
                format!("[{}]", idx + 1).yellow().bold(),
                card.name.white().bold(),
                card.mana_cost.as_deref().unwrap_or("").bright_white()
            ));

            result.push_str(&format!(
                "    {} | {} #{} | {}\n",
                card.type_line.as_deref().unwrap_or("(no type)").bright_white(),
                format!("{} ({})", card.set_name, card.set.to_uppercase()).bright_black(),
                card.collector_number.bright_black(),
                card.rarity.bright_magenta()
            ));

            result.push_str(&format!(
                "    {}: {} | {}: {}\n",
                "ID".green(),
                card.id.bright_white(),
                "Show".green(),
                format!("cardtools card show {}", card.id).cyan()
            ));
        }
    }

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_yellow()));
    result.push_str(&format!("{}\n", "NAVIGATION".bright_yellow().bold()));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_yellow()));

    result.push_str(&format!(
        "\n{} {} {} {}{}\n",
        "Showing".bright_white(),
        output.count.to_string().bright_cyan().bold(),
        "cards for".bright_white(),
        format!("{:?}", output.query).bright_cyan().bold(),
        if output.has_more {
            " (more available)".yellow().to_string()
        } else {
            String::new()
        }
    ));

    if output.has_more {
        result.push_str(&format!("\n{}:\n", "To fetch more pages".bright_white().bold()));
        result.push_str(&format!(
            "  {}\n",
            format!(
                "cardtools card search {:?} --pages {}",
                output.query,
                options.pages + 1
            )
            .cyan()
        ));
    }

    result.push_str(&format!("\n{}:\n", "To show a card".bright_white().bold()));
    result.push_str(&format!("  {}\n", "cardtools card show <id or name>".cyan()));
    if let Some(first) = output.cards.first() {
        result.push_str(&format!(
            "  {}: {}\n",
            "Example".green(),
            format!("cardtools card show {}", first.id).cyan()
        ));
    }

    result.push_str(&format!("\n{}:\n", "To get name suggestions".bright_white().bold()));
    result.push_str(&format!(
        "  {}\n",
        "cardtools card autocomplete <partial name>".cyan()
    ));

    result.push_str(&format!("\n{}:\n", "To get JSON output".bright_white().bold()));
    result.push_str(&format!(
        "  {}\n",
        format!("cardtools card search {:?} --json", output.query).cyan()
    ));

    result.push('\n');
    result
}

fn output_json(output: &SearchOutput) -> Result<()> {
    let json = format_search_json(output)?;
    println!("{}", json);
    Ok(())
}

fn output_formatted(output: &SearchOutput, options: &SearchOptions) -> Result<()> {
    let formatted = format_search_text(output, options);
    print!("{}", formatted);
    Ok(())
}
