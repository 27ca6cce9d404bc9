use crate::prelude::{println, *};
use colored::Colorize;

use crate::store::CardStore;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct AutocompleteOptions {
    /// Partial card name, two characters minimum
    pub query: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: AutocompleteOptions, global: crate::Global) -> Result<()> {
    let client = crate::api::create_client(&global)?;
    let mut store = CardStore::new(client);

    store.fetch_autocomplete(&options.query).await;

    if options.json {
        let json = format_autocomplete_json(&options.query, &store.state.autocomplete)?;
        println!("{}", json);
    } else {
        let formatted = format_autocomplete_text(&options.query, &store.state.autocomplete);
        print!("{}", formatted);
    }

    Ok(())
}

#[derive(Debug, serde::Serialize)]
struct AutocompleteOutput<'a> {
    query: &'a str,
    suggestions: &'a [String],
}

fn format_autocomplete_json(query: &str, suggestions: &[String]) -> Result<String> {
    let output = AutocompleteOutput { query, suggestions };
    serde_json::to_string_pretty(&output).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

fn format_autocomplete_text(query: &str, suggestions: &[String]) -> String {
    let mut result = String::new();

    if query.chars().count() < 2 {
        result.push_str(&format!(
            "{}\n",
            "Type at least two characters to get suggestions.".yellow()
        ));
        return result;
    }

    if suggestions.is_empty() {
        result.push_str(&format!(
            "{}\n",
            format!("No card names match {query:?}.").yellow()
        ));
        return result;
    }

    result.push_str(&format!(
        "{}\n",
        format!("Card names matching {query:?}:").bold()
    ));
    for (idx, name) in suggestions.iter().enumerate() {
        result.push_str(&format!(
            "  {} {}\n",
            format!("{}.", idx + 1).yellow(),
            name.white()
        ));
    }

    result.push_str(&format!("\n{}:\n", "To show a card".bright_white().bold()));
    result.push_str(&format!(
        "  {}\n",
        format!("cardtools card show {:?}", suggestions[0]).cyan()
    ));

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_autocomplete_json() {
        let suggestions = vec!["Lightning Bolt".to_string(), "Lightning Helix".to_string()];

        let json = format_autocomplete_json("light", &suggestions).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["query"], "light");
        assert_eq!(parsed["suggestions"].as_array().unwrap().len(), 2);
        assert_eq!(parsed["suggestions"][0], "Lightning Bolt");
    }

    #[test]
    fn test_format_autocomplete_text_lists_names() {
        let suggestions = vec!["Lightning Bolt".to_string(), "Lightning Helix".to_string()];

        let formatted = format_autocomplete_text("light", &suggestions);

        assert!(formatted.contains("1."));
        assert!(formatted.contains("Lightning Bolt"));
        assert!(formatted.contains("2."));
        assert!(formatted.contains("Lightning Helix"));
        assert!(formatted.contains("cardtools card show \"Lightning Bolt\""));
    }

    #[test]
    fn test_format_autocomplete_text_empty() {
        let formatted = format_autocomplete_text("zzzzzz", &[]);

        assert!(formatted.contains("No card names match"));
    }

    #[test]
    fn test_format_autocomplete_text_short_query() {
        let formatted = format_autocomplete_text("l", &[]);

        assert!(formatted.contains("at least two characters"));
    }
}
