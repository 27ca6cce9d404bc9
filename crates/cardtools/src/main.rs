#![allow(unused)]

use crate::prelude::*;
use clap::Parser;

mod api;
mod card;
mod error;
mod prelude;
mod render;
mod store;
mod symbols;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Search cards, inspect printings and render mana symbols from the command line"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Card API base URL
    #[clap(
        long,
        env = "CARDTOOLS_API_BASE",
        global = true,
        default_value = crate::api::DEFAULT_BASE_URL
    )]
    base_url: String,

    /// Request timeout in seconds
    #[clap(long, env = "CARDTOOLS_TIMEOUT", global = true, default_value = "15")]
    timeout: u64,

    /// Log API requests and responses to stderr.
    #[clap(long, env = "CARDTOOLS_DEBUG", global = true, default_value = "false")]
    debug: bool,

    /// Whether to display additional information.
    #[clap(long, env = "CARDTOOLS_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Card search, detail and autocomplete operations
    Card(crate::card::App),

    /// Mana-symbol catalog operations
    Symbols(crate::symbols::App),

    /// Render card text with {G}-style tokens to HTML
    Render(crate::render::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Card(sub_app) => crate::card::run(sub_app, app.global).await,
        SubCommands::Symbols(sub_app) => crate::symbols::run(sub_app, app.global).await,
        SubCommands::Render(sub_app) => crate::render::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
