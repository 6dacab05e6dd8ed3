//! One-shot `search` command.

use anyhow::Context;
use clap::Args;
use placescout_core::{find_preset, AppConfig, Region, SearchStatus, Session, ALL_REGIONS};
use placescout_gemini::GeminiClient;

use crate::render;
use crate::LocationArgs;

#[derive(Debug, Args)]
pub(crate) struct SearchArgs {
    /// What to look for, e.g. "khao soi" or "24h pharmacy"
    #[arg(required_unless_present = "preset", conflicts_with = "preset")]
    pub(crate) topic: Option<String>,
    /// Use a quick-search preset instead of a topic (see `presets`)
    #[arg(long)]
    pub(crate) preset: Option<String>,
    /// Region to scope the search to (`all` for no restriction)
    #[arg(long, default_value = ALL_REGIONS)]
    pub(crate) region: String,
    #[command(flatten)]
    pub(crate) location: LocationArgs,
    /// Keep only places whose name, address or reviews contain this text
    #[arg(long)]
    pub(crate) filter: Option<String>,
    /// Page to show (clamped into range)
    #[arg(long, default_value_t = 1)]
    pub(crate) page: usize,
    /// Print the page as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

impl SearchArgs {
    /// The topic text, either typed or taken from a preset.
    pub(crate) fn resolve_topic(&self) -> anyhow::Result<String> {
        if let Some(key) = &self.preset {
            let Some(preset) = find_preset(key) else {
                anyhow::bail!("unknown preset '{key}'");
            };
            return Ok(preset.topic.to_owned());
        }
        self.topic
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_owned)
            .context("a search topic is required")
    }
}

/// Runs a single search and prints the requested page.
///
/// # Errors
///
/// Returns an error if the client cannot be built, the topic is missing, or
/// the search ends in the error state.
pub(crate) async fn run_search(config: &AppConfig, args: SearchArgs) -> anyhow::Result<()> {
    let client = GeminiClient::from_app_config(config)?;
    let mut session = Session::from_config(config);

    session.begin_location();
    session.settle_location(args.location.coordinates());

    let topic = args.resolve_topic()?;
    let region = Region::parse(&args.region);

    let ticket = session
        .new_search_in(&topic, region)
        .context("a search topic is required")?;

    session.run(&client, &ticket).await;

    if let Some(filter) = &args.filter {
        session.set_filter(filter);
    }
    session.set_page(args.page);

    let view = session.view();
    if args.json {
        println!("{}", render::render_json(&view)?);
    } else {
        print!("{}", render::render_view(&view));
    }

    if session.status() == SearchStatus::Error {
        anyhow::bail!("search failed");
    }
    Ok(())
}
