mod interactive;
mod render;
mod search;

use clap::{Args, Parser, Subcommand};
use placescout_core::Coordinates;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "placescout")]
#[command(about = "Find real places near you with Gemini Maps grounding")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run one search and print a page of results
    Search(search::SearchArgs),
    /// List the quick-search presets
    Presets,
    /// Line-driven session: type a topic, or /help for commands
    Interactive {
        #[command(flatten)]
        location: LocationArgs,
    },
}

/// Coordinates supplied on the command line stand in for device geolocation.
#[derive(Debug, Clone, Default, Args)]
pub(crate) struct LocationArgs {
    /// Latitude of the user's position
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    lat: Option<f64>,
    /// Longitude of the user's position
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lon: Option<f64>,
}

impl LocationArgs {
    pub(crate) fn coordinates(&self) -> Option<Coordinates> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon))
                if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon) =>
            {
                Some(Coordinates::new(lat, lon))
            }
            _ => None,
        }
    }
}

fn init_tracing(log_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Presets => {
            print!("{}", render::render_presets());
            Ok(())
        }
        Commands::Search(args) => {
            let config = placescout_core::load_app_config()?;
            init_tracing(&config.log_level)?;
            tracing::debug!(?config, "configuration loaded");
            search::run_search(&config, args).await
        }
        Commands::Interactive { location } => {
            let config = placescout_core::load_app_config()?;
            init_tracing(&config.log_level)?;
            tracing::debug!(?config, "configuration loaded");
            interactive::run_interactive(&config, &location).await
        }
    }
}
