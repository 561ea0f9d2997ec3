use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use geomap_places::config::{default_config_path, load_config_from_path};
use geomap_places::{Envelope, FixedCenter, GeoMapPlacesService, LatLng, MapContext, MapView, PlacesService};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Parser)]
#[command(name = "geomap", version, about = "Search places around a map center")]
struct Cli {
    /// Path to places.json (defaults to $GEOMAP_CONFIG_PATH or the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the configured provider (google, here)
    #[arg(long, global = true)]
    provider: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Free-text search biased around a map center
    Search {
        needle: String,
        /// Map center as LAT,LNG
        #[arg(long, value_parser = parse_center, allow_hyphen_values = true)]
        center: LatLng,
    },
    /// Details for a place id returned by `search`
    Get { place_id: String },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    let path = cli.config.clone().unwrap_or_else(default_config_path);
    debug!(path = %path.display(), "loading places configuration");
    let mut config = load_config_from_path(&path).with_context(|| format!("failed to load {}", path.display()))?;
    if let Some(provider) = cli.provider {
        config.provider = provider;
    }

    match cli.command {
        Command::Search { needle, center } => {
            let service = GeoMapPlacesService::from_config(&config, Arc::new(FixedCenter(center)))?;
            emit(Envelope::from_result(service.search(&needle).await))
        }
        Command::Get { place_id } => {
            // Lookups by id never read the map; a detached view fails loudly if one does.
            let (_, view) = MapView::new(None);
            let map: Arc<dyn MapContext> = Arc::new(view);
            let service = GeoMapPlacesService::from_config(&config, map)?;
            emit(Envelope::from_result(service.get(&place_id).await))
        }
    }
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn emit<T: Serialize>(envelope: Envelope<T>) -> Result<ExitCode> {
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(if envelope.is_success() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn parse_center(value: &str) -> Result<LatLng> {
    let (lat, lng) = value.split_once(',').context("expected LAT,LNG")?;
    let center = LatLng::new(
        lat.trim().parse().context("latitude is not a number")?,
        lng.trim().parse().context("longitude is not a number")?,
    );
    if !center.is_valid() {
        bail!("{},{} is outside valid coordinate ranges", center.latitude, center.longitude);
    }
    Ok(center)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_negative_centers() {
        let cli = Cli::try_parse_from(["geomap", "search", "pizza", "--center", "-33.86,151.2"]).unwrap();
        match cli.command {
            Command::Search { needle, center } => {
                assert_eq!(needle, "pizza");
                assert_eq!(center, LatLng::new(-33.86, 151.2));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn rejects_malformed_centers() {
        assert!(parse_center("53.5").is_err());
        assert!(parse_center("north,east").is_err());
        assert!(parse_center("95,10").is_err());
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let cli = Cli::try_parse_from(["geomap", "get", "abc", "--provider", "here"]).unwrap();
        assert_eq!(cli.provider.as_deref(), Some("here"));
    }
}
