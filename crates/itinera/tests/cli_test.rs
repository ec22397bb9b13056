//! Tests for CLI parsing and cache inspection commands.

use clap::Parser;
use itinera::cli::{load_config, show_itinerary, show_segments, Cli, Commands};
use itinera::{
    Coordinates, Event, Itinerary, ItineraConfig, ItineraryStore, Move, Resolution,
    ResolutionSource, Stay,
};
use std::path::Path;

fn config_with_cache(cache_dir: &Path) -> anyhow::Result<ItineraConfig> {
    let mut config = ItineraConfig::bundled()?;
    config.engine.cache_dir = cache_dir.to_path_buf();
    Ok(config)
}

fn stay_at(position: usize, place: &str, latitude: f64, longitude: f64) -> Event {
    let mut stay = Stay::new(position, place);
    stay.resolve(Resolution {
        coordinates: Coordinates::new(latitude, longitude),
        source: ResolutionSource::Secondary,
    });
    Event::from(stay)
}

fn kusatsu() -> Itinerary {
    Itinerary::new(
        "1234",
        vec![
            stay_at(0, "草津温泉", 36.6222, 138.5964),
            Event::from(Move::new(1, "徒歩")),
            stay_at(2, "湯畑", 36.6214, 138.5968),
        ],
        "blue",
        "群馬県",
    )
}

#[test]
fn test_run_command_parses() {
    let cli = Cli::try_parse_from([
        "itinera", "-v", "run", "--ids", "ids.txt", "--output-dir", "out",
    ])
    .unwrap();

    assert!(cli.verbose);
    match cli.command {
        Commands::Run { ids, output_dir } => {
            assert_eq!(ids, Path::new("ids.txt"));
            assert_eq!(output_dir.as_deref(), Some(Path::new("out")));
        }
        other => panic!("unexpected command {:?}", other),
    }
}

#[test]
fn test_segments_command_parses_max_km() {
    let cli = Cli::try_parse_from(["itinera", "segments", "1234", "--max-km", "25"]).unwrap();

    match cli.command {
        Commands::Segments {
            document_id,
            max_km,
        } => {
            assert_eq!(document_id, "1234");
            assert_eq!(max_km, Some(25.0));
        }
        other => panic!("unexpected command {:?}", other),
    }
}

#[test]
fn test_run_requires_ids() {
    assert!(Cli::try_parse_from(["itinera", "run"]).is_err());
}

#[test]
fn test_missing_config_file_is_an_error() {
    assert!(load_config(Some(Path::new("/nonexistent/itinera.toml"))).is_err());
}

#[test]
fn test_show_prints_cached_record() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let config = config_with_cache(dir.path())?;
    let cache = itinera::open_cache(&config)?;
    cache.store(&kusatsu())?;

    let text = show_itinerary(&config, "1234")?.expect("cached");
    let parsed: Itinerary = serde_json::from_str(&text)?;

    assert_eq!(parsed, kusatsu());
    assert!(show_itinerary(&config, "9999")?.is_none());
    Ok(())
}

#[test]
fn test_segments_respect_max_km_override() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let config = config_with_cache(dir.path())?;
    itinera::open_cache(&config)?.store(&kusatsu())?;

    let lines = show_segments(&config, "1234", None)?.expect("cached");
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("徒歩"));

    let none = show_segments(&config, "1234", Some(0.01))?.expect("cached");
    assert!(none.is_empty());
    Ok(())
}
