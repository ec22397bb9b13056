//! Itinera CLI binary.
//!
//! - Resolve a batch of travel documents into a renderer payload
//! - Inspect cached itineraries and their segments

use clap::Parser;
use itinera::cli::{load_config, run_batch, show_itinerary, show_segments, Cli, Commands};
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    itinera::init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Run { ids, output_dir } => {
            let summary = run_batch(&config, &ids, output_dir.as_deref()).await?;
            if let Some(path) = &summary.payload {
                println!("{}", path.display());
            }
            if !summary.completed {
                return Ok(ExitCode::FAILURE);
            }
        }

        Commands::Show { document_id } => match show_itinerary(&config, &document_id)? {
            Some(text) => println!("{}", text),
            None => {
                eprintln!("No cached itinerary for {}", document_id);
                return Ok(ExitCode::FAILURE);
            }
        },

        Commands::Segments {
            document_id,
            max_km,
        } => match show_segments(&config, &document_id, max_km)? {
            Some(lines) => {
                for line in lines {
                    println!("{}", line);
                }
            }
            None => {
                eprintln!("No cached itinerary for {}", document_id);
                return Ok(ExitCode::FAILURE);
            }
        },
    }

    Ok(ExitCode::SUCCESS)
}
