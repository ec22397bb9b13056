//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Itinera - resolve travel narratives into map-ready itineraries
#[derive(Parser, Debug)]
#[command(name = "itinera")]
#[command(about = "Resolve travel narratives into geocoded itineraries", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to the layered search)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a batch of documents and write the renderer payload
    Run {
        /// File holding comma-separated document ids
        #[arg(long)]
        ids: PathBuf,

        /// Directory for the renderer payload
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Print a cached itinerary as JSON
    Show {
        /// Document identifier
        document_id: String,
    },

    /// Print the segments of a cached itinerary
    Segments {
        /// Document identifier
        document_id: String,

        /// Longest plausible segment in kilometres
        #[arg(long)]
        max_km: Option<f64>,
    },
}
