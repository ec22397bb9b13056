//! Command-line interface for the itinera binary.

mod commands;
mod run;
mod show;

pub use commands::{Cli, Commands};
pub use run::{load_config, run_batch, RunSummary};
pub use show::{show_itinerary, show_segments};
