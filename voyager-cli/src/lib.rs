//! Command-line interface for the Voyager itinerary engine.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod fs;
mod plan;

pub use error::CliError;

use plan::{PlanArgs, run_plan};

const ARG_PLAN_REQUEST: &str = "request";
const ARG_PLAN_OUTPUT: &str = "output";
const ARG_PLAN_ATTRACTIONS_PER_DAY: &str = "attractions-per-day";
const ARG_PLAN_DAY_START: &str = "day-start";
const ARG_PLAN_BUFFER_MINUTES: &str = "buffer-minutes";
const ARG_PLAN_RESTAURANT_RADIUS: &str = "restaurant-radius-km";
const ARG_PLAN_SANITY_RADIUS: &str = "sanity-radius-km";
const ARG_PLAN_FALLBACK_SPEED: &str = "fallback-speed-kmh";
const ARG_PLAN_ALLOW_EMPTY_DAYS: &str = "allow-empty-days";
const ARG_PLAN_ORS_API_KEY: &str = "ors-api-key";
const ARG_PLAN_ORS_BASE_URL: &str = "ors-base-url";
const ARG_PLAN_ORS_PROFILE: &str = "ors-profile";
const ARG_PLAN_GEOCODE: &str = "geocode";
const ENV_PLAN_REQUEST: &str = "VOYAGER_CMDS_PLAN_REQUEST_PATH";
/// Conventional OpenRouteService key variable, read when no key is configured.
const ENV_ORS_API_KEY: &str = "ORS_API_KEY";

/// Run the Voyager CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when argument parsing, configuration, planning or
/// output fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => run_plan(*args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "voyager",
    about = "Build day-by-day travel itineraries from candidate places",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plan an itinerary from a JSON request.
    Plan(Box<PlanArgs>),
}

#[cfg(test)]
mod tests;
