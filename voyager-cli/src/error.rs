//! Error types emitted by the Voyager CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
use voyager_core::{ParseClockTimeError, PlanConfigError, PlanError};
use voyager_data::OrsBuildError;

/// Errors emitted by the Voyager CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (pass it on the command line or set {env})")]
    MissingArgument {
        /// Option name.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// The `--day-start` value is not a clock time.
    #[error("invalid --{field}: {source}")]
    InvalidClockTime {
        /// Option name.
        field: &'static str,
        /// Parse failure.
        #[source]
        source: ParseClockTimeError,
    },
    /// The merged planning configuration is inconsistent.
    #[error("invalid planning configuration: {0}")]
    InvalidPlanConfig(#[from] PlanConfigError),
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Option name.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Option name.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Option name.
        field: &'static str,
        /// Path that was checked.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Opening the plan request file failed.
    #[error("failed to open plan request at {path:?}: {source}")]
    OpenPlanRequest {
        /// Request path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Plan request JSON could not be decoded.
    #[error("failed to parse plan request JSON at {path:?}: {source}")]
    ParsePlanRequest {
        /// Request path.
        path: Utf8PathBuf,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// Constructing an OpenRouteService adapter failed.
    #[error("failed to build OpenRouteService client for {base_url:?}: {source}")]
    BuildOrsClient {
        /// Configured service root.
        base_url: String,
        /// Construction failure.
        #[source]
        source: OrsBuildError,
    },
    /// The planner rejected the request.
    #[error("planning failed: {source}")]
    Plan {
        /// Planner error.
        #[source]
        source: PlanError,
    },
    /// Serializing the itinerary failed.
    #[error("failed to serialize itinerary: {0}")]
    SerializeItinerary(#[source] serde_json::Error),
    /// Writing the itinerary to the output file failed.
    #[error("failed to write itinerary to {path:?}: {source}")]
    WriteOutputFile {
        /// Output path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Writing the itinerary to stdout failed.
    #[error("failed to write itinerary: {0}")]
    WritePlanOutput(#[source] std::io::Error),
}
