//! Plan command implementation for the Voyager CLI.

use std::io::{BufReader, Write};

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use geo::Coord;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use voyager_core::{
    ClockTime, DistanceOracle, Geocoder, Itinerary, PlanConfig, PlanRequest, Planner,
    StraightLineOracle,
};
use voyager_data::{
    DEFAULT_BASE_URL, DEFAULT_PROFILE, OrsConfig, OrsDistanceOracle, OrsGeocoder,
    resolve_request,
};
use voyager_planner::GreedyPlanner;

use crate::fs::{file_is_file, open_utf8_file, write_utf8_file};
use crate::{
    ARG_PLAN_ALLOW_EMPTY_DAYS, ARG_PLAN_ATTRACTIONS_PER_DAY, ARG_PLAN_BUFFER_MINUTES,
    ARG_PLAN_DAY_START, ARG_PLAN_FALLBACK_SPEED, ARG_PLAN_GEOCODE, ARG_PLAN_ORS_API_KEY,
    ARG_PLAN_ORS_BASE_URL, ARG_PLAN_ORS_PROFILE, ARG_PLAN_OUTPUT, ARG_PLAN_REQUEST,
    ARG_PLAN_RESTAURANT_RADIUS, ARG_PLAN_SANITY_RADIUS, CliError, ENV_ORS_API_KEY,
    ENV_PLAN_REQUEST,
};

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Plan a day-by-day itinerary from a JSON-encoded plan request \
                 holding the trip, accommodation, attraction and restaurant \
                 candidates. Travel estimates come from OpenRouteService when \
                 an API key is configured and from straight-line distances \
                 otherwise.",
    about = "Plan a multi-day itinerary"
)]
#[ortho_config(prefix = "VOYAGER")]
pub(crate) struct PlanArgs {
    /// Path to a JSON file containing a plan request.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Write the itinerary to this file instead of stdout.
    #[arg(long = ARG_PLAN_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
    /// Attractions per day, overriding the request.
    #[arg(long = ARG_PLAN_ATTRACTIONS_PER_DAY, value_name = "count")]
    #[serde(default)]
    pub(crate) attractions_per_day: Option<usize>,
    /// Start of each day as `HH:MM`.
    #[arg(long = ARG_PLAN_DAY_START, value_name = "time")]
    #[serde(default)]
    pub(crate) day_start: Option<String>,
    /// Minutes kept free between consecutive stops.
    #[arg(long = ARG_PLAN_BUFFER_MINUTES, value_name = "minutes")]
    #[serde(default)]
    pub(crate) buffer_minutes: Option<u32>,
    /// Maximum restaurant distance from the accommodation.
    #[arg(long = ARG_PLAN_RESTAURANT_RADIUS, value_name = "km")]
    #[serde(default)]
    pub(crate) restaurant_radius_km: Option<f64>,
    /// Attractions further than this from the accommodation are rejected.
    #[arg(long = ARG_PLAN_SANITY_RADIUS, value_name = "km")]
    #[serde(default)]
    pub(crate) sanity_radius_km: Option<f64>,
    /// Speed used for straight-line travel estimates.
    #[arg(long = ARG_PLAN_FALLBACK_SPEED, value_name = "km/h")]
    #[serde(default)]
    pub(crate) fallback_speed_kmh: Option<f64>,
    /// Plan days without attractions instead of failing.
    #[arg(
        long = ARG_PLAN_ALLOW_EMPTY_DAYS,
        value_name = "bool",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    #[serde(default)]
    pub(crate) allow_empty_days: Option<bool>,
    /// OpenRouteService API key; falls back to `ORS_API_KEY`.
    #[arg(long = ARG_PLAN_ORS_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) ors_api_key: Option<String>,
    /// OpenRouteService base URL.
    #[arg(long = ARG_PLAN_ORS_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) ors_base_url: Option<String>,
    /// OpenRouteService routing profile, e.g. `foot-walking`.
    #[arg(long = ARG_PLAN_ORS_PROFILE, value_name = "profile")]
    #[serde(default)]
    pub(crate) ors_profile: Option<String>,
    /// Geocode candidates without coordinates (requires an API key).
    #[arg(
        long = ARG_PLAN_GEOCODE,
        value_name = "bool",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    #[serde(default)]
    pub(crate) geocode: Option<bool>,
}

impl PlanArgs {
    pub(crate) fn into_settings(self) -> Result<PlanSettings, CliError> {
        let mut merged = self.load_and_merge().map_err(CliError::Configuration)?;
        if merged.ors_api_key.is_none() {
            merged.ors_api_key = std::env::var(ENV_ORS_API_KEY).ok();
        }
        PlanSettings::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlanSettings {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Output file; stdout when absent.
    pub(crate) output: Option<Utf8PathBuf>,
    /// Attractions-per-day override.
    pub(crate) attractions_per_day: Option<usize>,
    /// Engine configuration.
    pub(crate) config: PlanConfig,
    /// OpenRouteService connection, present when a key is configured.
    pub(crate) ors: Option<OrsConfig>,
    /// Whether unresolved candidates are geocoded.
    pub(crate) geocode: bool,
}

impl PlanSettings {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.request_path, ARG_PLAN_REQUEST)
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<PlanArgs> for PlanSettings {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_REQUEST,
            env: ENV_PLAN_REQUEST,
        })?;

        let mut config = PlanConfig::default();
        if let Some(text) = args.day_start.as_deref() {
            let day_start =
                ClockTime::parse_time_of_day(text).map_err(|source| CliError::InvalidClockTime {
                    field: ARG_PLAN_DAY_START,
                    source,
                })?;
            config = config.with_day_start(day_start);
        }
        if let Some(minutes) = args.buffer_minutes {
            config = config.with_buffer_minutes(minutes);
        }
        if let Some(radius_km) = args.restaurant_radius_km {
            config = config.with_restaurant_radius_km(radius_km);
        }
        if let Some(radius_km) = args.sanity_radius_km {
            config = config.with_sanity_radius_km(radius_km);
        }
        if let Some(speed_kmh) = args.fallback_speed_kmh {
            config = config.with_fallback_speed_kmh(speed_kmh);
        }
        if let Some(allow) = args.allow_empty_days {
            config = config.with_allow_empty_days(allow);
        }
        config.validate()?;

        let ors_base_url = args.ors_base_url;
        let ors_profile = args.ors_profile;
        let ors = args
            .ors_api_key
            .filter(|key| !key.trim().is_empty())
            .map(|key| {
                OrsConfig::new(key)
                    .with_base_url(ors_base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()))
                    .with_profile(ors_profile.unwrap_or_else(|| DEFAULT_PROFILE.to_owned()))
            });

        Ok(Self {
            request_path,
            output: args.output,
            attractions_per_day: args.attractions_per_day,
            config,
            ors,
            geocode: args.geocode.unwrap_or(true),
        })
    }
}

/// Distance oracle handed to the planner.
pub(crate) type BoxedOracle = Box<dyn DistanceOracle + Send + Sync>;

/// Builds the external collaborators for one plan invocation.
pub(crate) trait PlanBackend {
    fn oracle(&self, settings: &PlanSettings) -> Result<BoxedOracle, CliError>;

    /// A geocoder for unresolved candidates, or `None` to skip geocoding.
    ///
    /// `focus` is the accommodation, when it already has coordinates.
    fn geocoder(
        &self,
        settings: &PlanSettings,
        focus: Option<Coord<f64>>,
    ) -> Result<Option<Box<dyn Geocoder>>, CliError>;
}

/// OpenRouteService when configured, straight lines otherwise.
pub(crate) struct DefaultPlanBackend;

impl PlanBackend for DefaultPlanBackend {
    fn oracle(&self, settings: &PlanSettings) -> Result<BoxedOracle, CliError> {
        let Some(ors) = &settings.ors else {
            log::info!("no OpenRouteService key configured, using straight-line distances");
            return Ok(Box::new(StraightLineOracle::new(
                settings.config.fallback_speed_kmh,
            )));
        };
        log::info!("routing with OpenRouteService profile {}", ors.profile);
        let oracle = OrsDistanceOracle::with_config(ors.clone()).map_err(|source| {
            CliError::BuildOrsClient {
                base_url: ors.base_url.clone(),
                source,
            }
        })?;
        Ok(Box::new(oracle))
    }

    fn geocoder(
        &self,
        settings: &PlanSettings,
        focus: Option<Coord<f64>>,
    ) -> Result<Option<Box<dyn Geocoder>>, CliError> {
        let Some(ors) = settings.ors.as_ref().filter(|_| settings.geocode) else {
            return Ok(None);
        };
        let geocoder = ors_geocoder(ors, focus, settings.config.sanity_radius_km)?;
        Ok(Some(Box::new(geocoder)))
    }
}

/// Geocoder biased towards `focus` and bounded by `radius_km` around it.
pub(crate) fn ors_geocoder(
    ors: &OrsConfig,
    focus: Option<Coord<f64>>,
    radius_km: f64,
) -> Result<OrsGeocoder, CliError> {
    let geocoder =
        OrsGeocoder::with_config(ors.clone()).map_err(|source| CliError::BuildOrsClient {
            base_url: ors.base_url.clone(),
            source,
        })?;
    Ok(match focus {
        Some(point) => geocoder
            .with_focus(point)
            .with_boundary_radius_km(radius_km),
        None => geocoder,
    })
}

pub(super) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_plan_with(args, &DefaultPlanBackend, &mut stdout)
}

pub(super) fn run_plan_with(
    args: PlanArgs,
    backend: &dyn PlanBackend,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let settings = resolve_plan_settings(args)?;
    let itinerary = execute_plan(&settings, backend)?;
    write_itinerary(&settings, writer, &itinerary)
}

fn resolve_plan_settings(args: PlanArgs) -> Result<PlanSettings, CliError> {
    let settings = args.into_settings()?;
    settings.validate_sources()?;
    Ok(settings)
}

fn execute_plan(settings: &PlanSettings, backend: &dyn PlanBackend) -> Result<Itinerary, CliError> {
    let mut request = load_plan_request(&settings.request_path)?;
    if settings.attractions_per_day.is_some() {
        request.attractions_per_day = settings.attractions_per_day;
    }
    let focus = request.accommodation.coordinates;
    if let Some(geocoder) = backend.geocoder(settings, focus)? {
        resolve_request(&mut request, &*geocoder);
    }

    let planner = GreedyPlanner::with_config(backend.oracle(settings)?, settings.config.clone());
    let itinerary = planner
        .plan(&request)
        .map_err(|source| CliError::Plan { source })?;
    log::info!(
        "planned {} day(s): {} stops, {} rejected, {} warnings",
        itinerary.days.len(),
        itinerary.stops().count(),
        itinerary.rejected.len(),
        itinerary.all_warnings().count()
    );
    Ok(itinerary)
}

/// Loads a JSON-encoded [`PlanRequest`] from disk.
pub(super) fn load_plan_request(path: &Utf8Path) -> Result<PlanRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenPlanRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParsePlanRequest {
        path: path.to_path_buf(),
        source,
    })
}

fn write_itinerary(
    settings: &PlanSettings,
    writer: &mut dyn Write,
    itinerary: &Itinerary,
) -> Result<(), CliError> {
    let mut payload =
        serde_json::to_string_pretty(itinerary).map_err(CliError::SerializeItinerary)?;
    payload.push('\n');
    if let Some(path) = &settings.output {
        write_utf8_file(path, payload.as_bytes()).map_err(|source| {
            CliError::WriteOutputFile {
                path: path.clone(),
                source,
            }
        })?;
        log::info!("wrote itinerary to {path}");
        return Ok(());
    }
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WritePlanOutput)
}

#[cfg(test)]
pub(crate) fn settings_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanSettings, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanSettings::try_from(merged)
}
