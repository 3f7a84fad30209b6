//! Test helpers for writing plan requests and stubbing collaborators.

use super::*;
use camino::{Utf8Path, Utf8PathBuf};
use geo::Coord;
use tempfile::TempDir;
use voyager_core::test_support::{UnitDistanceOracle, accommodation, attraction, restaurant};
use voyager_core::{Geocoder, MealType, PlanRequest, TripMetadata};

use crate::plan::{BoxedOracle, PlanBackend, PlanSettings};

/// Write `contents` to `path`, panicking on failure.
pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write test file");
}

/// Temporary directory with a UTF-8 path.
pub(super) fn utf8_tempdir() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

/// A Porto request with two attractions and two restaurants.
pub(super) fn porto_request(days: u32) -> PlanRequest {
    PlanRequest {
        trip: TripMetadata {
            destination: "Porto".to_owned(),
            days,
            ..TripMetadata::default()
        },
        accommodation: accommodation("Hotel Infante", -8.6140, 41.1410),
        attractions: vec![
            attraction("Torre dos Clérigos", -8.6146, 41.1458),
            attraction("Livraria Lello", -8.6149, 41.1469),
        ],
        restaurants: vec![
            restaurant("Café Santiago", -8.6068, 41.1463, MealType::Any),
            restaurant("Tasca da Badalhoca", -8.6217, 41.1585, MealType::Dinner),
        ],
        attractions_per_day: None,
    }
}

/// Write `request` as pretty JSON to `path`.
pub(super) fn write_request(path: &Utf8Path, request: &PlanRequest) {
    let payload = serde_json::to_string_pretty(request).expect("serialize request");
    write_utf8(path, payload.as_bytes());
}

/// Backend using [`UnitDistanceOracle`] and no geocoder.
#[derive(Debug, Default)]
pub(super) struct StubPlanBackend;

impl PlanBackend for StubPlanBackend {
    fn oracle(&self, _settings: &PlanSettings) -> Result<BoxedOracle, CliError> {
        Ok(Box::new(UnitDistanceOracle))
    }

    fn geocoder(
        &self,
        _settings: &PlanSettings,
        _focus: Option<Coord<f64>>,
    ) -> Result<Option<Box<dyn Geocoder>>, CliError> {
        Ok(None)
    }
}
