//! Distance oracle over the OpenRouteService matrix API.

use std::time::Duration;

use geo::Coord;
use voyager_core::{DistanceError, DistanceOracle, TravelEstimate, TravelEstimateMatrix};

use crate::client::{OrsBuildError, OrsClient, OrsConfig};
use crate::ors::{MatrixRequest, MatrixResponse};

/// [`DistanceOracle`] backed by the OpenRouteService matrix API.
///
/// Every call is a single matrix request; a pair estimate is the off-diagonal
/// cell of a two-point matrix. Rate-limited requests are retried once.
#[derive(Debug)]
pub struct OrsDistanceOracle {
    client: OrsClient,
}

impl OrsDistanceOracle {
    /// Create an oracle for the public endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty or the HTTP client or Tokio
    /// runtime fails to build.
    pub fn new(api_key: impl Into<String>) -> Result<Self, OrsBuildError> {
        Self::with_config(OrsConfig::new(api_key))
    }

    /// Create an oracle with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty or the HTTP client or Tokio
    /// runtime fails to build.
    pub fn with_config(config: OrsConfig) -> Result<Self, OrsBuildError> {
        Ok(Self {
            client: OrsClient::new(config)?,
        })
    }

    /// The connection settings in use.
    #[must_use]
    pub const fn config(&self) -> &OrsConfig {
        self.client.config()
    }

    fn matrix_url(&self) -> String {
        self.client
            .url(&format!("v2/matrix/{}", self.client.config().profile))
    }

    async fn fetch_matrix_async(
        &self,
        points: &[Coord<f64>],
    ) -> Result<TravelEstimateMatrix, DistanceError> {
        let url = self.matrix_url();
        let body = MatrixRequest::new(points);
        let response: MatrixResponse = self
            .client
            .send_json(&url, |client| client.post(&url).json(&body))
            .await?;
        convert_response(response, points.len())
    }
}

impl DistanceOracle for OrsDistanceOracle {
    fn estimate(&self, from: Coord<f64>, to: Coord<f64>) -> Result<TravelEstimate, DistanceError> {
        let matrix = self.estimate_matrix(&[from, to])?;
        matrix
            .first()
            .and_then(|row| row.get(1))
            .copied()
            .flatten()
            .ok_or(DistanceError::NoRoute)
    }

    fn estimate_matrix(&self, points: &[Coord<f64>]) -> Result<TravelEstimateMatrix, DistanceError> {
        if points.is_empty() {
            return Err(DistanceError::EmptyInput);
        }
        log::debug!("requesting {0}x{0} matrix from OpenRouteService", points.len());
        self.client.block_on(self.fetch_matrix_async(points))
    }
}

/// Convert a matrix response for `size` points into travel estimates.
///
/// Null, negative and non-finite cells become `None`.
fn convert_response(
    response: MatrixResponse,
    size: usize,
) -> Result<TravelEstimateMatrix, DistanceError> {
    let distances = response.distances.ok_or_else(|| DistanceError::ParseError {
        message: "matrix response missing distances".to_owned(),
    })?;
    let durations = response.durations.ok_or_else(|| DistanceError::ParseError {
        message: "matrix response missing durations".to_owned(),
    })?;
    let square = |rows: &[Vec<Option<f64>>]| {
        rows.len() == size && rows.iter().all(|row| row.len() == size)
    };
    if !square(&distances) || !square(&durations) {
        return Err(DistanceError::ParseError {
            message: format!("matrix response is not {size}x{size}"),
        });
    }

    Ok(distances
        .into_iter()
        .zip(durations)
        .map(|(distance_row, duration_row)| {
            distance_row
                .into_iter()
                .zip(duration_row)
                .map(|(metres, seconds)| cell(metres?, seconds?))
                .collect()
        })
        .collect())
}

#[expect(
    clippy::float_arithmetic,
    reason = "converting metres to kilometres"
)]
fn cell(metres: f64, seconds: f64) -> Option<TravelEstimate> {
    if !metres.is_finite() || metres < 0.0 {
        return None;
    }
    let duration = Duration::try_from_secs_f64(seconds).ok()?;
    Some(TravelEstimate::new(metres / 1000.0, duration))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn oracle() -> OrsDistanceOracle {
        OrsDistanceOracle::with_config(
            OrsConfig::new("test-key").with_base_url("http://ors.example.com/"),
        )
        .expect("oracle should build")
    }

    fn response(
        distances: Option<Vec<Vec<Option<f64>>>>,
        durations: Option<Vec<Vec<Option<f64>>>>,
    ) -> MatrixResponse {
        MatrixResponse {
            distances,
            durations,
        }
    }

    #[rstest]
    fn matrix_url_includes_profile(oracle: OrsDistanceOracle) {
        assert_eq!(
            oracle.matrix_url(),
            "http://ors.example.com/v2/matrix/driving-car"
        );
    }

    #[rstest]
    fn convert_response_handles_success() {
        let matrix = convert_response(
            response(
                Some(vec![vec![Some(0.0), Some(2500.0)], vec![Some(2600.0), Some(0.0)]]),
                Some(vec![vec![Some(0.0), Some(300.0)], vec![Some(330.0), Some(0.0)]]),
            ),
            2,
        )
        .expect("should convert");

        let there = matrix[0][1].expect("route");
        assert!((there.distance_km - 2.5).abs() < 1e-9);
        assert_eq!(there.duration, Duration::from_secs(300));
        let back = matrix[1][0].expect("route");
        assert!((back.distance_km - 2.6).abs() < 1e-9);
        assert_eq!(matrix[0][0], Some(TravelEstimate::ZERO));
    }

    #[rstest]
    fn convert_response_marks_invalid_cells_unroutable() {
        let matrix = convert_response(
            response(
                Some(vec![
                    vec![Some(0.0), None, Some(-5.0)],
                    vec![Some(10.0), Some(0.0), Some(f64::NAN)],
                    vec![Some(10.0), Some(10.0), Some(0.0)],
                ]),
                Some(vec![
                    vec![Some(0.0), Some(1.0), Some(1.0)],
                    vec![Some(f64::INFINITY), Some(0.0), Some(1.0)],
                    vec![Some(-1.0), Some(1.0), Some(0.0)],
                ]),
            ),
            3,
        )
        .expect("should convert");

        assert_eq!(matrix[0][1], None);
        assert_eq!(matrix[0][2], None);
        assert_eq!(matrix[1][0], None);
        assert_eq!(matrix[1][2], None);
        assert_eq!(matrix[2][0], None);
        assert!(matrix[2][1].is_some());
    }

    #[rstest]
    #[case(None, Some(vec![vec![Some(0.0)]]))]
    #[case(Some(vec![vec![Some(0.0)]]), None)]
    fn convert_response_requires_both_metrics(
        #[case] distances: Option<Vec<Vec<Option<f64>>>>,
        #[case] durations: Option<Vec<Vec<Option<f64>>>>,
    ) {
        let err = convert_response(response(distances, durations), 1).expect_err("should fail");
        assert!(matches!(err, DistanceError::ParseError { .. }));
    }

    #[rstest]
    fn convert_response_rejects_wrong_shape() {
        let err = convert_response(
            response(Some(vec![vec![Some(0.0)]]), Some(vec![vec![Some(0.0)]])),
            2,
        )
        .expect_err("should fail");
        assert!(matches!(err, DistanceError::ParseError { .. }));
    }

    #[rstest]
    fn empty_input_returns_error(oracle: OrsDistanceOracle) {
        let err = oracle.estimate_matrix(&[]).expect_err("should fail");
        assert_eq!(err, DistanceError::EmptyInput);
    }

    #[rstest]
    fn unreachable_service_is_a_network_error() {
        let oracle = OrsDistanceOracle::with_config(
            OrsConfig::new("test-key")
                .with_base_url("http://127.0.0.1:9")
                .with_timeout(Duration::from_secs(2)),
        )
        .expect("oracle should build");

        let err = oracle
            .estimate(Coord { x: 0.0, y: 0.0 }, Coord { x: 0.1, y: 0.1 })
            .expect_err("nothing listens on the discard port");

        assert!(
            matches!(
                err,
                DistanceError::NetworkError { .. } | DistanceError::Timeout { .. }
            ),
            "unexpected error {err:?}"
        );
    }
}
