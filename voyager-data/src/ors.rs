//! OpenRouteService request and response bodies.
//!
//! See: <https://openrouteservice.org/dev/#/api-docs>

use geo::Coord;
use serde::{Deserialize, Serialize};

/// Body of a `POST /v2/matrix/{profile}` request.
#[derive(Debug, Serialize)]
pub struct MatrixRequest {
    /// Points as `[longitude, latitude]` pairs.
    pub locations: Vec<[f64; 2]>,
    /// Metrics to compute.
    pub metrics: [&'static str; 2],
}

impl MatrixRequest {
    /// Request distances and durations between every pair of `points`.
    pub fn new(points: &[Coord<f64>]) -> Self {
        Self {
            locations: points.iter().map(|point| [point.x, point.y]).collect(),
            metrics: ["distance", "duration"],
        }
    }
}

/// Matrix API response.
///
/// `distances[i][j]` is in metres and `durations[i][j]` in seconds from the
/// i-th to the j-th location. Cells are `None` when no route exists.
#[derive(Debug, Deserialize)]
pub struct MatrixResponse {
    /// Pairwise route lengths in metres.
    #[serde(default)]
    pub distances: Option<Vec<Vec<Option<f64>>>>,
    /// Pairwise travel times in seconds.
    #[serde(default)]
    pub durations: Option<Vec<Vec<Option<f64>>>>,
}

/// Geocoding search response, a GeoJSON feature collection.
#[derive(Debug, Default, Deserialize)]
pub struct GeocodeResponse {
    /// Matches, best first.
    #[serde(default)]
    pub features: Vec<GeocodeFeature>,
}

/// One geocoding match.
#[derive(Debug, Deserialize)]
pub struct GeocodeFeature {
    /// Point geometry of the match.
    pub geometry: PointGeometry,
}

/// GeoJSON point geometry.
#[derive(Debug, Deserialize)]
pub struct PointGeometry {
    /// `[longitude, latitude]`, optionally followed by elevation.
    pub coordinates: Vec<f64>,
}

impl GeocodeResponse {
    /// Coordinates of the best match.
    ///
    /// # Errors
    /// Returns a message when the best match has fewer than two ordinates.
    pub fn best_match(&self) -> Result<Option<Coord<f64>>, String> {
        let Some(feature) = self.features.first() else {
            return Ok(None);
        };
        match feature.geometry.coordinates.as_slice() {
            [x, y, ..] if x.is_finite() && y.is_finite() => Ok(Some(Coord { x: *x, y: *y })),
            other => Err(format!("invalid point coordinates {other:?}")),
        }
    }
}

/// Error payload; OpenRouteService uses several shapes.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    error: Option<ErrorDetail>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorDetail {
    Text(String),
    Object {
        #[serde(default)]
        message: Option<String>,
    },
}

impl ErrorBody {
    /// The most specific message present, if any.
    pub fn into_message(self) -> Option<String> {
        let detail = match self.error {
            Some(ErrorDetail::Text(text)) => Some(text),
            Some(ErrorDetail::Object { message }) => message,
            None => None,
        };
        detail.or(self.message).filter(|m| !m.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn matrix_request_uses_lon_lat_order() {
        let request = MatrixRequest::new(&[Coord { x: -9.14, y: 38.72 }]);
        let json = serde_json::to_value(&request).expect("serialise");
        assert_eq!(
            json,
            serde_json::json!({
                "locations": [[-9.14, 38.72]],
                "metrics": ["distance", "duration"],
            })
        );
    }

    #[rstest]
    fn deserialise_matrix_with_nulls() {
        let json = r#"{
            "distances": [[0.0, 1520.4], [null, 0.0]],
            "durations": [[0.0, 210.1], [null, 0.0]],
            "metadata": {"service": "matrix"}
        }"#;

        let response: MatrixResponse = serde_json::from_str(json).expect("should deserialise");

        let distances = response.distances.expect("distances");
        assert_eq!(distances.first().and_then(|r| r.get(1)).copied(), Some(Some(1520.4)));
        assert_eq!(distances.get(1).and_then(|r| r.first()).copied(), Some(None));
        assert!(response.durations.is_some());
    }

    #[rstest]
    fn geocode_best_match_takes_first_feature() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "geometry": {"type": "Point", "coordinates": [-9.1334, 38.7139]}},
                {"type": "Feature", "geometry": {"type": "Point", "coordinates": [0.0, 0.0]}}
            ]
        }"#;

        let response: GeocodeResponse = serde_json::from_str(json).expect("should deserialise");

        assert_eq!(
            response.best_match(),
            Ok(Some(Coord {
                x: -9.1334,
                y: 38.7139
            }))
        );
    }

    #[rstest]
    fn geocode_without_features_is_a_miss() {
        let response: GeocodeResponse =
            serde_json::from_str(r#"{"features": []}"#).expect("should deserialise");
        assert_eq!(response.best_match(), Ok(None));
    }

    #[rstest]
    fn geocode_with_short_coordinates_is_an_error() {
        let response: GeocodeResponse =
            serde_json::from_str(r#"{"features": [{"geometry": {"coordinates": [1.0]}}]}"#)
                .expect("should deserialise");
        assert!(response.best_match().is_err());
    }
}
