//! Geocoder over the OpenRouteService search API.

use geo::Coord;
use voyager_core::{GeocodeError, Geocoder};

use crate::client::{OrsBuildError, OrsClient, OrsConfig};
use crate::ors::GeocodeResponse;

/// [`Geocoder`] backed by `GET /geocode/search`.
///
/// Only the best match is requested. A search can be biased towards a focus
/// point and optionally restricted to a circle around it.
#[derive(Debug)]
pub struct OrsGeocoder {
    client: OrsClient,
    focus: Option<Coord<f64>>,
    boundary_radius_km: Option<f64>,
}

impl OrsGeocoder {
    /// Create a geocoder for the public endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty or the HTTP client or Tokio
    /// runtime fails to build.
    pub fn new(api_key: impl Into<String>) -> Result<Self, OrsBuildError> {
        Self::with_config(OrsConfig::new(api_key))
    }

    /// Create a geocoder with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty or the HTTP client or Tokio
    /// runtime fails to build.
    pub fn with_config(config: OrsConfig) -> Result<Self, OrsBuildError> {
        Ok(Self {
            client: OrsClient::new(config)?,
            focus: None,
            boundary_radius_km: None,
        })
    }

    /// Prefer matches near `focus`.
    #[must_use]
    pub const fn with_focus(mut self, focus: Coord<f64>) -> Self {
        self.focus = Some(focus);
        self
    }

    /// Only accept matches within `radius_km` of the focus point.
    ///
    /// Ignored unless a focus point is set.
    #[must_use]
    pub const fn with_boundary_radius_km(mut self, radius_km: f64) -> Self {
        self.boundary_radius_km = Some(radius_km);
        self
    }

    /// The point searches are biased towards.
    #[must_use]
    pub const fn focus(&self) -> Option<Coord<f64>> {
        self.focus
    }

    /// Radius around the focus point that bounds matches.
    #[must_use]
    pub const fn boundary_radius_km(&self) -> Option<f64> {
        self.boundary_radius_km
    }

    /// The connection settings in use.
    #[must_use]
    pub const fn config(&self) -> &OrsConfig {
        self.client.config()
    }

    fn query_params(&self, text: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![("text", text.to_owned()), ("size", "1".to_owned())];
        if let Some(focus) = self.focus {
            params.push(("focus.point.lat", focus.y.to_string()));
            params.push(("focus.point.lon", focus.x.to_string()));
            if let Some(radius) = self.boundary_radius_km {
                params.push(("boundary.circle.lat", focus.y.to_string()));
                params.push(("boundary.circle.lon", focus.x.to_string()));
                params.push(("boundary.circle.radius", radius.to_string()));
            }
        }
        params
    }

    async fn search_async(&self, text: &str) -> Result<Option<Coord<f64>>, GeocodeError> {
        let url = self.client.url("geocode/search");
        let params = self.query_params(text);
        let response: GeocodeResponse = self
            .client
            .send_json(&url, |client| client.get(&url).query(&params))
            .await?;
        response
            .best_match()
            .map_err(|message| GeocodeError::ParseError { message })
    }
}

/// Search text for `name`, qualified by `context` when one is given.
fn query_text(name: &str, context: &str) -> String {
    let place = name.trim();
    let qualifier = context.trim();
    if qualifier.is_empty() {
        place.to_owned()
    } else {
        format!("{place}, {qualifier}")
    }
}

impl Geocoder for OrsGeocoder {
    fn resolve(&self, name: &str, context: &str) -> Result<Option<Coord<f64>>, GeocodeError> {
        if name.trim().is_empty() {
            return Err(GeocodeError::EmptyQuery);
        }
        let text = query_text(name, context);
        log::debug!("geocoding {text:?}");
        self.client.block_on(self.search_async(&text))
    }
}
