//! Resolve place names to coordinates.

use geo::Coord;
use thiserror::Error;

/// Errors from a [`Geocoder`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodeError {
    /// The query was empty after trimming.
    #[error("geocoding query is empty")]
    EmptyQuery,

    /// The request timed out.
    #[error("geocoding request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// URL that was requested.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },

    /// The service answered with a non-success HTTP status.
    #[error("HTTP {status} from {url}: {message}")]
    HttpError {
        /// URL that was requested.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error message from the service or client.
        message: String,
    },

    /// The request failed before a response arrived.
    #[error("network error requesting {url}: {message}")]
    NetworkError {
        /// URL that was requested.
        url: String,
        /// Underlying error message.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("failed to parse geocoding response: {message}")]
    ParseError {
        /// Decoder error message.
        message: String,
    },
}

/// Look up coordinates for a named place.
///
/// `context` narrows the search, typically the trip destination. A miss is
/// `Ok(None)`, not an error.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use voyager_core::{GeocodeError, Geocoder};
///
/// struct Gazetteer;
///
/// impl Geocoder for Gazetteer {
///     fn resolve(&self, name: &str, _context: &str) -> Result<Option<Coord<f64>>, GeocodeError> {
///         Ok((name == "Louvre").then_some(Coord { x: 2.3376, y: 48.8606 }))
///     }
/// }
///
/// assert!(Gazetteer.resolve("Louvre", "Paris")?.is_some());
/// assert!(Gazetteer.resolve("Atlantis", "Paris")?.is_none());
/// # Ok::<(), GeocodeError>(())
/// ```
pub trait Geocoder {
    /// Resolve `name` within `context`.
    ///
    /// # Errors
    /// Returns [`GeocodeError`] when the lookup itself fails.
    fn resolve(&self, name: &str, context: &str) -> Result<Option<Coord<f64>>, GeocodeError>;
}

impl<T: Geocoder + ?Sized> Geocoder for &T {
    fn resolve(&self, name: &str, context: &str) -> Result<Option<Coord<f64>>, GeocodeError> {
        (**self).resolve(name, context)
    }
}

impl<T: Geocoder + ?Sized> Geocoder for Box<T> {
    fn resolve(&self, name: &str, context: &str) -> Result<Option<Coord<f64>>, GeocodeError> {
        (**self).resolve(name, context)
    }
}
