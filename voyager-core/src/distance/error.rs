use thiserror::Error;

/// Errors from a [`DistanceOracle`](super::DistanceOracle).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DistanceError {
    /// No points were provided for a matrix request.
    #[error("at least one point is required")]
    EmptyInput,

    /// One endpoint of a query has no coordinates.
    #[error("location {name:?} has no coordinates")]
    MissingCoordinates {
        /// Name of the unresolved location.
        name: String,
    },

    /// The service found no route between the points.
    #[error("no route between the requested points")]
    NoRoute,

    /// The request timed out.
    #[error("request to {url} timed out after {timeout_secs}s")]
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
    #[error("failed to parse routing response: {message}")]
    ParseError {
        /// Decoder error message.
        message: String,
    },

    /// The service reported an application-level error.
    #[error("routing service error {code}: {message}")]
    ServiceError {
        /// Service error code.
        code: String,
        /// Service error message.
        message: String,
    },

    /// The oracle cannot answer at all, e.g. a lookup table has no entry.
    #[error("distance unavailable: {message}")]
    Unavailable {
        /// Why the estimate is unavailable.
        message: String,
    },
}
