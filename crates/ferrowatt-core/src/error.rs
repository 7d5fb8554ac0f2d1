use thiserror::Error;

use crate::http_client::{HttpRequest, HttpResponse, TransportError};

/// Invalid endpoint arguments, rejected before any request is built.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParameterError {
    #[error("zone key cannot be empty")]
    EmptyZoneKey,
    #[error("zone key contains invalid character '{ch}' at index {index}")]
    ZoneKeyInvalidChar { ch: char, index: usize },

    #[error("coordinate '{field}' must be finite")]
    NonFiniteCoordinate { field: &'static str },
    #[error("coordinate '{field}' = {value} is outside [{min}, {max}]")]
    CoordinateOutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("timestamp must be RFC 3339: '{value}'")]
    InvalidTimestamp { value: String },

    #[error("limit {value} must be between 1 and {max}")]
    InvalidLimit { value: u32, max: u32 },
    #[error("threshold must be an ISO 8601 duration such as 'P1D': '{value}'")]
    InvalidThreshold { value: String },
}

/// The API answered with a 4xx or 5xx status.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HttpStatusError {
    message: String,
    request: HttpRequest,
    response: HttpResponse,
}

impl HttpStatusError {
    pub fn new(message: impl Into<String>, request: HttpRequest, response: HttpResponse) -> Self {
        Self {
            message: message.into(),
            request,
            response,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn request(&self) -> &HttpRequest {
        &self.request
    }

    pub fn response(&self) -> &HttpResponse {
        &self.response
    }

    pub fn status(&self) -> u16 {
        self.response.status
    }
}

/// A successful response whose body does not match the declared schema.
#[derive(Debug, Error)]
#[error("error deserialising response into '{schema}'")]
pub struct ValidationError {
    response: HttpResponse,
    schema: &'static str,
    #[source]
    source: serde_json::Error,
}

impl ValidationError {
    pub(crate) fn new(
        response: HttpResponse,
        schema: &'static str,
        source: serde_json::Error,
    ) -> Self {
        Self {
            response,
            schema,
            source,
        }
    }

    pub fn response(&self) -> &HttpResponse {
        &self.response
    }

    /// Name of the schema the body was checked against.
    pub fn schema(&self) -> &'static str {
        self.schema
    }
}

/// A query run was resumed out of turn.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("query was resumed with a response before it yielded a request")]
    UnexpectedResponse,
    #[error("query is suspended on a request and must be resumed with its response")]
    MissingResponse,
    #[error("query already completed")]
    AlreadyCompleted,
}

/// Top-level error for query execution.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Status(HttpStatusError),

    #[error(transparent)]
    Unauthorised(HttpStatusError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

impl Error {
    /// True for every error status answer, 401 included.
    pub const fn is_http_error(&self) -> bool {
        matches!(self, Self::Status(_) | Self::Unauthorised(_))
    }

    pub const fn is_unauthorised(&self) -> bool {
        matches!(self, Self::Unauthorised(_))
    }

    pub fn status_error(&self) -> Option<&HttpStatusError> {
        match self {
            Self::Status(error) | Self::Unauthorised(error) => Some(error),
            _ => None,
        }
    }
}
