//! Middleware stages shared by every endpoint.
//!
//! [`rest_query`] wraps a base query (one yielded request, raw response out)
//! into the pipeline used by the whole endpoint catalog, outer to inner:
//!
//! 1. [`RequestPreparation`] merges the JSON content type and the client user
//!    agent into the request.
//! 2. [`ErrorHandling`] fails on 4xx/5xx before any body is deserialised.
//! 3. [`deserialize`] turns the returned response into the declared schema.

use std::sync::Arc;

use tracing::warn;

use crate::error::{Error, HttpStatusError, ValidationError};
use crate::http_client::{HttpRequest, HttpResponse, USER_AGENT};
use crate::query::{MapReturn, Query, Relay, Single};
use crate::schemas::Schema;

/// A stage relayed around every request/response round trip of a query.
///
/// Both hooks default to passing their input through unchanged.
pub trait Middleware: Send + Sync {
    /// Transform a request before it moves on towards the transport.
    fn on_request(&self, request: HttpRequest) -> HttpRequest {
        request
    }

    /// Inspect or transform a response on its way back to the query.
    ///
    /// `request` is the request exactly as this stage forwarded it.
    fn on_response(
        &self,
        _request: &HttpRequest,
        response: HttpResponse,
    ) -> Result<HttpResponse, Error> {
        Ok(response)
    }
}

/// Merges a fixed header set into every request, overwriting same-named headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPreparation {
    headers: Vec<(String, String)>,
}

impl RequestPreparation {
    pub fn new<I, K, V>(headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            headers: headers
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

impl Default for RequestPreparation {
    fn default() -> Self {
        Self::new([("content-type", "application/json"), ("user-agent", USER_AGENT)])
    }
}

impl Middleware for RequestPreparation {
    fn on_request(&self, request: HttpRequest) -> HttpRequest {
        request.with_headers(self.headers.iter().cloned())
    }
}

/// Classifies error statuses into [`Error::Unauthorised`] and [`Error::Status`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ErrorHandling;

impl Middleware for ErrorHandling {
    fn on_response(
        &self,
        request: &HttpRequest,
        response: HttpResponse,
    ) -> Result<HttpResponse, Error> {
        raise_for_status(request, response)
    }
}

/// Pass responses below 400 through; fail on everything else.
pub fn raise_for_status(
    request: &HttpRequest,
    response: HttpResponse,
) -> Result<HttpResponse, Error> {
    if response.status < 400 {
        return Ok(response);
    }

    let message = format!(
        "Response with status code {} for URL '{}': {}",
        response.status,
        request.url,
        error_body(&response)
    );
    warn!(status = response.status, url = %request.url, "api returned error status");

    let error = HttpStatusError::new(message, request.clone(), response);
    if error.status() == 401 {
        Err(Error::Unauthorised(error))
    } else {
        Err(Error::Status(error))
    }
}

/// Compact JSON rendering of an error payload, or the raw text when it is not JSON.
fn error_body(response: &HttpResponse) -> String {
    serde_json::from_slice::<serde_json::Value>(&response.content)
        .map(|payload| payload.to_string())
        .unwrap_or_else(|_| response.text().into_owned())
}

/// Deserialise a response body into schema `S`.
pub fn deserialize<S: Schema>(response: HttpResponse) -> Result<S, Error> {
    match serde_json::from_slice::<S>(&response.content) {
        Ok(value) => Ok(value),
        Err(source) => Err(ValidationError::new(response, S::NAME, source).into()),
    }
}

/// Stages applied by [`rest_query`], outer to inner.
pub fn default_stages() -> Vec<Arc<dyn Middleware>> {
    vec![
        Arc::new(RequestPreparation::default()),
        Arc::new(ErrorHandling),
    ]
}

/// Deserialising function pointer stored in a [`RestQuery`].
pub type Deserializer<S> = fn(HttpResponse) -> Result<S, Error>;

/// A base query relayed through [`default_stages`] and deserialised into `S`.
pub type RestQuery<S, Q = Single> = MapReturn<Relay<Q>, Deserializer<S>>;

/// Instrument a base query with the shared middleware and schema `S`.
pub fn rest_query<S, Q>(base: Q) -> RestQuery<S, Q>
where
    S: Schema,
    Q: Query<Output = HttpResponse>,
{
    base.relay(default_stages())
        .map_return(deserialize::<S> as Deserializer<S>)
}
