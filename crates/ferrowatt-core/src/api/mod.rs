//! # Endpoint Catalog
//!
//! One function per Electricity Maps endpoint. Each returns a reusable
//! [`RestQuery`]: nothing is sent until the query is handed to an executor.
//!
//! | Module | Endpoints |
//! |--------|-----------|
//! | (this module) | [`health`], [`zones`], [`updated_since`] |
//! | [`carbon_intensity`] | latest, history, past, past range, forecast |
//! | [`marginal_carbon_intensity`] | past, past range |
//! | [`power_breakdown`] | latest, history, past, past range, forecast |
//! | [`power_production_breakdown`] | forecast |
//! | [`power_consumption_breakdown`] | forecast |
//!
//! Optional arguments are only sent when given.

pub mod carbon_intensity;
pub mod marginal_carbon_intensity;
pub mod power_breakdown;
pub mod power_consumption_breakdown;
pub mod power_production_breakdown;

use crate::domain::{Geolocation, UtcDateTime};
use crate::error::ParameterError;
use crate::http_client::{HttpRequest, ParamValue};
use crate::middleware::{rest_query, RestQuery};
use crate::query::Single;
use crate::schemas::{Health, Schema, Updates, Zones};

pub const API_PREFIX: &str = "https://api.electricitymap.org";

/// Largest `limit` accepted by the updated-since endpoint.
pub const MAX_UPDATES_LIMIT: u32 = 1000;

fn endpoint(path: &str) -> HttpRequest {
    HttpRequest::get(format!("{API_PREFIX}{path}"))
}

fn located(path: &str, geolocation: &Geolocation) -> HttpRequest {
    endpoint(path).with_params(geolocation.to_params())
}

fn optional<V: Into<ParamValue>>(
    request: HttpRequest,
    name: &str,
    value: Option<V>,
) -> HttpRequest {
    match value {
        Some(value) => request.with_param(name, value),
        None => request,
    }
}

fn instant(request: HttpRequest, name: &str, value: UtcDateTime) -> HttpRequest {
    request.with_param(name, value.format_rfc3339())
}

fn query<S: Schema>(request: HttpRequest) -> RestQuery<S> {
    rest_query(Single::new(request))
}

/// Whether the API is up.
pub fn health() -> RestQuery<Health> {
    query(endpoint("/health"))
}

/// Zones reachable with the caller's credentials, or every zone without any.
pub fn zones() -> RestQuery<Zones> {
    query(endpoint("/v3/zones"))
}

/// Arguments of [`updated_since`].
#[derive(Debug, Clone, PartialEq)]
pub struct UpdatedSinceRequest {
    geolocation: Geolocation,
    since: UtcDateTime,
    start: Option<UtcDateTime>,
    end: Option<UtcDateTime>,
    limit: Option<u32>,
    threshold: Option<String>,
    disable_estimations: Option<bool>,
}

impl UpdatedSinceRequest {
    pub fn new(geolocation: Geolocation, since: impl Into<UtcDateTime>) -> Self {
        Self {
            geolocation,
            since: since.into(),
            start: None,
            end: None,
            limit: None,
            threshold: None,
            disable_estimations: None,
        }
    }

    /// Only search updates to data points at or after `start`.
    pub fn start(mut self, start: impl Into<UtcDateTime>) -> Self {
        self.start = Some(start.into());
        self
    }

    /// Only search updates to data points before `end`.
    pub fn end(mut self, end: impl Into<UtcDateTime>) -> Self {
        self.end = Some(end.into());
        self
    }

    /// Cap on returned entries, at most [`MAX_UPDATES_LIMIT`].
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// ISO 8601 duration such as `P1D`. Only entries updated more than this
    /// long after their timestamp are returned.
    pub fn threshold(mut self, threshold: impl Into<String>) -> Self {
        self.threshold = Some(threshold.into());
        self
    }

    pub fn disable_estimations(mut self, disable: bool) -> Self {
        self.disable_estimations = Some(disable);
        self
    }

    fn validate(&self) -> Result<(), ParameterError> {
        if let Some(limit) = self.limit {
            if !(1..=MAX_UPDATES_LIMIT).contains(&limit) {
                return Err(ParameterError::InvalidLimit {
                    value: limit,
                    max: MAX_UPDATES_LIMIT,
                });
            }
        }

        if let Some(threshold) = &self.threshold {
            let valid = threshold.len() > 1
                && threshold.starts_with('P')
                && threshold[1..].chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '.');
            if !valid {
                return Err(ParameterError::InvalidThreshold {
                    value: threshold.clone(),
                });
            }
        }

        Ok(())
    }

    /// Validate the arguments and build the query.
    pub fn into_query(self) -> Result<RestQuery<Updates>, ParameterError> {
        self.validate()?;

        let mut request = instant(
            located("/v3/updated-since", &self.geolocation),
            "since",
            self.since,
        );
        if let Some(start) = self.start {
            request = instant(request, "start", start);
        }
        if let Some(end) = self.end {
            request = instant(request, "end", end);
        }
        request = optional(request, "limit", self.limit);
        request = optional(request, "threshold", self.threshold);
        request = optional(request, "disableEstimations", self.disable_estimations);

        Ok(query(request))
    }
}

/// Timestamps of a zone whose data changed since a given instant.
///
/// Needs a token with access to at least one `past` endpoint.
pub fn updated_since(request: UpdatedSinceRequest) -> Result<RestQuery<Updates>, ParameterError> {
    request.into_query()
}
