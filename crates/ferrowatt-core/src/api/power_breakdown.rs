//! Origin of the electricity produced and consumed in an area.
//!
//! Production is what the zone generates, by production type. Consumption
//! accounts for imports and exports. Imports and exports are the physical
//! flows across the zone border, all in MW.

use super::{instant, located, optional, query};
use crate::domain::{Geolocation, UtcDateTime};
use crate::middleware::RestQuery;
use crate::schemas::{
    PowerBreakdown, PowerBreakdownForecast, PowerBreakdownHistory, PowerBreakdownRange,
};

pub fn latest(
    geolocation: &Geolocation,
    disable_estimations: Option<bool>,
) -> RestQuery<PowerBreakdown> {
    let request = located("/v3/power-breakdown/latest", geolocation);
    query(optional(request, "disableEstimations", disable_estimations))
}

/// Hourly breakdowns over the last 24 hours.
pub fn history(
    geolocation: &Geolocation,
    disable_estimations: Option<bool>,
) -> RestQuery<PowerBreakdownHistory> {
    let request = located("/v3/power-breakdown/history", geolocation);
    query(optional(request, "disableEstimations", disable_estimations))
}

pub fn past(
    geolocation: &Geolocation,
    datetime: impl Into<UtcDateTime>,
    disable_estimations: Option<bool>,
) -> RestQuery<PowerBreakdown> {
    let request = located("/v3/power-breakdown/past", geolocation);
    let request = instant(request, "datetime", datetime.into());
    query(optional(request, "disableEstimations", disable_estimations))
}

/// Hourly breakdowns in `[start, end)`, at most 10 days apart.
pub fn past_range(
    geolocation: &Geolocation,
    start: impl Into<UtcDateTime>,
    end: impl Into<UtcDateTime>,
    disable_estimations: Option<bool>,
) -> RestQuery<PowerBreakdownRange> {
    let request = located("/v3/power-breakdown/past-range", geolocation);
    let request = instant(request, "start", start.into());
    let request = instant(request, "end", end.into());
    query(optional(request, "disableEstimations", disable_estimations))
}

/// Forecast for the 24 hours starting at the current hour.
///
/// Some zones only forecast production or consumption. Import and export
/// breakdowns come back empty.
pub fn forecast(geolocation: &Geolocation) -> RestQuery<PowerBreakdownForecast> {
    query(located("/v3/power-breakdown/forecast", geolocation))
}
