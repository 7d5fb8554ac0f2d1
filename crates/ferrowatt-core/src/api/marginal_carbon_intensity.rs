//! Marginal carbon intensity, in gCO2eq/kWh. Data lags real time by one to
//! two months.

use super::{instant, located, optional, query};
use crate::domain::{Geolocation, UtcDateTime};
use crate::middleware::RestQuery;
use crate::schemas::{CarbonIntensity, CarbonIntensityRange};

pub fn past(
    geolocation: &Geolocation,
    datetime: impl Into<UtcDateTime>,
    disable_estimations: Option<bool>,
) -> RestQuery<CarbonIntensity> {
    let request = located("/v3/marginal-carbon-intensity/past", geolocation);
    let request = instant(request, "datetime", datetime.into());
    query(optional(request, "disableEstimations", disable_estimations))
}

/// Hourly values in `[start, end)`, at most 10 days apart.
pub fn past_range(
    geolocation: &Geolocation,
    start: impl Into<UtcDateTime>,
    end: impl Into<UtcDateTime>,
    disable_estimations: Option<bool>,
) -> RestQuery<CarbonIntensityRange> {
    let request = located("/v3/marginal-carbon-intensity/past-range", geolocation);
    let request = instant(request, "start", start.into());
    let request = instant(request, "end", end.into());
    query(optional(request, "disableEstimations", disable_estimations))
}
