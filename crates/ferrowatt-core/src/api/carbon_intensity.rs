//! Carbon intensity, in gCO2eq/kWh, of electricity consumed in an area.

use super::{instant, located, optional, query};
use crate::domain::{EmissionFactorType, Geolocation, UtcDateTime};
use crate::middleware::RestQuery;
use crate::schemas::{
    CarbonIntensity, CarbonIntensityForecast, CarbonIntensityHistory, CarbonIntensityRange,
};

/// Last known carbon intensity.
pub fn latest(
    geolocation: &Geolocation,
    emission_factor_type: Option<EmissionFactorType>,
    disable_estimations: Option<bool>,
) -> RestQuery<CarbonIntensity> {
    let request = located("/v3/carbon-intensity/latest", geolocation);
    let factor = emission_factor_type.map(EmissionFactorType::as_str);
    let request = optional(request, "emissionFactorType", factor);
    query(optional(request, "disableEstimations", disable_estimations))
}

/// Hourly carbon intensity over the last 24 hours.
pub fn history(
    geolocation: &Geolocation,
    emission_factor_type: Option<EmissionFactorType>,
    disable_estimations: Option<bool>,
) -> RestQuery<CarbonIntensityHistory> {
    let request = located("/v3/carbon-intensity/history", geolocation);
    let factor = emission_factor_type.map(EmissionFactorType::as_str);
    let request = optional(request, "emissionFactorType", factor);
    query(optional(request, "disableEstimations", disable_estimations))
}

/// Carbon intensity at a past instant, at hourly resolution.
pub fn past(
    geolocation: &Geolocation,
    datetime: impl Into<UtcDateTime>,
    emission_factor_type: Option<EmissionFactorType>,
    disable_estimations: Option<bool>,
) -> RestQuery<CarbonIntensity> {
    let request = located("/v3/carbon-intensity/past", geolocation);
    let request = instant(request, "datetime", datetime.into());
    let factor = emission_factor_type.map(EmissionFactorType::as_str);
    let request = optional(request, "emissionFactorType", factor);
    query(optional(request, "disableEstimations", disable_estimations))
}

/// Hourly carbon intensity in `[start, end)`. The API caps the range at 10 days.
pub fn past_range(
    geolocation: &Geolocation,
    start: impl Into<UtcDateTime>,
    end: impl Into<UtcDateTime>,
    disable_estimations: Option<bool>,
) -> RestQuery<CarbonIntensityRange> {
    let request = located("/v3/carbon-intensity/past-range", geolocation);
    let request = instant(request, "start", start.into());
    let request = instant(request, "end", end.into());
    query(optional(request, "disableEstimations", disable_estimations))
}

/// Forecast for the 24 hours starting at the current hour.
pub fn forecast(geolocation: &Geolocation) -> RestQuery<CarbonIntensityForecast> {
    query(located("/v3/carbon-intensity/forecast", geolocation))
}
