use super::{located, query};
use crate::domain::Geolocation;
use crate::middleware::RestQuery;
use crate::schemas::PowerProductionBreakdownForecast;

/// Forecast production by type for the 24 hours starting at the current hour.
pub fn forecast(geolocation: &Geolocation) -> RestQuery<PowerProductionBreakdownForecast> {
    query(located("/v3/power-production-breakdown/forecast", geolocation))
}
