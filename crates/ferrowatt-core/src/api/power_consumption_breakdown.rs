use super::{located, query};
use crate::domain::Geolocation;
use crate::middleware::RestQuery;
use crate::schemas::PowerConsumptionBreakdownForecast;

/// Forecast consumption by origin for the 24 hours starting at the current hour.
pub fn forecast(geolocation: &Geolocation) -> RestQuery<PowerConsumptionBreakdownForecast> {
    query(located("/v3/power-consumption-breakdown/forecast", geolocation))
}
