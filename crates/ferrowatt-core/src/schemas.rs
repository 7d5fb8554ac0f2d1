//! Response schemas.
//!
//! Every schema is a plain record deserialised with serde. Its wire naming
//! rule is exposed as [`Schema::CASING`], so the key a field is read from can
//! be computed and checked without a response at hand.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{EmissionFactorType, EstimationMethod, UtcDateTime, ZoneKey};

/// Wire key naming convention of a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Casing {
    /// `carbon_intensity` stays `carbon_intensity`.
    Snake,
    /// `carbon_intensity` is read from `carbonIntensity`.
    Camel,
    /// `hydro_discharge` is read from `hydro discharge`.
    Spaced,
}

impl Casing {
    /// Wire key for the snake_case field name `field`.
    pub fn wire_key(self, field: &str) -> String {
        match self {
            Self::Snake => field.to_owned(),
            Self::Spaced => field.replace('_', " "),
            Self::Camel => {
                let mut parts = field.split('_');
                let mut key = parts.next().unwrap_or_default().to_owned();
                for part in parts {
                    let mut chars = part.chars();
                    if let Some(first) = chars.next() {
                        key.extend(first.to_uppercase());
                        key.push_str(&chars.as_str().to_lowercase());
                    }
                }
                key
            }
        }
    }
}

/// A typed response record.
pub trait Schema: DeserializeOwned {
    /// Name reported by [`ValidationError`](crate::ValidationError).
    const NAME: &'static str;
    const CASING: Casing;
}

macro_rules! schema {
    ($($ty:ident => $casing:ident),+ $(,)?) => {
        $(
            impl Schema for $ty {
                const NAME: &'static str = stringify!($ty);
                const CASING: Casing = Casing::$casing;
            }
        )+
    };
}

schema! {
    ZoneMetadata => Camel,
    Zones => Camel,
    Health => Snake,
    MonitorHealth => Snake,
    CarbonIntensity => Camel,
    CarbonIntensityHistory => Snake,
    CarbonIntensityRange => Snake,
    CarbonIntensityForecast => Camel,
    CarbonIntensityForecastEntry => Camel,
    PowerMix => Spaced,
    PowerBreakdown => Camel,
    PowerBreakdownHistory => Snake,
    PowerBreakdownRange => Snake,
    PowerBreakdownForecast => Snake,
    PowerProductionBreakdownForecast => Camel,
    PowerProductionForecastEntry => Camel,
    PowerConsumptionBreakdownForecast => Camel,
    PowerConsumptionForecastEntry => Camel,
    Updates => Camel,
    Update => Camel,
}

/// Forecast payloads send `null` for `isEstimated`.
fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneMetadata {
    pub zone_name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub country_name: Option<String>,
    #[serde(default)]
    pub access: Option<Vec<String>>,
}

/// Zones available to the caller, keyed by zone.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Zones(pub BTreeMap<ZoneKey, ZoneMetadata>);

impl Zones {
    pub fn get(&self, zone: &ZoneKey) -> Option<&ZoneMetadata> {
        self.0.get(zone)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ZoneKey, &ZoneMetadata)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorHealth {
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub monitors: MonitorHealth,
    pub status: String,
}

/// Carbon intensity, in gCO2eq/kWh, of electricity consumed in a zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarbonIntensity {
    pub zone: ZoneKey,
    pub carbon_intensity: i64,
    pub datetime: UtcDateTime,
    pub updated_at: UtcDateTime,
    pub created_at: UtcDateTime,
    pub emission_factor_type: EmissionFactorType,
    #[serde(deserialize_with = "null_as_false")]
    pub is_estimated: bool,
    pub estimation_method: EstimationMethod,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarbonIntensityHistory {
    pub zone: ZoneKey,
    pub history: Vec<CarbonIntensity>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarbonIntensityRange {
    pub zone: ZoneKey,
    pub data: Vec<CarbonIntensity>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarbonIntensityForecastEntry {
    pub carbon_intensity: i64,
    pub datetime: UtcDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarbonIntensityForecast {
    pub zone: ZoneKey,
    pub forecast: Vec<CarbonIntensityForecastEntry>,
    pub updated_at: UtcDateTime,
}

/// Power, in MW, broken down by production type. Unreported sources are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PowerMix {
    pub biomass: Option<i64>,
    pub coal: Option<i64>,
    pub gas: Option<i64>,
    pub geothermal: Option<i64>,
    pub hydro: Option<i64>,
    pub nuclear: Option<i64>,
    pub solar: Option<i64>,
    pub oil: Option<i64>,
    pub wind: Option<i64>,
    pub unknown: Option<i64>,
    #[serde(rename = "hydro discharge")]
    pub hydro_discharge: Option<i64>,
    #[serde(rename = "battery discharge")]
    pub battery_discharge: Option<i64>,
}

/// Origin of the electricity produced and consumed in a zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerBreakdown {
    pub zone: ZoneKey,
    pub datetime: UtcDateTime,
    pub updated_at: UtcDateTime,
    pub created_at: UtcDateTime,

    pub power_consumption_breakdown: PowerMix,
    pub power_production_breakdown: PowerMix,
    pub power_import_breakdown: BTreeMap<String, i64>,
    pub power_export_breakdown: BTreeMap<String, i64>,

    pub fossil_free_percentage: Option<i64>,
    pub renewable_percentage: Option<i64>,

    pub power_consumption_total: Option<i64>,
    pub power_production_total: Option<i64>,
    pub power_import_total: Option<i64>,
    pub power_export_total: Option<i64>,

    #[serde(deserialize_with = "null_as_false")]
    pub is_estimated: bool,
    pub estimation_method: EstimationMethod,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerBreakdownHistory {
    pub zone: ZoneKey,
    pub history: Vec<PowerBreakdown>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerBreakdownRange {
    pub zone: ZoneKey,
    pub data: Vec<PowerBreakdown>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerBreakdownForecast {
    pub zone: ZoneKey,
    pub data: Vec<PowerBreakdown>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerProductionForecastEntry {
    pub datetime: UtcDateTime,
    pub power_production_total: i64,
    pub power_production_breakdown: PowerMix,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerProductionBreakdownForecast {
    pub zone: ZoneKey,
    pub forecast: Vec<PowerProductionForecastEntry>,
    pub updated_at: UtcDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerConsumptionForecastEntry {
    pub datetime: UtcDateTime,
    pub power_consumption_total: i64,
    pub power_consumption_breakdown: PowerMix,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerConsumptionBreakdownForecast {
    pub zone: ZoneKey,
    pub forecast: Vec<PowerConsumptionForecastEntry>,
    pub updated_at: UtcDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Update {
    pub datetime: UtcDateTime,
    pub updated_at: UtcDateTime,
}

/// Timestamps whose data changed since a given instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Updates {
    pub zone: ZoneKey,
    pub updates: Vec<Update>,
    pub threshold: String,
    pub limit: u32,
    pub limit_reached: bool,
}
