use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Emission factors used to compute carbon intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmissionFactorType {
    Direct,
    Lifecycle,
}

impl EmissionFactorType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Lifecycle => "lifecycle",
        }
    }
}

impl Display for EmissionFactorType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a data point was estimated. `null` on the wire means it was measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EstimationMethod {
    #[default]
    Measured,
    ConstructBreakdown,
    ForecastsHierarchy,
    ModeBreakdown,
    ReconstructProductionFromConsumption,
    ThresholdFiltered,
    TimeSlicerAverage,
}

impl EstimationMethod {
    pub const ALL: [Self; 7] = [
        Self::Measured,
        Self::ConstructBreakdown,
        Self::ForecastsHierarchy,
        Self::ModeBreakdown,
        Self::ReconstructProductionFromConsumption,
        Self::ThresholdFiltered,
        Self::TimeSlicerAverage,
    ];

    /// Wire value; `None` for measured data.
    pub const fn as_wire(self) -> Option<&'static str> {
        match self {
            Self::Measured => None,
            Self::ConstructBreakdown => Some("CONSTRUCT_BREAKDOWN"),
            Self::ForecastsHierarchy => Some("FORECASTS_HIERARCHY"),
            Self::ModeBreakdown => Some("MODE_BREAKDOWN"),
            Self::ReconstructProductionFromConsumption => {
                Some("RECONSTRUCT_PRODUCTION_FROM_CONSUMPTION")
            }
            Self::ThresholdFiltered => Some("THRESHOLD_FILTERED"),
            Self::TimeSlicerAverage => Some("TIME_SLICER_AVERAGE"),
        }
    }
}

impl Display for EstimationMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_wire().unwrap_or("MEASURED"))
    }
}

impl FromStr for EstimationMethod {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_wire() == Some(value))
            .ok_or_else(|| format!("unknown estimation method '{value}'"))
    }
}

impl Serialize for EstimationMethod {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.as_wire() {
            Some(value) => serializer.serialize_str(value),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for EstimationMethod {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(Self::Measured),
            Some(value) => value.parse().map_err(serde::de::Error::custom),
        }
    }
}
