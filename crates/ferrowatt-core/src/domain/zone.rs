use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::ParameterError;
use crate::http_client::ParamValue;

/// Electricity Maps zone identifier such as `DE`, `DK-DK1` or `US-CAR-DUK`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ZoneKey(String);

impl ZoneKey {
    /// Parse a zone key. Surrounding whitespace is trimmed; case is kept.
    pub fn parse(input: &str) -> Result<Self, ParameterError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ParameterError::EmptyZoneKey);
        }

        for (index, ch) in trimmed.chars().enumerate() {
            let valid = ch.is_ascii_alphanumeric() || ch == '-' || ch == '_';
            if !valid {
                return Err(ParameterError::ZoneKeyInvalidChar { ch, index });
            }
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ZoneKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for ZoneKey {
    type Error = ParameterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for ZoneKey {
    type Error = ParameterError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ZoneKey> for String {
    fn from(value: ZoneKey) -> Self {
        value.0
    }
}

/// WGS84 position, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    longitude: f64,
    latitude: f64,
}

impl Coordinates {
    pub fn new(longitude: f64, latitude: f64) -> Result<Self, ParameterError> {
        Ok(Self {
            longitude: check_range("longitude", longitude, 180.0)?,
            latitude: check_range("latitude", latitude, 90.0)?,
        })
    }

    pub const fn longitude(self) -> f64 {
        self.longitude
    }

    pub const fn latitude(self) -> f64 {
        self.latitude
    }
}

fn check_range(field: &'static str, value: f64, bound: f64) -> Result<f64, ParameterError> {
    if !value.is_finite() {
        return Err(ParameterError::NonFiniteCoordinate { field });
    }
    if !(-bound..=bound).contains(&value) {
        return Err(ParameterError::CoordinateOutOfRange {
            field,
            value,
            min: -bound,
            max: bound,
        });
    }
    Ok(value)
}

/// Area a query targets: a zone, or the zone containing a point.
#[derive(Debug, Clone, PartialEq)]
pub enum Geolocation {
    Zone(ZoneKey),
    Coordinates(Coordinates),
}

impl Geolocation {
    pub fn zone(key: &str) -> Result<Self, ParameterError> {
        ZoneKey::parse(key).map(Self::Zone)
    }

    pub fn coordinates(longitude: f64, latitude: f64) -> Result<Self, ParameterError> {
        Coordinates::new(longitude, latitude).map(Self::Coordinates)
    }

    /// Query parameters selecting this area: `zone`, or `lon` and `lat`.
    pub fn to_params(&self) -> BTreeMap<String, ParamValue> {
        let mut params = BTreeMap::new();
        match self {
            Self::Zone(key) => {
                params.insert(String::from("zone"), ParamValue::from(key.as_str()));
            }
            Self::Coordinates(point) => {
                params.insert(String::from("lon"), ParamValue::Float(point.longitude()));
                params.insert(String::from("lat"), ParamValue::Float(point.latitude()));
            }
        }
        params
    }
}

impl From<ZoneKey> for Geolocation {
    fn from(value: ZoneKey) -> Self {
        Self::Zone(value)
    }
}

impl From<Coordinates> for Geolocation {
    fn from(value: Coordinates) -> Self {
        Self::Coordinates(value)
    }
}
