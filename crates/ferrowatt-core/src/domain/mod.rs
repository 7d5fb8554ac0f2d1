//! # Domain Values
//!
//! Typed arguments accepted by the endpoint catalog.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ZoneKey`] | Validated zone identifier (`DE`, `DK-DK1`) |
//! | [`Coordinates`] | Longitude/latitude pair, range checked |
//! | [`Geolocation`] | Either a zone or coordinates |
//! | [`UtcDateTime`] | Instant normalised to UTC |
//! | [`EmissionFactorType`] | `direct` or `lifecycle` |
//! | [`EstimationMethod`] | Estimation model, or measured |
//!
//! Construction validates every invariant, so an endpoint never sends a
//! malformed parameter:
//!
//! ```rust
//! use ferrowatt_core::{Geolocation, ParameterError};
//!
//! assert!(Geolocation::zone("DE").is_ok());
//! assert!(matches!(
//!     Geolocation::coordinates(200.0, 0.0),
//!     Err(ParameterError::CoordinateOutOfRange { .. })
//! ));
//! ```

mod factors;
mod timestamp;
mod zone;

pub use factors::{EmissionFactorType, EstimationMethod};
pub use timestamp::UtcDateTime;
pub use zone::{Coordinates, Geolocation, ZoneKey};
