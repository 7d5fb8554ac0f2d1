//! # Ferrowatt Core
//!
//! Typed client for the Electricity Maps REST API.
//!
//! ## Overview
//!
//! Every endpoint is a reusable, lazily executed [`Query`]: a small state
//! machine that yields HTTP requests and is resumed with their responses.
//! Queries know nothing about transports or credentials, so the same value can
//! be run blocking or async, against reqwest or an in-memory mock.
//!
//! - **Query protocol** with explicit `Yield`/`Done` steps
//! - **Middleware stages** for request headers and error statuses
//! - **Typed schemas** deserialised with serde
//! - **Executors** that apply authentication and drive the transport
//!
//! ## Feature Flags
//!
//! | Flag | Description |
//! |------|-------------|
//! | `default` | Enables `blocking` |
//! | `blocking` | [`ReqwestBlockingHttpClient`] and the default transport for [`execute`] |
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`api`] | Endpoint catalog |
//! | [`auth`] | Request authentication transforms |
//! | [`domain`] | Zone keys, coordinates, timestamps, enums |
//! | [`error`] | Error types |
//! | [`executor`] | Blocking and async query drivers |
//! | [`http_client`] | Transport abstraction, reqwest and mock transports |
//! | [`middleware`] | Request preparation, status checks, deserialisation |
//! | [`query`] | Suspendable query protocol and combinators |
//! | [`schemas`] | Response records |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ferrowatt_core::{api, execute, token_auth, Geolocation};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let germany = Geolocation::zone("DE")?;
//!     let query = api::carbon_intensity::latest(&germany, None, None);
//!
//!     let latest = execute(&query, Some(&token_auth("my-token")), None)?;
//!     println!("{} gCO2eq/kWh at {}", latest.carbon_intensity, latest.datetime);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  Executor       │── auth ──▶ transport (reqwest / mock)
//! └────────┬────────┘
//!          │ resume(response)
//!          ▼
//! ┌─────────────────┐
//! │ Deserialize     │  MapReturn: response ─▶ schema
//! └────────┬────────┘
//!          ▼
//! ┌─────────────────┐
//! │ Middleware      │  Relay: preparation, error handling
//! └────────┬────────┘
//!          ▼
//! ┌─────────────────┐
//! │ Endpoint        │  Single: one request, raw response
//! └─────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Every failure surfaces as [`Error`]:
//!
//! ```rust
//! use ferrowatt_core::Error;
//!
//! fn describe(error: &Error) -> &'static str {
//!     match error {
//!         Error::Unauthorised(_) => "check the API token",
//!         Error::Status(_) => "the API rejected the request",
//!         Error::Validation(_) => "unexpected response shape",
//!         Error::Transport(_) => "network failure",
//!         Error::Parameter(_) => "invalid arguments",
//!         Error::Protocol(_) => "query driven out of turn",
//!     }
//! }
//! ```
//!
//! ## Security
//!
//! - The API token can be read from `FERROWATT_API_TOKEN` ([`Auth::from_env`])
//! - Header values and credentials are never logged

pub mod api;
pub mod auth;
pub mod domain;
pub mod error;
pub mod executor;
pub mod http_client;
pub mod middleware;
pub mod query;
pub mod schemas;

/// Crate version, also sent in the `user-agent` header.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Authentication
pub use auth::{token_auth, Auth};

// Domain values
pub use domain::{
    Coordinates, EmissionFactorType, EstimationMethod, Geolocation, UtcDateTime, ZoneKey,
};

// Error types
pub use error::{Error, HttpStatusError, ParameterError, ProtocolError, ValidationError};

// Executors
pub use executor::{execute, execute_async, AsyncExecutor, Executor};

// HTTP client types
#[cfg(feature = "blocking")]
pub use http_client::ReqwestBlockingHttpClient;
pub use http_client::{
    BlockingHttpClient, HttpClient, HttpMethod, HttpRequest, HttpResponse, MockHttpClient,
    ParamValue, ReqwestHttpClient, TransportError,
};

// Middleware
pub use middleware::{rest_query, ErrorHandling, Middleware, RequestPreparation, RestQuery};

// Query protocol
pub use query::{MapReturn, Query, Relay, Resume, Single, Step};

// Schemas
pub use schemas::{
    CarbonIntensity, CarbonIntensityForecast, CarbonIntensityHistory, CarbonIntensityRange, Casing,
    Health, PowerBreakdown, PowerBreakdownForecast, PowerBreakdownHistory, PowerBreakdownRange,
    PowerConsumptionBreakdownForecast, PowerMix, PowerProductionBreakdownForecast, Schema, Updates,
    ZoneMetadata, Zones,
};
