use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::http_client::HttpRequest;

/// Environment variable read by [`Auth::from_env`].
pub const API_TOKEN_ENV: &str = "FERROWATT_API_TOKEN";

/// Header carrying an Electricity Maps API token.
pub const TOKEN_HEADER: &str = "auth-token";

type Transform = dyn Fn(HttpRequest) -> HttpRequest + Send + Sync;

/// Request transform applied by the executor before every send.
///
/// No variant removes headers or parameters already on the request.
#[derive(Clone, Default)]
pub enum Auth {
    #[default]
    None,
    Header {
        name: String,
        value: String,
    },
    Basic {
        username: String,
        password: String,
    },
    Custom(Arc<Transform>),
}

impl Auth {
    pub fn header(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Header {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn custom<F>(transform: F) -> Self
    where
        F: Fn(HttpRequest) -> HttpRequest + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(transform))
    }

    /// Token auth from `FERROWATT_API_TOKEN`, or [`Auth::None`] when unset or blank.
    pub fn from_env() -> Self {
        match std::env::var(API_TOKEN_ENV) {
            Ok(token) if !token.trim().is_empty() => token_auth(token.trim()),
            _ => Self::None,
        }
    }

    pub fn apply(&self, request: HttpRequest) -> HttpRequest {
        match self {
            Self::None => request,
            Self::Header { name, value } => request.with_header(name.as_str(), value.as_str()),
            Self::Basic { username, password } => {
                let encoded = STANDARD.encode(format!("{username}:{password}"));
                request.with_header("authorization", format!("Basic {encoded}"))
            }
            Self::Custom(transform) => transform(request),
        }
    }
}

impl Debug for Auth {
    // Credentials stay out of debug output.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Header { name, .. } => f
                .debug_struct("Header")
                .field("name", name)
                .field("value", &"<redacted>")
                .finish(),
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Header auth with an Electricity Maps API token.
pub fn token_auth(token: impl Into<String>) -> Auth {
    Auth::header(TOKEN_HEADER, token)
}
