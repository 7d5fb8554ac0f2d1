//! Drivers that run a [`Query`] against a transport.
//!
//! Each yielded request passes through the [`Auth`] transform, goes out over
//! the transport, and its response resumes the run. Nothing is retried; the
//! first error ends the run and is returned as-is.

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use tracing::debug;

use crate::auth::Auth;
use crate::error::Error;
#[cfg(feature = "blocking")]
use crate::http_client::ReqwestBlockingHttpClient;
#[cfg(not(feature = "blocking"))]
use crate::http_client::TransportError;
use crate::http_client::{
    BlockingHttpClient, HttpClient, HttpRequest, HttpResponse, ReqwestHttpClient,
};
use crate::query::{Query, Resume, Step};

static NO_AUTH: Auth = Auth::None;

/// Run `query` to completion on a blocking transport.
///
/// Without a `client`, a fresh reqwest blocking client is used.
pub fn execute<Q: Query>(
    query: &Q,
    auth: Option<&Auth>,
    client: Option<&dyn BlockingHttpClient>,
) -> Result<Q::Output, Error> {
    let auth = auth.unwrap_or(&NO_AUTH);
    match client {
        Some(client) => drive(query.start(), auth, client),
        None => drive(query.start(), auth, default_blocking_client()?.as_ref()),
    }
}

/// Run `query` to completion on an async transport.
///
/// Without a `client`, a fresh [`ReqwestHttpClient`] is used.
pub async fn execute_async<Q: Query>(
    query: &Q,
    auth: Option<&Auth>,
    client: Option<&dyn HttpClient>,
) -> Result<Q::Output, Error> {
    let auth = auth.unwrap_or(&NO_AUTH);
    match client {
        Some(client) => drive_async(query.start(), auth, client).await,
        None => drive_async(query.start(), auth, &ReqwestHttpClient::new()).await,
    }
}

#[cfg(feature = "blocking")]
fn default_blocking_client() -> Result<Box<dyn BlockingHttpClient>, Error> {
    Ok(Box::new(ReqwestBlockingHttpClient::new()))
}

#[cfg(not(feature = "blocking"))]
fn default_blocking_client() -> Result<Box<dyn BlockingHttpClient>, Error> {
    Err(TransportError::non_retryable(
        "no blocking transport given and the `blocking` feature is disabled",
    )
    .into())
}

fn drive<R: Resume>(
    mut run: R,
    auth: &Auth,
    client: &dyn BlockingHttpClient,
) -> Result<R::Output, Error> {
    let mut response = None;
    loop {
        match run.resume(response.take())? {
            Step::Done(output) => return Ok(output),
            Step::Yield(request) => {
                let request = auth.apply(request);
                log_request(&request);
                let received = client.send(request)?;
                log_response(&received);
                response = Some(received);
            }
        }
    }
}

async fn drive_async<R: Resume>(
    mut run: R,
    auth: &Auth,
    client: &dyn HttpClient,
) -> Result<R::Output, Error> {
    let mut response = None;
    loop {
        match run.resume(response.take())? {
            Step::Done(output) => return Ok(output),
            Step::Yield(request) => {
                let request = auth.apply(request);
                log_request(&request);
                let received = client.execute(request).await?;
                log_response(&received);
                response = Some(received);
            }
        }
    }
}

// Headers and params can carry credentials, so only the method and base URL are logged.
fn log_request(request: &HttpRequest) {
    debug!(method = %request.method, url = %request.url, "sending request");
}

fn log_response(response: &HttpResponse) {
    debug!(status = response.status, bytes = response.content.len(), "received response");
}

/// Blocking executor with auth and transport bound once.
#[derive(Clone)]
pub struct Executor {
    auth: Auth,
    client: Arc<dyn BlockingHttpClient>,
}

impl Executor {
    pub fn new(client: impl BlockingHttpClient + 'static) -> Self {
        Self {
            auth: Auth::None,
            client: Arc::new(client),
        }
    }

    pub fn with_auth(mut self, auth: Auth) -> Self {
        self.auth = auth;
        self
    }

    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    pub fn run<Q: Query>(&self, query: &Q) -> Result<Q::Output, Error> {
        drive(query.start(), &self.auth, self.client.as_ref())
    }
}

#[cfg(feature = "blocking")]
impl Default for Executor {
    fn default() -> Self {
        Self::new(ReqwestBlockingHttpClient::new())
    }
}

impl Debug for Executor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("auth", &self.auth)
            .finish_non_exhaustive()
    }
}

/// Async executor with auth and transport bound once.
#[derive(Clone)]
pub struct AsyncExecutor {
    auth: Auth,
    client: Arc<dyn HttpClient>,
}

impl AsyncExecutor {
    pub fn new(client: impl HttpClient + 'static) -> Self {
        Self {
            auth: Auth::None,
            client: Arc::new(client),
        }
    }

    pub fn with_auth(mut self, auth: Auth) -> Self {
        self.auth = auth;
        self
    }

    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    pub async fn run<Q: Query>(&self, query: &Q) -> Result<Q::Output, Error> {
        drive_async(query.start(), &self.auth, self.client.as_ref()).await
    }
}

impl Default for AsyncExecutor {
    fn default() -> Self {
        Self::new(ReqwestHttpClient::new())
    }
}

impl Debug for AsyncExecutor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncExecutor")
            .field("auth", &self.auth)
            .finish_non_exhaustive()
    }
}
