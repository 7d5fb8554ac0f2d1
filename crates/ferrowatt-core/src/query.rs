//! Suspendable queries.
//!
//! A [`Query`] is a reusable description of an API interaction. Calling
//! [`Query::start`] produces a fresh [`Resume`] run: a small state machine
//! that yields [`HttpRequest`]s and is resumed with the matching
//! [`HttpResponse`]s until it returns its output.
//!
//! ```text
//!   Created ──resume(None)──▶ Suspended(request)
//!   Suspended ──resume(Some(response))──▶ Suspended | Done(output) | Err(error)
//! ```
//!
//! Runs never share state, so the same query can be executed any number of
//! times, blocking or async, against any transport.
//!
//! Composition:
//!
//! - [`Relay`] threads every yielded request outward through an ordered list of
//!   [`Middleware`] stages and feeds the response back through them in reverse.
//! - [`MapReturn`] transforms the final output, for example into a schema.

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use crate::error::{Error, ProtocolError};
use crate::http_client::{HttpRequest, HttpResponse};
use crate::middleware::Middleware;

/// Outcome of resuming a run.
#[derive(Debug, Clone, PartialEq)]
pub enum Step<T> {
    /// The run is suspended until the response to this request is supplied.
    Yield(HttpRequest),
    /// The run finished with its output.
    Done(T),
}

/// A single execution of a query.
///
/// The first call must pass `None` and drives the run to its first yield.
/// Every later call must pass the response to the request yielded last.
pub trait Resume: Send {
    type Output;

    fn resume(&mut self, response: Option<HttpResponse>) -> Result<Step<Self::Output>, Error>;
}

impl<R: Resume + ?Sized> Resume for Box<R> {
    type Output = R::Output;

    fn resume(&mut self, response: Option<HttpResponse>) -> Result<Step<Self::Output>, Error> {
        (**self).resume(response)
    }
}

/// A reusable, lazily executed API interaction.
pub trait Query {
    type Output;
    type Run: Resume<Output = Self::Output>;

    /// Begin a new, independent run.
    fn start(&self) -> Self::Run;

    /// Relay this query's requests and responses through `stages`.
    fn relay(self, stages: Vec<Arc<dyn Middleware>>) -> Relay<Self>
    where
        Self: Sized,
    {
        Relay::new(self, stages)
    }

    /// Transform the output of every run with `map`.
    fn map_return<F, T>(self, map: F) -> MapReturn<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Output) -> Result<T, Error> + Clone + Send,
    {
        MapReturn { inner: self, map }
    }
}

impl<Q: Query + ?Sized> Query for &Q {
    type Output = Q::Output;
    type Run = Q::Run;

    fn start(&self) -> Self::Run {
        (**self).start()
    }
}

/// Base query that yields one request and returns its raw response.
#[derive(Debug, Clone, PartialEq)]
pub struct Single {
    request: HttpRequest,
}

impl Single {
    pub fn new(request: HttpRequest) -> Self {
        Self { request }
    }

    pub fn request(&self) -> &HttpRequest {
        &self.request
    }
}

impl Query for Single {
    type Output = HttpResponse;
    type Run = SingleRun;

    fn start(&self) -> SingleRun {
        SingleRun {
            state: SingleState::Created(self.request.clone()),
        }
    }
}

#[derive(Debug)]
enum SingleState {
    Created(HttpRequest),
    Suspended,
    Finished,
}

/// Run of a [`Single`] query.
#[derive(Debug)]
pub struct SingleRun {
    state: SingleState,
}

impl Resume for SingleRun {
    type Output = HttpResponse;

    fn resume(&mut self, response: Option<HttpResponse>) -> Result<Step<HttpResponse>, Error> {
        match (std::mem::replace(&mut self.state, SingleState::Finished), response) {
            (SingleState::Created(request), None) => {
                self.state = SingleState::Suspended;
                Ok(Step::Yield(request))
            }
            (SingleState::Created(request), Some(_)) => {
                self.state = SingleState::Created(request);
                Err(ProtocolError::UnexpectedResponse.into())
            }
            (SingleState::Suspended, Some(response)) => Ok(Step::Done(response)),
            (SingleState::Suspended, None) => {
                self.state = SingleState::Suspended;
                Err(ProtocolError::MissingResponse.into())
            }
            (SingleState::Finished, _) => Err(ProtocolError::AlreadyCompleted.into()),
        }
    }
}

/// Query wrapped by an ordered list of middleware stages.
///
/// For every request the inner run yields, stage 1's request hook runs first,
/// then stage 2's, and the last stage's result goes to the transport. The
/// response travels back in reverse: the last stage sees it first, and each
/// stage is handed the request exactly as it forwarded it. Stages cannot add
/// suspension points, so the transport sees one request per inner yield.
#[derive(Clone)]
pub struct Relay<Q> {
    inner: Q,
    stages: Arc<[Arc<dyn Middleware>]>,
}

impl<Q> Relay<Q> {
    pub fn new(inner: Q, stages: Vec<Arc<dyn Middleware>>) -> Self {
        Self {
            inner,
            stages: stages.into(),
        }
    }

    pub fn inner(&self) -> &Q {
        &self.inner
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }
}

impl<Q: Debug> Debug for Relay<Q> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Relay")
            .field("inner", &self.inner)
            .field("stage_count", &self.stages.len())
            .finish()
    }
}

impl<Q: Query> Query for Relay<Q> {
    type Output = Q::Output;
    type Run = RelayRun<Q::Run>;

    fn start(&self) -> Self::Run {
        RelayRun {
            inner: self.inner.start(),
            stages: Arc::clone(&self.stages),
            forwarded: None,
            finished: false,
        }
    }
}

/// Run of a [`Relay`] query.
pub struct RelayRun<R> {
    inner: R,
    stages: Arc<[Arc<dyn Middleware>]>,
    /// Request as forwarded by each stage, for the pending yield.
    forwarded: Option<Vec<HttpRequest>>,
    finished: bool,
}

impl<R: Resume> RelayRun<R> {
    fn step(&mut self, response: Option<HttpResponse>) -> Result<Step<R::Output>, Error> {
        let inbound = match (self.forwarded.take(), response) {
            (Some(forwarded), Some(response)) => {
                // A failure from here on ends the run; only a yield reopens it.
                self.finished = true;
                let mut response = response;
                for (stage, request) in self.stages.iter().zip(&forwarded).rev() {
                    response = stage.on_response(request, response)?;
                }
                Some(response)
            }
            (Some(forwarded), None) => {
                self.forwarded = Some(forwarded);
                return Err(ProtocolError::MissingResponse.into());
            }
            (None, response) => response,
        };

        match self.inner.resume(inbound)? {
            Step::Yield(request) => {
                let mut forwarded = Vec::with_capacity(self.stages.len());
                let mut request = request;
                for stage in self.stages.iter() {
                    request = stage.on_request(request);
                    forwarded.push(request.clone());
                }
                self.forwarded = Some(forwarded);
                self.finished = false;
                Ok(Step::Yield(request))
            }
            Step::Done(output) => Ok(Step::Done(output)),
        }
    }
}

impl<R: Resume> Resume for RelayRun<R> {
    type Output = R::Output;

    fn resume(&mut self, response: Option<HttpResponse>) -> Result<Step<R::Output>, Error> {
        if self.finished {
            return Err(ProtocolError::AlreadyCompleted.into());
        }

        // Protocol misuse before a response reaches the stages leaves the run as it was.
        let step = self.step(response);
        match &step {
            Ok(Step::Yield(_)) | Err(Error::Protocol(_)) => {}
            Ok(Step::Done(_)) | Err(_) => self.finished = true,
        }
        step
    }
}

/// Query whose output is transformed by a fallible function.
#[derive(Clone)]
pub struct MapReturn<Q, F> {
    inner: Q,
    map: F,
}

impl<Q, F> MapReturn<Q, F> {
    pub fn inner(&self) -> &Q {
        &self.inner
    }
}

impl<Q: Debug, F> Debug for MapReturn<Q, F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapReturn")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

impl<Q, F, T> Query for MapReturn<Q, F>
where
    Q: Query,
    F: Fn(Q::Output) -> Result<T, Error> + Clone + Send,
{
    type Output = T;
    type Run = MapReturnRun<Q::Run, F>;

    fn start(&self) -> Self::Run {
        MapReturnRun {
            inner: self.inner.start(),
            map: self.map.clone(),
        }
    }
}

/// Run of a [`MapReturn`] query.
pub struct MapReturnRun<R, F> {
    inner: R,
    map: F,
}

impl<R, F, T> Resume for MapReturnRun<R, F>
where
    R: Resume,
    F: Fn(R::Output) -> Result<T, Error> + Send,
{
    type Output = T;

    fn resume(&mut self, response: Option<HttpResponse>) -> Result<Step<T>, Error> {
        match self.inner.resume(response)? {
            Step::Yield(request) => Ok(Step::Yield(request)),
            Step::Done(output) => (self.map)(output).map(Step::Done),
        }
    }
}
