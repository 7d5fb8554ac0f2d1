//! Behavior-driven tests for query execution
//!
//! These tests verify HOW executors drive queries: authentication, transport
//! failures and the blocking/async entry points.

use std::sync::Arc;

use ferrowatt_core::api::{carbon_intensity, zones};
use ferrowatt_core::{
    execute, execute_async, token_auth, AsyncExecutor, Auth, EmissionFactorType, Error,
    EstimationMethod, Executor, Geolocation, HttpResponse, MockHttpClient, TransportError,
};
use time::macros::datetime;

const LATEST_DE: &str = include_str!("fixtures/carbon_intensity_latest.json");

fn germany() -> Geolocation {
    Geolocation::zone("DE").expect("valid zone")
}

// =============================================================================
// End to end
// =============================================================================

#[test]
fn when_latest_carbon_intensity_is_requested_for_germany_system_returns_typed_record() {
    // Given: A token and a transport answering with the latest DE reading
    let client = MockHttpClient::new([HttpResponse::ok_json(LATEST_DE)]);
    let query = carbon_intensity::latest(&germany(), None, None);

    // When: The query is executed
    let latest = execute(&query, Some(&token_auth("my-token")), Some(&client))
        .expect("latest carbon intensity");

    // Then: The record is fully typed
    assert_eq!(latest.zone.as_str(), "DE");
    assert_eq!(latest.carbon_intensity, 302);
    assert_eq!(latest.datetime.into_inner(), datetime!(2018-04-25 18:07:00.350 UTC));
    assert_eq!(latest.emission_factor_type, EmissionFactorType::Lifecycle);
    assert!(latest.is_estimated);
    assert_eq!(latest.estimation_method, EstimationMethod::TimeSlicerAverage);

    // And: The request carried the zone, the token and the prepared headers
    let sent = client.last_request().expect("request sent");
    assert_eq!(
        sent.full_url(),
        "https://api.electricitymap.org/v3/carbon-intensity/latest?zone=DE"
    );
    assert_eq!(sent.headers.get("auth-token").map(String::as_str), Some("my-token"));
    assert_eq!(
        sent.headers.get("content-type").map(String::as_str),
        Some("application/json")
    );
}

// =============================================================================
// Authentication
// =============================================================================

#[test]
fn when_no_auth_is_given_system_sends_no_credentials() {
    let client = MockHttpClient::new([HttpResponse::ok_json(LATEST_DE)]);

    execute(&carbon_intensity::latest(&germany(), None, None), None, Some(&client))
        .expect("run");

    let sent = client.last_request().expect("request sent");
    assert!(!sent.headers.contains_key("auth-token"));
    assert!(!sent.headers.contains_key("authorization"));
}

#[test]
fn when_basic_auth_is_given_system_sends_authorization_header() {
    let client = MockHttpClient::new([HttpResponse::ok_json(LATEST_DE)]);
    let auth = Auth::basic("user", "pass");

    execute(&carbon_intensity::latest(&germany(), None, None), Some(&auth), Some(&client))
        .expect("run");

    let sent = client.last_request().expect("request sent");
    assert_eq!(
        sent.headers.get("authorization").map(String::as_str),
        Some("Basic dXNlcjpwYXNz")
    );
    assert!(sent.headers.contains_key("user-agent"));
}

#[test]
fn when_custom_auth_is_given_system_applies_it_after_preparation() {
    // Given: A custom transform that overrides a prepared header
    let client = MockHttpClient::new([HttpResponse::ok_json(LATEST_DE)]);
    let auth = Auth::custom(|request| request.with_header("user-agent", "custom-agent"));

    // When: The query runs
    execute(&carbon_intensity::latest(&germany(), None, None), Some(&auth), Some(&client))
        .expect("run");

    // Then: Auth saw the fully prepared request
    let sent = client.last_request().expect("request sent");
    assert_eq!(sent.headers.get("user-agent").map(String::as_str), Some("custom-agent"));
    assert_eq!(sent.params.len(), 1);
}

#[test]
fn when_token_env_var_is_set_system_builds_token_auth() {
    std::env::set_var("FERROWATT_API_TOKEN", "  env-token ");
    let auth = Auth::from_env();
    std::env::remove_var("FERROWATT_API_TOKEN");
    let fallback = Auth::from_env();

    let client = MockHttpClient::new([HttpResponse::ok_json(LATEST_DE)]);
    execute(&carbon_intensity::latest(&germany(), None, None), Some(&auth), Some(&client))
        .expect("run");

    let sent = client.last_request().expect("request sent");
    assert_eq!(sent.headers.get("auth-token").map(String::as_str), Some("env-token"));
    assert!(matches!(fallback, Auth::None));
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn when_transport_fails_system_propagates_transport_error() {
    let client = MockHttpClient::default();
    client.push_error(TransportError::new("connection refused"));

    let err = execute(&zones(), None, Some(&client)).expect_err("must fail");

    match err {
        Error::Transport(transport) => {
            assert_eq!(transport.message(), "connection refused");
            assert!(transport.retryable());
        }
        other => panic!("expected transport error, got {other:?}"),
    }
    assert_eq!(client.requests().len(), 1, "nothing is retried");
}

#[test]
fn when_mock_runs_out_of_responses_system_returns_non_retryable_transport_error() {
    let client = MockHttpClient::default();

    let err = execute(&zones(), None, Some(&client)).expect_err("must fail");

    assert!(matches!(err, Error::Transport(ref transport) if !transport.retryable()));
}

#[test]
fn when_token_is_rejected_system_returns_unauthorised() {
    let client = MockHttpClient::new([HttpResponse::new(401, r#"{"message": "invalid token"}"#)]);

    let err = execute(&zones(), Some(&token_auth("bad")), Some(&client)).expect_err("401");

    assert!(err.is_unauthorised());
    let status = err.status_error().expect("status error");
    assert_eq!(
        status.request().headers.get("auth-token").map(String::as_str),
        None,
        "the error carries the request before authentication"
    );
}

// =============================================================================
// Executors
// =============================================================================

#[test]
fn when_executor_is_reused_each_run_uses_bound_auth_and_client() {
    let client = Arc::new(MockHttpClient::new([
        HttpResponse::ok_json(LATEST_DE),
        HttpResponse::ok_json(LATEST_DE),
    ]));
    let executor = Executor::new(Arc::clone(&client)).with_auth(token_auth("bound"));
    let query = carbon_intensity::latest(&germany(), None, None);

    let first = executor.run(&query).expect("first run");
    let second = executor.run(&query).expect("second run");

    assert_eq!(first, second);
    let requests = client.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests
        .iter()
        .all(|request| request.headers.get("auth-token").map(String::as_str) == Some("bound")));
}

#[tokio::test]
async fn when_query_is_executed_async_system_returns_typed_record() {
    let client = MockHttpClient::new([HttpResponse::ok_json(LATEST_DE)]);
    let query = carbon_intensity::latest(&germany(), None, None);

    let latest = execute_async(&query, Some(&token_auth("async")), Some(&client))
        .await
        .expect("async run");

    assert_eq!(latest.carbon_intensity, 302);
    let sent = client.last_request().expect("request sent");
    assert_eq!(sent.headers.get("auth-token").map(String::as_str), Some("async"));
}

#[tokio::test]
async fn when_async_executor_runs_concurrently_each_run_is_independent() {
    let client = Arc::new(MockHttpClient::new([
        HttpResponse::ok_json(LATEST_DE),
        HttpResponse::ok_json(LATEST_DE),
    ]));
    let executor = AsyncExecutor::new(Arc::clone(&client)).with_auth(token_auth("shared"));
    let query = carbon_intensity::latest(&germany(), None, None);

    let (first, second) = tokio::join!(executor.run(&query), executor.run(&query));

    assert_eq!(first.expect("first run").zone.as_str(), "DE");
    assert_eq!(second.expect("second run").zone.as_str(), "DE");
    assert_eq!(client.requests().len(), 2);
}

#[tokio::test]
async fn when_async_run_hits_error_status_system_returns_status_error() {
    let client = MockHttpClient::new([HttpResponse::new(503, "unavailable")]);
    let executor = AsyncExecutor::new(client);

    let err = executor.run(&zones()).await.expect_err("503");

    assert!(matches!(err, Error::Status(_)));
}
