use std::collections::BTreeMap;

use ferrowatt_core::api::{
    self, carbon_intensity, marginal_carbon_intensity, power_breakdown,
    power_consumption_breakdown, power_production_breakdown, UpdatedSinceRequest, API_PREFIX,
};
use ferrowatt_core::{
    execute, EmissionFactorType, EstimationMethod, Geolocation, HttpRequest, HttpResponse,
    MockHttpClient, ParamValue, Query, ZoneKey,
};
use time::macros::datetime;

/// Run `query` against a mock answering with `fixture` and return the decoded
/// value together with the request the transport received.
fn run<Q: Query>(query: &Q, fixture: &str) -> (Q::Output, HttpRequest) {
    let client = MockHttpClient::new([HttpResponse::ok_json(fixture)]);
    let output = execute(query, None, Some(&client))
        .unwrap_or_else(|error| panic!("fixture should decode: {error}"));
    let request = client.last_request().expect("one request sent");
    (output, request)
}

fn zone(key: &str) -> Geolocation {
    Geolocation::zone(key).expect("valid zone")
}

fn text(value: &str) -> ParamValue {
    ParamValue::from(value)
}

fn assert_path(request: &HttpRequest, path: &str) {
    assert_eq!(request.url, format!("{API_PREFIX}{path}"));
}

#[test]
fn health_decodes_monitor_state() {
    let (health, request) = run(&api::health(), include_str!("../fixtures/health.json"));

    assert_path(&request, "/health");
    assert_eq!(health.status, "ok");
    assert_eq!(health.monitors.state, "ok");
}

#[test]
fn zones_decode_keyed_metadata() {
    let (zones, request) = run(&api::zones(), include_str!("../fixtures/zones.json"));

    assert_path(&request, "/v3/zones");
    assert!(request.params.is_empty());
    assert_eq!(zones.len(), 3);

    let duke = zones
        .get(&ZoneKey::parse("US-CAR-DUK").expect("valid key"))
        .expect("zone present");
    assert_eq!(duke.zone_name, "Duke Energy Carolinas");
    assert_eq!(duke.country_name.as_deref(), Some("United States of America"));
    assert_eq!(duke.display_name, None);
}

// =============================================================================
// Carbon intensity
// =============================================================================

#[test]
fn carbon_intensity_latest_sends_optional_params_only_when_given() {
    let fixture = include_str!("../fixtures/carbon_intensity_latest.json");

    let (_, bare) = run(&carbon_intensity::latest(&zone("DE"), None, None), fixture);
    assert_path(&bare, "/v3/carbon-intensity/latest");
    assert_eq!(bare.params, BTreeMap::from([(String::from("zone"), text("DE"))]));

    let query = carbon_intensity::latest(&zone("DE"), Some(EmissionFactorType::Direct), Some(true));
    let (_, full) = run(&query, fixture);
    assert_eq!(full.params.get("emissionFactorType"), Some(&text("direct")));
    assert_eq!(full.params.get("disableEstimations"), Some(&ParamValue::Bool(true)));
    assert!(full.full_url().contains("disableEstimations=true"));
}

#[test]
fn carbon_intensity_history_decodes_every_entry() {
    let query = carbon_intensity::history(&zone("DE"), None, None);
    let (history, request) = run(&query, include_str!("../fixtures/carbon_intensity_history.json"));

    assert_path(&request, "/v3/carbon-intensity/history");
    assert_eq!(history.zone.as_str(), "DE");
    assert_eq!(history.history.len(), 2);
}

#[test]
fn carbon_intensity_past_formats_datetime_as_utc() {
    let query = carbon_intensity::past(
        &zone("DE"),
        datetime!(2019-05-21 23:00 +02:00),
        Some(EmissionFactorType::Lifecycle),
        None,
    );
    let (past, request) = run(&query, include_str!("../fixtures/carbon_intensity_past.json"));

    assert_path(&request, "/v3/carbon-intensity/past");
    assert_eq!(request.params.get("datetime"), Some(&text("2019-05-21T21:00:00Z")));
    assert_eq!(past.zone.as_str(), "DE");
}

#[test]
fn carbon_intensity_past_range_sends_start_and_end() {
    let query = carbon_intensity::past_range(
        &zone("DE"),
        datetime!(2019-05-21 21:00),
        datetime!(2019-05-22 00:00),
        Some(false),
    );
    let (range, request) = run(
        &query,
        include_str!("../fixtures/carbon_intensity_past_range.json"),
    );

    assert_path(&request, "/v3/carbon-intensity/past-range");
    assert_eq!(request.params.get("start"), Some(&text("2019-05-21T21:00:00Z")));
    assert_eq!(request.params.get("end"), Some(&text("2019-05-22T00:00:00Z")));
    assert_eq!(request.params.get("disableEstimations"), Some(&ParamValue::Bool(false)));
    assert_eq!(range.data.len(), 3);
    assert!(range
        .data
        .iter()
        .all(|entry| entry.estimation_method == EstimationMethod::Measured));
}

#[test]
fn carbon_intensity_forecast_decodes_horizon() {
    let query = carbon_intensity::forecast(&zone("DK-DK2"));
    let (forecast, request) = run(
        &query,
        include_str!("../fixtures/carbon_intensity_forecast.json"),
    );

    assert_path(&request, "/v3/carbon-intensity/forecast");
    assert_eq!(request.params.len(), 1);
    assert_eq!(forecast.forecast.len(), 3);
    assert_eq!(forecast.forecast[0].carbon_intensity, 326);
}

#[test]
fn coordinates_replace_the_zone_param() {
    let location = Geolocation::coordinates(12.57, 55.68).expect("valid point");
    let query = carbon_intensity::forecast(&location);
    let (_, request) = run(&query, include_str!("../fixtures/carbon_intensity_forecast.json"));

    assert_eq!(request.params.get("lon"), Some(&ParamValue::Float(12.57)));
    assert_eq!(request.params.get("lat"), Some(&ParamValue::Float(55.68)));
    assert!(!request.params.contains_key("zone"));
}

// =============================================================================
// Marginal carbon intensity
// =============================================================================

#[test]
fn marginal_carbon_intensity_past_decodes_measured_value() {
    let query = marginal_carbon_intensity::past(&zone("GB"), datetime!(2023-01-04 00:00 UTC), None);
    let (past, request) =
        run(&query, include_str!("../fixtures/marginal_carbon_intensity_past.json"));

    assert_path(&request, "/v3/marginal-carbon-intensity/past");
    assert_eq!(past.carbon_intensity, 359);
    assert!(!past.is_estimated);
    assert_eq!(past.estimation_method, EstimationMethod::Measured);
}

#[test]
fn marginal_carbon_intensity_past_range_decodes_entries() {
    let query = marginal_carbon_intensity::past_range(
        &zone("GB"),
        datetime!(2023-01-04 00:00 UTC),
        datetime!(2023-01-04 03:00 UTC),
        None,
    );
    let (range, request) = run(
        &query,
        include_str!("../fixtures/marginal_carbon_intensity_past_range.json"),
    );

    assert_path(&request, "/v3/marginal-carbon-intensity/past-range");
    assert!(!request.params.contains_key("disableEstimations"));
    assert_eq!(range.data.len(), 3);
    // updatedAt arrives without an offset and is read as UTC
    assert_eq!(
        range.data[0].updated_at.into_inner(),
        datetime!(2023-10-01 18:30:28.708 UTC)
    );
}

// =============================================================================
// Power breakdown
// =============================================================================

#[test]
fn power_breakdown_latest_keeps_nulls_as_missing_sources() {
    let query = power_breakdown::latest(&zone("FR"), None);
    let (latest, request) = run(&query, include_str!("../fixtures/power_breakdown_latest.json"));

    assert_path(&request, "/v3/power-breakdown/latest");
    assert_eq!(latest.power_production_breakdown.nuclear, Some(31438));
    assert_eq!(latest.power_production_breakdown.geothermal, None);
    assert_eq!(latest.power_consumption_breakdown.hydro_discharge, Some(1013));
    assert_eq!(latest.power_import_breakdown.get("GB"), Some(&548));
    assert_eq!(latest.estimation_method, EstimationMethod::TimeSlicerAverage);
}

#[test]
fn power_breakdown_history_decodes_entries() {
    let query = power_breakdown::history(&zone("DK-DK1"), Some(true));
    let (history, request) = run(&query, include_str!("../fixtures/power_breakdown_history.json"));

    assert_path(&request, "/v3/power-breakdown/history");
    assert_eq!(request.params.get("disableEstimations"), Some(&ParamValue::Bool(true)));
    assert_eq!(history.history.len(), 1);
    assert_eq!(history.history[0].power_export_total, Some(35));
}

#[test]
fn power_breakdown_past_sends_datetime() {
    let query = power_breakdown::past(&zone("DK-DK1"), datetime!(2018-04-24 19:00 UTC), None);
    let (past, request) = run(&query, include_str!("../fixtures/power_breakdown_past.json"));

    assert_path(&request, "/v3/power-breakdown/past");
    assert_eq!(request.params.get("datetime"), Some(&text("2018-04-24T19:00:00Z")));
    assert_eq!(past.zone.as_str(), "DK-DK1");
}

#[test]
fn power_breakdown_past_range_decodes_entries() {
    let query = power_breakdown::past_range(
        &zone("DE"),
        datetime!(2019-05-21 21:00 UTC),
        datetime!(2019-05-21 22:00 UTC),
        None,
    );
    let (range, request) = run(&query, include_str!("../fixtures/power_breakdown_past_range.json"));

    assert_path(&request, "/v3/power-breakdown/past-range");
    assert_eq!(range.data.len(), 1);
}

#[test]
fn power_breakdown_forecast_accepts_null_estimation_flags() {
    let query = power_breakdown::forecast(&zone("DE"));
    let (forecast, request) = run(
        &query,
        include_str!("../fixtures/power_breakdown_forecast.json"),
    );

    assert_path(&request, "/v3/power-breakdown/forecast");
    assert_eq!(forecast.data.len(), 2);

    let first = &forecast.data[0];
    assert!(!first.is_estimated);
    assert!(first.power_import_breakdown.is_empty());
    assert_eq!(first.power_import_total, None);
    assert_eq!(first.power_production_breakdown.hydro_discharge, Some(-2466));
    assert_eq!(first.power_production_breakdown.battery_discharge, None);
}

#[test]
fn power_production_breakdown_forecast_decodes_entries() {
    let query = power_production_breakdown::forecast(&zone("DE"));
    let (forecast, request) = run(
        &query,
        include_str!("../fixtures/power_production_breakdown_forecast.json"),
    );

    assert_path(&request, "/v3/power-production-breakdown/forecast");
    assert_eq!(forecast.forecast.len(), 2);
    assert!(forecast.forecast.iter().all(|entry| entry.power_production_total > 0));
}

#[test]
fn power_consumption_breakdown_forecast_decodes_entries() {
    let query = power_consumption_breakdown::forecast(&zone("DK-DK2"));
    let (forecast, request) = run(
        &query,
        include_str!("../fixtures/power_consumption_breakdown_forecast.json"),
    );

    assert_path(&request, "/v3/power-consumption-breakdown/forecast");
    assert_eq!(forecast.zone.as_str(), "DK-DK2");
    assert_eq!(forecast.forecast.len(), 3);
    assert_eq!(forecast.forecast[0].power_consumption_total, 2572);
}

// =============================================================================
// Updated since
// =============================================================================

#[test]
fn updated_since_decodes_update_list() {
    let query = UpdatedSinceRequest::new(zone("DK-DK1"), datetime!(2020-02-01 00:00 UTC))
        .start(datetime!(2020-02-05 00:00 UTC))
        .end(datetime!(2020-02-06 00:00 UTC))
        .limit(100)
        .threshold("P1D")
        .disable_estimations(false)
        .into_query()
        .expect("valid arguments");
    let (updates, request) = run(&query, include_str!("../fixtures/updated_since.json"));

    assert_path(&request, "/v3/updated-since");
    assert_eq!(request.params.get("since"), Some(&text("2020-02-01T00:00:00Z")));
    assert_eq!(request.params.get("start"), Some(&text("2020-02-05T00:00:00Z")));
    assert_eq!(request.params.get("end"), Some(&text("2020-02-06T00:00:00Z")));
    assert_eq!(request.params.get("threshold"), Some(&text("P1D")));
    assert_eq!(updates.updates.len(), 3);
    assert_eq!(updates.limit, 100);
    assert!(!updates.limit_reached);
}
