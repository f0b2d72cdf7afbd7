//! Integration tests for the reports crate
//!
//! These tests drive whole stream syncs against a scripted API.

use anyhow::Result;
use chrono::NaiveDate;
use reports::api::validate_response;
use reports::api::wire::ApiResponse;
use reports::catalog;
use reports::{
    BookmarkStore, Endpoint, FileBookmarkStore, FixedClock, InMemoryBookmarkStore,
    PaginationLoopError, Record, ReportApi, SharedClock, SyncOrchestrator, TapConfig,
    UpstreamReportError, sync_stream,
};
use serde_json::{Map, Value, json};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::sync::Arc;
use tempfile::TempDir;

/// Scripted API: replays responses in order and records every request
struct FakeApi {
    responses: RefCell<VecDeque<ApiResponse>>,
    requests: RefCell<Vec<(Endpoint, Vec<(String, String)>)>>,
}

impl FakeApi {
    fn new(responses: Vec<ApiResponse>) -> Self {
        Self {
            responses: RefCell::new(responses.into()),
            requests: RefCell::new(Vec::new()),
        }
    }

    fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    fn param(&self, index: usize, name: &str) -> Option<String> {
        self.requests.borrow()[index]
            .1
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
    }

    fn window(&self, index: usize) -> (String, String) {
        (
            self.param(index, "start_date").unwrap(),
            self.param(index, "end_date").unwrap(),
        )
    }
}

impl ReportApi for FakeApi {
    fn get(&self, endpoint: Endpoint, query: &[(String, String)]) -> Result<ApiResponse> {
        self.requests.borrow_mut().push((endpoint, query.to_vec()));
        let response = self
            .responses
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("unexpected request {:?}", query))?;
        validate_response(endpoint, "https://example.test/report", response)
    }
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Clock on which "yesterday" is the given date
fn yesterday_is(s: &str) -> SharedClock {
    Arc::new(FixedClock(date(s).succ_opt().unwrap()))
}

fn config() -> TapConfig {
    TapConfig::new("token", "42", date("2024-01-01"))
}

fn campaign_row(campaign: &str, day: &str, metrics: Value) -> Value {
    json!({
        "dimensions": {"campaign_id": campaign, "stat_time_day": format!("{day} 00:00:00")},
        "metrics": metrics
    })
}

fn collect_records(
    api: &FakeApi,
    stream: &str,
    config: &TapConfig,
    start: &str,
    clock: SharedClock,
) -> Result<Vec<Record>> {
    let descriptor = catalog::find(stream).unwrap();
    SyncOrchestrator::new(api, &descriptor, config, date(start), clock)?.collect()
}

#[test]
fn test_short_range_is_one_window() {
    let api = FakeApi::new(vec![ApiResponse::ok(
        vec![campaign_row("1", "2024-01-03", json!({"spend": "2.00"}))],
        1,
        1,
    )]);

    let records =
        collect_records(&api, "campaign_daily_report", &config(), "2024-01-01", yesterday_is("2024-01-15"))
            .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(api.request_count(), 1);
    assert_eq!(api.window(0), ("2024-01-01".to_string(), "2024-01-15".to_string()));
}

#[test]
fn test_sixty_days_is_two_windows() {
    let api = FakeApi::new(vec![ApiResponse::ok(vec![], 1, 1), ApiResponse::ok(vec![], 1, 1)]);

    let records =
        collect_records(&api, "campaign_daily_report", &config(), "2024-01-01", yesterday_is("2024-03-01"))
            .unwrap();

    assert!(records.is_empty());
    assert_eq!(api.request_count(), 2);
    assert_eq!(api.window(0), ("2024-01-01".to_string(), "2024-01-31".to_string()));
    assert_eq!(api.window(1), ("2024-02-01".to_string(), "2024-03-01".to_string()));
}

#[test]
fn test_pages_within_window_then_done() {
    let api = FakeApi::new(vec![
        ApiResponse::ok(vec![campaign_row("1", "2024-01-02", json!({}))], 1, 3),
        ApiResponse::ok(vec![campaign_row("2", "2024-01-02", json!({}))], 2, 3),
        ApiResponse::ok(vec![campaign_row("3", "2024-01-02", json!({}))], 3, 3),
    ]);

    let records =
        collect_records(&api, "campaign_daily_report", &config(), "2024-01-01", yesterday_is("2024-01-15"))
            .unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(api.request_count(), 3);
    for (index, page) in ["1", "2", "3"].iter().enumerate() {
        assert_eq!(api.param(index, "page").as_deref(), Some(*page));
        assert_eq!(api.window(index), ("2024-01-01".to_string(), "2024-01-15".to_string()));
    }
}

#[test]
fn test_start_after_yesterday_issues_no_request() {
    let api = FakeApi::new(vec![]);
    let records =
        collect_records(&api, "campaign_daily_report", &config(), "2024-01-16", yesterday_is("2024-01-15"))
            .unwrap();
    assert!(records.is_empty());
    assert_eq!(api.request_count(), 0);
}

#[test]
fn test_chunked_stream_merges_by_dimension_key() {
    let mut config = config();
    config.max_metrics_per_request = 100;
    let descriptor = catalog::find("campaigns_in_app_event_metrics_by_day").unwrap();
    let metric_names = descriptor.report().unwrap().metrics.clone();
    assert!(metric_names.len() > 100);

    let metrics_for = |names: &[String], value: &str| -> Value {
        let map: Map<String, Value> = names.iter().map(|n| (n.clone(), json!(value))).collect();
        Value::Object(map)
    };
    let first = &metric_names[..100];
    let second = &metric_names[100..];

    let api = FakeApi::new(vec![
        ApiResponse::ok(
            vec![
                campaign_row("1", "2024-01-02", metrics_for(first, "a")),
                campaign_row("2", "2024-01-02", metrics_for(first, "b")),
            ],
            1,
            1,
        ),
        ApiResponse::ok(
            vec![
                campaign_row("2", "2024-01-02", metrics_for(second, "b")),
                campaign_row("1", "2024-01-02", metrics_for(second, "a")),
            ],
            1,
            1,
        ),
    ]);

    let records = collect_records(
        &api,
        "campaigns_in_app_event_metrics_by_day",
        &config,
        "2024-01-01",
        yesterday_is("2024-01-15"),
    )
    .unwrap();

    assert_eq!(api.request_count(), 2);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].dimensions["campaign_id"], json!("1"));
    assert_eq!(records[0].metrics.len(), metric_names.len());
    assert!(records[1].metrics.values().all(|v| v == "b"));

    let sent: Vec<String> = serde_json::from_str(&api.param(1, "metrics").unwrap()).unwrap();
    assert_eq!(sent, second.to_vec());
}

#[test]
fn test_upstream_error_aborts_run() {
    let api = FakeApi::new(vec![
        ApiResponse::ok(vec![campaign_row("1", "2024-01-02", json!({}))], 1, 2),
        ApiResponse {
            code: 51021,
            message: "Too many requests".to_string(),
            ..ApiResponse::default()
        },
    ]);

    let err =
        collect_records(&api, "campaign_daily_report", &config(), "2024-01-01", yesterday_is("2024-01-15"))
            .unwrap_err();
    let upstream = err.downcast_ref::<UpstreamReportError>().unwrap();
    assert_eq!(upstream.code, 51021);
    assert_eq!(upstream.message, "Too many requests");
}

#[test]
fn test_stalled_endpoint_is_a_loop() {
    // the server keeps reporting page 1 of 3
    let api = FakeApi::new(vec![
        ApiResponse::ok(vec![campaign_row("1", "2024-01-02", json!({}))], 1, 3),
        ApiResponse::ok(vec![campaign_row("1", "2024-01-02", json!({}))], 1, 3),
        ApiResponse::ok(vec![campaign_row("1", "2024-01-02", json!({}))], 1, 3),
    ]);

    let err =
        collect_records(&api, "campaign_daily_report", &config(), "2024-01-01", yesterday_is("2024-01-15"))
            .unwrap_err();
    assert!(err.downcast_ref::<PaginationLoopError>().is_some());
    assert_eq!(api.request_count(), 2);
}

#[test]
fn test_request_parameters() {
    let mut config = config();
    config.include_deleted = false;
    let api = FakeApi::new(vec![ApiResponse::ok(vec![], 1, 1)]);

    collect_records(&api, "ad_reservation_daily_report", &config, "2024-01-01", yesterday_is("2024-01-15"))
        .unwrap();

    assert_eq!(api.param(0, "advertiser_id").as_deref(), Some("42"));
    assert_eq!(api.param(0, "data_level").as_deref(), Some("AUCTION_AD"));
    assert_eq!(api.param(0, "report_type").as_deref(), Some("BASIC"));
    let filtering: Value = serde_json::from_str(&api.param(0, "filtering").unwrap()).unwrap();
    assert_eq!(filtering[0]["field_name"], json!("ad_status"));
    assert_eq!(filtering[0]["filter_value"], json!(r#"["STATUS_NOT_DELETE"]"#));
    assert_eq!(filtering[1]["field_name"], json!("buying_type"));
}

#[test]
fn test_sync_resumes_from_file_bookmark() {
    let dir = TempDir::new().unwrap();
    let state_path = dir.path().join("state.json");
    let descriptor = catalog::find("campaign_daily_report").unwrap();
    let config = config();

    // first run covers January 1st to 15th
    let api = FakeApi::new(vec![ApiResponse::ok(
        vec![
            campaign_row("1", "2024-01-10", json!({"spend": "1"})),
            campaign_row("1", "2024-01-12", json!({"spend": "2"})),
        ],
        1,
        1,
    )]);
    let store = FileBookmarkStore::open(&state_path).unwrap();
    let mut emitted = Vec::new();
    let stats = sync_stream(&api, &store, &descriptor, &config, yesterday_is("2024-01-15"), |row| {
        emitted.push(row);
        Ok(())
    })
    .unwrap();
    assert_eq!(stats.records, 2);
    assert_eq!(emitted[1]["spend"], json!("2"));
    assert_eq!(emitted[1]["stat_time_day"], json!("2024-01-12 00:00:00"));
    drop(store);

    // second run resumes at the bookmarked day
    let store = FileBookmarkStore::open(&state_path).unwrap();
    let bookmark = store.get_bookmark("campaign_daily_report").unwrap().unwrap();
    assert_eq!(bookmark.value, "2024-01-12 00:00:00");
    assert_eq!(bookmark.replication_key, "stat_time_day");

    let api = FakeApi::new(vec![ApiResponse::ok(vec![], 1, 1)]);
    sync_stream(&api, &store, &descriptor, &config, yesterday_is("2024-01-20"), |_| Ok(())).unwrap();
    assert_eq!(api.window(0), ("2024-01-12".to_string(), "2024-01-20".to_string()));
}

#[test]
fn test_all_entity_streams_sync() {
    let config = config();
    let store = InMemoryBookmarkStore::new();

    for (name, endpoint) in [
        ("ad_accounts", Endpoint::Advertiser),
        ("campaigns", Endpoint::Campaign),
        ("ad_groups", Endpoint::AdGroup),
        ("ads", Endpoint::Ad),
    ] {
        let api = FakeApi::new(vec![ApiResponse::ok(vec![json!({"id": name})], 1, 1)]);
        let descriptor = catalog::find(name).unwrap();
        let mut rows = Vec::new();
        sync_stream(&api, &store, &descriptor, &config, yesterday_is("2024-01-15"), |row| {
            rows.push(row);
            Ok(())
        })
        .unwrap();

        assert_eq!(rows, vec![json!({"id": name}).as_object().unwrap().clone()]);
        assert_eq!(api.requests.borrow()[0].0, endpoint);
    }
    assert!(store.list_bookmarks().unwrap().is_empty());
}
