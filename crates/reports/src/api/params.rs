//! Query parameter construction
//!
//! Field names here are the wire contract with the API. List-valued
//! parameters are JSON-encoded strings.

use anyhow::Result;
use serde_json::json;

use super::Endpoint;
use crate::config::TapConfig;
use crate::models::{Cursor, ReportSpec};

type Query = Vec<(String, String)>;

/// Parameters for one date-windowed report request
///
/// `metrics` is the active chunk, not necessarily the stream's full list.
pub fn report_query(
    config: &TapConfig,
    spec: &ReportSpec,
    cursor: &Cursor,
    metrics: &[String],
) -> Result<Query> {
    let mut query = base_report_query(config, spec, cursor.page, metrics)?;
    query.push(("start_date".into(), cursor.window.start_str()));
    query.push(("end_date".into(), cursor.window.end_str()));
    query.push(("filtering".into(), report_filtering(config, spec)?));
    Ok(query)
}

/// Parameters for a lifetime report request (no date window)
pub fn lifetime_report_query(
    config: &TapConfig,
    spec: &ReportSpec,
    page: u32,
    metrics: &[String],
) -> Result<Query> {
    let mut query = base_report_query(config, spec, page, metrics)?;
    query.push(("query_lifetime".into(), "true".into()));
    Ok(query)
}

fn base_report_query(
    config: &TapConfig,
    spec: &ReportSpec,
    page: u32,
    metrics: &[String],
) -> Result<Query> {
    Ok(vec![
        ("advertiser_id".into(), config.advertiser_id.clone()),
        ("service_type".into(), "AUCTION".into()),
        ("report_type".into(), spec.report_type.as_str().into()),
        ("data_level".into(), spec.data_level.as_str().into()),
        ("dimensions".into(), serde_json::to_string(&spec.dimensions)?),
        ("metrics".into(), serde_json::to_string(metrics)?),
        ("page".into(), page.to_string()),
        ("page_size".into(), config.page_size.to_string()),
    ])
}

fn report_filtering(config: &TapConfig, spec: &ReportSpec) -> Result<String> {
    let mut filters = vec![json!({
        "field_name": spec.data_level.status_field(),
        "filter_type": "IN",
        "filter_value": serde_json::to_string(&[config.status_filter()])?,
    })];
    if !spec.buying_types.is_empty() {
        filters.push(json!({
            "field_name": "buying_type",
            "filter_type": "IN",
            "filter_value": serde_json::to_string(&spec.buying_types)?,
        }));
    }
    Ok(serde_json::to_string(&filters)?)
}

/// Parameters for an entity listing page
pub fn entity_query(config: &TapConfig, endpoint: Endpoint, page: u32) -> Result<Query> {
    if !endpoint.is_paged() {
        return Ok(vec![(
            "advertiser_ids".into(),
            serde_json::to_string(&[&config.advertiser_id])?,
        )]);
    }

    Ok(vec![
        ("advertiser_id".into(), config.advertiser_id.clone()),
        ("page".into(), page.to_string()),
        ("page_size".into(), config.page_size.to_string()),
        (
            "filtering".into(),
            json!({"primary_status": config.status_filter()}).to_string(),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DataLevel, DateWindow, ReportType};
    use chrono::NaiveDate;
    use serde_json::Value;

    fn config() -> TapConfig {
        TapConfig::new("token", "42", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
    }

    fn spec(buying_types: &[&str]) -> ReportSpec {
        ReportSpec {
            report_type: ReportType::Basic,
            data_level: DataLevel::Ad,
            dimensions: vec!["ad_id".into(), "stat_time_day".into()],
            metrics: vec!["spend".into(), "clicks".into()],
            buying_types: buying_types.iter().map(|s| s.to_string()).collect(),
            chunked: false,
            lifetime: false,
        }
    }

    fn get<'a>(query: &'a Query, key: &str) -> &'a str {
        query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .unwrap_or_else(|| panic!("missing {key}"))
    }

    #[test]
    fn test_report_query() {
        let window = DateWindow::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        )
        .unwrap();
        let cursor = Cursor::first_page(window).with_page(2);
        let metrics = vec!["spend".to_string()];
        let query = report_query(&config(), &spec(&[]), &cursor, &metrics).unwrap();

        assert_eq!(get(&query, "advertiser_id"), "42");
        assert_eq!(get(&query, "report_type"), "BASIC");
        assert_eq!(get(&query, "data_level"), "AUCTION_AD");
        assert_eq!(get(&query, "dimensions"), r#"["ad_id","stat_time_day"]"#);
        assert_eq!(get(&query, "metrics"), r#"["spend"]"#);
        assert_eq!(get(&query, "start_date"), "2024-01-01");
        assert_eq!(get(&query, "end_date"), "2024-01-31");
        assert_eq!(get(&query, "page"), "2");
        assert_eq!(get(&query, "page_size"), "1000");

        let filtering: Value = serde_json::from_str(get(&query, "filtering")).unwrap();
        assert_eq!(filtering[0]["field_name"], "ad_status");
        assert_eq!(filtering[0]["filter_type"], "IN");
        assert_eq!(filtering[0]["filter_value"], r#"["STATUS_ALL"]"#);
        assert_eq!(filtering.as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_report_query_buying_types() {
        let window = DateWindow::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        )
        .unwrap();
        let mut config = config();
        config.include_deleted = false;
        let spec = spec(&["RESERVATION_TOP_VIEW", "RESERVATION_RF"]);
        let query = report_query(&config, &spec, &Cursor::first_page(window), &spec.metrics).unwrap();

        let filtering: Value = serde_json::from_str(get(&query, "filtering")).unwrap();
        assert_eq!(filtering[0]["filter_value"], r#"["STATUS_NOT_DELETE"]"#);
        assert_eq!(filtering[1]["field_name"], "buying_type");
        assert_eq!(
            filtering[1]["filter_value"],
            r#"["RESERVATION_TOP_VIEW","RESERVATION_RF"]"#
        );
    }

    #[test]
    fn test_lifetime_query_has_no_dates() {
        let query = lifetime_report_query(&config(), &spec(&[]), 1, &["ad_name".to_string()]).unwrap();
        assert_eq!(get(&query, "query_lifetime"), "true");
        assert!(query.iter().all(|(k, _)| k != "start_date" && k != "end_date"));
    }

    #[test]
    fn test_entity_query() {
        let query = entity_query(&config(), Endpoint::Campaign, 3).unwrap();
        assert_eq!(get(&query, "page"), "3");
        assert_eq!(get(&query, "filtering"), r#"{"primary_status":"STATUS_ALL"}"#);

        let query = entity_query(&config(), Endpoint::Advertiser, 1).unwrap();
        assert_eq!(query, vec![("advertiser_ids".to_string(), r#"["42"]"#.to_string())]);
    }
}
