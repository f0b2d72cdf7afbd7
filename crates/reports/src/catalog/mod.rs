//! Static stream catalog
//!
//! Every stream is a [`StreamDescriptor`] value built from a handful of
//! report families; there is no per-stream code.

pub mod metrics;

use crate::api::Endpoint;
use crate::models::{DataLevel, ReportSpec, ReportType, StreamDescriptor, StreamKind};

/// Replication key of daily reports
pub const DAY_KEY: &str = "stat_time_day";

const AUCTION: &[&str] = &["AUCTION"];
const RESERVATION: &[&str] = &["RESERVATION_TOP_VIEW", "RESERVATION_RF"];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn id_field(level: DataLevel) -> &'static str {
    match level {
        DataLevel::Ad => "ad_id",
        DataLevel::AdGroup => "adgroup_id",
        DataLevel::Campaign => "campaign_id",
    }
}

fn entity(name: &str, endpoint: Endpoint, primary_key: &str) -> StreamDescriptor {
    StreamDescriptor {
        name: name.to_string(),
        kind: StreamKind::Entity(endpoint),
        primary_keys: vec![primary_key.to_string()],
        replication_key: None,
    }
}

/// Daily report grouped by the level's id plus `extra` dimensions
fn daily_report(
    name: String,
    report_type: ReportType,
    level: DataLevel,
    extra: &[&str],
    metric_names: &[&str],
    buying_types: &[&str],
) -> StreamDescriptor {
    let mut dimensions = vec![id_field(level).to_string()];
    dimensions.extend(strings(extra));
    dimensions.push(DAY_KEY.to_string());

    let chunked = metric_names.len() > metrics::MAX_METRICS_PER_REQUEST;
    StreamDescriptor {
        name,
        primary_keys: dimensions.clone(),
        replication_key: Some(DAY_KEY.to_string()),
        kind: StreamKind::Report(ReportSpec {
            report_type,
            data_level: level,
            dimensions,
            metrics: strings(metric_names),
            buying_types: strings(buying_types),
            chunked,
            lifetime: false,
        }),
    }
}

fn lifetime_report(name: &str, level: DataLevel, metric_names: &[&str]) -> StreamDescriptor {
    let dimensions = vec![id_field(level).to_string()];
    StreamDescriptor {
        name: name.to_string(),
        primary_keys: dimensions.clone(),
        replication_key: None,
        kind: StreamKind::Report(ReportSpec {
            report_type: ReportType::Basic,
            data_level: level,
            dimensions,
            metrics: strings(metric_names),
            buying_types: Vec::new(),
            chunked: false,
            lifetime: true,
        }),
    }
}

/// All streams, in discovery order
pub fn all_streams() -> Vec<StreamDescriptor> {
    let mut streams = vec![
        entity("ad_accounts", Endpoint::Advertiser, "advertiser_id"),
        entity("campaigns", Endpoint::Campaign, "campaign_id"),
        entity("ad_groups", Endpoint::AdGroup, "adgroup_id"),
        entity("ads", Endpoint::Ad, "ad_id"),
        lifetime_report("ads_attribute_metrics", DataLevel::Ad, metrics::AD_ATTRIBUTE_METRICS),
    ];

    let families: [(&str, &[&str]); 6] = [
        ("basic_data", metrics::BASIC_DATA_METRICS),
        ("video_play", metrics::VIDEO_PLAY_METRICS),
        ("engagement", metrics::ENGAGEMENT_METRICS),
        ("attribution", metrics::ATTRIBUTION_METRICS),
        ("page_event", metrics::PAGE_EVENT_METRICS),
        ("in_app_event", metrics::IN_APP_EVENT_METRICS),
    ];
    for (prefix, level) in [("ads", DataLevel::Ad), ("campaigns", DataLevel::Campaign)] {
        for (family, list) in families {
            streams.push(daily_report(
                format!("{prefix}_{family}_metrics_by_day"),
                ReportType::Basic,
                level,
                &[],
                list,
                &[],
            ));
        }
    }

    for (prefix, level) in [
        ("ad", DataLevel::Ad),
        ("adgroup", DataLevel::AdGroup),
        ("campaign", DataLevel::Campaign),
    ] {
        for (suffix, buying_types) in [("daily_report", AUCTION), ("reservation_daily_report", RESERVATION)] {
            streams.push(daily_report(
                format!("{prefix}_{suffix}"),
                ReportType::Basic,
                level,
                &[],
                metrics::BASIC_DATA_METRICS,
                buying_types,
            ));
        }
    }

    let audiences: [(&str, &[&str]); 4] = [
        ("age_gender", &["age", "gender"]),
        ("country", &["country_code"]),
        ("language", &["language"]),
        ("platform", &["platform"]),
    ];
    for (prefix, level) in [("ad", DataLevel::Ad), ("campaign", DataLevel::Campaign)] {
        for (audience, extra) in audiences {
            streams.push(daily_report(
                format!("{prefix}_{audience}_report"),
                ReportType::Audience,
                level,
                extra,
                metrics::AUDIENCE_METRICS,
                &[],
            ));
        }
    }

    streams
}

/// Look up a stream by name
pub fn find(name: &str) -> Option<StreamDescriptor> {
    all_streams().into_iter().find(|s| s.name == name)
}
