//! Reporting API integration
//!
//! This module provides:
//! - The `ReportApi` seam the sync engine talks through
//! - A blocking HTTP client with retry and response validation
//! - Request parameter construction for report and entity endpoints

mod client;
mod params;

pub use client::{ReportApi, ReportClient, TransportError, UpstreamReportError, validate_response};
pub use params::{entity_query, lifetime_report_query, report_query};

/// Addressable API endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Integrated report endpoint
    Report,
    /// Advertiser account info
    Advertiser,
    Campaign,
    AdGroup,
    Ad,
}

impl Endpoint {
    /// Path relative to the API base URL
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Report => "/report/integrated/get/",
            Endpoint::Advertiser => "/advertiser/info/",
            Endpoint::Campaign => "/campaign/get/",
            Endpoint::AdGroup => "/adgroup/get/",
            Endpoint::Ad => "/ad/get/",
        }
    }

    /// Whether a non-"OK" body on a 200 response is accepted instead of raised.
    ///
    /// Only the advertiser-info endpoint: it reports permission problems this
    /// way and the account stream is treated as best-effort.
    pub fn tolerates_upstream_errors(&self) -> bool {
        matches!(self, Endpoint::Advertiser)
    }

    /// Whether the endpoint is paginated
    pub fn is_paged(&self) -> bool {
        !matches!(self, Endpoint::Advertiser)
    }
}

/// API response types
pub mod wire {
    use serde::Deserialize;
    use serde_json::Value;

    /// Envelope returned by every endpoint
    #[derive(Debug, Clone, Default, Deserialize)]
    pub struct ApiResponse {
        #[serde(default)]
        pub code: i64,
        #[serde(default)]
        pub message: String,
        #[serde(default)]
        pub request_id: Option<String>,
        #[serde(default)]
        pub data: Option<ApiData>,
    }

    /// Payload of a listing response
    #[derive(Debug, Clone, Default, Deserialize)]
    pub struct ApiData {
        #[serde(default)]
        pub list: Vec<Value>,
        #[serde(default)]
        pub page_info: Option<PageInfo>,
    }

    /// Server-reported position within a paginated result
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
    pub struct PageInfo {
        #[serde(default)]
        pub page: u32,
        #[serde(default)]
        pub total_page: u32,
        #[serde(default)]
        pub page_size: Option<u32>,
        #[serde(default)]
        pub total_number: Option<u64>,
    }

    impl PageInfo {
        pub fn new(page: u32, total_page: u32) -> Self {
            Self {
                page,
                total_page,
                ..Self::default()
            }
        }

        pub fn has_next(&self) -> bool {
            self.page < self.total_page
        }
    }

    impl ApiResponse {
        /// Successful response carrying `rows` at the given page position
        pub fn ok(rows: Vec<Value>, page: u32, total_page: u32) -> Self {
            Self {
                code: 0,
                message: "OK".to_string(),
                request_id: None,
                data: Some(ApiData {
                    list: rows,
                    page_info: Some(PageInfo::new(page, total_page)),
                }),
            }
        }

        pub fn is_ok(&self) -> bool {
            self.message == "OK"
        }

        /// Page info, zeroed when absent
        pub fn page_info(&self) -> PageInfo {
            self.data
                .as_ref()
                .and_then(|d| d.page_info)
                .unwrap_or_default()
        }

        pub fn into_rows(self) -> Vec<Value> {
            self.data.map(|d| d.list).unwrap_or_default()
        }
    }
}
