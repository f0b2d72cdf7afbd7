//! Declarative stream descriptors

use crate::api::Endpoint;

/// Report family requested from the integrated report endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportType {
    Basic,
    Audience,
}

impl ReportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::Basic => "BASIC",
            ReportType::Audience => "AUDIENCE",
        }
    }
}

/// Entity level the report aggregates at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataLevel {
    Ad,
    AdGroup,
    Campaign,
}

impl DataLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataLevel::Ad => "AUCTION_AD",
            DataLevel::AdGroup => "AUCTION_ADGROUP",
            DataLevel::Campaign => "AUCTION_CAMPAIGN",
        }
    }

    /// Field the status filter applies to at this level
    pub fn status_field(&self) -> &'static str {
        match self {
            DataLevel::Ad => "ad_status",
            DataLevel::AdGroup => "adgroup_status",
            DataLevel::Campaign => "campaign_status",
        }
    }
}

/// Report request configuration for one stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSpec {
    pub report_type: ReportType,
    pub data_level: DataLevel,
    pub dimensions: Vec<String>,
    pub metrics: Vec<String>,
    pub buying_types: Vec<String>,
    /// Split `metrics` across sequential requests and merge by dimension key
    pub chunked: bool,
    /// Lifetime totals with no date window
    pub lifetime: bool,
}

/// How a stream's rows are obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamKind {
    /// Date-windowed (or lifetime) integrated report
    Report(ReportSpec),
    /// Page-only entity listing
    Entity(Endpoint),
}

/// One extractable stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamDescriptor {
    pub name: String,
    pub kind: StreamKind,
    pub primary_keys: Vec<String>,
    pub replication_key: Option<String>,
}

impl StreamDescriptor {
    pub fn report(&self) -> Option<&ReportSpec> {
        match &self.kind {
            StreamKind::Report(spec) => Some(spec),
            StreamKind::Entity(_) => None,
        }
    }

    /// Whether this stream resumes from a bookmark
    pub fn is_incremental(&self) -> bool {
        self.replication_key.is_some()
            && self.report().is_some_and(|spec| !spec.lifetime)
    }

    pub fn kind_label(&self) -> &'static str {
        match &self.kind {
            StreamKind::Report(spec) if spec.lifetime => "lifetime report",
            StreamKind::Report(spec) if spec.chunked => "report (chunked)",
            StreamKind::Report(_) => "report",
            StreamKind::Entity(_) => "entity",
        }
    }
}
