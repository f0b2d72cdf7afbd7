//! Page-only sync for entity listings and lifetime reports

use anyhow::{Context, Result, bail};
use log::{debug, info};
use serde_json::{Map, Value};
use std::collections::VecDeque;

use super::loop_guard;
use crate::api::wire::ApiResponse;
use crate::api::{Endpoint, ReportApi, entity_query, lifetime_report_query};
use crate::config::TapConfig;
use crate::models::{Record, ReportSpec, StreamDescriptor, StreamKind};

#[derive(Debug, Clone, Copy)]
enum Source<'a> {
    Entity(Endpoint),
    Lifetime(&'a ReportSpec),
}

/// Lazy flat-row sequence for a stream without date windows
///
/// Pages advance while the server reports `page < total_page`; a response
/// without page info is a single page.
pub struct PagedSync<'a, A: ReportApi> {
    api: A,
    config: &'a TapConfig,
    stream: &'a str,
    source: Source<'a>,
    page: Option<u32>,
    buffer: VecDeque<Map<String, Value>>,
    requests: usize,
    failed: bool,
}

impl<'a, A: ReportApi> PagedSync<'a, A> {
    pub fn new(api: A, descriptor: &'a StreamDescriptor, config: &'a TapConfig) -> Result<Self> {
        let source = match &descriptor.kind {
            StreamKind::Entity(endpoint) => Source::Entity(*endpoint),
            StreamKind::Report(spec) if spec.lifetime => {
                if spec.chunked {
                    bail!("Lifetime report {} cannot be metric-chunked", descriptor.name);
                }
                Source::Lifetime(spec)
            }
            StreamKind::Report(_) => {
                bail!("Stream {} is a date-windowed report", descriptor.name);
            }
        };
        info!("Syncing {}", descriptor.name);

        Ok(Self {
            api,
            config,
            stream: &descriptor.name,
            source,
            page: Some(1),
            buffer: VecDeque::new(),
            requests: 0,
            failed: false,
        })
    }

    /// Requests issued so far
    pub fn requests(&self) -> usize {
        self.requests
    }

    fn fetch(&mut self, page: u32) -> Result<ApiResponse> {
        let (endpoint, query) = match self.source {
            Source::Entity(endpoint) => (endpoint, entity_query(self.config, endpoint, page)?),
            Source::Lifetime(spec) => (
                Endpoint::Report,
                lifetime_report_query(self.config, spec, page, &spec.metrics)?,
            ),
        };
        debug!("Requesting {} page {}", self.stream, page);
        self.requests += 1;
        self.api
            .get(endpoint, &query)
            .with_context(|| format!("Request failed for {} page {}", self.stream, page))
    }

    fn flatten_row(&self, row: Value) -> Result<Map<String, Value>> {
        match (self.source, row) {
            (Source::Lifetime(_), row) => Ok(Record::from_row(row)?.flatten()),
            (Source::Entity(_), Value::Object(map)) => Ok(map),
            (Source::Entity(_), other) => {
                bail!("Unexpected {} row, expected an object: {}", self.stream, other)
            }
        }
    }

    fn step(&mut self) -> Result<bool> {
        let Some(page) = self.page else {
            info!("Finished {} after {} request(s)", self.stream, self.requests);
            return Ok(false);
        };

        let response = self.fetch(page)?;
        let page_info = response.page_info();
        let paged = match self.source {
            Source::Entity(endpoint) => endpoint.is_paged(),
            Source::Lifetime(_) => true,
        };
        let next = (paged && page_info.has_next()).then(|| page_info.page + 1);
        loop_guard::check(Some(&page), next.as_ref())?;

        for row in response.into_rows() {
            let flat = self.flatten_row(row)?;
            self.buffer.push_back(flat);
        }
        self.page = next;
        Ok(true)
    }
}

impl<A: ReportApi> Iterator for PagedSync<'_, A> {
    type Item = Result<Map<String, Value>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(row) = self.buffer.pop_front() {
                return Some(Ok(row));
            }
            if self.failed {
                return None;
            }
            match self.step() {
                Ok(true) => continue,
                Ok(false) => {
                    self.failed = true;
                    return None;
                }
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }
    }
}
