//! Pull-based sync of one date-windowed report stream

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use log::{debug, info};
use std::collections::VecDeque;

use super::chunker::chunk_metrics;
use super::loop_guard;
use super::merger::ChunkMerger;
use super::paginator::ReportWindowPaginator;
use super::timing::SharedClock;
use crate::api::wire::{ApiResponse, PageInfo};
use crate::api::{Endpoint, ReportApi, report_query};
use crate::config::TapConfig;
use crate::models::{Cursor, Record, ReportSpec, StreamDescriptor};

/// Lazy record sequence for one report stream
///
/// Each pull that finds the buffer empty issues the requests for exactly one
/// cursor. The paginator only advances once the previous cursor's records
/// have all been yielded. After the first error the iterator is fused.
pub struct SyncOrchestrator<'a, A: ReportApi> {
    api: A,
    config: &'a TapConfig,
    stream: &'a str,
    spec: &'a ReportSpec,
    chunked: bool,
    chunks: Vec<Vec<String>>,
    paginator: ReportWindowPaginator,
    buffer: VecDeque<Record>,
    pending: Option<PageInfo>,
    requests: usize,
    failed: bool,
}

impl<'a, A: ReportApi> SyncOrchestrator<'a, A> {
    /// Prepare a sync of `descriptor` beginning at `start`
    ///
    /// No request is issued until the first record is pulled.
    pub fn new(
        api: A,
        descriptor: &'a StreamDescriptor,
        config: &'a TapConfig,
        start: NaiveDate,
        clock: SharedClock,
    ) -> Result<Self> {
        let Some(spec) = descriptor.report() else {
            bail!("Stream {} is not a report stream", descriptor.name);
        };
        if spec.lifetime {
            bail!("Stream {} is a lifetime report and has no date windows", descriptor.name);
        }

        // Any stream wider than the per-request capacity is split as well
        let chunked = spec.chunked || spec.metrics.len() > config.max_metrics_per_request;
        let chunks = if chunked {
            chunk_metrics(&spec.metrics, config.max_metrics_per_request)
        } else {
            vec![spec.metrics.clone()]
        };
        info!(
            "Syncing {} from {} ({} metric chunk(s))",
            descriptor.name,
            start,
            chunks.len()
        );

        Ok(Self {
            api,
            config,
            stream: &descriptor.name,
            spec,
            chunked,
            chunks,
            paginator: ReportWindowPaginator::new(start, config.max_window_days, clock),
            buffer: VecDeque::new(),
            pending: None,
            requests: 0,
            failed: false,
        })
    }

    /// Requests issued so far
    pub fn requests(&self) -> usize {
        self.requests
    }

    /// Windows whose every page has been fetched and handed out
    pub fn windows_completed(&self) -> usize {
        self.paginator.windows_completed()
    }

    /// Cursor of the next (or in-flight) request
    pub fn current_cursor(&self) -> Option<Cursor> {
        self.paginator.current_value()
    }

    /// Apply the pending advance, then fetch the next cursor into the buffer
    ///
    /// Returns false once the paginator is done.
    fn step(&mut self) -> Result<bool> {
        if let Some(page_info) = self.pending.take() {
            let previous = self.paginator.current_value();
            self.paginator.advance(page_info);
            loop_guard::check(previous.as_ref(), self.paginator.current_value().as_ref())?;
        }

        let Some(cursor) = self.paginator.current_value() else {
            info!("Finished {} after {} request(s)", self.stream, self.requests);
            return Ok(false);
        };

        let (records, page_info) = if self.chunked {
            self.fetch_chunked(&cursor)?
        } else {
            self.fetch_whole(&cursor)?
        };
        debug!("{} record(s) for {} at {}", records.len(), self.stream, cursor);

        self.buffer.extend(records);
        self.pending = Some(page_info);
        Ok(true)
    }

    fn request(&mut self, cursor: &Cursor, metrics: &[String]) -> Result<ApiResponse> {
        let query = report_query(self.config, self.spec, cursor, metrics)?;
        self.requests += 1;
        self.api
            .get(Endpoint::Report, &query)
            .with_context(|| format!("Report request failed for {} at {}", self.stream, cursor))
    }

    fn fetch_whole(&mut self, cursor: &Cursor) -> Result<(Vec<Record>, PageInfo)> {
        info!("Requesting {} for {}", self.stream, cursor);
        let spec = self.spec;
        let response = self.request(cursor, &spec.metrics)?;
        let page_info = response.page_info();
        let records = response
            .into_rows()
            .into_iter()
            .map(Record::from_row)
            .collect::<Result<Vec<_>>>()?;
        Ok((records, page_info))
    }

    /// One request per metric chunk, merged by dimension key
    ///
    /// The last chunk's page info drives pagination.
    fn fetch_chunked(&mut self, cursor: &Cursor) -> Result<(Vec<Record>, PageInfo)> {
        let mut merger = ChunkMerger::begin(&self.spec.dimensions);
        let mut page_info = PageInfo::default();
        let total = self.chunks.len();

        for index in 0..total {
            let chunk = self.chunks[index].clone();
            info!(
                "Requesting {} for {} (metric chunk {}/{})",
                self.stream,
                cursor,
                index + 1,
                total
            );
            let response = self.request(cursor, &chunk)?;
            page_info = response.page_info();
            merger.ingest(index, response.into_rows())?;
        }

        Ok((merger.finish(), page_info))
    }
}

impl<A: ReportApi> Iterator for SyncOrchestrator<'_, A> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(record) = self.buffer.pop_front() {
                return Some(Ok(record));
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
