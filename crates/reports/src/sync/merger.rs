//! Merge of per-chunk report rows into whole records

use anyhow::{Result, bail};
use serde_json::Value;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::models::{DimensionKey, Record};

/// Joins the rows of every metric chunk of one cursor by dimension key
///
/// For a key seen in several chunks, the first chunk's metrics are the base
/// and later chunks only add metric names not already present.
#[derive(Debug)]
pub struct ChunkMerger {
    dimensions: Vec<String>,
    order: Vec<DimensionKey>,
    records: HashMap<DimensionKey, Record>,
    next_chunk: usize,
}

impl ChunkMerger {
    /// Start merging for one cursor, keyed by the ordered dimension names
    pub fn begin(dimensions: &[String]) -> Self {
        Self {
            dimensions: dimensions.to_vec(),
            order: Vec::new(),
            records: HashMap::new(),
            next_chunk: 0,
        }
    }

    /// Number of chunks ingested so far
    #[cfg(test)]
    pub fn chunks_ingested(&self) -> usize {
        self.next_chunk
    }

    /// Fold in the rows of chunk `chunk_index`
    ///
    /// Chunks must arrive in order, each exactly once.
    pub fn ingest(&mut self, chunk_index: usize, rows: Vec<Value>) -> Result<()> {
        if chunk_index != self.next_chunk {
            bail!(
                "Metric chunk {} ingested out of order; expected chunk {}",
                chunk_index,
                self.next_chunk
            );
        }
        self.next_chunk += 1;

        for row in rows {
            let record = Record::from_row(row)?;
            let key = record.key(&self.dimensions);
            match self.records.entry(key) {
                Entry::Occupied(mut existing) => {
                    let merged = &mut existing.get_mut().metrics;
                    for (name, value) in record.metrics {
                        merged.entry(name).or_insert(value);
                    }
                }
                Entry::Vacant(slot) => {
                    self.order.push(slot.key().clone());
                    slot.insert(record);
                }
            }
        }
        Ok(())
    }

    /// One record per distinct dimension key, in first-seen order
    pub fn finish(self) -> Vec<Record> {
        let Self {
            order, mut records, ..
        } = self;
        order
            .into_iter()
            .filter_map(|key| records.remove(&key))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dims() -> Vec<String> {
        vec!["ad_id".to_string(), "stat_time_day".to_string()]
    }

    fn row(ad: &str, day: &str, metrics: Value) -> Value {
        json!({
            "dimensions": {"ad_id": ad, "stat_time_day": day},
            "metrics": metrics
        })
    }

    #[test]
    fn test_disjoint_chunks_union() {
        let mut merger = ChunkMerger::begin(&dims());
        merger
            .ingest(0, vec![row("1", "2024-01-01", json!({"a": "1", "b": "2"}))])
            .unwrap();
        merger
            .ingest(1, vec![row("1", "2024-01-01", json!({"c": "3", "d": "4"}))])
            .unwrap();

        let records = merger.finish();
        assert_eq!(records.len(), 1);
        assert_eq!(
            Value::Object(records[0].metrics.clone()),
            json!({"a": "1", "b": "2", "c": "3", "d": "4"})
        );
    }

    #[test]
    fn test_first_seen_value_wins() {
        let mut merger = ChunkMerger::begin(&dims());
        merger
            .ingest(0, vec![row("1", "2024-01-01", json!({"a": "first"}))])
            .unwrap();
        merger
            .ingest(1, vec![row("1", "2024-01-01", json!({"a": "second", "b": "2"}))])
            .unwrap();

        let records = merger.finish();
        assert_eq!(records[0].metrics["a"], json!("first"));
        assert_eq!(records[0].metrics["b"], json!("2"));
    }

    #[test]
    fn test_first_seen_key_order() {
        let mut merger = ChunkMerger::begin(&dims());
        merger
            .ingest(
                0,
                vec![
                    row("2", "2024-01-01", json!({"a": "1"})),
                    row("1", "2024-01-01", json!({"a": "1"})),
                ],
            )
            .unwrap();
        merger
            .ingest(
                1,
                vec![
                    row("3", "2024-01-01", json!({"b": "1"})),
                    row("1", "2024-01-01", json!({"b": "1"})),
                ],
            )
            .unwrap();

        let ids: Vec<Value> = merger
            .finish()
            .into_iter()
            .map(|r| r.dimensions["ad_id"].clone())
            .collect();
        assert_eq!(ids, vec![json!("2"), json!("1"), json!("3")]);
    }

    #[test]
    fn test_out_of_order_chunk_rejected() {
        let mut merger = ChunkMerger::begin(&dims());
        assert!(merger.ingest(1, vec![]).is_err());
        merger.ingest(0, vec![]).unwrap();
        assert!(merger.ingest(0, vec![]).is_err());
        assert_eq!(merger.chunks_ingested(), 1);
    }

    #[test]
    fn test_malformed_row_is_an_error() {
        let mut merger = ChunkMerger::begin(&dims());
        assert!(merger.ingest(0, vec![json!(42)]).is_err());
    }
}
