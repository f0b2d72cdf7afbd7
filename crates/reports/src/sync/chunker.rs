//! Metric list chunking for the per-request metric limit

/// Split `metrics` into ordered chunks of at most `capacity` names
///
/// Chunks cover the input exactly once and keep its order. A zero capacity
/// is treated as one.
pub fn chunk_metrics(metrics: &[String], capacity: usize) -> Vec<Vec<String>> {
    metrics
        .chunks(capacity.max(1))
        .map(|chunk| chunk.to_vec())
        .collect()
}
