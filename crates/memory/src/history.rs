use crate::types::ScanRecord;
use parking_lot::RwLock;
use std::collections::VecDeque;

pub const DEFAULT_HISTORY_CAPACITY: usize = 500;

/// Scan history, most recent first.
pub trait HistoryStore: Send + Sync {
    /// Place a record at the front of the history.
    fn append(&self, record: ScanRecord);

    /// Snapshot of all records, most recent first.
    fn entries(&self) -> Vec<ScanRecord>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory history that evicts the oldest record once `capacity` is reached.
pub struct BoundedHistory {
    records: RwLock<VecDeque<ScanRecord>>,
    capacity: usize,
}

impl BoundedHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: RwLock::new(VecDeque::with_capacity(capacity.min(64))),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for BoundedHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl HistoryStore for BoundedHistory {
    fn append(&self, record: ScanRecord) {
        let mut records = self.records.write();
        if records.len() >= self.capacity {
            if let Some(evicted) = records.pop_back() {
                tracing::debug!("History full, evicting scan from {}", evicted.display_timestamp());
            }
        }
        records.push_front(record);
    }

    fn entries(&self) -> Vec<ScanRecord> {
        self.records.read().iter().cloned().collect()
    }

    fn len(&self) -> usize {
        self.records.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ContentType;

    fn record(payload: &str) -> ScanRecord {
        ScanRecord::new(payload, ContentType::Text, Vec::new())
    }

    #[test]
    fn test_most_recent_first() {
        let history = BoundedHistory::new(10);
        history.append(record("first"));
        history.append(record("second"));
        history.append(record("third"));

        let payloads: Vec<String> = history
            .entries()
            .iter()
            .map(|r| r.payload().to_string())
            .collect();
        assert_eq!(payloads, vec!["third", "second", "first"]);
    }

    #[test]
    fn test_evicts_oldest_when_full() {
        let history = BoundedHistory::new(2);
        history.append(record("a"));
        history.append(record("b"));
        history.append(record("c"));

        let entries = history.entries();
        assert_eq!(history.len(), 2);
        assert_eq!(entries[0].payload(), "c");
        assert_eq!(entries[1].payload(), "b");
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let history = BoundedHistory::new(0);
        assert_eq!(history.capacity(), 1);
        assert!(history.is_empty());
        history.append(record("only"));
        history.append(record("newer"));
        assert_eq!(history.len(), 1);
        assert_eq!(history.entries()[0].payload(), "newer");
    }
}
