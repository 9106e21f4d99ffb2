//! Process-unique identifier generation.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

use crate::domain::shared::{ExecId, OrderId};

/// Generates ExecIDs and rejection OrderIDs.
///
/// Ids take the form `{prefix}-{node}-{epoch}-{seq}`. The sequence is shared
/// across both kinds, so no two ids from one generator are equal. The boot
/// epoch separates restarts of the same node.
#[derive(Debug)]
pub struct IdGenerator {
    node_id: String,
    epoch_ms: i64,
    sequence: AtomicU64,
}

impl IdGenerator {
    /// Create a generator for `node_id`, using the current time as epoch.
    #[must_use]
    pub fn new(node_id: impl Into<String>) -> Self {
        Self::with_epoch(node_id, Utc::now().timestamp_millis())
    }

    /// Create a generator with a fixed epoch.
    #[must_use]
    pub fn with_epoch(node_id: impl Into<String>, epoch_ms: i64) -> Self {
        Self {
            node_id: node_id.into(),
            epoch_ms,
            sequence: AtomicU64::new(0),
        }
    }

    /// Next execution id.
    pub fn next_exec_id(&self) -> ExecId {
        ExecId::new(self.next_token("EXEC"))
    }

    /// Next order id for a rejected request.
    pub fn next_reject_order_id(&self) -> OrderId {
        OrderId::new(self.next_token("REJ"))
    }

    fn next_token(&self, prefix: &str) -> String {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{prefix}-{}-{}-{seq}", self.node_id, self.epoch_ms)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use super::*;

    #[test]
    fn ids_share_one_sequence() {
        let ids = IdGenerator::with_epoch("NODE1", 1_700_000_000_000);
        assert_eq!(ids.next_exec_id().as_str(), "EXEC-NODE1-1700000000000-1");
        assert_eq!(
            ids.next_reject_order_id().as_str(),
            "REJ-NODE1-1700000000000-2"
        );
        assert_eq!(ids.next_exec_id().as_str(), "EXEC-NODE1-1700000000000-3");
    }

    #[test]
    fn ids_are_unique_across_threads() {
        let ids = Arc::new(IdGenerator::new("NODE1"));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ids = Arc::clone(&ids);
                std::thread::spawn(move || {
                    (0..250)
                        .map(|_| ids.next_exec_id().into_inner())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id));
            }
        }
        assert_eq!(seen.len(), 1000);
    }

    #[test]
    fn distinct_epochs_never_collide() {
        let first = IdGenerator::with_epoch("NODE1", 1);
        let second = IdGenerator::with_epoch("NODE1", 2);
        assert_ne!(first.next_exec_id(), second.next_exec_id());
    }
}
