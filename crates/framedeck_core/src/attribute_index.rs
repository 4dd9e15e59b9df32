// SPDX-License-Identifier: MIT OR Apache-2.0
//! Per-attribute change history built from a change log.

use crate::change_log::ChangeLog;
use indexmap::IndexMap;

/// Composite lookup key of a tracked attribute
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct AttributeKey {
    pub(crate) target: String,
    pub(crate) attribute: String,
}

impl AttributeKey {
    pub(crate) fn new(target: &str, attribute: &str) -> Self {
        Self {
            target: target.to_owned(),
            attribute: attribute.to_owned(),
        }
    }
}

/// A value recorded for an attribute at a frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeEvent {
    /// Frame the value was set in
    pub frame: usize,
    /// Recorded value
    pub value: String,
}

/// History of every (target, attribute) pair mutated by a change log
///
/// Event lists are in frame order because frames are visited in ascending
/// order during the build.
#[derive(Debug, Clone, Default)]
pub struct AttributeIndex {
    events: IndexMap<AttributeKey, Vec<AttributeEvent>>,
}

impl AttributeIndex {
    /// Build the index in one pass over all deltas
    pub fn build(log: &ChangeLog) -> Self {
        let mut events: IndexMap<AttributeKey, Vec<AttributeEvent>> = IndexMap::new();

        for (frame, changes) in log.frames() {
            for delta in changes.deltas() {
                events
                    .entry(AttributeKey::new(&delta.target, &delta.attribute))
                    .or_default()
                    .push(AttributeEvent {
                        frame,
                        value: delta.value.clone(),
                    });
            }
        }

        tracing::debug!(
            "Built attribute index: {} pairs from {} deltas",
            events.len(),
            log.delta_count()
        );
        Self { events }
    }

    /// Recorded events for a pair, if it was ever changed
    pub fn events(&self, target: &str, attribute: &str) -> Option<&[AttributeEvent]> {
        self.events
            .get(&AttributeKey::new(target, attribute))
            .map(Vec::as_slice)
    }

    /// Tracked `(target, attribute)` pairs in first-seen order
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.events
            .keys()
            .map(|key| (key.target.as_str(), key.attribute.as_str()))
    }

    /// Number of tracked pairs
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing is tracked
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change_log::{Delta, Frame};

    fn log() -> ChangeLog {
        ChangeLog::new(vec![
            Frame::new(vec![
                Delta::new("box", "fill", "red"),
                Delta::new("box", "x", "0"),
            ]),
            Frame::new(vec![Delta::new("box", "fill", "blue")]),
            Frame::default(),
            Frame::new(vec![
                Delta::new("box", "fill", "green"),
                Delta::new("box", "fill", "black"),
            ]),
        ])
        .unwrap()
    }

    #[test]
    fn test_events_in_frame_order() {
        let index = AttributeIndex::build(&log());
        let frames: Vec<usize> = index
            .events("box", "fill")
            .unwrap()
            .iter()
            .map(|e| e.frame)
            .collect();
        assert_eq!(frames, vec![0, 1, 3, 3]);
    }

    #[test]
    fn test_duplicates_kept_in_insertion_order() {
        let index = AttributeIndex::build(&log());
        let events = index.events("box", "fill").unwrap();
        assert_eq!(events[2].value, "green");
        assert_eq!(events[3].value, "black");
    }

    #[test]
    fn test_pairs_first_seen_order() {
        let index = AttributeIndex::build(&log());
        let pairs: Vec<_> = index.pairs().collect();
        assert_eq!(pairs, vec![("box", "fill"), ("box", "x")]);
        assert_eq!(index.len(), 2);
        assert!(index.events("box", "y").is_none());
    }
}
