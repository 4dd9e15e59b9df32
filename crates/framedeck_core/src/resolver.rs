// SPDX-License-Identifier: MIT OR Apache-2.0
//! Effective attribute values at arbitrary frames.

use crate::attribute_index::{AttributeEvent, AttributeIndex};
use crate::error::{DeckError, Result};
use indexmap::IndexMap;

/// Answers "what value did this attribute hold at frame F"
#[derive(Debug, Clone, Copy)]
pub struct ValueResolver<'a> {
    index: &'a AttributeIndex,
}

impl<'a> ValueResolver<'a> {
    /// Create a resolver over a built index
    pub fn new(index: &'a AttributeIndex) -> Self {
        Self { index }
    }

    /// Latest value of `attribute` on `target` at or before `frame`
    pub fn resolve(&self, target: &str, attribute: &str, frame: usize) -> Result<&'a str> {
        let events = self
            .index
            .events(target, attribute)
            .ok_or_else(|| DeckError::UnknownAttribute {
                target: target.to_owned(),
                attribute: attribute.to_owned(),
            })?;

        predecessor(events, frame)
            .map(|event| event.value.as_str())
            .ok_or_else(|| DeckError::UnresolvedAtFrame {
                target: target.to_owned(),
                attribute: attribute.to_owned(),
                frame,
            })
    }

    /// Values of every tracked pair at `frame`
    pub fn snapshot(&self, frame: usize) -> Result<IndexMap<(String, String), String>> {
        self.index
            .pairs()
            .map(|(target, attribute)| {
                let value = self.resolve(target, attribute, frame)?;
                Ok(((target.to_owned(), attribute.to_owned()), value.to_owned()))
            })
            .collect()
    }
}

/// Rightmost event whose frame is `<= frame`
///
/// Among events sharing a frame the last inserted one is returned.
fn predecessor(events: &[AttributeEvent], frame: usize) -> Option<&AttributeEvent> {
    let first = events.first()?;
    if first.frame > frame {
        return None;
    }

    let mut left = 0;
    let mut right = events.len();
    while right - left > 1 {
        let mid = left + (right - left) / 2;
        if events[mid].frame <= frame {
            left = mid;
        } else {
            right = mid;
        }
    }
    Some(&events[left])
}
