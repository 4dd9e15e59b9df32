// SPDX-License-Identifier: MIT OR Apache-2.0
//! Frame-change data: the immutable input of the deck engine.
//!
//! The wire format is the one embedded in presentation pages: an array of
//! frames, each an array of `[target, attribute, value]` triples.

use crate::error::{DeckError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A single recorded attribute mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String, String)", into = "(String, String, String)")]
pub struct Delta {
    /// Id of the element being changed
    pub target: String,
    /// Attribute name
    pub attribute: String,
    /// New attribute value
    pub value: String,
}

impl Delta {
    /// Create a new delta
    pub fn new(
        target: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            target: target.into(),
            attribute: attribute.into(),
            value: value.into(),
        }
    }
}

impl From<(String, String, String)> for Delta {
    fn from((target, attribute, value): (String, String, String)) -> Self {
        Self { target, attribute, value }
    }
}

impl From<Delta> for (String, String, String) {
    fn from(delta: Delta) -> Self {
        (delta.target, delta.attribute, delta.value)
    }
}

/// All deltas recorded for one frame, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Frame {
    deltas: Vec<Delta>,
}

impl Frame {
    /// Create a frame from its deltas
    pub fn new(deltas: Vec<Delta>) -> Self {
        Self { deltas }
    }

    /// Append a delta
    pub fn with(mut self, delta: Delta) -> Self {
        self.deltas.push(delta);
        self
    }

    /// Deltas in replay order
    pub fn deltas(&self) -> &[Delta] {
        &self.deltas
    }

    /// Number of deltas
    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    /// Whether the frame changes nothing
    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }
}

/// Ordered, non-empty sequence of frames
///
/// Frame 0 is the baseline. It must set every (target, attribute) pair that
/// any later frame changes; this is not checked here; violations surface
/// as lookup errors when stepping backward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ChangeLog {
    frames: Vec<Frame>,
}

impl ChangeLog {
    /// Create a change log, rejecting an empty frame list
    pub fn new(frames: Vec<Frame>) -> Result<Self> {
        if frames.is_empty() {
            return Err(DeckError::EmptyChangeLog);
        }
        Ok(Self { frames })
    }

    /// Parse the JSON wire format
    pub fn from_json(source: &str) -> Result<Self> {
        let frames: Vec<Frame> = serde_json::from_str(source)?;
        Self::new(frames)
    }

    /// Parse the RON form of the same shape
    pub fn from_ron(source: &str) -> Result<Self> {
        let frames: Vec<Frame> = ron::from_str(source)?;
        Self::new(frames)
    }

    /// Load a change log, picking the parser from the file extension
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let log = match path.extension().and_then(|ext| ext.to_str()) {
            Some("ron") => Self::from_ron(&content)?,
            _ => Self::from_json(&content)?,
        };
        tracing::info!(
            "Loaded change log {:?}: {} frames, {} deltas",
            path,
            log.frame_count(),
            log.delta_count()
        );
        Ok(log)
    }

    /// Number of frames
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Total number of deltas across all frames
    pub fn delta_count(&self) -> usize {
        self.frames.iter().map(Frame::len).sum()
    }

    /// Get a frame by index
    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// Iterate over `(frame index, frame)` pairs
    pub fn frames(&self) -> impl Iterator<Item = (usize, &Frame)> {
        self.frames.iter().enumerate()
    }
}

impl<'de> Deserialize<'de> for ChangeLog {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let frames = Vec::<Frame>::deserialize(deserializer)?;
        Self::new(frames).map_err(serde::de::Error::custom)
    }
}
