// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for deck loading and playback.

use thiserror::Error;

/// Errors raised by the deck engine
#[derive(Debug, Error)]
pub enum DeckError {
    /// A change log must contain at least one frame
    #[error("Change log has no frames")]
    EmptyChangeLog,

    /// The pair was never recorded in the change log
    #[error("No recorded value for attribute `{attribute}` of `{target}`")]
    UnknownAttribute {
        /// Target element id
        target: String,
        /// Attribute name
        attribute: String,
    },

    /// The pair has no event at or before the queried frame
    #[error("Attribute `{attribute}` of `{target}` has no value at or before frame {frame}")]
    UnresolvedAtFrame {
        /// Target element id
        target: String,
        /// Attribute name
        attribute: String,
        /// Queried frame
        frame: usize,
    },

    /// Frame outside of `[0, frame_count)`
    #[error("Frame {frame} is out of range (frame count {frame_count})")]
    FrameOutOfRange {
        /// Requested frame
        frame: usize,
        /// Number of frames in the deck
        frame_count: usize,
    },

    /// Malformed `viewBox` attribute
    #[error("Invalid viewBox: {0}")]
    InvalidViewBox(String),

    /// Configuration file is not usable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Change log or configuration could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for DeckError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<ron::error::SpannedError> for DeckError {
    fn from(err: ron::error::SpannedError) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<ron::Error> for DeckError {
    fn from(err: ron::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Result type for deck operations
pub type Result<T> = std::result::Result<T, DeckError>;
