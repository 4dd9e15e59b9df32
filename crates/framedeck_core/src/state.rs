// SPDX-License-Identifier: MIT OR Apache-2.0
//! Mutable playback state shared by the engine and the autoplay scheduler.

/// The one mutable piece of a running deck
///
/// Owned by the viewer and lent to the engine and scheduler for the duration
/// of a single reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackState {
    /// Index of the frame currently shown
    pub current_frame: usize,
    /// Whether autoplay is running
    pub is_playing: bool,
    /// Autoplay period in milliseconds
    pub interval_ms: u32,
}

impl PlaybackState {
    /// State at the baseline frame with autoplay stopped
    pub fn new(interval_ms: u32) -> Self {
        Self {
            current_frame: 0,
            is_playing: false,
            interval_ms,
        }
    }
}

/// 1-based slide position for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlidePosition {
    /// 1-based slide number
    pub slide: usize,
    /// Total number of slides
    pub total: usize,
}

impl SlidePosition {
    /// Position of `state` within a deck of `frame_count` frames
    pub fn of(state: &PlaybackState, frame_count: usize) -> Self {
        Self {
            slide: state.current_frame + 1,
            total: frame_count,
        }
    }
}

impl std::fmt::Display for SlidePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.slide, self.total)
    }
}
