// SPDX-License-Identifier: MIT OR Apache-2.0
//! Frame navigation over a change log.
//!
//! Forward steps replay the authored deltas of the destination frame.
//! Backward steps undo the deltas of the current frame by resolving the
//! value each attribute held one frame earlier, so no inverse log is stored.

use crate::attribute_index::AttributeIndex;
use crate::change_log::{ChangeLog, Delta, Frame};
use crate::error::{DeckError, Result};
use crate::render::RenderOp;
use crate::resolver::ValueResolver;
use crate::state::PlaybackState;

/// Immutable playback engine: the change log and its index
#[derive(Debug, Clone)]
pub struct PlaybackEngine {
    log: ChangeLog,
    index: AttributeIndex,
}

impl PlaybackEngine {
    /// Take ownership of a change log and index it
    pub fn new(log: ChangeLog) -> Self {
        let index = AttributeIndex::build(&log);
        Self { log, index }
    }

    /// Number of frames
    pub fn frame_count(&self) -> usize {
        self.log.frame_count()
    }

    /// Index of the final frame
    pub fn last_frame(&self) -> usize {
        self.frame_count() - 1
    }

    /// The underlying change log
    pub fn change_log(&self) -> &ChangeLog {
        &self.log
    }

    /// The attribute index
    pub fn index(&self) -> &AttributeIndex {
        &self.index
    }

    /// Resolver over this engine's index
    pub fn resolver(&self) -> ValueResolver<'_> {
        ValueResolver::new(&self.index)
    }

    /// Operations that draw the baseline frame onto an empty scene
    pub fn baseline(&self) -> Vec<RenderOp> {
        self.frame_ops(0)
    }

    /// Advance one frame, wrapping from the last frame to frame 0
    pub fn step_forward(&self, state: &mut PlaybackState) -> Vec<RenderOp> {
        let next = (state.current_frame + 1) % self.frame_count();
        let ops = self.frame_ops(next);
        state.current_frame = next;
        tracing::debug!("Stepped forward to frame {} ({} ops)", next, ops.len());
        ops
    }

    /// Go back one frame
    ///
    /// At frame 0 this replays every forward step up to the last frame.
    pub fn step_backward(&self, state: &mut PlaybackState) -> Result<Vec<RenderOp>> {
        if state.current_frame == 0 {
            let mut ops = Vec::new();
            for _ in 0..self.last_frame() {
                ops.extend(self.step_forward(state));
            }
            tracing::debug!("Wrapped backward to frame {}", state.current_frame);
            return Ok(ops);
        }

        let current = state.current_frame;
        let resolver = self.resolver();
        let mut ops = Vec::new();
        for delta in self.frame_deltas(current) {
            let previous = resolver.resolve(&delta.target, &delta.attribute, current - 1)?;
            if previous != delta.value {
                ops.push(RenderOp::assign(&delta.target, &delta.attribute, previous));
            }
        }

        state.current_frame = current - 1;
        tracing::debug!("Stepped backward to frame {} ({} ops)", current - 1, ops.len());
        Ok(ops)
    }

    /// Jump directly to `frame`
    ///
    /// Emits one operation per tracked attribute whose value differs
    /// between the current frame and `frame`.
    pub fn seek(&self, state: &mut PlaybackState, frame: usize) -> Result<Vec<RenderOp>> {
        if frame >= self.frame_count() {
            return Err(DeckError::FrameOutOfRange {
                frame,
                frame_count: self.frame_count(),
            });
        }

        let from = state.current_frame;
        let resolver = self.resolver();
        let mut ops = Vec::new();
        if frame != from {
            for (target, attribute) in self.index.pairs() {
                let old = resolver.resolve(target, attribute, from)?;
                let new = resolver.resolve(target, attribute, frame)?;
                if old != new {
                    ops.push(RenderOp::assign(target, attribute, new));
                }
            }
        }

        state.current_frame = frame;
        tracing::debug!("Seeked from frame {} to {} ({} ops)", from, frame, ops.len());
        Ok(ops)
    }

    fn frame_deltas(&self, frame: usize) -> &[Delta] {
        self.log.frame(frame).map(Frame::deltas).unwrap_or_default()
    }

    fn frame_ops(&self, frame: usize) -> Vec<RenderOp> {
        self.frame_deltas(frame).iter().map(RenderOp::from).collect()
    }
}
