// SPDX-License-Identifier: MIT OR Apache-2.0
//! Command dispatcher for a running deck.
//!
//! [`SlideViewer`] owns the playback state and turns each [`Command`] or
//! timer tick into a list of [`ViewerEffect`]s for the host to apply. Each
//! call runs to completion before the next one is made.

use crate::autoplay::{AutoplayScheduler, Tick, TimerHost, TimerToken};
use crate::change_log::ChangeLog;
use crate::command::Command;
use crate::config::ViewerConfig;
use crate::display::DisplaySink;
use crate::engine::PlaybackEngine;
use crate::error::{DeckError, Result};
use crate::render::{RenderOp, RenderTarget};
use crate::state::{PlaybackState, SlidePosition};
use crate::viewport::Viewport;

/// Something the host must do after a reaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerEffect {
    /// Mutate the rendered document
    Render(RenderOp),
    /// Update the slide position readout
    Position(SlidePosition),
    /// Update the autoplay interval readout
    Interval(u32),
}

impl ViewerEffect {
    /// Apply to a host that renders and displays readouts
    pub fn apply<H>(&self, host: &mut H)
    where
        H: RenderTarget + DisplaySink,
    {
        match self {
            Self::Render(op) => op.apply(host),
            Self::Position(position) => host.show_position(*position),
            Self::Interval(interval_ms) => host.show_interval(*interval_ms),
        }
    }
}

/// Apply a batch of effects in order
pub fn apply_effects<H>(effects: &[ViewerEffect], host: &mut H)
where
    H: RenderTarget + DisplaySink,
{
    for effect in effects {
        effect.apply(host);
    }
}

/// A loaded deck with its playback state
#[derive(Debug, Clone)]
pub struct SlideViewer {
    engine: PlaybackEngine,
    state: PlaybackState,
    autoplay: AutoplayScheduler,
    viewport: Option<Viewport>,
}

impl SlideViewer {
    /// Index a change log and prepare playback at frame 0
    pub fn new(log: ChangeLog, config: &ViewerConfig) -> Result<Self> {
        config.validate()?;
        let viewport = config
            .initial_view_box()?
            .map(|view_box| Viewport::new(&config.surface_id, view_box, config.zoom_sensitivity));
        let autoplay = AutoplayScheduler::new(config.autoplay);
        let state = PlaybackState::new(autoplay.config().clamp(config.autoplay.initial_interval_ms));

        Ok(Self {
            engine: PlaybackEngine::new(log),
            state,
            autoplay,
            viewport,
        })
    }

    /// The playback engine
    pub fn engine(&self) -> &PlaybackEngine {
        &self.engine
    }

    /// Current playback state
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// The viewport, if the surface has a view box
    pub fn viewport(&self) -> Option<&Viewport> {
        self.viewport.as_ref()
    }

    /// Current slide position
    pub fn position(&self) -> SlidePosition {
        SlidePosition::of(&self.state, self.engine.frame_count())
    }

    /// Readouts to show once the document is ready
    pub fn on_load(&self) -> Vec<ViewerEffect> {
        vec![
            ViewerEffect::Position(self.position()),
            ViewerEffect::Interval(self.state.interval_ms),
        ]
    }

    /// Effects drawing frame 0 onto a document that does not already show it
    pub fn baseline(&self) -> Vec<ViewerEffect> {
        self.engine
            .baseline()
            .into_iter()
            .map(ViewerEffect::Render)
            .collect()
    }

    /// React to a command
    pub fn handle(&mut self, command: Command, timer: &mut dyn TimerHost) -> Result<Vec<ViewerEffect>> {
        tracing::debug!("Handling command `{}` at frame {}", command.name(), self.state.current_frame);

        match command {
            Command::Next => {
                self.autoplay.stop(&mut self.state, timer);
                let ops = self.engine.step_forward(&mut self.state);
                Ok(self.frame_changed(ops))
            }
            Command::Previous => {
                self.autoplay.stop(&mut self.state, timer);
                let ops = self.engine.step_backward(&mut self.state)?;
                Ok(self.frame_changed(ops))
            }
            Command::Seek(frame) => {
                self.autoplay.stop(&mut self.state, timer);
                let ops = self.engine.seek(&mut self.state, frame)?;
                Ok(self.frame_changed(ops))
            }
            Command::ToggleAutoplay => {
                if self.state.is_playing {
                    self.autoplay.stop(&mut self.state, timer);
                } else {
                    self.autoplay.start(&mut self.state, timer);
                }
                Ok(Vec::new())
            }
            Command::Slower => {
                let interval = self.autoplay.slow_down(&mut self.state, timer);
                Ok(vec![ViewerEffect::Interval(interval)])
            }
            Command::Faster => {
                let interval = self.autoplay.speed_up(&mut self.state, timer);
                Ok(vec![ViewerEffect::Interval(interval)])
            }
            Command::Zoom { x, y, delta } => {
                let op = self.viewport_mut()?.zoom(x, y, delta)?;
                Ok(vec![ViewerEffect::Render(op)])
            }
            Command::Pan { dx, dy } => {
                let op = self.viewport_mut()?.pan(dx, dy)?;
                Ok(vec![ViewerEffect::Render(op)])
            }
        }
    }

    /// React to an autoplay tick
    pub fn on_tick(&mut self, token: TimerToken, timer: &mut dyn TimerHost) -> Vec<ViewerEffect> {
        match self
            .autoplay
            .on_tick(token, &mut self.state, &self.engine, timer)
        {
            Tick::Stepped(ops) => self.frame_changed(ops),
            Tick::Finished | Tick::Stale => Vec::new(),
        }
    }

    fn frame_changed(&self, ops: Vec<RenderOp>) -> Vec<ViewerEffect> {
        let mut effects: Vec<ViewerEffect> = ops.into_iter().map(ViewerEffect::Render).collect();
        effects.push(ViewerEffect::Position(self.position()));
        effects
    }

    fn viewport_mut(&mut self) -> Result<&mut Viewport> {
        self.viewport
            .as_mut()
            .ok_or_else(|| DeckError::InvalidViewBox("render surface has no viewBox configured".into()))
    }
}
