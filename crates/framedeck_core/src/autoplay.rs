// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timer-driven automatic forward stepping.
//!
//! The scheduler does not own a clock. It asks a [`TimerHost`] to deliver
//! periodic ticks tagged with a [`TimerToken`] and drops any tick whose token
//! is not the active one, so nothing fires after [`AutoplayScheduler::stop`].

use crate::engine::PlaybackEngine;
use crate::error::{DeckError, Result};
use crate::render::RenderOp;
use crate::state::PlaybackState;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Identifies one scheduled periodic trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

impl TimerToken {
    /// Raw token value
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Host facility that delivers periodic ticks
pub trait TimerHost {
    /// Begin delivering ticks tagged `token` every `period`
    fn schedule(&mut self, token: TimerToken, period: Duration);

    /// Stop delivering ticks tagged `token`
    fn cancel(&mut self, token: TimerToken);
}

/// Autoplay timing configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoplayConfig {
    /// Interval used until the viewer adjusts it
    pub initial_interval_ms: u32,
    /// Lower bound for the interval
    pub min_interval_ms: u32,
    /// Base adjustment step
    pub step_delta_ms: u32,
    /// Interval span over which the step grows by one base step
    pub step_span_ms: u32,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            initial_interval_ms: 100,
            min_interval_ms: 5,
            step_delta_ms: 5,
            step_span_ms: 50,
        }
    }
}

impl AutoplayConfig {
    /// Check the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.step_span_ms == 0 {
            return Err(DeckError::InvalidConfig("step_span_ms must be positive".into()));
        }
        if self.min_interval_ms == 0 {
            return Err(DeckError::InvalidConfig("min_interval_ms must be positive".into()));
        }
        Ok(())
    }

    /// Clamp an interval to the configured floor
    pub fn clamp(&self, interval_ms: u32) -> u32 {
        interval_ms.max(self.min_interval_ms)
    }

    /// Next longer interval
    ///
    /// The step grows with the interval so that adjustment feels even in
    /// perceived speed.
    pub fn lengthened(&self, interval_ms: u32) -> u32 {
        let span = self.step_span_ms.max(1);
        let steps = interval_ms.saturating_add(self.step_delta_ms).div_ceil(span);
        self.clamp(interval_ms.saturating_add(self.step_delta_ms.saturating_mul(steps)))
    }

    /// Next shorter interval, never below the floor
    pub fn shortened(&self, interval_ms: u32) -> u32 {
        let span = self.step_span_ms.max(1);
        let steps = interval_ms.div_ceil(span);
        self.clamp(interval_ms.saturating_sub(self.step_delta_ms.saturating_mul(steps)))
    }
}

/// Outcome of delivering a tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    /// Token was cancelled or superseded; nothing happened
    Stale,
    /// Advanced one frame
    Stepped(Vec<RenderOp>),
    /// Reached the last frame; autoplay stopped
    Finished,
}

/// Drives repeated forward steps
#[derive(Debug, Clone)]
pub struct AutoplayScheduler {
    config: AutoplayConfig,
    active: Option<TimerToken>,
    next_token: u64,
}

impl AutoplayScheduler {
    /// Create a stopped scheduler
    pub fn new(config: AutoplayConfig) -> Self {
        Self {
            config,
            active: None,
            next_token: 0,
        }
    }

    /// Timing configuration
    pub fn config(&self) -> &AutoplayConfig {
        &self.config
    }

    /// Token of the running trigger, if any
    pub fn active_token(&self) -> Option<TimerToken> {
        self.active
    }

    /// Begin autoplay; returns `false` if it was already running
    pub fn start(&mut self, state: &mut PlaybackState, timer: &mut dyn TimerHost) -> bool {
        if state.is_playing {
            return false;
        }

        let token = TimerToken(self.next_token);
        self.next_token += 1;
        timer.schedule(token, Duration::from_millis(u64::from(state.interval_ms)));
        self.active = Some(token);
        state.is_playing = true;
        tracing::info!("Autoplay started ({}ms per slide)", state.interval_ms);
        true
    }

    /// Cancel autoplay; returns `false` if it was not running
    pub fn stop(&mut self, state: &mut PlaybackState, timer: &mut dyn TimerHost) -> bool {
        if !state.is_playing {
            return false;
        }

        if let Some(token) = self.active.take() {
            timer.cancel(token);
        }
        state.is_playing = false;
        tracing::info!("Autoplay stopped at frame {}", state.current_frame);
        true
    }

    /// Restart a running autoplay so a new interval takes effect at once
    pub fn reset(&mut self, state: &mut PlaybackState, timer: &mut dyn TimerHost) {
        if self.stop(state, timer) {
            self.start(state, timer);
        }
    }

    /// Set the interval (clamped to the floor) and reset; returns the applied value
    pub fn set_interval_ms(
        &mut self,
        state: &mut PlaybackState,
        timer: &mut dyn TimerHost,
        interval_ms: u32,
    ) -> u32 {
        state.interval_ms = self.config.clamp(interval_ms);
        tracing::debug!("Autoplay interval set to {}ms", state.interval_ms);
        self.reset(state, timer);
        state.interval_ms
    }

    /// Lengthen the interval by one quantized step
    pub fn slow_down(&mut self, state: &mut PlaybackState, timer: &mut dyn TimerHost) -> u32 {
        let interval = self.config.lengthened(state.interval_ms);
        self.set_interval_ms(state, timer, interval)
    }

    /// Shorten the interval by one quantized step
    pub fn speed_up(&mut self, state: &mut PlaybackState, timer: &mut dyn TimerHost) -> u32 {
        let interval = self.config.shortened(state.interval_ms);
        self.set_interval_ms(state, timer, interval)
    }

    /// Deliver a tick from the host timer
    pub fn on_tick(
        &mut self,
        token: TimerToken,
        state: &mut PlaybackState,
        engine: &PlaybackEngine,
        timer: &mut dyn TimerHost,
    ) -> Tick {
        if !state.is_playing || self.active != Some(token) {
            tracing::trace!("Dropped stale tick {}", token.value());
            return Tick::Stale;
        }

        if state.current_frame == engine.last_frame() {
            self.stop(state, timer);
            return Tick::Finished;
        }

        Tick::Stepped(engine.step_forward(state))
    }
}

impl Default for AutoplayScheduler {
    fn default() -> Self {
        Self::new(AutoplayConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change_log::{ChangeLog, Delta, Frame};

    #[derive(Default)]
    struct ManualTimer {
        scheduled: Vec<(TimerToken, Duration)>,
        cancelled: Vec<TimerToken>,
    }

    impl TimerHost for ManualTimer {
        fn schedule(&mut self, token: TimerToken, period: Duration) {
            self.scheduled.push((token, period));
        }

        fn cancel(&mut self, token: TimerToken) {
            self.cancelled.push(token);
        }
    }

    fn engine(frames: usize) -> PlaybackEngine {
        let frames = (0..frames)
            .map(|i| Frame::new(vec![Delta::new("n", "innerHTML", i.to_string())]))
            .collect();
        PlaybackEngine::new(ChangeLog::new(frames).unwrap())
    }

    #[test]
    fn test_start_stop_are_idempotent() {
        let mut scheduler = AutoplayScheduler::default();
        let mut timer = ManualTimer::default();
        let mut state = PlaybackState::new(100);

        assert!(!scheduler.stop(&mut state, &mut timer));
        assert_eq!(state, PlaybackState::new(100));
        assert!(timer.cancelled.is_empty());

        assert!(scheduler.start(&mut state, &mut timer));
        let before = state;
        assert!(!scheduler.start(&mut state, &mut timer));
        assert_eq!(state, before);
        assert_eq!(timer.scheduled.len(), 1);
        assert_eq!(timer.scheduled[0].1, Duration::from_millis(100));
    }

    #[test]
    fn test_stops_at_last_frame() {
        let engine = engine(5);
        let mut scheduler = AutoplayScheduler::default();
        let mut timer = ManualTimer::default();
        let mut state = PlaybackState::new(100);
        state.current_frame = 3;

        scheduler.start(&mut state, &mut timer);
        let token = scheduler.active_token().unwrap();

        assert!(matches!(
            scheduler.on_tick(token, &mut state, &engine, &mut timer),
            Tick::Stepped(_)
        ));
        assert_eq!(state.current_frame, 4);
        assert_eq!(
            scheduler.on_tick(token, &mut state, &engine, &mut timer),
            Tick::Finished
        );
        assert!(!state.is_playing);
        assert_eq!(
            scheduler.on_tick(token, &mut state, &engine, &mut timer),
            Tick::Stale
        );
        assert_eq!(state.current_frame, 4);
    }

    #[test]
    fn test_tick_after_stop_is_dropped() {
        let engine = engine(3);
        let mut scheduler = AutoplayScheduler::default();
        let mut timer = ManualTimer::default();
        let mut state = PlaybackState::new(100);

        scheduler.start(&mut state, &mut timer);
        let token = scheduler.active_token().unwrap();
        scheduler.stop(&mut state, &mut timer);

        assert_eq!(timer.cancelled, vec![token]);
        assert_eq!(
            scheduler.on_tick(token, &mut state, &engine, &mut timer),
            Tick::Stale
        );
        assert_eq!(state.current_frame, 0);
    }

    #[test]
    fn test_reset_supersedes_old_token() {
        let engine = engine(3);
        let mut scheduler = AutoplayScheduler::default();
        let mut timer = ManualTimer::default();
        let mut state = PlaybackState::new(100);

        scheduler.start(&mut state, &mut timer);
        let old = scheduler.active_token().unwrap();
        assert_eq!(scheduler.slow_down(&mut state, &mut timer), 115);

        let new = scheduler.active_token().unwrap();
        assert_ne!(old, new);
        assert_eq!(timer.scheduled.last().unwrap(), &(new, Duration::from_millis(115)));
        assert_eq!(scheduler.on_tick(old, &mut state, &engine, &mut timer), Tick::Stale);
        assert!(matches!(
            scheduler.on_tick(new, &mut state, &engine, &mut timer),
            Tick::Stepped(_)
        ));
    }

    #[test]
    fn test_interval_change_while_stopped_does_not_start() {
        let mut scheduler = AutoplayScheduler::default();
        let mut timer = ManualTimer::default();
        let mut state = PlaybackState::new(100);

        scheduler.speed_up(&mut state, &mut timer);
        assert!(!state.is_playing);
        assert!(timer.scheduled.is_empty());
    }

    #[test]
    fn test_interval_quantization() {
        let config = AutoplayConfig::default();
        assert_eq!(config.lengthened(100), 115);
        assert_eq!(config.lengthened(40), 45);
        assert_eq!(config.lengthened(45), 50);
        assert_eq!(config.shortened(100), 90);
        assert_eq!(config.shortened(51), 41);
        assert_eq!(config.shortened(10), 5);
        assert_eq!(config.shortened(5), 5);
        assert_eq!(config.clamp(1), 5);
    }

    #[test]
    fn test_invalid_config() {
        let config = AutoplayConfig {
            step_span_ms: 0,
            ..AutoplayConfig::default()
        };
        assert!(matches!(config.validate(), Err(DeckError::InvalidConfig(_))));
        assert!(AutoplayConfig::default().validate().is_ok());
    }
}
