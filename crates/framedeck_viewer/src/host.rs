// SPDX-License-Identifier: MIT OR Apache-2.0
//! Host-side collaborators: a tokio-backed autoplay timer and a logging scene.

use framedeck_core::{MemoryScene, RenderTarget, TimerHost, TimerToken};
use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior};

/// Delivers autoplay ticks from a tokio interval
///
/// Only one trigger is live at a time; scheduling replaces it and cancelling
/// drops it, so a cancelled token can never be returned by [`TokioTimer::tick`].
#[derive(Debug, Default)]
pub struct TokioTimer {
    active: Option<(TimerToken, Interval)>,
}

impl TokioTimer {
    /// Create an idle timer
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a trigger is live
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Wait for the next tick of the live trigger; pends forever when idle
    ///
    /// Cancel safe, for use in `tokio::select!`.
    pub async fn tick(&mut self) -> TimerToken {
        match &mut self.active {
            Some((token, interval)) => {
                interval.tick().await;
                *token
            }
            None => std::future::pending().await,
        }
    }
}

impl TimerHost for TokioTimer {
    fn schedule(&mut self, token: TimerToken, period: Duration) {
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.active = Some((token, interval));
        tracing::trace!("Scheduled tick {} every {:?}", token.value(), period);
    }

    fn cancel(&mut self, token: TimerToken) {
        if matches!(&self.active, Some((live, _)) if *live == token) {
            self.active = None;
            tracing::trace!("Cancelled tick {}", token.value());
        }
    }
}

/// In-memory document that logs every write
#[derive(Debug, Default)]
pub struct ConsoleScene {
    scene: MemoryScene,
}

impl ConsoleScene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Current document state
    pub fn scene(&self) -> &MemoryScene {
        &self.scene
    }
}

impl RenderTarget for ConsoleScene {
    fn set_attribute(&mut self, target: &str, attribute: &str, value: &str) {
        tracing::debug!("#{target} {attribute}={value:?}");
        self.scene.set_attribute(target, attribute, value);
    }

    fn replace_content(&mut self, target: &str, content: &str) {
        tracing::debug!("#{target} <- {content:?}");
        self.scene.replace_content(target, content);
    }
}
