// SPDX-License-Identifier: MIT OR Apache-2.0
//! Frame-change playback engine for keyframed vector-graphic decks.
//!
//! A deck is a single graphic plus a change log: for every frame, the
//! attribute writes that turn the previous frame into this one. This crate
//! provides:
//! - The change log model and its JSON/RON wire format
//! - A per-attribute index with predecessor lookup
//! - Forward/backward/seek navigation emitting incremental render operations
//! - Token-based autoplay scheduling
//! - Viewport pan/zoom
//!
//! ## Architecture
//!
//! Nothing here touches a document or a clock. [`SlideViewer`] turns
//! [`Command`]s and timer ticks into [`ViewerEffect`]s; the host applies them
//! through [`RenderTarget`] and [`DisplaySink`] and delivers ticks scheduled
//! through [`TimerHost`].

pub mod attribute_index;
pub mod autoplay;
pub mod change_log;
pub mod command;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod render;
pub mod resolver;
pub mod state;
pub mod viewer;
pub mod viewport;

pub use attribute_index::{AttributeEvent, AttributeIndex};
pub use autoplay::{AutoplayConfig, AutoplayScheduler, Tick, TimerHost, TimerToken};
pub use change_log::{ChangeLog, Delta, Frame};
pub use command::Command;
pub use config::{ViewerConfig, CONFIG_FORMAT_VERSION};
pub use display::{DisplaySink, TextDisplay};
pub use engine::PlaybackEngine;
pub use error::{DeckError, Result};
pub use render::{MemoryScene, RenderOp, RenderTarget, CONTENT_ATTRIBUTE};
pub use resolver::ValueResolver;
pub use state::{PlaybackState, SlidePosition};
pub use viewer::{apply_effects, SlideViewer, ViewerEffect};
pub use viewport::{ViewBox, Viewport};
