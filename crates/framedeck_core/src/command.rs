// SPDX-License-Identifier: MIT OR Apache-2.0
//! Logical viewer commands.
//!
//! Hosts translate physical input (keys, buttons, stdin lines) into
//! [`Command`]s; the viewer never sees where a command came from.

use crate::error::DeckError;
use std::str::FromStr;

/// A navigation or playback command
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Show the next slide
    Next,
    /// Show the previous slide
    Previous,
    /// Start or stop autoplay
    ToggleAutoplay,
    /// Lengthen the autoplay interval
    Slower,
    /// Shorten the autoplay interval
    Faster,
    /// Jump to a 0-based frame
    Seek(usize),
    /// Zoom around a point in graphic coordinates
    Zoom {
        /// Pointer x
        x: f64,
        /// Pointer y
        y: f64,
        /// Wheel delta
        delta: f64,
    },
    /// Move the visible window
    Pan {
        /// Horizontal offset
        dx: f64,
        /// Vertical offset
        dy: f64,
    },
}

impl Command {
    /// Map a DOM `KeyboardEvent.code` to a command
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "ArrowRight" => Some(Self::Next),
            "ArrowLeft" => Some(Self::Previous),
            "Space" => Some(Self::ToggleAutoplay),
            "ArrowUp" => Some(Self::Slower),
            "ArrowDown" => Some(Self::Faster),
            _ => None,
        }
    }

    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Next => "next",
            Self::Previous => "prev",
            Self::ToggleAutoplay => "play",
            Self::Slower => "slower",
            Self::Faster => "faster",
            Self::Seek(_) => "seek",
            Self::Zoom { .. } => "zoom",
            Self::Pan { .. } => "pan",
        }
    }
}

impl FromStr for Command {
    type Err = DeckError;

    /// Parse a text command such as `next`, `seek 3` or `zoom 10 20 -120`
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(DeckError::Parse("empty command".into()));
        };
        let args: Vec<&str> = words.collect();
        let arity = match head {
            "seek" => 1,
            "pan" => 2,
            "zoom" => 3,
            _ => 0,
        };
        if let Some(extra) = args.get(arity) {
            return Err(DeckError::Parse(format!("unexpected argument `{extra}` after `{head}`")));
        }
        if let Some(command) = Self::from_key_code(head) {
            return Ok(command);
        }

        let number = |i: usize| -> Result<f64, DeckError> {
            let arg = args
                .get(i)
                .ok_or_else(|| DeckError::Parse(format!("`{head}` needs more arguments")))?;
            arg.parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| DeckError::Parse(format!("`{arg}` is not a finite number")))
        };

        match head {
            "next" | "n" => Ok(Self::Next),
            "prev" | "p" => Ok(Self::Previous),
            "play" | "toggle" => Ok(Self::ToggleAutoplay),
            "slower" | "+" => Ok(Self::Slower),
            "faster" | "-" => Ok(Self::Faster),
            "seek" => {
                let arg = args
                    .first()
                    .ok_or_else(|| DeckError::Parse("`seek` needs a frame".into()))?;
                arg.parse()
                    .map(Self::Seek)
                    .map_err(|_| DeckError::Parse(format!("`{arg}` is not a frame index")))
            }
            "zoom" => Ok(Self::Zoom {
                x: number(0)?,
                y: number(1)?,
                delta: number(2)?,
            }),
            "pan" => Ok(Self::Pan {
                dx: number(0)?,
                dy: number(1)?,
            }),
            other => Err(DeckError::Parse(format!("unknown command `{other}`"))),
        }
    }
}
