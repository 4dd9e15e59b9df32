// SPDX-License-Identifier: MIT OR Apache-2.0
//! Headless viewer application.
//!
//! Reads line commands from stdin and autoplay ticks from a tokio interval
//! on a single task, so every reaction runs to completion before the next
//! event is looked at.

use crate::host::{ConsoleScene, TokioTimer};
use framedeck_core::{
    apply_effects, Command, DeckError, SlideViewer, TextDisplay, TimerToken, ViewerConfig,
};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Application errors
#[derive(Debug, Error)]
pub enum AppError {
    /// Deck could not be loaded or configured
    #[error("Deck error: {0}")]
    Deck(#[from] DeckError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Whether the input loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep reading input
    Continue,
    /// Leave the input loop
    Quit,
}

/// A viewer wired to a console scene and a tokio timer
pub struct ViewerApp {
    viewer: SlideViewer,
    host: TextDisplay<ConsoleScene>,
    timer: TokioTimer,
}

impl ViewerApp {
    /// Draw the baseline frame and the initial readouts
    pub fn new(viewer: SlideViewer, config: &ViewerConfig) -> Self {
        let mut host = TextDisplay::from_config(ConsoleScene::new(), config);
        apply_effects(&viewer.baseline(), &mut host);
        apply_effects(&viewer.on_load(), &mut host);

        Self {
            viewer,
            host,
            timer: TokioTimer::new(),
        }
    }

    /// The running viewer
    pub fn viewer(&self) -> &SlideViewer {
        &self.viewer
    }

    /// The document as currently rendered
    pub fn scene(&self) -> &ConsoleScene {
        self.host.render()
    }

    /// Dispatch a command and apply its effects
    pub fn handle(&mut self, command: Command) {
        match self.viewer.handle(command, &mut self.timer) {
            Ok(effects) => apply_effects(&effects, &mut self.host),
            Err(e) => tracing::error!("Command `{}` failed: {e}", command.name()),
        }
    }

    /// Interpret one line of console input
    pub fn handle_line(&mut self, line: &str) -> Flow {
        match line.trim() {
            "" => Flow::Continue,
            "quit" | "q" | "exit" => Flow::Quit,
            "state" => {
                println!("{}", self.status());
                Flow::Continue
            }
            input => {
                match input.parse::<Command>() {
                    Ok(command) => self.handle(command),
                    Err(e) => tracing::warn!("Ignoring input {input:?}: {e}"),
                }
                Flow::Continue
            }
        }
    }

    /// One-line summary followed by every rendered value
    pub fn status(&self) -> String {
        let state = self.viewer.state();
        let mut out = format!(
            "Slide {} | {} | {}ms per slide",
            self.viewer.position(),
            if state.is_playing { "playing" } else { "paused" },
            state.interval_ms
        );
        for ((target, attribute), value) in self.scene().scene().values() {
            out.push_str(&format!("\n  #{target} {attribute} = {value:?}"));
        }
        out
    }

    fn on_tick(&mut self, token: TimerToken) {
        let effects = self.viewer.on_tick(token, &mut self.timer);
        apply_effects(&effects, &mut self.host);
        if !self.viewer.state().is_playing {
            tracing::info!("Autoplay finished at slide {}", self.viewer.position());
        }
    }

    /// Run until `quit`, or until stdin closes and autoplay has finished
    pub async fn run(mut self) -> Result<(), AppError> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdin_open = true;

        while stdin_open || self.timer.is_active() {
            tokio::select! {
                token = self.timer.tick() => self.on_tick(token),
                line = lines.next_line(), if stdin_open => match line? {
                    Some(line) => {
                        if self.handle_line(&line) == Flow::Quit {
                            break;
                        }
                    }
                    None => {
                        tracing::debug!("Input closed");
                        stdin_open = false;
                    }
                },
            }
        }

        tracing::info!("Stopped at slide {}", self.viewer.position());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use framedeck_core::ChangeLog;

    fn app() -> ViewerApp {
        let log = ChangeLog::from_json(
            r#"[
                [["dot", "cx", "0"], ["caption", "innerHTML", "A"]],
                [["dot", "cx", "5"]],
                [["caption", "innerHTML", "B"]]
            ]"#,
        )
        .unwrap();
        let config = ViewerConfig::default();
        ViewerApp::new(SlideViewer::new(log, &config).unwrap(), &config)
    }

    #[test]
    fn test_initial_render() {
        let app = app();
        let scene = app.scene().scene();
        assert_eq!(scene.get("dot", "cx"), Some("0"));
        assert_eq!(scene.content("slide_counter"), Some("Slide: 1/3"));
        assert_eq!(scene.content("speed_tracker"), Some("Interval: 100ms per slide"));
    }

    #[test]
    fn test_line_commands() {
        let mut app = app();
        assert_eq!(app.handle_line("next"), Flow::Continue);
        assert_eq!(app.handle_line("ArrowRight"), Flow::Continue);
        assert_eq!(app.scene().scene().content("caption"), Some("B"));

        app.handle_line("prev");
        assert_eq!(app.viewer().state().current_frame, 1);
        assert_eq!(app.scene().scene().content("caption"), Some("A"));

        app.handle_line("bogus");
        app.handle_line("seek 9");
        assert_eq!(app.viewer().state().current_frame, 1);

        assert_eq!(app.handle_line(" quit "), Flow::Quit);
    }

    #[tokio::test(start_paused = true)]
    async fn test_autoplay_runs_to_last_slide() {
        let mut app = app();
        app.handle_line("play");
        assert!(app.viewer().state().is_playing);

        while app.timer.is_active() {
            let token = app.timer.tick().await;
            app.on_tick(token);
        }

        assert_eq!(app.viewer().state().current_frame, 2);
        assert!(!app.viewer().state().is_playing);
        assert_eq!(app.scene().scene().content("slide_counter"), Some("Slide: 3/3"));
    }

    #[test]
    fn test_status_lists_values() {
        let app = app();
        let status = app.status();
        assert!(status.starts_with("Slide 1/3 | paused | 100ms per slide"));
        assert!(status.contains("#dot cx = \"0\""));
    }
}
