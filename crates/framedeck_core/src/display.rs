// SPDX-License-Identifier: MIT OR Apache-2.0
//! Display collaborators: slide position and autoplay interval readouts.

use crate::config::ViewerConfig;
use crate::render::RenderTarget;
use crate::state::SlidePosition;

/// Receives fire-and-forget readout updates
pub trait DisplaySink {
    /// A frame change was committed
    fn show_position(&mut self, position: SlidePosition);

    /// The autoplay interval changed
    fn show_interval(&mut self, interval_ms: u32);
}

/// Text readout of the slide position
pub fn position_text(position: SlidePosition) -> String {
    format!("Slide: {position}")
}

/// Text readout of the autoplay interval
pub fn interval_text(interval_ms: u32) -> String {
    format!("Interval: {interval_ms}ms per slide")
}

/// Render target that also writes readouts as text into two of its elements
#[derive(Debug, Clone)]
pub struct TextDisplay<R> {
    render: R,
    position_id: String,
    speed_id: String,
}

impl<R: RenderTarget> TextDisplay<R> {
    /// Wrap `render`, writing readouts into the given element ids
    pub fn new(render: R, position_id: impl Into<String>, speed_id: impl Into<String>) -> Self {
        Self {
            render,
            position_id: position_id.into(),
            speed_id: speed_id.into(),
        }
    }

    /// Wrap `render` using the display ids from a configuration
    pub fn from_config(render: R, config: &ViewerConfig) -> Self {
        Self::new(
            render,
            config.position_display_id.clone(),
            config.speed_display_id.clone(),
        )
    }

    /// The wrapped render target
    pub fn render(&self) -> &R {
        &self.render
    }

    /// Unwrap the render target
    pub fn into_inner(self) -> R {
        self.render
    }
}

impl<R: RenderTarget> RenderTarget for TextDisplay<R> {
    fn set_attribute(&mut self, target: &str, attribute: &str, value: &str) {
        self.render.set_attribute(target, attribute, value);
    }

    fn replace_content(&mut self, target: &str, content: &str) {
        self.render.replace_content(target, content);
    }
}

impl<R: RenderTarget> DisplaySink for TextDisplay<R> {
    fn show_position(&mut self, position: SlidePosition) {
        self.render
            .replace_content(&self.position_id, &position_text(position));
    }

    fn show_interval(&mut self, interval_ms: u32) {
        self.render
            .replace_content(&self.speed_id, &interval_text(interval_ms));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::MemoryScene;

    #[test]
    fn test_text_readouts() {
        let mut display = TextDisplay::new(MemoryScene::new(), "counter", "speed");
        display.show_position(SlidePosition { slide: 3, total: 10 });
        display.show_interval(115);

        let scene = display.into_inner();
        assert_eq!(scene.content("counter"), Some("Slide: 3/10"));
        assert_eq!(scene.content("speed"), Some("Interval: 115ms per slide"));
    }
}
