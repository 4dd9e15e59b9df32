// SPDX-License-Identifier: MIT OR Apache-2.0
//! Pan and zoom over the graphic's `viewBox`.
//!
//! Independent of frame state; the only output is a `viewBox` attribute
//! write on the render surface.

use crate::error::{DeckError, Result};
use crate::render::RenderOp;
use std::str::FromStr;

/// Visible window in graphic coordinates, as bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    /// Left edge
    pub x1: f64,
    /// Top edge
    pub y1: f64,
    /// Right edge
    pub x2: f64,
    /// Bottom edge
    pub y2: f64,
}

impl ViewBox {
    /// Window with the given origin and size
    pub fn from_origin_size(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x + width,
            y2: y + height,
        }
    }

    /// Width of the window
    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    /// Height of the window
    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    /// Rescale around `(px, py)`; that point keeps its place in the window
    pub fn scaled_about(&self, px: f64, py: f64, scale: f64) -> Self {
        Self {
            x1: px - (px - self.x1) * scale,
            y1: py - (py - self.y1) * scale,
            x2: px + (self.x2 - px) * scale,
            y2: py + (self.y2 - py) * scale,
        }
    }

    /// Shift by `(dx, dy)`
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            x1: self.x1 + dx,
            y1: self.y1 + dy,
            x2: self.x2 + dx,
            y2: self.y2 + dy,
        }
    }

    /// Whether all four bounds are finite and the window is not empty
    pub fn is_valid(&self) -> bool {
        [self.x1, self.y1, self.x2, self.y2]
            .iter()
            .all(|v| v.is_finite())
            && self.width() > 0.0
            && self.height() > 0.0
    }
}

impl FromStr for ViewBox {
    type Err = DeckError;

    /// Parse the SVG form `min-x min-y width height`
    fn from_str(s: &str) -> Result<Self> {
        let parts = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|part| !part.is_empty())
            .map(|part| part.parse::<f64>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| DeckError::InvalidViewBox(format!("{s:?}: {e}")))?;

        let [x, y, width, height] = parts[..] else {
            return Err(DeckError::InvalidViewBox(format!(
                "{s:?}: expected 4 numbers, got {}",
                parts.len()
            )));
        };
        if [x, y, width, height].iter().any(|v| !v.is_finite()) {
            return Err(DeckError::InvalidViewBox(format!("{s:?}: non-finite value")));
        }
        let view_box = Self::from_origin_size(x, y, width, height);
        if !view_box.is_valid() {
            return Err(DeckError::InvalidViewBox(format!("{s:?}: empty window")));
        }
        Ok(view_box)
    }
}

impl std::fmt::Display for ViewBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} {}", self.x1, self.y1, self.width(), self.height())
    }
}

/// Zoomable window onto the render surface
#[derive(Debug, Clone)]
pub struct Viewport {
    surface_id: String,
    view_box: ViewBox,
    zoom_sensitivity: f64,
}

impl Viewport {
    /// Create a viewport over `surface_id`
    pub fn new(surface_id: impl Into<String>, view_box: ViewBox, zoom_sensitivity: f64) -> Self {
        Self {
            surface_id: surface_id.into(),
            view_box,
            zoom_sensitivity,
        }
    }

    /// Current window
    pub fn view_box(&self) -> ViewBox {
        self.view_box
    }

    /// Zoom around a pointer given in graphic coordinates
    ///
    /// Positive wheel deltas zoom out, negative ones zoom in. A zoom that
    /// would leave the window non-finite or empty is rejected and the window
    /// stays as it was.
    pub fn zoom(&mut self, px: f64, py: f64, wheel_delta: f64) -> Result<RenderOp> {
        let scale = (self.zoom_sensitivity * wheel_delta).exp();
        if !scale.is_finite() || scale <= 0.0 {
            return Err(DeckError::InvalidViewBox(format!(
                "wheel delta {wheel_delta} gives zoom scale {scale}"
            )));
        }
        self.commit(self.view_box.scaled_about(px, py, scale))
    }

    /// Move the window by `(dx, dy)` graphic units
    pub fn pan(&mut self, dx: f64, dy: f64) -> Result<RenderOp> {
        self.commit(self.view_box.translated(dx, dy))
    }

    fn commit(&mut self, view_box: ViewBox) -> Result<RenderOp> {
        if !view_box.is_valid() {
            return Err(DeckError::InvalidViewBox(format!("window {view_box:?} is not usable")));
        }
        self.view_box = view_box;
        Ok(self.op())
    }

    fn op(&self) -> RenderOp {
        RenderOp::assign(&self.surface_id, "viewBox", &self.view_box.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let view_box: ViewBox = "0 0 1920 1080".parse().unwrap();
        assert_eq!(view_box.x2, 1920.0);
        assert_eq!(view_box.height(), 1080.0);

        let view_box: ViewBox = "-10,5, 20 30".parse().unwrap();
        assert_eq!(view_box.x1, -10.0);
        assert_eq!(view_box.y2, 35.0);
        assert_eq!(view_box.to_string(), "-10 5 20 30");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!("0 0 10".parse::<ViewBox>(), Err(DeckError::InvalidViewBox(_))));
        assert!(matches!("0 0 a 10".parse::<ViewBox>(), Err(DeckError::InvalidViewBox(_))));
        assert!(matches!("0 0 0 10".parse::<ViewBox>(), Err(DeckError::InvalidViewBox(_))));
    }

    #[test]
    fn test_parse_rejects_non_finite() {
        for text in ["0 0 NaN 10", "0 0 inf 10", "NaN 0 10 10", "0 -inf 10 10"] {
            assert!(
                matches!(text.parse::<ViewBox>(), Err(DeckError::InvalidViewBox(_))),
                "{text:?} should not parse"
            );
        }
    }

    #[test]
    fn test_zoom_rejects_runaway_scale() {
        let mut viewport = Viewport::new("slides", "0 0 100 100".parse().unwrap(), 0.001);
        let before = viewport.view_box();

        for delta in [1e6, -1e6, f64::NAN, f64::INFINITY] {
            let err = viewport.zoom(0.0, 0.0, delta).unwrap_err();
            assert!(matches!(err, DeckError::InvalidViewBox(_)), "delta {delta}");
            assert_eq!(viewport.view_box(), before);
        }

        let err = viewport.zoom(f64::NAN, 0.0, -10.0).unwrap_err();
        assert!(matches!(err, DeckError::InvalidViewBox(_)));

        let op = viewport.pan(1.0, 1.0).unwrap();
        assert_eq!(op, RenderOp::assign("slides", "viewBox", "1 1 100 100"));
    }

    #[test]
    fn test_pan_rejects_non_finite_offset() {
        let mut viewport = Viewport::new("slides", "0 0 100 100".parse().unwrap(), 0.001);
        assert!(viewport.pan(f64::NAN, 0.0).is_err());
        assert!(viewport.pan(0.0, f64::INFINITY).is_err());
        assert_eq!(viewport.view_box(), ViewBox::from_origin_size(0.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn test_zoom_keeps_pointer_fixed() {
        let mut viewport = Viewport::new("slides", "0 0 100 100".parse().unwrap(), 0.01);
        let before = viewport.view_box();
        let (px, py) = (25.0, 75.0);
        let rel_x = (px - before.x1) / before.width();
        let rel_y = (py - before.y1) / before.height();

        viewport.zoom(px, py, -50.0).unwrap();
        let after = viewport.view_box();
        assert!(after.width() < before.width());
        assert!(((px - after.x1) / after.width() - rel_x).abs() < 1e-9);
        assert!(((py - after.y1) / after.height() - rel_y).abs() < 1e-9);

        viewport.zoom(px, py, 50.0).unwrap();
        assert!((viewport.view_box().width() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_pan_emits_view_box() {
        let mut viewport = Viewport::new("slides", "0 0 100 50".parse().unwrap(), 0.01);
        let op = viewport.pan(10.0, -5.0).unwrap();
        assert_eq!(op, RenderOp::assign("slides", "viewBox", "10 -5 100 50"));
    }
}
