// SPDX-License-Identifier: MIT OR Apache-2.0
//! Render target boundary.
//!
//! The engine never touches a document directly. It emits [`RenderOp`]s and
//! the host applies them to whatever implements [`RenderTarget`].

use crate::change_log::Delta;
use indexmap::IndexMap;

/// Attribute name that replaces element content instead of setting an attribute
pub const CONTENT_ATTRIBUTE: &str = "innerHTML";

/// A single mutation of the rendered document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOp {
    /// Set a presentation attribute on an element of the graphic
    SetAttribute {
        /// Element id
        target: String,
        /// Attribute name
        attribute: String,
        /// New value
        value: String,
    },
    /// Replace the rendered content of an element
    ReplaceContent {
        /// Element id
        target: String,
        /// New content
        content: String,
    },
}

impl RenderOp {
    /// Route a `(target, attribute, value)` triple to the matching operation
    pub fn assign(target: &str, attribute: &str, value: &str) -> Self {
        if attribute == CONTENT_ATTRIBUTE {
            Self::ReplaceContent {
                target: target.to_owned(),
                content: value.to_owned(),
            }
        } else {
            Self::SetAttribute {
                target: target.to_owned(),
                attribute: attribute.to_owned(),
                value: value.to_owned(),
            }
        }
    }

    /// Id of the element this operation touches
    pub fn target(&self) -> &str {
        match self {
            Self::SetAttribute { target, .. } | Self::ReplaceContent { target, .. } => target,
        }
    }

    /// Apply this operation to a render target
    pub fn apply(&self, render: &mut dyn RenderTarget) {
        match self {
            Self::SetAttribute {
                target,
                attribute,
                value,
            } => render.set_attribute(target, attribute, value),
            Self::ReplaceContent { target, content } => render.replace_content(target, content),
        }
    }
}

impl From<&Delta> for RenderOp {
    fn from(delta: &Delta) -> Self {
        Self::assign(&delta.target, &delta.attribute, &delta.value)
    }
}

/// Something that can display the vector graphic and its text regions
pub trait RenderTarget {
    /// Set a presentation attribute
    fn set_attribute(&mut self, target: &str, attribute: &str, value: &str);

    /// Replace element content
    fn replace_content(&mut self, target: &str, content: &str);
}

/// In-memory document: the last value written to every (element, attribute)
///
/// Content replacements are stored under [`CONTENT_ATTRIBUTE`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryScene {
    values: IndexMap<(String, String), String>,
    writes: usize,
}

impl MemoryScene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of an attribute
    pub fn get(&self, target: &str, attribute: &str) -> Option<&str> {
        self.values
            .get(&(target.to_owned(), attribute.to_owned()))
            .map(String::as_str)
    }

    /// Current content of an element
    pub fn content(&self, target: &str) -> Option<&str> {
        self.get(target, CONTENT_ATTRIBUTE)
    }

    /// All stored values
    pub fn values(&self) -> &IndexMap<(String, String), String> {
        &self.values
    }

    /// Number of write calls received
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Apply a batch of operations
    pub fn apply_all<'a>(&mut self, ops: impl IntoIterator<Item = &'a RenderOp>) {
        for op in ops {
            op.apply(self);
        }
    }
}

impl RenderTarget for MemoryScene {
    fn set_attribute(&mut self, target: &str, attribute: &str, value: &str) {
        self.writes += 1;
        self.values
            .insert((target.to_owned(), attribute.to_owned()), value.to_owned());
    }

    fn replace_content(&mut self, target: &str, content: &str) {
        self.set_attribute(target, CONTENT_ATTRIBUTE, content);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_routing() {
        let op = RenderOp::from(&Delta::new("caption", "innerHTML", "Hello"));
        assert_eq!(
            op,
            RenderOp::ReplaceContent {
                target: "caption".into(),
                content: "Hello".into()
            }
        );

        let op = RenderOp::from(&Delta::new("box", "opacity", "0.5"));
        assert!(matches!(op, RenderOp::SetAttribute { ref attribute, .. } if attribute == "opacity"));
        assert_eq!(op.target(), "box");
    }

    #[test]
    fn test_memory_scene() {
        let mut scene = MemoryScene::new();
        scene.apply_all(&[
            RenderOp::assign("box", "fill", "red"),
            RenderOp::assign("box", "fill", "blue"),
            RenderOp::assign("caption", CONTENT_ATTRIBUTE, "Hi"),
        ]);
        assert_eq!(scene.get("box", "fill"), Some("blue"));
        assert_eq!(scene.content("caption"), Some("Hi"));
        assert_eq!(scene.write_count(), 3);
        assert_eq!(scene.values().len(), 2);
    }
}
