//! Rendering
//!
//! The game draws through a [`Canvas`], a handful of 2D primitives that any
//! backend can provide. [`DrawList`] records them instead of rasterizing,
//! which is what the headless build and the tests use.

pub mod scene;

use glam::Vec2;

use crate::sim::{Color, Rect};

/// Drawing primitives needed by the scene
pub trait Canvas {
    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Draw `content` centered on `anchor`
    fn text(&mut self, content: &str, anchor: Vec2, size: f32, color: Color);
}

/// One recorded primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        rect: Rect,
        color: Color,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Text {
        content: String,
        anchor: Vec2,
        size: f32,
        color: Color,
    },
}

/// Canvas that records every primitive for a frame
#[derive(Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(128),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Every text string drawn, in order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { content, .. } => Some(content.as_str()),
            _ => None,
        })
    }

    /// Text command whose content matches exactly
    pub fn find_text(&self, wanted: &str) -> Option<&DrawCommand> {
        self.commands
            .iter()
            .find(|cmd| matches!(cmd, DrawCommand::Text { content, .. } if content == wanted))
    }

    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::Circle { .. }))
            .count()
    }
}

impl Canvas for DrawList {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Rect { rect, color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn text(&mut self, content: &str, anchor: Vec2, size: f32, color: Color) {
        self.commands.push(DrawCommand::Text {
            content: content.to_string(),
            anchor,
            size,
            color,
        });
    }
}
