use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Index of a letter in the source phrase (spaces excluded).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceIndex(pub usize);

/// Visible area of the page in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }
}

/// Bounding box of a page landmark (footer, navigation grid), viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl AnchorRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    /// Center point, used as a letter's launch position.
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

/// Where a letter ends its flight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub pos: Vec2,
    /// True when this is an exit point rather than a landing slot.
    pub offscreen: bool,
}

impl Destination {
    pub fn landing(x: f32, y: f32) -> Self {
        Self { pos: Vec2::new(x, y), offscreen: false }
    }

    pub fn exit(x: f32, y: f32) -> Self {
        Self { pos: Vec2::new(x, y), offscreen: true }
    }
}
