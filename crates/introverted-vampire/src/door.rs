use std::fmt;

use vampire_engine::coords::{ColorRgb, Rect, Vec2, Viewport};

use crate::config::GameConfig;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DoorSide {
    Left,
    Right,
}

impl DoorSide {
    pub fn name(self) -> &'static str {
        match self {
            DoorSide::Left => "left",
            DoorSide::Right => "right",
        }
    }
}

/// A clickable panel drawn as a solid color block.
#[derive(Debug, Clone, PartialEq)]
pub struct Door {
    pub side: DoorSide,
    pub bounds: Rect,
    pub color: ColorRgb,
}

/// What a mouse-down landed on.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ClickTarget {
    Door(DoorSide),
    Background,
}

impl fmt::Display for ClickTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClickTarget::Door(side) => write!(f, "The {} door was clicked", side.name()),
            ClickTarget::Background => f.write_str("Clicked background"),
        }
    }
}

/// Margin actually used for `viewport`.
///
/// Clamped so both panels keep non-negative extents and stay inside the
/// window even when it is smaller than three margins across.
fn effective_margin(viewport: Viewport, margin: f32) -> f32 {
    margin
        .min(viewport.width / 3.0)
        .min(viewport.height / 2.0)
        .max(0.0)
}

/// Left and right panel bounds for a window of `viewport` size.
///
/// Pure in `(viewport, margin)`: the same size always yields the same bounds.
pub fn layout(viewport: Viewport, margin: f32) -> (Rect, Rect) {
    let m = effective_margin(viewport, margin);
    let half = viewport.width / 2.0;
    let w = (half - 1.5 * m).max(0.0);
    let h = (viewport.height - 2.0 * m).max(0.0);

    (Rect::new(m, m, w, h), Rect::new(half + 0.5 * m, m, w, h))
}

/// The two doors of the room.
#[derive(Debug, Clone, PartialEq)]
pub struct Doors {
    left: Door,
    right: Door,
    margin: f32,
}

impl Doors {
    pub fn new(viewport: Viewport, config: &GameConfig) -> Self {
        let (left, right) = layout(viewport, config.margin);
        Self {
            left: Door {
                side: DoorSide::Left,
                bounds: left,
                color: config.left_color,
            },
            right: Door {
                side: DoorSide::Right,
                bounds: right,
                color: config.right_color,
            },
            margin: config.margin,
        }
    }

    /// Recomputes both panels for a new window size.
    pub fn relayout(&mut self, viewport: Viewport) {
        let (left, right) = layout(viewport, self.margin);
        self.left.bounds = left;
        self.right.bounds = right;
    }

    /// Left door first, then right, then background. Bounds are inclusive,
    /// so a point on a shared edge goes to the left door.
    pub fn hit_test(&self, p: Vec2) -> ClickTarget {
        self.iter()
            .find(|door| door.bounds.contains(p))
            .map_or(ClickTarget::Background, |door| ClickTarget::Door(door.side))
    }

    /// Doors in draw and hit-test order.
    pub fn iter(&self) -> impl Iterator<Item = &Door> {
        [&self.left, &self.right].into_iter()
    }
}
