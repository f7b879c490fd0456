use color_realm_core::{HorizontalDirection, Rect};

use crate::Body;

/// Horizontal extent of every moving platform.
pub const PLATFORM_WIDTH: f32 = 140.0;

/// Vertical extent of every moving platform.
pub const PLATFORM_HEIGHT: f32 = 22.0;

/// Platform sliding back and forth between two horizontal bounds.
#[derive(Clone, Debug, PartialEq)]
pub struct Platform {
    x: f32,
    y: f32,
    start_x: f32,
    move_range: f32,
    speed: f32,
    direction: HorizontalDirection,
    displacement: f32,
}

impl Platform {
    /// Creates a platform whose left edge travels within `[x, x + move_range]`.
    #[must_use]
    pub fn new(x: f32, y: f32, move_range: f32, speed: f32) -> Self {
        Self {
            x,
            y,
            start_x: x,
            move_range: move_range.max(0.0),
            speed,
            direction: HorizontalDirection::Right,
            displacement: 0.0,
        }
    }

    /// Leftmost position of the platform's left edge.
    #[must_use]
    pub const fn start_x(&self) -> f32 {
        self.start_x
    }

    /// Rightmost position of the platform's left edge.
    #[must_use]
    pub fn end_x(&self) -> f32 {
        self.start_x + self.move_range
    }

    /// Distance the platform travels between turning points.
    #[must_use]
    pub const fn move_range(&self) -> f32 {
        self.move_range
    }

    /// Distance covered per tick.
    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.speed
    }

    /// Direction the platform will travel on its next update.
    #[must_use]
    pub const fn direction(&self) -> HorizontalDirection {
        self.direction
    }

    /// Horizontal distance moved during the most recent update.
    #[must_use]
    pub const fn displacement(&self) -> f32 {
        self.displacement
    }
}

impl Body for Platform {
    fn update(&mut self) {
        let before = self.x;
        self.x += self.speed * self.direction.sign();

        let end_x = self.end_x();
        let bound = match self.direction {
            HorizontalDirection::Right => (self.x >= end_x).then_some(end_x),
            HorizontalDirection::Left => (self.x <= self.start_x).then_some(self.start_x),
        };
        if let Some(bound) = bound {
            self.x = bound;
            self.direction = self.direction.reversed();
        }

        self.displacement = self.x - before;
    }

    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, PLATFORM_WIDTH, PLATFORM_HEIGHT)
    }
}
