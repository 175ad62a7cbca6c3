//! Geometric types for placements in base-image pixel space
//!
//! Origin is the top-left corner of the base image, y grows downward.

/// Integer position in base-image pixel coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Width and height of a placement or image in pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width as a signed pixel count, saturating at `i32::MAX`
    pub fn signed_width(&self) -> i32 {
        i32::try_from(self.width).unwrap_or(i32::MAX)
    }

    /// Height as a signed pixel count, saturating at `i32::MAX`
    pub fn signed_height(&self) -> i32 {
        i32::try_from(self.height).unwrap_or(i32::MAX)
    }
}

/// Logical position and size of a rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    /// Create a rectangle anchored at `origin` with the given size
    pub fn from_origin_size(origin: Position, size: Size) -> Self {
        Self {
            left: origin.x,
            top: origin.y,
            right: origin.x.saturating_add(size.signed_width()),
            bottom: origin.y.saturating_add(size.signed_height()),
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Check if this rectangle contains a point (right and bottom edges excluded)
    pub fn contains(&self, point: Position) -> bool {
        point.x >= self.left && point.x < self.right && point.y >= self.top && point.y < self.bottom
    }
}

/// Clamp the origin of a `size` box so it stays inside a `canvas`.
///
/// A box larger than the canvas along an axis is pinned to 0 on that axis.
pub fn clamp_origin(origin: Position, size: Size, canvas: Size) -> Position {
    let max_x = canvas
        .signed_width()
        .saturating_sub(size.signed_width())
        .max(0);
    let max_y = canvas
        .signed_height()
        .saturating_sub(size.signed_height())
        .max(0);
    Position::new(origin.x.clamp(0, max_x), origin.y.clamp(0, max_y))
}
