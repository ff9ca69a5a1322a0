//! Geometric types for screen regions and coordinates

/// A pixel position on the virtual desktop or on the overlay surface
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Edges of a rectangle, right and bottom exclusive
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    /// Create a new rectangle from coordinates
    #[cfg(test)]
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a rectangle from an origin and an extent
    pub fn from_origin_size(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            left: x,
            top: y,
            right: x.saturating_add_unsigned(width),
            bottom: y.saturating_add_unsigned(height),
        }
    }

    /// Calculate the intersection of two rectangles
    pub fn intersect(&self, other: Rect) -> Option<Rect> {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right.min(other.right);
        let bottom = self.bottom.min(other.bottom);
        if left < right && top < bottom {
            Some(Rect {
                left,
                top,
                right,
                bottom,
            })
        } else {
            None
        }
    }

    /// Smallest rectangle covering both rectangles
    pub fn union(&self, other: Rect) -> Rect {
        Rect {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Get the width of the rectangle
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    /// Get the height of the rectangle
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Check if this rectangle fully contains another one
    #[cfg(test)]
    pub fn contains(&self, other: Rect) -> bool {
        other.left >= self.left
            && other.top >= self.top
            && other.right <= self.right
            && other.bottom <= self.bottom
    }
}

/// Bounding box of every attached display in one shared coordinate space.
///
/// The origin is negative when a secondary monitor sits left of or above the
/// primary one. Width and height are always at least one pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VirtualScreen {
    pub origin_x: i32,
    pub origin_y: i32,
    pub width: u32,
    pub height: u32,
}

impl Default for VirtualScreen {
    fn default() -> Self {
        Self {
            origin_x: 0,
            origin_y: 0,
            width: 1,
            height: 1,
        }
    }
}

impl VirtualScreen {
    pub fn new(origin_x: i32, origin_y: i32, width: u32, height: u32) -> Self {
        Self {
            origin_x,
            origin_y,
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Minimal rectangle enclosing every display, `None` if there are none
    pub fn bounding(displays: &[Rect]) -> Option<Self> {
        let (first, rest) = displays.split_first()?;
        let bounds = rest.iter().fold(*first, |acc, rect| acc.union(*rect));
        Some(Self::new(
            bounds.left,
            bounds.top,
            bounds.width().max(0) as u32,
            bounds.height().max(0) as u32,
        ))
    }

    pub fn origin(&self) -> Point {
        Point::new(self.origin_x, self.origin_y)
    }

    #[cfg(test)]
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.origin_x, self.origin_y, self.width, self.height)
    }
}

/// Coordinate space a selection is expressed in
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CoordSpace {
    /// Relative to the virtual screen origin (overlay surface pixels)
    Local,
    /// Virtual desktop coordinates, valid across monitor boundaries
    #[default]
    Absolute,
}

/// A user selected region of the screen
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub space: CoordSpace,
}

impl SelectionRect {
    pub fn absolute(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            space: CoordSpace::Absolute,
        }
    }

    #[cfg(test)]
    pub fn local(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            space: CoordSpace::Local,
        }
    }

    /// Normalise a drag between two points into a selection
    pub fn from_corners(anchor: Point, release: Point, space: CoordSpace) -> Self {
        Self {
            x: anchor.x.min(release.x),
            y: anchor.y.min(release.y),
            width: anchor.x.abs_diff(release.x),
            height: anchor.y.abs_diff(release.y),
            space,
        }
    }

    /// Express the selection in virtual desktop coordinates
    pub fn to_absolute(self, origin: Point) -> Self {
        match self.space {
            CoordSpace::Absolute => self,
            CoordSpace::Local => Self::absolute(
                self.x + origin.x,
                self.y + origin.y,
                self.width,
                self.height,
            ),
        }
    }

    /// Express the selection relative to the virtual screen origin
    #[cfg(test)]
    pub fn to_local(self, origin: Point) -> Self {
        match self.space {
            CoordSpace::Local => self,
            CoordSpace::Absolute => Self::local(
                self.x - origin.x,
                self.y - origin.y,
                self.width,
                self.height,
            ),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Edges `(x, y, x + width, y + height)` in the selection's own space
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.x, self.y, self.width, self.height)
    }

    /// The four values shown in the coordinate fields
    pub fn fields(&self) -> [i64; 4] {
        [
            self.x.into(),
            self.y.into(),
            self.width.into(),
            self.height.into(),
        ]
    }
}
