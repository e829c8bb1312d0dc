//! Geometric primitives: Point, Size, Rect and content-mode framing

#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn scale(&self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Self) -> Self::Output {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Self) -> Self::Output {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    /// A size with a zero (or negative) side has no area to lay content into.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn aspect_ratio(&self) -> Option<f32> {
        if self.is_empty() {
            None
        } else {
            Some(self.width / self.height)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            width: size.width,
            height: size.height,
        }
    }

    pub fn from_size(size: Size) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: size.width,
            height: size.height,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            width: self.width,
            height: self.height,
        }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && y >= self.y && x <= self.x + self.width && y <= self.y + self.height
    }

    /// Component-wise interpolation, `fraction` 0 yields `self`, 1 yields `target`.
    pub fn lerp(&self, target: &Rect, fraction: f32) -> Rect {
        Rect {
            x: self.x + (target.x - self.x) * fraction,
            y: self.y + (target.y - self.y) * fraction,
            width: self.width + (target.width - self.width) * fraction,
            height: self.height + (target.height - self.height) * fraction,
        }
    }
}

/// How content of a given intrinsic size is framed inside a container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContentMode {
    /// Whole content visible, letterboxed along one axis.
    AspectFit,
    /// Container fully covered, content cropped along one axis.
    AspectFill,
}

/// Computes the frame an image of `content` size occupies when laid into `container`.
///
/// Returns the container itself when the content has no usable size.
pub fn frame_for_content(content: Size, container: Rect, mode: ContentMode) -> Rect {
    let (Some(content_ratio), Some(container_ratio)) =
        (content.aspect_ratio(), container.size().aspect_ratio())
    else {
        return container;
    };

    let mut target = container.size();
    let aspect_height = container.width / content.width * content.height;
    let aspect_width = container.height / content.height * content.width;

    let wider_than_container = content_ratio > container_ratio;
    match (mode, wider_than_container) {
        (ContentMode::AspectFit, true) | (ContentMode::AspectFill, false) => {
            target.height = aspect_height;
        }
        (ContentMode::AspectFit, false) | (ContentMode::AspectFill, true) => {
            target.width = aspect_width;
        }
    }

    let x = container.x + (container.width - target.width) / 2.0;
    let y = container.y + (container.height - target.height) / 2.0;
    Rect::from_origin_size(Point::new(x, y), target)
}
