//! Screen-Space Geometry
//!
//! - [`Viewport`]: float viewport with a depth range, as set on a command list
//! - [`RenderViewport`]: integer viewport reported by a render view
//! - [`ScissorRect`]: integer scissor rectangle (exclusive max)
//! - [`ScreenRect`]: resolve region in pixels (exclusive max)

use glam::UVec2;

/// Float viewport with a depth range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }
}

impl Viewport {
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_depth_range(mut self, min_depth: f32, max_depth: f32) -> Self {
        self.min_depth = min_depth;
        self.max_depth = max_depth;
        self
    }

    /// Maps the depth range into the reverse-Z convention (`d' = 1 - d`).
    ///
    /// The bounds swap so that `min_depth <= max_depth` still holds.
    #[inline]
    #[must_use]
    pub fn reverse_depth(mut self) -> Self {
        let (min, max) = (self.min_depth, self.max_depth);
        self.min_depth = 1.0 - max;
        self.max_depth = 1.0 - min;
        self
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Integer bounding box of the viewport, truncating toward zero.
    #[must_use]
    pub fn scissor(&self) -> ScissorRect {
        ScissorRect {
            left: self.x as i32,
            top: self.y as i32,
            right: (self.x + self.width) as i32,
            bottom: (self.y + self.height) as i32,
        }
    }
}

impl From<RenderViewport> for Viewport {
    fn from(vp: RenderViewport) -> Self {
        Self::new(vp.x as f32, vp.y as f32, vp.width as f32, vp.height as f32)
    }
}

/// Integer viewport as tracked by a render view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderViewport {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl RenderViewport {
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Pixel region covered by this viewport, clamped to the positive quadrant.
    #[must_use]
    pub fn screen_rect(&self) -> ScreenRect {
        let min_x = self.x.max(0) as u32;
        let min_y = self.y.max(0) as u32;
        let max_x = self.x.saturating_add(self.width).max(0) as u32;
        let max_y = self.y.saturating_add(self.height).max(0) as u32;
        ScreenRect::new(UVec2::new(min_x, min_y), UVec2::new(max_x, max_y))
    }
}

/// Scissor rectangle; `right`/`bottom` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScissorRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

/// Pixel rectangle used by partial resolves; `max` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScreenRect {
    pub min: UVec2,
    pub max: UVec2,
}

impl ScreenRect {
    #[inline]
    #[must_use]
    pub const fn new(min: UVec2, max: UVec2) -> Self {
        Self { min, max }
    }

    #[inline]
    #[must_use]
    pub const fn from_bounds(min_x: u32, min_y: u32, max_x: u32, max_y: u32) -> Self {
        Self {
            min: UVec2::new(min_x, min_y),
            max: UVec2::new(max_x, max_y),
        }
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.max.x.saturating_sub(self.min.x)
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.max.y.saturating_sub(self.min.y)
    }

    /// Covered pixel count; zero for inverted rectangles.
    #[inline]
    #[must_use]
    pub fn area(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }
}
