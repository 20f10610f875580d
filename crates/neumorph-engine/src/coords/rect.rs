use super::{Insets, Vec2};

/// Axis-aligned rectangle in device pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(self) -> f32 {
        self.origin.x
    }

    #[inline]
    pub fn top(self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn right(self) -> f32 {
        self.origin.x + self.size.x
    }

    #[inline]
    pub fn bottom(self) -> f32 {
        self.origin.y + self.size.y
    }

    #[inline]
    pub fn width(self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(self) -> f32 {
        self.size.y
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.origin.is_finite() && self.size.is_finite()
    }

    /// Shrinks each edge independently. Width/height never go below zero.
    #[inline]
    pub fn inset(self, insets: Insets) -> Rect {
        Rect::new(
            self.origin.x + insets.left as f32,
            self.origin.y + insets.top as f32,
            (self.size.x - insets.h() as f32).max(0.0),
            (self.size.y - insets.v() as f32).max(0.0),
        )
    }

    #[inline]
    pub fn translate(self, by: Vec2) -> Rect {
        Rect::from_origin_size(self.origin + by, self.size)
    }

    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Whole-pixel size of the rectangle, truncated like an integer bitmap
    /// allocation would be. `None` when either side is below one pixel.
    #[inline]
    pub fn pixel_size(self) -> Option<(u32, u32)> {
        if !self.is_finite() {
            return None;
        }
        let w = self.size.x.max(0.0) as u32;
        let h = self.size.y.max(0.0) as u32;
        if w == 0 || h == 0 { None } else { Some((w, h)) }
    }

    /// Converts to a tiny-skia rectangle. `None` for empty or non-finite rects.
    #[inline]
    pub fn to_skia(self) -> Option<tiny_skia::Rect> {
        if self.is_empty() {
            return None;
        }
        tiny_skia::Rect::from_xywh(self.origin.x, self.origin.y, self.size.x, self.size.y)
    }
}
