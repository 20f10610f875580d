/// Per-edge shrinkage (device pixels) applied to a drawable's bounds before
/// any geometry is computed.
///
/// Edges are independent, so directional padding (start != end) is expressed
/// directly. Negative values grow the rectangle instead.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Insets {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Insets {
    #[inline]
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Same inset on every edge.
    #[inline]
    pub const fn all(v: i32) -> Self {
        Self::new(v, v, v, v)
    }

    #[inline]
    pub const fn zero() -> Self {
        Self::all(0)
    }

    /// Horizontal total (left + right).
    #[inline]
    pub const fn h(self) -> i32 {
        self.left.saturating_add(self.right)
    }

    /// Vertical total (top + bottom).
    #[inline]
    pub const fn v(self) -> i32 {
        self.top.saturating_add(self.bottom)
    }
}
