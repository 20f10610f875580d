use tiny_skia::{Path, PathBuilder};

use crate::coords::{Insets, Rect, Vec2};

use super::{CornerFamily, ShapeAppearance};

/// Cubic control distance for a quarter ellipse, as a fraction of the radius.
const KAPPA: f32 = 0.552_284_8;

/// Resolved outline kind, radius already clamped to the rectangle.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum OutlineShape {
    Rect,
    RoundRect { radius: f32 },
    Oval,
}

/// Geometric boundary of a drawable: the only source for paint, clip masks
/// and the host's outline query.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Outline {
    rect: Rect,
    shape: OutlineShape,
}

impl Outline {
    /// Effective rectangle the outline is inscribed in.
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.rect
    }

    #[inline]
    pub fn shape(&self) -> OutlineShape {
        self.shape
    }

    /// Corner radius actually used. Ovals report half the shorter side.
    pub fn corner_radius(&self) -> f32 {
        match self.shape {
            OutlineShape::Rect => 0.0,
            OutlineShape::RoundRect { radius } => radius,
            OutlineShape::Oval => self.rect.width().min(self.rect.height()) * 0.5,
        }
    }

    /// Same outline moved by `by`.
    #[inline]
    pub fn translate(&self, by: Vec2) -> Outline {
        Outline { rect: self.rect.translate(by), shape: self.shape }
    }

    /// Same outline re-anchored at the origin.
    #[inline]
    pub fn at_origin(&self) -> Outline {
        self.translate(-self.rect.origin)
    }

    /// Builds the clockwise path. `None` only for degenerate rectangles.
    pub fn to_path(&self) -> Option<Path> {
        let r = self.rect.to_skia()?;
        match self.shape {
            OutlineShape::Rect => Some(PathBuilder::from_rect(r)),
            OutlineShape::RoundRect { radius } => round_rect_path(r, radius),
            OutlineShape::Oval => oval_path(r),
        }
    }
}

/// Computes the outline for `bounds` shrunk by `inset`.
///
/// Returns `None` when the effective rectangle has no area; callers treat
/// that as "not ready yet".
pub fn compute_outline(bounds: Rect, inset: Insets, appearance: &ShapeAppearance) -> Option<Outline> {
    let rect = bounds.inset(inset);
    if rect.is_empty() || !rect.is_finite() {
        return None;
    }

    let shape = match appearance.corner_family() {
        CornerFamily::Oval => OutlineShape::Oval,
        CornerFamily::Rounded => {
            let max_radius = rect.width().min(rect.height()) * 0.5;
            let radius = appearance.corner_size().min(max_radius);
            if radius > 0.0 {
                OutlineShape::RoundRect { radius }
            } else {
                OutlineShape::Rect
            }
        }
    };

    Some(Outline { rect, shape })
}

fn round_rect_path(r: tiny_skia::Rect, radius: f32) -> Option<Path> {
    let (l, t, rt, b) = (r.left(), r.top(), r.right(), r.bottom());
    let c = radius * (1.0 - KAPPA);

    let mut pb = PathBuilder::new();
    pb.move_to(l + radius, t);
    pb.line_to(rt - radius, t);
    pb.cubic_to(rt - c, t, rt, t + c, rt, t + radius);
    pb.line_to(rt, b - radius);
    pb.cubic_to(rt, b - c, rt - c, b, rt - radius, b);
    pb.line_to(l + radius, b);
    pb.cubic_to(l + c, b, l, b - c, l, b - radius);
    pb.line_to(l, t + radius);
    pb.cubic_to(l, t + c, l + c, t, l + radius, t);
    pb.close();
    pb.finish()
}

fn oval_path(r: tiny_skia::Rect) -> Option<Path> {
    let (l, t, rt, b) = (r.left(), r.top(), r.right(), r.bottom());
    let cx = (l + rt) * 0.5;
    let cy = (t + b) * 0.5;
    let kx = (rt - l) * 0.5 * KAPPA;
    let ky = (b - t) * 0.5 * KAPPA;

    // Starts at 12 o'clock and runs clockwise in y-down space.
    let mut pb = PathBuilder::new();
    pb.move_to(cx, t);
    pb.cubic_to(cx + kx, t, rt, cy - ky, rt, cy);
    pb.cubic_to(rt, cy + ky, cx + kx, b, cx, b);
    pb.cubic_to(cx - kx, b, l, cy + ky, l, cy);
    pb.cubic_to(l, cy - ky, cx - kx, t, cx, t);
    pb.close();
    pb.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn bounds(w: f32, h: f32) -> Rect { Rect::new(0.0, 0.0, w, h) }

    /// Shoelace sum over path points; positive means clockwise in y-down space.
    fn signed_area(path: &Path) -> f32 {
        let pts = path.points();
        let n = pts.len();
        (0..n)
            .map(|i| {
                let (a, b) = (pts[i], pts[(i + 1) % n]);
                a.x * b.y - b.x * a.y
            })
            .sum()
    }

    // ── rounded ───────────────────────────────────────────────────────────

    #[test]
    fn zero_corner_size_is_plain_rectangle() {
        let outline = compute_outline(bounds(40.0, 30.0), Insets::zero(), &ShapeAppearance::rounded(0.0)).unwrap();
        assert_eq!(outline.shape(), OutlineShape::Rect);

        let path = outline.to_path().unwrap();
        let rect = PathBuilder::from_rect(tiny_skia::Rect::from_xywh(0.0, 0.0, 40.0, 30.0).unwrap());
        assert_eq!(path.points(), rect.points());
        assert_eq!(path.verbs(), rect.verbs());
    }

    #[test]
    fn oversized_radius_clamps_to_capsule() {
        let outline = compute_outline(bounds(100.0, 40.0), Insets::zero(), &ShapeAppearance::rounded(500.0)).unwrap();
        assert_eq!(outline.shape(), OutlineShape::RoundRect { radius: 20.0 });

        let b = outline.to_path().unwrap().bounds();
        assert_eq!((b.left(), b.top(), b.right(), b.bottom()), (0.0, 0.0, 100.0, 40.0));
    }

    #[test]
    fn square_with_oversized_radius_is_circle_sized() {
        let outline = compute_outline(bounds(50.0, 50.0), Insets::zero(), &ShapeAppearance::rounded(1e6)).unwrap();
        assert_eq!(outline.corner_radius(), 25.0);
    }

    // ── oval ──────────────────────────────────────────────────────────────

    #[test]
    fn oval_inscribed_in_inset_square() {
        let outline = compute_outline(bounds(100.0, 100.0), Insets::all(10), &ShapeAppearance::oval()).unwrap();
        assert_eq!(outline.bounds(), Rect::new(10.0, 10.0, 80.0, 80.0));

        let b = outline.to_path().unwrap().bounds();
        assert_eq!((b.left(), b.top(), b.right(), b.bottom()), (10.0, 10.0, 90.0, 90.0));
    }

    #[test]
    fn oval_ignores_corner_size() {
        let a = compute_outline(bounds(60.0, 20.0), Insets::zero(), &ShapeAppearance::new(CornerFamily::Oval, 3.0));
        let b = compute_outline(bounds(60.0, 20.0), Insets::zero(), &ShapeAppearance::oval());
        assert_eq!(a, b);
    }

    // ── winding / degenerate ──────────────────────────────────────────────

    #[test]
    fn every_family_winds_clockwise() {
        for appearance in [ShapeAppearance::rounded(0.0), ShapeAppearance::rounded(8.0), ShapeAppearance::oval()] {
            let path = compute_outline(bounds(64.0, 32.0), Insets::zero(), &appearance)
                .and_then(|o| o.to_path())
                .unwrap();
            assert!(signed_area(&path) > 0.0, "{appearance:?} is counter-clockwise");
        }
    }

    #[test]
    fn zero_area_has_no_outline() {
        assert!(compute_outline(bounds(0.0, 10.0), Insets::zero(), &ShapeAppearance::oval()).is_none());
        assert!(compute_outline(bounds(10.0, 10.0), Insets::new(5, 0, 5, 0), &ShapeAppearance::oval()).is_none());
    }

    #[test]
    fn asymmetric_inset_offsets_origin() {
        let outline = compute_outline(Rect::new(5.0, 5.0, 100.0, 60.0), Insets::new(6, 4, 10, 8), &ShapeAppearance::rounded(4.0)).unwrap();
        assert_eq!(outline.bounds(), Rect::new(11.0, 9.0, 84.0, 48.0));
    }

    proptest! {
        #[test]
        fn path_stays_inside_effective_rect(
            w in 1.0f32..400.0,
            h in 1.0f32..400.0,
            corner in 0.0f32..500.0,
            oval in any::<bool>(),
            inset in 0i32..20,
        ) {
            let appearance = if oval { ShapeAppearance::oval() } else { ShapeAppearance::rounded(corner) };
            let outer = bounds(w + 2.0 * inset as f32, h + 2.0 * inset as f32);
            let outline = compute_outline(outer, Insets::all(inset), &appearance).unwrap();
            let b = outline.to_path().unwrap().bounds();
            let eps = 1e-3;
            prop_assert!((b.left() - inset as f32).abs() < eps);
            prop_assert!((b.top() - inset as f32).abs() < eps);
            prop_assert!((b.width() - w).abs() < eps * w.max(1.0));
            prop_assert!((b.height() - h).abs() < eps * h.max(1.0));
        }
    }
}
