//! Raster helpers shared by all shadow variants.

use tiny_skia::{BlendMode, FillRule, Mask, Paint, Pixmap, PixmapPaint, Transform};

use crate::blur;
use crate::coords::Vec2;
use crate::paint::Color;
use crate::shape::Outline;

// ── layer construction ────────────────────────────────────────────────────

/// Allocates a transparent pixmap, logging when the size is unusable.
pub(super) fn alloc(width: u32, height: u32) -> Option<Pixmap> {
    let pixmap = Pixmap::new(width, height);
    if pixmap.is_none() {
        log::warn!("shadow layer allocation failed ({width}x{height}); skipping");
    }
    pixmap
}

/// Allocates `width` x `height` grown by `pad` on every side. A size that
/// does not fit in `u32` takes the same skip path as a failed allocation.
pub(super) fn alloc_padded(width: u32, height: u32, pad: u32) -> Option<Pixmap> {
    let grown = pad
        .checked_mul(2)
        .and_then(|both| Some((width.checked_add(both)?, height.checked_add(both)?)));
    match grown {
        Some((w, h)) => alloc(w, h),
        None => {
            log::warn!("shadow layer size overflows ({width}x{height} padded by {pad}); skipping");
            None
        }
    }
}

/// Fills `outline` (already in pixmap-local coordinates) with `color`.
pub(super) fn fill_outline(pixmap: &mut Pixmap, outline: &Outline, color: Color) {
    let Some(path) = outline.to_path() else { return; };
    let mut paint = Paint::default();
    paint.set_color(color.to_skia());
    paint.anti_alias = true;
    pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
}

/// Inner-shadow band: `color` everywhere except where the outline, shifted
/// by `shift`, still covers. A shift toward top-left leaves the band along the
/// bottom-right inner edge and vice versa.
pub(super) fn inner_band(width: u32, height: u32, outline: &Outline, shift: Vec2, color: Color) -> Option<Pixmap> {
    let mut pixmap = alloc(width, height)?;
    pixmap.fill(color.to_skia());

    let path = outline.to_path()?;
    let mut eraser = Paint::default();
    eraser.blend_mode = BlendMode::Clear;
    eraser.anti_alias = true;
    pixmap.fill_path(&path, &eraser, FillRule::Winding, Transform::from_translate(shift.x, shift.y), None);
    Some(pixmap)
}

/// Blurs a finished layer. Edit mode keeps hard edges.
pub(super) fn soften(pixmap: &mut Pixmap, radius: f32, in_edit_mode: bool) {
    if in_edit_mode {
        return;
    }
    blur::blur_in_place(pixmap, radius);
}

// ── compositing ───────────────────────────────────────────────────────────

/// Canvas-sized coverage mask of `outline`; `inside = false` inverts it so
/// only pixels outside the outline pass.
pub(super) fn outline_mask(canvas: &Pixmap, outline: &Outline, inside: bool) -> Option<Mask> {
    let path = outline.to_path()?;
    let mut mask = Mask::new(canvas.width(), canvas.height())?;
    mask.fill_path(&path, FillRule::Winding, true, Transform::identity());
    if !inside {
        mask.data_mut().iter_mut().for_each(|coverage| *coverage = 255 - *coverage);
    }
    Some(mask)
}

/// Draws `layer` with its top-left corner at `at` (canvas coordinates).
pub(super) fn draw_layer(canvas: &mut Pixmap, layer: &Pixmap, at: Vec2, mask: Option<&Mask>) {
    canvas.draw_pixmap(
        0,
        0,
        layer.as_ref(),
        &PixmapPaint::default(),
        Transform::from_translate(at.x, at.y),
        mask,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Insets, Rect};
    use crate::shape::{compute_outline, ShapeAppearance};

    fn square(size: f32) -> Outline {
        compute_outline(Rect::new(0.0, 0.0, size, size), Insets::zero(), &ShapeAppearance::rounded(0.0)).unwrap()
    }

    #[test]
    fn padded_alloc_grows_every_side() {
        let p = alloc_padded(10, 4, 3).unwrap();
        assert_eq!((p.width(), p.height()), (16, 10));
    }

    #[test]
    fn padded_alloc_overflow_is_skipped() {
        assert!(alloc_padded(u32::MAX, 4, 1).is_none());
        assert!(alloc_padded(4, 4, u32::MAX).is_none());
    }

    #[test]
    fn band_shifted_up_left_sits_bottom_right() {
        let band = inner_band(20, 20, &square(20.0), Vec2::splat(-5.0), Color::BLACK).unwrap();
        assert_eq!(band.pixel(2, 2).unwrap().alpha(), 0);
        assert_eq!(band.pixel(18, 18).unwrap().alpha(), 255);
    }

    #[test]
    fn inverted_mask_blocks_inside() {
        let canvas = Pixmap::new(30, 30).unwrap();
        let outline = square(10.0).translate(Vec2::splat(10.0));
        let outside = outline_mask(&canvas, &outline, false).unwrap();
        assert_eq!(outside.data()[15 * 30 + 15], 0);
        assert_eq!(outside.data()[0], 255);
    }
}
