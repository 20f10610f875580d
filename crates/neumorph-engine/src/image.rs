//! Background images and the bitmap helpers used to mask them.

use core::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tiny_skia::{FillRule, FilterQuality, Mask, Pixmap, PixmapPaint, Transform};

use crate::coords::{Insets, Rect};
use crate::shape::{compute_outline, Outline, ShapeAppearance};

static NEXT_IMAGE_ID: AtomicU64 = AtomicU64::new(1);

/// Shared handle to a background image.
///
/// Identity (for equality, hashing and cache keys) is the id assigned when
/// the pixels were wrapped, not the pixel contents. Clones share the id.
/// Visibility and alpha are per-handle and do not take part in identity.
#[derive(Debug, Clone)]
pub struct BackgroundImage {
    id: u64,
    pixels: Arc<Pixmap>,
    visible: bool,
    alpha: u8,
}

impl BackgroundImage {
    pub fn new(pixels: Pixmap) -> Self {
        Self {
            id: NEXT_IMAGE_ID.fetch_add(1, Ordering::Relaxed),
            pixels: Arc::new(pixels),
            visible: true,
            alpha: 255,
        }
    }

    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[inline]
    pub fn pixels(&self) -> &Pixmap {
        &self.pixels
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    #[inline]
    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    pub fn set_alpha(&mut self, alpha: u8) {
        self.alpha = alpha;
    }

    /// Scales the image to exactly `width` x `height`.
    ///
    /// `None` when either dimension is zero.
    pub fn to_bitmap(&self, width: u32, height: u32) -> Option<Pixmap> {
        let mut out = Pixmap::new(width, height)?;
        let sx = width as f32 / self.pixels.width() as f32;
        let sy = height as f32 / self.pixels.height() as f32;
        let paint = PixmapPaint { quality: FilterQuality::Bilinear, ..PixmapPaint::default() };
        let src: &Pixmap = &self.pixels;
        out.draw_pixmap(0, 0, src.as_ref(), &paint, Transform::from_scale(sx, sy), None);
        Some(out)
    }
}

impl PartialEq for BackgroundImage {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for BackgroundImage {}

impl Hash for BackgroundImage {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Returns a copy of `bitmap` with everything outside a rounded rectangle of
/// `radius` (clamped to half the shorter side) cleared.
pub fn clip_to_radius(bitmap: &Pixmap, radius: f32) -> Option<Pixmap> {
    let (w, h) = (bitmap.width(), bitmap.height());
    let outline = compute_outline(
        Rect::new(0.0, 0.0, w as f32, h as f32),
        Insets::zero(),
        &ShapeAppearance::rounded(radius),
    )?;
    let path = outline.to_path()?;

    let mut mask = Mask::new(w, h)?;
    mask.fill_path(&path, FillRule::Winding, true, Transform::identity());

    let mut out = Pixmap::new(w, h)?;
    out.draw_pixmap(0, 0, bitmap.as_ref(), &PixmapPaint::default(), Transform::identity(), Some(&mask));
    Some(out)
}

/// Scales `image` to the outline rectangle and masks it to the outline's
/// corner radius. Ovals use half the shorter side, so non-square ovals get a
/// capsule-shaped image.
pub fn masked_bitmap(image: &BackgroundImage, outline: &Outline) -> Option<Pixmap> {
    let (w, h) = outline.bounds().pixel_size()?;
    let scaled = image.to_bitmap(w, h)?;
    clip_to_radius(&scaled, outline.corner_radius())
}
