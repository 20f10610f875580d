//! Shape drawable: owns render state, derives outline and shadows, paints.
//!
//! Paint order is fixed: fill, background image, shadow variant, stroke.
//! Derived data (outline, shadow bitmaps, masked background) is rebuilt
//! lazily on the next `draw` after anything that affects it changes.

mod state;

use std::cell::Ref;
use std::rc::Rc;
use std::sync::Arc;

use tiny_skia::{FillRule, Paint, Path, Pixmap, PixmapPaint, Stroke, Transform};

use crate::cache::RenderCache;
use crate::coords::{Insets, Rect};
use crate::image::{self, BackgroundImage};
use crate::paint::{modulate_alpha, Color, ColorStateList, Opacity, PaintStyle, StateSet};
use crate::shadow::{Shadow, ShapeVariant};
use crate::shape::{compute_outline, Outline, ShapeAppearance};

pub use state::{RenderState, SharedState};

/// Counters for the expensive rebuild steps, for tests and diagnostics.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub outline_builds: u64,
    pub shadow_builds: u64,
    pub background_builds: u64,
}

/// Shareable definition of a drawable.
///
/// Drawables created from the same constant state share one [`RenderState`]
/// (setters on either are visible to both) until one of them calls
/// [`ShapeDrawable::mutate`].
#[derive(Debug, Clone)]
pub struct ConstantState {
    state: SharedState,
    cache: Option<Rc<RenderCache>>,
}

impl ConstantState {
    pub(crate) fn new(state: RenderState, cache: Option<Rc<RenderCache>>) -> Self {
        Self { state: state.into_shared(), cache }
    }

    /// New drawable on top of this state. It starts dirty.
    pub fn new_drawable(&self) -> ShapeDrawable {
        ShapeDrawable::from_shared(self.state.clone(), self.cache.clone())
    }

    pub fn state(&self) -> Ref<'_, RenderState> {
        self.state.borrow()
    }
}

/// A neumorphic shape renderable onto a `Pixmap`.
///
/// Single-threaded: state is shared through `Rc<RefCell<..>>`.
#[derive(Debug)]
pub struct ShapeDrawable {
    state: SharedState,
    cache: Option<Rc<RenderCache>>,

    bounds: Rect,
    state_set: StateSet,
    fill_color: Color,
    stroke_color: Color,

    outline: Option<Outline>,
    outline_path: Option<Path>,
    shadow: Shadow,
    background_bitmap: Option<Arc<Pixmap>>,

    dirty: bool,
    seen_generation: u64,
    needs_redraw: bool,
    stats: DrawStats,
}

impl ShapeDrawable {
    pub fn new(appearance: ShapeAppearance) -> Self {
        Self::with_state(RenderState::new(appearance))
    }

    pub fn with_state(state: RenderState) -> Self {
        Self::from_shared(state.into_shared(), None)
    }

    /// Routes shadow and background bitmaps through `cache`.
    pub fn with_cache(mut self, cache: Rc<RenderCache>) -> Self {
        self.cache = Some(cache);
        self.dirty = true;
        self
    }

    fn from_shared(state: SharedState, cache: Option<Rc<RenderCache>>) -> Self {
        let variant = state.borrow().variant;
        let mut drawable = Self {
            shadow: Shadow::for_variant(variant, state.clone()),
            state,
            cache,
            bounds: Rect::default(),
            state_set: StateSet::EMPTY,
            fill_color: Color::TRANSPARENT,
            stroke_color: Color::TRANSPARENT,
            outline: None,
            outline_path: None,
            background_bitmap: None,
            dirty: true,
            seen_generation: 0,
            needs_redraw: true,
            stats: DrawStats::default(),
        };
        drawable.update_colors_for_state();
        drawable
    }

    // ── sharing ───────────────────────────────────────────────────────────

    pub fn constant_state(&self) -> ConstantState {
        ConstantState { state: self.state.clone(), cache: self.cache.clone() }
    }

    /// Forks the render state so later changes stay local to this drawable,
    /// and re-points the shadow strategy at the copy.
    pub fn mutate(&mut self) -> &mut Self {
        let forked = self.state.borrow().clone().into_shared();
        self.state = forked;
        self.shadow.set_drawable_state(self.state.clone());
        self
    }

    // ── bounds / invalidation ─────────────────────────────────────────────

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        if self.bounds != bounds {
            self.bounds = bounds;
            self.dirty = true;
            self.invalidate_self();
        }
    }

    /// True when something visible changed since the last `draw`.
    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    pub fn stats(&self) -> DrawStats {
        self.stats
    }

    fn invalidate_self(&mut self) {
        self.needs_redraw = true;
    }

    /// Applies `f` to the shared state; bumps the generation when it reports
    /// a change to something the outline or shadows depend on.
    fn update_shape(&mut self, f: impl FnOnce(&mut RenderState) -> bool) {
        let changed = {
            let mut state = self.state.borrow_mut();
            let changed = f(&mut *state);
            if changed {
                state.touch();
            }
            changed
        };
        if changed {
            self.invalidate_self();
        }
    }

    /// Applies `f` to the shared state; only requests a repaint.
    fn update_paint(&mut self, f: impl FnOnce(&mut RenderState) -> bool) {
        let changed = f(&mut *self.state.borrow_mut());
        if changed {
            self.invalidate_self();
        }
    }

    // ── appearance / geometry ─────────────────────────────────────────────

    pub fn appearance(&self) -> ShapeAppearance {
        self.state.borrow().appearance
    }

    pub fn set_appearance(&mut self, appearance: ShapeAppearance) {
        self.update_shape(|s| replace(&mut s.appearance, appearance));
    }

    pub fn inset(&self) -> Insets {
        self.state.borrow().inset
    }

    pub fn set_inset(&mut self, inset: Insets) {
        self.update_shape(|s| replace(&mut s.inset, inset));
    }

    // ── background ────────────────────────────────────────────────────────

    pub fn background(&self) -> Option<BackgroundImage> {
        self.state.borrow().background.clone()
    }

    pub fn set_background(&mut self, background: Option<BackgroundImage>) {
        self.update_shape(|s| {
            // Same image id with different visibility/alpha is still a change.
            let same = match (&s.background, &background) {
                (Some(a), Some(b)) => a == b && a.is_visible() == b.is_visible() && a.alpha() == b.alpha(),
                (None, None) => true,
                _ => false,
            };
            s.background = background;
            !same
        });
    }

    // ── fill / stroke ─────────────────────────────────────────────────────

    pub fn fill_color(&self) -> Option<ColorStateList> {
        self.state.borrow().fill_color.clone()
    }

    pub fn set_fill_color(&mut self, fill_color: Option<ColorStateList>) {
        let changed = replace(&mut self.state.borrow_mut().fill_color, fill_color);
        if changed {
            self.on_state_change();
        }
    }

    pub fn stroke_color(&self) -> Option<ColorStateList> {
        self.state.borrow().stroke_color.clone()
    }

    pub fn set_stroke_color(&mut self, stroke_color: Option<ColorStateList>) {
        let changed = replace(&mut self.state.borrow_mut().stroke_color, stroke_color);
        if changed {
            self.on_state_change();
        }
    }

    pub fn stroke_width(&self) -> f32 {
        self.state.borrow().stroke_width
    }

    pub fn set_stroke_width(&mut self, stroke_width: f32) {
        let stroke_width = stroke_width.max(0.0);
        self.update_paint(|s| replace(&mut s.stroke_width, stroke_width));
    }

    pub fn set_stroke(&mut self, stroke_width: f32, stroke_color: Option<ColorStateList>) {
        self.set_stroke_width(stroke_width);
        self.set_stroke_color(stroke_color);
    }

    pub fn paint_style(&self) -> PaintStyle {
        self.state.borrow().paint_style
    }

    pub fn set_paint_style(&mut self, paint_style: PaintStyle) {
        self.update_paint(|s| replace(&mut s.paint_style, paint_style));
    }

    pub fn alpha(&self) -> u8 {
        self.state.borrow().alpha
    }

    pub fn set_alpha(&mut self, alpha: u8) {
        self.update_paint(|s| replace(&mut s.alpha, alpha));
    }

    /// Color filters are not supported; the call is accepted and ignored.
    pub fn set_color_filter<T>(&mut self, _filter: Option<T>) {}

    /// Shadows are alpha-blended, so the drawable never reports opaque.
    pub fn opacity(&self) -> Opacity {
        Opacity::Translucent
    }

    // ── shadow parameters ─────────────────────────────────────────────────

    pub fn variant(&self) -> ShapeVariant {
        self.state.borrow().variant
    }

    pub fn set_variant(&mut self, variant: ShapeVariant) {
        self.update_shape(|s| replace(&mut s.variant, variant));
        if self.shadow.variant() != variant {
            self.shadow = Shadow::for_variant(variant, self.state.clone());
        }
    }

    pub fn shadow_elevation(&self) -> f32 {
        self.state.borrow().shadow_elevation
    }

    pub fn set_shadow_elevation(&mut self, elevation: f32) {
        let elevation = if elevation.is_finite() { elevation.max(0.0) } else { 0.0 };
        self.update_shape(|s| replace(&mut s.shadow_elevation, elevation));
    }

    pub fn shadow_color_light(&self) -> Color {
        self.state.borrow().shadow_color_light
    }

    pub fn set_shadow_color_light(&mut self, color: Color) {
        self.update_shape(|s| replace(&mut s.shadow_color_light, color));
    }

    pub fn shadow_color_dark(&self) -> Color {
        self.state.borrow().shadow_color_dark
    }

    pub fn set_shadow_color_dark(&mut self, color: Color) {
        self.update_shape(|s| replace(&mut s.shadow_color_dark, color));
    }

    pub fn translation_z(&self) -> f32 {
        self.state.borrow().translation_z
    }

    /// Translation only moves outer shadows at draw time; bitmaps are kept.
    pub fn set_translation_z(&mut self, translation_z: f32) {
        self.update_paint(|s| replace(&mut s.translation_z, translation_z));
    }

    pub fn z(&self) -> f32 {
        self.state.borrow().z()
    }

    pub fn set_z(&mut self, z: f32) {
        let elevation = self.shadow_elevation();
        self.set_translation_z(z - elevation);
    }

    pub fn in_edit_mode(&self) -> bool {
        self.state.borrow().in_edit_mode
    }

    /// Design-time preview: shadows are drawn unblurred.
    pub fn set_in_edit_mode(&mut self, in_edit_mode: bool) {
        self.update_shape(|s| replace(&mut s.in_edit_mode, in_edit_mode));
    }

    pub fn shadow(&self) -> &Shadow {
        &self.shadow
    }

    // ── interaction state ─────────────────────────────────────────────────

    pub fn is_stateful(&self) -> bool {
        let state = self.state.borrow();
        state.fill_color.as_ref().is_some_and(ColorStateList::is_stateful)
            || state.stroke_color.as_ref().is_some_and(ColorStateList::is_stateful)
    }

    /// Resolved fill and stroke colors for the current interaction state.
    pub fn resolved_colors(&self) -> (Color, Color) {
        (self.fill_color, self.stroke_color)
    }

    /// Moves to a new interaction state. Returns `true` (and requests a
    /// repaint) only if a resolved color actually changed.
    pub fn set_state(&mut self, state_set: StateSet) -> bool {
        self.state_set = state_set;
        self.on_state_change()
    }

    fn on_state_change(&mut self) -> bool {
        let changed = self.update_colors_for_state();
        if changed {
            self.invalidate_self();
        }
        changed
    }

    fn update_colors_for_state(&mut self) -> bool {
        let state = self.state.borrow();
        let mut changed = false;

        let fill = state
            .fill_color
            .as_ref()
            .map_or(Color::TRANSPARENT, |list| list.color_for_state(self.state_set, self.fill_color));
        if fill != self.fill_color {
            self.fill_color = fill;
            changed = true;
        }

        let stroke = state
            .stroke_color
            .as_ref()
            .map_or(Color::TRANSPARENT, |list| list.color_for_state(self.state_set, self.stroke_color));
        if stroke != self.stroke_color {
            self.stroke_color = stroke;
            changed = true;
        }

        changed
    }

    // ── outline ───────────────────────────────────────────────────────────

    /// Outline for host clipping and elevation systems. Same function and
    /// inputs as the painted outline, so the two never diverge.
    pub fn outline(&self) -> Option<Outline> {
        let state = self.state.borrow();
        compute_outline(self.bounds, state.inset, &state.appearance)
    }

    /// Path painted by the last `draw`, if any.
    pub fn outline_path(&self) -> Option<&Path> {
        self.outline_path.as_ref()
    }

    // ── drawing ───────────────────────────────────────────────────────────

    fn is_dirty(&self) -> bool {
        self.dirty || self.state.borrow().generation != self.seen_generation
    }

    fn refresh(&mut self) {
        let (outline, variant, generation) = {
            let state = self.state.borrow();
            (compute_outline(self.bounds, state.inset, &state.appearance), state.variant, state.generation)
        };

        self.outline = outline;
        self.outline_path = outline.and_then(|o| o.to_path());
        self.stats.outline_builds += 1;

        if self.shadow.variant() != variant {
            // A sibling sharing this state switched variants.
            self.shadow = Shadow::for_variant(variant, self.state.clone());
        }

        let rebuilt = match &self.cache {
            Some(cache) => {
                let (shadow, rebuilt) = cache.shadow_for(&self.state, self.bounds);
                self.shadow = shadow;
                rebuilt
            }
            None => self.shadow.update_shadow_bitmap(self.bounds),
        };
        if rebuilt {
            self.stats.shadow_builds += 1;
        }

        self.update_background_bitmap();

        log::debug!("drawable refreshed: {:?} {:?}", variant, self.bounds);
        self.dirty = false;
        self.seen_generation = generation;
    }

    fn update_background_bitmap(&mut self) {
        let state = self.state.borrow();
        self.background_bitmap = match (state.background.as_ref(), self.outline.as_ref()) {
            (Some(image), Some(outline)) => {
                self.stats.background_builds += 1;
                match &self.cache {
                    Some(cache) => cache.masked_bitmap(image, outline),
                    None => image::masked_bitmap(image, outline).map(Arc::new),
                }
            }
            _ => None,
        };
    }

    /// Paints the shape onto `canvas`.
    ///
    /// Zero-area bounds return immediately without touching geometry or
    /// bitmaps.
    pub fn draw(&mut self, canvas: &mut Pixmap) {
        self.needs_redraw = false;

        let inset = self.state.borrow().inset;
        if self.bounds.inset(inset).is_empty() {
            return;
        }

        if self.is_dirty() {
            self.refresh();
        }

        let (Some(outline), Some(path)) = (self.outline, self.outline_path.as_ref()) else {
            return;
        };
        let state = self.state.borrow();

        let fill_alpha = modulate_alpha(self.fill_color.a, state.alpha);
        let stroke_alpha = modulate_alpha(self.stroke_color.a, state.alpha);

        if state.paint_style.has_fill() && fill_alpha > 0 {
            let mut paint = Paint::default();
            paint.set_color(self.fill_color.with_alpha(fill_alpha).to_skia());
            paint.anti_alias = true;
            canvas.fill_path(path, &paint, FillRule::Winding, Transform::identity(), None);
        }

        if let (Some(image), Some(bitmap)) = (state.background.as_ref(), self.background_bitmap.as_ref()) {
            let background_alpha = modulate_alpha(image.alpha(), state.alpha);
            if image.is_visible() && background_alpha > 0 {
                let paint = PixmapPaint { opacity: background_alpha as f32 / 255.0, ..PixmapPaint::default() };
                let origin = outline.bounds().origin;
                let pixels: &Pixmap = bitmap;
                canvas.draw_pixmap(0, 0, pixels.as_ref(), &paint, Transform::from_translate(origin.x, origin.y), None);
            }
        }

        self.shadow.draw(canvas, &outline);

        if state.paint_style.has_stroke() && state.stroke_width > 0.0 && stroke_alpha > 0 {
            let mut paint = Paint::default();
            paint.set_color(self.stroke_color.with_alpha(stroke_alpha).to_skia());
            paint.anti_alias = true;
            let stroke = Stroke { width: state.stroke_width, ..Stroke::default() };
            canvas.stroke_path(path, &paint, &stroke, Transform::identity(), None);
        }
    }
}

/// Stores `value` into `slot`, reporting whether it differed.
#[inline]
fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}


#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const GREY: Color = Color::from_rgb8(224, 229, 236);
    const BLUE: Color = Color::from_rgb8(30, 60, 200);

    fn raised(elevation: f32) -> ShapeDrawable {
        let mut d = ShapeDrawable::new(ShapeAppearance::rounded(12.0));
        d.set_fill_color(Some(ColorStateList::value_of(GREY)));
        d.set_shadow_elevation(elevation);
        d.set_bounds(Rect::new(20.0, 20.0, 80.0, 80.0));
        d
    }

    fn canvas() -> Pixmap {
        Pixmap::new(120, 120).unwrap()
    }

    // ── redraw / caching ──────────────────────────────────────────────────

    #[test]
    fn redraw_without_changes_reuses_everything() {
        let mut d = raised(6.0);
        let mut first = canvas();
        d.draw(&mut first);
        let after_first = d.stats();
        assert_eq!(after_first.outline_builds, 1);
        assert_eq!(after_first.shadow_builds, 1);

        let mut second = canvas();
        d.draw(&mut second);
        assert_eq!(d.stats(), after_first);
        assert_eq!(first.data(), second.data());
    }

    #[test]
    fn zero_area_draws_nothing() {
        let mut d = raised(6.0);
        d.set_bounds(Rect::new(10.0, 10.0, 0.0, 40.0));
        let mut c = canvas();
        d.draw(&mut c);
        assert!(c.data().iter().all(|&b| b == 0));
        assert_eq!(d.stats(), DrawStats::default());

        // Inset eating the whole bounds counts as zero area too.
        d.set_bounds(Rect::new(10.0, 10.0, 20.0, 20.0));
        d.set_inset(Insets::all(10));
        d.draw(&mut c);
        assert!(c.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn translation_z_repaints_without_reblurring() {
        let mut d = raised(6.0);
        d.draw(&mut canvas());
        assert!(!d.needs_redraw());

        d.set_translation_z(3.0);
        assert!(d.needs_redraw());
        d.draw(&mut canvas());
        assert_eq!(d.stats().shadow_builds, 1);
    }

    #[test]
    fn setting_same_value_keeps_clean() {
        let mut d = raised(6.0);
        d.draw(&mut canvas());
        d.set_alpha(255);
        d.set_shadow_elevation(6.0);
        d.set_bounds(Rect::new(20.0, 20.0, 80.0, 80.0));
        assert!(!d.needs_redraw());

        d.set_alpha(10);
        assert!(d.needs_redraw());
    }

    #[test]
    fn elevation_change_rebuilds_shadow() {
        let mut d = raised(6.0);
        d.draw(&mut canvas());
        d.set_shadow_elevation(9.0);
        d.draw(&mut canvas());
        assert_eq!(d.stats().shadow_builds, 2);
        assert_eq!(d.stats().outline_builds, 2);
    }

    // ── sharing ───────────────────────────────────────────────────────────

    #[test]
    fn siblings_share_state_until_mutate() {
        let cs = raised(4.0).constant_state();
        let mut a = cs.new_drawable();
        let mut b = cs.new_drawable();

        a.set_shadow_elevation(5.0);
        assert_eq!(b.shadow_elevation(), 5.0);

        b.mutate();
        b.set_shadow_elevation(9.0);
        assert_eq!(a.shadow_elevation(), 5.0);
        assert_eq!(cs.state().shadow_elevation(), 5.0);
    }

    #[test]
    fn sibling_change_marks_other_dirty() {
        let cs = raised(4.0).constant_state();
        let mut a = cs.new_drawable();
        let mut b = cs.new_drawable();
        a.set_bounds(Rect::new(0.0, 0.0, 60.0, 60.0));
        b.set_bounds(Rect::new(0.0, 0.0, 60.0, 60.0));
        b.draw(&mut canvas());

        a.set_inset(Insets::all(4));
        b.draw(&mut canvas());
        assert_eq!(b.stats().outline_builds, 2);
    }

    #[test]
    fn mutated_drawable_keeps_drawing_from_its_copy() {
        let mut d = raised(6.0);
        let cs = d.constant_state();
        d.mutate();
        cs.new_drawable().set_shadow_elevation(0.0);

        d.draw(&mut canvas());
        assert_eq!(d.shadow().layers().len(), 2);
    }

    #[test]
    fn variant_change_swaps_strategy() {
        let mut d = raised(6.0);
        d.set_variant(ShapeVariant::Pressed);
        assert_eq!(d.shadow().variant(), ShapeVariant::Pressed);
        d.draw(&mut canvas());
        assert_eq!(d.shadow().layers().len(), 2);

        d.set_variant(ShapeVariant::Basin);
        d.draw(&mut canvas());
        assert_eq!(d.shadow().layers().len(), 1);
    }

    // ── interaction state ─────────────────────────────────────────────────

    #[test]
    fn state_change_invalidates_only_when_color_changes() {
        let mut d = raised(0.0);
        d.set_fill_color(Some(ColorStateList::new(vec![(StateSet::PRESSED, BLUE), (StateSet::EMPTY, GREY)])));
        assert!(d.is_stateful());
        d.draw(&mut canvas());

        assert!(!d.set_state(StateSet::ENABLED));
        assert!(!d.needs_redraw());

        assert!(d.set_state(StateSet::ENABLED | StateSet::PRESSED));
        assert!(d.needs_redraw());
        assert_eq!(d.resolved_colors().0, BLUE);

        assert!(!d.set_state(StateSet::PRESSED));
    }

    #[test]
    fn unmatched_state_keeps_previous_color() {
        let mut d = raised(0.0);
        d.set_fill_color(Some(ColorStateList::value_of(GREY)));
        d.set_fill_color(Some(ColorStateList::new(vec![(StateSet::PRESSED, BLUE)])));
        assert_eq!(d.resolved_colors().0, GREY);

        d.set_fill_color(None);
        assert_eq!(d.resolved_colors().0, Color::TRANSPARENT);
        assert!(!d.is_stateful());
    }

    // ── painting ──────────────────────────────────────────────────────────

    #[test]
    fn outline_query_matches_painted_path() {
        let mut d = raised(6.0);
        d.set_inset(Insets::new(2, 4, 6, 8));
        d.draw(&mut canvas());
        let queried = d.outline().unwrap().to_path().unwrap();
        assert_eq!(queried.bounds(), d.outline_path().unwrap().bounds());
    }

    #[test]
    fn huge_elevation_draws_without_panicking() {
        let mut d = ShapeDrawable::new(ShapeAppearance::rounded(4.0));
        d.set_fill_color(Some(ColorStateList::value_of(GREY)));
        d.set_bounds(Rect::new(10.0, 10.0, 20.0, 20.0));
        for variant in [ShapeVariant::Flat, ShapeVariant::Pressed, ShapeVariant::Basin] {
            d.set_variant(variant);
            d.set_shadow_elevation(3.0e9);
            let mut c = Pixmap::new(40, 40).unwrap();
            d.draw(&mut c);
            assert_eq!(c.pixel(20, 20).unwrap().alpha(), 255);
        }
    }

    #[test]
    fn flat_without_elevation_paints_only_the_fill() {
        let mut d = raised(0.0);
        let mut c = canvas();
        d.draw(&mut c);
        assert!(d.shadow().layers().is_empty());
        assert_eq!(c.pixel(10, 10).unwrap().alpha(), 0);
        assert_eq!(c.pixel(110, 110).unwrap().alpha(), 0);
        assert_eq!(c.pixel(60, 60).unwrap().alpha(), 255);
    }

    #[test]
    fn flat_shadow_lands_outside_the_fill() {
        let mut d = raised(6.0);
        d.set_fill_color(None);
        let mut c = canvas();
        d.draw(&mut c);
        assert_eq!(c.pixel(60, 60).unwrap().alpha(), 0);
        assert!(c.pixel(102, 60).unwrap().alpha() > 0);
        assert!(c.pixel(17, 60).unwrap().alpha() > 0);
    }

    #[test]
    fn alpha_modulates_fill() {
        let mut d = raised(0.0);
        d.set_fill_color(Some(ColorStateList::value_of(Color::BLACK)));
        d.set_alpha(128);
        let mut c = canvas();
        d.draw(&mut c);
        let a = c.pixel(60, 60).unwrap().alpha();
        assert!(a.abs_diff(modulate_alpha(255, 128)) <= 1, "alpha {a}");
    }

    #[test]
    fn stroke_only_leaves_interior_empty() {
        let mut d = raised(0.0);
        d.set_paint_style(PaintStyle::Stroke);
        d.set_stroke(4.0, Some(ColorStateList::value_of(BLUE)));
        let mut c = canvas();
        d.draw(&mut c);
        assert_eq!(c.pixel(60, 60).unwrap().alpha(), 0);
        assert!(c.pixel(60, 20).unwrap().alpha() > 0);
    }

    #[test]
    fn background_image_is_clipped_to_outline() {
        let mut red = Pixmap::new(4, 4).unwrap();
        red.fill(tiny_skia::Color::from_rgba8(255, 0, 0, 255));

        let mut d = ShapeDrawable::new(ShapeAppearance::oval());
        d.set_bounds(Rect::new(20.0, 20.0, 80.0, 80.0));
        d.set_background(Some(BackgroundImage::new(red)));
        let mut c = canvas();
        d.draw(&mut c);

        let center = c.pixel(60, 60).unwrap().demultiply();
        assert_eq!((center.red(), center.alpha()), (255, 255));
        assert_eq!(c.pixel(21, 21).unwrap().alpha(), 0);
        assert_eq!(d.stats().background_builds, 1);
    }

    #[test]
    fn hidden_background_is_skipped() {
        let mut img = BackgroundImage::new(Pixmap::new(4, 4).unwrap());
        img.set_visible(false);
        let mut d = raised(0.0);
        d.set_fill_color(None);
        d.set_background(Some(img));
        let mut c = canvas();
        d.draw(&mut c);
        assert!(c.data().iter().all(|&b| b == 0));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn outline_query_equals_painted_outline(
            x in -50.0f32..50.0,
            y in -50.0f32..50.0,
            w in 0.0f32..200.0,
            h in 0.0f32..200.0,
            left in 0i32..40,
            top in 0i32..40,
            right in 0i32..40,
            bottom in 0i32..40,
            oval in any::<bool>(),
            corner in 0.0f32..150.0,
        ) {
            let appearance = if oval { ShapeAppearance::oval() } else { ShapeAppearance::rounded(corner) };
            let mut d = ShapeDrawable::new(appearance);
            d.set_fill_color(Some(ColorStateList::value_of(GREY)));
            d.set_bounds(Rect::new(x, y, w, h));
            d.set_inset(Insets::new(left, top, right, bottom));
            d.draw(&mut Pixmap::new(1, 1).unwrap());

            let queried = d.outline();
            prop_assert_eq!(queried, d.outline);
            match (queried.and_then(|o| o.to_path()), d.outline_path()) {
                (Some(q), Some(p)) => {
                    prop_assert_eq!(q.points(), p.points());
                    prop_assert_eq!(q.verbs(), p.verbs());
                }
                (None, None) => {}
                (q, p) => prop_assert!(false, "query path {} vs painted path {}", q.is_some(), p.is_some()),
            }
        }
    }

    #[test]
    fn shape_setters_rebuild_shadow() {
        let mut d = raised(6.0);
        d.draw(&mut canvas());

        d.set_appearance(ShapeAppearance::oval());
        d.set_shadow_color_light(Color::from_rgb8(250, 250, 250));
        d.set_shadow_color_dark(Color::from_rgb8(90, 90, 90));
        d.set_in_edit_mode(true);
        assert!(d.needs_redraw());

        d.draw(&mut canvas());
        assert_eq!(d.stats().shadow_builds, 2);
        assert_eq!(d.appearance(), ShapeAppearance::oval());
        assert_eq!(d.shadow_color_dark(), Color::from_rgb8(90, 90, 90));
        assert!(d.in_edit_mode());
    }

    // ── misc ──────────────────────────────────────────────────────────────

    #[test]
    fn z_is_elevation_plus_translation() {
        let mut d = raised(4.0);
        d.set_z(10.0);
        assert_eq!(d.translation_z(), 6.0);
        assert_eq!(d.z(), 10.0);
    }

    #[test]
    fn reports_translucent_and_ignores_color_filter() {
        let mut d = raised(4.0);
        d.set_color_filter(Some(0u32));
        assert_eq!(d.opacity(), Opacity::Translucent);
    }
}
