use std::cell::RefCell;
use std::rc::Rc;

use crate::coords::Insets;
use crate::image::BackgroundImage;
use crate::paint::{Color, ColorStateList, PaintStyle};
use crate::shadow::ShapeVariant;
use crate::shape::ShapeAppearance;

/// Render state handle shared between drawables until one of them forks it.
pub type SharedState = Rc<RefCell<RenderState>>;

/// Everything a drawable paints from.
///
/// Owned through a [`SharedState`] so several drawables built from the same
/// [`ConstantState`](super::ConstantState) see the same values until one calls
/// `mutate()`. `generation` is bumped whenever a field that changes the
/// outline or shadow bitmaps is modified, which is how sibling drawables
/// notice they are dirty.
#[derive(Debug, Clone)]
pub struct RenderState {
    pub(crate) appearance: ShapeAppearance,
    pub(crate) in_edit_mode: bool,

    pub(crate) inset: Insets,
    pub(crate) background: Option<BackgroundImage>,
    pub(crate) fill_color: Option<ColorStateList>,
    pub(crate) stroke_color: Option<ColorStateList>,
    pub(crate) stroke_width: f32,

    pub(crate) alpha: u8,

    pub(crate) variant: ShapeVariant,
    pub(crate) shadow_elevation: f32,
    pub(crate) shadow_color_light: Color,
    pub(crate) shadow_color_dark: Color,
    pub(crate) translation_z: f32,

    pub(crate) paint_style: PaintStyle,

    pub(crate) generation: u64,
}

impl Default for RenderState {
    fn default() -> Self {
        Self::new(ShapeAppearance::default())
    }
}

impl RenderState {
    pub fn new(appearance: ShapeAppearance) -> Self {
        Self {
            appearance,
            in_edit_mode: false,
            inset: Insets::zero(),
            background: None,
            fill_color: None,
            stroke_color: None,
            stroke_width: 0.0,
            alpha: 255,
            variant: ShapeVariant::default(),
            shadow_elevation: 0.0,
            shadow_color_light: Color::WHITE,
            shadow_color_dark: Color::BLACK,
            translation_z: 0.0,
            paint_style: PaintStyle::default(),
            generation: 0,
        }
    }

    pub(crate) fn into_shared(self) -> SharedState {
        Rc::new(RefCell::new(self))
    }

    #[inline]
    pub(crate) fn touch(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    #[inline]
    pub fn appearance(&self) -> ShapeAppearance {
        self.appearance
    }

    #[inline]
    pub fn in_edit_mode(&self) -> bool {
        self.in_edit_mode
    }

    #[inline]
    pub fn inset(&self) -> Insets {
        self.inset
    }

    #[inline]
    pub fn background(&self) -> Option<&BackgroundImage> {
        self.background.as_ref()
    }

    #[inline]
    pub fn fill_color(&self) -> Option<&ColorStateList> {
        self.fill_color.as_ref()
    }

    #[inline]
    pub fn stroke_color(&self) -> Option<&ColorStateList> {
        self.stroke_color.as_ref()
    }

    #[inline]
    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    #[inline]
    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    #[inline]
    pub fn variant(&self) -> ShapeVariant {
        self.variant
    }

    #[inline]
    pub fn shadow_elevation(&self) -> f32 {
        self.shadow_elevation
    }

    #[inline]
    pub fn shadow_color_light(&self) -> Color {
        self.shadow_color_light
    }

    #[inline]
    pub fn shadow_color_dark(&self) -> Color {
        self.shadow_color_dark
    }

    #[inline]
    pub fn translation_z(&self) -> f32 {
        self.translation_z
    }

    /// Effective depth: elevation plus translation.
    #[inline]
    pub fn z(&self) -> f32 {
        self.shadow_elevation + self.translation_z
    }

    #[inline]
    pub fn paint_style(&self) -> PaintStyle {
        self.paint_style
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
