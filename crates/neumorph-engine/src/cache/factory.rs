use core::fmt;
use std::rc::Rc;

use lru::LruCache;

use crate::coords::{Insets, Rect};
use crate::drawable::{ConstantState, RenderState, ShapeDrawable};
use crate::image::BackgroundImage;
use crate::paint::{Color, ColorStateList};
use crate::shadow::ShapeVariant;
use crate::shape::ShapeAppearance;

use super::key::{bucket, f32_to_bits};
use super::{capacity, CacheConfig, Fingerprint, RenderCache};

/// Everything that defines a reusable drawable.
#[derive(Debug, Clone, PartialEq)]
pub struct ReusableParams {
    pub width: f32,
    pub height: f32,
    pub in_edit_mode: bool,
    pub variant: ShapeVariant,
    pub appearance: ShapeAppearance,
    pub shadow_elevation: f32,
    pub shadow_color_light: Color,
    pub shadow_color_dark: Color,
    pub background: Option<BackgroundImage>,
    pub fill_color: Option<ColorStateList>,
    pub stroke_width: f32,
    pub stroke_color: Option<ColorStateList>,
    pub translation_z: f32,
    pub inset: Insets,
}

impl Default for ReusableParams {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            in_edit_mode: false,
            variant: ShapeVariant::default(),
            appearance: ShapeAppearance::default(),
            shadow_elevation: 0.0,
            shadow_color_light: Color::WHITE,
            shadow_color_dark: Color::BLACK,
            background: None,
            fill_color: None,
            stroke_width: 0.0,
            stroke_color: None,
            translation_z: 0.0,
            inset: Insets::zero(),
        }
    }
}

impl ReusableParams {
    fn to_state(&self) -> RenderState {
        let mut state = RenderState::new(self.appearance);
        state.in_edit_mode = self.in_edit_mode;
        state.variant = self.variant;
        state.shadow_elevation = if self.shadow_elevation.is_finite() { self.shadow_elevation.max(0.0) } else { 0.0 };
        state.shadow_color_light = self.shadow_color_light;
        state.shadow_color_dark = self.shadow_color_dark;
        state.background = self.background.clone();
        state.fill_color = self.fill_color.clone();
        state.stroke_width = self.stroke_width.max(0.0);
        state.stroke_color = self.stroke_color.clone();
        state.translation_z = self.translation_z;
        state.inset = self.inset;
        state
    }
}

/// Template identity: every field of [`ReusableParams`], sizes bucketed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateKey {
    width: u32,
    height: u32,
    in_edit_mode: bool,
    variant: ShapeVariant,
    appearance: ShapeAppearance,
    elevation: u32,
    light: Color,
    dark: Color,
    background: Option<u64>,
    fill_color: Option<ColorStateList>,
    stroke_width: u32,
    stroke_color: Option<ColorStateList>,
    translation_z: u32,
    inset: Insets,
}

impl TemplateKey {
    pub fn new(params: &ReusableParams, size_step: u32) -> Self {
        Self {
            width: bucket(params.width, size_step),
            height: bucket(params.height, size_step),
            in_edit_mode: params.in_edit_mode,
            variant: params.variant,
            appearance: params.appearance,
            elevation: f32_to_bits(params.shadow_elevation),
            light: params.shadow_color_light,
            dark: params.shadow_color_dark,
            background: params.background.as_ref().map(BackgroundImage::id),
            fill_color: params.fill_color.clone(),
            stroke_width: f32_to_bits(params.stroke_width),
            stroke_color: params.stroke_color.clone(),
            translation_z: f32_to_bits(params.translation_z),
            inset: params.inset,
        }
    }
}

impl Fingerprint for TemplateKey {}

/// Hands out drawables built from cached [`ConstantState`] templates.
///
/// Every drawable returned is already mutated, so callers can change it
/// freely without touching the template or its other users.
pub struct DrawableFactory {
    size_step: u32,
    templates: LruCache<TemplateKey, ConstantState>,
    cache: Option<Rc<RenderCache>>,
}

impl fmt::Debug for DrawableFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawableFactory")
            .field("size_step", &self.size_step)
            .field("templates", &self.templates.len())
            .field("cache", &self.cache)
            .finish()
    }
}

impl Default for DrawableFactory {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}

impl DrawableFactory {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            size_step: config.size_step,
            templates: LruCache::new(capacity(config.template_capacity)),
            cache: None,
        }
    }

    /// Drawables from this factory render through `cache`.
    pub fn with_cache(mut self, cache: Rc<RenderCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Independent drawable for `params`, bounds set to `(0, 0, width, height)`.
    pub fn create_reusable(&mut self, params: &ReusableParams) -> ShapeDrawable {
        let key = TemplateKey::new(params, self.size_step);
        if self.templates.contains(&key) {
            log::trace!("drawable template hit: {:016x}", key.value());
        } else {
            log::debug!("drawable template miss: {:016x}", key.value());
        }

        let cache = &self.cache;
        let template = self
            .templates
            .get_or_insert(key, || ConstantState::new(params.to_state(), cache.clone()));

        let mut drawable = template.new_drawable();
        drawable.mutate();
        drawable.set_bounds(Rect::new(0.0, 0.0, params.width, params.height));
        drawable
    }

    pub fn trim_memory(&mut self) {
        self.templates.clear();
    }
}
