//! Reuse layer for expensive rasters.
//!
//! `RenderCache` holds prepared shadows and masked background bitmaps in
//! bounded LRU maps. It is injected into drawables as an `Rc`; nothing here
//! is global. Entries can be dropped at any time (`trim_memory`) and the
//! next draw simply rebuilds them.

mod factory;
mod key;

use core::fmt;
use std::cell::{Cell, RefCell};
use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use tiny_skia::Pixmap;

use crate::coords::Rect;
use crate::drawable::SharedState;
use crate::image::{self, BackgroundImage};
use crate::shadow::Shadow;
use crate::shape::Outline;

pub use factory::{DrawableFactory, ReusableParams, TemplateKey};
pub use key::{BitmapKey, Fingerprint, ShadowKey};

/// Sizing for the caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Prepared shadows kept alive.
    pub shape_capacity: usize,
    /// Masked background bitmaps kept alive.
    pub bitmap_capacity: usize,
    /// `ConstantState` templates held by a `DrawableFactory`.
    pub template_capacity: usize,
    /// Width of the size buckets used in cache keys, in pixels.
    pub size_step: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            shape_capacity: 64,
            bitmap_capacity: 32,
            template_capacity: 32,
            size_step: 100,
        }
    }
}

#[inline]
pub(crate) fn capacity(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap_or(NonZeroUsize::MIN)
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub shadow_hits: u64,
    pub shadow_misses: u64,
    pub bitmap_hits: u64,
    pub bitmap_misses: u64,
}

/// Shared cache of shadow variants and masked bitmaps.
///
/// Single-threaded: share it between drawables with `Rc`.
pub struct RenderCache {
    config: CacheConfig,
    shadows: RefCell<LruCache<ShadowKey, Shadow>>,
    bitmaps: RefCell<LruCache<BitmapKey, Arc<Pixmap>>>,
    stats: Cell<CacheStats>,
}

impl fmt::Debug for RenderCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderCache")
            .field("config", &self.config)
            .field("shadows", &self.shadows.borrow().len())
            .field("bitmaps", &self.bitmaps.borrow().len())
            .field("stats", &self.stats.get())
            .finish()
    }
}

impl Default for RenderCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl RenderCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            shadows: RefCell::new(LruCache::new(capacity(config.shape_capacity))),
            bitmaps: RefCell::new(LruCache::new(capacity(config.bitmap_capacity))),
            stats: Cell::new(CacheStats::default()),
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub fn stats(&self) -> CacheStats {
        self.stats.get()
    }

    pub fn shadow_len(&self) -> usize {
        self.shadows.borrow().len()
    }

    pub fn bitmap_len(&self) -> usize {
        self.bitmaps.borrow().len()
    }

    fn record(&self, f: impl FnOnce(&mut CacheStats)) {
        let mut stats = self.stats.get();
        f(&mut stats);
        self.stats.set(stats);
    }

    /// Shadow for `state` at `bounds`, bound to `state`.
    ///
    /// On a hit the cached strategy is cloned (bitmaps are shared `Arc`s) and
    /// re-targeted; it still rebuilds if its exact inputs differ from the
    /// caller's, e.g. another size inside the same bucket. The second value
    /// reports whether bitmaps were rendered.
    pub fn shadow_for(&self, state: &SharedState, bounds: Rect) -> (Shadow, bool) {
        let (key, variant) = {
            let s = state.borrow();
            (ShadowKey::new(&s, bounds, self.config.size_step), s.variant)
        };

        let cached = self.shadows.borrow_mut().get(&key).cloned();
        let hit = cached.is_some();
        let mut shadow = match cached {
            Some(mut shadow) => {
                shadow.set_drawable_state(state.clone());
                shadow
            }
            None => Shadow::for_variant(variant, state.clone()),
        };

        let rebuilt = shadow.update_shadow_bitmap(bounds);
        if rebuilt {
            // Detached snapshot: the entry must not follow the drawable's edits.
            let mut entry = shadow.clone();
            entry.set_drawable_state(state.borrow().clone().into_shared());
            self.shadows.borrow_mut().put(key, entry);
        }

        if hit {
            self.record(|s| s.shadow_hits += 1);
        } else {
            self.record(|s| s.shadow_misses += 1);
        }
        log::trace!("shadow cache {}: {:?} rebuilt={}", if hit { "hit" } else { "miss" }, variant, rebuilt);

        (shadow, rebuilt)
    }

    /// `image` scaled and masked to `outline`, shared between drawables.
    ///
    /// Entries whose pixel size differs from the exact request are treated
    /// as misses and replaced.
    pub fn masked_bitmap(&self, image: &BackgroundImage, outline: &Outline) -> Option<Arc<Pixmap>> {
        let (w, h) = outline.bounds().pixel_size()?;
        let key = BitmapKey::new(image.id(), outline, self.config.size_step);

        let cached = self
            .bitmaps
            .borrow_mut()
            .get(&key)
            .filter(|p| p.width() == w && p.height() == h)
            .cloned();
        if let Some(bitmap) = cached {
            self.record(|s| s.bitmap_hits += 1);
            return Some(bitmap);
        }

        self.record(|s| s.bitmap_misses += 1);
        let bitmap = Arc::new(image::masked_bitmap(image, outline)?);
        self.bitmaps.borrow_mut().put(key, bitmap.clone());
        log::trace!("bitmap cache miss: image {} at {w}x{h}", image.id());
        Some(bitmap)
    }

    /// Drops every entry. Hook this to the host's memory-pressure signal.
    pub fn trim_memory(&self) {
        let shadows = self.shadows.borrow().len();
        let bitmaps = self.bitmaps.borrow().len();
        self.shadows.borrow_mut().clear();
        self.bitmaps.borrow_mut().clear();
        log::debug!("render cache trimmed: {shadows} shadow(s), {bitmaps} bitmap(s)");
    }

    /// Drops every entry and resets the counters.
    pub fn clear(&self) {
        self.trim_memory();
        self.stats.set(CacheStats::default());
    }
}
