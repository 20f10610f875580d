use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use tiny_skia::Pixmap;

use neumorph_engine::coords::Rect;
use neumorph_engine::logging::{init_logging, LoggingConfig};
use neumorph_engine::paint::{Color, ColorStateList, PaintStyle, StateSet};
use neumorph_engine::{
    CacheConfig, CornerFamily, DrawableFactory, RenderCache, ReusableParams, ShapeAppearance, ShapeVariant,
};

const CELL: u32 = 180;
const SHAPE: f32 = 112.0;
const ELEVATION: f32 = 9.0;

const SURFACE: Color = Color::from_argb(0xFF_E0_E5_EC);
const HIGHLIGHT: Color = Color::from_argb(0xFF_FF_FF_FF);
const SHADE: Color = Color::from_argb(0xFF_A3_B1_C6);
const ACCENT: Color = Color::from_argb(0xFF_62_72_A4);

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let mut out = PathBuf::from("neumorph-sheet.png");
    let mut in_edit_mode = false;
    for arg in std::env::args_os().skip(1) {
        if arg == "--edit" {
            in_edit_mode = true;
        } else {
            out = PathBuf::from(arg);
        }
    }

    let sheet = render_sheet(in_edit_mode)?;
    save_png(&sheet, &out).with_context(|| format!("writing {}", out.display()))?;
    log::info!("wrote {} ({}x{})", out.display(), sheet.width(), sheet.height());
    Ok(())
}

/// One row per shadow variant, one column per corner style, plus a last
/// row showing a pressed-state button with a stroke.
fn render_sheet(in_edit_mode: bool) -> Result<Pixmap> {
    let variants = [ShapeVariant::Flat, ShapeVariant::Pressed, ShapeVariant::Basin];
    let appearances = [
        ShapeAppearance::rounded(28.0),
        ShapeAppearance::oval(),
        ShapeAppearance::builder().all_corners(CornerFamily::Rounded, 0.0).build(),
    ];

    let cols = appearances.len() as u32;
    let rows = variants.len() as u32 + 1;
    let mut sheet = Pixmap::new(CELL * cols, CELL * rows).context("sheet allocation failed")?;
    sheet.fill(SURFACE.to_skia());

    let cache = Rc::new(RenderCache::new(CacheConfig::default()));
    let mut factory = DrawableFactory::new(cache.config()).with_cache(cache.clone());

    for (row, &variant) in variants.iter().enumerate() {
        for (col, &appearance) in appearances.iter().enumerate() {
            let params = ReusableParams {
                width: SHAPE,
                height: SHAPE,
                in_edit_mode,
                variant,
                appearance,
                shadow_elevation: ELEVATION,
                shadow_color_light: HIGHLIGHT,
                shadow_color_dark: SHADE,
                fill_color: Some(ColorStateList::value_of(SURFACE)),
                ..ReusableParams::default()
            };
            let mut drawable = factory.create_reusable(&params);
            drawable.set_bounds(cell_rect(row as u32, col as u32));
            drawable.draw(&mut sheet);
        }
    }

    // Stateful button: resting, pressed, and pressed with a lifted z.
    let button = ReusableParams {
        width: SHAPE,
        height: SHAPE * 0.5,
        in_edit_mode,
        appearance: ShapeAppearance::rounded(SHAPE * 0.25),
        shadow_elevation: ELEVATION * 0.6,
        shadow_color_light: HIGHLIGHT,
        shadow_color_dark: SHADE,
        fill_color: Some(ColorStateList::new(vec![(StateSet::PRESSED, ACCENT.with_alpha(60)), (StateSet::EMPTY, SURFACE)])),
        stroke_width: 2.0,
        stroke_color: Some(ColorStateList::value_of(ACCENT)),
        ..ReusableParams::default()
    };
    let row = rows - 1;
    for col in 0..cols {
        let mut drawable = factory.create_reusable(&button);
        let cell = cell_rect(row, col);
        drawable.set_bounds(Rect::new(cell.left(), cell.top() + SHAPE * 0.25, SHAPE, SHAPE * 0.5));
        drawable.set_paint_style(PaintStyle::FillAndStroke);
        if col > 0 {
            drawable.set_state(StateSet::ENABLED | StateSet::PRESSED);
        }
        if col == 2 {
            drawable.set_z(ELEVATION * 1.2);
        }
        drawable.draw(&mut sheet);
    }

    log::debug!("sheet rendered: {:?}", cache.stats());
    Ok(sheet)
}

fn cell_rect(row: u32, col: u32) -> Rect {
    let margin = (CELL as f32 - SHAPE) * 0.5;
    Rect::new((col * CELL) as f32 + margin, (row * CELL) as f32 + margin, SHAPE, SHAPE)
}

fn save_png(pixmap: &Pixmap, path: &Path) -> Result<()> {
    let mut rgba = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    let image = image::RgbaImage::from_raw(pixmap.width(), pixmap.height(), rgba)
        .context("pixel buffer does not match sheet size")?;
    image.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}
