//! Gaussian blur over premultiplied RGBA pixmaps.
//!
//! Pure functions only: nothing here touches shared state, so bitmaps can be
//! prepared on a worker thread and handed back as `Pixmap`s (which are `Send`).

use tiny_skia::{Pixmap, PremultipliedColorU8};

/// Maps a shadow elevation to a blur radius in pixels.
///
/// Identity mapping: an elevation of N pixels spreads the shadow by N pixels.
#[inline]
pub fn blur_radius_for(elevation: f32) -> f32 {
    if elevation.is_finite() { elevation.max(0.0) } else { 0.0 }
}

/// Normalised 1D Gaussian kernel for `radius`, and its half-width.
///
/// `sigma = radius / 3`, so the kernel covers three standard deviations. The
/// half-width is capped at `max_half_width`.
pub(crate) fn gaussian_kernel(radius: f32, max_half_width: usize) -> (Vec<f32>, usize) {
    let half = (radius.ceil() as usize).min(max_half_width);
    if half == 0 {
        return (Vec::new(), 0);
    }

    let sigma = radius / 3.0;
    let two_sigma_sq = 2.0 * sigma * sigma;

    let mut kernel: Vec<f32> = (0..=half * 2)
        .map(|i| {
            let x = i as f32 - half as f32;
            (-x * x / two_sigma_sq).exp()
        })
        .collect();

    let sum: f32 = kernel.iter().sum();
    if sum > 0.0 {
        kernel.iter_mut().for_each(|k| *k /= sum);
    }
    (kernel, half)
}

/// Returns a blurred copy of `src` with the same dimensions.
pub fn blur(src: &Pixmap, radius: f32) -> Pixmap {
    let mut out = src.clone();
    blur_in_place(&mut out, radius);
    out
}

/// Blurs `pixmap` in place. Radius `<= 0` (or non-finite) is a no-op.
///
/// Samples past the edge clamp to the nearest edge pixel.
pub fn blur_in_place(pixmap: &mut Pixmap, radius: f32) {
    if !radius.is_finite() || radius <= 0.0 {
        return;
    }

    let width = pixmap.width() as usize;
    let height = pixmap.height() as usize;
    let (kernel, half) = gaussian_kernel(radius, width.max(height));
    if kernel.is_empty() {
        return;
    }

    let src: Vec<[f32; 4]> = bytemuck::cast_slice::<u8, [u8; 4]>(pixmap.data())
        .iter()
        .map(|p| [p[0] as f32, p[1] as f32, p[2] as f32, p[3] as f32])
        .collect();

    let mut temp = vec![[0.0f32; 4]; src.len()];
    let mut dst = vec![[0.0f32; 4]; src.len()];

    // Horizontal pass
    for y in 0..height {
        let row = y * width;
        for x in 0..width {
            let mut acc = [0.0f32; 4];
            for (i, weight) in kernel.iter().enumerate() {
                let cx = (x as isize + i as isize - half as isize).clamp(0, width as isize - 1) as usize;
                accumulate(&mut acc, &src[row + cx], *weight);
            }
            temp[row + x] = acc;
        }
    }

    // Vertical pass
    for y in 0..height {
        for x in 0..width {
            let mut acc = [0.0f32; 4];
            for (i, weight) in kernel.iter().enumerate() {
                let cy = (y as isize + i as isize - half as isize).clamp(0, height as isize - 1) as usize;
                accumulate(&mut acc, &temp[cy * width + x], *weight);
            }
            dst[y * width + x] = acc;
        }
    }

    for (px, v) in pixmap.pixels_mut().iter_mut().zip(dst.iter()) {
        let a = to_channel(v[3]);
        // Rounding can push a colour channel above alpha; premultiplied
        // storage forbids that, so clamp to alpha.
        *px = PremultipliedColorU8::from_rgba(
            to_channel(v[0]).min(a),
            to_channel(v[1]).min(a),
            to_channel(v[2]).min(a),
            a,
        )
        .unwrap_or(PremultipliedColorU8::TRANSPARENT);
    }
}

#[inline]
fn accumulate(acc: &mut [f32; 4], sample: &[f32; 4], weight: f32) {
    acc[0] += sample[0] * weight;
    acc[1] += sample[1] * weight;
    acc[2] += sample[2] * weight;
    acc[3] += sample[3] * weight;
}

#[inline]
fn to_channel(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiny_skia::{Color, Paint, Rect, Transform};

    fn square_pixmap(size: u32, inner: f32) -> Pixmap {
        let mut pixmap = Pixmap::new(size, size).unwrap();
        let mut paint = Paint::default();
        paint.set_color(Color::BLACK);
        let off = (size as f32 - inner) / 2.0;
        let rect = Rect::from_xywh(off, off, inner, inner).unwrap();
        pixmap.fill_rect(rect, &paint, Transform::identity(), None);
        pixmap
    }

    fn alpha_at(p: &Pixmap, x: u32, y: u32) -> u8 {
        p.pixel(x, y).unwrap().alpha()
    }

    #[test]
    fn zero_radius_is_identity() {
        let src = square_pixmap(20, 10.0);
        assert_eq!(blur(&src, 0.0).data(), src.data());
        assert_eq!(blur(&src, -3.0).data(), src.data());
        assert_eq!(blur(&src, f32::NAN).data(), src.data());
    }

    #[test]
    fn blur_spreads_alpha_outward() {
        let src = square_pixmap(40, 10.0);
        assert_eq!(alpha_at(&src, 12, 20), 0);

        let out = blur(&src, 6.0);
        assert_eq!((out.width(), out.height()), (40, 40));
        assert!(alpha_at(&out, 12, 20) > 0);
        assert!(alpha_at(&out, 20, 20) < 255);
    }

    #[test]
    fn huge_radius_does_not_panic() {
        let src = square_pixmap(8, 4.0);
        let out = blur(&src, 10_000.0);
        assert_eq!((out.width(), out.height()), (8, 8));
    }

    #[test]
    fn output_stays_premultiplied() {
        let mut src = Pixmap::new(16, 16).unwrap();
        src.fill(Color::from_rgba8(255, 255, 255, 200));
        let out = blur(&src, 5.0);
        for p in out.pixels() {
            assert!(p.red() <= p.alpha());
        }
    }

    #[test]
    fn kernel_is_normalised_and_capped() {
        let (kernel, half) = gaussian_kernel(9.0, 4);
        assert_eq!(half, 4);
        assert_eq!(kernel.len(), 9);
        let sum: f32 = kernel.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
    }

    #[test]
    fn elevation_maps_monotonically() {
        assert_eq!(blur_radius_for(0.0), 0.0);
        assert_eq!(blur_radius_for(-2.0), 0.0);
        assert!(blur_radius_for(4.0) < blur_radius_for(8.0));
    }
}
