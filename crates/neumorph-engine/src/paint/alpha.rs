/// Scales `base` by a global `alpha`, both in `0..=255`.
///
/// `alpha + (alpha >> 7)` maps 0..=255 onto 0..=256 so that full alpha is an
/// exact identity; the product is then shifted back down by 8 bits.
#[inline]
pub const fn modulate_alpha(base: u8, alpha: u8) -> u8 {
    let scale = alpha as u32 + (alpha as u32 >> 7);
    ((base as u32 * scale) >> 8) as u8
}
