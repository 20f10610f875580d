use core::hash::{Hash, Hasher};

/// Which outline formula applies to a shape.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum CornerFamily {
    #[default]
    Rounded,
    Oval,
}

impl TryFrom<i32> for CornerFamily {
    type Error = anyhow::Error;

    fn try_from(raw: i32) -> anyhow::Result<Self> {
        match raw {
            0 => Ok(CornerFamily::Rounded),
            1 => Ok(CornerFamily::Oval),
            other => anyhow::bail!("CornerFamily({other}) is invalid"),
        }
    }
}

/// Corner geometry of a shape: family plus a single corner size for all
/// four corners.
///
/// The corner size is sanitised on construction: negative, `-0.0` and
/// non-finite values become `0.0`, which keeps `Eq` and `Hash` consistent.
/// `Oval` ignores the size at draw time.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ShapeAppearance {
    corner_family: CornerFamily,
    corner_size: f32,
}

impl Eq for ShapeAppearance {}

impl Hash for ShapeAppearance {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.corner_family.hash(state);
        self.corner_size.to_bits().hash(state);
    }
}

impl ShapeAppearance {
    pub fn new(corner_family: CornerFamily, corner_size: f32) -> Self {
        Self { corner_family, corner_size: sanitize_size(corner_size) }
    }

    /// Rounded rectangle with the given corner size.
    pub fn rounded(corner_size: f32) -> Self {
        Self::new(CornerFamily::Rounded, corner_size)
    }

    pub fn oval() -> Self {
        Self::new(CornerFamily::Oval, 0.0)
    }

    pub fn builder() -> ShapeAppearanceBuilder {
        ShapeAppearanceBuilder::default()
    }

    #[inline]
    pub fn corner_family(&self) -> CornerFamily {
        self.corner_family
    }

    #[inline]
    pub fn corner_size(&self) -> f32 {
        self.corner_size
    }

    /// Copy of this appearance as a builder, for changing a single field.
    pub fn to_builder(self) -> ShapeAppearanceBuilder {
        ShapeAppearanceBuilder { corner_family: self.corner_family, corner_size: self.corner_size }
    }
}

#[derive(Debug, Copy, Clone, Default)]
pub struct ShapeAppearanceBuilder {
    corner_family: CornerFamily,
    corner_size: f32,
}

impl ShapeAppearanceBuilder {
    pub fn all_corners(self, corner_family: CornerFamily, corner_size: f32) -> Self {
        self.corner_family(corner_family).corner_size(corner_size)
    }

    pub fn corner_family(mut self, corner_family: CornerFamily) -> Self {
        self.corner_family = corner_family;
        self
    }

    pub fn corner_size(mut self, corner_size: f32) -> Self {
        self.corner_size = corner_size;
        self
    }

    pub fn build(self) -> ShapeAppearance {
        ShapeAppearance::new(self.corner_family, self.corner_size)
    }
}

#[inline]
fn sanitize_size(size: f32) -> f32 {
    if size.is_finite() && size > 0.0 { size } else { 0.0 }
}
