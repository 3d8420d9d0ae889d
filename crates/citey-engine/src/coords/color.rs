/// Linear RGBA color.
///
/// Used for the surface clear color. Values are expected in linear space; the
/// surface format decides whether an sRGB encode happens on store.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ColorRgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ColorRgba {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn gray(level: f32) -> Self {
        Self::new(level, level, level, 1.0)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }

    pub(crate) fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gray_is_opaque() {
        assert_eq!(ColorRgba::gray(0.5), ColorRgba::new(0.5, 0.5, 0.5, 1.0));
    }

    #[test]
    fn non_finite_is_detected() {
        assert!(ColorRgba::gray(0.5).is_finite());
        assert!(!ColorRgba::new(f32::INFINITY, 0.0, 0.0, 1.0).is_finite());
    }

    #[test]
    fn widens_to_wgpu_color() {
        let c = ColorRgba::new(0.25, 0.5, 0.75, 1.0).to_wgpu();
        assert_eq!((c.r, c.g, c.b, c.a), (0.25, 0.5, 0.75, 1.0));
    }
}
