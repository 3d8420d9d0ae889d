use winit::dpi::PhysicalSize;

/// Drawable area in physical pixels.
///
/// Mirrors the surface configuration; the GL-style viewport always covers
/// the whole framebuffer.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Width over height, `None` for a minimized or degenerate surface.
    pub fn aspect(self) -> Option<f32> {
        self.is_valid().then(|| self.width / self.height)
    }
}

impl From<PhysicalSize<u32>> for Viewport {
    fn from(size: PhysicalSize<u32>) -> Self {
        Self::new(size.width as f32, size.height as f32)
    }
}
