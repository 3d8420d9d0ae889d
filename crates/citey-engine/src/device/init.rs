/// Initialization parameters for the GPU layer.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB surface format.
    ///
    /// Off by default: fragment colors are stored as written, which is what a
    /// default GL framebuffer does.
    pub prefer_srgb: bool,

    /// Present mode. `Fifo` is vsync and always supported.
    pub present_mode: wgpu::PresentMode,

    /// Alpha mode preference; replaced by a supported mode when unavailable.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub required_features: wgpu::Features,

    /// Limits requested from the adapter. The quad needs nothing beyond the
    /// downlevel WebGL2 set.
    pub required_limits: wgpu::Limits,

    /// Hint only; support depends on platform/backend.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: false,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
            desired_maximum_frame_latency: 2,
        }
    }
}
