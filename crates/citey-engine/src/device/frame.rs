/// A single acquired surface frame.
///
/// Holding the surface texture blocks acquisition of the next frame, so this
/// is handed back to `Gpu::submit` as soon as recording is done.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
