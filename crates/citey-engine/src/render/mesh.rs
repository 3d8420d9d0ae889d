use std::marker::PhantomData;

use wgpu::util::DeviceExt;

use super::vertex::{Index, VertexLayout};

/// Indexed triangle list living in GPU buffers.
pub struct Mesh<V: VertexLayout, I: Index> {
    vbo: wgpu::Buffer,
    ibo: wgpu::Buffer,
    index_count: u32,
    _marker: PhantomData<(V, I)>,
}

impl<V: VertexLayout, I: Index> Mesh<V, I> {
    /// Uploads `vertices` and `indices` into static buffers.
    pub fn create(device: &wgpu::Device, label: &str, vertices: &[V], indices: &[I]) -> Self {
        let vbo_label = format!("{label} vbo");
        let vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(vbo_label.as_str()),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let ibo_label = format!("{label} ibo");
        let ibo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(ibo_label.as_str()),
            contents: bytemuck::cast_slice(indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        log::debug!(
            "mesh `{label}`: {} vertices, {} indices",
            vertices.len(),
            indices.len()
        );

        Self {
            vbo,
            ibo,
            index_count: indices.len() as u32,
            _marker: PhantomData,
        }
    }

    /// Binds the buffers and issues one indexed draw. Empty meshes draw nothing.
    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        if self.index_count == 0 {
            return;
        }

        rpass.set_vertex_buffer(0, self.vbo.slice(..));
        rpass.set_index_buffer(self.ibo.slice(..), I::FORMAT);
        rpass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}
