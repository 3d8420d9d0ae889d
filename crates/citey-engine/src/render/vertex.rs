use bytemuck::{Pod, Zeroable};

/// Vertex types that know their buffer layout.
pub trait VertexLayout: Pod {
    fn layout() -> wgpu::VertexBufferLayout<'static>;
}

/// Position + color, matching `a_position` (location 0) and `a_color`
/// (location 1) in the vertex shaders.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ColorVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl ColorVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x3  // color
    ];

    pub const fn new(position: [f32; 3], color: [f32; 3]) -> Self {
        Self { position, color }
    }
}

impl VertexLayout for ColorVertex {
    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ColorVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Index element types usable in a `Mesh`.
pub trait Index: Pod {
    const FORMAT: wgpu::IndexFormat;
}

impl Index for u16 {
    const FORMAT: wgpu::IndexFormat = wgpu::IndexFormat::Uint16;
}

impl Index for u32 {
    const FORMAT: wgpu::IndexFormat = wgpu::IndexFormat::Uint32;
}

/// The colored quad: red, yellow, green and blue corners.
pub const QUAD_VERTICES: [ColorVertex; 4] = [
    // Bottom left
    ColorVertex::new([-0.5, -0.5, 0.0], [1.0, 0.0, 0.0]),
    // Top left
    ColorVertex::new([-0.5, 0.5, 0.0], [1.0, 1.0, 0.0]),
    // Top right
    ColorVertex::new([0.5, 0.5, 0.0], [0.0, 1.0, 0.0]),
    // Bottom right
    ColorVertex::new([0.5, -0.5, 0.0], [0.0, 0.0, 1.0]),
];

pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_vertex_layout_matches_shader_inputs() {
        let layout = ColorVertex::layout();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.attributes.len(), 2);

        assert_eq!(layout.attributes[0].shader_location, 0);
        assert_eq!(layout.attributes[0].offset, 0);
        assert_eq!(layout.attributes[0].format, wgpu::VertexFormat::Float32x3);

        assert_eq!(layout.attributes[1].shader_location, 1);
        assert_eq!(layout.attributes[1].offset, 12);
        assert_eq!(layout.attributes[1].format, wgpu::VertexFormat::Float32x3);
    }

    #[test]
    fn index_formats() {
        assert_eq!(<u16 as Index>::FORMAT, wgpu::IndexFormat::Uint16);
        assert_eq!(<u32 as Index>::FORMAT, wgpu::IndexFormat::Uint32);
    }

    #[test]
    fn quad_indices_stay_in_range() {
        assert!(QUAD_INDICES.iter().all(|&i| (i as usize) < QUAD_VERTICES.len()));
        assert_eq!(QUAD_INDICES.len() % 3, 0);
    }

    #[test]
    fn quad_is_centered() {
        let sum = QUAD_VERTICES
            .iter()
            .fold([0.0f32; 3], |acc, v| [acc[0] + v.position[0], acc[1] + v.position[1], acc[2] + v.position[2]]);
        assert_eq!(sum, [0.0, 0.0, 0.0]);
    }
}
