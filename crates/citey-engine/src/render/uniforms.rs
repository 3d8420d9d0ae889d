use bytemuck::{Pod, Zeroable};
use glam::Mat4;

/// Host copy of the projected vertex shader's block (std140).
///
/// ```glsl
/// uniform Projection { mat4 projection; } u_projection;
/// ```
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ProjectionBlock {
    /// Column-major.
    pub projection: [[f32; 4]; 4],
}

impl ProjectionBlock {
    pub fn new(projection: Mat4) -> Self {
        Self {
            projection: projection.to_cols_array_2d(),
        }
    }
}

impl Default for ProjectionBlock {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY)
    }
}

/// Host copy of the fragment shader's block (std140).
///
/// ```glsl
/// uniform Red { float red; } u_red;
/// ```
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct RedBlock {
    pub red: f32,
    pub _pad: [f32; 3], // uniform buffers are bound in 16-byte units
}

impl RedBlock {
    pub fn new(red: f32) -> Self {
        Self { red, _pad: [0.0; 3] }
    }
}

impl Default for RedBlock {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::{ShaderProgram, ShaderSource};

    fn program() -> ShaderProgram {
        ShaderProgram::link(
            &ShaderSource::projected_vertex(),
            &ShaderSource::basic_fragment(),
            &["projection", "red"],
        )
        .unwrap()
    }

    #[test]
    fn projection_matches_reflected_layout() {
        let program = program();
        let block = &program.vertex().uniforms[0];

        assert_eq!(std::mem::size_of::<ProjectionBlock>() as u32, block.size);
        assert_eq!(
            Some(std::mem::offset_of!(ProjectionBlock, projection) as u32),
            program.uniform("projection").and_then(|u| u.offset)
        );
    }

    #[test]
    fn red_matches_reflected_layout() {
        let program = program();
        let block = &program.fragment().uniforms[0];

        assert!(std::mem::size_of::<RedBlock>() as u32 >= block.size);
        assert_eq!(
            Some(std::mem::offset_of!(RedBlock, red) as u32),
            program.uniform("red").and_then(|u| u.offset)
        );
    }

    #[test]
    fn projection_is_column_major() {
        let m = Mat4::from_translation(glam::Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(ProjectionBlock::new(m).projection[3], [1.0, 2.0, 3.0, 1.0]);
    }

    #[test]
    fn defaults_are_identity_and_full_red() {
        assert_eq!(
            ProjectionBlock::default().projection,
            Mat4::IDENTITY.to_cols_array_2d()
        );
        assert_eq!(RedBlock::default().red, 1.0);
    }
}
