//! CPU model of the two shader stages.
//!
//! Mirrors the GLSL line for line so the stage contracts can be checked
//! without a GPU. Interpolation stands in for the rasterizer.

use glam::{Mat4, Vec3, Vec4};

/// What the vertex stage hands to the rasterizer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct VertexOutput {
    /// Clip-space position (`gl_Position`).
    pub clip_position: Vec4,
    /// `VertexData.color`, forwarded unchanged.
    pub color: Vec3,
}

/// `basic_vertex.glsl` when `projection` is `None`, `projected_vertex.glsl` otherwise.
pub fn vertex_stage(position: Vec3, color: Vec3, projection: Option<Mat4>) -> VertexOutput {
    let homogeneous = position.extend(1.0);
    let clip_position = match projection {
        Some(m) => m * homogeneous,
        None => homogeneous,
    };

    VertexOutput {
        clip_position,
        color,
    }
}

/// `basic_fragment.glsl`: `color` is `VertexData.color` after interpolation.
pub fn fragment_stage(color: Vec3, red: f32) -> [f32; 4] {
    [red, color.y, color.z, 1.0]
}

/// Linear interpolation of per-vertex colors at `barycentric` (weights sum to 1).
pub fn interpolate(colors: [Vec3; 3], barycentric: Vec3) -> Vec3 {
    colors[0] * barycentric.x + colors[1] * barycentric.y + colors[2] * barycentric.z
}

/// Runs both stages for one sample point inside a triangle.
pub fn shade_triangle(outputs: [VertexOutput; 3], barycentric: Vec3, red: f32) -> [f32; 4] {
    let colors = [outputs[0].color, outputs[1].color, outputs[2].color];
    fragment_stage(interpolate(colors, barycentric), red)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(v: Vec4) -> [u32; 4] {
        v.to_array().map(f32::to_bits)
    }

    // Finite positions without negative zeros; IEEE `x * 1 + 0` is exact for these.
    const POSITIONS: [[f32; 3]; 6] = [
        [-0.5, -0.5, 0.0],
        [-0.5, 0.5, 0.0],
        [0.5, 0.5, 0.0],
        [0.5, -0.5, 0.0],
        [0.125, 3.75, -2.5],
        [1.0e-3, -7.0e4, 0.333],
    ];

    #[test]
    fn plain_variant_emits_w_one() {
        let out = vertex_stage(Vec3::new(0.25, -0.75, 0.5), Vec3::ONE, None);
        assert_eq!(out.clip_position, Vec4::new(0.25, -0.75, 0.5, 1.0));
    }

    #[test]
    fn identity_projection_matches_plain_bit_for_bit() {
        for p in POSITIONS {
            let pos = Vec3::from_array(p);
            let color = Vec3::new(0.1, 0.2, 0.3);
            let plain = vertex_stage(pos, color, None);
            let projected = vertex_stage(pos, color, Some(Mat4::IDENTITY));

            assert_eq!(bits(plain.clip_position), bits(projected.clip_position), "{p:?}");
            assert_eq!(plain.color, projected.color);
        }
    }

    #[test]
    fn projection_is_applied() {
        let m = Mat4::from_scale(Vec3::new(2.0, 3.0, 1.0));
        let out = vertex_stage(Vec3::new(1.0, 1.0, 0.0), Vec3::ZERO, Some(m));
        assert_eq!(out.clip_position, Vec4::new(2.0, 3.0, 0.0, 1.0));
    }

    #[test]
    fn color_passes_through_untouched() {
        let color = Vec3::new(0.9, 0.4, 0.05);
        let m = Mat4::from_translation(Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(vertex_stage(Vec3::ZERO, color, Some(m)).color, color);
    }

    #[test]
    fn fragment_takes_red_from_uniform() {
        assert_eq!(fragment_stage(Vec3::new(0.8, 0.6, 0.4), 0.25), [0.25, 0.6, 0.4, 1.0]);
    }

    #[test]
    fn interpolation_hits_vertex_colors_at_corners() {
        let colors = [Vec3::X, Vec3::Y, Vec3::Z];
        assert_eq!(interpolate(colors, Vec3::X), Vec3::X);
        assert_eq!(interpolate(colors, Vec3::Y), Vec3::Y);
        assert_eq!(interpolate(colors, Vec3::Z), Vec3::Z);
    }

    #[test]
    fn shade_center_of_triangle() {
        let outs = [
            vertex_stage(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), None),
            vertex_stage(Vec3::X, Vec3::new(0.0, 0.75, 0.0), None),
            vertex_stage(Vec3::Y, Vec3::new(0.0, 0.0, 0.75), None),
        ];
        let rgba = shade_triangle(outs, Vec3::splat(1.0 / 3.0), 0.5);

        assert_eq!(rgba[0], 0.5);
        assert!((rgba[1] - 0.25).abs() < 1e-6);
        assert!((rgba[2] - 0.25).abs() < 1e-6);
        assert_eq!(rgba[3], 1.0);
    }
}
