use glam::{Mat4, Quat, Vec3};

use super::Viewport;

/// Object placement: translation, rotation and non-uniform scale.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    pub const fn identity() -> Self {
        Self::new(Vec3::ZERO, Quat::IDENTITY, Vec3::ONE)
    }

    /// `translation * rotation * scale`.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Aspect-correcting projection that keeps the unit square square.
///
/// The shorter viewport axis spans [-1, 1]; the longer one is widened.
/// Depth passes through unchanged. Invalid viewports fall back to identity.
pub fn ortho_for_viewport(viewport: Viewport) -> Mat4 {
    let Some(aspect) = viewport.aspect() else {
        return Mat4::IDENTITY;
    };
    let (hw, hh) = if aspect >= 1.0 { (aspect, 1.0) } else { (1.0, 1.0 / aspect) };

    Mat4::from_scale(Vec3::new(1.0 / hw, 1.0 / hh, 1.0))
}
