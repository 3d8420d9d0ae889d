use std::fmt;

use naga::{Binding, Handle, Module, ScalarKind, Type, TypeInner};

use super::error::ShaderError;

/// Numeric type of a location-bound stage input or output.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct IoType {
    pub kind: ScalarKind,
    /// Scalar width in bytes.
    pub width: u8,
    /// 1 for scalars, 2..=4 for vectors.
    pub components: u8,
}

impl IoType {
    pub const VEC3_F32: Self = Self::float(3);
    pub const VEC4_F32: Self = Self::float(4);

    pub const fn float(components: u8) -> Self {
        Self {
            kind: ScalarKind::Float,
            width: 4,
            components,
        }
    }

    fn from_inner(inner: &TypeInner) -> Option<Self> {
        match *inner {
            TypeInner::Scalar(scalar) => Some(Self {
                kind: scalar.kind,
                width: scalar.width,
                components: 1,
            }),
            TypeInner::Vector { size, scalar } => Some(Self {
                kind: scalar.kind,
                width: scalar.width,
                components: size as u8,
            }),
            _ => None,
        }
    }
}

impl fmt::Display for IoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.kind {
            ScalarKind::Float if self.width == 8 => "d",
            ScalarKind::Float => "",
            ScalarKind::Sint => "i",
            ScalarKind::Uint => "u",
            ScalarKind::Bool => "b",
            _ => "abstract ",
        };

        if self.components == 1 {
            let scalar = match self.kind {
                ScalarKind::Float if self.width == 8 => "double",
                ScalarKind::Float => "float",
                ScalarKind::Sint => "int",
                ScalarKind::Uint => "uint",
                ScalarKind::Bool => "bool",
                _ => "abstract scalar",
            };
            f.write_str(scalar)
        } else {
            write!(f, "{prefix}vec{}", self.components)
        }
    }
}

/// A single location-bound variable on a stage boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct IoVar {
    pub location: u32,
    pub name: Option<String>,
    pub ty: IoType,
}

/// Location-bound inputs and outputs of one entry point.
///
/// Built-ins (`gl_Position` and friends) are not part of the interface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageInterface {
    pub inputs: Vec<IoVar>,
    pub outputs: Vec<IoVar>,
}

impl StageInterface {
    /// Reflects the interface of the first entry point for `stage`.
    pub fn reflect(module: &Module, stage: naga::ShaderStage) -> Option<Self> {
        let ep = module.entry_points.iter().find(|ep| ep.stage == stage)?;

        let mut iface = StageInterface::default();
        for arg in &ep.function.arguments {
            collect(module, arg.name.as_deref(), arg.ty, arg.binding.as_ref(), &mut iface.inputs);
        }
        if let Some(result) = &ep.function.result {
            collect(module, None, result.ty, result.binding.as_ref(), &mut iface.outputs);
        }

        iface.inputs.sort_by_key(|v| v.location);
        iface.outputs.sort_by_key(|v| v.location);
        Some(iface)
    }

    pub fn input(&self, location: u32) -> Option<&IoVar> {
        self.inputs.iter().find(|v| v.location == location)
    }

    pub fn output(&self, location: u32) -> Option<&IoVar> {
        self.outputs.iter().find(|v| v.location == location)
    }
}

fn collect(
    module: &Module,
    name: Option<&str>,
    ty: Handle<Type>,
    binding: Option<&Binding>,
    out: &mut Vec<IoVar>,
) {
    let inner = &module.types[ty].inner;
    match binding {
        Some(Binding::Location { location, .. }) => match IoType::from_inner(inner) {
            Some(io_ty) => out.push(IoVar {
                location: *location,
                name: name.map(str::to_owned),
                ty: io_ty,
            }),
            None => log::debug!("skipping non-numeric stage variable at location {location}"),
        },
        Some(Binding::BuiltIn(_)) => {}
        None => {
            if let TypeInner::Struct { members, .. } = inner {
                for m in members {
                    collect(module, m.name.as_deref(), m.ty, m.binding.as_ref(), out);
                }
            }
        }
    }
}

/// Checks that every fragment input is fed by a matching vertex output.
///
/// Types must be identical per location. Names are compared only when both
/// stages carry one. Extra vertex outputs are allowed.
pub fn check_link(vertex: &StageInterface, fragment: &StageInterface) -> Result<(), ShaderError> {
    for input in &fragment.inputs {
        let Some(output) = vertex.output(input.location) else {
            return Err(ShaderError::MissingInput {
                location: input.location,
                ty: input.ty,
            });
        };

        if output.ty != input.ty {
            return Err(ShaderError::InputTypeMismatch {
                location: input.location,
                vertex: output.ty,
                fragment: input.ty,
            });
        }

        if let (Some(vs_name), Some(fs_name)) = (&output.name, &input.name) {
            if vs_name != fs_name {
                return Err(ShaderError::InputNameMismatch {
                    location: input.location,
                    vertex: vs_name.clone(),
                    fragment: fs_name.clone(),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(location: u32, name: Option<&str>, ty: IoType) -> IoVar {
        IoVar { location, name: name.map(str::to_owned), ty }
    }

    fn vs(outputs: Vec<IoVar>) -> StageInterface {
        StageInterface { inputs: vec![], outputs }
    }

    fn fs(inputs: Vec<IoVar>) -> StageInterface {
        StageInterface { inputs, outputs: vec![] }
    }

    #[test]
    fn matching_interfaces_link() {
        let v = vs(vec![var(0, Some("color"), IoType::VEC3_F32)]);
        let f = fs(vec![var(0, Some("color"), IoType::VEC3_F32)]);
        assert_eq!(check_link(&v, &f), Ok(()));
    }

    #[test]
    fn extra_vertex_outputs_are_fine() {
        let v = vs(vec![
            var(0, Some("color"), IoType::VEC3_F32),
            var(1, Some("v_uv"), IoType::float(2)),
        ]);
        let f = fs(vec![var(0, Some("color"), IoType::VEC3_F32)]);
        assert!(check_link(&v, &f).is_ok());
    }

    #[test]
    fn unnamed_side_skips_name_check() {
        let v = vs(vec![var(0, None, IoType::VEC3_F32)]);
        let f = fs(vec![var(0, Some("color"), IoType::VEC3_F32)]);
        assert!(check_link(&v, &f).is_ok());
    }

    #[test]
    fn missing_location_is_reported() {
        let v = vs(vec![]);
        let f = fs(vec![var(2, Some("color"), IoType::VEC3_F32)]);
        assert_eq!(
            check_link(&v, &f),
            Err(ShaderError::MissingInput { location: 2, ty: IoType::VEC3_F32 })
        );
    }

    #[test]
    fn type_mismatch_is_reported() {
        let v = vs(vec![var(0, Some("color"), IoType::VEC4_F32)]);
        let f = fs(vec![var(0, Some("color"), IoType::VEC3_F32)]);
        assert!(matches!(
            check_link(&v, &f),
            Err(ShaderError::InputTypeMismatch { location: 0, .. })
        ));
    }

    #[test]
    fn name_mismatch_is_reported() {
        let v = vs(vec![var(0, Some("colour"), IoType::VEC3_F32)]);
        let f = fs(vec![var(0, Some("color"), IoType::VEC3_F32)]);
        assert!(matches!(
            check_link(&v, &f),
            Err(ShaderError::InputNameMismatch { location: 0, .. })
        ));
    }

    #[test]
    fn io_type_display() {
        assert_eq!(IoType::VEC3_F32.to_string(), "vec3");
        assert_eq!(IoType::float(1).to_string(), "float");
        let ivec2 = IoType { kind: ScalarKind::Sint, width: 4, components: 2 };
        assert_eq!(ivec2.to_string(), "ivec2");
    }
}
