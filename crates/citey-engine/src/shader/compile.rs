use naga::front::glsl::{Frontend, Options};
use naga::valid::{Capabilities, ValidationFlags, Validator};
use naga::{AddressSpace, Module, TypeInner};

use super::error::ShaderError;
use super::interface::StageInterface;
use super::sources::{ShaderSource, ShaderStage};

/// A uniform block declared by a stage.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformBlock {
    /// Instance name (`u_red` in `uniform Red { .. } u_red;`).
    pub name: Option<String>,
    /// Block name (`Red`).
    pub type_name: Option<String>,
    pub group: u32,
    pub binding: u32,
    /// Size of the block in bytes, including trailing padding.
    pub size: u32,
    pub members: Vec<UniformMember>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UniformMember {
    pub name: String,
    pub offset: u32,
}

impl UniformBlock {
    /// True if `name` refers to this block or one of its members.
    pub fn declares(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
            || self.type_name.as_deref() == Some(name)
            || self.member(name).is_some()
    }

    pub fn member(&self, name: &str) -> Option<&UniformMember> {
        self.members.iter().find(|m| m.name == name)
    }
}

/// A parsed and validated shader stage.
#[derive(Debug)]
pub struct CompiledStage {
    pub label: String,
    pub stage: ShaderStage,
    pub module: Module,
    pub interface: StageInterface,
    pub uniforms: Vec<UniformBlock>,
}

/// Parses `source` with the GLSL front end and validates the result.
pub fn compile(source: &ShaderSource) -> Result<CompiledStage, ShaderError> {
    let label = source.label.to_string();

    let mut frontend = Frontend::default();
    let module = frontend
        .parse(&Options::from(source.stage.to_naga()), &source.text)
        .map_err(|errors| ShaderError::Parse {
            label: label.clone(),
            message: errors.to_string(),
        })?;

    Validator::new(ValidationFlags::all(), Capabilities::empty())
        .validate(&module)
        .map_err(|err| ShaderError::Validation {
            label: label.clone(),
            message: err.emit_to_string(&source.text),
        })?;

    let Some(interface) = StageInterface::reflect(&module, source.stage.to_naga()) else {
        let found = module
            .entry_points
            .iter()
            .map(|ep| format!("{:?}", ep.stage))
            .collect::<Vec<_>>();
        return Err(ShaderError::StageMismatch {
            label,
            expected: source.stage,
            found: if found.is_empty() { "none".to_owned() } else { found.join(", ") },
        });
    };

    let uniforms = reflect_uniform_blocks(&module);
    log::debug!(
        "compiled {} shader `{}` ({} inputs, {} outputs, {} uniform blocks)",
        source.stage,
        label,
        interface.inputs.len(),
        interface.outputs.len(),
        uniforms.len()
    );

    Ok(CompiledStage {
        label,
        stage: source.stage,
        module,
        interface,
        uniforms,
    })
}

fn reflect_uniform_blocks(module: &Module) -> Vec<UniformBlock> {
    module
        .global_variables
        .iter()
        .filter(|(_, var)| var.space == AddressSpace::Uniform)
        .filter_map(|(_, var)| {
            let binding = var.binding.as_ref()?;
            let ty = &module.types[var.ty];
            let (members, size) = match &ty.inner {
                TypeInner::Struct { members, span } => (
                    members
                        .iter()
                        .filter_map(|m| {
                            Some(UniformMember {
                                name: m.name.clone()?,
                                offset: m.offset,
                            })
                        })
                        .collect(),
                    *span,
                ),
                other => (Vec::new(), other.size(module.to_ctx())),
            };

            Some(UniformBlock {
                name: var.name.clone(),
                type_name: ty.name.clone(),
                group: binding.group,
                binding: binding.binding,
                size,
                members,
            })
        })
        .collect()
}
