use std::collections::HashMap;

use super::compile::{compile, CompiledStage};
use super::error::ShaderError;
use super::interface::check_link;
use super::sources::{ShaderSource, ShaderStage};

/// Resolved location of a named uniform.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct UniformLocation {
    pub group: u32,
    pub binding: u32,
    /// Byte offset inside the block, `None` when the name is the block itself.
    pub offset: Option<u32>,
    pub in_vertex: bool,
    pub in_fragment: bool,
}

/// A vertex + fragment pair that compiled and links.
#[derive(Debug)]
pub struct ShaderProgram {
    vertex: CompiledStage,
    fragment: CompiledStage,
    uniforms: HashMap<String, UniformLocation>,
}

impl ShaderProgram {
    /// Compiles both stages, checks that they link and resolves `uniforms`.
    ///
    /// Uniform names that neither stage declares are logged and skipped.
    pub fn link(
        vertex: &ShaderSource,
        fragment: &ShaderSource,
        uniforms: &[&str],
    ) -> Result<Self, ShaderError> {
        let vertex = compile_as(vertex, ShaderStage::Vertex)?;
        let fragment = compile_as(fragment, ShaderStage::Fragment)?;

        check_link(&vertex.interface, &fragment.interface)?;

        let mut resolved = HashMap::with_capacity(uniforms.len());
        for &name in uniforms {
            match locate_uniform(&vertex, &fragment, name) {
                Some(location) => {
                    resolved.insert(name.to_owned(), location);
                }
                None => log::warn!(
                    "failed to locate uniform \"{name}\" in `{}` + `{}`",
                    vertex.label,
                    fragment.label
                ),
            }
        }

        log::info!("linked shader program `{}` + `{}`", vertex.label, fragment.label);

        Ok(Self {
            vertex,
            fragment,
            uniforms: resolved,
        })
    }

    pub fn vertex(&self) -> &CompiledStage {
        &self.vertex
    }

    pub fn fragment(&self) -> &CompiledStage {
        &self.fragment
    }

    pub fn uniform(&self, name: &str) -> Option<UniformLocation> {
        self.uniforms.get(name).copied()
    }

    /// Hands the validated modules over for pipeline creation.
    pub fn into_stages(self) -> (CompiledStage, CompiledStage) {
        (self.vertex, self.fragment)
    }
}

fn compile_as(source: &ShaderSource, expected: ShaderStage) -> Result<CompiledStage, ShaderError> {
    if source.stage != expected {
        return Err(ShaderError::StageMismatch {
            label: source.label.to_string(),
            expected,
            found: source.stage.to_string(),
        });
    }
    compile(source)
}

fn locate_uniform(
    vertex: &CompiledStage,
    fragment: &CompiledStage,
    name: &str,
) -> Option<UniformLocation> {
    let in_vertex = vertex.uniforms.iter().find(|block| block.declares(name));
    let in_fragment = fragment.uniforms.iter().find(|block| block.declares(name));
    let block = in_vertex.or(in_fragment)?;

    Some(UniformLocation {
        group: block.group,
        binding: block.binding,
        offset: block.member(name).map(|m| m.offset),
        in_vertex: in_vertex.is_some(),
        in_fragment: in_fragment.is_some(),
    })
}
