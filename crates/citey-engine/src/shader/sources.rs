use std::borrow::Cow;
use std::fmt;

const BASIC_VERTEX: &str = include_str!("glsl/basic_vertex.glsl");
const PROJECTED_VERTEX: &str = include_str!("glsl/projected_vertex.glsl");
const BASIC_FRAGMENT: &str = include_str!("glsl/basic_fragment.glsl");

/// Programmable pipeline stage a source is written for.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub(crate) fn to_naga(self) -> naga::ShaderStage {
        match self {
            ShaderStage::Vertex => naga::ShaderStage::Vertex,
            ShaderStage::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Which vertex shader feeds the pipeline.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum VertexVariant {
    /// Positions are emitted as-is (`w = 1`).
    #[default]
    Plain,
    /// Positions are multiplied by the `projection` uniform.
    Projected,
}

impl VertexVariant {
    pub fn toggled(self) -> Self {
        match self {
            VertexVariant::Plain => VertexVariant::Projected,
            VertexVariant::Projected => VertexVariant::Plain,
        }
    }
}

/// GLSL text tagged with its stage and a label used in diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderSource {
    pub label: Cow<'static, str>,
    pub stage: ShaderStage,
    pub text: Cow<'static, str>,
}

impl ShaderSource {
    pub fn new(
        label: impl Into<Cow<'static, str>>,
        stage: ShaderStage,
        text: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            label: label.into(),
            stage,
            text: text.into(),
        }
    }

    pub fn basic_vertex() -> Self {
        Self::new("basic_vertex", ShaderStage::Vertex, BASIC_VERTEX)
    }

    pub fn projected_vertex() -> Self {
        Self::new("projected_vertex", ShaderStage::Vertex, PROJECTED_VERTEX)
    }

    pub fn basic_fragment() -> Self {
        Self::new("basic_fragment", ShaderStage::Fragment, BASIC_FRAGMENT)
    }

    pub fn vertex_for(variant: VertexVariant) -> Self {
        match variant {
            VertexVariant::Plain => Self::basic_vertex(),
            VertexVariant::Projected => Self::projected_vertex(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_sources_declare_version() {
        for src in [
            ShaderSource::basic_vertex(),
            ShaderSource::projected_vertex(),
            ShaderSource::basic_fragment(),
        ] {
            assert!(src.text.starts_with("#version 450"), "{}", src.label);
        }
    }

    #[test]
    fn vertex_for_picks_variant() {
        assert_eq!(ShaderSource::vertex_for(VertexVariant::Plain).label, "basic_vertex");
        assert_eq!(
            ShaderSource::vertex_for(VertexVariant::Projected).label,
            "projected_vertex"
        );
    }

    #[test]
    fn variant_toggles_back_and_forth() {
        let v = VertexVariant::default();
        assert_eq!(v, VertexVariant::Plain);
        assert_eq!(v.toggled(), VertexVariant::Projected);
        assert_eq!(v.toggled().toggled(), v);
    }
}
