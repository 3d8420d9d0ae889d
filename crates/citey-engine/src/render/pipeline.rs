use std::borrow::Cow;

use anyhow::{Context, Result};
use glam::Mat4;

use crate::render::{Mesh, RenderCtx, RenderTarget};
use crate::shader::{ShaderProgram, ShaderSource, UniformLocation, VertexVariant};

use super::uniforms::{ProjectionBlock, RedBlock};
use super::vertex::{ColorVertex, Index, VertexLayout};

type BuildKey = (wgpu::TextureFormat, VertexVariant);

/// Draws `ColorVertex` meshes with the `red` / `projection` uniforms.
///
/// The pipeline is (re)built lazily when the surface format or the vertex
/// variant changes. Uniform values persist across rebuilds. A build that
/// fails is not retried until the format or variant changes.
#[derive(Default)]
pub struct ColorPipeline {
    variant: VertexVariant,
    projection: ProjectionBlock,
    red: RedBlock,
    projection_dirty: bool,
    red_dirty: bool,

    built_for: Option<BuildKey>,
    failed_for: Option<BuildKey>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group: Option<wgpu::BindGroup>,
    projection_ubo: Option<wgpu::Buffer>,
    red_ubo: Option<wgpu::Buffer>,
}

impl ColorPipeline {
    pub fn new(variant: VertexVariant) -> Self {
        Self {
            variant,
            projection_dirty: true,
            red_dirty: true,
            ..Self::default()
        }
    }

    pub fn variant(&self) -> VertexVariant {
        self.variant
    }

    /// Selects the vertex shader. Takes effect on the next draw.
    pub fn set_variant(&mut self, variant: VertexVariant) {
        if self.variant != variant {
            log::info!("switching vertex variant to {variant:?}");
            self.variant = variant;
            self.failed_for = None;
        }
    }

    pub fn red(&self) -> f32 {
        self.red.red
    }

    pub fn set_red(&mut self, red: f32) {
        if self.red.red != red {
            self.red = RedBlock::new(red);
            self.red_dirty = true;
        }
    }

    /// Sets the matrix read by the projected variant. Ignored by the plain one.
    pub fn set_projection(&mut self, projection: Mat4) {
        let block = ProjectionBlock::new(projection);
        if self.projection != block {
            self.projection = block;
            self.projection_dirty = true;
        }
    }

    /// Draws `mesh` into `target`, keeping what is already there.
    ///
    /// Returns an error only on the draw where the pipeline build fails;
    /// later draws with the same format and variant draw nothing.
    pub fn draw<I: Index>(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        mesh: &Mesh<ColorVertex, I>,
    ) -> Result<()> {
        self.ensure_pipeline(ctx)?;
        self.write_uniforms(ctx);

        let (Some(pipeline), Some(bind_group)) = (self.pipeline.as_ref(), self.bind_group.as_ref())
        else {
            return Ok(());
        };

        let mut rpass = target.color_pass("citey color pass", wgpu::LoadOp::Load);

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        mesh.draw(&mut rpass);

        Ok(())
    }

    fn needs_build(&self, format: wgpu::TextureFormat) -> bool {
        let key = Some((format, self.variant));
        if self.failed_for == key {
            return false;
        }
        !(self.built_for == key && self.pipeline.is_some())
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) -> Result<()> {
        if !self.needs_build(ctx.surface_format) {
            return Ok(());
        }

        let key = (ctx.surface_format, self.variant);
        if let Err(err) = self.build(ctx) {
            self.failed_for = Some(key);
            self.built_for = None;
            self.pipeline = None;
            self.bind_group = None;
            return Err(err);
        }

        self.built_for = Some(key);
        self.failed_for = None;
        self.projection_dirty = true;
        self.red_dirty = true;
        Ok(())
    }

    fn build(&mut self, ctx: &RenderCtx<'_>) -> Result<()> {
        let (program, bindings) = link_program(self.variant)?;
        let (vertex, fragment) = program.into_stages();

        let vs_module = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(vertex.label.as_str()),
            source: wgpu::ShaderSource::Naga(Cow::Owned(vertex.module)),
        });
        let fs_module = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(fragment.label.as_str()),
            source: wgpu::ShaderSource::Naga(Cow::Owned(fragment.module)),
        });

        // Buffers survive variant switches; only the layouts are rebuilt.
        let red_ubo = uniform_buffer(
            &mut self.red_ubo,
            ctx.device,
            "citey red ubo",
            std::mem::size_of::<RedBlock>(),
        );
        let projection_ubo = match bindings.projection {
            Some(_) => Some(uniform_buffer(
                &mut self.projection_ubo,
                ctx.device,
                "citey projection ubo",
                std::mem::size_of::<ProjectionBlock>(),
            )),
            None => None,
        };

        let mut layout_entries = vec![layout_entry(bindings.red, std::mem::size_of::<RedBlock>())];
        let mut group_entries = vec![wgpu::BindGroupEntry {
            binding: bindings.red.binding,
            resource: red_ubo.as_entire_binding(),
        }];
        if let (Some(location), Some(ubo)) = (bindings.projection, projection_ubo) {
            layout_entries.push(layout_entry(location, std::mem::size_of::<ProjectionBlock>()));
            group_entries.push(wgpu::BindGroupEntry {
                binding: location.binding,
                resource: ubo.as_entire_binding(),
            });
        }

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("citey uniforms bgl"),
                    entries: &layout_entries,
                });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("citey uniforms bind group"),
            layout: &bind_group_layout,
            entries: &group_entries,
        });

        let pipeline_layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("citey color pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("citey color pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &vs_module,
                entry_point: Some("main"),
                compilation_options: Default::default(),
                buffers: &[ColorVertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &fs_module,
                entry_point: Some("main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!(
            "built color pipeline for {:?} / {:?}",
            ctx.surface_format,
            self.variant
        );

        self.pipeline = Some(pipeline);
        self.bind_group = Some(bind_group);
        Ok(())
    }

    fn write_uniforms(&mut self, ctx: &RenderCtx<'_>) {
        if self.red_dirty {
            if let Some(ubo) = self.red_ubo.as_ref() {
                ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&self.red));
                self.red_dirty = false;
            }
        }
        if self.projection_dirty {
            if let Some(ubo) = self.projection_ubo.as_ref() {
                ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&self.projection));
                self.projection_dirty = false;
            }
        }
    }
}

/// Uniform bindings the pipeline fills for one variant.
#[derive(Debug, Copy, Clone)]
struct UniformBindings {
    red: UniformLocation,
    projection: Option<UniformLocation>,
}

fn link_program(variant: VertexVariant) -> Result<(ShaderProgram, UniformBindings)> {
    let uniforms: &[&str] = match variant {
        VertexVariant::Plain => &["red"],
        VertexVariant::Projected => &["red", "projection"],
    };

    let program = ShaderProgram::link(
        &ShaderSource::vertex_for(variant),
        &ShaderSource::basic_fragment(),
        uniforms,
    )
    .with_context(|| format!("failed to build {variant:?} shader program"))?;

    let red = program
        .uniform("red")
        .context("shader program does not expose the `red` uniform")?;
    let projection = match variant {
        VertexVariant::Plain => None,
        VertexVariant::Projected => Some(
            program
                .uniform("projection")
                .context("projected shader program does not expose `projection`")?,
        ),
    };

    for location in std::iter::once(red).chain(projection) {
        anyhow::ensure!(
            location.group == 0,
            "uniforms must live in bind group 0, found group {}",
            location.group
        );
    }
    if let Some(projection) = projection {
        anyhow::ensure!(
            projection.binding != red.binding,
            "`projection` and `red` share binding {}",
            red.binding
        );
    }

    Ok((program, UniformBindings { red, projection }))
}

fn uniform_buffer<'a>(
    slot: &'a mut Option<wgpu::Buffer>,
    device: &wgpu::Device,
    label: &str,
    size: usize,
) -> &'a wgpu::Buffer {
    slot.get_or_insert_with(|| {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: size as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    })
}

fn visibility(location: UniformLocation) -> wgpu::ShaderStages {
    let mut stages = wgpu::ShaderStages::NONE;
    if location.in_vertex {
        stages |= wgpu::ShaderStages::VERTEX;
    }
    if location.in_fragment {
        stages |= wgpu::ShaderStages::FRAGMENT;
    }
    stages
}

fn layout_entry(location: UniformLocation, size: usize) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding: location.binding,
        visibility: visibility(location),
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: wgpu::BufferSize::new(size as u64),
        },
        count: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Bgra8Unorm;

    #[test]
    fn setters_mark_blocks_dirty_only_on_change() {
        let mut p = ColorPipeline::new(VertexVariant::Plain);
        p.red_dirty = false;
        p.projection_dirty = false;

        p.set_red(1.0);
        assert!(!p.red_dirty, "default red is already 1.0");

        p.set_red(0.25);
        assert!(p.red_dirty);
        assert!(!p.projection_dirty);
        assert_eq!(p.red(), 0.25);

        p.set_projection(Mat4::IDENTITY);
        assert!(!p.projection_dirty);
        p.set_projection(Mat4::from_scale(glam::Vec3::splat(2.0)));
        assert!(p.projection_dirty);
    }

    #[test]
    fn variant_switch_is_recorded() {
        let mut p = ColorPipeline::new(VertexVariant::Plain);
        p.set_variant(VertexVariant::Projected);
        assert_eq!(p.variant(), VertexVariant::Projected);
        assert!(p.pipeline.is_none());
        assert!(p.needs_build(FORMAT));
    }

    #[test]
    fn failed_build_is_not_retried_until_variant_changes() {
        let mut p = ColorPipeline::new(VertexVariant::Projected);
        p.failed_for = Some((FORMAT, VertexVariant::Projected));
        assert!(!p.needs_build(FORMAT));

        // A different surface format is a different pipeline.
        assert!(p.needs_build(wgpu::TextureFormat::Rgba8Unorm));

        p.set_variant(VertexVariant::Plain);
        assert!(p.needs_build(FORMAT));

        // Coming back to the failed variant tries again.
        p.set_variant(VertexVariant::Projected);
        assert!(p.needs_build(FORMAT));
    }

    #[test]
    fn plain_variant_binds_only_red() {
        let (program, bindings) = link_program(VertexVariant::Plain).unwrap();
        assert!(bindings.projection.is_none());
        assert_eq!(bindings.red.binding, 1);
        assert_eq!(visibility(bindings.red), wgpu::ShaderStages::FRAGMENT);
        assert!(program.uniform("projection").is_none());
    }

    #[test]
    fn projected_variant_binds_both_blocks() {
        let (_, bindings) = link_program(VertexVariant::Projected).unwrap();
        let projection = bindings.projection.unwrap();
        assert_eq!(projection.binding, 0);
        assert_eq!(visibility(projection), wgpu::ShaderStages::VERTEX);

        let entry = layout_entry(projection, std::mem::size_of::<ProjectionBlock>());
        assert_eq!(entry.binding, 0);
        assert!(matches!(
            entry.ty,
            wgpu::BindingType::Buffer { min_binding_size: Some(size), .. } if size.get() == 64
        ));
    }
}
