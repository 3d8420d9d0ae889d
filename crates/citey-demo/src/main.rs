use std::f32::consts::TAU;

use anyhow::Result;
use glam::{Quat, Vec3};

use citey_engine::coords::{ortho_for_viewport, ColorRgba, Transform};
use citey_engine::core::{App, AppControl, FrameCtx};
use citey_engine::device::GpuInit;
use citey_engine::input::Key;
use citey_engine::logging::{init_logging, LoggingConfig};
use citey_engine::render::{ColorPipeline, ColorVertex, Mesh, QUAD_INDICES, QUAD_VERTICES};
use citey_engine::shader::VertexVariant;
use citey_engine::time::FpsCounter;
use citey_engine::window::{Runtime, RuntimeConfig};

/// Demo settings.
#[derive(Debug, Clone)]
struct DemoConfig {
    variant: VertexVariant,
    clear: ColorRgba,
    /// Seconds for `red` to go 0.5 -> 1 -> 0 -> 0.5.
    red_period: f32,
    /// Radians per second applied to the quad in the projected variant.
    spin_speed: f32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            variant: VertexVariant::Plain,
            clear: ColorRgba::gray(0.5),
            red_period: 4.0,
            spin_speed: 0.5,
        }
    }
}

struct Demo {
    config: DemoConfig,
    title: String,

    pipeline: ColorPipeline,
    quad: Option<Mesh<ColorVertex, u16>>,
    fps: FpsCounter,

    /// Animation time; frozen while paused.
    phase: f32,
    paused: bool,
}

impl Demo {
    fn new(config: DemoConfig, title: String) -> Self {
        Self {
            pipeline: ColorPipeline::new(config.variant),
            config,
            title,
            quad: None,
            fps: FpsCounter::new(),
            phase: 0.0,
            paused: false,
        }
    }

    fn handle_keys(&mut self, ctx: &FrameCtx<'_, '_>) {
        if ctx.input_frame.pressed(Key::P) {
            self.pipeline.set_variant(self.pipeline.variant().toggled());
        }
        if ctx.input_frame.pressed(Key::Space) {
            self.paused = !self.paused;
            log::info!("animation {}", if self.paused { "paused" } else { "resumed" });
        }
    }
}

impl App for Demo {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.handle_keys(ctx);

        if !self.paused {
            self.phase += ctx.time.dt;
        }

        let red = 0.5 + 0.5 * (self.phase * TAU / self.config.red_period).sin();
        self.pipeline.set_red(red);

        let spin = Transform::new(
            Vec3::ZERO,
            Quat::from_rotation_z(self.phase * self.config.spin_speed),
            Vec3::ONE,
        );
        self.pipeline
            .set_projection(ortho_for_viewport(ctx.viewport()) * spin.to_matrix());

        let clear = self.config.clear;
        let Demo { pipeline, quad, .. } = self;

        let control = ctx.render(clear, |rctx, target| {
            let quad = quad.get_or_insert_with(|| {
                Mesh::create(rctx.device, "quad", &QUAD_VERTICES, &QUAD_INDICES)
            });

            if let Err(err) = pipeline.draw(rctx, target, quad) {
                log::error!("{err:#}");
            }
        });

        if let Some(fps) = self.fps.record(ctx.time.now) {
            ctx.runtime.set_title(format!("{} | FPS: {fps}", self.title));
        }

        control
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let runtime = RuntimeConfig::default();
    let demo = Demo::new(DemoConfig::default(), runtime.title.clone());

    log::info!(
        "starting {} ({}x{})",
        runtime.title,
        runtime.initial_size.width,
        runtime.initial_size.height
    );
    log::info!("keys: P toggles the projected vertex shader, Space pauses, Esc quits");

    Runtime::run(runtime, GpuInit::default(), demo)
}
