//! blitbox: a minimal GPU reproduction harness.
//!
//! Opens a fixed 960x544 window, builds the render state from the five
//! asset files in the working directory, then renders the offscreen scene
//! and presents it every frame until the window is closed.

use std::path::Path;

use anyhow::Context;
use winit::dpi::PhysicalSize;

use blitbox_engine::assets::SceneAssets;
use blitbox_engine::core::{App, AppControl, FrameCtx};
use blitbox_engine::device::{Gpu, GpuInit};
use blitbox_engine::render::RenderState;
use blitbox_engine::window::{Runtime, RuntimeConfig};

const WINDOW_WIDTH: u32 = 960;
const WINDOW_HEIGHT: u32 = 544;

#[derive(Default)]
struct ReproApp {
    render: Option<RenderState>,
}

impl App for ReproApp {
    fn on_ready(&mut self, gpu: &Gpu<'_>) -> anyhow::Result<()> {
        let scene_assets = SceneAssets::load(Path::new("."))
            .context("failed to load scene assets from the working directory")?;

        let render = RenderState::new(
            gpu.device(),
            gpu.surface_format(),
            &scene_assets,
            gpu.size(),
        )?;

        self.render = Some(render);
        Ok(())
    }

    fn on_resize(&mut self, size: PhysicalSize<u32>) {
        if let Some(render) = self.render.as_mut() {
            render.set_viewport(size);
            if !render.viewport().is_valid() {
                log::debug!(
                    "viewport {}x{} recorded; nothing drawable until the next resize",
                    size.width,
                    size.height
                );
            }
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        // on_ready ran before the loop started, so the state always exists
        // here; bail out instead of rendering nothing forever if it somehow
        // does not.
        let Some(render) = self.render.as_ref() else {
            log::error!("frame requested without render state");
            return AppControl::Exit;
        };

        if ctx.time.frame_index % 600 == 0 {
            log::debug!(
                "frame {} dt {:.2}ms",
                ctx.time.frame_index,
                ctx.time.dt * 1000.0
            );
        }

        ctx.render(|rctx, target| render.draw(rctx, target))
    }
}

fn main() -> anyhow::Result<()> {
    blitbox_engine::logging::init("info");

    Runtime::run(
        RuntimeConfig {
            title: "Repro".to_string(),
            size: PhysicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT),
        },
        GpuInit::default(),
        ReproApp::default(),
    )
}
