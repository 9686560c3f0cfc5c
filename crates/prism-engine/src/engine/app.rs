use anyhow::{Context, Result};
use glam::Vec3;

use crate::core::{App, AppControl, FrameCtx, StartCtx};
use crate::math::set_projection;
use crate::shapes::DrawContext;

use super::config::EngineConfig;
use super::scene::Scene;
use super::state::EngineState;

/// The demo application: engine state plus the scene it drives.
pub struct PrismApp {
    config: EngineConfig,
    state: EngineState,
    scene: Option<Scene>,
}

impl PrismApp {
    pub fn new(config: EngineConfig) -> Self {
        let state = EngineState::new(&config);
        Self {
            config,
            state,
            scene: None,
        }
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }
}

impl App for PrismApp {
    fn on_start(&mut self, ctx: &mut StartCtx<'_>) -> Result<()> {
        let scene = Scene::new(&ctx.backend, &self.config).context("failed to build scene")?;
        let viewport = ctx.window.viewport();
        log::info!(
            "engine started: {}x{}, {:?} projection",
            viewport.width,
            viewport.height,
            self.config.projection
        );
        self.scene = Some(scene);
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let viewport = ctx.window.viewport();

        for event in &ctx.input_frame.events {
            if self.state.handle_event(event, viewport) == AppControl::Exit {
                log::info!("exit requested");
                return AppControl::Exit;
            }
        }
        self.state.begin_frame();

        let camera = self.state.camera();
        let draw_ctx = DrawContext {
            projection: set_projection(
                self.config.fov_deg,
                viewport.aspect(),
                self.config.near,
                self.config.far,
                self.config.projection,
            ),
            view: camera.view(),
            view_pos: camera.eye(),
            light_pos: self.state.light_pos(),
            light_color: Vec3::ONE,
        };

        let state = &self.state;
        let scene = &mut self.scene;
        ctx.render(state.background(), || {
            if let Some(scene) = scene {
                scene.draw(&draw_ctx, state);
            }
        })
    }
}
