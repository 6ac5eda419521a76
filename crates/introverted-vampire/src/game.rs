use anyhow::Result;

use vampire_engine::coords::{Projection, Vec2, Viewport};
use vampire_engine::core::{App, AppControl, FrameCtx, LoadCtx, UpdateCtx};
use vampire_engine::input::{InputEvent, InputState, Key};
use vampire_engine::logging::FRAME_TARGET;
use vampire_engine::render::RectRenderer;

use crate::config::GameConfig;
use crate::door::Doors;

/// Everything that only exists once the GPU is up.
struct Scene {
    renderer: RectRenderer,
    projection: Projection,
    doors: Doors,
}

impl Scene {
    /// Brings projection and door bounds in line with `viewport`.
    fn sync(&mut self, viewport: Viewport) {
        if self.projection.update(viewport) {
            self.doors.relayout(viewport);
            for door in self.doors.iter() {
                log::debug!("{} door -> {:?}", door.side.name(), door.bounds);
            }
        }
    }
}

pub struct Game {
    config: GameConfig,
    scene: Option<Scene>,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Self { config, scene: None }
    }
}

impl App for Game {
    fn on_load(&mut self, ctx: &LoadCtx<'_>) -> Result<()> {
        let renderer = RectRenderer::new(ctx.device, ctx.surface_format)?;
        let projection = Projection::new(ctx.viewport);
        let doors = Doors::new(ctx.viewport, &self.config);

        log::info!("room ready: {} doors, margin {}px", doors.iter().count(), self.config.margin);
        self.scene = Some(Scene {
            renderer,
            projection,
            doors,
        });
        Ok(())
    }

    fn on_resize(&mut self, viewport: Viewport) {
        if let Some(scene) = self.scene.as_mut() {
            scene.sync(viewport);
        }
    }

    fn on_input(&mut self, event: &InputEvent, _input: &InputState) -> AppControl {
        let (Some(scene), Some(press)) = (self.scene.as_ref(), event.as_press()) else {
            return AppControl::Continue;
        };

        let target = scene.doors.hit_test(Vec2::new(press.x, press.y));
        log::debug!("{:?} press at ({}, {}) -> {target:?}", press.button, press.x, press.y);
        println!("{target}");

        AppControl::Continue
    }

    fn on_update(&mut self, ctx: &UpdateCtx<'_>) -> AppControl {
        if ctx.input.key_down(Key::Escape) {
            log::info!("escape pressed, closing");
            return AppControl::Exit;
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(scene) = self.scene.as_mut() else {
            return AppControl::Continue;
        };

        // A resize event can trail the frame it affects.
        scene.sync(ctx.viewport());
        scene.renderer.begin_frame();

        let Scene {
            renderer,
            projection,
            doors,
        } = scene;

        let control = ctx.render(self.config.clear_color, |rctx, target| {
            for door in doors.iter() {
                renderer.draw(rctx, target, door.bounds, door.color, projection.matrix());
            }
        });

        log::info!(
            target: FRAME_TARGET,
            "Rendering frame {} ({:.1} fps)",
            ctx.time.frame_index,
            ctx.time.fps()
        );
        control
    }
}

#[cfg(test)]
mod tests {
    use vampire_engine::input::{KeyState, MouseButton, MouseButtonState, PointerButtonEvent};
    use vampire_engine::time::FrameTime;

    use super::*;

    fn update(game: &mut Game, input: &InputState) -> AppControl {
        let time = FrameTime { dt: 1.0 / 60.0, frame_index: 0 };
        game.on_update(&UpdateCtx { input, time })
    }

    fn escape(state: KeyState) -> InputEvent {
        InputEvent::Key { key: Key::Escape, state, repeat: false }
    }

    #[test]
    fn escape_ends_the_loop() {
        let mut game = Game::new(GameConfig::default());
        let mut input = InputState::default();

        assert_eq!(update(&mut game, &input), AppControl::Continue);

        input.apply_event(&escape(KeyState::Pressed));
        assert_eq!(update(&mut game, &input), AppControl::Exit);
    }

    #[test]
    fn other_keys_keep_running() {
        let mut game = Game::new(GameConfig::default());
        let mut input = InputState::default();
        input.apply_event(&InputEvent::Key {
            key: Key::Unknown(42),
            state: KeyState::Pressed,
            repeat: false,
        });
        input.apply_event(&escape(KeyState::Pressed));
        input.apply_event(&escape(KeyState::Released));

        assert_eq!(update(&mut game, &input), AppControl::Continue);
    }

    #[test]
    fn clicks_before_load_are_ignored() {
        let mut game = Game::new(GameConfig::default());
        let click = InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state: MouseButtonState::Pressed,
            x: 100.0,
            y: 100.0,
        });
        assert_eq!(game.on_input(&click, &InputState::default()), AppControl::Continue);
    }
}
