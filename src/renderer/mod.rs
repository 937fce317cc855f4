//! Rendering module
//!
//! The simulation hands render-ready instances to a host `Renderer`; shader
//! and window state never leak into the core.

pub mod instance;

pub use instance::{DrawInstance, colors};

use glam::Mat4;

use crate::assets::{MeshHandle, MeshSet, SheetHandle};
use crate::sim::{Effect, GamePhase, GameState};
use crate::ui::{Panel, hud_panels};

/// Host-side drawing backend
pub trait Renderer {
    /// Called once per frame before any draw; clear to `_clear_color`
    fn begin_frame(&mut self, _view_proj: Mat4, _clear_color: [f32; 4]) {}
    fn draw_mesh(&mut self, mesh: MeshHandle, instance: &DrawInstance);
    fn draw_effect(&mut self, sheet: SheetHandle, frame: usize, effect: &Effect);
    fn draw_panel(&mut self, panel: &Panel);
}

/// Draw the whole session: the scene while playing, then the panels
pub fn render_frame(state: &GameState, meshes: &MeshSet, renderer: &mut impl Renderer) {
    let projection = state.camera.projection(&state.play_field(), state.viewport.aspect());
    renderer.begin_frame(projection * state.camera.view_matrix(), colors::BACKGROUND);

    if state.phase == GamePhase::Playing {
        for rock in &state.asteroids {
            renderer.draw_mesh(meshes.asteroid, &DrawInstance::for_entity(rock, colors::ASTEROID));
        }
        for missile in &state.missiles {
            renderer.draw_mesh(
                meshes.missile,
                &DrawInstance::for_entity(missile, colors::PLAYER_MISSILE),
            );
        }
        for missile in &state.enemy_missiles {
            renderer.draw_mesh(
                meshes.enemy_missile,
                &DrawInstance::for_entity(missile, colors::ENEMY_MISSILE),
            );
        }
        if let Some(enemy) = &state.enemy {
            renderer.draw_mesh(meshes.enemy_ship, &DrawInstance::for_entity(enemy, colors::ENEMY_SHIP));
        }
        renderer.draw_mesh(meshes.ship, &DrawInstance::for_entity(&state.ship, colors::SHIP));

        for effect in state.effects.iter() {
            let frame = effect.frame(meshes.explosion.frames);
            renderer.draw_effect(meshes.explosion, frame, effect);
        }
    }

    for panel in hud_panels(state) {
        renderer.draw_panel(&panel);
    }
}

/// Renderer that only counts what it was asked to draw
#[derive(Debug, Clone, Default)]
pub struct HeadlessRenderer {
    pub frames: u64,
    pub view_proj: Mat4,
    pub clear_color: [f32; 4],
    pub meshes: usize,
    pub effects: usize,
    pub panels: Vec<String>,
}

impl Renderer for HeadlessRenderer {
    fn begin_frame(&mut self, view_proj: Mat4, clear_color: [f32; 4]) {
        self.frames += 1;
        self.view_proj = view_proj;
        self.clear_color = clear_color;
        self.meshes = 0;
        self.effects = 0;
        self.panels.clear();
    }

    fn draw_mesh(&mut self, _mesh: MeshHandle, _instance: &DrawInstance) {
        self.meshes += 1;
    }

    fn draw_effect(&mut self, _sheet: SheetHandle, _frame: usize, _effect: &Effect) {
        self.effects += 1;
    }

    fn draw_panel(&mut self, panel: &Panel) {
        self.panels.push(panel.text.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::assets::CatalogLoader;
    use crate::sim::Viewport;
    use glam::Vec3;

    fn meshes() -> MeshSet {
        MeshSet::load(&mut CatalogLoader::with_game_assets()).expect("catalog has every asset")
    }

    #[test]
    fn test_menu_draws_only_panels() {
        let state = GameState::new(3, Tuning::default(), Viewport::default());
        let mut renderer = HeadlessRenderer::default();

        render_frame(&state, &meshes(), &mut renderer);

        assert_eq!(renderer.frames, 1);
        assert_eq!(renderer.clear_color, colors::BACKGROUND);
        assert_eq!(renderer.meshes, 0);
        assert_eq!(renderer.panels, vec!["New Game", "Quit Game"]);
    }

    #[test]
    fn test_playing_draws_every_entity() {
        let mut state = GameState::new(3, Tuning::default(), Viewport::default());
        state.new_game();
        state.spawn_enemy();
        state.fire_player_missile();
        state.kill_player();
        state.spawn_enemy();
        state.fire_player_missile();

        let mut renderer = HeadlessRenderer::default();
        render_frame(&state, &meshes(), &mut renderer);

        // 3 asteroids, 1 missile, 1 enemy, 1 ship
        assert_eq!(renderer.meshes, 6);
        assert_eq!(renderer.effects, 1);
        assert_eq!(renderer.panels, vec!["Score: 0", "Lives: 2"]);
    }

    #[test]
    fn test_frame_sees_whole_field() {
        let mut state = GameState::new(3, Tuning::default(), Viewport::new(1280, 720));
        state.new_game();
        let mut renderer = HeadlessRenderer::default();
        render_frame(&state, &meshes(), &mut renderer);

        let field = state.play_field();
        for corner in [
            Vec3::new(field.left, field.top, 0.0),
            Vec3::new(field.right, field.bottom, 0.0),
        ] {
            let ndc = renderer.view_proj.project_point3(corner);
            assert!(ndc.x.abs() <= 1.0 + 1e-4 && ndc.y.abs() <= 1.0 + 1e-4, "{corner} maps to {ndc}");
        }
    }
}
