//! Per-frame simulation tick
//!
//! Menu handling while Paused/GameOver, the full update pipeline while Playing.

use glam::{Vec2, Vec3};

use super::state::{GameEvent, GamePhase, GameState};
use crate::platform::{InputSource, Key, MouseButton};
use crate::ui::MenuAction;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub turn_left: bool,
    pub turn_right: bool,
    pub thrust: bool,
    pub reverse: bool,
    /// Fire held
    pub fire: bool,
    /// Escape pressed this frame
    pub toggle_pause: bool,
    /// Left click this frame, in screen pixels
    pub click: Option<Vec2>,
}

impl TickInput {
    pub fn from_source(input: &impl InputSource) -> Self {
        Self {
            turn_left: input.key_down(Key::Left),
            turn_right: input.key_down(Key::Right),
            thrust: input.key_down(Key::Up),
            reverse: input.key_down(Key::Down),
            fire: input.key_down(Key::Space),
            toggle_pause: input.key_pressed(Key::Escape),
            click: input
                .button_pressed(MouseButton::Left)
                .then(|| input.pointer()),
        }
    }
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Handle pause toggle
    if input.toggle_pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                state.push_event(GameEvent::Paused);
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                state.push_event(GameEvent::Resumed);
            }
            GamePhase::GameOver => {}
        }
    }

    if state.phase != GamePhase::Playing {
        handle_menu(state, input);
        return;
    }

    steer_ship(state, input);

    state.fire_timer += dt;
    state.enemy_timer += dt;

    if state.enemy_timer > state.tuning.enemy_interval {
        state.enemy_timer = 0.0;
        state.spawn_enemy();
    }

    if input.fire && state.fire_timer >= state.tuning.fire_cooldown {
        state.fire_player_missile();
    }

    if state.asteroids.is_empty() {
        state.ship.set_position(Vec3::ZERO);
        state.spawn_wave();
    }

    let field = state.play_field();
    state.ship.update(dt, &field);
    state.sweep_asteroids(dt, &field);
    state.sweep_missiles(dt, &field);
    state.update_enemy(dt, &field);

    state.resolve_collisions();
    state.check_player_hit();

    state.effects.advance(dt);
    state.camera.update(dt);
    state.time_ticks += 1;
}

fn handle_menu(state: &mut GameState, input: &TickInput) {
    let Some(click) = input.click else {
        return;
    };
    match state.menu.hit(click) {
        Some(MenuAction::NewGame) => state.new_game(),
        Some(MenuAction::Quit) => {
            log::info!("Quit requested");
            state.push_event(GameEvent::QuitRequested);
        }
        None => {}
    }
}

/// Turn steps are per tick and speeds are absolute, neither scaled by dt
fn steer_ship(state: &mut GameState, input: &TickInput) {
    let tuning = &state.tuning;
    let ship = &mut state.ship;

    if input.turn_right {
        ship.update_yaw(-tuning.ship_turn_step);
    }
    if input.turn_left {
        ship.update_yaw(tuning.ship_turn_step);
    }

    let speed = if input.thrust {
        tuning.ship_forward_speed
    } else if input.reverse {
        tuning.ship_reverse_speed
    } else {
        0.0
    };
    ship.set_speed(speed);
}
