//! Game state and core simulation types
//!
//! `GameState` owns every live entity. Spawning pushes into a collection,
//! destroying drops the value; nothing else holds entity references.

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::collision::{PlayerHit, find_player_hit, resolve_missile_hits};
use super::effects::{Effect, EffectKind, EffectTracker};
use super::entity::Entity;
use super::field::{PlayField, Viewport};
use crate::consts::SPAWN_RING_RADIUS;
use crate::ui::MenuLayout;
use crate::{Tuning, aim_degrees, polar_to_cartesian};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Menu shown, simulation frozen
    Paused,
    /// Active gameplay
    Playing,
    /// Out of lives, final score shown
    GameOver,
}

/// Things that happened during a tick, for hosts to react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    NewGame,
    Paused,
    Resumed,
    WaveSpawned { count: u32 },
    MissileFired { position: Vec2, yaw: f32 },
    EnemySpawned,
    EnemyFired { position: Vec2, yaw: f32 },
    /// Shot down; points already added to the score
    EnemyDestroyed { points: u64 },
    /// Left the play field
    EnemyEscaped,
    AsteroidDestroyed { position: Vec2, scale: f32, fragments: u32 },
    PlayerKilled { lives_left: u32 },
    GameOver { score: u64 },
    QuitRequested,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u32,
    /// Player ship, rebuilt on every death
    pub ship: Entity,
    pub asteroids: Vec<Entity>,
    /// Player missiles
    pub missiles: Vec<Entity>,
    pub enemy_missiles: Vec<Entity>,
    pub enemy: Option<Entity>,
    pub effects: EffectTracker,
    pub camera: Camera,
    pub viewport: Viewport,
    pub menu: MenuLayout,
    /// Seconds since the player last fired
    pub fire_timer: f32,
    /// Seconds since the enemy ship last (re)spawned
    pub enemy_timer: f32,
    /// Simulation ticks spent Playing
    pub time_ticks: u64,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session showing the menu, with the first wave already placed
    pub fn new(seed: u64, tuning: Tuning, viewport: Viewport) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Paused,
            score: 0,
            lives: tuning.starting_lives,
            ship: Entity::ship(&tuning),
            asteroids: Vec::new(),
            missiles: Vec::new(),
            enemy_missiles: Vec::new(),
            enemy: None,
            effects: EffectTracker::new(),
            camera: Camera::new(),
            viewport,
            menu: MenuLayout::default(),
            fire_timer: 0.0,
            enemy_timer: 0.0,
            time_ticks: 0,
            events: Vec::new(),
            tuning,
        };

        state.spawn_wave();
        state
    }

    /// Tear the session down and start playing from scratch
    pub fn new_game(&mut self) {
        self.score = 0;
        self.lives = self.tuning.starting_lives;
        self.fire_timer = 0.0;
        self.enemy_timer = 0.0;
        self.time_ticks = 0;

        self.asteroids.clear();
        self.missiles.clear();
        self.enemy_missiles.clear();
        self.enemy = None;
        self.effects.clear();
        self.ship = Entity::ship(&self.tuning);

        self.spawn_wave();
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::NewGame);
        info!("New game started with {} lives", self.lives);
    }

    pub fn play_field(&self) -> PlayField {
        PlayField::from_viewport(self.tuning.view_height, self.viewport)
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take every event recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // --- Spawning ---

    pub fn spawn_asteroid(&mut self, position: Vec3, scale: f32) {
        let rock = Entity::asteroid(position, scale, &self.tuning, &mut self.rng);
        self.asteroids.push(rock);
    }

    /// Place a full wave of base-size asteroids on the spawn ring
    pub fn spawn_wave(&mut self) {
        let count = self.tuning.wave_size;
        for _ in 0..count {
            let theta = self.rng.random_range(0.0..TAU);
            let position = polar_to_cartesian(SPAWN_RING_RADIUS, theta).extend(0.0);
            self.spawn_asteroid(position, self.tuning.asteroid_base_scale);
        }
        debug!("Spawned wave of {} asteroids", count);
        self.events.push(GameEvent::WaveSpawned { count });
    }

    /// Replace any enemy ship with a fresh one at the entry point
    pub fn spawn_enemy(&mut self) {
        self.enemy = Some(Entity::enemy_ship(&self.tuning));
        debug!("Enemy ship spawned");
        self.events.push(GameEvent::EnemySpawned);
    }

    pub fn fire_player_missile(&mut self) {
        let position = self.ship.position();
        let yaw = self.ship.yaw();
        self.missiles.push(Entity::missile(position, yaw, &self.tuning));
        self.fire_timer = 0.0;
        self.events.push(GameEvent::MissileFired {
            position: position.truncate(),
            yaw,
        });
    }

    // --- Per-tick passes ---

    /// Remove dead asteroids (splitting the large ones) and update the rest.
    /// Fragments join the field after the pass and are not updated this tick.
    pub fn sweep_asteroids(&mut self, dt: f32, field: &PlayField) {
        let threshold = self.tuning.fragment_threshold();
        let mut fragments = Vec::new();

        self.asteroids.retain_mut(|rock| {
            if !rock.dead {
                rock.update(dt, field);
                return true;
            }

            let position = rock.position();
            let scale = rock.scale().x;
            let mut count = 0;
            if scale > threshold {
                let child_scale = scale * self.tuning.fragment_ratio;
                for _ in 0..self.tuning.fragment_count {
                    fragments.push(Entity::asteroid(position, child_scale, &self.tuning, &mut self.rng));
                }
                count = self.tuning.fragment_count;
            }

            self.score += self.tuning.asteroid_points;
            self.events.push(GameEvent::AsteroidDestroyed {
                position: position.truncate(),
                scale,
                fragments: count,
            });
            false
        });

        if !fragments.is_empty() {
            debug!("Asteroids split into {} fragments", fragments.len());
        }
        self.asteroids.extend(fragments);
    }

    /// Sweep both missile collections
    pub fn sweep_missiles(&mut self, dt: f32, field: &PlayField) {
        let duration = self.tuning.effect_duration;
        sweep_missile_list(&mut self.missiles, &mut self.effects, duration, dt, field);
        sweep_missile_list(&mut self.enemy_missiles, &mut self.effects, duration, dt, field);
    }

    /// Drop a dead enemy, or aim it at the player, move it and let it shoot
    pub fn update_enemy(&mut self, dt: f32, field: &PlayField) {
        let Some(enemy) = self.enemy.as_mut() else {
            return;
        };
        if enemy.dead {
            self.enemy = None;
            return;
        }

        let yaw = aim_degrees(enemy.position().truncate(), self.ship.position().truncate());
        enemy.set_yaw(yaw);
        enemy.update(dt, field);
        if enemy.dead {
            debug!("Enemy ship left the field");
            self.events.push(GameEvent::EnemyEscaped);
        }

        if enemy.fire() {
            let position = enemy.position();
            let yaw = enemy.yaw();
            self.enemy_missiles.push(Entity::missile(position, yaw, &self.tuning));
            self.events.push(GameEvent::EnemyFired {
                position: position.truncate(),
                yaw,
            });
        }
    }

    /// Player missiles against asteroids and the enemy ship
    pub fn resolve_collisions(&mut self) {
        let hits = resolve_missile_hits(&mut self.missiles, &mut self.asteroids, self.enemy.as_mut());
        if hits.enemy > 0 {
            let points = self.tuning.enemy_points * u64::from(hits.enemy);
            self.score += points;
            info!("Enemy ship destroyed (+{})", points);
            self.events.push(GameEvent::EnemyDestroyed { points });
        }
    }

    /// Kill the player if anything live touches the ship. Returns whether it died.
    pub fn check_player_hit(&mut self) -> bool {
        let Some(hit) = find_player_hit(&self.ship, &self.asteroids, &self.enemy_missiles) else {
            return false;
        };
        match hit {
            PlayerHit::Asteroid(i) => debug!("Player hit by asteroid {}", i),
            PlayerHit::EnemyMissile(i) => debug!("Player hit by enemy missile {}", i),
        }
        self.kill_player();
        true
    }

    /// Explode the ship, take a life and rebuild it
    pub fn kill_player(&mut self) {
        let ship = &self.ship;
        let corner = ship.position().truncate() - ship.scale().truncate() * 0.5;
        self.effects.spawn(Effect::new(
            EffectKind::ShipExplosion,
            corner,
            ship.pitch(),
            self.tuning.effect_duration,
        ));
        self.camera.add_shake(self.tuning.death_shake);

        self.lives = self.lives.saturating_sub(1);
        self.enemy = None;
        self.ship = Entity::ship(&self.tuning);
        self.events.push(GameEvent::PlayerKilled { lives_left: self.lives });

        self.reset_or_game_over();
    }

    /// After a death: end the run at zero lives, otherwise clear the field
    /// and serve a fresh wave
    pub fn reset_or_game_over(&mut self) {
        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
            info!("Game over with score {}", self.score);
            self.events.push(GameEvent::GameOver { score: self.score });
            return;
        }

        self.fire_timer = 0.0;
        self.enemy_timer = 0.0;
        self.asteroids.clear();
        self.missiles.clear();
        self.enemy_missiles.clear();
        self.enemy = None;
        self.spawn_wave();
        self.phase = GamePhase::Playing;
    }
}

/// Shot-down missiles explode; expired ones vanish silently; the rest age
/// and move
fn sweep_missile_list(
    missiles: &mut Vec<Entity>,
    effects: &mut EffectTracker,
    effect_duration: f32,
    dt: f32,
    field: &PlayField,
) {
    missiles.retain_mut(|missile| {
        if missile.dead {
            let corner = missile.position().truncate() - missile.scale().truncate() * 0.5;
            effects.spawn(Effect::new(
                EffectKind::MissileExplosion,
                corner,
                missile.pitch(),
                effect_duration,
            ));
            return false;
        }
        if missile.is_expired() {
            return false;
        }
        missile.decrease_lifetime(dt);
        missile.update(dt, field);
        true
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        GameState::new(12345, Tuning::default(), Viewport::default())
    }

    fn field(state: &GameState) -> PlayField {
        state.play_field()
    }

    #[test]
    fn test_new_state_waits_in_menu_with_wave() {
        let state = state();
        assert_eq!(state.phase, GamePhase::Paused);
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
        assert_eq!(state.asteroids.len(), 3);
        assert_eq!(state.ship.position(), Vec3::ZERO);
    }

    #[test]
    fn test_wave_on_spawn_ring() {
        let state = state();
        for rock in &state.asteroids {
            assert!((rock.position().length() - SPAWN_RING_RADIUS).abs() < 1e-4);
            assert_eq!(rock.scale(), Vec3::splat(0.4));
        }
    }

    #[test]
    fn test_large_asteroid_splits_into_three() {
        let mut state = state();
        state.asteroids.clear();
        state.spawn_asteroid(Vec3::new(1.0, 1.0, 0.0), 0.4);
        state.asteroids[0].dead = true;

        let field = field(&state);
        state.sweep_asteroids(1.0 / 60.0, &field);

        assert_eq!(state.asteroids.len(), 3);
        assert_eq!(state.score, 10);
        for child in &state.asteroids {
            assert_eq!(child.scale().x, 0.4 * 0.6);
            // Not updated in the tick they spawn
            assert_eq!(child.position(), Vec3::new(1.0, 1.0, 0.0));
        }
    }

    #[test]
    fn test_smallest_asteroid_does_not_split() {
        let mut state = state();
        state.asteroids.clear();
        let grandchild = 0.4 * 0.6 * 0.6;
        state.spawn_asteroid(Vec3::ZERO, grandchild);
        state.asteroids[0].dead = true;

        let field = field(&state);
        state.sweep_asteroids(1.0 / 60.0, &field);

        assert!(state.asteroids.is_empty());
        assert_eq!(state.score, 10);
    }

    #[test]
    fn test_sweep_removes_every_dead_asteroid() {
        let mut state = state();
        for rock in &mut state.asteroids {
            rock.set_scale(Vec3::splat(0.1));
            rock.dead = true;
        }
        let field = field(&state);
        state.sweep_asteroids(1.0 / 60.0, &field);

        assert!(state.asteroids.is_empty());
        assert_eq!(state.score, 30);
        let destroyed = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::AsteroidDestroyed { .. }))
            .count();
        assert_eq!(destroyed, 3);
    }

    #[test]
    fn test_missile_death_paths() {
        let mut state = state();
        let tuning = state.tuning.clone();
        let mut shot = Entity::missile(Vec3::new(1.0, 2.0, 0.0), 0.0, &tuning);
        shot.dead = true;
        let mut spent = Entity::missile(Vec3::ZERO, 0.0, &tuning);
        spent.decrease_lifetime(10.0);
        let live = Entity::missile(Vec3::ZERO, 0.0, &tuning);
        state.missiles = vec![shot, spent, live];

        let field = field(&state);
        state.sweep_missiles(0.5, &field);

        assert_eq!(state.missiles.len(), 1);
        assert_eq!(state.missiles[0].lifetime(), Some(3.5));
        assert_eq!(state.effects.len(), 1);
        let effect = state.effects.iter().next().map(|e| e.position);
        assert_eq!(effect, Some(Vec2::new(1.0 - 0.15, 2.0 - 0.15)));
    }

    #[test]
    fn test_enemy_aims_at_player() {
        let mut state = state();
        state.spawn_enemy();
        state.ship.set_position(Vec3::new(-6.9, 5.0, 0.0));
        let field = field(&state);

        state.update_enemy(1.0 / 60.0, &field);

        let enemy = state.enemy.as_ref().map(|e| e.yaw());
        assert!(enemy.is_some_and(|yaw| (yaw - 90.0).abs() < 1e-3));
    }

    #[test]
    fn test_enemy_fires_every_two_seconds() {
        let mut state = state();
        state.spawn_enemy();
        if let Some(enemy) = state.enemy.as_mut() {
            enemy.set_speed(0.0);
        }
        let field = field(&state);

        for _ in 0..4 {
            state.update_enemy(0.5, &field);
        }
        assert_eq!(state.enemy_missiles.len(), 1);
        state.update_enemy(0.5, &field);
        assert_eq!(state.enemy_missiles.len(), 1);
    }

    #[test]
    fn test_dead_enemy_dropped() {
        let mut state = state();
        state.spawn_enemy();
        if let Some(enemy) = state.enemy.as_mut() {
            enemy.dead = true;
        }
        let field = field(&state);
        state.update_enemy(1.0 / 60.0, &field);
        assert!(state.enemy.is_none());
    }

    #[test]
    fn test_enemy_hit_scores_immediately() {
        let mut state = state();
        state.asteroids.clear();
        state.spawn_enemy();
        let at = state.enemy.as_ref().map(|e| e.position()).unwrap_or_default();
        let tuning = state.tuning.clone();
        state.missiles.push(Entity::missile(at, 0.0, &tuning));

        state.resolve_collisions();

        assert_eq!(state.score, 100);
        assert!(state.enemy.as_ref().is_some_and(|e| e.dead));
    }

    #[test]
    fn test_two_missiles_on_enemy_score_twice() {
        let mut state = state();
        state.spawn_enemy();
        let at = state.enemy.as_ref().map(|e| e.position()).unwrap_or_default();
        let tuning = state.tuning.clone();
        state.missiles.push(Entity::missile(at, 0.0, &tuning));
        state.missiles.push(Entity::missile(at, 0.0, &tuning));

        state.resolve_collisions();

        assert_eq!(state.score, 200);
        assert!(state.missiles.iter().all(|m| m.dead));
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::EnemyDestroyed { points: 200 })
        );
    }

    #[test]
    fn test_two_missiles_on_asteroid_score_once() {
        let mut state = state();
        state.asteroids.clear();
        let grandchild = 0.4 * 0.6 * 0.6;
        state.spawn_asteroid(Vec3::new(1.0, 0.0, 0.0), grandchild);
        let tuning = state.tuning.clone();
        state.missiles.push(Entity::missile(Vec3::new(1.0, 0.0, 0.0), 0.0, &tuning));
        state.missiles.push(Entity::missile(Vec3::new(1.1, 0.0, 0.0), 0.0, &tuning));

        state.resolve_collisions();
        assert!(state.missiles.iter().all(|m| m.dead));
        assert_eq!(state.score, 0);

        let field = field(&state);
        state.sweep_asteroids(1.0 / 60.0, &field);
        state.sweep_missiles(1.0 / 60.0, &field);

        assert_eq!(state.score, 10);
        assert!(state.asteroids.is_empty());
        assert!(state.missiles.is_empty());
        assert_eq!(state.effects.len(), 2);
    }

    #[test]
    fn test_player_death_resets_field() {
        let mut state = state();
        state.phase = GamePhase::Playing;
        state.spawn_enemy();
        state.ship.set_position(Vec3::new(2.0, 0.0, 0.0));
        state.spawn_asteroid(Vec3::new(2.0, 0.0, 0.0), 0.4);

        assert!(state.check_player_hit());

        assert_eq!(state.lives, 2);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.effects.len(), 1);
        assert!(state.enemy.is_none());
        assert_eq!(state.ship.position(), Vec3::ZERO);
        assert_eq!(state.asteroids.len(), 3);
        assert!(state.camera.shake > 0.0);
    }

    #[test]
    fn test_last_life_ends_game() {
        let mut state = state();
        state.phase = GamePhase::Playing;
        state.lives = 1;
        state.score = 70;

        state.kill_player();

        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.drain_events().contains(&GameEvent::GameOver { score: 70 }));
    }

    #[test]
    fn test_new_game_resets_session() {
        let mut state = state();
        state.score = 500;
        state.lives = 0;
        state.phase = GamePhase::GameOver;
        state.spawn_enemy();

        state.new_game();

        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.enemy.is_none());
        assert_eq!(state.asteroids.len(), 3);
        assert!(state.effects.is_empty());
    }

    #[test]
    fn test_same_seed_same_wave() {
        let a = state();
        let b = state();
        for (x, y) in a.asteroids.iter().zip(&b.asteroids) {
            assert_eq!(x.position(), y.position());
            assert_eq!(x.orientation(), y.orientation());
        }
    }
}
