//! Pairwise collision passes between entity collections
//!
//! Every pass pairs two *different* collections, so an entity is never tested
//! against itself. Hits only mark `dead`; removal happens in the sweep.

use super::entity::Entity;

/// What the player-missile pass hit this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MissileHits {
    /// Asteroid hits (points are awarded when the asteroid is swept)
    pub asteroids: u32,
    /// Missile hits on the enemy ship, each worth enemy points
    pub enemy: u32,
}

/// What killed the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerHit {
    Asteroid(usize),
    EnemyMissile(usize),
}

/// Player missiles against asteroids and the enemy ship
///
/// A missile may take out several overlapping targets in the same tick, and
/// every missile touching a target dies with it, even one already marked dead.
pub fn resolve_missile_hits(
    missiles: &mut [Entity],
    asteroids: &mut [Entity],
    mut enemy: Option<&mut Entity>,
) -> MissileHits {
    let mut hits = MissileHits::default();

    for missile in missiles.iter_mut() {
        for asteroid in asteroids.iter_mut() {
            if missile.check_collision(asteroid) {
                missile.dead = true;
                asteroid.dead = true;
                hits.asteroids += 1;
            }
        }

        if let Some(enemy) = enemy.as_deref_mut() {
            if missile.check_collision(enemy) {
                missile.dead = true;
                enemy.dead = true;
                hits.enemy += 1;
            }
        }
    }

    hits
}

/// First live asteroid touching the ship, else the first live enemy missile
pub fn find_player_hit(ship: &Entity, asteroids: &[Entity], enemy_missiles: &[Entity]) -> Option<PlayerHit> {
    if let Some(i) = asteroids.iter().position(|a| !a.dead && a.check_collision(ship)) {
        return Some(PlayerHit::Asteroid(i));
    }
    enemy_missiles
        .iter()
        .position(|m| !m.dead && m.check_collision(ship))
        .map(PlayerHit::EnemyMissile)
}
