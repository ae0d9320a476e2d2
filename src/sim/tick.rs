//! Simulation step
//!
//! Core game loop that advances one frame deterministically.

use super::collision::{CollisionEvent, resolve_collisions};
use super::state::{GameEvent, GamePhase, GameState, Projectile};
use crate::consts::micros;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move left held
    pub left: bool,
    /// Move right held
    pub right: bool,
    /// Fire pressed since last tick
    pub fire: bool,
    /// Restart pressed since last tick
    pub restart: bool,
}

impl TickInput {
    /// Horizontal direction: -1, 0 or 1
    pub fn axis(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// Advance the game state by one frame of `dt_ms` milliseconds
///
/// Order: restart, movement, fire, advance, collisions, spawning, cull.
/// After game over only a restart changes anything.
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.restart {
        state.restart();
        log::info!("Game restarted");
        events.push(GameEvent::Restarted);
        return events;
    }

    if state.phase == GamePhase::GameOver {
        return events;
    }

    state.time_us += micros(dt_ms);

    // Movement
    let dx = input.axis() * state.config.player_speed;
    state.player.shift(dx, &state.config);

    // Fire
    if input.fire && state.can_fire() {
        let id = state.pool.next_entity_id();
        state.pool.projectiles.insert(Projectile::new(
            id,
            state.player.muzzle(),
            state.config.projectile_speed,
            state.config.projectile_radius,
        ));
        state.last_fire_us = Some(state.time_us);
        events.push(GameEvent::Fired { projectile: id });
    }

    state.pool.advance();

    let collisions = resolve_collisions(
        &state.player,
        state.pool.projectiles.as_slice(),
        state.pool.hostiles.as_slice(),
    );
    apply_collisions(state, &collisions, &mut events);

    let GameState {
        spawner,
        config,
        pool,
        score,
        ..
    } = state;
    spawner.step(dt_ms, config, pool, score, &mut events);

    cull_out_of_bounds(state);

    events
}

/// Apply resolver output: damage, scoring, game over, then one sweep
fn apply_collisions(
    state: &mut GameState,
    collisions: &[CollisionEvent],
    events: &mut Vec<GameEvent>,
) {
    let mut consumed: Vec<u32> = Vec::new();

    for collision in collisions {
        match *collision {
            CollisionEvent::Hit { hostile, projectile } => {
                if let Some(h) = state.pool.hostiles.get_mut(hostile) {
                    h.health -= 1;
                }
                consumed.push(projectile);
                events.push(GameEvent::Hit { hostile, projectile });
            }
            CollisionEvent::Defeated { hostile } => {
                let kind = state
                    .pool
                    .hostiles
                    .get(hostile)
                    .map(|h| h.kind)
                    .unwrap_or_default();
                state.score = state.score.saturating_add(state.config.score_per_defeat);
                events.push(GameEvent::Defeated { hostile, kind });
            }
            CollisionEvent::PlayerCollision { hostile } => {
                log::debug!("Hostile {} reached the player", hostile);
            }
            CollisionEvent::GameOver => {
                state.end();
                log::info!("Game over with score {}", state.score);
                events.push(GameEvent::GameOver { score: state.score });
                break;
            }
        }
    }

    if !consumed.is_empty() {
        state.pool.projectiles.remove_where(|p| consumed.contains(&p.id));
    }
    state.pool.hostiles.remove_where(|h| !h.is_alive());
}

/// Drop projectiles above the field and hostiles below it
fn cull_out_of_bounds(state: &mut GameState) {
    let field_height = state.config.field_height;
    state.pool.projectiles.remove_where(|p| p.pos.y + p.radius < 0.0);
    state.pool.hostiles.remove_where(|h| h.pos.y > field_height);
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use proptest::prelude::*;

    use super::*;
    use crate::config::GameConfig;
    use crate::sim::spawn::SchedulerState;
    use crate::sim::state::{Hostile, HostileKind};

    const DT: f64 = 10.0;

    fn new_state() -> GameState {
        GameState::new(GameConfig::default(), 12345).unwrap()
    }

    fn fire() -> TickInput {
        TickInput {
            fire: true,
            ..Default::default()
        }
    }

    fn insert_hostile(state: &mut GameState, x: f32, y: f32, health: i32) -> u32 {
        let id = state.pool.next_entity_id();
        let mut hostile = Hostile::normal(id, x, &state.config);
        hostile.pos.y = y;
        hostile.health = health;
        state.pool.hostiles.insert(hostile);
        id
    }

    #[test]
    fn test_fire_cooldown() {
        let mut state = new_state();

        tick(&mut state, &fire(), DT);
        assert_eq!(state.pool.projectiles.len(), 1);

        // 490 ms after the first shot: rejected
        for _ in 0..48 {
            tick(&mut state, &TickInput::default(), DT);
        }
        tick(&mut state, &fire(), DT);
        assert_eq!(state.pool.projectiles.len(), 1);

        // 500 ms: accepted, exactly one
        tick(&mut state, &fire(), DT);
        assert_eq!(state.pool.projectiles.len(), 2);
    }

    #[test]
    fn test_fire_cooldown_at_frame_rate() {
        use crate::consts::FRAME_MS;

        let fired = |events: &[GameEvent]| events.iter().any(|e| matches!(e, GameEvent::Fired { .. }));
        let mut state = new_state();
        assert!(fired(&tick(&mut state, &fire(), FRAME_MS)));

        for _ in 0..28 {
            tick(&mut state, &TickInput::default(), FRAME_MS);
        }
        // 29 ticks (483 ms) after the first shot
        assert!(!fired(&tick(&mut state, &fire(), FRAME_MS)));
        // 30 ticks (500 ms)
        assert!(fired(&tick(&mut state, &fire(), FRAME_MS)));
    }

    #[test]
    fn test_spawn_delay_at_frame_rate() {
        use crate::consts::FRAME_MS;

        let mut state = new_state();
        let mut spawn_ticks = Vec::new();
        for i in 1..=360 {
            let events = tick(&mut state, &TickInput::default(), FRAME_MS);
            if events.iter().any(|e| matches!(e, GameEvent::Spawned { .. })) {
                spawn_ticks.push(i);
            }
        }
        assert_eq!(spawn_ticks, vec![120, 240, 360]);
    }

    #[test]
    fn test_projectile_path_and_hit() {
        let mut state = new_state();

        tick(&mut state, &fire(), DT);
        for _ in 0..9 {
            tick(&mut state, &TickInput::default(), DT);
        }
        let projectile = &state.pool.projectiles.as_slice()[0];
        assert_eq!(projectile.pos, Vec2::new(400.0, 440.0));

        // A hostile covering that point is hit on the next tick
        let id = insert_hostile(&mut state, 380.0, 398.0, 1);
        let events = tick(&mut state, &TickInput::default(), DT);
        assert!(events.iter().any(|e| matches!(e, GameEvent::Hit { hostile, .. } if *hostile == id)));
        assert!(state.pool.projectiles.is_empty());
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_hostile_descends_two_per_frame() {
        let mut state = new_state();
        state.player.pos.x = 0.0;
        insert_hostile(&mut state, 100.0, 0.0, 1);

        for _ in 0..50 {
            tick(&mut state, &TickInput::default(), DT);
        }

        let hostile = &state.pool.hostiles.as_slice()[0];
        assert_eq!(hostile.pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_double_hit_defeats_health_two() {
        let mut state = new_state();
        let id = insert_hostile(&mut state, 380.0, 418.0, 2);
        for (i, x) in [400.0, 395.0].into_iter().enumerate() {
            let pid = state.pool.next_entity_id();
            state.pool.projectiles.insert(Projectile::new(
                pid,
                Vec2::new(x, 450.0 + i as f32),
                10.0,
                10.0,
            ));
        }

        let events = tick(&mut state, &TickInput::default(), DT);

        let defeated = events
            .iter()
            .filter(|e| matches!(e, GameEvent::Defeated { hostile, .. } if *hostile == id))
            .count();
        assert_eq!(defeated, 1);
        assert!(state.pool.hostiles.is_empty());
        assert!(state.pool.projectiles.is_empty());
    }

    #[test]
    fn test_score_99_to_100_spawns_elite_same_frame() {
        let mut state = new_state();
        state.score = 99;
        insert_hostile(&mut state, 380.0, 418.0, 1);
        let pid = state.pool.next_entity_id();
        state
            .pool
            .projectiles
            .insert(Projectile::new(pid, Vec2::new(400.0, 450.0), 10.0, 10.0));

        let events = tick(&mut state, &TickInput::default(), DT);

        assert_eq!(state.score, 0);
        let elites: Vec<_> = state
            .pool
            .hostiles
            .iter()
            .filter(|h| h.kind == HostileKind::Elite)
            .collect();
        assert_eq!(elites.len(), 1);
        assert_eq!(elites[0].health, 100);
        assert!(events.iter().any(|e| matches!(e, GameEvent::EliteSpawned { .. })));
    }

    #[test]
    fn test_collision_ends_game_and_freezes() {
        let mut state = new_state();
        insert_hostile(&mut state, 380.0, 500.0, 1);

        let events = tick(&mut state, &TickInput::default(), DT);
        assert!(events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })));
        assert!(state.is_game_over());
        assert_eq!(state.spawner.state(), SchedulerState::Paused);

        let before = state.pool.hostiles.as_slice()[0].pos;
        let events = tick(
            &mut state,
            &TickInput {
                right: true,
                fire: true,
                ..Default::default()
            },
            DT,
        );
        assert!(events.is_empty());
        assert_eq!(state.pool.hostiles.as_slice()[0].pos, before);
        assert!(state.pool.projectiles.is_empty());
    }

    #[test]
    fn test_restart_resets_session() {
        let mut state = new_state();
        state.score = 42;
        state.last_fire_us = Some(0);
        insert_hostile(&mut state, 380.0, 500.0, 1);
        tick(&mut state, &TickInput::default(), DT);
        assert!(state.is_game_over());
        assert_eq!(state.score, 42);

        let events = tick(
            &mut state,
            &TickInput {
                restart: true,
                ..Default::default()
            },
            DT,
        );

        assert_eq!(events, vec![GameEvent::Restarted]);
        assert!(!state.is_game_over());
        assert_eq!(state.player.pos, Vec2::new(375.0, 540.0));
        assert_eq!(state.score, 0);
        assert!(state.pool.is_empty());
        assert_eq!(state.spawner.state(), SchedulerState::Running);
        assert_eq!(state.spawner.elapsed_ms(), 0.0);
        assert!(state.can_fire());
    }

    #[test]
    fn test_out_of_bounds_culled() {
        let mut state = new_state();
        state.player.pos.x = 0.0;
        insert_hostile(&mut state, 700.0, 599.0, 1);
        let pid = state.pool.next_entity_id();
        state
            .pool
            .projectiles
            .insert(Projectile::new(pid, Vec2::new(100.0, -1.0), 10.0, 10.0));

        tick(&mut state, &TickInput::default(), DT);

        assert!(state.pool.is_empty());
    }

    #[test]
    fn test_elite_survives_above_field() {
        let mut state = new_state();
        state.score = state.config.score_threshold;
        let events = tick(&mut state, &TickInput::default(), DT);
        assert!(events.iter().any(|e| matches!(e, GameEvent::EliteSpawned { .. })));

        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), DT);
        }

        let elite = state
            .pool
            .hostiles
            .iter()
            .find(|h| h.kind == HostileKind::Elite)
            .unwrap();
        assert_eq!(elite.pos.y, -95.0);
        assert_eq!(elite.vel.y, state.config.elite_speed);
        assert!(!state.is_game_over());
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(GameConfig::default(), 99999).unwrap();
        let mut state2 = GameState::new(GameConfig::default(), 99999).unwrap();

        let inputs = [
            TickInput {
                left: true,
                ..Default::default()
            },
            fire(),
            TickInput::default(),
        ];

        for i in 0..600 {
            let input = &inputs[i % inputs.len()];
            tick(&mut state1, input, DT);
            tick(&mut state2, input, DT);
        }

        assert_eq!(state1.pool.hostiles.len(), state2.pool.hostiles.len());
        for (a, b) in state1.pool.hostiles.iter().zip(state2.pool.hostiles.iter()) {
            assert_eq!(a.pos, b.pos);
        }
        assert_eq!(state1.player.pos, state2.player.pos);
    }

    fn arb_input() -> impl Strategy<Value = TickInput> {
        (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(left, right, fire)| TickInput {
            left,
            right,
            fire,
            restart: false,
        })
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_field(inputs in prop::collection::vec(arb_input(), 1..400)) {
            let mut state = new_state();
            let max_x = state.config.player_max_x();
            for input in &inputs {
                tick(&mut state, input, DT);
                prop_assert!(state.player.pos.x >= 0.0 && state.player.pos.x <= max_x);
            }
        }

        #[test]
        fn prop_game_over_frames_change_nothing(inputs in prop::collection::vec(arb_input(), 1..50)) {
            let mut state = new_state();
            insert_hostile(&mut state, 10.0, 100.0, 3);
            insert_hostile(&mut state, 380.0, 500.0, 1);
            tick(&mut state, &TickInput::default(), DT);
            prop_assert!(state.is_game_over());

            let positions: Vec<Vec2> = state.pool.hostiles.iter().map(|h| h.pos).collect();
            let player = state.player.pos;
            let score = state.score;
            let time = state.time_us;
            for input in &inputs {
                tick(&mut state, input, DT);
            }
            let after: Vec<Vec2> = state.pool.hostiles.iter().map(|h| h.pos).collect();
            prop_assert_eq!(positions, after);
            prop_assert_eq!(state.player.pos, player);
            prop_assert_eq!(state.score, score);
            prop_assert_eq!(state.time_us, time);
            prop_assert!(state.pool.projectiles.is_empty());
        }
    }
}
