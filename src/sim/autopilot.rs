//! Idle/demo mode - AI plays the game
//!
//! Produces the same [`TickInput`] a human would, so demo runs go through
//! exactly the same tick as real play.

use super::state::GameState;
use super::tick::TickInput;

/// How close (px) a hostile may get above the player before it is dodged
const DODGE_DISTANCE: f32 = 80.0;
/// Horizontal slack when lining up a shot
const AIM_TOLERANCE: f32 = 4.0;

/// Choose this tick's input from the current state
pub fn autopilot_input(state: &GameState) -> TickInput {
    let mut input = TickInput::default();
    if state.is_game_over() {
        return input;
    }

    let player = &state.player;
    let muzzle_x = player.muzzle().x;

    // Dodge anything about to land on us
    let threat = state.pool.hostiles.iter().find(|h| {
        h.pos.y + h.size > player.pos.y - DODGE_DISTANCE
            && h.pos.y < player.pos.y + player.size
            && h.pos.x + h.size > player.pos.x
            && h.pos.x < player.pos.x + player.size
    });
    if let Some(threat) = threat {
        let threat_center = threat.pos.x + threat.size / 2.0;
        let room_right = state.config.player_max_x() - player.pos.x;
        if (muzzle_x >= threat_center && room_right > 0.0) || player.pos.x <= 0.0 {
            input.right = true;
        } else {
            input.left = true;
        }
        return input;
    }

    // Otherwise track the lowest hostile still on its way down
    let target = state
        .pool
        .hostiles
        .iter()
        .filter(|h| h.pos.y + h.size < player.pos.y)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    if let Some(target) = target {
        let target_x = target.pos.x + target.size / 2.0;
        let delta = target_x - muzzle_x;
        if delta > AIM_TOLERANCE {
            input.right = true;
        } else if delta < -AIM_TOLERANCE {
            input.left = true;
        }
        input.fire = delta.abs() <= target.size / 2.0;
    }

    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::state::Hostile;

    fn state_with_hostile(x: f32, y: f32) -> GameState {
        let mut state = GameState::new(GameConfig::default(), 3).unwrap();
        let id = state.pool.next_entity_id();
        let mut hostile = Hostile::normal(id, x, &state.config);
        hostile.pos.y = y;
        state.pool.hostiles.insert(hostile);
        state
    }

    #[test]
    fn test_idle_without_hostiles() {
        let state = GameState::new(GameConfig::default(), 3).unwrap();
        assert_eq!(autopilot_input(&state), TickInput::default());
    }

    #[test]
    fn test_moves_toward_and_fires_at_target() {
        let state = state_with_hostile(600.0, 100.0);
        let input = autopilot_input(&state);
        assert!(input.right && !input.left);
        assert!(!input.fire);

        let state = state_with_hostile(380.0, 100.0);
        let input = autopilot_input(&state);
        assert!(input.fire);
    }

    #[test]
    fn test_dodges_low_hostile() {
        // Hostile centre (390) left of muzzle (400): dodge right
        let state = state_with_hostile(370.0, 470.0);
        let input = autopilot_input(&state);
        assert!(input.right && !input.fire);
    }
}
