//! Role markers

use serde::{Deserialize, Serialize};

const fn default_patrol_distance() -> f32 {
    3.0
}

/// Marks a player-controlled entity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerComponent {
    /// Player slot (0 = player one)
    pub player_id: u8,
}

/// Marks a hostile entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyComponent {
    /// Half-width of the horizontal patrol path
    #[serde(default = "default_patrol_distance")]
    pub patrol_distance: f32,
}

impl Default for EnemyComponent {
    fn default() -> Self {
        Self {
            patrol_distance: default_patrol_distance(),
        }
    }
}
