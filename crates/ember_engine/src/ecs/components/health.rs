//! Health component

use serde::{Deserialize, Serialize};

/// Hit points of a damageable entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HealthPayload")]
pub struct HealthComponent {
    /// Upper bound, always positive
    pub max_health: u32,
    /// Remaining hit points, `0..=max_health`
    pub current_health: u32,
}

#[derive(Deserialize)]
struct HealthPayload {
    max_health: u32,
    current_health: Option<u32>,
}

impl TryFrom<HealthPayload> for HealthComponent {
    type Error = String;

    fn try_from(payload: HealthPayload) -> Result<Self, Self::Error> {
        if payload.max_health == 0 {
            return Err("max_health must be positive".to_string());
        }
        let current = payload.current_health.unwrap_or(payload.max_health);
        Ok(Self {
            max_health: payload.max_health,
            current_health: current.min(payload.max_health),
        })
    }
}

impl HealthComponent {
    /// Full health. A zero maximum is bumped to one.
    pub fn new(max_health: u32) -> Self {
        let max_health = max_health.max(1);
        Self {
            max_health,
            current_health: max_health,
        }
    }

    /// Reduce health, saturating at zero
    pub fn take_damage(&mut self, amount: u32) {
        self.current_health = self.current_health.saturating_sub(amount);
    }

    /// Restore health, capped at the maximum
    pub fn heal(&mut self, amount: u32) {
        self.current_health = self.current_health.saturating_add(amount).min(self.max_health);
    }

    /// Whether any health remains
    pub const fn is_alive(&self) -> bool {
        self.current_health > 0
    }
}
