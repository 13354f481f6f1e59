//! Simulation parameters.

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;

/// How a donor spends its surplus during the sharing stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SharingPolicy {
    /// Feed only the most-liked hungry caveman. Any rest stays with the
    /// donor as unspent `food_to_share` until the next foraging stage.
    #[default]
    SingleRecipient,
    /// Keep feeding down the ranking until the surplus runs out.
    Waterfall,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub initial_population: usize,
    /// Food units per caveman per year. Below 1.0 means scarcity.
    pub food_supply_ratio: f64,
    /// Fixed seed for reproducible runs. `None` draws from entropy.
    pub seed: Option<u64>,
    pub sharing: SharingPolicy,
    pub event_log_capacity: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_population: 10,
            food_supply_ratio: 0.3,
            seed: None,
            sharing: SharingPolicy::default(),
            event_log_capacity: 10_000,
        }
    }
}

impl SimulationConfig {
    pub fn new(initial_population: usize, food_supply_ratio: f64) -> Self {
        Self {
            initial_population,
            food_supply_ratio,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.initial_population == 0 {
            return Err(SimulationError::InvalidConfig(
                "initial_population must be at least 1".to_string(),
            ));
        }
        if !self.food_supply_ratio.is_finite() || self.food_supply_ratio < 0.0 {
            return Err(SimulationError::InvalidConfig(format!(
                "food_supply_ratio must be a non-negative number, got {}",
                self.food_supply_ratio
            )));
        }
        if self.event_log_capacity == 0 {
            return Err(SimulationError::InvalidConfig(
                "event_log_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
