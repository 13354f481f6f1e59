//! Foraging System
//!
//! Splits the year's food pool among the tribe by hunting skill and lets
//! everyone eat. Whatever a caveman does not eat becomes its surplus for
//! the sharing stage.

use rand::Rng;
use rand_distr::StandardNormal;
use tracing::debug;

use crate::components::Caveman;
use crate::error::SimulationError;
use crate::events::{Emit, EventKind};
use crate::hunger::hunger_after_eating;
use crate::population::Population;

/// Below this age a caveman cannot hunt.
pub const HUNTING_AGE: u32 = 12;

/// Standard deviation of the yearly luck added to the food-get chance.
const HUNTING_NOISE: f64 = 0.1;

const SELFISHNESS_WEIGHT: f64 = 0.7;
const HUNGER_WEIGHT: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForagingResult {
    pub food_pool: u32,
    pub distributed: u32,
    pub eaten: f64,
}

/// Whole food units available this year.
pub fn food_pool(food_supply_ratio: f64, population: usize) -> u32 {
    (food_supply_ratio * population as f64).floor().max(0.0) as u32
}

/// Chance of getting food, from prowess plus `noise`, in `[0, 1]`.
pub fn food_get_chance(caveman: &Caveman, noise: f64) -> f64 {
    if caveman.age < HUNTING_AGE {
        return 0.0;
    }
    (caveman.prowess / 100.0 + noise).clamp(0.0, 1.0)
}

/// How much a caveman wants to eat: mostly greed, partly need.
pub fn desired_consumption(caveman: &Caveman) -> f64 {
    SELFISHNESS_WEIGHT * f64::from(caveman.selfishness()) / 100.0
        + HUNGER_WEIGHT * caveman.hunger / 100.0
}

/// Units per rank when `pool` is dealt one at a time, round-robin, to
/// `hunters` ranked cavemen.
pub fn deal_round_robin(pool: u32, hunters: usize) -> Vec<u32> {
    if hunters == 0 {
        return Vec::new();
    }
    let hunters_u32 = hunters as u32;
    let base = pool / hunters_u32;
    let extra = (pool % hunters_u32) as usize;
    (0..hunters).map(|rank| base + u32::from(rank < extra)).collect()
}

/// Run the foraging stage.
///
/// Returns [`SimulationError::EmptyPopulation`] when nobody is alive.
pub fn foraging_system<R: Rng + ?Sized>(
    population: &mut Population,
    food_supply_ratio: f64,
    rng: &mut R,
    events: &mut dyn Emit,
) -> Result<ForagingResult, SimulationError> {
    let tribe = population.snapshot();
    if tribe.is_empty() {
        return Err(SimulationError::EmptyPopulation);
    }

    let pool = food_pool(food_supply_ratio, tribe.len());

    let chances: Vec<f64> = tribe
        .iter()
        .map(|caveman| {
            let noise: f64 = rng.sample::<f64, _>(StandardNormal) * HUNTING_NOISE;
            food_get_chance(caveman, noise)
        })
        .collect();

    // Stable: equal chances keep population order, so tied cavemen are
    // dealt to in the order they appear in the registry.
    let mut ranking: Vec<usize> = (0..tribe.len()).collect();
    ranking.sort_by(|&a, &b| chances[b].total_cmp(&chances[a]));

    let mut gained = vec![0u32; tribe.len()];
    for (units, &slot) in deal_round_robin(pool, tribe.len()).into_iter().zip(&ranking) {
        gained[slot] = units;
    }

    let lone_survivor = tribe.len() == 1;
    let mut result = ForagingResult {
        food_pool: pool,
        distributed: gained.iter().sum(),
        eaten: 0.0,
    };

    for (caveman, &units) in tribe.iter().zip(&gained) {
        let got = f64::from(units);
        let eaten = if lone_survivor {
            got
        } else {
            got.min(desired_consumption(caveman))
        };

        let hunger = hunger_after_eating(caveman.hunger, eaten);
        let Ok(entry) = population.get_mut(caveman.id) else {
            continue;
        };
        entry.set_hunger(hunger);
        entry.food_to_share = got - eaten;
        result.eaten += eaten;

        debug!(id = %caveman.id, units, eaten, hunger, "foraged");
        events.emit(EventKind::Foraged {
            id: caveman.id,
            gained: units,
            eaten,
            hunger,
        });
    }

    Ok(result)
}
