//! Yearly summary statistics.

use serde::{Deserialize, Serialize};

use crate::components::Caveman;
use crate::systems::DeathTally;

/// Statistics count anyone older than this as an adult.
pub const ADULT_AGE: u32 = 16;

/// One record per simulated year. Means are `None` for an empty tribe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearStatistics {
    pub year: u32,
    pub population: usize,
    pub adults: usize,
    pub children: usize,
    pub taken: usize,
    pub singles: usize,
    /// Cumulative since the first year.
    pub hunger_deaths: u32,
    /// Cumulative since the first year.
    pub old_age_deaths: u32,
    pub average_age: Option<f64>,
    pub average_hunger: Option<f64>,
    pub average_prowess: Option<f64>,
    pub average_selfishness: Option<f64>,
    pub average_reciprocity: Option<f64>,
}

impl YearStatistics {
    pub fn collect(year: u32, tribe: &[Caveman], deaths: DeathTally) -> Self {
        let adults = tribe.iter().filter(|c| c.age > ADULT_AGE).count();
        let taken = tribe.iter().filter(|c| c.is_taken).count();

        Self {
            year,
            population: tribe.len(),
            adults,
            children: tribe.len() - adults,
            taken,
            singles: tribe.len() - taken,
            hunger_deaths: deaths.hunger,
            old_age_deaths: deaths.old_age,
            average_age: mean(tribe, |c| f64::from(c.age)),
            average_hunger: mean(tribe, |c| c.hunger),
            average_prowess: mean(tribe, |c| c.prowess),
            average_selfishness: mean(tribe, |c| f64::from(c.selfishness())),
            average_reciprocity: mean(tribe, |c| f64::from(c.reciprocity())),
        }
    }
}

fn mean(tribe: &[Caveman], value: impl Fn(&Caveman) -> f64) -> Option<f64> {
    if tribe.is_empty() {
        return None;
    }
    Some(tribe.iter().map(value).sum::<f64>() / tribe.len() as f64)
}
