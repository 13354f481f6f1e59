//! Birth System
//!
//! Every standing couple may have a child each year. The chance drops as
//! the tribe gets hungrier.

use rand::Rng;
use tracing::debug;

use crate::components::{CavemanId, CavemanSpec};
use crate::events::{Emit, EventKind};
use crate::population::Population;
use crate::systems::matchmaking::Couple;

/// Reproduction chance for a perfectly fed tribe.
const BASE_REPRODUCTION_RATE: f64 = 0.5;

/// Chance lost per point of mean hunger.
const HUNGER_PENALTY: f64 = 0.01;

/// Affinity each parent starts with toward a newborn.
pub const PARENT_BOND: f64 = 300.0;

/// Yearly reproduction chance for the given mean hunger.
pub fn reproduction_rate(mean_hunger: f64) -> f64 {
    BASE_REPRODUCTION_RATE - HUNGER_PENALTY * mean_hunger
}

/// Mean hunger of the live tribe, `None` when empty.
pub fn mean_hunger(population: &Population) -> Option<f64> {
    let tribe = population.snapshot();
    if tribe.is_empty() {
        return None;
    }
    Some(tribe.iter().map(|c| c.hunger).sum::<f64>() / tribe.len() as f64)
}

/// Parent average plus a small integer nudge in `[-5, 5)`, truncated.
fn inherit<R: Rng + ?Sized>(a: i32, b: i32, rng: &mut R) -> i32 {
    let noise: i32 = rng.gen_range(-5..5);
    (f64::from(a + b) / 2.0 + f64::from(noise)) as i32
}

/// Run the reproduction stage. Returns the newborns.
///
/// Couples with a missing partner are skipped for the year.
pub fn birth_system<R: Rng + ?Sized>(
    population: &mut Population,
    couples: &[Couple],
    rng: &mut R,
    events: &mut dyn Emit,
) -> Vec<CavemanId> {
    let rate = match mean_hunger(population) {
        Some(mean) => {
            let rate = reproduction_rate(mean);
            events.emit(EventKind::ReproductionRate {
                mean_hunger: mean,
                rate,
            });
            rate
        }
        None => 0.0,
    };

    let mut newborns = Vec::new();

    for couple in couples {
        let (Ok(mother), Ok(father)) = (population.get(couple.female), population.get(couple.male))
        else {
            continue;
        };

        if rng.gen::<f64>() >= rate {
            continue;
        }

        let selfishness = inherit(mother.selfishness(), father.selfishness(), rng);
        let base_prowess = inherit(mother.base_prowess(), father.base_prowess(), rng);
        let child = population.add(CavemanSpec::offspring(selfishness, base_prowess), rng);

        population.relationships.set(mother.id, child, PARENT_BOND);
        population.relationships.set(father.id, child, PARENT_BOND);
        newborns.push(child);

        debug!(%child, mother = %mother.id, father = %father.id, "born");
        events.emit(EventKind::Born {
            child,
            mother: mother.id,
            father: father.id,
        });
    }

    newborns
}
