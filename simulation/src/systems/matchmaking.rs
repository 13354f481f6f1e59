//! Matchmaking System
//!
//! Well-fed single women pick the well-fed single man they like most,
//! provided they like him enough.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::components::{Caveman, CavemanId, Sex};
use crate::events::{Emit, EventKind};
use crate::population::Population;

/// Minimum age for pairing
pub const MARRIAGE_AGE: u32 = 16;

/// Only cavemen hungrier than this are too busy to pair.
pub const SATIETY_THRESHOLD: f64 = 30.0;

/// A woman's affinity must exceed this for her to choose a man.
pub const MIN_AFFINITY: f64 = 10.0;

/// Added to the woman's affinity toward her new partner.
pub const PAIRING_BONUS: f64 = 10.0;

/// A standing pairing. Never dissolved, even when a partner dies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Couple {
    pub female: CavemanId,
    pub male: CavemanId,
}

fn is_eligible(caveman: &Caveman, sex: Sex) -> bool {
    caveman.sex == sex
        && !caveman.is_taken
        && caveman.age >= MARRIAGE_AGE
        && caveman.hunger < SATIETY_THRESHOLD
}

/// Run the pairing stage. New couples are appended to `couples` and also
/// returned.
pub fn matchmaking_system(
    population: &mut Population,
    couples: &mut Vec<Couple>,
    events: &mut dyn Emit,
) -> Vec<Couple> {
    let candidates = population.ids_by_identity();
    let mut formed = Vec::new();

    for female in population.ids() {
        let Ok(woman) = population.get(female) else {
            continue;
        };
        if !is_eligible(&woman, Sex::Female) {
            continue;
        }

        let chosen = population
            .relationships
            .ranked(female, &candidates)
            .into_iter()
            .take_while(|&(_, affinity)| affinity > MIN_AFFINITY)
            .map(|(male, _)| male)
            .find(|&male| {
                population
                    .get(male)
                    .map(|man| is_eligible(&man, Sex::Male))
                    .unwrap_or(false)
            });

        let Some(male) = chosen else {
            continue;
        };

        let relationship = population.relationships.add(female, male, PAIRING_BONUS);
        for id in [female, male] {
            if let Ok(partner) = population.get_mut(id) {
                partner.is_taken = true;
            }
        }

        let couple = Couple { female, male };
        couples.push(couple);
        formed.push(couple);

        debug!(%female, %male, relationship, "formed a family");
        events.emit(EventKind::Paired {
            female,
            male,
            relationship,
        });
    }

    formed
}
