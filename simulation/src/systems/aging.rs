//! Aging System - one year older, one year hungrier

use rand::Rng;
use tracing::debug;

use crate::components::{CavemanId, DeathCause};
use crate::population::Population;

/// Age every live caveman and return those who died, in population order.
///
/// Dead cavemen stay in the registry; [`super::death_system`] removes them.
pub fn aging_system<R: Rng + ?Sized>(
    population: &mut Population,
    rng: &mut R,
) -> Vec<(CavemanId, DeathCause)> {
    let mut deaths = Vec::new();

    for id in population.ids() {
        if let Ok(caveman) = population.get_mut(id) {
            let died = caveman.advance_age_and_health(rng);
            debug!(%id, age = caveman.age, hunger = caveman.hunger, ?died, "aged");
            if let Some(cause) = died {
                deaths.push((id, cause));
            }
        }
    }

    deaths
}
