//! Death System
//!
//! Removes the cavemen who died this year and keeps the running tally of
//! deaths by cause.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::components::{CavemanId, DeathCause};
use crate::events::{Emit, EventKind};
use crate::population::Population;

/// Cumulative deaths since the simulation started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeathTally {
    pub hunger: u32,
    pub old_age: u32,
}

impl DeathTally {
    pub fn record(&mut self, cause: DeathCause) {
        match cause {
            DeathCause::Hunger => self.hunger += 1,
            DeathCause::Old => self.old_age += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.hunger + self.old_age
    }
}

/// Remove the dead from the registry. Returns how many were removed.
pub fn death_system(
    population: &mut Population,
    deaths: &[(CavemanId, DeathCause)],
    tally: &mut DeathTally,
    events: &mut dyn Emit,
) -> u32 {
    let mut removed = 0;

    for &(id, cause) in deaths {
        let Ok(corpse) = population.remove(id) else {
            continue;
        };
        tally.record(cause);
        removed += 1;

        debug!(%id, ?cause, age = corpse.age, "died");
        events.emit(EventKind::Died {
            id,
            cause,
            age: corpse.age,
        });
    }

    removed
}
