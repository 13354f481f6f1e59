//! Human-readable account of the year, written through `tracing`.

use std::collections::HashMap;

use tracing::info;

use crate::components::{CavemanId, DeathCause};
use crate::events::{Event, EventKind, EventSink, Stage};
use crate::names::NameSource;

/// Renders events as narrative lines. Names are assigned on first mention
/// and reused afterwards.
pub struct Narrator<N: NameSource> {
    names: N,
    known: HashMap<CavemanId, String>,
}

impl<N: NameSource> Narrator<N> {
    pub fn new(names: N) -> Self {
        Self {
            names,
            known: HashMap::new(),
        }
    }

    pub fn name(&mut self, id: CavemanId) -> String {
        if let Some(name) = self.known.get(&id) {
            return name.clone();
        }
        let name = self.names.name_for(id);
        self.known.insert(id, name.clone());
        name
    }

    /// The narrative line for `event`.
    pub fn describe(&mut self, event: &Event) -> String {
        match &event.kind {
            EventKind::StageStarted { stage } => {
                let title = match stage {
                    Stage::Foraging => "FORAGING",
                    Stage::Sharing => "SHARING",
                    Stage::Aging => "AGING",
                    Stage::Pairing => "SOCIAL",
                    Stage::Reproduction => "REPRODUCTION",
                };
                format!("#### Year {} - {title} STAGE ####", event.year)
            }
            EventKind::Foraged { id, eaten, hunger, .. } => {
                format!("{} ate {eaten:.2} food and is now at hunger {hunger:.2}.", self.name(*id))
            }
            EventKind::Shared { donor, recipient, amount, recipient_hunger, relationship } => {
                let donor = self.name(*donor);
                let recipient = self.name(*recipient);
                format!(
                    "{donor} shared {amount:.2} food with {recipient}, now at hunger \
                     {recipient_hunger:.2}; {donor}'s bond to {recipient} is {relationship:.2}."
                )
            }
            EventKind::Died { id, cause, age } => match cause {
                DeathCause::Hunger => format!("{} has died of hunger at {age}.", self.name(*id)),
                DeathCause::Old => format!("{} has happily died of old age at {age}.", self.name(*id)),
            },
            EventKind::Paired { female, male, .. } => {
                format!("{} and {} have formed a family!", self.name(*female), self.name(*male))
            }
            EventKind::ReproductionRate { mean_hunger, rate } => {
                format!("Average hunger is {mean_hunger:.2} and reproduction rate is {rate:.2}.")
            }
            EventKind::Born { child, mother, father } => {
                let mother = self.name(*mother);
                let father = self.name(*father);
                format!("The gods have blessed {mother} and {father} with {}!", self.name(*child))
            }
            EventKind::Extinct => "No one is alive!".to_string(),
        }
    }
}

impl<N: NameSource> EventSink for Narrator<N> {
    fn record(&mut self, event: &Event) {
        let line = self.describe(event);
        info!(target: "narrative", "{line}");
    }
}
