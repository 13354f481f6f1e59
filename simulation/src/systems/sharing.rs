//! Sharing System
//!
//! Cavemen with a surplus feed the hungry caveman they like most. Every
//! gift raises the donor's affinity toward the recipient by the hunger it
//! relieved.

use tracing::debug;

use crate::components::CavemanId;
use crate::config::SharingPolicy;
use crate::events::{Emit, EventKind};
use crate::hunger::{food_needed_for_zero_hunger, hunger_after_eating, relationship_delta};
use crate::population::Population;

/// One completed gift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Donation {
    pub donor: CavemanId,
    pub recipient: CavemanId,
    pub amount: f64,
}

/// Run the sharing stage. Returns every donation made, in order.
pub fn sharing_system(
    population: &mut Population,
    policy: SharingPolicy,
    events: &mut dyn Emit,
) -> Vec<Donation> {
    let donors = population.ids();
    let candidates = population.ids_by_identity();
    let mut donations = Vec::new();

    for donor in donors {
        let Ok(giver) = population.get(donor) else {
            continue;
        };
        if giver.food_to_share <= 0.0 {
            continue;
        }

        let ranking = population.relationships.ranked(donor, &candidates);
        let mut remaining = giver.food_to_share;

        for (recipient, _) in ranking {
            if remaining <= 0.0 {
                break;
            }
            // Dead or vanished candidates are skipped, not fatal.
            let Ok(taker) = population.get(recipient) else {
                continue;
            };
            if taker.hunger <= 0.0 {
                continue;
            }

            let need = food_needed_for_zero_hunger(taker.hunger);
            let amount = need.min(remaining);
            remaining -= amount;

            let delta = relationship_delta(taker.hunger, amount);
            let relationship = population.relationships.add(donor, recipient, delta);
            let recipient_hunger = hunger_after_eating(taker.hunger, amount);
            if let Ok(entry) = population.get_mut(recipient) {
                entry.set_hunger(recipient_hunger);
            }

            debug!(%donor, %recipient, amount, recipient_hunger, relationship, "shared food");
            events.emit(EventKind::Shared {
                donor,
                recipient,
                amount,
                recipient_hunger,
                relationship,
            });
            donations.push(Donation { donor, recipient, amount });

            if policy == SharingPolicy::SingleRecipient {
                break;
            }
        }

        if let Ok(entry) = population.get_mut(donor) {
            entry.food_to_share = remaining.max(0.0);
        }
    }

    donations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::CavemanSpec;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn tribe(size: usize) -> (Population, Vec<CavemanId>) {
        let mut rng = StdRng::seed_from_u64(21);
        let mut pop = Population::new();
        let ids = (0..size)
            .map(|_| pop.add(CavemanSpec { age: Some(25), ..Default::default() }, &mut rng))
            .collect();
        (pop, ids)
    }

    #[test]
    fn test_feeds_most_liked_first() {
        let (mut pop, ids) = tribe(3);
        let (donor, liked, other) = (ids[0], ids[1], ids[2]);
        pop.relationships.set(donor, liked, 5.0);
        pop.get_mut(donor).unwrap().food_to_share = 0.1;

        let donations = sharing_system(&mut pop, SharingPolicy::SingleRecipient, &mut Vec::<EventKind>::new());
        assert_eq!(donations.len(), 1);
        assert_eq!(donations[0].recipient, liked);
        assert!(pop.get(liked).unwrap().hunger < 50.0);
        assert_eq!(pop.get(other).unwrap().hunger, 50.0);
        assert!(pop.relationships.get(donor, liked) > 5.0);
        assert_eq!(pop.get(donor).unwrap().food_to_share, 0.0);
    }

    #[test]
    fn test_single_recipient_keeps_leftover() {
        let (mut pop, ids) = tribe(3);
        let donor = ids[0];
        pop.get_mut(donor).unwrap().food_to_share = 5.0;

        let donations = sharing_system(&mut pop, SharingPolicy::SingleRecipient, &mut Vec::<EventKind>::new());
        assert_eq!(donations.len(), 1);
        // Ties fall back to identity order.
        assert_eq!(donations[0].recipient, ids[1]);
        assert!(pop.get(ids[1]).unwrap().hunger < 1e-9);
        assert_eq!(pop.get(ids[2]).unwrap().hunger, 50.0);

        let need = food_needed_for_zero_hunger(50.0);
        let left = pop.get(donor).unwrap().food_to_share;
        assert!((left - (5.0 - need)).abs() < 1e-9);
    }

    #[test]
    fn test_waterfall_spreads_surplus() {
        let (mut pop, ids) = tribe(3);
        let donor = ids[0];
        pop.get_mut(donor).unwrap().food_to_share = 5.0;

        let donations = sharing_system(&mut pop, SharingPolicy::Waterfall, &mut Vec::<EventKind>::new());
        assert_eq!(donations.len(), 2);
        assert!(pop.get(ids[1]).unwrap().hunger < 1e-9);
        assert!(pop.get(ids[2]).unwrap().hunger < 1e-9);
        assert!(pop.get(donor).unwrap().food_to_share > 0.0);
    }

    #[test]
    fn test_skips_dead_and_sated() {
        let (mut pop, ids) = tribe(4);
        let donor = ids[0];
        pop.relationships.set(donor, ids[1], 9.0);
        pop.relationships.set(donor, ids[2], 8.0);
        pop.remove(ids[1]).unwrap();
        pop.get_mut(ids[2]).unwrap().set_hunger(0.0);
        pop.get_mut(donor).unwrap().food_to_share = 0.2;

        let donations = sharing_system(&mut pop, SharingPolicy::SingleRecipient, &mut Vec::<EventKind>::new());
        assert_eq!(donations.len(), 1);
        assert_eq!(donations[0].recipient, ids[3]);
    }

    #[test]
    fn test_surplus_never_grows() {
        let (mut pop, ids) = tribe(5);
        for &id in &ids {
            pop.get_mut(id).unwrap().food_to_share = 0.3;
        }
        let before: Vec<f64> = ids.iter().map(|&id| pop.get(id).unwrap().food_to_share).collect();
        let mut events: Vec<EventKind> = Vec::new();
        sharing_system(&mut pop, SharingPolicy::Waterfall, &mut events);

        for (id, before) in ids.iter().zip(before) {
            let c = pop.get(*id).unwrap();
            assert!(c.food_to_share <= before);
            assert!((0.0..=100.0).contains(&c.hunger));
        }
        assert!(!events.is_empty());
    }
}
