//! Population registry
//!
//! Live cavemen are stored as entities in a `hecs::World` keyed by their
//! identity. The registry also owns the relationship matrix so that every
//! issued identity has a row and column.

use std::collections::HashMap;

use hecs::{Entity, World};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::components::{Caveman, CavemanId, CavemanSpec};
use crate::error::SimulationError;
use crate::relationships::RelationshipMatrix;

pub struct Population {
    world: World,
    entities: HashMap<CavemanId, Entity>,
    /// Iteration order for the yearly stages. Shuffled at year end.
    order: Vec<CavemanId>,
    next_id: u64,
    pub relationships: RelationshipMatrix,
}

impl Population {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            entities: HashMap::new(),
            order: Vec::new(),
            next_id: 0,
            relationships: RelationshipMatrix::new(),
        }
    }

    /// Seed `count` random adults with identities `0..count`.
    pub fn seed<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Self {
        let mut population = Self::new();
        for _ in 0..count {
            population.add(CavemanSpec::default(), rng);
        }
        population
    }

    /// Create a caveman under the next unused identity.
    pub fn add<R: Rng + ?Sized>(&mut self, spec: CavemanSpec, rng: &mut R) -> CavemanId {
        let id = CavemanId(self.next_id);
        self.next_id += 1;

        let caveman = Caveman::new(id, spec, rng);
        let entity = self.world.spawn((caveman,));
        self.entities.insert(id, entity);
        self.order.push(id);
        self.relationships.grow();

        id
    }

    /// Drop a caveman from the live set. The matrix keeps its row and column.
    pub fn remove(&mut self, id: CavemanId) -> Result<Caveman, SimulationError> {
        let caveman = self.get(id)?;
        if let Some(entity) = self.entities.remove(&id) {
            let _ = self.world.despawn(entity);
        }
        self.order.retain(|&other| other != id);
        Ok(caveman)
    }

    pub fn get(&self, id: CavemanId) -> Result<Caveman, SimulationError> {
        let entity = self.entity(id)?;
        self.world
            .get::<&Caveman>(entity)
            .map(|caveman| *caveman)
            .map_err(|_| SimulationError::NotFound(id))
    }

    pub fn get_mut(&mut self, id: CavemanId) -> Result<&mut Caveman, SimulationError> {
        let entity = self.entity(id)?;
        self.world
            .query_one_mut::<&mut Caveman>(entity)
            .map_err(|_| SimulationError::NotFound(id))
    }

    pub fn contains(&self, id: CavemanId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Identities issued so far, dead or alive.
    pub fn issued(&self) -> u64 {
        self.next_id
    }

    /// Live identities in stage iteration order.
    pub fn ids(&self) -> Vec<CavemanId> {
        self.order.clone()
    }

    /// Live identities in ascending identity order.
    pub fn ids_by_identity(&self) -> Vec<CavemanId> {
        let mut ids = self.order.clone();
        ids.sort_unstable();
        ids
    }

    /// Copy of every live caveman in stage iteration order.
    pub fn snapshot(&self) -> Vec<Caveman> {
        self.order.iter().filter_map(|&id| self.get(id).ok()).collect()
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.order.shuffle(rng);
    }

    fn entity(&self, id: CavemanId) -> Result<Entity, SimulationError> {
        self.entities.get(&id).copied().ok_or(SimulationError::NotFound(id))
    }
}

impl Default for Population {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_seed_issues_sequential_ids() {
        let mut rng = StdRng::seed_from_u64(1);
        let pop = Population::seed(5, &mut rng);
        assert_eq!(pop.len(), 5);
        assert_eq!(pop.issued(), 5);
        assert_eq!(pop.relationships.size(), 5);
        assert_eq!(pop.ids(), (0..5).map(CavemanId).collect::<Vec<_>>());
    }

    #[test]
    fn test_ids_never_reused() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut pop = Population::seed(3, &mut rng);
        pop.remove(CavemanId(2)).unwrap();
        let id = pop.add(CavemanSpec::default(), &mut rng);
        assert_eq!(id, CavemanId(3));
        assert_eq!(pop.len(), 3);
        assert_eq!(pop.relationships.size(), 4);
    }

    #[test]
    fn test_remove_keeps_matrix_and_reports_not_found() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut pop = Population::seed(2, &mut rng);
        pop.relationships.set(CavemanId(0), CavemanId(1), 12.0);

        let removed = pop.remove(CavemanId(1)).unwrap();
        assert_eq!(removed.id, CavemanId(1));
        assert_eq!(pop.relationships.size(), 2);
        assert_eq!(pop.relationships.get(CavemanId(0), CavemanId(1)), 12.0);

        assert_eq!(pop.get(CavemanId(1)), Err(SimulationError::NotFound(CavemanId(1))));
        assert!(pop.get_mut(CavemanId(1)).is_err());
        assert!(pop.remove(CavemanId(1)).is_err());
        assert!(pop.get(CavemanId(99)).is_err());
    }

    #[test]
    fn test_get_mut_writes_through() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut pop = Population::seed(1, &mut rng);
        pop.get_mut(CavemanId(0)).unwrap().set_hunger(12.5);
        assert_eq!(pop.get(CavemanId(0)).unwrap().hunger, 12.5);
    }

    #[test]
    fn test_shuffle_keeps_membership() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut pop = Population::seed(20, &mut rng);
        pop.shuffle(&mut rng);
        assert_eq!(pop.ids_by_identity(), (0..20).map(CavemanId).collect::<Vec<_>>());
        assert_eq!(pop.snapshot().len(), 20);
    }
}
