//! Simulation World - main orchestrator
//!
//! One call to [`SimulationWorld::advance_year`] runs the full yearly
//! pipeline: foraging, sharing, aging/death, pairing, reproduction, then a
//! shuffle of the iteration order and a statistics snapshot.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use crate::components::Caveman;
use crate::config::SimulationConfig;
use crate::error::SimulationError;
use crate::events::{Emit, EventHub, EventKind, EventLog, EventSink, Stage};
use crate::population::Population;
use crate::relationships::RelationshipMatrix;
use crate::statistics::YearStatistics;
use crate::systems::{self, Couple, DeathTally};

pub struct SimulationWorld<R = StdRng> {
    config: SimulationConfig,
    population: Population,
    couples: Vec<Couple>,
    deaths: DeathTally,
    statistics: Vec<YearStatistics>,
    events: EventHub,
    /// The year the next call to `advance_year` simulates.
    year: u32,
    rng: R,
}

impl SimulationWorld<StdRng> {
    /// Tribe of `initial_population` random adults with the given food ratio.
    pub fn initialize(initial_population: usize, food_supply_ratio: f64) -> Result<Self, SimulationError> {
        Self::from_config(SimulationConfig::new(initial_population, food_supply_ratio))
    }

    /// Seeded from `config.seed`, or from entropy when unset.
    pub fn from_config(config: SimulationConfig) -> Result<Self, SimulationError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> SimulationWorld<R> {
    pub fn with_rng(config: SimulationConfig, mut rng: R) -> Result<Self, SimulationError> {
        config.validate()?;
        let population = Population::seed(config.initial_population, &mut rng);
        info!(
            population = config.initial_population,
            food_supply_ratio = config.food_supply_ratio,
            "tribe seeded"
        );

        Ok(Self {
            events: EventHub::new(config.event_log_capacity),
            config,
            population,
            couples: Vec::new(),
            deaths: DeathTally::default(),
            statistics: Vec::new(),
            year: 1,
            rng,
        })
    }

    /// Register an extra consumer of stage events (e.g. a narrator).
    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        self.events.add_sink(sink);
    }

    /// Simulate one year and return its statistics.
    pub fn advance_year(&mut self) -> YearStatistics {
        let year = self.year;
        self.events.set_year(year);

        if let Err(err) = self.run_stages() {
            match err {
                SimulationError::EmptyPopulation => {
                    warn!(year, "no one is alive");
                    self.events.emit(EventKind::Extinct);
                }
                other => warn!(year, error = %other, "year cut short"),
            }
        }

        let stats = YearStatistics::collect(year, &self.population.snapshot(), self.deaths);
        info!(
            year,
            population = stats.population,
            couples = self.couples.len(),
            hunger_deaths = stats.hunger_deaths,
            old_age_deaths = stats.old_age_deaths,
            "year complete"
        );
        self.statistics.push(stats.clone());
        self.year += 1;
        stats
    }

    /// Advance up to `years` years, stopping after the first year that
    /// starts with nobody alive. Returns the statistics produced.
    pub fn run(&mut self, years: u32) -> Vec<YearStatistics> {
        let mut produced = Vec::new();
        for _ in 0..years {
            let extinct = self.population.is_empty();
            produced.push(self.advance_year());
            if extinct {
                break;
            }
        }
        produced
    }

    fn run_stages(&mut self) -> Result<(), SimulationError> {
        let Self {
            config,
            population,
            couples,
            deaths,
            events,
            rng,
            ..
        } = self;

        events.emit(EventKind::StageStarted { stage: Stage::Foraging });
        let foraging = systems::foraging_system(population, config.food_supply_ratio, rng, events)?;

        events.emit(EventKind::StageStarted { stage: Stage::Sharing });
        let donations = systems::sharing_system(population, config.sharing, events);

        events.emit(EventKind::StageStarted { stage: Stage::Aging });
        let dead = systems::aging_system(population, rng);
        let buried = systems::death_system(population, &dead, deaths, events);

        events.emit(EventKind::StageStarted { stage: Stage::Pairing });
        let formed = systems::matchmaking_system(population, couples, events);

        events.emit(EventKind::StageStarted { stage: Stage::Reproduction });
        let born = systems::birth_system(population, couples, rng, events);

        population.shuffle(rng);

        info!(
            food_pool = foraging.food_pool,
            donations = donations.len(),
            deaths = buried,
            new_couples = formed.len(),
            births = born.len(),
            "stages finished"
        );
        Ok(())
    }

    // ------------------------------------------------------------------
    // Read interface
    // ------------------------------------------------------------------

    /// Every live caveman, in current iteration order.
    pub fn current_population_snapshot(&self) -> Vec<Caveman> {
        self.population.snapshot()
    }

    /// All yearly records so far, oldest first.
    pub fn cumulative_statistics(&self) -> &[YearStatistics] {
        &self.statistics
    }

    /// The year the next `advance_year` call will simulate.
    pub fn year(&self) -> u32 {
        self.year
    }

    pub fn population_count(&self) -> usize {
        self.population.len()
    }

    pub fn is_extinct(&self) -> bool {
        self.population.is_empty()
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn relationships(&self) -> &RelationshipMatrix {
        &self.population.relationships
    }

    pub fn couples(&self) -> &[Couple] {
        &self.couples
    }

    pub fn deaths(&self) -> DeathTally {
        self.deaths
    }

    pub fn event_log(&self) -> &EventLog {
        self.events.log()
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(population: usize, ratio: f64, seed: u64) -> SimulationWorld {
        let mut config = SimulationConfig::new(population, ratio);
        config.seed = Some(seed);
        SimulationWorld::from_config(config).unwrap()
    }

    #[test]
    fn test_rejects_degenerate_config() {
        assert!(matches!(
            SimulationWorld::initialize(0, 0.3),
            Err(SimulationError::InvalidConfig(_))
        ));
        assert!(SimulationWorld::initialize(5, -1.0).is_err());
    }

    #[test]
    fn test_year_advances_and_records() {
        let mut world = seeded(10, 0.3, 1);
        assert_eq!(world.year(), 1);
        let stats = world.advance_year();
        assert_eq!(stats.year, 1);
        assert_eq!(world.year(), 2);
        assert_eq!(world.cumulative_statistics().len(), 1);
        assert_eq!(world.cumulative_statistics()[0], stats);
        assert_eq!(stats.population, world.population_count());
    }

    #[test]
    fn test_stage_order_in_event_log() {
        let mut world = seeded(6, 0.5, 2);
        world.advance_year();
        let stages: Vec<Stage> = world
            .event_log()
            .iter()
            .filter_map(|e| match e.kind {
                EventKind::StageStarted { stage } => Some(stage),
                _ => None,
            })
            .collect();
        assert_eq!(
            stages,
            vec![Stage::Foraging, Stage::Sharing, Stage::Aging, Stage::Pairing, Stage::Reproduction]
        );
    }

    #[test]
    fn test_lone_caveman_year_is_clean() {
        let mut world = seeded(1, 0.3, 3);
        let stats = world.advance_year();
        assert!(stats.population <= 1);
        assert!(world.relationships().size() >= 1);
    }

    #[test]
    fn test_extinct_year_still_recorded() {
        let mut world = seeded(1, 0.0, 4);
        // Hunger starts at 50 and rises by 10 a year without food.
        let stats = world.run(20);
        assert!(world.is_extinct());
        let last = stats.last().unwrap();
        assert_eq!(last.population, 0);
        assert_eq!(last.average_hunger, None);
        assert_eq!(world.deaths().hunger, 1);
        assert!(world.event_log().iter().any(|e| e.kind == EventKind::Extinct));

        let before = world.year();
        let again = world.advance_year();
        assert_eq!(again.year, before);
        assert_eq!(world.year(), before + 1);
    }
}
