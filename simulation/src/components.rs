//! Caveman record and its per-agent update rules.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

// ============================================================================
// Identity
// ============================================================================

/// Identity issued by the population registry. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CavemanId(pub u64);

impl CavemanId {
    /// Row/column of this caveman in the relationship matrix.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for CavemanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ============================================================================
// Traits and lifecycle
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathCause {
    Hunger,
    Old,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum Liveness {
    #[default]
    Alive,
    Dead { cause: DeathCause },
}

/// Hunger at creation.
pub const INITIAL_HUNGER: f64 = 50.0;
/// Hunger gained every year before deaths are evaluated.
pub const YEARLY_HUNGER_INCREMENT: f64 = 10.0;
pub const MAX_HUNGER: f64 = 100.0;
/// Past this age a caveman may die of old age.
pub const OLD_AGE: u32 = 50;
pub const OLD_AGE_DEATH_CHANCE: f64 = 0.2;

/// Trait bounds shared by selfishness and base prowess.
pub const MIN_TRAIT: i32 = 1;
pub const MAX_TRAIT: i32 = 99;

/// Overrides for a new caveman. `None` fields are drawn at random.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CavemanSpec {
    pub sex: Option<Sex>,
    pub age: Option<u32>,
    pub selfishness: Option<i32>,
    pub base_prowess: Option<i32>,
}

impl CavemanSpec {
    /// Offspring: age 1 with inherited traits.
    pub fn offspring(selfishness: i32, base_prowess: i32) -> Self {
        Self {
            sex: None,
            age: Some(1),
            selfishness: Some(selfishness),
            base_prowess: Some(base_prowess),
        }
    }
}

// ============================================================================
// Caveman
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Caveman {
    pub id: CavemanId,
    pub sex: Sex,
    pub age: u32,
    selfishness: i32,
    reciprocity: i32,
    base_prowess: i32,
    /// `base_prowess - hunger`, recomputed every year. May be negative.
    pub prowess: f64,
    pub hunger: f64,
    /// Surplus left after eating, reset by every foraging stage.
    pub food_to_share: f64,
    pub is_taken: bool,
    pub liveness: Liveness,
}

impl Caveman {
    pub fn new<R: Rng + ?Sized>(id: CavemanId, spec: CavemanSpec, rng: &mut R) -> Self {
        let sex = spec
            .sex
            .unwrap_or_else(|| if rng.gen::<bool>() { Sex::Male } else { Sex::Female });
        let age = spec.age.unwrap_or_else(|| rng.gen_range(18..30));
        let selfishness = spec
            .selfishness
            .unwrap_or_else(|| rng.gen_range(1..100))
            .clamp(MIN_TRAIT, MAX_TRAIT);
        let base_prowess = spec
            .base_prowess
            .unwrap_or_else(|| rng.gen_range(1..100))
            .clamp(MIN_TRAIT, MAX_TRAIT);

        Self {
            id,
            sex,
            age,
            selfishness,
            reciprocity: 100 - selfishness,
            base_prowess,
            prowess: f64::from(base_prowess),
            hunger: INITIAL_HUNGER,
            food_to_share: 0.0,
            is_taken: false,
            liveness: Liveness::Alive,
        }
    }

    pub fn selfishness(&self) -> i32 {
        self.selfishness
    }

    pub fn reciprocity(&self) -> i32 {
        self.reciprocity
    }

    pub fn base_prowess(&self) -> i32 {
        self.base_prowess
    }

    pub fn is_alive(&self) -> bool {
        matches!(self.liveness, Liveness::Alive)
    }

    pub fn death_cause(&self) -> Option<DeathCause> {
        match self.liveness {
            Liveness::Alive => None,
            Liveness::Dead { cause } => Some(cause),
        }
    }

    pub fn is_female(&self) -> bool {
        self.sex == Sex::Female
    }

    /// Set hunger, keeping it inside `[0, 100]`.
    pub fn set_hunger(&mut self, hunger: f64) {
        self.hunger = hunger.clamp(0.0, MAX_HUNGER);
    }

    /// Yearly aging: hunger rises, age increments, deaths are rolled and
    /// prowess is recomputed. Returns the cause if the caveman died this call.
    ///
    /// Starvation takes precedence; the old-age roll only happens for
    /// cavemen still alive after the hunger check.
    pub fn advance_age_and_health<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<DeathCause> {
        if !self.is_alive() {
            return None;
        }

        self.hunger += YEARLY_HUNGER_INCREMENT;
        if self.hunger > MAX_HUNGER {
            self.hunger = MAX_HUNGER;
            self.die(DeathCause::Hunger);
        }

        self.age += 1;
        if self.age > OLD_AGE && self.is_alive() && rng.gen::<f64>() < OLD_AGE_DEATH_CHANCE {
            self.die(DeathCause::Old);
        }

        self.prowess = f64::from(self.base_prowess) - self.hunger;
        self.death_cause()
    }

    fn die(&mut self, cause: DeathCause) {
        self.liveness = Liveness::Dead { cause };
    }
}
