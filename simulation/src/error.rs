//! Error types for the simulation engine.

use crate::components::CavemanId;

/// Errors surfaced by the population registry and the yearly stages.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimulationError {
    /// The identity was never issued or the caveman has died.
    #[error("caveman {0} not found")]
    NotFound(CavemanId),

    /// Foraging found no live cavemen; the rest of the year is skipped.
    #[error("population is empty")]
    EmptyPopulation,

    /// Rejected at construction time.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
