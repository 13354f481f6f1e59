//! Caveman Simulation Engine
//!
//! A closed tribe competes for a scarce food supply year after year.
//! Sharing builds directional affinity, affinity drives pairing, and
//! couples grow the tribe when it is well fed.

pub mod components;
pub mod config;
pub mod error;
pub mod events;
pub mod hunger;
pub mod names;
pub mod narrator;
pub mod population;
pub mod relationships;
pub mod statistics;
pub mod systems;
pub mod world;

pub use components::*;
pub use config::{SharingPolicy, SimulationConfig};
pub use error::SimulationError;
pub use events::{Event, EventKind, EventLog, EventSink, Stage};
pub use population::Population;
pub use relationships::RelationshipMatrix;
pub use statistics::YearStatistics;
pub use systems::{Couple, DeathTally};
pub use world::SimulationWorld;
