//! Yearly stages. Each one reads and mutates the population in place and
//! must run in the order the world calls them.

pub mod foraging;
pub mod sharing;
pub mod aging;
pub mod death;
pub mod matchmaking;
pub mod birth;

pub use foraging::foraging_system;
pub use sharing::sharing_system;
pub use aging::aging_system;
pub use death::{death_system, DeathTally};
pub use matchmaking::{matchmaking_system, Couple};
pub use birth::birth_system;
