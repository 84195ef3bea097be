//! Core game logic. Keep this crate free of IO and platform concerns.

pub mod cards;
pub mod catalog;
pub mod config;
pub mod effects;
pub mod events;
pub mod inventory;
pub mod rng;
pub mod run;
pub mod scoring;
pub mod set;
pub mod shop;
pub mod snapshot;
pub mod state;

pub use cards::*;
pub use catalog::*;
pub use config::*;
pub use effects::*;
pub use events::*;
pub use inventory::*;
pub use rng::*;
pub use run::*;
pub use scoring::*;
pub use set::*;
pub use shop::*;
pub use snapshot::*;
pub use state::*;
