//! Core engine types: players and deterministic randomness.
//!
//! These are the building blocks the rest of the crate is assembled from:
//! seat identity, per-seat storage, and the seeded RNG that makes deals
//! and searches reproducible.

pub mod player;
pub mod rng;

pub use player::{PlayerId, PlayerPair};
pub use rng::{GameRng, GameRngState};
