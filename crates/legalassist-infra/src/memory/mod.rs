//! In-memory adapters.
//!
//! Process-lifetime state only: nothing here survives a restart.

pub mod turn_store;

pub use turn_store::InMemoryTurnRepository;
