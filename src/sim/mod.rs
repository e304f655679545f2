//! Deterministic simulation module
//!
//! All gameplay physics lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or filesystem dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::Aabb;
pub use state::{Forces, Frog, GameEvent, GamePhase, GameState, Pad};
pub use tick::{TickInput, begin_tick, finish_tick, start_session, tick, wind_drift};
