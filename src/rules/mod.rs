//! Level-rule engine
//!
//! Turns a skin's loosely-shaped level configuration into an ordered list of
//! canonical [`LevelRule`]s and maps a score onto the active rule.
//!
//! - `raw`: shape classification and per-field synonym/coercion table
//! - `level`: canonical rule types, the default progression, threshold lookup

pub mod level;
pub mod raw;

pub use level::{DEFAULT_PROGRESSION, LevelRule, MAX_FROGS, RuleSet, SpeedRange};
pub use raw::RawLevels;
