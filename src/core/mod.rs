pub mod config;
pub mod error;
pub mod random;
pub mod types;

pub use config::{EngineConfig, KindBudget};
pub use error::{LoadoutError, Result};
pub use random::{RandomSource, RngSource, ScriptedRandom};
