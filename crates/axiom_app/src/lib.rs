//! Axiom app: session driver wiring the core state machine to the engine.
pub mod config;
mod effects;
pub mod session;

pub use config::{AppConfig, ConfigError, ConfigOverrides};
pub use session::Session;
