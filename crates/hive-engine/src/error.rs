//! Error types for the Hive engine binary.
//!
//! [`EngineError`] wraps every failure mode of engine startup and the
//! simulation run, so `main` can propagate with `?`.

/// Top-level error for the Hive engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: hive_core::ConfigError,
    },

    /// Colony generation failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: hive_world::WorldError,
    },

    /// Simulation runner failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: hive_core::RunnerError,
    },
}
