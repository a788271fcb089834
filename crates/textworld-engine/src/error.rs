//! Error types for the engine binary.
//!
//! [`EngineError`] wraps the subsystem errors that can surface during
//! startup and the game loop; [`CommandError`] covers player input that
//! does not parse.

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: textworld_core::ConfigError,
    },

    /// Simulation construction failed.
    #[error("build error: {source}")]
    Build {
        /// The underlying build error.
        #[from]
        source: textworld_core::BuildError,
    },

    /// A tick failed for a reason other than a violated need.
    #[error("tick error: {source}")]
    Tick {
        /// The underlying tick error.
        #[from]
        source: textworld_core::TickError,
    },

    /// The decision runner could not be set up.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: textworld_runner::RunnerError,
    },

    /// An asset file could not be read.
    #[error("failed to read asset {path}: {source}")]
    AssetIo {
        /// The asset path.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// An asset file is not valid JSON for its record type.
    #[error("failed to parse asset {path}: {source}")]
    AssetFormat {
        /// The asset path.
        path: String,
        /// The underlying JSON error.
        source: serde_json::Error,
    },
}

/// Player input that could not be turned into a command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// The line was blank.
    #[error("no command given")]
    Empty,

    /// A verb that needs an argument was given none.
    #[error("'{verb}' needs an argument")]
    MissingArgument {
        /// The verb missing its argument.
        verb: String,
    },

    /// The verb is not recognised.
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),
}
