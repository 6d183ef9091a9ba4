//! Error types for the stress harness.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StressError>;

#[derive(Error, Debug)]
pub enum StressError {
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Invalid value for {name}: {value:?}")]
    InvalidEnv { name: String, value: String },

    #[error("Actor panicked in {test}")]
    ActorPanicked { test: String },

    #[error("Forbidden outcome in {test}: [{id}] seen {count} times ({desc})")]
    Forbidden {
        test: String,
        id: String,
        count: u64,
        desc: String,
    },
}

impl StressError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::InvalidConfig { message: message.into() }
    }

    pub fn invalid_env(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidEnv { name: name.into(), value: value.into() }
    }

    pub fn actor_panicked(test: impl Into<String>) -> Self {
        Self::ActorPanicked { test: test.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StressError::config("iterations must be greater than 0");
        assert_eq!(err.to_string(), "Invalid configuration: iterations must be greater than 0");

        let err = StressError::invalid_env("KAOS_SEQ_STRESS_SEED", "abc");
        assert_eq!(err.to_string(), "Invalid value for KAOS_SEQ_STRESS_SEED: \"abc\"");
    }
}
