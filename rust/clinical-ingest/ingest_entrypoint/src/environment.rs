//! Typed view of the `ENVIRONMENT` variable the process was deployed with

use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// The name of the environment variable which selects the [Environment]
pub const ENVIRONMENT_VAR: &str = "ENVIRONMENT";

/// The environment the lambda is running in
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Production environment
    Production,
    /// Dev and or staging environment
    Develop,
    /// Running on a developer machine, e.g. through `cargo lambda watch`
    Local,
}

/// Represents a value which cannot be converted into an [Environment]
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Could not convert {0} into an environment value")]
pub struct UnknownEnvironment(String);

impl Environment {
    /// Attempt to read the [Environment] from the process environment.
    /// Returns `None` if the variable is unset
    pub fn from_env() -> Option<Result<Self, UnknownEnvironment>> {
        std::env::var(ENVIRONMENT_VAR)
            .ok()
            .map(|value| value.parse())
    }

    /// Read the [Environment] falling back to [Environment::Production] if it is unset or invalid
    pub fn new_or_prod() -> Self {
        match Self::from_env() {
            Some(Ok(env)) => env,
            _ => Environment::Production,
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Production => write!(f, "prod"),
            Environment::Develop => write!(f, "dev"),
            Environment::Local => write!(f, "local"),
        }
    }
}

impl FromStr for Environment {
    type Err = UnknownEnvironment;

    fn from_str(environment: &str) -> Result<Self, UnknownEnvironment> {
        match environment {
            "prod" => Ok(Environment::Production),
            "dev" => Ok(Environment::Develop),
            "local" => Ok(Environment::Local),
            s => Err(UnknownEnvironment(s.to_string())),
        }
    }
}
