#![deny(missing_docs)]
//! Standardized initialization for the binaries in this workspace.
//! Every lambda `main` calls [IngestEntrypoint::init] before doing anything else so that
//! log output looks the same across functions.

mod environment;

pub use environment::{ENVIRONMENT_VAR, Environment, UnknownEnvironment};
use tracing_subscriber::EnvFilter;

/// Defines how the process is initialized
#[derive(Debug)]
pub struct IngestEntrypoint {
    env: Environment,
}

impl Default for IngestEntrypoint {
    fn default() -> Self {
        IngestEntrypoint {
            env: Environment::new_or_prod(),
        }
    }
}

/// sentinel struct which guarantees that we called [IngestEntrypoint::init]
#[derive(Debug)]
pub struct InitializedEntrypoint(());

impl IngestEntrypoint {
    /// create a new instance of [Self] for an explicit [Environment]
    pub fn new(env: Environment) -> Self {
        Self { env }
    }

    /// the [Environment] this entrypoint will initialize for
    pub fn environment(&self) -> Environment {
        self.env
    }

    /// consume self, install the panic hook and global subscriber, and return a proof of initialization
    pub fn init(self) -> InitializedEntrypoint {
        dotenv::dotenv().ok();
        std::panic::set_hook(Box::new(tracing_panic::panic_hook));

        match self.env {
            Environment::Local => {
                tracing_subscriber::fmt()
                    .with_ansi(true)
                    .with_env_filter(EnvFilter::from_default_env())
                    .with_file(true)
                    .with_line_number(true)
                    .pretty()
                    .init();
            }
            Environment::Production | Environment::Develop => {
                // cloudwatch does not render ansi
                tracing_subscriber::fmt()
                    .with_ansi(false)
                    .with_env_filter(EnvFilter::from_default_env())
                    .with_file(true)
                    .with_line_number(true)
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .flatten_event(true)
                    .without_time()
                    .init();
            }
        }

        tracing::debug!(environment = %self.env, "initialized entrypoint");

        InitializedEntrypoint(())
    }
}
