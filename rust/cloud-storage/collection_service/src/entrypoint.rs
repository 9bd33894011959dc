//! Process initialization shared by every binary of this crate

use tracing_subscriber::EnvFilter;

use crate::config::Environment;

/// Defines how tracing is set up for a given [Environment]
#[derive(Debug)]
pub struct Entrypoint {
    env: Environment,
}

/// sentinel struct which guarantees that we called [Entrypoint::init]
#[derive(Debug)]
pub struct InitializedEntrypoint(());

impl Entrypoint {
    pub fn new(env: Environment) -> Self {
        Self { env }
    }

    /// consume self, install the tracing subscriber and panic hook, and return a proof of it
    pub fn init(self) -> InitializedEntrypoint {
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
                tracing_subscriber::fmt()
                    .with_ansi(false)
                    .with_env_filter(EnvFilter::from_default_env())
                    .with_file(true)
                    .with_line_number(true)
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .flatten_event(true)
                    .init();
            }
        }

        InitializedEntrypoint(())
    }
}
