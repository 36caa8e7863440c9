use std::sync::Arc;

use crate::config::Config;
use crate::sinks::{self, Sink};

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub sink: Arc<dyn Sink>,
}

impl AppState {
    /// Resolve the sink from `config`. Fails only if the HTTP client cannot be built.
    pub fn new(config: Config) -> Result<SharedState, reqwest::Error> {
        let sink = sinks::from_config(&config)?;
        Ok(Self::with_sink(config, sink))
    }

    pub fn with_sink(config: Config, sink: Arc<dyn Sink>) -> SharedState {
        Arc::new(AppState { config, sink })
    }
}
