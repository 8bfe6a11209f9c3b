use crate::config::Environment;
use matching_engine::Exchange;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub exchange: Arc<Exchange>,
    pub environment: Environment,
}

impl AppState {
    pub fn new(exchange: Exchange, environment: Environment) -> Self {
        Self {
            exchange: Arc::new(exchange),
            environment,
        }
    }
}
