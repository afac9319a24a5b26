//! Shared application services handed to every handler.

use std::sync::Arc;

use chrono::{Duration, Local, NaiveDate};

use sexyboom_auth::{Credentials, InMemorySessionStore, SessionStore};
use sexyboom_infra::{InMemoryStore, Store};

use crate::config::AppConfig;

pub struct AppServices {
    pub store: Arc<dyn Store>,
    pub sessions: Arc<dyn SessionStore>,
    pub credentials: Credentials,
    pub session_ttl: Duration,
    pub low_stock_threshold: u64,
}

impl AppServices {
    /// In-memory wiring: nothing survives a restart.
    pub fn in_memory(config: &AppConfig) -> Self {
        Self {
            store: Arc::new(InMemoryStore::new()),
            sessions: Arc::new(InMemorySessionStore::new()),
            credentials: config.auth.credentials(),
            session_ttl: config.auth.session_ttl(),
            low_stock_threshold: config.low_stock_threshold,
        }
    }

    /// Business date used to stamp sales notes.
    pub fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
