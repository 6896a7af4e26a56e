//! Application state for the Bank of Hours Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use chrono::{Local, NaiveDate, NaiveDateTime};
use tokio::sync::RwLock;

use crate::config::ConfigLoader;
use crate::store::RecordStore;

type Clock = Arc<dyn Fn() -> NaiveDateTime + Send + Sync>;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers: the
/// loaded configuration, the record store, and the clock punches are
/// stamped with.
#[derive(Clone)]
pub struct AppState {
    /// The loaded configuration.
    config: Arc<ConfigLoader>,
    /// Records of every employee.
    store: Arc<RwLock<RecordStore>>,
    /// Organization local time.
    clock: Clock,
}

impl AppState {
    /// Creates a new application state, seeding the store from the
    /// configuration and reading the system clock.
    pub fn new(config: ConfigLoader) -> Self {
        let store = RecordStore::from_seed(config.seed());
        Self {
            config: Arc::new(config),
            store: Arc::new(RwLock::new(store)),
            clock: Arc::new(|| Local::now().naive_local()),
        }
    }

    /// Replaces the clock.
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> NaiveDateTime + Send + Sync + 'static,
    {
        self.clock = Arc::new(clock);
        self
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the shared record store.
    pub fn store(&self) -> &RwLock<RecordStore> {
        &self.store
    }

    /// The current local time.
    pub fn now(&self) -> NaiveDateTime {
        (self.clock)()
    }

    /// The current local date.
    pub fn today(&self) -> NaiveDate {
        self.now().date()
    }
}
