//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the service
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::{DateRange, Holiday};

use super::types::{EngineConfig, HolidaysConfig, SeedData};

/// Loads and provides access to the service configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── engine.yaml    # Server, calculation, vacation and punch settings
/// ├── holidays.yaml  # Organization holidays
/// └── seed.yaml      # Optional records for the in-memory store
/// ```
///
/// # Example
///
/// ```no_run
/// use bank_hours_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Binding to {}", loader.engine().server.bind_addr);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    engine: EngineConfig,
    holidays: Vec<Holiday>,
    seed: SeedData,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ConfigNotFound`] when `engine.yaml` or
    /// `holidays.yaml` is missing, and [`EngineError::ConfigParseError`] when
    /// any file contains invalid YAML. A missing `seed.yaml` is not an error.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let engine = Self::load_yaml::<EngineConfig>(&path.join("engine.yaml"))?;

        let mut holidays =
            Self::load_yaml::<HolidaysConfig>(&path.join("holidays.yaml"))?.holidays;
        holidays.sort_by_key(|h| h.date);

        let seed_path = path.join("seed.yaml");
        let seed = if seed_path.exists() {
            Self::load_yaml::<SeedData>(&seed_path)?
        } else {
            SeedData::default()
        };

        Ok(Self {
            engine,
            holidays,
            seed,
        })
    }

    /// Builds a loader from already parsed parts.
    pub fn from_parts(engine: EngineConfig, mut holidays: Vec<Holiday>, seed: SeedData) -> Self {
        holidays.sort_by_key(|h| h.date);
        Self {
            engine,
            holidays,
            seed,
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the engine settings.
    pub fn engine(&self) -> &EngineConfig {
        &self.engine
    }

    /// Returns a copy with the bind address replaced.
    pub fn with_bind_addr(mut self, bind_addr: impl Into<String>) -> Self {
        self.engine.server.bind_addr = bind_addr.into();
        self
    }

    /// Returns all holidays, sorted by date.
    pub fn holidays(&self) -> &[Holiday] {
        &self.holidays
    }

    /// Returns the holidays falling inside `range`.
    pub fn holidays_in(&self, range: DateRange) -> &[Holiday] {
        let start = self.holidays.partition_point(|h| h.date < range.start_date);
        let end = self.holidays.partition_point(|h| h.date <= range.end_date);
        &self.holidays[start..end.max(start)]
    }

    /// Returns the seed records.
    pub fn seed(&self) -> &SeedData {
        &self.seed
    }
}
