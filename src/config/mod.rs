//! Configuration loading and management for the Bank of Hours Engine.
//!
//! This module loads the engine settings, the organization holidays and the
//! optional seed records from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use bank_hours_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Holidays loaded: {}", config.holidays().len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    BankHoursConfig, EngineConfig, HolidaysConfig, PunchConfig, SeedData, ServerConfig,
    VacationConfig,
};
