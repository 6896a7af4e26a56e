//! Bank of Hours Engine
//!
//! This crate provides a time clock and bank of hours calculator for HR time
//! keeping. Employees punch entry, lunch, break and exit; the engine turns
//! those punches into per-day worked, overtime and owed hours against each
//! employee's work schedule, neutralizing holidays, approved vacations and
//! medical certificates, and accumulates them into a balance.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
