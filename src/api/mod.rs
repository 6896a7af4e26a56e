//! HTTP API module for the Bank of Hours Engine.
//!
//! This module provides the REST endpoints for punching the clock, reading
//! one's own records and bank of hours, and the HR overview of every
//! employee's balance.

mod handlers;
mod request;
mod response;
mod session;
mod state;

pub use handlers::create_router;
pub use request::{BankHoursQuery, EmployeesQuery, PeriodQuery, PunchForm};
pub use response::{ApiError, ApiErrorResponse};
pub use session::{Role, Session, USER_ID_HEADER, USER_ROLE_HEADER, require_hr_or_admin};
pub use state::AppState;
