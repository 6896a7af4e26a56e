//! HTTP request handlers for the Bank of Hours Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Multipart, Query, State,
        multipart::MultipartRejection,
        rejection::QueryRejection,
    },
    http::StatusCode,
    middleware,
    routing::{get, post},
};
use chrono::NaiveDate;
use serde_json::{Value, json};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    BankHoursCalculation, BankHoursInput, PeriodOptions, PunchAttempt, calculate_bank_hours,
    calculate_vacation_balance, check_order, validate_punch, validate_range,
};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    BalanceStatus, BankHoursData, BankHoursReport, DateRange, Employee, RecordType, TimeRecord,
    VacationBalance,
};
use crate::store::{NewTimeRecord, RecordStore};

use super::request::{BankHoursQuery, EmployeesQuery, PeriodQuery, PunchForm};
use super::response::ApiErrorResponse;
use super::session::{Session, require_hr_or_admin};
use super::state::AppState;

type ApiResult<T> = Result<T, ApiErrorResponse>;

/// Creates the API router with all endpoints.
///
/// Routes under `/bank-hours` admit HR and admin sessions only.
pub fn create_router(state: AppState) -> Router {
    let admin = Router::new()
        .route("/employees", get(list_employee_bank_hours))
        .route_layer(middleware::from_fn(require_hr_or_admin));

    Router::new()
        .route("/health", get(health_handler))
        .route("/time-records/my-records/today", get(today_records_handler))
        .route("/time-records/my-records/bank-hours", get(my_bank_hours_handler))
        .route("/time-records/my-records/period", get(period_records_handler))
        .route("/time-records/punch", post(punch_handler))
        .route("/vacations/my-vacations/balance", get(vacation_balance_handler))
        .nest("/bank-hours", admin)
        .with_state(state)
}

/// Handler for GET /health.
async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Handler for GET /time-records/my-records/today.
async fn today_records_handler(
    State(state): State<AppState>,
    session: Session,
) -> ApiResult<Json<Value>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, user_id = %session.user_id, "Listing today's records");

    let today = state.today();
    let store = state.store().read().await;
    let employee = find_employee(&store, &session).map_err(|e| rejected(correlation_id, e))?;
    let records = store.records_for_user(&employee.user_id, DateRange::new(today, today));

    Ok(Json(json!({ "records": records })))
}

/// Handler for GET /time-records/my-records/bank-hours.
///
/// Without dates the period runs from the hire date to today. Dates after
/// today are not evaluated.
async fn my_bank_hours_handler(
    State(state): State<AppState>,
    session: Session,
    query: Result<Query<BankHoursQuery>, QueryRejection>,
) -> ApiResult<Json<BankHoursReport>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, user_id = %session.user_id, "Processing bank hours request");

    let Query(query) = query.map_err(|r| rejected_query(correlation_id, r))?;
    let start_time = Instant::now();

    let store = state.store().read().await;
    let calculation = find_employee(&store, &session)
        .and_then(|employee| {
            let requested = requested_range(query.start_date, query.end_date)?;
            calculate_for_employee(&state, &store, employee, requested)
        })
        .map_err(|e| rejected(correlation_id, e))?;

    info!(
        correlation_id = %correlation_id,
        days = calculation.days.len(),
        balance_hours = %calculation.summary.balance_hours,
        duration_us = start_time.elapsed().as_micros() as u64,
        "Bank hours calculated"
    );

    Ok(Json(calculation.into_report(query.detailed)))
}

/// Handler for GET /time-records/my-records/period.
async fn period_records_handler(
    State(state): State<AppState>,
    session: Session,
    query: Result<Query<PeriodQuery>, QueryRejection>,
) -> ApiResult<Json<Value>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, user_id = %session.user_id, "Listing period records");

    let Query(query) = query.map_err(|r| rejected_query(correlation_id, r))?;

    let store = state.store().read().await;
    let records = find_employee(&store, &session)
        .and_then(|employee| {
            let (Some(start_date), Some(end_date)) = (query.start_date, query.end_date) else {
                return Err(EngineError::validation(
                    if query.start_date.is_none() { "startDate" } else { "endDate" },
                    "startDate and endDate are required",
                ));
            };
            let range = DateRange::new(start_date, end_date);
            validate_range(range, state.config().engine().bank_hours.max_range_days)?;
            Ok(store.records_for_user(&employee.user_id, range))
        })
        .map_err(|e| rejected(correlation_id, e))?;

    Ok(Json(json!({ "records": records })))
}

/// Handler for POST /time-records/punch.
///
/// The photo part is read and its size logged; it is not stored.
async fn punch_handler(
    State(state): State<AppState>,
    session: Session,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<(StatusCode, Json<TimeRecord>)> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, user_id = %session.user_id, "Processing punch");

    let multipart = multipart.map_err(|r| {
        warn!(correlation_id = %correlation_id, error = %r, "Rejected punch body");
        ApiErrorResponse::bad_request(r.body_text())
    })?;
    let form = read_punch_form(multipart).await.map_err(|e| rejected(correlation_id, e))?;

    let record_type: RecordType = form
        .record_type
        .as_deref()
        .ok_or_else(|| EngineError::validation("type", "punch type is required"))
        .and_then(|raw| {
            raw.parse()
                .map_err(|message: String| EngineError::validation("type", message))
        })
        .map_err(|e| rejected(correlation_id, e))?;

    let now = state.now();
    let attempt = PunchAttempt {
        record_type,
        timestamp: now,
        latitude: form.latitude,
        longitude: form.longitude,
    };

    let mut store = state.store().write().await;
    let employee = find_employee(&store, &session)
        .map_err(|e| rejected(correlation_id, e))?
        .clone();
    let today = store.records_for_user(&employee.user_id, DateRange::new(now.date(), now.date()));

    validate_punch(
        &employee,
        &today,
        &attempt,
        state.config().engine().punch_policy(),
    )
    .map_err(|e| rejected(correlation_id, e))?;

    let record = store.record_punch(
        &employee,
        NewTimeRecord {
            record_type,
            timestamp: now,
            latitude: form.latitude,
            longitude: form.longitude,
            photo_url: None,
            observation: form.observation,
        },
    );

    info!(
        correlation_id = %correlation_id,
        record_id = %record.id,
        record_type = %record.record_type,
        photo_bytes = form.photo_bytes,
        "Punch recorded"
    );

    Ok((StatusCode::CREATED, Json(record)))
}

/// Handler for GET /vacations/my-vacations/balance.
async fn vacation_balance_handler(
    State(state): State<AppState>,
    session: Session,
) -> ApiResult<Json<VacationBalance>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, user_id = %session.user_id, "Processing vacation balance");

    let store = state.store().read().await;
    let employee = find_employee(&store, &session).map_err(|e| rejected(correlation_id, e))?;
    let vacations = store.vacations_for_user(&employee.user_id);

    Ok(Json(calculate_vacation_balance(
        employee,
        &vacations,
        state.today(),
        state.config().engine().vacation.days_per_period,
    )))
}

/// Handler for GET /bank-hours/employees.
///
/// Without dates each employee's period runs from their hire date to today.
/// An employee whose balance cannot be calculated is left out of the list.
async fn list_employee_bank_hours(
    State(state): State<AppState>,
    session: Session,
    query: Result<Query<EmployeesQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<BankHoursData>>> {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        user_id = %session.user_id,
        role = %session.role,
        "Listing employee bank hours"
    );

    let Query(query) = query.map_err(|r| rejected_query(correlation_id, r))?;
    let start_time = Instant::now();
    let requested = requested_range(query.start_date, query.end_date)
        .and_then(|requested| {
            requested.map(check_order).transpose()?;
            Ok(requested)
        })
        .map_err(|e| rejected(correlation_id, e))?;

    let store = state.store().read().await;
    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for employee in store.employees() {
        if !query.matches(
            &employee.department,
            employee.cost_center.as_deref(),
            employee.client.as_deref(),
        ) {
            continue;
        }

        let calculation = match calculate_for_employee(&state, &store, employee, requested) {
            Ok(calculation) => calculation,
            Err(error) => {
                warn!(
                    correlation_id = %correlation_id,
                    employee_id = %employee.employee_id,
                    error = %error,
                    "Employee left out of the overview"
                );
                skipped += 1;
                continue;
            }
        };

        let summary = calculation.summary;
        let status = BalanceStatus::from_balance(summary.balance_hours);
        if query.status.is_some_and(|wanted| wanted != status) {
            continue;
        }

        rows.push(BankHoursData {
            employee_id: employee.employee_id.clone(),
            user_id: employee.user_id.clone(),
            name: employee.name.clone(),
            department: employee.department.clone(),
            position: employee.position.clone(),
            cost_center: employee.cost_center.clone(),
            client: employee.client.clone(),
            total_overtime_hours: summary.total_overtime_hours,
            total_owed_hours: summary.total_owed_hours,
            balance_hours: summary.balance_hours,
            status,
        });
    }

    info!(
        correlation_id = %correlation_id,
        employees = rows.len(),
        skipped,
        duration_us = start_time.elapsed().as_micros() as u64,
        "Employee bank hours listed"
    );

    Ok(Json(rows))
}

fn find_employee<'a>(store: &'a RecordStore, session: &Session) -> EngineResult<&'a Employee> {
    store
        .employee_by_user(&session.user_id)
        .ok_or_else(|| EngineError::EmployeeNotFound {
            user_id: session.user_id.clone(),
        })
}

/// Both dates, or neither. `None` stands for the default period.
fn requested_range(
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> EngineResult<Option<DateRange>> {
    match (start_date, end_date) {
        (Some(start), Some(end)) => Ok(Some(DateRange::new(start, end))),
        (None, None) => Ok(None),
        (None, Some(_)) => Err(EngineError::validation(
            "startDate",
            "startDate and endDate must be provided together",
        )),
        (Some(_), None) => Err(EngineError::validation(
            "endDate",
            "startDate and endDate must be provided together",
        )),
    }
}

/// Calculates over `requested`, or from the hire date to today when no
/// range was requested. Only requested ranges are held to the length limit.
fn calculate_for_employee(
    state: &AppState,
    store: &RecordStore,
    employee: &Employee,
    requested: Option<DateRange>,
) -> EngineResult<BankHoursCalculation> {
    let config = state.config();
    let today = state.today();
    let mut options = PeriodOptions {
        evaluate_until: Some(today),
        ..config.engine().period_options()
    };
    let range = match requested {
        Some(range) => range,
        None => {
            options.max_range_days = None;
            DateRange::new(employee.hire_date.min(today), today)
        }
    };

    let records = store.records_for_user(&employee.user_id, range);
    let vacations = store.vacations_for_user(&employee.user_id);
    let certificates = store.certificates_for_user(&employee.user_id);

    calculate_bank_hours(
        BankHoursInput {
            employee,
            records: &records,
            vacations: &vacations,
            certificates: &certificates,
            holidays: config.holidays_in(range),
        },
        range,
        options,
    )
}

async fn read_punch_form(mut multipart: Multipart) -> EngineResult<PunchForm> {
    let mut form = PunchForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| EngineError::validation("multipart", e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "photo" => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| EngineError::validation("photo", e.body_text()))?;
                form.photo_bytes = bytes.len();
            }
            "type" | "latitude" | "longitude" | "observation" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| EngineError::validation(name.as_str(), e.body_text()))?;
                let text = text.trim().to_string();
                if text.is_empty() {
                    continue;
                }
                match name.as_str() {
                    "type" => form.record_type = Some(text),
                    "latitude" => form.latitude = Some(parse_coordinate("latitude", &text)?),
                    "longitude" => form.longitude = Some(parse_coordinate("longitude", &text)?),
                    _ => form.observation = Some(text),
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

fn parse_coordinate(field: &str, raw: &str) -> EngineResult<f64> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| EngineError::validation(field, format!("'{}' is not a coordinate", raw)))
}

fn rejected(correlation_id: Uuid, error: EngineError) -> ApiErrorResponse {
    warn!(correlation_id = %correlation_id, error = %error, "Request rejected");
    error.into()
}

fn rejected_query(correlation_id: Uuid, rejection: QueryRejection) -> ApiErrorResponse {
    warn!(correlation_id = %correlation_id, error = %rejection, "Invalid query string");
    ApiErrorResponse::bad_request(rejection.body_text())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_requested_range_both_or_neither() {
        assert_eq!(requested_range(None, None).unwrap(), None);
        assert_eq!(
            requested_range(Some(make_date("2025-03-01")), Some(make_date("2025-03-31"))).unwrap(),
            Some(DateRange::new(make_date("2025-03-01"), make_date("2025-03-31")))
        );
    }

    #[test]
    fn test_requested_range_requires_both_dates() {
        let result = requested_range(Some(make_date("2025-03-01")), None);
        assert!(matches!(
            result,
            Err(EngineError::ValidationError { ref field, .. }) if field == "endDate"
        ));

        let result = requested_range(None, Some(make_date("2025-03-01")));
        assert!(matches!(
            result,
            Err(EngineError::ValidationError { ref field, .. }) if field == "startDate"
        ));
    }

    #[test]
    fn test_parse_coordinate() {
        assert_eq!(parse_coordinate("latitude", "-23.5505").unwrap(), -23.5505);
        assert!(parse_coordinate("latitude", "north").is_err());
        assert!(parse_coordinate("latitude", "NaN").is_err());
    }
}
