use chrono::{NaiveDate, Utc};

use super::due_date::parse_due_date;
use super::order::OrderDraft;

/// Minimum number of whole days between validation time and the requested
/// due date.
pub const LEAD_TIME_DAYS: i64 = 5;

/// A rejected candidate order; the payload is the human-readable reason
/// returned to the client verbatim.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    fn new(reason: &str) -> Self {
        Self(reason.to_owned())
    }
}

type Check = fn(&OrderDraft, NaiveDate) -> Result<(), ValidationError>;

// Evaluated in order; the first failure wins.
const CHECKS: &[Check] = &[not_empty, due_date_present, due_date_lead_time];

/// Validates a candidate order against `today`, fail-fast.
pub fn validate(draft: &OrderDraft, today: NaiveDate) -> Result<(), ValidationError> {
    for check in CHECKS {
        check(draft, today)?;
    }
    Ok(())
}

/// Validates against the wall clock. Results are not reproducible after the
/// fact without recording the evaluation date.
pub fn validate_now(draft: &OrderDraft) -> Result<(), ValidationError> {
    validate(draft, Utc::now().date_naive())
}

fn not_empty(draft: &OrderDraft, _today: NaiveDate) -> Result<(), ValidationError> {
    if draft.is_empty() {
        return Err(ValidationError::new("order is empty"));
    }
    Ok(())
}

fn due_date_present(draft: &OrderDraft, _today: NaiveDate) -> Result<(), ValidationError> {
    match draft.due_date() {
        Some(text) if !text.trim().is_empty() => Ok(()),
        _ => Err(ValidationError::new("due date is empty")),
    }
}

fn due_date_lead_time(draft: &OrderDraft, today: NaiveDate) -> Result<(), ValidationError> {
    let text = draft.due_date().unwrap_or_default();
    let due = parse_due_date(text)
        .map_err(|e| ValidationError(e.to_string()))?
        .ok_or_else(|| ValidationError::new("due date is empty"))?;
    if (due - today).num_days() < LEAD_TIME_DAYS {
        return Err(ValidationError::new("due date is too early"));
    }
    Ok(())
}
