use chrono::NaiveDate;

/// Wire and storage format for due dates.
pub const CANONICAL_FORMAT: &str = "%m/%d/%Y";

/// Fallback for machine-generated (ISO) dates.
const ISO_FORMAT: &str = "%Y-%m-%d";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognized date format: {0}")]
pub struct DateFormatError(pub String);

/// Parses a due date, trying `MM/DD/YYYY` first and `YYYY-MM-DD` second.
///
/// Blank input yields `Ok(None)` rather than an error; callers that require a
/// date must check presence themselves. The two-format fallback is a
/// compatibility shim for clients posting either human-typed or
/// machine-generated dates; nothing else is accepted.
pub fn parse_due_date(text: &str) -> Result<Option<NaiveDate>, DateFormatError> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(text, CANONICAL_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(text, ISO_FORMAT))
        .map(Some)
        .map_err(|_| DateFormatError(text.to_string()))
}

/// Renders a date in the canonical `MM/DD/YYYY` form used on the wire and in
/// the store.
pub fn to_canonical(date: NaiveDate) -> String {
    date.format(CANONICAL_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_and_iso_parse_to_same_date() {
        let us = parse_due_date("12/31/2030").unwrap().unwrap();
        let iso = parse_due_date("2030-12-31").unwrap().unwrap();
        assert_eq!(us, iso);
        assert_eq!(us, NaiveDate::from_ymd_opt(2030, 12, 31).unwrap());
    }

    #[test]
    fn unknown_format_is_an_error() {
        let err = parse_due_date("31-12-2030").unwrap_err();
        assert_eq!(err, DateFormatError("31-12-2030".into()));
    }

    #[test]
    fn blank_input_is_no_date_not_an_error() {
        assert_eq!(parse_due_date("").unwrap(), None);
        assert_eq!(parse_due_date("   ").unwrap(), None);
    }

    #[test]
    fn canonical_rendering_round_trips() {
        let date = parse_due_date("2099-01-05").unwrap().unwrap();
        assert_eq!(to_canonical(date), "01/05/2099");
        assert_eq!(parse_due_date("01/05/2099").unwrap(), Some(date));
    }
}
