//! Canonical date handling for record date fields.
//!
//! The policy API carries dates as ISO 8601 extended calendar dates
//! (`yyyy-MM-dd`, hyphens required). Formatting and parsing round-trip, so
//! repeated edits of the same calendar date never drift the stored string.

use chrono::NaiveDate;

use crate::error::ModelError;

/// Format used for every date field on the wire.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Render a calendar date in the canonical `yyyy-MM-dd` form.
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Parse a canonical `yyyy-MM-dd` string back into a calendar date.
pub fn parse_iso_date(raw: &str) -> Result<NaiveDate, ModelError> {
    NaiveDate::parse_from_str(raw.trim(), ISO_DATE_FORMAT)
        .map_err(|_| ModelError::InvalidDate(raw.to_string()))
}
