//! Row conversion helpers shared by the entity queries.

use crate::errors::AppError;
use chrono::{NaiveDate, NaiveTime};
use rusqlite::Row;

/// Wrap an application error as a rusqlite conversion failure.
pub(crate) fn conversion_error(err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(err))
}

pub(crate) fn get_date(row: &Row, col: &str) -> rusqlite::Result<NaiveDate> {
    let raw: String = row.get(col)?;
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map_err(|_| conversion_error(AppError::InvalidDate(raw.clone())))
}

pub(crate) fn get_opt_date(row: &Row, col: &str) -> rusqlite::Result<Option<NaiveDate>> {
    let raw: Option<String> = row.get(col)?;
    match raw.filter(|s| !s.is_empty()) {
        Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| conversion_error(AppError::InvalidDate(s.clone()))),
        None => Ok(None),
    }
}

pub(crate) fn get_opt_time(row: &Row, col: &str) -> rusqlite::Result<Option<NaiveTime>> {
    let raw: Option<String> = row.get(col)?;
    match raw.filter(|s| !s.is_empty()) {
        Some(s) => NaiveTime::parse_from_str(&s, "%H:%M")
            .map(Some)
            .map_err(|_| conversion_error(AppError::InvalidTime(s.clone()))),
        None => Ok(None),
    }
}

/// Parse an enum column with the given DB decoder.
pub(crate) fn get_code<T>(
    row: &Row,
    col: &'static str,
    decode: fn(&str) -> Option<T>,
) -> rusqlite::Result<T> {
    let raw: String = row.get(col)?;
    decode(&raw).ok_or_else(|| conversion_error(AppError::invalid_code(col, raw.clone())))
}

pub(crate) fn date_to_db(d: Option<NaiveDate>) -> Option<String> {
    d.map(|d| d.format("%Y-%m-%d").to_string())
}

pub(crate) fn time_to_db(t: Option<NaiveTime>) -> Option<String> {
    t.map(|t| t.format("%H:%M").to_string())
}
