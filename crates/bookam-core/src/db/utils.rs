//! Row decoding helpers shared by the query modules.

use std::str::FromStr;

use jiff::{civil::DateTime, Timestamp};
use rusqlite::{types::Type, Row};
use serde::de::DeserializeOwned;

fn conversion_error(
    index: usize,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(err))
}

fn invalid_data(message: String) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidData, message)
}

pub(crate) fn get_id(row: &Row<'_>, index: usize) -> rusqlite::Result<u64> {
    Ok(row.get::<_, i64>(index)? as u64)
}

pub(crate) fn get_timestamp(row: &Row<'_>, index: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(index)?
        .parse::<Timestamp>()
        .map_err(|e| conversion_error(index, e))
}

pub(crate) fn get_datetime(row: &Row<'_>, index: usize) -> rusqlite::Result<DateTime> {
    row.get::<_, String>(index)?
        .parse::<DateTime>()
        .map_err(|e| conversion_error(index, e))
}

/// Parses an enum stored by its `as_str` form.
pub(crate) fn get_enum<T>(row: &Row<'_>, index: usize) -> rusqlite::Result<T>
where
    T: FromStr<Err = String>,
{
    let raw: String = row.get(index)?;
    raw.parse::<T>()
        .map_err(|message| conversion_error(index, invalid_data(message)))
}

/// Decodes a JSON text column.
pub(crate) fn get_json<T: DeserializeOwned>(row: &Row<'_>, index: usize) -> rusqlite::Result<T> {
    let raw: String = row.get(index)?;
    serde_json::from_str(&raw).map_err(|e| conversion_error(index, e))
}

/// `DateTime` in the fixed text form stored in the database, which sorts
/// chronologically.
pub(crate) fn datetime_text(value: DateTime) -> String {
    value.strftime("%Y-%m-%dT%H:%M:%S").to_string()
}
