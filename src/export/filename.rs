//! Report file name
//!
//! `Cableway_Inspection_<YYYY-MM-DD>_<StationName>_<StationNumber>.pdf`, with
//! the station values used as typed. Values that would produce an illegal
//! file name are rejected before anything is written.

use crate::error::{ReportError, Result};
use cableway_common::fields::{STATION_NAME, STATION_NUMBER};
use cableway_common::FormSnapshot;
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ILLEGAL_CHARS: Regex = Regex::new(r#"[<>:"/\\|?*\x00-\x1F\x7F]"#).unwrap();
}

/// First character of `value` that cannot appear in a file name
fn illegal_char(value: &str) -> Option<char> {
    ILLEGAL_CHARS
        .find(value)
        .and_then(|m| m.as_str().chars().next())
}

fn checked<'a>(snapshot: &'a FormSnapshot, field: &'static str) -> Result<&'a str> {
    let value = snapshot.get(field);
    match illegal_char(value) {
        Some(character) => Err(ReportError::InvalidFilename {
            field,
            value: value.to_string(),
            character,
        }),
        None => Ok(value),
    }
}

pub fn report_file_name(snapshot: &FormSnapshot, date: NaiveDate) -> Result<String> {
    let name = checked(snapshot, STATION_NAME)?;
    let number = checked(snapshot, STATION_NUMBER)?;
    Ok(format!(
        "Cableway_Inspection_{}_{}_{}.pdf",
        date.format("%Y-%m-%d"),
        name,
        number
    ))
}
