use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parses the timestamp shapes browsers send: RFC 3339, `datetime-local`
/// values without an offset (taken as UTC), or a bare date (midnight UTC).
pub fn parse_date_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// A timestamp as text or as milliseconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateTimeInput {
    Millis(i64),
    Text(String),
}

impl DateTimeInput {
    pub fn is_blank(&self) -> bool {
        matches!(self, DateTimeInput::Text(text) if text.trim().is_empty())
    }

    pub fn parse(&self) -> Option<DateTime<Utc>> {
        match self {
            DateTimeInput::Millis(millis) => DateTime::from_timestamp_millis(*millis),
            DateTimeInput::Text(text) => parse_date_time(text),
        }
    }
}
