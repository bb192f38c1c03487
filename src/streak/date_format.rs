//! Serde adapter for `Option<NaiveDate>`
//!
//! Writes `YYYY-MM-DD`. Reads that, a full RFC 3339 timestamp, or the older
//! day-string form such as `Mon Oct 19 2026`.

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serializer};

const ISO_DATE: &str = "%Y-%m-%d";
const DAY_STRING: &str = "%a %b %d %Y";

pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match date {
        Some(date) => serializer.serialize_str(&date.format(ISO_DATE).to_string()),
        None => serializer.serialize_none(),
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => parse(text)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("unrecognized date {text:?}"))),
    }
}

fn parse(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, ISO_DATE)
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(text).ok().map(|t| t.with_timezone(&Local).date_naive())
        })
        .or_else(|| NaiveDate::parse_from_str(text, DAY_STRING).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, serde::Deserialize)]
    struct Wrapper {
        #[serde(default, with = "super")]
        date: Option<NaiveDate>,
    }

    fn read(json: &str) -> Option<NaiveDate> {
        serde_json::from_str::<Wrapper>(json).unwrap().date
    }

    #[test]
    fn reads_iso_dates() {
        assert_eq!(read(r#"{"date":"2026-10-19"}"#), NaiveDate::from_ymd_opt(2026, 10, 19));
    }

    #[test]
    fn reads_day_strings() {
        assert_eq!(read(r#"{"date":"Mon Oct 19 2026"}"#), NaiveDate::from_ymd_opt(2026, 10, 19));
    }

    #[test]
    fn reads_null_and_missing_as_none() {
        assert_eq!(read(r#"{"date":null}"#), None);
        assert_eq!(read(r#"{}"#), None);
    }

    #[test]
    fn rejects_garbage() {
        assert!(serde_json::from_str::<Wrapper>(r#"{"date":"someday"}"#).is_err());
    }
}
