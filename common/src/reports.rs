//! Report search filters, stat cards and export shaping.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::listing::Searchable;
use crate::model::export::ExportRequest;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateRangeError {
    #[error("Please select both From and To dates")]
    Missing,

    #[error("Invalid date: {0}")]
    Invalid(String),

    #[error("From date cannot be after To date")]
    FromAfterTo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    /// Parses `YYYY-MM-DD` inputs and rejects an inverted range.
    pub fn parse(from: &str, to: &str) -> Result<Self, DateRangeError> {
        let (from, to) = (from.trim(), to.trim());
        if from.is_empty() || to.is_empty() {
            return Err(DateRangeError::Missing);
        }
        let parse = |s: &str| {
            NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| DateRangeError::Invalid(s.to_string()))
        };
        let range = Self {
            from: parse(from)?,
            to: parse(to)?,
        };
        if range.from > range.to {
            return Err(DateRangeError::FromAfterTo);
        }
        Ok(range)
    }
}

/// Body posted to a report endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportQuery {
    pub from_date: String,
    pub to_date: String,
    #[serde(flatten)]
    pub filters: BTreeMap<String, String>,
}

impl ReportQuery {
    /// Validates the range; blank free-text filters are left out of the body.
    pub fn build(
        from: &str,
        to: &str,
        filters: &BTreeMap<String, String>,
    ) -> Result<Self, DateRangeError> {
        let range = DateRange::parse(from, to)?;
        Ok(Self {
            from_date: range.from.format(DATE_FORMAT).to_string(),
            to_date: range.to.format(DATE_FORMAT).to_string(),
            filters: filters
                .iter()
                .filter(|(_, v)| !v.trim().is_empty())
                .map(|(k, v)| (k.clone(), v.trim().to_string()))
                .collect(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub key: &'static str,
    pub header: &'static str,
}

pub const fn col(key: &'static str, header: &'static str) -> Column {
    Column { key, header }
}

/// Free-text filter input shown above a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSpec {
    pub key: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatCard {
    pub label: &'static str,
    pub value: f64,
}

pub trait ReportRow: Clone + PartialEq + Searchable + DeserializeOwned + 'static {
    const TITLE: &'static str;
    const ENDPOINT: &'static str;

    fn filters() -> &'static [FilterSpec];

    fn columns() -> &'static [Column];

    fn cell(&self, key: &str) -> String;

    fn stats(rows: &[Self]) -> Vec<StatCard>;
}

/// Shapes the currently visible rows for the export endpoints.
pub fn export_request<R: ReportRow>(rows: &[&R]) -> ExportRequest {
    let columns = R::columns();
    ExportRequest {
        title: R::TITLE.to_string(),
        columns: columns.iter().map(|c| c.header.to_string()).collect(),
        rows: rows
            .iter()
            .map(|row| columns.iter().map(|c| row.cell(c.key)).collect())
            .collect(),
    }
}

pub fn distinct_count<'a>(values: impl IntoIterator<Item = &'a str>) -> f64 {
    values
        .into_iter()
        .filter(|v| !v.trim().is_empty())
        .collect::<HashSet<_>>()
        .len() as f64
}

/// Formats quantities without a trailing `.0` for whole numbers.
pub fn format_qty(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.3}", value)
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverted_range_is_rejected() {
        assert_eq!(
            DateRange::parse("2024-03-02", "2024-03-01"),
            Err(DateRangeError::FromAfterTo)
        );
    }

    #[test]
    fn same_day_range_is_allowed() {
        let range = DateRange::parse("2024-03-01", " 2024-03-01 ").unwrap();
        assert_eq!(range.from, range.to);
    }

    #[test]
    fn missing_or_invalid_dates() {
        assert_eq!(DateRange::parse("", "2024-01-01"), Err(DateRangeError::Missing));
        assert_eq!(
            DateRange::parse("2024-13-01", "2024-12-01"),
            Err(DateRangeError::Invalid("2024-13-01".into()))
        );
    }

    #[test]
    fn query_drops_blank_filters() {
        let mut filters = BTreeMap::new();
        filters.insert("item_code".to_string(), " FG-1 ".to_string());
        filters.insert("lot_no".to_string(), "  ".to_string());
        let q = ReportQuery::build("2024-01-01", "2024-01-31", &filters).unwrap();
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"from_date": "2024-01-01", "to_date": "2024-01-31", "item_code": "FG-1"})
        );
    }

    #[test]
    fn query_fails_before_any_request_on_bad_range() {
        assert!(ReportQuery::build("2024-02-01", "2024-01-01", &BTreeMap::new()).is_err());
    }

    #[test]
    fn distinct_ignores_blanks() {
        assert_eq!(distinct_count(["a", "b", "a", "", " "]), 2.0);
        assert_eq!(format_qty(12.0), "12");
        assert_eq!(format_qty(2.5), "2.5");
    }
}
