// ============================================================
// TYPE INFERENCE
// ============================================================
// Classify each column from a bounded sample of its values

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::{AnalyticType, IngestConfig, Row, SemanticType, Value};

static ISO_DATE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}").expect("valid regex"));
static US_SLASH_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$").expect("valid regex"));
static YMD_SLASH_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}/\d{1,2}/\d{1,2}$").expect("valid regex"));

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d", "%d %B %Y", "%B %d, %Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Column classifier over decoded rows
pub struct TypeInferencer {
    config: IngestConfig,
}

impl TypeInferencer {
    pub fn new(config: IngestConfig) -> Self {
        Self { config }
    }

    /// Classify one column from the leading rows.
    ///
    /// Deterministic and order-independent over the sample. The numeric
    /// check dominates the date check, so a column of pure numeric
    /// strings is never classified temporal even if date-shaped.
    pub fn classify(&self, rows: &[Row], column: &str) -> (SemanticType, AnalyticType) {
        let sample: Vec<&Value> = rows
            .iter()
            .take(self.config.sample_rows.min(rows.len()))
            .filter_map(|row| row.get(column))
            .filter(|value| !value.is_missing())
            .collect();

        if sample.is_empty() {
            return (SemanticType::Nominal, AnalyticType::Dimension);
        }

        if sample.iter().all(|value| value.is_numeric()) {
            return (SemanticType::Quantitative, AnalyticType::Measure);
        }

        if sample
            .iter()
            .any(|value| value.as_text().is_some_and(is_date_like))
        {
            return (SemanticType::Temporal, AnalyticType::Dimension);
        }

        if self.config.use_name_hints && name_suggests_temporal(column) {
            return (SemanticType::Temporal, AnalyticType::Dimension);
        }

        if self.matches_ordinal_keywords(&sample) {
            return (SemanticType::Ordinal, AnalyticType::Dimension);
        }

        (SemanticType::Nominal, AnalyticType::Dimension)
    }

    /// Optional refinement: every distinct sampled value appears in the
    /// configured keyword set
    fn matches_ordinal_keywords(&self, sample: &[&Value]) -> bool {
        if self.config.ordinal_keywords.is_empty() {
            return false;
        }

        let keywords: HashSet<String> = self
            .config
            .ordinal_keywords
            .iter()
            .map(|k| k.to_lowercase())
            .collect();

        sample.iter().all(|value| {
            value
                .as_text()
                .is_some_and(|s| keywords.contains(&s.trim().to_lowercase()))
        })
    }
}

/// Whether a string looks like a calendar date or timestamp
pub fn is_date_like(raw: &str) -> bool {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return false;
    }

    if ISO_DATE_PREFIX.is_match(trimmed)
        || US_SLASH_DATE.is_match(trimmed)
        || YMD_SLASH_DATE.is_match(trimmed)
    {
        return true;
    }

    // Generic parsing catches formats the patterns miss
    if DateTime::parse_from_rfc3339(trimmed).is_ok() {
        return true;
    }
    if DATE_FORMATS
        .iter()
        .any(|fmt| NaiveDate::parse_from_str(trimmed, fmt).is_ok())
    {
        return true;
    }
    DATETIME_FORMATS
        .iter()
        .any(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).is_ok())
}

fn name_suggests_temporal(column: &str) -> bool {
    let lower = column.to_lowercase();
    lower.contains("date") || lower.contains("time")
}
