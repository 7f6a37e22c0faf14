use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::metrics::calculate_bmi;

/// One weight/waist sample. The date is stored as an RFC 3339 string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressEntry {
    pub date: String,
    pub weight: f64,
    pub waist: f64,
    pub bmi: f64,
}

impl ProgressEntry {
    pub fn record(weight: f64, waist: f64, height_cm: f64, at: DateTime<Utc>) -> Self {
        Self {
            date: at.to_rfc3339_opts(SecondsFormat::Millis, true),
            weight,
            waist,
            bmi: calculate_bmi(weight, height_cm),
        }
    }
}

/// Net change between the first and last sample, as (weight, waist, bmi).
pub fn overall_change(history: &[ProgressEntry]) -> Option<(f64, f64, f64)> {
    let first = history.first()?;
    let last = history.last()?;
    if history.len() < 2 {
        return None;
    }
    Some((
        last.weight - first.weight,
        last.waist - first.waist,
        ((last.bmi - first.bmi) * 10.0).round() / 10.0,
    ))
}
