use chrono::{DateTime, Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::i18n::Language;

const MONTHS_ES: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
];
const MONTHS_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Body mass index rounded to one decimal. Assumes positive inputs.
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    round_one_decimal(weight_kg / (height_m * height_m))
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn label(self, language: Language) -> &'static str {
        match (self, language) {
            (BmiCategory::Underweight, Language::Es) => "Bajo peso",
            (BmiCategory::Normal, Language::Es) => "Normal",
            (BmiCategory::Overweight, Language::Es) => "Sobrepeso",
            (BmiCategory::Obese, Language::Es) => "Obesidad",
            (BmiCategory::Underweight, Language::En) => "Underweight",
            (BmiCategory::Normal, Language::En) => "Normal",
            (BmiCategory::Overweight, Language::En) => "Overweight",
            (BmiCategory::Obese, Language::En) => "Obese",
        }
    }
}

pub fn bmi_category(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::Normal
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

/// Three-bucket cardiovascular risk proxy from the waist-to-height ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CvRisk {
    Low,
    Moderate,
    High,
}

impl CvRisk {
    pub fn label(self, language: Language) -> &'static str {
        match (self, language) {
            (CvRisk::Low, Language::Es) => "Bajo",
            (CvRisk::Moderate, Language::Es) => "Moderado",
            (CvRisk::High, Language::Es) => "Alto",
            (CvRisk::Low, Language::En) => "Low",
            (CvRisk::Moderate, Language::En) => "Moderate",
            (CvRisk::High, Language::En) => "High",
        }
    }
}

pub fn calculate_cv_risk_score(waist_cm: f64, height_cm: f64) -> CvRisk {
    let ratio = waist_cm / height_cm;
    if ratio <= 0.5 {
        CvRisk::Low
    } else if ratio <= 0.6 {
        CvRisk::Moderate
    } else {
        CvRisk::High
    }
}

/// Two-digit day plus abbreviated month, e.g. `05 mar`.
///
/// Accepts RFC 3339 timestamps or plain `YYYY-MM-DD` dates. Anything else renders as
/// `Invalid Date`, mirroring what a browser date formatter prints.
pub fn format_date(iso: &str, language: Language) -> String {
    let date = DateTime::parse_from_rfc3339(iso.trim())
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDate::parse_from_str(iso.trim(), "%Y-%m-%d"));

    match date {
        Ok(date) => {
            let months = match language {
                Language::Es => &MONTHS_ES,
                Language::En => &MONTHS_EN,
            };
            format!("{:02} {}", date.day(), months[date.month0() as usize])
        }
        Err(_) => "Invalid Date".to_string(),
    }
}

/// Full `dd/mm/yyyy` (es) or `mm/dd/yyyy` (en) date, used in tables and exports.
pub fn format_full_date(iso: &str, language: Language) -> String {
    match DateTime::parse_from_rfc3339(iso.trim()) {
        Ok(dt) => match language {
            Language::Es => dt.format("%d/%m/%Y").to_string(),
            Language::En => dt.format("%m/%d/%Y").to_string(),
        },
        Err(_) => "Invalid Date".to_string(),
    }
}
