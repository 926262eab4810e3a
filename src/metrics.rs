//! Body metric helpers: BMI, display formatting and week anchoring.

use crate::errors::MetricError;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Conversion factor for BMI computed from pounds and inches.
const BMI_FACTOR: f64 = 703.0;

mod bmi_threshold {
    pub const UNDERWEIGHT: f64 = 18.5;
    pub const NORMAL: f64 = 25.0;
    pub const OVERWEIGHT: f64 = 30.0;
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

impl std::fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Calculates BMI from weight in pounds and height in inches.
///
/// Formula:
/// ```text
/// BMI = weight / height² × 703
/// ```
///
/// Non-positive or non-finite inputs are rejected instead of producing
/// infinity or NaN.
pub fn calculate_bmi(weight_lbs: f64, height_in: f64) -> Result<f64, MetricError> {
    validate_weight(weight_lbs)?;
    validate_height(height_in)?;
    Ok(weight_lbs / (height_in * height_in) * BMI_FACTOR)
}

pub fn categorize_bmi(bmi: f64) -> BmiCategory {
    if bmi < bmi_threshold::UNDERWEIGHT {
        BmiCategory::Underweight
    } else if bmi < bmi_threshold::NORMAL {
        BmiCategory::Normal
    } else if bmi < bmi_threshold::OVERWEIGHT {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

pub fn validate_weight(weight_lbs: f64) -> Result<f64, MetricError> {
    positive("weight", weight_lbs)
}

pub fn validate_height(height_in: f64) -> Result<f64, MetricError> {
    positive("height", height_in)
}

fn positive(field: &'static str, value: f64) -> Result<f64, MetricError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(MetricError::InvalidMeasurement { field, value })
    }
}

pub fn format_weight(weight_lbs: f64) -> String {
    format!("{weight_lbs:.1} lbs")
}

/// Long US form, e.g. `January 5, 2026`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Short chart label, e.g. `Jan 5`.
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// Returns the Sunday that opens the week containing `date`.
///
/// The time of day is carried over unchanged; compare only the date portion
/// when using the result as a key. Dates in the first days of the calendar
/// range saturate at `NaiveDateTime::MIN`.
pub fn week_start(date: NaiveDateTime) -> NaiveDateTime {
    let rewind = Duration::days(date.weekday().num_days_from_sunday() as i64);
    date.checked_sub_signed(rewind).unwrap_or(NaiveDateTime::MIN)
}
