//! User-adjustable estimation parameters

use serde::{Deserialize, Serialize};

use crate::catalog::{AVERAGE_PROBLEM_TIME, AVERAGE_READING_SPEED, DEFAULT_DAILY_HOURS};

/// Estimation settings used by the progress calculator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySettings {
    /// Hours of study per day
    #[serde(default = "default_daily_hours")]
    pub daily_hours: f64,

    /// Minutes per page
    #[serde(default = "default_reading_speed")]
    pub reading_speed: f64,

    /// Minutes per problem
    #[serde(default = "default_problem_time")]
    pub problem_time: f64,
}

fn default_daily_hours() -> f64 {
    DEFAULT_DAILY_HOURS
}

fn default_reading_speed() -> f64 {
    AVERAGE_READING_SPEED
}

fn default_problem_time() -> f64 {
    AVERAGE_PROBLEM_TIME
}

impl Default for StudySettings {
    fn default() -> Self {
        Self {
            daily_hours: DEFAULT_DAILY_HOURS,
            reading_speed: AVERAGE_READING_SPEED,
            problem_time: AVERAGE_PROBLEM_TIME,
        }
    }
}

/// One of the three numeric settings inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingField {
    DailyHours,
    ReadingSpeed,
    ProblemTime,
}

impl SettingField {
    /// Built-in value used when the input is blank or not a number
    pub fn default_value(self) -> f64 {
        match self {
            SettingField::DailyHours => DEFAULT_DAILY_HOURS,
            SettingField::ReadingSpeed => AVERAGE_READING_SPEED,
            SettingField::ProblemTime => AVERAGE_PROBLEM_TIME,
        }
    }
}

impl StudySettings {
    /// Current value of a field
    pub fn get(&self, field: SettingField) -> f64 {
        match field {
            SettingField::DailyHours => self.daily_hours,
            SettingField::ReadingSpeed => self.reading_speed,
            SettingField::ProblemTime => self.problem_time,
        }
    }

    fn slot(&mut self, field: SettingField) -> &mut f64 {
        match field {
            SettingField::DailyHours => &mut self.daily_hours,
            SettingField::ReadingSpeed => &mut self.reading_speed,
            SettingField::ProblemTime => &mut self.problem_time,
        }
    }

    /// Apply raw text from an input field and return the value actually stored.
    ///
    /// Blank or non-numeric input falls back to the built-in default. A number
    /// that is zero, negative or not finite keeps the last valid value.
    pub fn apply_input(&mut self, field: SettingField, raw: &str) -> f64 {
        let value = match raw.trim().parse::<f64>() {
            Err(_) => field.default_value(),
            Ok(v) if v.is_finite() && v > 0.0 => v,
            Ok(_) => self.get(field),
        };
        *self.slot(field) = value;
        value
    }

    /// Replace any non-positive values (e.g. from a hand-edited config) with defaults
    pub fn sanitized(mut self) -> Self {
        for field in [SettingField::DailyHours, SettingField::ReadingSpeed, SettingField::ProblemTime]
        {
            let value = self.get(field);
            if !(value.is_finite() && value > 0.0) {
                *self.slot(field) = field.default_value();
            }
        }
        self
    }
}
