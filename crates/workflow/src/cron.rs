//! 5-field cron expressions: `minute hour day-of-month month day-of-week`.
//!
//! Supports `*`, `N`, `N-M`, `*/S`, `N-M/S`, `N/S` and comma lists. Unlike
//! classic cron, day-of-month and day-of-week must *both* match, so
//! `0 9 1-7 * 1` means "09:00 on the first Monday of the month".

use chrono::{DateTime, Datelike, Duration, Timelike, Utc};
use std::str::FromStr;

/// Cron parse failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    #[error("Expected 5 fields (minute hour dom month dow), got {0}")]
    FieldCount(usize),

    #[error("Invalid {field} field '{value}': {reason}")]
    InvalidField {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("A run named '{0}' is already scheduled")]
    DuplicateRun(String),
}

impl From<ScheduleError> for pairbot_core::Error {
    fn from(err: ScheduleError) -> Self {
        pairbot_core::Error::Schedule(err.to_string())
    }
}

/// A parsed cron expression. Each field is a bitmask of allowed values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CronExpr {
    source: String,
    minutes: u64,
    hours: u64,
    days_of_month: u64,
    months: u64,
    days_of_week: u64, // bit 0 = Sunday
}

/// Upper bound for [`CronExpr::next_after`]: a little over four years.
const SEARCH_LIMIT_MINUTES: i64 = 60 * 24 * 366 * 4 + 60 * 24;

impl CronExpr {
    pub fn parse(expr: &str) -> Result<Self, ScheduleError> {
        let fields: Vec<&str> = expr.split_whitespace().collect();
        if fields.len() != 5 {
            return Err(ScheduleError::FieldCount(fields.len()));
        }

        Ok(Self {
            source: fields.join(" "),
            minutes: parse_field(fields[0], "minute", 0, 59)?,
            hours: parse_field(fields[1], "hour", 0, 23)?,
            days_of_month: parse_field(fields[2], "day-of-month", 1, 31)?,
            months: parse_field(fields[3], "month", 1, 12)?,
            days_of_week: parse_field(fields[4], "day-of-week", 0, 6)?,
        })
    }

    /// The normalized expression text.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether `dt` falls on a minute this expression selects.
    pub fn matches(&self, dt: &DateTime<Utc>) -> bool {
        let bit = |mask: u64, v: u32| mask & (1u64 << v) != 0;

        bit(self.minutes, dt.minute())
            && bit(self.hours, dt.hour())
            && bit(self.days_of_month, dt.day())
            && bit(self.months, dt.month())
            && bit(self.days_of_week, dt.weekday().num_days_from_sunday())
    }

    /// The first matching minute strictly after `after`, if any within ~4 years.
    pub fn next_after(&self, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let start = after.with_second(0)?.with_nanosecond(0)? + Duration::minutes(1);
        (0..SEARCH_LIMIT_MINUTES)
            .map(|offset| start + Duration::minutes(offset))
            .find(|candidate| self.matches(candidate))
    }
}

impl FromStr for CronExpr {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for CronExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

fn parse_field(field: &str, name: &'static str, min: u32, max: u32) -> Result<u64, ScheduleError> {
    let invalid = |reason: String| ScheduleError::InvalidField {
        field: name,
        value: field.to_string(),
        reason,
    };
    let number = |s: &str| {
        s.parse::<u32>()
            .map_err(|_| invalid(format!("'{s}' is not a number")))
    };

    let mut mask = 0u64;
    for part in field.split(',') {
        let (range, step) = match part.split_once('/') {
            Some((range, step)) => {
                let step = number(step)?;
                if step == 0 {
                    return Err(invalid("step cannot be zero".into()));
                }
                (range, step)
            }
            None => (part, 1),
        };

        let (start, end) = if range == "*" {
            (min, max)
        } else if let Some((lo, hi)) = range.split_once('-') {
            (number(lo)?, number(hi)?)
        } else {
            let value = number(range)?;
            // `N/S` runs from N to the top of the field
            if part.contains('/') { (value, max) } else { (value, value) }
        };

        if start < min || end > max || start > end {
            return Err(invalid(format!("{start}-{end} outside {min}-{max}")));
        }

        let mut v = start;
        while v <= end {
            mask |= 1u64 << v;
            match v.checked_add(step) {
                Some(next) => v = next,
                None => break,
            }
        }
    }
    Ok(mask)
}
