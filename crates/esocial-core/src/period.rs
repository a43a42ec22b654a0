//! Competence-period and date canonicalization.

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::clock::Clock;
use crate::error::ValidationError;

/// Lower bound of the accepted year window. eSocial did not exist before
/// 2010, so anything earlier is a typo.
pub const YEAR_MIN: i32 = 2010;

/// Upper bound of the accepted year window.
pub const YEAR_MAX: i32 = 2100;

/// A validated year-month competence period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    #[must_use]
    pub fn year(self) -> i32 {
        self.year
    }

    #[must_use]
    pub fn month(self) -> u32 {
        self.month
    }

    /// Whole months between this period and the clock month; positive when
    /// this period lies in the future.
    #[must_use]
    pub fn months_after(self, now: DateTime<Utc>) -> i32 {
        let this = self.year * 12 + self.month as i32;
        let that = now.year() * 12 + now.month() as i32;
        this - that
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

fn split_year_month(raw: &str) -> Option<(&str, &str)> {
    let (y, m) = raw.split_once('-')?;
    (y.len() == 4 && m.len() == 2 && all_digits(y) && all_digits(m)).then_some((y, m))
}

fn split_year_month_day(raw: &str) -> Option<(&str, &str, &str)> {
    let (y, rest) = raw.split_once('-')?;
    let (m, d) = rest.split_once('-')?;
    (y.len() == 4 && m.len() == 2 && d.len() == 2 && all_digits(y) && all_digits(m) && all_digits(d))
        .then_some((y, m, d))
}

fn bad_format(field: &str, value: &str, expected: &'static str) -> ValidationError {
    ValidationError::BadPeriodFormat {
        field: field.to_string(),
        value: value.to_string(),
        expected,
    }
}

fn check_year(year: i32, field: &str) -> Result<(), ValidationError> {
    if (YEAR_MIN..=YEAR_MAX).contains(&year) {
        Ok(())
    } else {
        Err(ValidationError::YearOutOfRange {
            field: field.to_string(),
            year,
        })
    }
}

fn check_month(month: u32, field: &str) -> Result<(), ValidationError> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(ValidationError::MonthOutOfRange {
            field: field.to_string(),
            month,
        })
    }
}

/// Validates a `YYYY-MM` competence period.
///
/// # Errors
///
/// [`ValidationError::BadPeriodFormat`] when the shape is not four digits,
/// a dash, and two digits; [`ValidationError::YearOutOfRange`] and
/// [`ValidationError::MonthOutOfRange`] for range violations.
pub fn normalize_period(raw: &str, field: &str) -> Result<Period, ValidationError> {
    let trimmed = raw.trim();
    let Some((y, m)) = split_year_month(trimmed) else {
        return Err(bad_format(field, raw, "YYYY-MM"));
    };
    let year: i32 = y.parse().map_err(|_| bad_format(field, raw, "YYYY-MM"))?;
    let month: u32 = m.parse().map_err(|_| bad_format(field, raw, "YYYY-MM"))?;
    check_year(year, field)?;
    check_month(month, field)?;
    Ok(Period { year, month })
}

/// Validates a start-of-validity period, warning when it leads the current
/// month by more than `allow_future_months`.
///
/// Future-dated starts are legitimate for scheduled table changes but
/// usually indicate a typo, so the request proceeds and the period is
/// logged.
///
/// # Errors
///
/// Same failures as [`normalize_period`].
pub fn normalize_validity_start(
    raw: &str,
    field: &str,
    allow_future_months: i32,
    clock: &dyn Clock,
) -> Result<Period, ValidationError> {
    let period = normalize_period(raw, field)?;
    let ahead = period.months_after(clock.now());
    if ahead > allow_future_months {
        tracing::warn!(
            field,
            period = %period,
            months_ahead = ahead,
            "period is further in the future than expected"
        );
    }
    Ok(period)
}

/// Validates a full `YYYY-MM-DD` date.
///
/// # Errors
///
/// [`ValidationError::BadPeriodFormat`] for shape violations and
/// non-existent calendar days, plus the year/month range failures of
/// [`normalize_period`].
pub fn normalize_date(raw: &str, field: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = raw.trim();
    let Some((y, m, d)) = split_year_month_day(trimmed) else {
        return Err(bad_format(field, raw, "YYYY-MM-DD"));
    };
    let year: i32 = y.parse().map_err(|_| bad_format(field, raw, "YYYY-MM-DD"))?;
    let month: u32 = m.parse().map_err(|_| bad_format(field, raw, "YYYY-MM-DD"))?;
    let day: u32 = d.parse().map_err(|_| bad_format(field, raw, "YYYY-MM-DD"))?;
    check_year(year, field)?;
    check_month(month, field)?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| bad_format(field, raw, "YYYY-MM-DD"))
}
