//! Calendar highlight dates: which days of a range carry schedules.

use chrono::{Months, NaiveDate};

use crate::contract::model::DateRange;
use crate::domain::error::DomainError;

/// Expand `YYYY-MM` into the first and last day of that month.
pub fn month_range(raw: &str) -> Result<DateRange, DomainError> {
    let invalid =
        || DomainError::validation("month", format!("'{raw}' is not a month in YYYY-MM format"));

    let (year, month) = raw.trim().split_once('-').ok_or_else(invalid)?;
    let digits =
        |part: &str, len: usize| part.len() == len && part.bytes().all(|b| b.is_ascii_digit());
    if !digits(year, 4) || !digits(month, 2) {
        return Err(invalid());
    }
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;

    let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let end = start
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or_else(invalid)?;
    Ok(DateRange { start, end })
}

/// Inclusive range, at most `max_days` long.
pub fn check_range(range: &DateRange, max_days: i64) -> Result<(), DomainError> {
    if range.start > range.end {
        return Err(DomainError::invalid_range(format!(
            "start {} is after end {}",
            range.start, range.end
        )));
    }
    let days = (range.end - range.start).num_days() + 1;
    if days > max_days {
        return Err(DomainError::invalid_range(format!(
            "range spans {days} days (max: {max_days})"
        )));
    }
    Ok(())
}

/// Ascending, de-duplicated dates that fall inside `range`.
pub fn collect_dates(dates: impl IntoIterator<Item = NaiveDate>, range: &DateRange) -> Vec<NaiveDate> {
    let mut out: Vec<NaiveDate> = dates
        .into_iter()
        .filter(|d| *d >= range.start && *d <= range.end)
        .collect();
    out.sort_unstable();
    out.dedup();
    out
}
