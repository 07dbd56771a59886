//! Input parsing and field rules shared by the service and the REST layer.

use chrono::{NaiveDate, NaiveTime};

use crate::contract::model::NewCategory;
use crate::domain::error::DomainError;

const CATEGORY_TEXT_MIN: usize = 2;

/// `YYYY-MM-DD`, zero padded.
pub fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, DomainError> {
    let raw = raw.trim();
    let shaped = raw.len() == 10
        && raw.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shaped {
        return Err(DomainError::validation(
            field,
            format!("'{raw}' is not a date in YYYY-MM-DD format"),
        ));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        DomainError::validation(field, format!("'{raw}' is not a valid calendar date"))
    })
}

/// `HH:MM` or `HH:MM:SS`, two digits per component.
pub fn parse_time(field: &str, raw: &str) -> Result<NaiveTime, DomainError> {
    let raw = raw.trim();
    let invalid = || {
        DomainError::validation(
            field,
            format!("'{raw}' is not a time in HH:MM or HH:MM:SS format"),
        )
    };

    let parts: Vec<&str> = raw.split(':').collect();
    if !(2..=3).contains(&parts.len()) {
        return Err(invalid());
    }
    let mut nums = [0u32; 3];
    for (slot, part) in nums.iter_mut().zip(&parts) {
        if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        *slot = part.parse().map_err(|_| invalid())?;
    }
    let [h, m, s] = nums;
    if h > 23 || m > 59 || s > 59 {
        return Err(invalid());
    }
    NaiveTime::from_hms_opt(h, m, s).ok_or_else(invalid)
}

/// Blank input counts as absent.
pub fn parse_optional_time(
    field: &str,
    raw: Option<&str>,
) -> Result<Option<NaiveTime>, DomainError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_time(field, s).map(Some),
    }
}

pub fn format_time(t: NaiveTime) -> String {
    t.format("%H:%M:%S").to_string()
}

/// `#RRGGBB`.
pub fn validate_color(field: &str, color: &str) -> Result<(), DomainError> {
    let ok = color.len() == 7
        && color.starts_with('#')
        && color[1..].bytes().all(|b| b.is_ascii_hexdigit());
    if ok {
        Ok(())
    } else {
        Err(DomainError::validation(
            field,
            format!("'{color}' is not a color in #RRGGBB format"),
        ))
    }
}

pub fn validate_title(title: &str, max_len: usize) -> Result<(), DomainError> {
    if title.trim().is_empty() {
        return Err(DomainError::validation("title", "title is required"));
    }
    let len = title.chars().count();
    if len > max_len {
        return Err(DomainError::validation(
            "title",
            format!("title is {len} characters long (max: {max_len})"),
        ));
    }
    Ok(())
}

/// Strictly increasing; a zero-length slot is rejected.
pub fn validate_time_range(start: NaiveTime, end: NaiveTime) -> Result<(), DomainError> {
    if start >= end {
        return Err(DomainError::validation(
            "end_time",
            format!("end time {end} must be after start time {start}"),
        ));
    }
    Ok(())
}

fn validate_text_len(field: &str, value: &str, max_len: usize) -> Result<(), DomainError> {
    let len = value.trim().chars().count();
    if len < CATEGORY_TEXT_MIN || len > max_len {
        return Err(DomainError::validation(
            field,
            format!("{field} must be between {CATEGORY_TEXT_MIN} and {max_len} characters"),
        ));
    }
    Ok(())
}

pub fn validate_new_category(c: &NewCategory, max_len: usize) -> Result<(), DomainError> {
    validate_text_len("name", &c.name, max_len)?;
    validate_text_len("default_title", &c.default_title, max_len)?;
    if let Some(color) = &c.default_color {
        validate_color("default_color", color)?;
    }
    if let (Some(start), Some(end)) = (c.default_start, c.default_end) {
        if start >= end {
            return Err(DomainError::validation(
                "default_end",
                "default_end must be after default_start",
            ));
        }
    }
    Ok(())
}

pub fn validate_username(username: &str) -> Result<(), DomainError> {
    if username.trim().is_empty() {
        return Err(DomainError::validation("username", "username is required"));
    }
    Ok(())
}

/// Same loose rule as the registration form: an `@` and a dot.
pub fn validate_email(email: &str) -> Result<(), DomainError> {
    if email.contains('@') && email.contains('.') {
        Ok(())
    } else {
        Err(DomainError::validation(
            "email",
            format!("'{email}' is not a valid email address"),
        ))
    }
}
