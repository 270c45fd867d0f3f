//! Input validation for registration and project dates.

use crate::error::{CrowdfundError, CrowdfundResult};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// Format used for both parsing input and writing dates back out.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Egyptian mobile: optional `+20` or `0`, then `1` and nine digits.
static EGYPTIAN_MOBILE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\+20|0)?1[0-9]{9}$").expect("phone pattern compiles"));

/// Four-digit year, then one or two digits each for month and day.
static DATE_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}$").expect("date pattern compiles")
});

pub fn is_valid_phone(phone: &str) -> bool {
    EGYPTIAN_MOBILE.is_match(phone)
}

pub fn check_phone(phone: &str) -> CrowdfundResult<()> {
    if is_valid_phone(phone) {
        Ok(())
    } else {
        Err(CrowdfundError::InvalidPhone)
    }
}

pub fn check_passwords_match(password: &str, confirm: &str) -> CrowdfundResult<()> {
    if password == confirm {
        Ok(())
    } else {
        Err(CrowdfundError::PasswordMismatch)
    }
}

/// Parse a `YYYY-MM-DD` date. Month and day may drop their leading zero.
pub fn parse_date(input: &str) -> CrowdfundResult<NaiveDate> {
    if !DATE_SHAPE.is_match(input) {
        return Err(CrowdfundError::InvalidDateFormat);
    }
    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|_| CrowdfundError::InvalidDateFormat)
}

/// Parse a campaign window. Both ends must parse before the order is checked,
/// and the start must fall strictly before the end.
pub fn parse_date_range(start: &str, end: &str) -> CrowdfundResult<(NaiveDate, NaiveDate)> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;
    if start >= end {
        return Err(CrowdfundError::InvalidDateRange);
    }
    Ok((start, end))
}
