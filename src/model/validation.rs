//! Client-side form checks
//!
//! These run before any request is attempted. They mirror what the backend
//! enforces so obvious mistakes are caught without a round trip; the backend
//! remains the authority.

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

use super::types::{Currency, AMOUNT_CAP, MINIMUM_AGE_YEARS};

/// A form was rejected before reaching the network
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("Amount must be a number")]
    AmountNotNumeric,

    #[error("Amount must be positive")]
    AmountNotPositive,

    #[error("Amount cannot exceed ${cap:.0}")]
    AmountOverCap { cap: f64 },

    #[error("Unsupported currency: {0}")]
    Currency(String),

    #[error("Please choose a city other than your own")]
    SameCity,

    #[error("Unknown city: {0}")]
    UnknownCity(String),

    #[error("Invalid date of birth")]
    InvalidBirthDate,

    #[error("You must be at least {minimum} years old to register")]
    Underage { minimum: u32 },

    #[error("Invalid email format")]
    Email,

    #[error("Invalid phone number format")]
    Phone,
}

/// Parse and bound-check an amount typed into a form: `0 < amount <= AMOUNT_CAP`
pub fn validate_amount(input: &str) -> Result<f64, FormError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(FormError::Missing("Amount"));
    }

    let amount: f64 = trimmed.parse().map_err(|_| FormError::AmountNotNumeric)?;
    if !amount.is_finite() {
        return Err(FormError::AmountNotNumeric);
    }
    if amount <= 0.0 {
        return Err(FormError::AmountNotPositive);
    }
    if amount > AMOUNT_CAP {
        return Err(FormError::AmountOverCap { cap: AMOUNT_CAP });
    }

    Ok(amount)
}

pub fn validate_currency(input: &str) -> Result<Currency, FormError> {
    input
        .parse()
        .map_err(|_| FormError::Currency(input.trim().to_string()))
}

/// Parse a date picker value (`YYYY-MM-DD`)
pub fn parse_birth_date(input: &str) -> Result<NaiveDate, FormError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(FormError::Missing("Date of birth"));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| FormError::InvalidBirthDate)
}

/// Whole years between `birth` and `today`
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let before_birthday = (today.month(), today.day()) < (birth.month(), birth.day());
    today.year() - birth.year() - i32::from(before_birthday)
}

pub fn check_minimum_age(birth: NaiveDate, today: NaiveDate) -> Result<(), FormError> {
    if age_on(birth, today) < MINIMUM_AGE_YEARS as i32 {
        return Err(FormError::Underage {
            minimum: MINIMUM_AGE_YEARS,
        });
    }
    Ok(())
}

/// Birth date as the backend expects it: midnight UTC in ISO-8601
pub fn normalize_birth_date(birth: NaiveDate) -> String {
    format!("{}T00:00:00.000Z", birth.format("%Y-%m-%d"))
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email pattern")
    })
}

fn phone_pattern() -> &'static Regex {
    static PHONE: OnceLock<Regex> = OnceLock::new();
    PHONE.get_or_init(|| Regex::new(r"^\+?[1-9]\d{6,14}$").expect("valid phone pattern"))
}

pub fn validate_email(input: &str) -> Result<(), FormError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(FormError::Missing("Email"));
    }
    if !email_pattern().is_match(trimmed) {
        return Err(FormError::Email);
    }
    Ok(())
}

pub fn validate_phone(input: &str) -> Result<(), FormError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(FormError::Missing("Phone number"));
    }
    if !phone_pattern().is_match(trimmed) {
        return Err(FormError::Phone);
    }
    Ok(())
}

pub fn require(field: &'static str, value: &str) -> Result<(), FormError> {
    if value.trim().is_empty() {
        return Err(FormError::Missing(field));
    }
    Ok(())
}
