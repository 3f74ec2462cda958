//! Core data types shared by the session store, gateway and page controllers
//!
//! - `UserSnapshot`: the authenticated user (or a counterparty) as the backend sees it
//! - `Application`: a posted request for a counterparty in another city
//! - `Comment`: an append-only remark left on a user's profile
//! - `Currency` and `CurrencyRateTable`: the fixed currency set and fetched rates
//! - `Timestamp`: backend datetimes, tolerant of naive (zone-less) values

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Highest amount an application may carry, in base currency units
pub const AMOUNT_CAP: f64 = 6000.0;

/// Minimum age for registration, enforced as a form affordance only
pub const MINIMUM_AGE_YEARS: u32 = 21;

/// Base currency used when fetching display rates
pub const RATES_BASE: Currency = Currency::Usd;

/// A point in time reported by the backend.
///
/// The backend emits UTC datetimes, sometimes without an offset
/// (`2025-03-01T10:00:00.123456`). Both forms are accepted; serialization
/// always writes RFC 3339 with a `Z` suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub DateTime<Utc>);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// Calendar date for list displays
    pub fn date_label(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl FromStr for Timestamp {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match DateTime::parse_from_rfc3339(s) {
            Ok(dt) => Ok(Self(dt.with_timezone(&Utc))),
            Err(rfc_err) => NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                .map(|naive| Self(naive.and_utc()))
                .map_err(|_| rfc_err),
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Snapshot of a user record as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSnapshot {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    pub city: String,
    pub date_of_birth: Timestamp,
    /// Assigned by the backend at registration, never changes
    #[serde(default)]
    pub business_card_number: String,
    /// Set by backend trust logic
    #[serde(default)]
    pub is_trusted: bool,
    #[serde(default)]
    pub likes_count: u32,
    pub created_at: Timestamp,
}

impl UserSnapshot {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Currencies an application may be denominated in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "EUR")]
    Eur,
    #[serde(rename = "GBP")]
    Gbp,
    #[serde(rename = "JPY")]
    Jpy,
}

impl Currency {
    pub const ALL: [Currency; 4] = [Currency::Usd, Currency::Eur, Currency::Gbp, Currency::Jpy];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
        }
    }

    /// Decimal places used when showing a rate against the base currency
    pub fn rate_precision(&self) -> usize {
        match self {
            Currency::Jpy => 2,
            _ => 4,
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::Usd
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when a currency code is outside the supported set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported currency: {0}")]
pub struct UnknownCurrency(pub String);

impl FromStr for Currency {
    type Err = UnknownCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "GBP" => Ok(Currency::Gbp),
            "JPY" => Ok(Currency::Jpy),
            _ => Err(UnknownCurrency(s.to_string())),
        }
    }
}

/// Lifecycle state of an application. Transitions belong to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplicationStatus {
    Active,
    Expired,
    Other(String),
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ApplicationStatus::Active => "Active",
            ApplicationStatus::Expired => "Expired",
            ApplicationStatus::Other(s) => s,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, ApplicationStatus::Active)
    }
}

impl Default for ApplicationStatus {
    fn default() -> Self {
        ApplicationStatus::Active
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ApplicationStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ApplicationStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "Active" => ApplicationStatus::Active,
            "Expired" => ApplicationStatus::Expired,
            _ => ApplicationStatus::Other(raw),
        })
    }
}

/// A posted request for a counterparty in `target_city`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: String,
    pub user_id: String,
    /// Where the owner lives
    #[serde(default)]
    pub user_city: Option<String>,
    /// Where the owner needs a counterparty
    pub target_city: String,
    pub amount: f64,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub status: ApplicationStatus,
    pub created_at: Timestamp,
    #[serde(default)]
    pub expires_at: Option<Timestamp>,
    /// Computed by the backend from `created_at`
    #[serde(default)]
    pub days_active: u32,
}

impl Application {
    /// "1,234.50 USD"
    pub fn amount_label(&self) -> String {
        format!("{} {}", format_amount(self.amount), self.currency)
    }
}

/// A search hit: an application together with its owner's profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedApplication {
    #[serde(flatten)]
    pub application: Application,
    pub user: UserSnapshot,
}

/// A comment left on a user's profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub target_user_id: String,
    #[serde(default)]
    pub commenter_id: Option<String>,
    pub commenter_name: String,
    pub content: String,
    pub created_at: Timestamp,
}

/// Exchange rates against a base currency. The latest fetch replaces any earlier table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CurrencyRateTable {
    pub base: Currency,
    pub rates: HashMap<String, f64>,
}

impl CurrencyRateTable {
    pub fn new(base: Currency, rates: HashMap<String, f64>) -> Self {
        Self { base, rates }
    }

    pub fn rate(&self, currency: Currency) -> Option<f64> {
        self.rates.get(currency.code()).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Display entries for every supported currency other than the base
    pub fn display_entries(&self) -> Vec<(Currency, String)> {
        Currency::ALL
            .iter()
            .filter(|c| **c != self.base)
            .filter_map(|c| {
                self.rate(*c)
                    .map(|r| (*c, format!("{:.*}", c.rate_precision(), r)))
            })
            .collect()
    }
}

/// Format an amount with thousands separators and two decimals
pub fn format_amount(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac)
}
