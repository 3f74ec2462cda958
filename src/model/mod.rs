//! Domain model
//!
//! Records exchanged with the backend, the city catalogue and the form checks
//! that run before a request is sent.

pub mod cities;
pub mod types;
pub mod validation;

pub use cities::{is_known_city, target_cities, WORLD_CITIES};
pub use types::{
    format_amount, Application, ApplicationStatus, Comment, Currency, CurrencyRateTable,
    MatchedApplication, Timestamp, UnknownCurrency, UserSnapshot, AMOUNT_CAP, MINIMUM_AGE_YEARS,
    RATES_BASE,
};
pub use validation::FormError;
