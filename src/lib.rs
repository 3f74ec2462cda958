//! # Counterparty
//!
//! Client core for a peer-matching marketplace: users post applications for a
//! counterparty in another city, search for matches, and like or comment on
//! each other's profiles.
//!
//! ## Modules
//!
//! - [`model`]: Records exchanged with the backend, city catalogue and form checks
//! - [`session`]: Session store and its persistence backends
//! - [`navigation`]: Page state machine with session gating
//! - [`gateway`]: Typed backend client and error taxonomy
//! - [`pages`]: Page controllers with per-request state machines
//! - [`app`]: Shell tying session, navigation and controllers together
//! - [`config`]: File and environment configuration (native builds)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use counterparty::gateway::{ApiClient, ReqwestTransport, TransportConfig};
//! use counterparty::pages::LoginController;
//! use counterparty::session::FileStorage;
//! use counterparty::Shell;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = ApiClient::new(ReqwestTransport::new(TransportConfig::default())?);
//!     let mut shell = Shell::new(FileStorage::new("session.json"));
//!     shell.start();
//!
//!     let mut login = LoginController::new();
//!     login.form.email = "ada@example.com".to_string();
//!     login.form.password = "secret".to_string();
//!     login.submit(&backend, &mut shell).await?;
//!
//!     if let Some(message) = login.error_message() {
//!         eprintln!("{}", message);
//!     }
//!     println!("Now on {}", shell.page().title());
//!     Ok(())
//! }
//! ```

pub mod app;
#[cfg(feature = "native")]
pub mod config;
pub mod gateway;
pub mod model;
pub mod navigation;
pub mod pages;
pub mod session;

#[cfg(test)]
mod test_support;

// Re-export top-level types for convenience
pub use app::Shell;

pub use model::{
    Application, ApplicationStatus, Comment, Currency, CurrencyRateTable, FormError,
    MatchedApplication, Timestamp, UserSnapshot,
};

pub use session::{
    FileStorage, MemoryStorage, Session, SessionError, SessionResult, SessionStorage, SessionStore,
};

pub use navigation::{MenuEntry, Navigator, Page};

pub use gateway::{ApiClient, ApiError, ApiResult, Backend, HttpTransport};

pub use pages::{Applied, Blocked, PageError, RequestState, RequestTracker};

#[cfg(feature = "native")]
pub use config::{Config, ConfigError, LoggingConfig};
