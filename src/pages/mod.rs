//! Page controllers
//!
//! One controller per page. Each owns its form state and one
//! [`RequestTracker`] per kind of request, and splits every action into
//! three steps so a UI can run the network part on its own executor:
//!
//! 1. `begin*` validates, moves the tracker to `InFlight` and returns a
//!    [`Pending`] carrying a ticket plus the request to send
//! 2. `send*` performs the call without borrowing the controller
//! 3. `finish*` applies the [`Settled`] result, dropping it if the ticket is stale
//!
//! The async convenience methods (`submit`, `load`, ...) run all three against
//! a [`Shell`](crate::app::Shell) and report auth failures to it.

pub mod applications;
pub mod login;
pub mod profile;
pub mod register;
pub mod request;
pub mod search;
pub mod user_dialog;

pub use applications::{ApplicationsController, ApplicationsView, CreateForm, CreateRequest};
pub use login::{LoginController, LoginForm};
pub use profile::ProfileCard;
pub use register::{RegisterController, RegisterForm};
pub use request::{Applied, Blocked, PageError, Pending, RequestState, RequestTracker, Settled, Ticket};
pub use search::{SearchController, SearchQuery, SearchResults, SearchView};
pub use user_dialog::{CommentPost, UserDialog, UserQuery};
