//! Pages
//!
//! One component per navigator page. Each keeps its controller from the core
//! in a signal and drives it in three steps: `begin` on the event, `send` in a
//! spawned task, `finish` back on the signal. A page that unmounts tears its
//! controller down, so a response arriving afterwards is dropped.

pub mod applications;
pub mod home;
pub mod login;
pub mod profile;
pub mod register;
pub mod search;
pub mod user_detail;

pub use applications::Applications;
pub use home::Home;
pub use login::Login;
pub use profile::Profile;
pub use register::Register;
pub use search::Search;
pub use user_detail::UserDetail;
