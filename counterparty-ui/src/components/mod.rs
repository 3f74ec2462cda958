//! UI Components
//!
//! Reusable Leptos components shared by the pages.

pub mod field;
pub mod loading;
pub mod nav;
pub mod notice;

pub use field::{FormError, SelectField, TextField};
pub use loading::{InlineLoading, Loading};
pub use nav::Nav;
pub use notice::NoticeBanner;
