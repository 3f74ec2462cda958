//! Backend access from the browser

pub mod transport;

pub use transport::{backend, get_api_base, set_api_base, Client, GlooTransport};
