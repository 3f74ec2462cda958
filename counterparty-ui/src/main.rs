//! Counterparty browser client
//!
//! Client-side rendered Leptos application compiled to WebAssembly. The page
//! controllers, session rules and navigation all come from the `counterparty`
//! core; this crate supplies the browser pieces:
//!
//! - a `gloo-net` transport for the gateway
//! - `localStorage` persistence for the session
//! - the views
//!
//! There is no URL routing. The shell's navigator decides which page is on
//! screen.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
