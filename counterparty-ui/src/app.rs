//! App Root Component
//!
//! Provides global state and renders whichever page the shell's navigator
//! settled on. A gated page without a session has already been resolved to
//! `Home` by the time it gets here.

use leptos::*;

use counterparty::Page;

use crate::components::{Nav, NoticeBanner};
use crate::pages::{Applications, Home, Login, Profile, Register, Search, UserDetail};
use crate::state::global::{provide_global_state, use_global_state};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_global_state();
    let state = use_global_state();

    // Only re-render the page when the page itself changes, not on every shell update
    let page = create_memo(move |_| state.page());

    view! {
        <div class="min-h-screen bg-gray-900 text-white flex flex-col">
            <Nav />
            <NoticeBanner />

            <main class="flex-1 container mx-auto px-4 py-8 pb-24">
                {move || match page.get() {
                    Page::Home => view! { <Home /> }.into_view(),
                    Page::Login => view! { <Login /> }.into_view(),
                    Page::Register => view! { <Register /> }.into_view(),
                    Page::Search => view! { <Search /> }.into_view(),
                    Page::Applications => view! { <Applications /> }.into_view(),
                    Page::Profile => view! { <Profile /> }.into_view(),
                    Page::UserDetail(user_id) => view! { <UserDetail user_id=user_id /> }.into_view(),
                }}
            </main>

            <Footer />
        </div>
    }
}

/// Footer showing who is signed in
#[component]
fn Footer() -> impl IntoView {
    let state = use_global_state();

    view! {
        <footer class="fixed bottom-0 left-0 right-0 bg-gray-800 border-t border-gray-700 py-3 px-4">
            <div class="container mx-auto flex items-center justify-between text-sm text-gray-400">
                <div>
                    {move || match state.session() {
                        Some(session) => format!(
                            "Signed in as {} ({})",
                            session.user().full_name(),
                            session.user().city
                        ),
                        None => "Not signed in".to_string(),
                    }}
                </div>
                <div>{crate::api::get_api_base()}</div>
            </div>
        </footer>
    }
}
