//! Home Page

use leptos::*;

use counterparty::Page;

use crate::state::global::use_global_state;

#[component]
pub fn Home() -> impl IntoView {
    let state = use_global_state();

    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center space-y-6">
            <h1 class="text-4xl font-bold">"Find your counterparty"</h1>
            <p class="text-gray-400 max-w-xl">
                "Post what you need to move between two cities and meet someone going the other way. \
                 Profiles collect likes and comments, and four likes make a member trusted."
            </p>

            {move || {
                if state.is_signed_in() {
                    view! {
                        <button
                            on:click=move |_| state.navigate(Page::Search)
                            class="px-6 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
                        >
                            "Start searching"
                        </button>
                    }.into_view()
                } else {
                    view! {
                        <div class="flex space-x-4">
                            <button
                                on:click=move |_| state.navigate(Page::Login)
                                class="px-6 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
                            >
                                "Sign In"
                            </button>
                            <button
                                on:click=move |_| state.navigate(Page::Register)
                                class="px-6 py-3 bg-gray-700 hover:bg-gray-600 rounded-lg font-medium transition-colors"
                            >
                                "Create Account"
                            </button>
                        </div>
                    }.into_view()
                }
            }}
        </div>
    }
}
