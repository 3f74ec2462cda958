//! Navigation Component
//!
//! Header bar built from the shell's menu, which already reflects whether a
//! session is present.

use leptos::*;

use counterparty::{MenuEntry, Page};

use crate::state::global::use_global_state;

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let state = use_global_state();
    let entries = create_memo(move |_| state.shell.with(|shell| shell.menu()));

    view! {
        <nav class="bg-gray-800 border-b border-gray-700">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    <button
                        on:click=move |_| state.navigate(Page::Home)
                        class="flex items-center space-x-3"
                    >
                        <span class="text-2xl">"🤝"</span>
                        <span class="text-xl font-bold text-white">"Counterparty"</span>
                    </button>

                    <div class="flex items-center space-x-1">
                        {move || {
                            entries.get().into_iter().map(|entry| match entry {
                                MenuEntry::Go { page, label } => view! {
                                    <NavLink page=page label=label />
                                }.into_view(),
                                MenuEntry::Logout => view! {
                                    <button
                                        on:click=move |_| state.logout()
                                        class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-red-700 transition-colors"
                                    >
                                        "Logout"
                                    </button>
                                }.into_view(),
                            }).collect_view()
                        }}
                    </div>
                </div>
            </div>
        </nav>
    }
}

/// Individual navigation link
#[component]
fn NavLink(page: Page, label: &'static str) -> impl IntoView {
    let state = use_global_state();
    let target = page.clone();
    let class = move || {
        if state.page() == page {
            "px-4 py-2 rounded-lg bg-gray-700 text-white"
        } else {
            "px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
        }
    };

    view! {
        <button on:click=move |_| state.navigate(target.clone()) class=class>
            {label}
        </button>
    }
}
