//! Search Page
//!
//! Pick a target city and list the counterparties there who are looking for
//! someone in the caller's city.

use leptos::*;

use counterparty::pages::{SearchController, SearchResults, SearchView};
use counterparty::MatchedApplication;

use crate::api;
use crate::components::{FormError, Loading, SelectField};
use crate::state::global::use_global_state;

#[component]
pub fn Search() -> impl IntoView {
    let state = use_global_state();
    let controller = create_rw_signal(SearchController::new());

    on_cleanup(move || {
        controller.try_update(|c| c.teardown());
    });

    let options = Signal::derive(move || {
        state
            .session()
            .map(|session| {
                SearchController::target_options(&session)
                    .into_iter()
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    });

    let run_search = move || {
        let session = state.session();
        let Some(Ok(pending)) = controller.try_update(|c| c.begin(session.as_ref())) else {
            return;
        };

        spawn_local(async move {
            let settled = SearchController::send(&api::backend(), &pending).await;
            if let Some(applied) = controller.try_update(|c| c.finish(settled)) {
                state.observe(applied);
            }
        });
    };

    let blocked = Signal::derive(move || {
        controller.with(|c| match c.view() {
            SearchView::Failed(e) => Some(e.message()),
            _ => None,
        })
    });

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Search"</h1>
                <p class="text-gray-400 mt-1">"Find someone heading the other way"</p>
            </div>

            <section class="bg-gray-800 rounded-xl p-6 flex items-end space-x-4">
                <div class="flex-1">
                    <SelectField
                        label="Target city"
                        options=options
                        value=Signal::derive(move || controller.with(|c| c.target_city.clone()))
                        on_change=move |v: String| controller.update(|c| c.target_city = v)
                        placeholder="Select a city"
                    />
                </div>
                <button
                    on:click=move |_| run_search()
                    disabled=move || controller.with(|c| c.view() == SearchView::Searching)
                    class="px-6 py-2 bg-primary-600 hover:bg-primary-700 disabled:opacity-50 rounded-lg font-medium transition-colors"
                >
                    {move || controller.with(|c| c.button_label())}
                </button>
            </section>

            <FormError message=blocked />

            {move || controller.with(|c| match c.view() {
                SearchView::Idle | SearchView::Failed(_) => view! {}.into_view(),
                SearchView::Searching => view! { <Loading /> }.into_view(),
                SearchView::Empty => view! {
                    <div class="text-center text-gray-400 py-12">
                        "No matching applications in this city yet."
                    </div>
                }.into_view(),
                SearchView::Found(results) => view! { <Results results=results.clone() /> }.into_view(),
            })}
        </div>
    }
}

#[component]
fn Results(results: SearchResults) -> impl IntoView {
    let rates = results.rates.map(|table| {
        let entries = table.display_entries();
        view! {
            <div class="flex space-x-4 text-sm text-gray-400">
                <span>{format!("1 {} =", table.base)}</span>
                {entries.into_iter().map(|(currency, rate)| view! {
                    <span>{format!("{} {}", rate, currency)}</span>
                }).collect_view()}
            </div>
        }
    });

    view! {
        <section class="space-y-4">
            {rates}
            <div class="grid gap-4 md:grid-cols-2">
                {results.applications.into_iter().map(|matched| view! {
                    <MatchCard matched=matched />
                }).collect_view()}
            </div>
        </section>
    }
}

#[component]
fn MatchCard(matched: MatchedApplication) -> impl IntoView {
    let state = use_global_state();
    let MatchedApplication { application, user } = matched;
    let name = user.full_name();
    let trusted = user.is_trusted;
    let from = application.user_city.clone().unwrap_or_else(|| user.city.clone());
    let activity = format!("{} likes · active {} days", user.likes_count, application.days_active);

    view! {
        <div class="bg-gray-800 rounded-lg p-5 space-y-3">
            <div class="flex items-center justify-between">
                <span class="text-lg font-semibold">{name}</span>
                {trusted.then(|| view! {
                    <span class="px-2 py-1 text-xs bg-green-700 rounded">"Trusted"</span>
                })}
            </div>
            <div class="text-gray-300">
                {format!("{} → {}", from, application.target_city)}
            </div>
            <div class="text-2xl font-bold">
                {application.amount_label()}
            </div>
            <div class="text-sm text-gray-400">
                {activity}
            </div>
            <button
                on:click=move |_| state.open_user(user.clone())
                class="px-4 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg text-sm transition-colors"
            >
                "View profile"
            </button>
        </div>
    }
}
