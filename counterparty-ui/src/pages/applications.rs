//! My Applications Page
//!
//! Lists the caller's applications and hosts the create form. A successful
//! creation closes the form and reloads the list.

use leptos::*;

use counterparty::pages::{ApplicationsController, ApplicationsView, Pending};
use counterparty::{Application, Applied, Blocked, Currency};

use crate::api;
use crate::components::{FormError, Loading, SelectField, TextField};
use crate::state::global::{use_global_state, GlobalState};

fn load(controller: RwSignal<ApplicationsController>, state: GlobalState) {
    let session = state.session();
    let started = controller.try_update(|c| c.begin_load(session.as_ref()));
    fetch(controller, state, started);
}

/// Reload after a creation, superseding a load that was sent before it
fn reload(controller: RwSignal<ApplicationsController>, state: GlobalState) {
    let session = state.session();
    let started = controller.try_update(|c| c.begin_reload(session.as_ref()));
    fetch(controller, state, started);
}

fn fetch(
    controller: RwSignal<ApplicationsController>,
    state: GlobalState,
    started: Option<Result<Pending<String>, Blocked>>,
) {
    let Some(Ok(pending)) = started else {
        return;
    };

    spawn_local(async move {
        let settled = ApplicationsController::send_load(&api::backend(), &pending).await;
        if let Some(applied) = controller.try_update(|c| c.finish_load(settled)) {
            state.observe(applied);
        }
    });
}

fn create(controller: RwSignal<ApplicationsController>, state: GlobalState) {
    let session = state.session();
    let Some(Ok(pending)) = controller.try_update(|c| c.begin_create(session.as_ref())) else {
        return;
    };

    spawn_local(async move {
        let settled = ApplicationsController::send_create(&api::backend(), &pending).await;
        let Some(applied) = controller.try_update(|c| c.finish_create(settled)) else {
            return;
        };
        state.observe(applied);
        if applied == Applied::Succeeded {
            state.show_success("Application created");
            reload(controller, state);
        }
    });
}

#[component]
pub fn Applications() -> impl IntoView {
    let state = use_global_state();
    let controller = create_rw_signal(ApplicationsController::new());

    on_cleanup(move || {
        controller.try_update(|c| c.teardown());
    });

    load(controller, state);

    view! {
        <div class="space-y-8">
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"My Applications"</h1>
                    <p class="text-gray-400 mt-1">"What you are looking to move, and where"</p>
                </div>

                <button
                    on:click=move |_| controller.update(|c| c.open_form())
                    class="px-4 py-2 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
                >
                    "+ New Application"
                </button>
            </div>

            {move || {
                if controller.with(|c| c.is_form_open()) {
                    view! { <CreateApplicationForm controller=controller /> }.into_view()
                } else {
                    view! {}.into_view()
                }
            }}

            {move || controller.with(|c| match c.view() {
                ApplicationsView::Loading => view! { <Loading /> }.into_view(),
                ApplicationsView::Empty => view! {
                    <div class="text-center text-gray-400 py-12">
                        "You have no applications yet."
                    </div>
                }.into_view(),
                ApplicationsView::Failed(e) => {
                    let message = e.message();
                    view! {
                        <FormError message=Signal::derive(move || Some(message.clone())) />
                    }.into_view()
                }
                ApplicationsView::Listed(apps) => apps.iter().cloned().map(|application| view! {
                    <ApplicationRow application=application />
                }).collect_view(),
            })}
        </div>
    }
}

#[component]
fn CreateApplicationForm(controller: RwSignal<ApplicationsController>) -> impl IntoView {
    let state = use_global_state();

    let cities = Signal::derive(move || {
        state
            .session()
            .map(|session| {
                ApplicationsController::target_options(&session)
                    .into_iter()
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    });
    let currencies: Vec<String> = Currency::ALL.iter().map(|c| c.code().to_string()).collect();

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        create(controller, state);
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <form on:submit=on_submit class="space-y-4">
                <div class="grid gap-4 md:grid-cols-3">
                    <SelectField
                        label="Target city"
                        options=cities
                        value=Signal::derive(move || controller.with(|c| c.form.target_city.clone()))
                        on_change=move |v: String| controller.update(|c| c.form.target_city = v)
                    />
                    <TextField
                        label="Amount"
                        input_type="number"
                        value=Signal::derive(move || controller.with(|c| c.form.amount.clone()))
                        on_input=move |v: String| controller.update(|c| c.form.amount = v)
                    />
                    <SelectField
                        label="Currency"
                        options=Signal::derive(move || currencies.clone())
                        value=Signal::derive(move || controller.with(|c| c.form.currency.clone()))
                        on_change=move |v: String| controller.update(|c| c.form.currency = v)
                    />
                </div>

                <FormError message=Signal::derive(move || controller.with(|c| c.create_error())) />

                <div class="flex justify-end space-x-3">
                    <button
                        type="button"
                        on:click=move |_| controller.update(|c| c.close_form())
                        class="px-4 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg transition-colors"
                    >
                        "Cancel"
                    </button>
                    <button
                        type="submit"
                        disabled=move || controller.with(|c| c.is_creating())
                        class="px-4 py-2 bg-primary-600 hover:bg-primary-700 disabled:opacity-50 rounded-lg font-medium transition-colors"
                    >
                        {move || controller.with(|c| c.create_label())}
                    </button>
                </div>
            </form>
        </section>
    }
}

#[component]
fn ApplicationRow(application: Application) -> impl IntoView {
    let expires = application
        .expires_at
        .as_ref()
        .map(|t| format!("expires {}", t.date_label()))
        .unwrap_or_default();
    let status_class = if application.status.is_active() {
        "px-2 py-1 text-xs rounded bg-green-700"
    } else {
        "px-2 py-1 text-xs rounded bg-gray-600"
    };

    view! {
        <div class="bg-gray-800 rounded-lg p-5 flex items-center justify-between">
            <div>
                <div class="text-lg font-semibold">
                    {format!(
                        "{} → {}",
                        application.user_city.clone().unwrap_or_default(),
                        application.target_city
                    )}
                </div>
                <div class="text-sm text-gray-400">
                    {format!("Posted {} · {}", application.created_at.date_label(), expires)}
                </div>
            </div>
            <div class="flex items-center space-x-4">
                <span class="text-xl font-bold">{application.amount_label()}</span>
                <span class=status_class>{application.status.to_string()}</span>
            </div>
        </div>
    }
}
