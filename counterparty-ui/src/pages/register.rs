//! Registration Page
//!
//! All form checks, including the minimum age, run in the controller before
//! anything is sent.

use leptos::*;

use counterparty::model::WORLD_CITIES;
use counterparty::pages::{RegisterController, RegisterForm};
use counterparty::{Applied, Page};

use crate::api;
use crate::components::{FormError, SelectField, TextField};
use crate::state::global::use_global_state;

#[component]
pub fn Register() -> impl IntoView {
    let state = use_global_state();
    let controller = create_rw_signal(RegisterController::new());

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let today = chrono::Local::now().date_naive();
        let Some(Ok(pending)) = controller.try_update(|c| c.begin_on(today)) else {
            return;
        };

        spawn_local(async move {
            let settled = RegisterController::send(&api::backend(), &pending).await;
            let outcome = batch(move || {
                controller
                    .try_update(|c| {
                        let applied = state.shell.try_update(|shell| c.finish(settled, shell))?;
                        Some((applied, c.warning().map(str::to_string)))
                    })
                    .flatten()
            });
            match outcome {
                Some((Applied::Succeeded, Some(warning))) => state.show_error(&warning),
                Some((Applied::Succeeded, None)) => state.show_success("Account created"),
                _ => {}
            }
        });
    };

    let text = move |label: &'static str,
                     input_type: &'static str,
                     get: fn(&RegisterForm) -> &String,
                     set: fn(&mut RegisterForm) -> &mut String| {
        view! {
            <TextField
                label=label
                input_type=input_type
                value=Signal::derive(move || controller.with(|c| get(&c.form).clone()))
                on_input=move |v: String| controller.update(|c| *set(&mut c.form) = v)
            />
        }
    };

    let cities: Vec<String> = WORLD_CITIES.iter().map(|c| c.to_string()).collect();

    view! {
        <div class="max-w-lg mx-auto bg-gray-800 rounded-xl p-8 space-y-6">
            <h1 class="text-2xl font-bold">"Create Account"</h1>

            <form on:submit=on_submit class="space-y-4">
                <div class="grid grid-cols-2 gap-4">
                    {text("First name", "text", |f| &f.first_name, |f| &mut f.first_name)}
                    {text("Last name", "text", |f| &f.last_name, |f| &mut f.last_name)}
                </div>
                {text("Email", "email", |f| &f.email, |f| &mut f.email)}
                {text("Phone", "tel", |f| &f.phone, |f| &mut f.phone)}
                <div class="grid grid-cols-2 gap-4">
                    {text("Country", "text", |f| &f.country, |f| &mut f.country)}
                    <SelectField
                        label="City"
                        options=Signal::derive(move || cities.clone())
                        value=Signal::derive(move || controller.with(|c| c.form.city.clone()))
                        on_change=move |v: String| controller.update(|c| c.form.city = v)
                    />
                </div>
                {text("Date of birth", "date", |f| &f.date_of_birth, |f| &mut f.date_of_birth)}
                {text("Password", "password", |f| &f.password, |f| &mut f.password)}

                <FormError message=Signal::derive(move || controller.with(|c| c.error_message())) />

                <button
                    type="submit"
                    disabled=move || controller.with(|c| c.request().is_in_flight())
                    class="w-full py-3 bg-primary-600 hover:bg-primary-700 disabled:opacity-50 rounded-lg font-medium transition-colors"
                >
                    {move || controller.with(|c| c.button_label())}
                </button>
            </form>

            <p class="text-sm text-gray-400 text-center">
                "Already registered? "
                <button on:click=move |_| state.navigate(Page::Login) class="text-primary-400 hover:underline">
                    "Sign in"
                </button>
            </p>
        </div>
    }
}
