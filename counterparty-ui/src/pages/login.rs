//! Login Page

use leptos::*;

use counterparty::pages::LoginController;
use counterparty::{Applied, Page};

use crate::api;
use crate::components::{FormError, TextField};
use crate::state::global::use_global_state;

#[component]
pub fn Login() -> impl IntoView {
    let state = use_global_state();
    let controller = create_rw_signal(LoginController::new());

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let Some(Ok(pending)) = controller.try_update(|c| c.begin()) else {
            return;
        };

        spawn_local(async move {
            let settled = LoginController::send(&api::backend(), &pending).await;
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
                Some((Applied::Succeeded, None)) => state.show_success("Welcome back!"),
                _ => {}
            }
        });
    };

    view! {
        <div class="max-w-md mx-auto bg-gray-800 rounded-xl p-8 space-y-6">
            <h1 class="text-2xl font-bold">"Sign In"</h1>

            <form on:submit=on_submit class="space-y-4">
                <TextField
                    label="Email"
                    input_type="email"
                    value=Signal::derive(move || controller.with(|c| c.form.email.clone()))
                    on_input=move |v: String| controller.update(|c| c.form.email = v)
                />
                <TextField
                    label="Password"
                    input_type="password"
                    value=Signal::derive(move || controller.with(|c| c.form.password.clone()))
                    on_input=move |v: String| controller.update(|c| c.form.password = v)
                />

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
                "No account yet? "
                <button on:click=move |_| state.navigate(Page::Register) class="text-primary-400 hover:underline">
                    "Create one"
                </button>
            </p>
        </div>
    }
}
