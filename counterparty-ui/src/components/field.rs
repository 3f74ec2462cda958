//! Form inputs bound to controller form fields

use leptos::*;

const INPUT_CLASS: &str = "w-full px-4 py-2 bg-gray-700 border border-gray-600 rounded-lg \
                           focus:outline-none focus:border-primary-500";

/// Labelled text input
#[component]
pub fn TextField(
    label: &'static str,
    #[prop(default = "text")]
    input_type: &'static str,
    #[prop(into)]
    value: Signal<String>,
    #[prop(into)]
    on_input: Callback<String>,
) -> impl IntoView {
    view! {
        <label class="block">
            <span class="block text-sm text-gray-400 mb-1">{label}</span>
            <input
                type=input_type
                class=INPUT_CLASS
                prop:value=move || value.get()
                on:input=move |ev| on_input.call(event_target_value(&ev))
            />
        </label>
    }
}

/// Labelled select over a fixed list of options, with a leading placeholder
#[component]
pub fn SelectField(
    label: &'static str,
    #[prop(into)]
    options: Signal<Vec<String>>,
    #[prop(into)]
    value: Signal<String>,
    #[prop(into)]
    on_change: Callback<String>,
    #[prop(default = "Select...")]
    placeholder: &'static str,
) -> impl IntoView {
    view! {
        <label class="block">
            <span class="block text-sm text-gray-400 mb-1">{label}</span>
            <select
                class=INPUT_CLASS
                on:change=move |ev| on_change.call(event_target_value(&ev))
            >
                <option value="" selected=move || value.get().is_empty()>{placeholder}</option>
                {move || {
                    let current = value.get();
                    options.get().into_iter().map(|option| {
                        let selected = option == current;
                        view! {
                            <option value=option.clone() selected=selected>{option.clone()}</option>
                        }
                    }).collect_view()
                }}
            </select>
        </label>
    }
}

/// Inline error under a form, as returned by the controller
#[component]
pub fn FormError(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    view! {
        {move || message.get().map(|msg| view! {
            <div class="bg-red-900/40 border border-red-700 text-red-200 px-4 py-3 rounded-lg text-sm">
                {msg}
            </div>
        })}
    }
}
