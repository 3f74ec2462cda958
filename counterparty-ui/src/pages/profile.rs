//! Profile Page
//!
//! The signed-in user's own card. Read-only.

use leptos::*;

use counterparty::pages::ProfileCard;

use crate::state::global::use_global_state;

#[component]
pub fn Profile() -> impl IntoView {
    let state = use_global_state();
    let card = create_memo(move |_| ProfileCard::from_session(state.session().as_ref()));

    view! {
        {move || card.get().map(|card| {
            let badge = if card.trusted { "bg-green-700" } else { "bg-gray-600" };
            view! {
                <div class="max-w-2xl mx-auto bg-gray-800 rounded-xl p-8 space-y-6">
                    <div class="flex items-center justify-between">
                        <div>
                            <h1 class="text-3xl font-bold">{card.full_name.clone()}</h1>
                            <p class="text-gray-400 font-mono">{card.business_card_number.clone()}</p>
                        </div>
                        <span class=format!("px-3 py-1 rounded {}", badge)>{card.trust_label()}</span>
                    </div>

                    <dl class="grid grid-cols-2 gap-4">
                        <Detail label="Likes" value=card.likes_count.to_string() />
                        <Detail label="Email" value=card.email.clone() />
                        <Detail label="Phone" value=card.phone.clone() />
                        <Detail label="Location" value=card.location.clone() />
                        <Detail label="Date of birth" value=card.date_of_birth.clone() />
                        <Detail label="Member since" value=card.member_since.clone() />
                    </dl>
                </div>
            }
        })}
    }
}

#[component]
fn Detail(label: &'static str, #[prop(into)] value: String) -> impl IntoView {
    view! {
        <div>
            <dt class="text-sm text-gray-400">{label}</dt>
            <dd class="text-lg">{value}</dd>
        </div>
    }
}
