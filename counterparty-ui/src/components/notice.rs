//! Page-level notice banner fed by the global success/error signals

use leptos::*;

use crate::state::global::use_global_state;

/// What the banner is reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Done(String),
    Problem(String),
}

impl Notice {
    /// Problems win over confirmations when both are pending
    pub fn pick(success: Option<String>, error: Option<String>) -> Option<Notice> {
        error.map(Notice::Problem).or(success.map(Notice::Done))
    }

    fn palette(&self) -> &'static str {
        match self {
            Notice::Done(_) => "bg-emerald-900/60 border-emerald-600 text-emerald-100",
            Notice::Problem(_) => "bg-red-900/60 border-red-600 text-red-100",
        }
    }

    fn text(&self) -> &str {
        match self {
            Notice::Done(text) | Notice::Problem(text) => text,
        }
    }
}

/// Banner under the nav bar. Dismissing it clears both signals.
#[component]
pub fn NoticeBanner() -> impl IntoView {
    let state = use_global_state();
    let notice = create_memo(move |_| Notice::pick(state.success.get(), state.error.get()));

    let dismiss = move |_| {
        state.success.set(None);
        state.error.set(None);
    };

    view! {
        {move || notice.get().map(|notice| view! {
            <div
                role="status"
                class=format!(
                    "container mx-auto mt-4 px-4 py-2 border rounded-lg flex justify-between items-center {}",
                    notice.palette()
                )
            >
                <span class="text-sm">{notice.text().to_string()}</span>
                <button on:click=dismiss class="text-xs uppercase tracking-wide opacity-70 hover:opacity-100">
                    "Dismiss"
                </button>
            </div>
        })}
    }
}
