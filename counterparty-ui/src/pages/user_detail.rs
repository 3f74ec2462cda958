//! Another user's profile: comments, like toggle and a comment box.
//!
//! The like button reflects the `has_liked` flag from the last profile load
//! and flips on each acknowledged toggle. A posted comment only appears once
//! the profile has been reloaded.

use leptos::*;

use counterparty::pages::{Pending, UserDialog, UserQuery};
use counterparty::{Applied, Blocked, Comment, Page};

use crate::api;
use crate::components::{FormError, InlineLoading, Loading};
use crate::state::global::{use_global_state, GlobalState};

fn load(dialog: RwSignal<UserDialog>, state: GlobalState) {
    let session = state.session();
    let started = dialog.try_update(|d| d.begin_load(session.as_ref()));
    fetch(dialog, state, started);
}

/// Reload after a comment, superseding a load that was sent before it
fn reload(dialog: RwSignal<UserDialog>, state: GlobalState) {
    let session = state.session();
    let started = dialog.try_update(|d| d.begin_reload(session.as_ref()));
    fetch(dialog, state, started);
}

fn fetch(
    dialog: RwSignal<UserDialog>,
    state: GlobalState,
    started: Option<Result<Pending<UserQuery>, Blocked>>,
) {
    let Some(Ok(pending)) = started else {
        return;
    };

    spawn_local(async move {
        let settled = UserDialog::send_load(&api::backend(), &pending).await;
        if let Some(applied) = dialog.try_update(|d| d.finish_load(settled)) {
            state.observe(applied);
        }
    });
}

fn toggle_like(dialog: RwSignal<UserDialog>, state: GlobalState) {
    let session = state.session();
    let Some(Ok(pending)) = dialog.try_update(|d| d.begin_like(session.as_ref())) else {
        return;
    };

    spawn_local(async move {
        let settled = UserDialog::send_like(&api::backend(), &pending).await;
        if let Some(applied) = dialog.try_update(|d| d.finish_like(settled)) {
            state.observe(applied);
        }
    });
}

fn post_comment(dialog: RwSignal<UserDialog>, state: GlobalState) {
    let session = state.session();
    let Some(Ok(pending)) = dialog.try_update(|d| d.begin_comment(session.as_ref())) else {
        return;
    };

    spawn_local(async move {
        let settled = UserDialog::send_comment(&api::backend(), &pending).await;
        let Some(applied) = dialog.try_update(|d| d.finish_comment(settled)) else {
            return;
        };
        state.observe(applied);
        if applied == Applied::Succeeded {
            reload(dialog, state);
        }
    });
}

#[component]
pub fn UserDetail(user_id: String) -> impl IntoView {
    let state = use_global_state();

    let picked = state
        .selected_user
        .get_untracked()
        .filter(|user| user.id == user_id);
    let dialog = create_rw_signal(match picked {
        Some(user) => UserDialog::open(user),
        None => UserDialog::open_id(user_id),
    });

    on_cleanup(move || {
        dialog.try_update(|d| d.close());
    });

    load(dialog, state);

    let close = move |_| {
        dialog.update(|d| d.close());
        state.selected_user.set(None);
        state.navigate(Page::Search);
    };

    let header = move || {
        dialog.with(|d| {
            let name = d
                .user()
                .map(|u| u.full_name())
                .unwrap_or_else(|| d.user_id().to_string());
            let city = d.user().map(|u| u.city.clone()).unwrap_or_default();
            let trusted = d.is_trusted();
            let likes = d.likes_count();
            view! {
                <div>
                    <h1 class="text-3xl font-bold">{name}</h1>
                    <p class="text-gray-400">
                        {format!("{} · {} likes", city, likes)}
                        {trusted.then(|| view! {
                            <span class="ml-2 px-2 py-1 text-xs bg-green-700 rounded">"Trusted"</span>
                        })}
                    </p>
                </div>
            }
        })
    };

    let like_label = move || {
        dialog.with(|d| {
            if d.like_state().is_in_flight() {
                "..."
            } else if d.has_liked() {
                "♥ Unlike"
            } else {
                "♡ Like"
            }
        })
    };

    let error = Signal::derive(move || {
        dialog.with(|d| {
            d.load_state()
                .error()
                .or_else(|| d.like_state().error())
                .or_else(|| d.comment_state().error())
                .map(|e| e.message())
        })
    });

    view! {
        <div class="max-w-2xl mx-auto bg-gray-800 rounded-xl p-8 space-y-6">
            <div class="flex items-start justify-between">
                {header}
                <div class="flex space-x-2">
                    <button
                        on:click=move |_| toggle_like(dialog, state)
                        disabled=move || dialog.with(|d| d.like_state().is_in_flight())
                        class="px-4 py-2 bg-pink-700 hover:bg-pink-600 disabled:opacity-50 rounded-lg transition-colors"
                    >
                        {like_label}
                    </button>
                    <button
                        on:click=close
                        class="px-4 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg transition-colors"
                    >
                        "Close"
                    </button>
                </div>
            </div>

            <FormError message=error />

            <section class="space-y-3">
                <h2 class="text-xl font-semibold">"Comments"</h2>
                {move || {
                    if dialog.with(|d| d.load_state().is_in_flight() && d.comments().is_empty()) {
                        view! { <Loading /> }.into_view()
                    } else {
                        let comments = dialog.with(|d| d.comments().to_vec());
                        if comments.is_empty() {
                            view! { <p class="text-gray-400">"No comments yet."</p> }.into_view()
                        } else {
                            comments.into_iter().map(|comment| view! {
                                <CommentItem comment=comment />
                            }).collect_view()
                        }
                    }
                }}
            </section>

            <form
                on:submit=move |ev: ev::SubmitEvent| {
                    ev.prevent_default();
                    post_comment(dialog, state);
                }
                class="space-y-3"
            >
                <textarea
                    rows="3"
                    placeholder="Leave a comment"
                    class="w-full px-4 py-2 bg-gray-700 border border-gray-600 rounded-lg focus:outline-none"
                    prop:value=move || dialog.with(|d| d.draft.clone())
                    on:input=move |ev| dialog.update(|d| d.draft = event_target_value(&ev))
                />
                <button
                    type="submit"
                    disabled=move || dialog.with(|d| d.comment_state().is_in_flight())
                    class="px-4 py-2 bg-primary-600 hover:bg-primary-700 disabled:opacity-50 rounded-lg font-medium transition-colors"
                >
                    {move || {
                        if dialog.with(|d| d.comment_state().is_in_flight()) {
                            view! { <InlineLoading /> }.into_view()
                        } else {
                            "Post Comment".into_view()
                        }
                    }}
                </button>
            </form>
        </div>
    }
}

#[component]
fn CommentItem(comment: Comment) -> impl IntoView {
    view! {
        <div class="bg-gray-700 rounded-lg p-4">
            <div class="flex justify-between text-sm text-gray-400 mb-1">
                <span>{comment.commenter_name}</span>
                <span>{comment.created_at.date_label()}</span>
            </div>
            <p>{comment.content}</p>
        </div>
    }
}
