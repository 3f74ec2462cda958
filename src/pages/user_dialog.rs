//! Another user's profile, opened from a search result
//!
//! Loads comments and like state on open. Liking toggles server side; the
//! backend does not say which way, so `has_liked` is flipped locally and can
//! drift if the same account toggles from elsewhere until the next reload.
//! Comments are never appended locally: a posted comment shows up only when
//! the reload that follows the post's response completes.

use crate::app::Shell;
use crate::gateway::{Backend, LikeOutcome, UserProfile};
use crate::model::{Comment, UserSnapshot};
use crate::session::{Session, SessionStorage};

use super::request::{Applied, Blocked, Pending, RequestTracker, Settled};

/// Target user plus the caller's token
#[derive(Debug, Clone, PartialEq)]
pub struct UserQuery {
    pub user_id: String,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommentPost {
    pub query: UserQuery,
    pub content: String,
}

#[derive(Debug)]
pub struct UserDialog {
    user_id: String,
    /// Absent when opened by id until the first load returns the profile
    user: Option<UserSnapshot>,
    comments: Vec<Comment>,
    has_liked: bool,
    likes_count: u32,
    pub draft: String,
    load: RequestTracker<()>,
    like: RequestTracker<()>,
    comment: RequestTracker<()>,
}

impl UserDialog {
    /// Open for `user`, showing the counts from the snapshot until loaded
    pub fn open(user: UserSnapshot) -> Self {
        let mut dialog = Self::open_id(user.id.clone());
        dialog.likes_count = user.likes_count;
        dialog.user = Some(user);
        dialog
    }

    /// Open knowing only the user id, e.g. from a link
    pub fn open_id(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            user: None,
            comments: Vec::new(),
            has_liked: false,
            likes_count: 0,
            draft: String::new(),
            load: RequestTracker::new(),
            like: RequestTracker::new(),
            comment: RequestTracker::new(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn user(&self) -> Option<&UserSnapshot> {
        self.user.as_ref()
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn has_liked(&self) -> bool {
        self.has_liked
    }

    pub fn likes_count(&self) -> u32 {
        self.likes_count
    }

    pub fn is_trusted(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.is_trusted)
    }

    pub fn load_state(&self) -> &RequestTracker<()> {
        &self.load
    }

    pub fn like_state(&self) -> &RequestTracker<()> {
        &self.like
    }

    pub fn comment_state(&self) -> &RequestTracker<()> {
        &self.comment
    }

    fn query(&self, session: Option<&Session>) -> Result<UserQuery, Blocked> {
        let session = session.ok_or(Blocked::SignedOut)?;
        Ok(UserQuery {
            user_id: self.user_id.clone(),
            token: session.token().to_string(),
        })
    }

    // ============ Profile ============

    pub fn begin_load(&mut self, session: Option<&Session>) -> Result<Pending<UserQuery>, Blocked> {
        let request = self.query(session)?;
        let ticket = self.load.begin()?;
        Ok(Pending { ticket, request })
    }

    /// Reload after an acknowledged comment. A load already running was sent
    /// before the comment existed, so it is superseded rather than waited on.
    pub fn begin_reload(&mut self, session: Option<&Session>) -> Result<Pending<UserQuery>, Blocked> {
        let request = self.query(session)?;
        let ticket = self.load.restart()?;
        Ok(Pending { ticket, request })
    }

    pub async fn send_load<B: Backend + ?Sized>(
        backend: &B,
        pending: &Pending<UserQuery>,
    ) -> Settled<UserProfile> {
        let query = &pending.request;
        pending.settle(backend.fetch_user_profile(&query.user_id, &query.token).await)
    }

    pub fn finish_load(&mut self, settled: Settled<UserProfile>) -> Applied {
        let (applied, profile) = self.load.apply_with(settled);
        if let Some(profile) = profile {
            if profile.user.is_some() {
                self.user = profile.user;
            }
            self.comments = profile.comments;
            self.has_liked = profile.has_liked;
            self.likes_count = profile.likes_count;
            if let Some(user) = self.user.as_mut() {
                user.likes_count = profile.likes_count;
            }
        }
        applied
    }

    pub async fn load<B: Backend + ?Sized, S: SessionStorage>(
        &mut self,
        backend: &B,
        shell: &mut Shell<S>,
    ) -> Result<Applied, Blocked> {
        let pending = self.begin_load(shell.current_session())?;
        let settled = Self::send_load(backend, &pending).await;
        let applied = self.finish_load(settled);
        shell.observe(applied);
        Ok(applied)
    }

    // ============ Likes ============

    pub fn begin_like(&mut self, session: Option<&Session>) -> Result<Pending<UserQuery>, Blocked> {
        let request = self.query(session)?;
        let ticket = self.like.begin()?;
        Ok(Pending { ticket, request })
    }

    pub async fn send_like<B: Backend + ?Sized>(
        backend: &B,
        pending: &Pending<UserQuery>,
    ) -> Settled<LikeOutcome> {
        let query = &pending.request;
        pending.settle(backend.toggle_like(&query.user_id, &query.token).await)
    }

    pub fn finish_like(&mut self, settled: Settled<LikeOutcome>) -> Applied {
        let (applied, outcome) = self.like.apply_with(settled);
        if let Some(outcome) = outcome {
            self.has_liked = !self.has_liked;
            self.likes_count = outcome.likes_count;
            if let Some(user) = self.user.as_mut() {
                user.likes_count = outcome.likes_count;
                if let Some(trusted) = outcome.is_trusted {
                    user.is_trusted = trusted;
                }
            }
        }
        applied
    }

    pub async fn toggle_like<B: Backend + ?Sized, S: SessionStorage>(
        &mut self,
        backend: &B,
        shell: &mut Shell<S>,
    ) -> Result<Applied, Blocked> {
        let pending = self.begin_like(shell.current_session())?;
        let settled = Self::send_like(backend, &pending).await;
        let applied = self.finish_like(settled);
        shell.observe(applied);
        Ok(applied)
    }

    // ============ Comments ============

    /// Blank drafts are ignored with [`Blocked::Empty`] and nothing is recorded
    pub fn begin_comment(&mut self, session: Option<&Session>) -> Result<Pending<CommentPost>, Blocked> {
        let query = self.query(session)?;
        self.comment.check_ready()?;

        let content = self.draft.trim();
        if content.is_empty() {
            return Err(Blocked::Empty);
        }
        let content = content.to_string();

        let ticket = self.comment.begin()?;
        Ok(Pending {
            ticket,
            request: CommentPost { query, content },
        })
    }

    pub async fn send_comment<B: Backend + ?Sized>(
        backend: &B,
        pending: &Pending<CommentPost>,
    ) -> Settled<()> {
        let post = &pending.request;
        pending.settle(
            backend
                .post_comment(&post.query.token, &post.query.user_id, &post.content)
                .await,
        )
    }

    /// Apply the post response. On `Succeeded` the draft is cleared and the
    /// caller should reload with [`begin_reload`](Self::begin_reload) to show
    /// the comment.
    pub fn finish_comment(&mut self, settled: Settled<()>) -> Applied {
        let applied = self.comment.apply(settled);
        if applied == Applied::Succeeded {
            self.draft.clear();
        }
        applied
    }

    /// Post the draft, then reload once the post is acknowledged
    pub async fn post_comment<B: Backend + ?Sized, S: SessionStorage>(
        &mut self,
        backend: &B,
        shell: &mut Shell<S>,
    ) -> Result<Applied, Blocked> {
        let pending = self.begin_comment(shell.current_session())?;
        let settled = Self::send_comment(backend, &pending).await;
        let applied = self.finish_comment(settled);
        if shell.observe(applied) || applied != Applied::Succeeded {
            return Ok(applied);
        }

        let pending = self.begin_reload(shell.current_session())?;
        let settled = Self::send_load(backend, &pending).await;
        let reloaded = self.finish_load(settled);
        shell.observe(reloaded);
        Ok(applied)
    }

    /// Closing the dialog: responses still on the way are dropped
    pub fn close(&mut self) {
        self.load.teardown();
        self.like.teardown();
        self.comment.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{ApiError, AuthSession};
    use crate::session::MemoryStorage;
    use crate::test_support::{auth_error, sample_comment, sample_session, sample_user, FakeBackend};

    fn signed_in() -> Shell<MemoryStorage> {
        let mut shell = Shell::new(MemoryStorage::new());
        let session = sample_session();
        shell
            .sign_in(AuthSession {
                user: session.user().clone(),
                token: session.token().to_string(),
            })
            .unwrap();
        shell
    }

    fn profile(comments: Vec<Comment>, has_liked: bool, likes_count: u32) -> UserProfile {
        UserProfile {
            user: None,
            comments,
            has_liked,
            likes_count,
        }
    }

    #[tokio::test]
    async fn test_load_adopts_profile_state() {
        let backend = FakeBackend::new();
        let mut refreshed = sample_user("u-2");
        refreshed.is_trusted = true;
        backend.profile.borrow_mut().push_back(Ok(UserProfile {
            user: Some(refreshed),
            comments: vec![sample_comment("u-2", "reliable")],
            has_liked: true,
            likes_count: 5,
        }));
        let mut shell = signed_in();
        let mut dialog = UserDialog::open(sample_user("u-2"));

        dialog.load(&backend, &mut shell).await.unwrap();
        assert!(dialog.has_liked());
        assert_eq!(dialog.likes_count(), 5);
        assert!(dialog.is_trusted());
        assert_eq!(dialog.comments().len(), 1);
    }

    #[tokio::test]
    async fn test_double_toggle_flips_twice_with_latest_counts() {
        let backend = FakeBackend::new();
        backend.like.borrow_mut().push_back(Ok(LikeOutcome {
            likes_count: 4,
            is_trusted: Some(true),
        }));
        backend.like.borrow_mut().push_back(Ok(LikeOutcome {
            likes_count: 3,
            is_trusted: None,
        }));
        let mut shell = signed_in();
        let mut dialog = UserDialog::open(sample_user("u-2"));
        assert!(!dialog.has_liked());

        dialog.toggle_like(&backend, &mut shell).await.unwrap();
        assert!(dialog.has_liked());
        assert_eq!(dialog.likes_count(), 4);
        assert!(dialog.is_trusted());

        dialog.toggle_like(&backend, &mut shell).await.unwrap();
        assert!(!dialog.has_liked());
        assert_eq!(dialog.likes_count(), 3);
        assert_eq!(backend.call_count("like"), 2);
    }

    #[test]
    fn test_like_refused_while_previous_toggle_in_flight() {
        let session = sample_session();
        let mut dialog = UserDialog::open(sample_user("u-2"));
        let _pending = dialog.begin_like(Some(&session)).unwrap();
        assert_eq!(dialog.begin_like(Some(&session)), Err(Blocked::InFlight));
    }

    #[tokio::test]
    async fn test_failed_like_leaves_flag_alone() {
        let backend = FakeBackend::new();
        backend.like.borrow_mut().push_back(Err(ApiError::Validation {
            message: "Cannot like yourself".to_string(),
            status: 400,
        }));
        let mut shell = signed_in();
        let mut dialog = UserDialog::open(sample_user("u-2"));

        assert_eq!(dialog.toggle_like(&backend, &mut shell).await, Ok(Applied::Failed));
        assert!(!dialog.has_liked());
        assert_eq!(
            dialog.like_state().error().map(|e| e.message()).as_deref(),
            Some("Cannot like yourself")
        );
    }

    #[tokio::test]
    async fn test_comment_visible_only_after_reload() {
        let backend = FakeBackend::new();
        backend.comment.borrow_mut().push_back(Ok(()));
        backend
            .profile
            .borrow_mut()
            .push_back(Ok(profile(vec![sample_comment("u-2", "great trade")], false, 0)));
        let session = sample_session();
        let mut dialog = UserDialog::open(sample_user("u-2"));
        dialog.draft = "great trade".to_string();

        let pending = dialog.begin_comment(Some(&session)).unwrap();
        let settled = UserDialog::send_comment(&backend, &pending).await;
        assert!(dialog.comments().is_empty());

        assert_eq!(dialog.finish_comment(settled), Applied::Succeeded);
        assert!(dialog.comments().is_empty());
        assert!(dialog.draft.is_empty());

        let pending = dialog.begin_load(Some(&session)).unwrap();
        let settled = UserDialog::send_load(&backend, &pending).await;
        dialog.finish_load(settled);
        assert_eq!(dialog.comments()[0].content, "great trade");
    }

    #[tokio::test]
    async fn test_post_comment_reloads_after_ack() {
        let backend = FakeBackend::new();
        backend.comment.borrow_mut().push_back(Ok(()));
        backend
            .profile
            .borrow_mut()
            .push_back(Ok(profile(vec![sample_comment("u-2", "hello")], false, 0)));
        let mut shell = signed_in();
        let mut dialog = UserDialog::open(sample_user("u-2"));
        dialog.draft = "hello".to_string();

        dialog.post_comment(&backend, &mut shell).await.unwrap();
        assert_eq!(*backend.calls.borrow(), vec!["comment".to_string(), "profile".to_string()]);
        assert_eq!(dialog.comments().len(), 1);
    }

    #[tokio::test]
    async fn test_comment_posted_during_initial_load_is_shown() {
        let backend = FakeBackend::new();
        backend.comment.borrow_mut().push_back(Ok(()));
        backend
            .profile
            .borrow_mut()
            .push_back(Ok(profile(vec![sample_comment("u-2", "first!")], false, 0)));
        let mut shell = signed_in();
        let mut dialog = UserDialog::open(sample_user("u-2"));

        // The load on open is still on the wire when the comment goes out
        let opening = dialog.begin_load(shell.current_session()).unwrap();
        dialog.draft = "first!".to_string();

        let applied = dialog.post_comment(&backend, &mut shell).await.unwrap();
        assert_eq!(applied, Applied::Succeeded);
        assert_eq!(*backend.calls.borrow(), vec!["comment".to_string(), "profile".to_string()]);

        let late = opening.settle(Ok(profile(Vec::new(), false, 0)));
        assert_eq!(dialog.finish_load(late), Applied::Discarded);
        assert_eq!(dialog.comments().len(), 1);
        assert_eq!(dialog.comments()[0].content, "first!");
    }

    #[tokio::test]
    async fn test_blank_comment_ignored() {
        let backend = FakeBackend::new();
        let mut shell = signed_in();
        let mut dialog = UserDialog::open(sample_user("u-2"));
        dialog.draft = "   ".to_string();

        assert_eq!(dialog.post_comment(&backend, &mut shell).await, Err(Blocked::Empty));
        assert_eq!(backend.total_calls(), 0);
        assert!(dialog.comment_state().error().is_none());
    }

    #[tokio::test]
    async fn test_closed_dialog_drops_late_profile() {
        let backend = FakeBackend::new();
        backend
            .profile
            .borrow_mut()
            .push_back(Ok(profile(vec![sample_comment("u-2", "late")], true, 9)));
        let session = sample_session();
        let mut dialog = UserDialog::open(sample_user("u-2"));

        let pending = dialog.begin_load(Some(&session)).unwrap();
        dialog.close();
        let settled = UserDialog::send_load(&backend, &pending).await;
        assert_eq!(dialog.finish_load(settled), Applied::Discarded);
        assert!(dialog.comments().is_empty());
        assert_eq!(dialog.likes_count(), 0);
    }

    #[tokio::test]
    async fn test_opened_by_id_picks_up_user_on_load() {
        let backend = FakeBackend::new();
        backend.profile.borrow_mut().push_back(Ok(UserProfile {
            user: Some(sample_user("u-3")),
            comments: Vec::new(),
            has_liked: false,
            likes_count: 2,
        }));
        let mut shell = signed_in();
        let mut dialog = UserDialog::open_id("u-3");
        assert!(dialog.user().is_none());

        dialog.load(&backend, &mut shell).await.unwrap();
        assert_eq!(dialog.user().map(|u| u.likes_count), Some(2));
    }

    #[tokio::test]
    async fn test_expired_token_during_load_signs_out() {
        let backend = FakeBackend::new();
        backend.profile.borrow_mut().push_back(Err(auth_error()));
        let mut shell = signed_in();
        let mut dialog = UserDialog::open(sample_user("u-2"));

        assert_eq!(dialog.load(&backend, &mut shell).await, Ok(Applied::SessionExpired));
        assert!(shell.current_session().is_none());
    }
}
