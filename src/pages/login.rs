//! Login page

use crate::app::Shell;
use crate::gateway::{AuthSession, Backend, LoginRequest};
use crate::model::validation::require;
use crate::session::SessionStorage;

use super::request::{Applied, Blocked, Pending, RequestTracker, Settled};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Default)]
pub struct LoginController {
    pub form: LoginForm,
    request: RequestTracker<()>,
    warning: Option<String>,
}

impl LoginController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) -> &RequestTracker<()> {
        &self.request
    }

    /// Error to show under the form, verbatim from the backend when it sent one
    pub fn error_message(&self) -> Option<String> {
        self.request.error().map(|e| e.message())
    }

    /// Set when the sign-in worked but the session could not be saved
    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    pub fn button_label(&self) -> &'static str {
        if self.request.is_in_flight() {
            "Signing In..."
        } else {
            "Sign In"
        }
    }

    pub fn begin(&mut self) -> Result<Pending<LoginRequest>, Blocked> {
        self.request.check_ready()?;
        self.warning = None;
        let checked = require("Email", &self.form.email).and_then(|_| require("Password", &self.form.password));
        if let Err(e) = checked {
            return Err(self.request.reject(e));
        }

        let ticket = self.request.begin()?;
        Ok(Pending {
            ticket,
            request: LoginRequest {
                email: self.form.email.trim().to_string(),
                password: self.form.password.clone(),
            },
        })
    }

    pub async fn send<B: Backend + ?Sized>(
        backend: &B,
        pending: &Pending<LoginRequest>,
    ) -> Settled<AuthSession> {
        pending.settle(backend.login(&pending.request).await)
    }

    /// Apply the login response. On success the session is established and
    /// the shell moves to `Search`.
    pub fn finish<S: SessionStorage>(
        &mut self,
        settled: Settled<AuthSession>,
        shell: &mut Shell<S>,
    ) -> Applied {
        let (applied, auth) = self.request.apply_with(settled);
        if let Some(auth) = auth {
            self.form = LoginForm::default();
            self.warning = sign_in(shell, auth);
        }
        anonymous(applied)
    }

    pub async fn submit<B: Backend + ?Sized, S: SessionStorage>(
        &mut self,
        backend: &B,
        shell: &mut Shell<S>,
    ) -> Result<Applied, Blocked> {
        let pending = self.begin()?;
        let settled = Self::send(backend, &pending).await;
        Ok(self.finish(settled, shell))
    }
}

/// Adopt a fresh session. A save failure keeps the session for this run and
/// comes back as a warning for the page to show.
pub(super) fn sign_in<S: SessionStorage>(shell: &mut Shell<S>, auth: AuthSession) -> Option<String> {
    match shell.sign_in(auth) {
        Ok(()) => None,
        Err(e) => {
            tracing::warn!(error = %e, "Signed in without a saved session");
            Some(format!(
                "Signed in, but the session could not be saved ({}). You will need to sign in again next time.",
                e
            ))
        }
    }
}

/// Without a session a 401 means bad credentials, never an expired token
pub(super) fn anonymous(applied: Applied) -> Applied {
    match applied {
        Applied::SessionExpired => Applied::Failed,
        other => other,
    }
}
