//! Registration page
//!
//! All fields are required. Email and phone shape plus the minimum age are
//! checked before anything is sent; the birth date goes out as midnight UTC.

use chrono::{NaiveDate, Utc};

use crate::app::Shell;
use crate::gateway::{AuthSession, Backend, RegisterRequest};
use crate::model::validation::{
    check_minimum_age, normalize_birth_date, parse_birth_date, require, validate_email,
    validate_phone,
};
use crate::model::FormError;
use crate::session::SessionStorage;

use super::login::{anonymous, sign_in};
use super::request::{Applied, Blocked, Pending, RequestTracker, Settled};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    pub city: String,
    /// As entered in a date picker: `YYYY-MM-DD`
    pub date_of_birth: String,
    pub password: String,
}

impl RegisterForm {
    /// Check the form as of `today` and build the request body
    pub fn validate(&self, today: NaiveDate) -> Result<RegisterRequest, FormError> {
        require("First name", &self.first_name)?;
        require("Last name", &self.last_name)?;
        validate_email(&self.email)?;
        validate_phone(&self.phone)?;
        require("Country", &self.country)?;
        require("City", &self.city)?;
        let birth = parse_birth_date(&self.date_of_birth)?;
        check_minimum_age(birth, today)?;
        require("Password", &self.password)?;

        Ok(RegisterRequest {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            country: self.country.trim().to_string(),
            city: self.city.trim().to_string(),
            date_of_birth: normalize_birth_date(birth),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Default)]
pub struct RegisterController {
    pub form: RegisterForm,
    request: RequestTracker<()>,
    warning: Option<String>,
}

impl RegisterController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) -> &RequestTracker<()> {
        &self.request
    }

    pub fn error_message(&self) -> Option<String> {
        self.request.error().map(|e| e.message())
    }

    /// Set when the account was created but the session could not be saved
    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    pub fn button_label(&self) -> &'static str {
        if self.request.is_in_flight() {
            "Creating Account..."
        } else {
            "Create Account"
        }
    }

    pub fn begin(&mut self) -> Result<Pending<RegisterRequest>, Blocked> {
        self.begin_on(Utc::now().date_naive())
    }

    /// [`begin`](Self::begin) with an explicit current date for the age check
    pub fn begin_on(&mut self, today: NaiveDate) -> Result<Pending<RegisterRequest>, Blocked> {
        self.request.check_ready()?;
        self.warning = None;
        let request = match self.form.validate(today) {
            Ok(request) => request,
            Err(e) => {
                tracing::debug!(error = %e, "Registration form rejected");
                return Err(self.request.reject(e));
            }
        };

        let ticket = self.request.begin()?;
        Ok(Pending { ticket, request })
    }

    pub async fn send<B: Backend + ?Sized>(
        backend: &B,
        pending: &Pending<RegisterRequest>,
    ) -> Settled<AuthSession> {
        pending.settle(backend.register(&pending.request).await)
    }

    /// Apply the registration response; success signs in and moves to `Search`
    pub fn finish<S: SessionStorage>(
        &mut self,
        settled: Settled<AuthSession>,
        shell: &mut Shell<S>,
    ) -> Applied {
        let (applied, auth) = self.request.apply_with(settled);
        if let Some(auth) = auth {
            self.form = RegisterForm::default();
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

    /// [`submit`](Self::submit) with an explicit current date
    pub async fn submit_on<B: Backend + ?Sized, S: SessionStorage>(
        &mut self,
        backend: &B,
        shell: &mut Shell<S>,
        today: NaiveDate,
    ) -> Result<Applied, Blocked> {
        let pending = self.begin_on(today)?;
        let settled = Self::send(backend, &pending).await;
        Ok(self.finish(settled, shell))
    }
}
