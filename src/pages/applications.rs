//! My applications page
//!
//! Lists the caller's applications on entry and hosts the create form.
//! A created application is not inserted locally: the list is reloaded from
//! the backend once creation succeeds.

use crate::app::Shell;
use crate::gateway::{Backend, NewApplication};
use crate::model::validation::{validate_amount, validate_currency};
use crate::model::{is_known_city, target_cities, Application, FormError, WORLD_CITIES};
use crate::session::{Session, SessionStorage};

use super::request::{Applied, Blocked, PageError, Pending, RequestState, RequestTracker, Settled};

/// Create form fields as typed
#[derive(Debug, Clone, PartialEq)]
pub struct CreateForm {
    pub target_city: String,
    pub amount: String,
    pub currency: String,
}

impl Default for CreateForm {
    fn default() -> Self {
        Self {
            target_city: String::new(),
            amount: String::new(),
            currency: "USD".to_string(),
        }
    }
}

impl CreateForm {
    /// Check the form for a user living in `home_city`
    pub fn validate(&self, home_city: &str) -> Result<NewApplication, FormError> {
        let target_city = self.target_city.trim();
        if target_city.is_empty() {
            return Err(FormError::Missing("Target city"));
        }
        if target_city == home_city {
            return Err(FormError::SameCity);
        }
        if !is_known_city(target_city) {
            return Err(FormError::UnknownCity(target_city.to_string()));
        }
        let amount = validate_amount(&self.amount)?;
        let currency = validate_currency(&self.currency)?;

        Ok(NewApplication {
            target_city: target_city.to_string(),
            amount,
            currency,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateRequest {
    pub token: String,
    pub draft: NewApplication,
}

#[derive(Debug, PartialEq)]
pub enum ApplicationsView<'a> {
    Loading,
    /// Loaded, nothing posted yet
    Empty,
    Listed(&'a [Application]),
    Failed(&'a PageError),
}

#[derive(Debug, Default)]
pub struct ApplicationsController {
    pub form: CreateForm,
    form_open: bool,
    list: RequestTracker<Vec<Application>>,
    create: RequestTracker<()>,
}

impl ApplicationsController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target_options(session: &Session) -> Vec<&'static str> {
        target_cities(WORLD_CITIES, &session.user().city)
    }

    pub fn view(&self) -> ApplicationsView<'_> {
        match self.list.state() {
            RequestState::Idle | RequestState::InFlight => ApplicationsView::Loading,
            RequestState::Succeeded(apps) if apps.is_empty() => ApplicationsView::Empty,
            RequestState::Succeeded(apps) => ApplicationsView::Listed(apps),
            RequestState::Failed(e) => ApplicationsView::Failed(e),
        }
    }

    pub fn is_form_open(&self) -> bool {
        self.form_open
    }

    pub fn open_form(&mut self) {
        self.form_open = true;
    }

    /// Close and clear the form. A creation still in flight is forgotten.
    pub fn close_form(&mut self) {
        self.form_open = false;
        self.form = CreateForm::default();
        self.create.reset();
    }

    pub fn create_error(&self) -> Option<String> {
        self.create.error().map(|e| e.message())
    }

    /// A create request is on the wire; the submit control stays disabled
    pub fn is_creating(&self) -> bool {
        self.create.is_in_flight()
    }

    pub fn create_label(&self) -> &'static str {
        if self.create.is_in_flight() {
            "Creating..."
        } else {
            "Create Application"
        }
    }

    // ============ Loading ============

    /// Start loading the list (on entering the page, or after a creation)
    pub fn begin_load(&mut self, session: Option<&Session>) -> Result<Pending<String>, Blocked> {
        let session = session.ok_or(Blocked::SignedOut)?;
        let ticket = self.list.begin()?;
        Ok(Pending {
            ticket,
            request: session.token().to_string(),
        })
    }

    /// Reload after a change the backend acknowledged. A load already running
    /// was sent before the change, so it is superseded rather than waited on.
    pub fn begin_reload(&mut self, session: Option<&Session>) -> Result<Pending<String>, Blocked> {
        let session = session.ok_or(Blocked::SignedOut)?;
        let ticket = self.list.restart()?;
        Ok(Pending {
            ticket,
            request: session.token().to_string(),
        })
    }

    pub async fn send_load<B: Backend + ?Sized>(
        backend: &B,
        pending: &Pending<String>,
    ) -> Settled<Vec<Application>> {
        pending.settle(backend.my_applications(&pending.request).await)
    }

    pub fn finish_load(&mut self, settled: Settled<Vec<Application>>) -> Applied {
        self.list.apply(settled)
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

    // ============ Creating ============

    pub fn begin_create(&mut self, session: Option<&Session>) -> Result<Pending<CreateRequest>, Blocked> {
        let session = session.ok_or(Blocked::SignedOut)?;
        self.create.check_ready()?;

        let draft = match self.form.validate(&session.user().city) {
            Ok(draft) => draft,
            Err(e) => return Err(self.create.reject(e)),
        };

        let ticket = self.create.begin()?;
        Ok(Pending {
            ticket,
            request: CreateRequest {
                token: session.token().to_string(),
                draft,
            },
        })
    }

    pub async fn send_create<B: Backend + ?Sized>(
        backend: &B,
        pending: &Pending<CreateRequest>,
    ) -> Settled<Application> {
        let request = &pending.request;
        pending.settle(backend.create_application(&request.token, &request.draft).await)
    }

    /// Apply the creation response. On `Succeeded` the form is closed and the
    /// caller should reload the list with [`begin_reload`](Self::begin_reload).
    pub fn finish_create(&mut self, settled: Settled<Application>) -> Applied {
        let (applied, created) = self.create.apply_with(settled);
        if let Some(created) = created {
            tracing::info!(application_id = %created.id, "Application created");
            self.close_form();
        }
        applied
    }

    /// Create, then reload the list
    pub async fn create<B: Backend + ?Sized, S: SessionStorage>(
        &mut self,
        backend: &B,
        shell: &mut Shell<S>,
    ) -> Result<Applied, Blocked> {
        let pending = self.begin_create(shell.current_session())?;
        let settled = Self::send_create(backend, &pending).await;
        let applied = self.finish_create(settled);
        if shell.observe(applied) || applied != Applied::Succeeded {
            return Ok(applied);
        }

        let pending = self.begin_reload(shell.current_session())?;
        let settled = Self::send_load(backend, &pending).await;
        let reloaded = self.finish_load(settled);
        shell.observe(reloaded);
        Ok(applied)
    }

    pub fn teardown(&mut self) {
        self.list.teardown();
        self.create.teardown();
    }
}
