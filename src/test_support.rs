//! Fixtures shared by unit tests

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::cell::RefCell;
use std::collections::VecDeque;

use crate::gateway::{
    ApiError, ApiResult, AuthSession, Backend, LikeOutcome, LoginRequest, NewApplication,
    RegisterRequest, UserProfile,
};
use crate::model::{
    Application, ApplicationStatus, Comment, Currency, CurrencyRateTable, MatchedApplication,
    Timestamp, UserSnapshot,
};
use crate::session::{PersistedFields, Session, SessionError, SessionResult, SessionStorage};

fn ts(y: i32, m: u32, d: u32) -> Timestamp {
    Timestamp(Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap())
}

pub fn sample_user(id: &str) -> UserSnapshot {
    UserSnapshot {
        id: id.to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: format!("{}@example.com", id),
        phone: "+447700900123".to_string(),
        country: "UK".to_string(),
        city: "London".to_string(),
        date_of_birth: ts(1990, 12, 10),
        business_card_number: "UK-0123-4567".to_string(),
        is_trusted: false,
        likes_count: 0,
        created_at: ts(2025, 1, 1),
    }
}

pub fn sample_session() -> Session {
    Session::new(sample_user("u-me"), "tok-sample")
}

pub fn sample_application(id: &str, target_city: &str, amount: f64) -> Application {
    Application {
        id: id.to_string(),
        user_id: "u-me".to_string(),
        user_city: Some("London".to_string()),
        target_city: target_city.to_string(),
        amount,
        currency: Currency::Usd,
        status: ApplicationStatus::Active,
        created_at: ts(2025, 3, 1),
        expires_at: Some(ts(2025, 3, 15)),
        days_active: 0,
    }
}

pub fn sample_match(owner_id: &str, owner_city: &str) -> MatchedApplication {
    let mut user = sample_user(owner_id);
    user.city = owner_city.to_string();
    let mut application = sample_application(&format!("app-{}", owner_id), "London", 250.0);
    application.user_id = owner_id.to_string();
    application.user_city = Some(owner_city.to_string());
    MatchedApplication { application, user }
}

pub fn sample_comment(target: &str, content: &str) -> Comment {
    Comment {
        id: format!("c-{}", content.len()),
        target_user_id: target.to_string(),
        commenter_id: Some("u-me".to_string()),
        commenter_name: "Ada Lovelace".to_string(),
        content: content.to_string(),
        created_at: ts(2025, 3, 2),
    }
}

/// Storage that reads as empty and refuses every write
#[derive(Debug, Default)]
pub struct FullDisk;

impl SessionStorage for FullDisk {
    fn load(&self) -> SessionResult<PersistedFields> {
        Ok(PersistedFields::default())
    }

    fn store_pair(&mut self, _token: &str, _user: &str) -> SessionResult<()> {
        Err(SessionError::Unavailable("disk full".to_string()))
    }

    fn remove(&mut self) -> SessionResult<()> {
        Ok(())
    }
}

pub fn auth_error() -> ApiError {
    ApiError::Auth {
        message: "Authentication required".to_string(),
        status: 401,
    }
}

/// Backend double. Each operation pops the next scripted reply (a transport
/// error when none is left) and every call is recorded by name.
#[derive(Default)]
pub struct FakeBackend {
    pub calls: RefCell<Vec<String>>,
    pub login: RefCell<VecDeque<ApiResult<AuthSession>>>,
    pub register: RefCell<VecDeque<ApiResult<AuthSession>>>,
    pub search: RefCell<VecDeque<ApiResult<Vec<MatchedApplication>>>>,
    pub rates: RefCell<VecDeque<ApiResult<CurrencyRateTable>>>,
    pub my_applications: RefCell<VecDeque<ApiResult<Vec<Application>>>>,
    pub create: RefCell<VecDeque<ApiResult<Application>>>,
    pub profile: RefCell<VecDeque<ApiResult<UserProfile>>>,
    pub like: RefCell<VecDeque<ApiResult<LikeOutcome>>>,
    pub comment: RefCell<VecDeque<ApiResult<()>>>,
    pub cities: RefCell<VecDeque<ApiResult<Vec<String>>>>,
    pub last_register: RefCell<Option<RegisterRequest>>,
    pub last_create: RefCell<Option<NewApplication>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_count(&self, name: &str) -> usize {
        self.calls.borrow().iter().filter(|c| *c == name).count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.borrow().len()
    }

    fn next<T>(&self, name: &str, queue: &RefCell<VecDeque<ApiResult<T>>>) -> ApiResult<T> {
        self.calls.borrow_mut().push(name.to_string());
        queue
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::transport()))
    }
}

#[async_trait(?Send)]
impl Backend for FakeBackend {
    async fn login(&self, _credentials: &LoginRequest) -> ApiResult<AuthSession> {
        self.next("login", &self.login)
    }

    async fn register(&self, profile: &RegisterRequest) -> ApiResult<AuthSession> {
        *self.last_register.borrow_mut() = Some(profile.clone());
        self.next("register", &self.register)
    }

    async fn search_applications(
        &self,
        _target_city: &str,
        _token: &str,
    ) -> ApiResult<Vec<MatchedApplication>> {
        self.next("search", &self.search)
    }

    async fn currency_rates(&self, _base: Currency) -> ApiResult<CurrencyRateTable> {
        self.next("rates", &self.rates)
    }

    async fn my_applications(&self, _token: &str) -> ApiResult<Vec<Application>> {
        self.next("my_applications", &self.my_applications)
    }

    async fn create_application(
        &self,
        _token: &str,
        draft: &NewApplication,
    ) -> ApiResult<Application> {
        *self.last_create.borrow_mut() = Some(draft.clone());
        self.next("create", &self.create)
    }

    async fn fetch_user_profile(&self, _user_id: &str, _token: &str) -> ApiResult<UserProfile> {
        self.next("profile", &self.profile)
    }

    async fn toggle_like(&self, _user_id: &str, _token: &str) -> ApiResult<LikeOutcome> {
        self.next("like", &self.like)
    }

    async fn post_comment(
        &self,
        _token: &str,
        _target_user_id: &str,
        _content: &str,
    ) -> ApiResult<()> {
        self.next("comment", &self.comment)
    }

    async fn cities(&self) -> ApiResult<Vec<String>> {
        self.next("cities", &self.cities)
    }
}
