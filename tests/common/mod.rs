//! In-process marketplace backend for integration tests
//!
//! Implements the REST contract the client speaks, with the backend's
//! observable behaviour: 401 "Invalid credentials" on bad logins, 401
//! "Authentication required" on bad tokens, 422 validation arrays for
//! out-of-range amounts, and like toggling with a trust flag at 4+ likes.

#![allow(dead_code)]

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use counterparty::gateway::{ApiClient, ReqwestTransport, TransportConfig};

pub type Reply = (StatusCode, Json<Value>);

#[derive(Default)]
pub struct FakeState {
    /// email -> (user record, password)
    users: HashMap<String, (Value, String)>,
    /// token -> user id
    tokens: HashMap<String, String>,
    applications: Vec<Value>,
    /// (liker, target)
    likes: HashSet<(String, String)>,
    comments: Vec<Value>,
    /// Route name -> number of requests received
    hits: HashMap<&'static str, usize>,
    pub rates_down: bool,
}

impl FakeState {
    fn hit(&mut self, route: &'static str) {
        *self.hits.entry(route).or_default() += 1;
    }

    fn user_by_id(&self, id: &str) -> Option<Value> {
        self.users
            .values()
            .find(|(user, _)| user["id"] == id)
            .map(|(user, _)| user.clone())
    }

    fn caller(&self, token: &str) -> Result<Value, Reply> {
        self.tokens
            .get(token)
            .and_then(|id| self.user_by_id(id))
            .ok_or_else(|| detail(StatusCode::UNAUTHORIZED, "Authentication required"))
    }

    fn issue_token(&mut self, user_id: &str) -> String {
        let token = format!("tok-{}", uuid::Uuid::new_v4());
        self.tokens.insert(token.clone(), user_id.to_string());
        token
    }

    /// Every issued token stops working, as after a secret rotation
    pub fn revoke_all_tokens(&mut self) {
        self.tokens.clear();
    }

    fn likes_for(&self, target: &str) -> usize {
        self.likes.iter().filter(|(_, t)| t == target).count()
    }
}

/// Handle to a running fake backend
#[derive(Clone)]
pub struct FakeBackend {
    pub base_url: String,
    pub state: Arc<Mutex<FakeState>>,
}

impl FakeBackend {
    pub async fn start() -> Self {
        let state = Arc::new(Mutex::new(FakeState::default()));
        let router = router(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn client(&self) -> ApiClient<ReqwestTransport> {
        let transport = ReqwestTransport::new(TransportConfig {
            base_url: self.base_url.clone(),
            request_timeout_ms: 5_000,
        })
        .unwrap();
        ApiClient::new(transport)
    }

    pub fn hits(&self, route: &str) -> usize {
        self.state.lock().unwrap().hits.get(route).copied().unwrap_or(0)
    }

    pub fn set_rates_down(&self, down: bool) {
        self.state.lock().unwrap().rates_down = down;
    }

    /// Register a user directly; returns (user id, token)
    pub fn seed_user(&self, first_name: &str, email: &str, password: &str, city: &str) -> (String, String) {
        let mut state = self.state.lock().unwrap();
        let user = user_record(first_name, email, city);
        let id = user["id"].as_str().unwrap().to_string();
        state.users.insert(email.to_string(), (user, password.to_string()));
        let token = state.issue_token(&id);
        (id, token)
    }

    /// Post an application directly on behalf of `user_id`
    pub fn seed_application(&self, user_id: &str, target_city: &str, amount: f64) {
        let mut state = self.state.lock().unwrap();
        let user = state.user_by_id(user_id).unwrap();
        let app = application_record(&user, target_city, amount, "USD");
        state.applications.push(app);
    }

    /// Add a like from someone other than the caller
    pub fn seed_like(&self, liker_id: &str, target_id: &str) {
        let mut state = self.state.lock().unwrap();
        state.likes.insert((liker_id.to_string(), target_id.to_string()));
    }
}

fn detail(status: StatusCode, message: &str) -> Reply {
    (status, Json(json!({ "detail": message })))
}

fn ok(body: Value) -> Reply {
    (StatusCode::OK, Json(body))
}

fn now() -> String {
    // Naive UTC, like the real backend
    chrono::Utc::now().naive_utc().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

fn user_record(first_name: &str, email: &str, city: &str) -> Value {
    json!({
        "id": uuid::Uuid::new_v4().to_string(),
        "first_name": first_name,
        "last_name": "Tester",
        "email": email,
        "phone": "+447700900123",
        "country": "UK",
        "city": city,
        "date_of_birth": "1990-12-10T00:00:00",
        "business_card_number": "UK-0123-4567",
        "is_trusted": false,
        "likes_count": 0,
        "created_at": now(),
    })
}

fn application_record(user: &Value, target_city: &str, amount: f64, currency: &str) -> Value {
    json!({
        "id": uuid::Uuid::new_v4().to_string(),
        "user_id": user["id"],
        "user_city": user["city"],
        "target_city": target_city,
        "amount": amount,
        "currency": currency,
        "created_at": now(),
        "expires_at": "2099-01-01T00:00:00",
        "is_active": true,
    })
}

type Shared = Arc<Mutex<FakeState>>;

#[derive(Deserialize)]
struct TokenQuery {
    token: String,
}

#[derive(Deserialize)]
struct SearchQuery {
    target_city: String,
    token: String,
}

#[derive(Deserialize)]
struct LoginBody {
    email: String,
    password: String,
}

#[derive(Deserialize)]
struct RegisterBody {
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    country: String,
    city: String,
    date_of_birth: String,
    password: String,
}

#[derive(Deserialize)]
struct ApplicationBody {
    target_city: String,
    amount: f64,
    #[serde(default = "default_currency")]
    currency: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

#[derive(Deserialize)]
struct CommentBody {
    target_user_id: String,
    content: String,
}

pub fn router(state: Shared) -> Router {
    let api = Router::new()
        .route("/cities", get(cities))
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/applications", post(create_application))
        .route("/applications/search", get(search))
        .route("/my/applications", get(my_applications))
        .route("/currency/rates/:base", get(rates))
        .route("/user/:id", get(user_profile))
        .route("/likes/:id", post(toggle_like))
        .route("/comments", post(comment));

    Router::new().nest("/api", api).with_state(state)
}

async fn cities(State(state): State<Shared>) -> Reply {
    state.lock().unwrap().hit("cities");
    ok(json!({ "cities": ["London", "Paris", "Tokyo"] }))
}

async fn register(State(state): State<Shared>, Json(body): Json<RegisterBody>) -> Reply {
    let mut state = state.lock().unwrap();
    state.hit("register");

    if state.users.contains_key(&body.email) {
        return detail(StatusCode::BAD_REQUEST, "Email already registered");
    }
    if chrono::DateTime::parse_from_rfc3339(&body.date_of_birth).is_err() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "detail": [{ "loc": ["body", "date_of_birth"], "msg": "invalid datetime" }] })),
        );
    }

    let mut user = user_record(&body.first_name, &body.email, &body.city);
    user["last_name"] = json!(body.last_name);
    user["phone"] = json!(body.phone);
    user["country"] = json!(body.country);
    let id = user["id"].as_str().unwrap_or_default().to_string();
    state.users.insert(body.email.clone(), (user.clone(), body.password));
    let token = state.issue_token(&id);

    ok(json!({
        "message": "User registered successfully",
        "user": user,
        "access_token": token,
        "token_type": "bearer",
    }))
}

async fn login(State(state): State<Shared>, Json(body): Json<LoginBody>) -> Reply {
    let mut state = state.lock().unwrap();
    state.hit("login");

    let user = match state.users.get(&body.email) {
        Some((user, password)) if *password == body.password => user.clone(),
        _ => return detail(StatusCode::UNAUTHORIZED, "Invalid credentials"),
    };
    let id = user["id"].as_str().unwrap_or_default().to_string();
    let token = state.issue_token(&id);

    ok(json!({
        "message": "Login successful",
        "user": user,
        "access_token": token,
        "token_type": "bearer",
    }))
}

async fn create_application(
    State(state): State<Shared>,
    Query(q): Query<TokenQuery>,
    Json(body): Json<ApplicationBody>,
) -> Reply {
    let mut state = state.lock().unwrap();
    state.hit("create_application");
    let caller = match state.caller(&q.token) {
        Ok(user) => user,
        Err(reply) => return reply,
    };

    if body.amount <= 0.0 || body.amount > 6000.0 {
        let msg = if body.amount <= 0.0 {
            "Value error, Amount must be positive"
        } else {
            "Value error, Amount cannot exceed $6,000"
        };
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "detail": [{ "loc": ["body", "amount"], "msg": msg }] })),
        );
    }

    let app = application_record(&caller, &body.target_city, body.amount, &body.currency);
    state.applications.push(app.clone());
    ok(json!({ "message": "Application created successfully", "application": app }))
}

async fn search(State(state): State<Shared>, Query(q): Query<SearchQuery>) -> Reply {
    let mut state = state.lock().unwrap();
    state.hit("search");
    let caller = match state.caller(&q.token) {
        Ok(user) => user,
        Err(reply) => return reply,
    };

    let matches: Vec<Value> = state
        .applications
        .iter()
        .filter(|app| {
            app["user_city"] == q.target_city.as_str()
                && app["target_city"] == caller["city"]
                && app["user_id"] != caller["id"]
        })
        .filter_map(|app| {
            let owner = state.user_by_id(app["user_id"].as_str()?)?;
            let mut hit = app.clone();
            hit["user"] = owner;
            hit["days_active"] = json!(0);
            hit["status"] = json!("Active");
            Some(hit)
        })
        .collect();

    ok(json!({ "applications": matches }))
}

async fn my_applications(State(state): State<Shared>, Query(q): Query<TokenQuery>) -> Reply {
    let mut state = state.lock().unwrap();
    state.hit("my_applications");
    let caller = match state.caller(&q.token) {
        Ok(user) => user,
        Err(reply) => return reply,
    };

    let mine: Vec<Value> = state
        .applications
        .iter()
        .filter(|app| app["user_id"] == caller["id"])
        .map(|app| {
            let mut app = app.clone();
            app["status"] = json!("Active");
            app["days_active"] = json!(0);
            app
        })
        .collect();
    ok(json!({ "applications": mine }))
}

async fn rates(State(state): State<Shared>, Path(base): Path<String>) -> Reply {
    let mut state = state.lock().unwrap();
    state.hit("rates");
    if state.rates_down {
        return detail(StatusCode::SERVICE_UNAVAILABLE, "Rates service unavailable");
    }
    ok(json!({
        "base_currency": base,
        "rates": { "USD": 1.0, "EUR": 0.92, "GBP": 0.79, "JPY": 149.5 },
    }))
}

async fn user_profile(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Query(q): Query<TokenQuery>,
) -> Reply {
    let mut state = state.lock().unwrap();
    state.hit("user_profile");
    let caller = match state.caller(&q.token) {
        Ok(user) => user,
        Err(reply) => return reply,
    };
    let Some(mut user) = state.user_by_id(&id) else {
        return detail(StatusCode::NOT_FOUND, "User not found");
    };

    let likes_count = state.likes_for(&id);
    let caller_id = caller["id"].as_str().unwrap_or_default().to_string();
    let has_liked = state.likes.contains(&(caller_id, id.clone()));
    let comments: Vec<Value> = state
        .comments
        .iter()
        .filter(|c| c["target_user_id"] == id.as_str())
        .cloned()
        .collect();
    user["likes_count"] = json!(likes_count);
    user["is_trusted"] = json!(likes_count >= 4);

    ok(json!({
        "user": user,
        "comments": comments,
        "likes_count": likes_count,
        "has_liked": has_liked,
    }))
}

async fn toggle_like(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Query(q): Query<TokenQuery>,
) -> Reply {
    let mut state = state.lock().unwrap();
    state.hit("like");
    let caller = match state.caller(&q.token) {
        Ok(user) => user,
        Err(reply) => return reply,
    };
    let caller_id = caller["id"].as_str().unwrap_or_default().to_string();
    if caller_id == id {
        return detail(StatusCode::BAD_REQUEST, "Cannot like yourself");
    }
    if state.user_by_id(&id).is_none() {
        return detail(StatusCode::NOT_FOUND, "User not found");
    }

    let key = (caller_id, id.clone());
    let message = if state.likes.remove(&key) {
        "Like removed"
    } else {
        state.likes.insert(key);
        "Like added"
    };
    let likes_count = state.likes_for(&id);
    ok(json!({
        "message": message,
        "likes_count": likes_count,
        "is_trusted": likes_count >= 4,
    }))
}

async fn comment(
    State(state): State<Shared>,
    Query(q): Query<TokenQuery>,
    Json(body): Json<CommentBody>,
) -> Reply {
    let mut state = state.lock().unwrap();
    state.hit("comment");
    let caller = match state.caller(&q.token) {
        Ok(user) => user,
        Err(reply) => return reply,
    };

    let comment = json!({
        "id": uuid::Uuid::new_v4().to_string(),
        "target_user_id": body.target_user_id,
        "commenter_id": caller["id"],
        "commenter_name": format!(
            "{} {}",
            caller["first_name"].as_str().unwrap_or_default(),
            caller["last_name"].as_str().unwrap_or_default()
        ),
        "content": body.content,
        "created_at": now(),
    });
    state.comments.push(comment.clone());
    ok(json!({ "message": "Comment added successfully", "comment": comment }))
}
