// universe-client/tests/common/mod.rs
// Scripted in-process backend shared by the integration tests

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use http::StatusCode;
use serde_json::{Value, json};
use universe_client::http::{HttpClient, error_from_status};
use universe_client::{
    Api, ApplicationInput, ClientConfig, ClientError, ClientResult, ClientStore,
    MembershipWorkflow, Role, User,
};

/// Status used to script a transport failure instead of a response
pub const TIMEOUT: u16 = 0;

#[derive(Debug, Clone)]
pub struct Call {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
    pub token: Option<String>,
}

#[derive(Default)]
struct Inner {
    queued: HashMap<(&'static str, String), VecDeque<(u16, Value)>>,
    sticky: HashMap<(&'static str, String), (u16, Value)>,
    calls: Vec<Call>,
    token: Option<String>,
    delay: Option<Duration>,
}

/// Backend double: answers from scripted responses and records every call
#[derive(Clone, Default)]
pub struct MockBackend {
    inner: Arc<Mutex<Inner>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// One-shot response, consumed in order before any sticky response
    pub fn once(&self, method: &'static str, path: &str, status: u16, body: Value) -> &Self {
        self.inner
            .lock()
            .unwrap()
            .queued
            .entry((method, path.to_string()))
            .or_default()
            .push_back((status, body));
        self
    }

    /// Response returned every time once the one-shots run out
    pub fn always(&self, method: &'static str, path: &str, status: u16, body: Value) -> &Self {
        self.inner
            .lock()
            .unwrap()
            .sticky
            .insert((method, path.to_string()), (status, body));
        self
    }

    /// Every request sleeps this long before answering
    pub fn delay(&self, delay: Duration) -> &Self {
        self.inner.lock().unwrap().delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn count(&self, method: &str, path: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.method == method && c.path == path)
            .count()
    }

    pub fn count_prefix(&self, prefix: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.path.starts_with(prefix))
            .count()
    }

    /// Body of the last call to `path`
    pub fn last_body(&self, method: &str, path: &str) -> Option<Value> {
        self.calls()
            .into_iter()
            .rev()
            .find(|c| c.method == method && c.path == path)
            .and_then(|c| c.body)
    }

    async fn respond(&self, method: &'static str, path: &str, body: Option<Value>) -> ClientResult<Value> {
        let (scripted, delay) = {
            let mut inner = self.inner.lock().unwrap();
            let token = inner.token.clone();
            inner.calls.push(Call {
                method,
                path: path.to_string(),
                body,
                token,
            });
            let key = (method, path.to_string());
            let scripted = inner
                .queued
                .get_mut(&key)
                .and_then(VecDeque::pop_front)
                .or_else(|| inner.sticky.get(&key).cloned());
            (scripted, inner.delay)
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let (status, body) = scripted.unwrap_or((
            404,
            json!({"success": false, "message": format!("No route for {} {}", method, path)}),
        ));
        if status == TIMEOUT {
            return Err(ClientError::Timeout);
        }
        let status = StatusCode::from_u16(status).unwrap();
        if status.is_success() {
            Ok(body)
        } else {
            Err(error_from_status(status, &body.to_string()))
        }
    }
}

#[async_trait]
impl HttpClient for MockBackend {
    async fn get(&self, path: &str) -> ClientResult<Value> {
        self.respond("GET", path, None).await
    }

    async fn post(&self, path: &str, body: &Value) -> ClientResult<Value> {
        self.respond("POST", path, Some(body.clone())).await
    }

    async fn post_empty(&self, path: &str) -> ClientResult<Value> {
        self.respond("POST", path, None).await
    }

    async fn put(&self, path: &str, body: &Value) -> ClientResult<Value> {
        self.respond("PUT", path, Some(body.clone())).await
    }

    async fn delete(&self, path: &str) -> ClientResult<Value> {
        self.respond("DELETE", path, None).await
    }

    fn set_token(&self, token: Option<String>) {
        self.inner.lock().unwrap().token = token;
    }

    fn token(&self) -> Option<String> {
        self.inner.lock().unwrap().token.clone()
    }
}

// ========== Fixtures ==========

pub const USER_ID: i64 = 7;
pub const CLUB_ID: i64 = 3;
pub const PAYMENT_ID: i64 = 42;
pub const SESSION_ID: &str = "cs_test_a1B2";

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

pub fn user_json(id: i64, role: &str) -> Value {
    json!({
        "id": id,
        "email": "ana@uni.lk",
        "firstName": "Ana",
        "lastName": "Perera",
        "role": role
    })
}

pub fn student() -> User {
    User {
        id: USER_ID,
        email: "ana@uni.lk".into(),
        first_name: "Ana".into(),
        last_name: "Perera".into(),
        role: Role::Student,
    }
}

pub fn club_json(fee: Option<f64>) -> Value {
    json!({
        "id": CLUB_ID,
        "name": "Photography Society",
        "description": "Weekly photo walks",
        "logoUrl": null,
        "adminId": 2,
        "membershipFee": fee
    })
}

pub fn payment_json(status: &str) -> Value {
    json!({
        "id": PAYMENT_ID,
        "userId": USER_ID,
        "clubId": CLUB_ID,
        "amount": 1500.0,
        "currency": "LKR",
        "status": status,
        "stripeSessionId": SESSION_ID,
        "createdAt": "2026-10-19T10:00:00"
    })
}

pub fn membership_json(id: i64) -> Value {
    json!({
        "id": id,
        "userId": USER_ID,
        "clubId": CLUB_ID,
        "status": "ACTIVE",
        "fullName": "Ana Perera",
        "skillsJson": "[\"Leadership\",\"Photography\"]",
        "joinedAt": "2026-10-19T10:05:00"
    })
}

pub fn valid_input() -> ApplicationInput {
    ApplicationInput {
        full_name: "Ana Perera".into(),
        address: "12 Lake Road, Kandy".into(),
        contact_number: "0771234567".into(),
        birthday: "2003-05-01".into(),
        faculty: "Faculty of Science".into(),
        year: "2nd Year".into(),
        skills: vec!["Leadership".into(), "Photography".into()],
    }
}

pub fn config() -> ClientConfig {
    ClientConfig::default().with_confirm_budget(
        3,
        Duration::from_millis(500),
        Duration::from_secs(10),
    )
}

pub fn workflow_with(backend: &MockBackend, store: ClientStore) -> MembershipWorkflow {
    let api = Api::new(Arc::new(backend.clone()));
    MembershipWorkflow::new(api, store, config()).with_today(today)
}

pub fn workflow(backend: &MockBackend) -> MembershipWorkflow {
    workflow_with(backend, ClientStore::open_in_memory().unwrap())
}

/// Script a checkout session for the paid club
pub fn script_checkout(backend: &MockBackend) {
    backend.once(
        "POST",
        "payments/create-checkout-session",
        200,
        json!({
            "sessionId": SESSION_ID,
            "sessionUrl": "https://checkout.stripe.com/c/pay/cs_test_a1B2",
            "paymentId": PAYMENT_ID,
            "message": "Checkout session created"
        }),
    );
}

pub fn success_redirect() -> String {
    format!("http://localhost:5173/payment/success?session_id={}", SESSION_ID)
}

pub fn cancel_redirect() -> String {
    format!("http://localhost:5173/payment/cancel?session_id={}", SESSION_ID)
}
