#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use colcalc_db::models::calculation::{Calculation, CreateCalculation};
use colcalc_db::{CalculationStore, MemoryCalculationStore};
use colcalc_monday::models::{ColumnValue, Webhook, WriteConfirmation};
use colcalc_monday::{AccessorFactory, ColumnAccessor, SubscriptionAccessor};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use colcalc_api::auth::session::{sign_session_token, SessionClaims, SessionConfig};
use colcalc_api::config::{MondayConfig, ServerConfig, StoreBackend};
use colcalc_api::router::build_app_router;
use colcalc_api::state::AppState;

pub const SIGNING_SECRET: &str = "integration-test-signing-secret";
pub const SHORT_LIVED_TOKEN: &str = "short-lived-token";
pub const ACCOUNT_ID: &str = "1001";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        session: SessionConfig {
            signing_secret: SIGNING_SECRET.to_string(),
        },
        monday: MondayConfig {
            api_url: "http://127.0.0.1:1/v2".to_string(),
            api_version: "2024-04".to_string(),
            http_timeout_secs: 5,
        },
        store: StoreBackend::Memory,
    }
}

// ---------------------------------------------------------------------------
// Session tokens
// ---------------------------------------------------------------------------

/// A callback session for [`ACCOUNT_ID`] carrying [`SHORT_LIVED_TOKEN`].
pub fn session_token() -> String {
    sign(SessionClaims {
        account_id: Some(ACCOUNT_ID.into()),
        user_id: Some("42".into()),
        short_lived_token: Some(SHORT_LIVED_TOKEN.into()),
        ..Default::default()
    })
}

pub fn sign(claims: SessionClaims) -> String {
    sign_session_token(
        &claims,
        &SessionConfig {
            signing_secret: SIGNING_SECRET.to_string(),
        },
    )
    .unwrap()
}

// ---------------------------------------------------------------------------
// Fake platform
// ---------------------------------------------------------------------------

/// A column write seen by the fake platform.
#[derive(Debug, Clone, PartialEq)]
pub struct Write {
    pub board_id: String,
    pub item_id: String,
    pub column_id: String,
    pub value: String,
}

/// In-process stand-in for the platform API.
#[derive(Default)]
pub struct FakePlatform {
    numbers: HashMap<(String, String), f64>,
    raw: HashMap<(String, String), String>,
    item_boards: HashMap<String, String>,
    board_items: HashMap<String, Vec<String>>,
    item_columns: HashMap<String, Vec<ColumnValue>>,
    fail_writes: AtomicBool,
    fail_subscriptions: AtomicBool,
    calls: AtomicUsize,
    pub writes: Mutex<Vec<Write>>,
    pub deleted: Mutex<Vec<String>>,
    pub tokens: Mutex<Vec<String>>,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_number(mut self, item_id: &str, column_id: &str, value: f64) -> Self {
        self.numbers
            .insert((item_id.into(), column_id.into()), value);
        self
    }

    pub fn with_raw(mut self, item_id: &str, column_id: &str, value: &str) -> Self {
        self.raw
            .insert((item_id.into(), column_id.into()), value.into());
        self
    }

    pub fn with_item_on_board(mut self, item_id: &str, board_id: &str) -> Self {
        self.item_boards.insert(item_id.into(), board_id.into());
        self.board_items
            .entry(board_id.into())
            .or_default()
            .push(item_id.into());
        self
    }

    pub fn with_columns(mut self, item_id: &str, columns: Vec<ColumnValue>) -> Self {
        self.item_columns.insert(item_id.into(), columns);
        self
    }

    pub fn failing_writes(self) -> Self {
        self.fail_writes.store(true, Ordering::SeqCst);
        self
    }

    pub fn failing_subscriptions(self) -> Self {
        self.fail_subscriptions.store(true, Ordering::SeqCst);
        self
    }

    /// Number of accessor calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> Vec<Write> {
        self.writes.lock().unwrap().clone()
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ColumnAccessor for FakePlatform {
    async fn read_column_raw(&self, item_id: &str, column_id: &str) -> Option<String> {
        self.record_call();
        self.raw.get(&(item_id.into(), column_id.into())).cloned()
    }

    async fn read_column_as_number(&self, item_id: &str, column_id: &str) -> Option<f64> {
        self.record_call();
        self.numbers.get(&(item_id.into(), column_id.into())).copied()
    }

    async fn write_column(
        &self,
        board_id: &str,
        item_id: &str,
        column_id: &str,
        value: &str,
    ) -> Option<WriteConfirmation> {
        self.record_call();
        if self.fail_writes.load(Ordering::SeqCst) {
            return None;
        }
        self.writes.lock().unwrap().push(Write {
            board_id: board_id.into(),
            item_id: item_id.into(),
            column_id: column_id.into(),
            value: value.into(),
        });
        Some(WriteConfirmation { id: item_id.into() })
    }

    async fn resolve_board_for_item(&self, item_id: &str) -> Option<String> {
        self.record_call();
        self.item_boards.get(item_id).cloned()
    }

    async fn read_all_columns(&self, item_id: &str) -> Option<Vec<ColumnValue>> {
        self.record_call();
        self.item_columns.get(item_id).cloned()
    }

    async fn first_item_on_board(&self, board_id: &str) -> Option<String> {
        self.record_call();
        self.board_items.get(board_id)?.first().cloned()
    }
}

#[async_trait]
impl SubscriptionAccessor for FakePlatform {
    async fn create_subscription(
        &self,
        _webhook_url: &str,
        _event: &str,
        _board_id: Option<&str>,
        _column_id: Option<&str>,
    ) -> Option<String> {
        self.record_call();
        (!self.fail_subscriptions.load(Ordering::SeqCst)).then(|| "9001".to_string())
    }

    async fn delete_subscription(&self, subscription_id: &str) -> bool {
        self.record_call();
        if self.fail_subscriptions.load(Ordering::SeqCst) {
            return false;
        }
        self.deleted.lock().unwrap().push(subscription_id.into());
        true
    }

    async fn list_subscriptions(&self) -> Option<Vec<Webhook>> {
        self.record_call();
        if self.fail_subscriptions.load(Ordering::SeqCst) {
            return None;
        }
        Some(vec![Webhook {
            id: "9001".into(),
            board_id: Some("10".into()),
            app_id: None,
            url: Some("https://example.com/webhook".into()),
            event: Some("change_column_value".into()),
            config: None,
        }])
    }
}

/// Hands out the shared [`FakePlatform`], recording the tokens it was asked for.
pub struct FakeFactory(pub Arc<FakePlatform>);

impl AccessorFactory for FakeFactory {
    fn columns_for(&self, token: &str) -> Arc<dyn ColumnAccessor> {
        self.0.tokens.lock().unwrap().push(token.into());
        self.0.clone()
    }

    fn subscriptions_for(&self, token: &str) -> Arc<dyn SubscriptionAccessor> {
        self.0.tokens.lock().unwrap().push(token.into());
        self.0.clone()
    }
}

// ---------------------------------------------------------------------------
// Recording store
// ---------------------------------------------------------------------------

/// Memory store that counts calls and can be switched to fail.
#[derive(Default)]
pub struct RecordingStore {
    inner: MemoryCalculationStore,
    fail: AtomicBool,
    calls: AtomicUsize,
}

impl RecordingStore {
    pub fn failing() -> Self {
        let store = Self::default();
        store.fail.store(true, Ordering::SeqCst);
        store
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn rows(&self) -> Vec<Calculation> {
        self.inner.list_page(None, 500, 0).await.unwrap()
    }

    fn check(&self) -> Result<(), sqlx::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(())
    }
}

#[async_trait]
impl CalculationStore for RecordingStore {
    async fn insert(&self, input: &CreateCalculation) -> Result<Calculation, sqlx::Error> {
        self.check()?;
        self.inner.insert(input).await
    }

    async fn list_by_item(&self, item_id: &str, limit: i64) -> Result<Vec<Calculation>, sqlx::Error> {
        self.check()?;
        self.inner.list_by_item(item_id, limit).await
    }

    async fn list_by_board(
        &self,
        board_id: &str,
        limit: i64,
    ) -> Result<Vec<Calculation>, sqlx::Error> {
        self.check()?;
        self.inner.list_by_board(board_id, limit).await
    }

    async fn list_page(
        &self,
        account_id: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Calculation>, sqlx::Error> {
        self.check()?;
        self.inner.list_page(account_id, limit, offset).await
    }

    async fn count(&self, account_id: Option<&str>) -> Result<i64, sqlx::Error> {
        self.check()?;
        self.inner.count(account_id).await
    }
}

// ---------------------------------------------------------------------------
// Test application
// ---------------------------------------------------------------------------

/// The full router over fakes, with handles to inspect them.
pub struct TestApp {
    pub router: Router,
    pub platform: Arc<FakePlatform>,
    pub store: Arc<RecordingStore>,
}

impl TestApp {
    pub fn new(platform: FakePlatform) -> Self {
        Self::with_store(platform, RecordingStore::default())
    }

    pub fn with_store(platform: FakePlatform, store: RecordingStore) -> Self {
        let config = test_config();
        let platform = Arc::new(platform);
        let store = Arc::new(store);
        let state = AppState::new(
            Arc::new(config.clone()),
            store.clone(),
            Arc::new(FakeFactory(platform.clone())),
        );
        Self {
            router: build_app_router(state, &config),
            platform,
            store,
        }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Response<Body> {
        let mut request = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            request = request.header("authorization", token);
        }
        self.send(request.body(Body::empty()).unwrap()).await
    }

    pub async fn post_json(&self, uri: &str, body: Value, token: Option<&str>) -> Response<Body> {
        let mut request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(token) = token {
            request = request.header("authorization", format!("Bearer {token}"));
        }
        self.send(request.body(Body::from(body.to_string())).unwrap())
            .await
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
