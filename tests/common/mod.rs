#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use chrono::{NaiveDate, Utc};
use creativebook::{
    config::AppConfig,
    db,
    mail::{InMemoryMailer, Mailer},
    models::{
        booking, creative_profile, industry_category, order, product, sub_category, user,
        BookingStatus, OrderStatus, UserRole,
    },
    AppState,
};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

/// Application backed by a fresh SQLite file in a temporary directory.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    pub outbox: InMemoryMailer,
    _dir: TempDir,
}

pub fn test_config(dir: &Path) -> AppConfig {
    let mut cfg = AppConfig::new(
        format!("sqlite://{}?mode=rwc", dir.join("test.sqlite").display()),
        "127.0.0.1".to_string(),
        18_000,
        "test".to_string(),
    );
    cfg.db_max_connections = 1;
    cfg.db_min_connections = 1;
    cfg.media_root = dir.join("media");
    cfg.default_from_email = "noreply@creativebook.test".to_string();
    cfg.email.backend = "memory".to_string();
    cfg
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Builds the app after letting `configure` adjust the test configuration.
    pub async fn with_config(configure: impl FnOnce(&mut AppConfig)) -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let mut cfg = test_config(dir.path());
        configure(&mut cfg);

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let outbox = InMemoryMailer::new();
        let mailer: Arc<dyn Mailer> = Arc::new(outbox.clone());
        let state = AppState::new(Arc::new(pool), cfg, mailer);
        let router = creativebook::app(state.clone());

        Self {
            router,
            state,
            outbox,
            _dir: dir,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.state.db
    }

    pub async fn request(&self, method: Method, uri: &str) -> axum::response::Response {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    pub async fn get(&self, uri: &str) -> axum::response::Response {
        self.request(Method::GET, uri).await
    }

    /// GETs `uri` and parses the JSON body, asserting the status first.
    pub async fn get_json(&self, uri: &str, expected: StatusCode) -> Value {
        let response = self.get(uri).await;
        assert_eq!(response.status(), expected, "unexpected status for {uri}");
        response_json(response).await
    }

    pub async fn seed_user(&self, username: &str, role: UserRole) -> user::Model {
        user::ActiveModel {
            username: Set(username.to_string()),
            email: Set(format!("{}@example.com", username.to_lowercase())),
            role: Set(role),
            phone_number: Set(None),
            date_joined: Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db())
        .await
        .expect("failed to seed user")
    }

    pub async fn seed_sub_category(&self, industry: &str, name: &str) -> sub_category::Model {
        let industry = industry_category::ActiveModel {
            name: Set(industry.to_string()),
            icon_code: Set(industry.to_lowercase()),
            ..Default::default()
        }
        .insert(self.db())
        .await
        .expect("failed to seed industry");

        sub_category::ActiveModel {
            name: Set(name.to_string()),
            industry_id: Set(industry.id),
            ..Default::default()
        }
        .insert(self.db())
        .await
        .expect("failed to seed sub category")
    }

    /// Creates a creative user with a profile.
    pub async fn seed_creative(
        &self,
        username: &str,
        sub_category_id: Option<i32>,
        is_verified: bool,
    ) -> creative_profile::Model {
        let user = self.seed_user(username, UserRole::Creative).await;
        creative_profile::ActiveModel {
            user_id: Set(user.id),
            sub_category_id: Set(sub_category_id),
            hourly_rate: Set(Decimal::new(4500, 2)),
            rating: Set(Decimal::new(450, 2)),
            is_verified: Set(is_verified),
            ..Default::default()
        }
        .insert(self.db())
        .await
        .expect("failed to seed creative profile")
    }

    pub async fn seed_product(&self, name: &str, creative_id: i32) -> product::Model {
        product::ActiveModel {
            name: Set(name.to_string()),
            creative_id: Set(creative_id),
            price: Set(Decimal::new(1250, 2)),
            stock: Set(10),
            image_url: Set(None),
            ..Default::default()
        }
        .insert(self.db())
        .await
        .expect("failed to seed product")
    }

    pub async fn seed_booking(
        &self,
        client_id: i32,
        creative_id: i32,
        date: NaiveDate,
        status: BookingStatus,
    ) -> booking::Model {
        booking::ActiveModel {
            client_id: Set(client_id),
            creative_id: Set(creative_id),
            booking_date: Set(date),
            status: Set(status),
            ..Default::default()
        }
        .insert(self.db())
        .await
        .expect("failed to seed booking")
    }

    pub async fn seed_order(
        &self,
        client_id: i32,
        product_id: i32,
        status: OrderStatus,
    ) -> order::Model {
        order::ActiveModel {
            client_id: Set(client_id),
            product_id: Set(product_id),
            quantity: Set(1),
            total_price: Set(Decimal::new(1250, 2)),
            status: Set(status),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db())
        .await
        .expect("failed to seed order")
    }
}

pub async fn response_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    serde_json::from_slice(&bytes).expect("response body is not JSON")
}

/// Primary keys of the changelist rows, in response order.
pub fn row_ids(changelist: &Value) -> Vec<i64> {
    changelist["rows"]
        .as_array()
        .expect("rows array")
        .iter()
        .map(|row| row["pk"].as_i64().expect("row pk"))
        .collect()
}
