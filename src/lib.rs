//! CreativeBook backend
//!
//! Marketplace backend for creative professionals: a read-only admin site
//! over the marketplace models, an API application mounted under `/api/`,
//! debug-only media serving and one-time-passcode email delivery.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod admin;
pub mod api;
pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod mail;
pub mod middleware_helpers;
pub mod migrator;
pub mod models;
pub mod routes;
pub mod tracing;

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::mail::{Mailer, OtpMailer};

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub mailer: Arc<dyn Mailer>,
    pub otp: OtpMailer,
}

impl AppState {
    /// Wires the OTP mailer to `mailer` using the configured sender address.
    pub fn new(db: Arc<DatabaseConnection>, config: config::AppConfig, mailer: Arc<dyn Mailer>) -> Self {
        let otp = OtpMailer::from_config(mailer.clone(), &config);
        Self {
            db,
            config,
            mailer,
            otp,
        }
    }
}

/// Builds the full application router for `state`.
pub fn app(state: AppState) -> axum::Router {
    routes::build_router(state, api::api_routes())
}
