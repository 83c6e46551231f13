#![allow(dead_code)]
mod app;
mod database;
mod reqwest;

pub use self::reqwest::*;
pub use app::{spawn_app, spawn_app_with, spawn_app_with_postgres, TestApp, ALLOWED_ORIGIN};
pub use database::configure_database;

use lazy_static::lazy_static;
use serde_json::{json, Value};

use clientes::telemetry::{generate_subscriber, init_subscriber};

lazy_static! {
    /// To ensure logs are only outputted in tests when required, by default
    /// tests run with no logs being captured
    ///
    /// In order to set logs to be captured during tests run them with:
    /// `TEST_LOG=true cargo test | bunyan`
    pub static ref TRACING: () = {
        if std::env::var("TEST_LOG").is_ok() {
            init_subscriber(generate_subscriber("test".into(), "debug".into(), std::io::stdout));
        } else {
            init_subscriber(generate_subscriber("test".into(), "info".into(), std::io::sink));
        }
    };
}

pub fn customer_body(first_name: &str, last_name: &str, email: &str) -> Value {
    json!({
        "firstName": first_name,
        "lastName": last_name,
        "email": email,
    })
}
