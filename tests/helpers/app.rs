use sqlx::PgPool;
use std::net::TcpListener;
use std::sync::Arc;
use uuid::Uuid;

use clientes::{
    build_app,
    database::{CustomerDatabase, CustomerRepository, InMemoryCustomerDatabase},
    get_configuration,
    services::CustomerService,
};

use crate::helpers::{configure_database, TRACING};

pub const ALLOWED_ORIGIN: &str = "http://localhost:4200";

pub struct TestApp {
    pub address: String,
    pub db_pool: Option<PgPool>,
}

impl TestApp {
    pub fn customers_url(&self) -> String {
        format!("{}/api/clientes", self.address)
    }

    pub fn customer_url(&self, id: i64) -> String {
        format!("{}/api/clientes/{}", self.address, id)
    }
}

/// Spawns the server on a random port, backed by a fresh in-memory store
pub async fn spawn_app() -> TestApp {
    spawn_app_with(Arc::new(InMemoryCustomerDatabase::new())).await
}

pub async fn spawn_app_with(repository: Arc<dyn CustomerRepository>) -> TestApp {
    lazy_static::initialize(&TRACING);

    let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let server = build_app(listener, CustomerService::new(repository), ALLOWED_ORIGIN)
        .expect("failed to bind address");
    let _ = tokio::spawn(server);

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        db_pool: None,
    }
}

/// Spawns the server against a newly created, migrated Postgres database
pub async fn spawn_app_with_postgres() -> TestApp {
    let mut configuration = get_configuration().expect("failed to read configuration");
    configuration.set_database_name(Uuid::new_v4().to_string());

    let pool = configure_database(&configuration.database).await;
    let mut app = spawn_app_with(Arc::new(CustomerDatabase::new(pool.clone()))).await;
    app.db_pool = Some(pool);
    app
}
