use clientes::{
    build_app,
    database::CustomerDatabase,
    get_configuration,
    services::CustomerService,
    telemetry::{generate_subscriber, init_subscriber},
};
use sqlx::postgres::PgPoolOptions;
use std::net::TcpListener;
use std::sync::Arc;

#[actix_rt::main]
async fn main() -> std::io::Result<()> {
    let subscriber = generate_subscriber(
        String::from("clientes"),
        String::from("info"),
        std::io::stdout,
    );
    init_subscriber(subscriber);

    let configuration = get_configuration().expect("failed to read configuration");

    let connection = PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_secs(2))
        .connect_with(configuration.database.with_db())
        .await
        .expect("failed to connect to database");

    let database = CustomerDatabase::new(connection);
    database
        .migrate()
        .await
        .expect("failed to run database migrations");
    let service = CustomerService::new(Arc::new(database));

    let addr = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(addr)?;

    build_app(listener, service, &configuration.application.allowed_origin)?.await
}
