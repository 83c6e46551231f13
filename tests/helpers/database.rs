use sqlx::{Connection, Executor, PgConnection, PgPool};

use clientes::{configuration::DatabaseSettings, database::CustomerDatabase};

pub async fn configure_database(config: &DatabaseSettings) -> PgPool {
    let mut connection = PgConnection::connect_with(&config.without_db())
        .await
        .expect("failed to connect to database");
    connection
        .execute(format!(r#"CREATE DATABASE "{}";"#, config.database_name).as_str())
        .await
        .expect("failed to create database");

    let pool = PgPool::connect_with(config.with_db())
        .await
        .expect("failed to connect to database");
    CustomerDatabase::new(pool.clone())
        .migrate()
        .await
        .expect("failed to run database migrations");
    pool
}
