use async_trait::async_trait;
use sqlx::{query, query_as, PgPool, Postgres, Transaction};

use crate::{
    database::{CustomerRepository, CustomerTransaction, TransactionMode},
    models::Customer,
    Result, StoreFault,
};

const CUSTOMER_COLUMNS: &str = "id, first_name, last_name, email, created_at, photo";

/// The PostgreSQL backed store
#[derive(Debug, Clone)]
pub struct CustomerDatabase {
    pool: PgPool,
}

impl CustomerDatabase {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies any outstanding migrations from `./migrations`
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl CustomerRepository for CustomerDatabase {
    #[tracing::instrument(skip(self), fields(repository = "customer"))]
    async fn begin(&self, mode: TransactionMode) -> Result<Box<dyn CustomerTransaction>> {
        let mut tx = self.pool.begin().await?;
        if mode == TransactionMode::ReadOnly {
            query("SET TRANSACTION READ ONLY").execute(&mut *tx).await?;
        }
        Ok(Box::new(PgCustomerTransaction { tx }))
    }
}

struct PgCustomerTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl CustomerTransaction for PgCustomerTransaction {
    #[tracing::instrument(skip(self), fields(repository = "customer"))]
    async fn find_all(&mut self) -> Result<Vec<Customer>> {
        let customers = query_as::<_, Customer>(&format!(
            "SELECT {} FROM customers ORDER BY id",
            CUSTOMER_COLUMNS
        ))
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(customers)
    }

    #[tracing::instrument(skip(self), fields(repository = "customer"))]
    async fn find_by_id(&mut self, id: i64) -> Result<Option<Customer>> {
        let customer = query_as::<_, Customer>(&format!(
            "SELECT {} FROM customers WHERE id = $1",
            CUSTOMER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(customer)
    }

    #[tracing::instrument(skip(self), fields(repository = "customer"))]
    async fn insert(&mut self, customer: &Customer) -> Result<Customer> {
        let customer = query_as::<_, Customer>(&format!(
            r#"
            INSERT INTO customers (first_name, last_name, email, created_at, photo)
            VALUES ($1, $2, $3, COALESCE($4, CURRENT_DATE), $5)
            RETURNING {}
            "#,
            CUSTOMER_COLUMNS
        ))
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.email)
        .bind(customer.created_at)
        .bind(&customer.photo)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(customer)
    }

    #[tracing::instrument(skip(self), fields(repository = "customer"))]
    async fn update(&mut self, id: i64, customer: &Customer) -> Result<Option<Customer>> {
        let customer = query_as::<_, Customer>(&format!(
            r#"
            UPDATE customers
            SET first_name = $2,
                last_name = $3,
                email = $4,
                created_at = COALESCE($5, created_at),
                photo = $6
            WHERE id = $1
            RETURNING {}
            "#,
            CUSTOMER_COLUMNS
        ))
        .bind(id)
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.email)
        .bind(customer.created_at)
        .bind(&customer.photo)
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(customer)
    }

    #[tracing::instrument(skip(self), fields(repository = "customer"))]
    async fn delete_by_id(&mut self, id: i64) -> Result<()> {
        let result = query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreFault::missing_entity(id));
        }
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        self.tx.commit().await?;
        Ok(())
    }
}
