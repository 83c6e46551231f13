use std::sync::Arc;

use crate::{
    database::{CustomerRepository, TransactionMode},
    models::Customer,
    Result,
};

/// Runs each customer operation in its own transaction against the store
///
/// Read operations use read-only transactions. There are no retries, a
/// failure is returned to the caller as soon as it happens and whatever
/// the transaction did is rolled back.
#[derive(Clone)]
pub struct CustomerService {
    repository: Arc<dyn CustomerRepository>,
}

impl CustomerService {
    pub fn new(repository: Arc<dyn CustomerRepository>) -> Self {
        Self { repository }
    }

    #[tracing::instrument(skip(self), fields(service = "customer"))]
    pub async fn find_all(&self) -> Result<Vec<Customer>> {
        let mut tx = self.repository.begin(TransactionMode::ReadOnly).await?;
        let customers = tx.find_all().await?;
        tx.commit().await?;
        Ok(customers)
    }

    #[tracing::instrument(skip(self), fields(service = "customer"))]
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Customer>> {
        let mut tx = self.repository.begin(TransactionMode::ReadOnly).await?;
        let customer = tx.find_by_id(id).await?;
        tx.commit().await?;
        Ok(customer)
    }

    /// Creates the customer when it has no id, otherwise overwrites the stored
    /// one. An id the store doesn't know about is treated as a new customer
    /// and given a fresh id.
    #[tracing::instrument(skip(self), fields(service = "customer"))]
    pub async fn save(&self, customer: &Customer) -> Result<Customer> {
        let mut tx = self.repository.begin(TransactionMode::ReadWrite).await?;
        let updated = match customer.id {
            Some(id) => tx.update(id, customer).await?,
            None => None,
        };
        let saved = match updated {
            Some(saved) => saved,
            None => tx.insert(customer).await?,
        };
        tx.commit().await?;
        Ok(saved)
    }

    /// Overwrites an existing customer, returning `None` without writing
    /// anything when `id` isn't stored
    #[tracing::instrument(skip(self), fields(service = "customer"))]
    pub async fn update(&self, id: i64, customer: &Customer) -> Result<Option<Customer>> {
        let mut tx = self.repository.begin(TransactionMode::ReadWrite).await?;
        let updated = tx.update(id, customer).await?;
        if updated.is_some() {
            tx.commit().await?;
        }
        Ok(updated)
    }

    #[tracing::instrument(skip(self), fields(service = "customer"))]
    pub async fn delete(&self, id: i64) -> Result<()> {
        let mut tx = self.repository.begin(TransactionMode::ReadWrite).await?;
        tx.delete_by_id(id).await?;
        tx.commit().await
    }
}
