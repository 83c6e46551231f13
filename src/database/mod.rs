use async_trait::async_trait;

use crate::{models::Customer, Result};

mod customer;
mod memory;

pub use customer::CustomerDatabase;
pub use memory::InMemoryCustomerDatabase;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionMode {
    ReadOnly,
    ReadWrite,
}

/// A store of customers which hands out one transaction per unit of work
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn begin(&self, mode: TransactionMode) -> Result<Box<dyn CustomerTransaction>>;
}

/// Operations available inside an open transaction
///
/// Nothing is made durable until `commit` is called, dropping the
/// transaction rolls it back.
#[async_trait]
pub trait CustomerTransaction: Send {
    /// Every customer, ordered by id
    async fn find_all(&mut self) -> Result<Vec<Customer>>;

    async fn find_by_id(&mut self, id: i64) -> Result<Option<Customer>>;

    /// Stores a new customer, ignoring any id on `customer`. The created
    /// date defaults to today
    async fn insert(&mut self, customer: &Customer) -> Result<Customer>;

    /// Overwrites the customer with `id`, keeping the stored created date when
    /// `customer` has none. Returns `None` when there's no such customer
    async fn update(&mut self, id: i64, customer: &Customer) -> Result<Option<Customer>>;

    /// Fails when there's no customer with `id`
    async fn delete_by_id(&mut self, id: i64) -> Result<()>;

    async fn commit(self: Box<Self>) -> Result<()>;
}
