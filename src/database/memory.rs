use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::{
    database::{CustomerRepository, CustomerTransaction, TransactionMode},
    models::Customer,
    Result, StoreFault,
};

const EMAIL_CONSTRAINT: &str = "customers_email_key";

#[derive(Debug, Clone, Default)]
struct Tables {
    last_id: i64,
    customers: BTreeMap<i64, Customer>,
}

/// A store that lives only as long as the process
///
/// Transactions run one at a time against a private copy of the data which
/// replaces the shared copy on commit. Emails are unique, as they are in
/// the `customers` table.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCustomerDatabase {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryCustomerDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerDatabase {
    #[tracing::instrument(skip(self), fields(repository = "customer"))]
    async fn begin(&self, mode: TransactionMode) -> Result<Box<dyn CustomerTransaction>> {
        let guard = Arc::clone(&self.tables).lock_owned().await;
        let working = guard.clone();
        Ok(Box::new(InMemoryTransaction {
            mode,
            guard,
            working,
        }))
    }
}

struct InMemoryTransaction {
    mode: TransactionMode,
    guard: OwnedMutexGuard<Tables>,
    working: Tables,
}

impl InMemoryTransaction {
    fn ensure_writable(&self, statement: &str) -> Result<()> {
        if self.mode == TransactionMode::ReadOnly {
            let cause = format!("cannot execute {} in a read-only transaction", statement);
            return Err(StoreFault::new(
                format!("error returned from database: {}", cause),
                cause,
            ));
        }
        Ok(())
    }

    fn ensure_unique_email(&self, id: Option<i64>, email: &str) -> Result<()> {
        let taken = self
            .working
            .customers
            .values()
            .any(|existing| existing.email == email && existing.id != id);
        if taken {
            let cause = format!(
                "duplicate key value violates unique constraint \"{}\"",
                EMAIL_CONSTRAINT
            );
            return Err(StoreFault::new(
                format!("error returned from database: {}", cause),
                cause,
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl CustomerTransaction for InMemoryTransaction {
    async fn find_all(&mut self) -> Result<Vec<Customer>> {
        Ok(self.working.customers.values().cloned().collect())
    }

    async fn find_by_id(&mut self, id: i64) -> Result<Option<Customer>> {
        Ok(self.working.customers.get(&id).cloned())
    }

    async fn insert(&mut self, customer: &Customer) -> Result<Customer> {
        self.ensure_writable("INSERT")?;
        self.ensure_unique_email(None, &customer.email)?;

        self.working.last_id += 1;
        let id = self.working.last_id;
        let stored = Customer {
            id: Some(id),
            created_at: customer
                .created_at
                .or_else(|| Some(Utc::now().date_naive())),
            ..customer.clone()
        };
        self.working.customers.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&mut self, id: i64, customer: &Customer) -> Result<Option<Customer>> {
        self.ensure_writable("UPDATE")?;
        let created_at = match self.working.customers.get(&id) {
            Some(existing) => customer.created_at.or(existing.created_at),
            None => return Ok(None),
        };
        self.ensure_unique_email(Some(id), &customer.email)?;

        let stored = Customer {
            id: Some(id),
            created_at,
            ..customer.clone()
        };
        self.working.customers.insert(id, stored.clone());
        Ok(Some(stored))
    }

    async fn delete_by_id(&mut self, id: i64) -> Result<()> {
        self.ensure_writable("DELETE")?;
        match self.working.customers.remove(&id) {
            Some(_) => Ok(()),
            None => Err(StoreFault::missing_entity(id)),
        }
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        let InMemoryTransaction {
            mut guard, working, ..
        } = *self;
        *guard = working;
        Ok(())
    }
}
