mod customer;

pub use customer::Customer;
pub(crate) use customer::violation;
