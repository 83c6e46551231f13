pub mod customers;
mod health_check;

pub use health_check::health_check;
