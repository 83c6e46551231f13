pub mod configuration;
pub mod database;
mod error;
pub mod models;
pub mod routes;
pub mod services;
mod startup;
pub mod telemetry;

pub use configuration::get_configuration;
pub use error::{ApiError, StoreFault};
pub use startup::build_app;

pub type Result<T, E = StoreFault> = std::result::Result<T, E>;
