use actix_web::{
    error::{JsonPayloadError, PathError},
    http::StatusCode,
    HttpRequest, HttpResponse, ResponseError,
};
use serde_json::json;
use std::error::Error as StdError;
use thiserror::Error;
use tracing::error;

/// Any failure coming out of the persistence layer
///
/// `message` is the failure as reported by the store, `cause` is the most
/// specific error underneath it (the failure itself when it has no source)
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{message}: {cause}")]
pub struct StoreFault {
    pub message: String,
    pub cause: String,
}

impl StoreFault {
    pub fn new(message: impl Into<String>, cause: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: cause.into(),
        }
    }

    /// Raised when a delete finds nothing to remove
    pub fn missing_entity(id: i64) -> Self {
        let message = format!("no customer entity with id {} exists", id);
        Self::new(message.clone(), message)
    }

    pub fn from_error(err: &(dyn StdError + 'static)) -> Self {
        let mut root = err;
        while let Some(source) = root.source() {
            root = source;
        }
        Self::new(err.to_string(), root.to_string())
    }
}

impl From<sqlx::Error> for StoreFault {
    fn from(e: sqlx::Error) -> StoreFault {
        error!(err = ?e, "SQLx error occurred");
        StoreFault::from_error(&e)
    }
}

impl From<sqlx::migrate::MigrateError> for StoreFault {
    fn from(e: sqlx::migrate::MigrateError) -> StoreFault {
        error!(err = ?e, "database migration failed");
        StoreFault::from_error(&e)
    }
}

/// Errors returned by the HTTP handlers, each carrying the `mensaje`
/// shown to the client
#[derive(Debug, Error, PartialEq)]
pub enum ApiError {
    #[error("{mensaje}")]
    Validation {
        mensaje: String,
        errors: Vec<String>,
    },

    #[error("{mensaje}")]
    NotFound { mensaje: String },

    #[error("{mensaje}: {fault}")]
    Store { mensaje: String, fault: StoreFault },
}

impl ApiError {
    pub fn validation(mensaje: impl Into<String>, errors: Vec<String>) -> Self {
        Self::Validation {
            mensaje: mensaje.into(),
            errors,
        }
    }

    pub fn not_found(mensaje: impl Into<String>) -> Self {
        Self::NotFound {
            mensaje: mensaje.into(),
        }
    }

    /// Returns a closure for `map_err` which attaches `mensaje` to a store fault
    pub fn store(mensaje: &'static str) -> impl FnOnce(StoreFault) -> Self {
        move |fault| Self::Store {
            mensaje: mensaje.to_owned(),
            fault,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            Self::Validation { mensaje, errors } => json!({
                "mensaje": mensaje,
                "errors": errors,
            }),
            Self::NotFound { mensaje } => json!({ "mensaje": mensaje }),
            Self::Store { mensaje, fault } => json!({
                "mensaje": mensaje,
                "error": fault.to_string(),
            }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

pub(crate) const INVALID_REQUEST: &str = "Invalid request";

/// Bodies that can't be decoded are reported the same way as failed validation
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::validation(INVALID_REQUEST, vec![err.to_string()]).into()
}

pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::validation(INVALID_REQUEST, vec![err.to_string()]).into()
}
