use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::{
    error::{json_error_handler, path_error_handler},
    models::{violation, Customer},
    services::CustomerService,
    ApiError,
};

const QUERY_FAILED: &str = "Error while querying the database";
const CREATE_FAILED: &str = "Error while creating the customer";
const UPDATE_FAILED: &str = "Error while updating the customer";
const DELETE_FAILED: &str = "Error while deleting the customer";

#[derive(Debug, Serialize)]
struct Saved {
    mensaje: &'static str,
    cliente: Customer,
}

#[derive(Debug, Serialize)]
struct Message {
    mensaje: &'static str,
}

/// Registers the `/api/clientes` resources along with the extractor
/// configuration that turns undecodable input into `400`s
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .service(
            web::resource("/api/clientes")
                .route(web::get().to(index))
                .route(web::post().to(create))
                .route(web::put().to(update)),
        )
        .service(
            web::resource("/api/clientes/{id}")
                .route(web::get().to(show))
                .route(web::delete().to(delete)),
        );
}

#[tracing::instrument(name = "list_customers", skip(service))]
pub async fn index(service: web::Data<CustomerService>) -> Result<HttpResponse, ApiError> {
    let customers = service
        .find_all()
        .await
        .map_err(ApiError::store(QUERY_FAILED))?;
    Ok(HttpResponse::Ok().json(customers))
}

#[tracing::instrument(name = "get_customer", skip(service))]
pub async fn show(
    service: web::Data<CustomerService>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    match service
        .find_by_id(id)
        .await
        .map_err(ApiError::store(QUERY_FAILED))?
    {
        Some(customer) => Ok(HttpResponse::Ok().json(customer)),
        None => Err(ApiError::not_found(format!(
            "Customer with id: {} does not exist in the database",
            id
        ))),
    }
}

/// Always creates a new customer, any `id` on the body is ignored
#[tracing::instrument(name = "create_customer", skip(service))]
pub async fn create(
    service: web::Data<CustomerService>,
    body: web::Json<Customer>,
) -> Result<HttpResponse, ApiError> {
    let customer = Customer {
        id: None,
        ..body.into_inner()
    };
    customer
        .validate_fields()
        .map_err(|errors| ApiError::validation(CREATE_FAILED, errors))?;

    let cliente = service
        .save(&customer)
        .await
        .map_err(ApiError::store(CREATE_FAILED))?;
    Ok(HttpResponse::Created().json(Saved {
        mensaje: "Customer created successfully",
        cliente,
    }))
}

/// Overwrites the customer named by the body's `id`
#[tracing::instrument(name = "update_customer", skip(service))]
pub async fn update(
    service: web::Data<CustomerService>,
    body: web::Json<Customer>,
) -> Result<HttpResponse, ApiError> {
    let customer = body.into_inner();
    let id = match (customer.id, customer.validate_fields()) {
        (Some(id), Ok(())) => id,
        (id, result) => {
            let mut errors = result.err().unwrap_or_default();
            if id.is_none() {
                errors.insert(0, violation("id", "must not be empty"));
            }
            return Err(ApiError::validation(UPDATE_FAILED, errors));
        }
    };

    match service
        .update(id, &customer)
        .await
        .map_err(ApiError::store(UPDATE_FAILED))?
    {
        Some(cliente) => Ok(HttpResponse::Created().json(Saved {
            mensaje: "Customer updated successfully",
            cliente,
        })),
        None => Err(ApiError::not_found(format!(
            "{}, no customer exists with id: {}",
            UPDATE_FAILED, id
        ))),
    }
}

#[tracing::instrument(name = "delete_customer", skip(service))]
pub async fn delete(
    service: web::Data<CustomerService>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    service
        .delete(id.into_inner())
        .await
        .map_err(ApiError::store(DELETE_FAILED))?;
    Ok(HttpResponse::Ok().json(Message {
        mensaje: "Customer deleted successfully",
    }))
}
