use actix_cors::Cors;
use actix_web::{dev::Server, http::header, web, App, HttpServer};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

use crate::{
    routes::{customers, health_check},
    services::CustomerService,
};

/// How long browsers may cache the answer to a preflight request
const CORS_MAX_AGE_SECONDS: usize = 3600;

pub fn build_app(
    listener: TcpListener,
    service: CustomerService,
    allowed_origin: &str,
) -> Result<Server, std::io::Error> {
    let service = web::Data::new(service);
    let allowed_origin = allowed_origin.to_owned();

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(
                Cors::default()
                    .allowed_origin(&allowed_origin)
                    .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
                    .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
                    .max_age(CORS_MAX_AGE_SECONDS),
            )
            .app_data(service.clone())
            .route("/health_check", web::get().to(health_check))
            .configure(customers::configure)
    })
    .listen(listener)?
    .run();

    Ok(server)
}
