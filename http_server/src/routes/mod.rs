mod health;
pub mod locations;
mod nearest;

use crate::errors::ApiError;
use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _| ApiError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _| ApiError::BadRequest(err.to_string()).into()),
    )
    .configure(health::init_routes)
    .service(
        web::scope("/api")
            .configure(locations::init_routes)
            .configure(nearest::init_routes),
    );
}
