use crate::app_container::Application;
use crate::errors::ApiError;
use crate::routes::locations::LocationResponse;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub(super) struct Request {
    name: String,
    latitude: f64,
    longitude: f64,
}

#[tracing::instrument(err, skip(app), level = "info")]
pub(super) async fn create_location(
    data: web::Json<Request>,
    app: web::Data<Application>,
) -> Result<HttpResponse, ApiError> {
    let Request {
        name,
        latitude,
        longitude,
    } = data.into_inner();
    let location = app
        .locations
        .create_location(name, latitude, longitude)
        .await?;

    Ok(HttpResponse::Created().json(LocationResponse::from(location)))
}
