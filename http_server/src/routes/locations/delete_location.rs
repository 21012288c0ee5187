use crate::app_container::Application;
use crate::errors::ApiError;
use actix_web::{web, HttpResponse};

#[tracing::instrument(err, skip(app), level = "info")]
pub(super) async fn delete_location(
    name: web::Path<String>,
    app: web::Data<Application>,
) -> Result<HttpResponse, ApiError> {
    app.locations.delete_location(name.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
