use crate::app_container::Application;
use crate::errors::ApiError;
use crate::routes::locations::LocationResponse;
use actix_web::web;

#[tracing::instrument(err, skip(app), level = "info")]
pub(super) async fn get_location(
    name: web::Path<String>,
    app: web::Data<Application>,
) -> Result<web::Json<LocationResponse>, ApiError> {
    let location = app.locations.get_location(name.into_inner()).await?;
    Ok(web::Json(location.into()))
}
