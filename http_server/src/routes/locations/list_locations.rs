use crate::app_container::Application;
use crate::errors::ApiError;
use crate::routes::locations::LocationResponse;
use actix_web::web;
use itertools::Itertools;
use serde::Serialize;

#[derive(Serialize)]
pub(super) struct ListLocationsResponse {
    locations: Vec<LocationResponse>,
    count: usize,
}

#[tracing::instrument(err, skip(app), level = "info")]
pub(super) async fn list_locations(
    app: web::Data<Application>,
) -> Result<web::Json<ListLocationsResponse>, ApiError> {
    let locations = app
        .locations
        .get_all_locations()
        .await?
        .into_iter()
        .map_into()
        .collect_vec();

    Ok(web::Json(ListLocationsResponse {
        count: locations.len(),
        locations,
    }))
}
