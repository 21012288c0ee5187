use crate::app_container::Application;
use crate::errors::ApiError;
use crate::routes::locations::LocationResponse;
use actix_web::web;
use locations::NearestLocation;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug)]
struct Request {
    lat: f64,
    lng: f64,
}

#[derive(Serialize)]
struct NearestLocationResponse {
    location: LocationResponse,
    distance_km: f64,
    distance_miles: f64,
}

impl From<NearestLocation> for NearestLocationResponse {
    fn from(value: NearestLocation) -> Self {
        Self {
            distance_miles: value.distance_miles(),
            distance_km: value.distance_km,
            location: value.location.into(),
        }
    }
}

#[tracing::instrument(err, skip(app), level = "info")]
async fn find_nearest(
    query: web::Query<Request>,
    app: web::Data<Application>,
) -> Result<web::Json<NearestLocationResponse>, ApiError> {
    let nearest = app.locations.find_nearest(query.lat, query.lng).await?;
    Ok(web::Json(nearest.into()))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/nearest").route(web::get().to(find_nearest)));
}
