use actix_web::web;
use chrono::{DateTime, Utc};
use locations::Location;
use serde::Serialize;

mod create_location;
mod delete_location;
mod get_location;
mod list_locations;

#[derive(Serialize, Debug)]
pub(crate) struct LocationResponse {
    id: String,
    name: String,
    latitude: f64,
    longitude: f64,
    created_at: DateTime<Utc>,
}

impl From<Location> for LocationResponse {
    fn from(value: Location) -> Self {
        Self {
            id: value.id.inner(),
            name: value.name.inner(),
            latitude: value.coordinate.latitude(),
            longitude: value.coordinate.longitude(),
            created_at: value.created_at,
        }
    }
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/locations")
            .service(
                web::resource("")
                    .route(web::post().to(create_location::create_location))
                    .route(web::get().to(list_locations::list_locations)),
            )
            .service(
                web::resource("/{name}")
                    .route(web::get().to(get_location::get_location))
                    .route(web::delete().to(delete_location::delete_location)),
            ),
    );
}
