use crate::entities::{Coordinate, Location, LocationName, NearestLocation, NewLocation};
use crate::store::{LocationStore, StoreResult};
use std::sync::Arc;

/// Entry point for callers outside the crate: validates raw input and hands it
/// to whichever store was configured at startup.
#[derive(Clone)]
pub struct LocationInteractor {
    store: Arc<dyn LocationStore>,
}

impl LocationInteractor {
    pub fn new(store: Arc<dyn LocationStore>) -> Self {
        Self { store }
    }

    #[tracing::instrument(err, skip(self), level = "info")]
    pub async fn create_location(
        &self,
        name: String,
        latitude: f64,
        longitude: f64,
    ) -> StoreResult<Location> {
        let location = NewLocation::new(name, latitude, longitude)?;
        let location = self.store.save(location).await?;
        tracing::info!(id = %location.id, "Created location {location}");
        Ok(location)
    }

    #[tracing::instrument(err, skip(self), level = "info")]
    pub async fn get_location(&self, name: String) -> StoreResult<Location> {
        let name = LocationName::parse(name)?;
        self.store.find_by_name(&name).await
    }

    #[tracing::instrument(err, skip(self), level = "info")]
    pub async fn get_all_locations(&self) -> StoreResult<Vec<Location>> {
        self.store.find_all().await
    }

    #[tracing::instrument(err, skip(self), level = "info")]
    pub async fn delete_location(&self, name: String) -> StoreResult<()> {
        let name = LocationName::parse(name)?;
        self.store.delete(&name).await
    }

    #[tracing::instrument(err, skip(self), level = "info")]
    pub async fn find_nearest(&self, latitude: f64, longitude: f64) -> StoreResult<NearestLocation> {
        let query = Coordinate::new(latitude, longitude)?;
        self.store.find_nearest(query).await
    }
}
