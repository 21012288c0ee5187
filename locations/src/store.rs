use crate::entities::{Coordinate, Location, LocationId, LocationName, NearestLocation, NewLocation};
use crate::errors::LocationStoreError;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

pub type StoreResult<T> = Result<T, LocationStoreError>;

/// Operations every location backend supports.
///
/// Names are the business key: lookups and deletes go through the name, ids are
/// assigned by the backend on `save` and never change afterwards.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait LocationStore: Send + Sync {
    /// Fails with [`LocationStoreError::AlreadyExists`] if the name is taken.
    async fn save(&self, location: NewLocation) -> StoreResult<Location>;

    async fn find_by_name(&self, name: &LocationName) -> StoreResult<Location>;

    async fn find_by_id(&self, id: &LocationId) -> StoreResult<Location>;

    async fn find_all(&self) -> StoreResult<Vec<Location>>;

    async fn delete(&self, name: &LocationName) -> StoreResult<()>;

    /// Closest stored location to `query`, [`LocationStoreError::NotFound`] when
    /// nothing is stored. Ties are settled deterministically by each backend.
    async fn find_nearest(&self, query: Coordinate) -> StoreResult<NearestLocation>;
}
