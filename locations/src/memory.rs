use crate::distance::distance_km;
use crate::entities::{Coordinate, Location, LocationId, LocationName, NearestLocation, NewLocation};
use crate::errors::LocationStoreError;
use crate::store::{LocationStore, StoreResult};
use anyhow::anyhow;
use async_trait::async_trait;
use chrono::Utc;
use itertools::Itertools;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Locations {
    by_name: BTreeMap<LocationName, Arc<Location>>,
    by_id: HashMap<LocationId, Arc<Location>>,
    last_id: u64,
}

impl Locations {
    fn next_id(&mut self) -> LocationId {
        self.last_id += 1;
        LocationId::from(self.last_id)
    }
}

/// Process-local store, nearest-neighbor queries scan every location.
///
/// Both indexes live behind one lock so readers never observe one of them
/// without the other.
#[derive(Default)]
pub struct InMemoryLocationStore {
    locations: RwLock<Locations>,
}

impl InMemoryLocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Locations>> {
        self.locations
            .read()
            .map_err(|_| LocationStoreError::Internal(anyhow!("location store lock poisoned")))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Locations>> {
        self.locations
            .write()
            .map_err(|_| LocationStoreError::Internal(anyhow!("location store lock poisoned")))
    }
}

#[async_trait]
impl LocationStore for InMemoryLocationStore {
    #[tracing::instrument(err, skip(self), level = "debug")]
    async fn save(&self, location: NewLocation) -> StoreResult<Location> {
        let mut locations = self.write()?;
        if locations.by_name.contains_key(&location.name) {
            return Err(LocationStoreError::AlreadyExists(location.name.inner()));
        }

        let id = locations.next_id();
        let location = Arc::new(Location::from_new(location, id, Utc::now()));
        locations
            .by_name
            .insert(location.name.clone(), Arc::clone(&location));
        locations
            .by_id
            .insert(location.id.clone(), Arc::clone(&location));

        Ok(location.as_ref().clone())
    }

    async fn find_by_name(&self, name: &LocationName) -> StoreResult<Location> {
        self.read()?
            .by_name
            .get(name)
            .map(|location| location.as_ref().clone())
            .ok_or_else(|| LocationStoreError::NotFound(name.inner()))
    }

    async fn find_by_id(&self, id: &LocationId) -> StoreResult<Location> {
        self.read()?
            .by_id
            .get(id)
            .map(|location| location.as_ref().clone())
            .ok_or_else(|| LocationStoreError::NotFound(id.inner()))
    }

    async fn find_all(&self) -> StoreResult<Vec<Location>> {
        Ok(self
            .read()?
            .by_name
            .values()
            .map(|location| location.as_ref().clone())
            .collect_vec())
    }

    #[tracing::instrument(err, skip(self), level = "debug")]
    async fn delete(&self, name: &LocationName) -> StoreResult<()> {
        let mut locations = self.write()?;
        let removed = locations
            .by_name
            .remove(name)
            .ok_or_else(|| LocationStoreError::NotFound(name.inner()))?;
        locations.by_id.remove(&removed.id);
        Ok(())
    }

    async fn find_nearest(&self, query: Coordinate) -> StoreResult<NearestLocation> {
        let locations = self.read()?;
        if locations.by_name.is_empty() {
            return Err(LocationStoreError::empty_store());
        }

        // strict comparison keeps the first minimum, i.e. the smallest name
        let mut nearest: Option<(&Arc<Location>, f64)> = None;
        for location in locations.by_name.values() {
            let distance = distance_km(query, location.coordinate);
            match nearest {
                Some((_, min_distance)) if distance >= min_distance => {}
                _ => nearest = Some((location, distance)),
            }
        }

        nearest
            .map(|(location, distance_km)| NearestLocation {
                location: location.as_ref().clone(),
                distance_km,
            })
            .ok_or_else(LocationStoreError::empty_store)
    }
}

#[cfg(test)]
mod tests {
    use super::InMemoryLocationStore;
    use crate::entities::{Coordinate, LocationId, LocationName, NewLocation};
    use crate::errors::LocationStoreError;
    use crate::store::LocationStore;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn new_location(name: &str, latitude: f64, longitude: f64) -> NewLocation {
        NewLocation::new(name, latitude, longitude).unwrap()
    }

    fn name(value: &str) -> LocationName {
        LocationName::parse(value).unwrap()
    }

    async fn us_cities() -> InMemoryLocationStore {
        let store = InMemoryLocationStore::new();
        store
            .save(new_location("New York", 40.7128, -74.0060))
            .await
            .unwrap();
        store
            .save(new_location("Los Angeles", 34.0522, -118.2437))
            .await
            .unwrap();
        store
            .save(new_location("Chicago", 41.8781, -87.6298))
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_that_saved_location_can_be_found_by_name() {
        let store = InMemoryLocationStore::new();
        let saved = store
            .save(new_location(" Victoria Island ", 6.4281, 3.4219))
            .await
            .unwrap();

        let found = store.find_by_name(&name("Victoria Island")).await.unwrap();

        assert_eq!(found, saved);
        assert_eq!(found.name.as_ref(), "Victoria Island");
        assert_eq!(found.coordinate, Coordinate::new(6.4281, 3.4219).unwrap());
        assert!(!found.id.is_empty());
    }

    #[tokio::test]
    async fn test_that_saved_location_can_be_found_by_id() {
        let store = InMemoryLocationStore::new();
        let saved = store.save(new_location("Yaba", 6.5095, 3.3711)).await.unwrap();

        let found = store.find_by_id(&saved.id).await.unwrap();

        assert_eq!(found, saved);
    }

    #[tokio::test]
    async fn test_that_duplicate_names_are_rejected_and_first_is_kept() {
        let store = InMemoryLocationStore::new();
        let first = store.save(new_location("Ikoyi", 6.4549, 3.4246)).await.unwrap();

        let result = store.save(new_location("Ikoyi", 0.0, 0.0)).await;

        assert!(matches!(result, Err(LocationStoreError::AlreadyExists(name)) if name == "Ikoyi"));
        let found = store.find_by_name(&name("Ikoyi")).await.unwrap();
        assert_eq!(found, first);
        assert_eq!(store.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_that_unknown_names_are_not_found() {
        let store = us_cities().await;

        let result = store.find_by_name(&name("Boston")).await;

        assert!(matches!(result, Err(LocationStoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_that_find_all_returns_every_location_in_a_stable_order() {
        let store = us_cities().await;

        let first = store.find_all().await.unwrap();
        let second = store.find_all().await.unwrap();

        assert_eq!(first.len(), 3);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_that_delete_removes_from_both_indexes() {
        let store = us_cities().await;
        let chicago = store.find_by_name(&name("Chicago")).await.unwrap();

        store.delete(&name("Chicago")).await.unwrap();

        assert!(matches!(
            store.find_by_name(&name("Chicago")).await,
            Err(LocationStoreError::NotFound(_))
        ));
        assert!(matches!(
            store.find_by_id(&chicago.id).await,
            Err(LocationStoreError::NotFound(_))
        ));
        assert_eq!(store.find_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_that_deleting_a_missing_location_leaves_the_store_unchanged() {
        let store = us_cities().await;
        let before = store.find_all().await.unwrap();

        let result = store.delete(&name("Boston")).await;

        assert!(matches!(result, Err(LocationStoreError::NotFound(_))));
        assert_eq!(store.find_all().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_that_ids_are_sequential_and_never_reused() {
        let store = InMemoryLocationStore::new();
        let first = store.save(new_location("A", 1.0, 1.0)).await.unwrap();
        let second = store.save(new_location("B", 2.0, 2.0)).await.unwrap();
        store.delete(&name("B")).await.unwrap();
        let third = store.save(new_location("B", 2.0, 2.0)).await.unwrap();

        assert_eq!(first.id, LocationId::from("1"));
        assert_eq!(second.id, LocationId::from("2"));
        assert_eq!(third.id, LocationId::from("3"));
    }

    #[tokio::test]
    async fn test_that_nearest_on_an_empty_store_is_not_found() {
        let store = InMemoryLocationStore::new();

        let result = store.find_nearest(Coordinate::new(0.0, 0.0).unwrap()).await;

        assert!(matches!(result, Err(LocationStoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_that_chicago_is_nearest_to_a_point_outside_chicago() {
        let store = us_cities().await;

        let nearest = store
            .find_nearest(Coordinate::new(42.0, -88.0).unwrap())
            .await
            .unwrap();

        assert_eq!(nearest.location.name.as_ref(), "Chicago");
        assert!(nearest.distance_km > 0.0);
        assert!((nearest.distance_km - 33.49).abs() < 0.5);
    }

    #[tokio::test]
    async fn test_that_nearest_of_a_stored_point_is_itself() {
        let store = us_cities().await;

        let nearest = store
            .find_nearest(Coordinate::new(34.0522, -118.2437).unwrap())
            .await
            .unwrap();

        assert_eq!(nearest.location.name.as_ref(), "Los Angeles");
        assert_eq!(nearest.distance_km, 0.0);
    }

    #[tokio::test]
    async fn test_that_ties_resolve_to_the_same_location_every_time() {
        let store = InMemoryLocationStore::new();
        store.save(new_location("East", 0.0, 1.0)).await.unwrap();
        store.save(new_location("West", 0.0, -1.0)).await.unwrap();
        let origin = Coordinate::new(0.0, 0.0).unwrap();

        let first = store.find_nearest(origin).await.unwrap();
        for _ in 0..10 {
            let again = store.find_nearest(origin).await.unwrap();
            assert_eq!(again.location, first.location);
        }
        assert!(["East", "West"].contains(&first.location.name.as_ref()));
    }

    #[tokio::test]
    async fn test_concurrent_saves_get_distinct_ids() {
        let store = Arc::new(InMemoryLocationStore::new());
        let total = 64;

        let handles = (0..total)
            .map(|index| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    store
                        .save(new_location(&format!("station-{index}"), 0.5, 0.5))
                        .await
                })
            })
            .collect::<Vec<_>>();

        let saved = futures::future::join_all(handles)
            .await
            .into_iter()
            .map(|joined| joined.unwrap().unwrap())
            .collect::<Vec<_>>();

        let ids = saved.iter().map(|location| location.id.clone()).collect::<HashSet<_>>();
        assert_eq!(ids.len(), total);
        assert_eq!(store.find_all().await.unwrap().len(), total);
    }

    #[tokio::test]
    async fn test_concurrent_saves_of_one_name_admit_a_single_winner() {
        let store = Arc::new(InMemoryLocationStore::new());

        let handles = (0..16)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.save(new_location("Ajah", 6.4698, 3.5852)).await })
            })
            .collect::<Vec<_>>();

        let results = futures::future::join_all(handles).await;
        let saved = results
            .iter()
            .filter(|result| matches!(result, Ok(Ok(_))))
            .count();
        let conflicts = results
            .iter()
            .filter(|result| matches!(result, Ok(Err(LocationStoreError::AlreadyExists(_)))))
            .count();

        assert_eq!(saved, 1);
        assert_eq!(conflicts, 15);
    }
}
