use crate::errors::{is_unique_violation, into_store_error, StoreContext};
use crate::repository::Repository;
use anyhow::{anyhow, Context};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use locations::{
    Coordinate, Location, LocationId, LocationName, LocationStore, LocationStoreError,
    NearestLocation, NewLocation, StoreResult,
};

#[derive(Debug, sqlx::FromRow)]
struct LocationRow {
    id: i64,
    name: String,
    latitude: f64,
    longitude: f64,
    created_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct NearestLocationRow {
    id: i64,
    name: String,
    latitude: f64,
    longitude: f64,
    created_at: DateTime<Utc>,
    distance_km: f64,
}

impl NearestLocationRow {
    fn into_parts(self) -> (LocationRow, f64) {
        let location = LocationRow {
            id: self.id,
            name: self.name,
            latitude: self.latitude,
            longitude: self.longitude,
            created_at: self.created_at,
        };
        (location, self.distance_km)
    }
}

impl TryFrom<LocationRow> for Location {
    type Error = LocationStoreError;

    fn try_from(row: LocationRow) -> Result<Self, Self::Error> {
        let new_location = NewLocation::new(row.name, row.latitude, row.longitude)
            .with_context(|| format!("Stored location {} is invalid", row.id))?;
        Ok(Location::from_new(
            new_location,
            LocationId::from(row.id),
            row.created_at,
        ))
    }
}

fn parse_id(id: &LocationId) -> StoreResult<i64> {
    id.as_ref()
        .parse::<i64>()
        .map_err(|_| LocationStoreError::NotFound(id.to_string()))
}

#[async_trait]
impl LocationStore for Repository {
    #[tracing::instrument(err, skip(self), level = "info")]
    async fn save(&self, location: NewLocation) -> StoreResult<Location> {
        let mut transaction = self
            .pool()
            .begin()
            .await
            .store_context("Failed to begin transaction")?;

        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM public.locations WHERE name = $1)")
                .bind(location.name.as_ref())
                .fetch_one(&mut *transaction)
                .await
                .store_context("Failed to check for an existing location")?;

        if exists {
            return Err(LocationStoreError::AlreadyExists(location.name.to_string()));
        }

        let inserted = sqlx::query_as::<_, (i64, DateTime<Utc>)>(
            r#"
              INSERT INTO public.locations (name, latitude, longitude)
              VALUES ($1, $2, $3)
              RETURNING id, created_at
            "#,
        )
        .bind(location.name.as_ref())
        .bind(location.coordinate.latitude())
        .bind(location.coordinate.longitude())
        .fetch_one(&mut *transaction)
        .await;

        let (id, created_at) = match inserted {
            Ok(record) => record,
            // another writer got the name between the check and the insert
            Err(err) if is_unique_violation(&err) => {
                return Err(LocationStoreError::AlreadyExists(location.name.to_string()))
            }
            Err(err) => return Err(into_store_error(err, "Failed to insert location")),
        };

        transaction
            .commit()
            .await
            .store_context("Failed to save location")?;

        Ok(Location::from_new(location, LocationId::from(id), created_at))
    }

    #[tracing::instrument(err, skip(self), level = "info")]
    async fn find_by_name(&self, name: &LocationName) -> StoreResult<Location> {
        let row = sqlx::query_as::<_, LocationRow>(
            r#"
              SELECT id, name, latitude, longitude, created_at
              FROM public.locations WHERE name = $1
            "#,
        )
        .bind(name.as_ref())
        .fetch_optional(self.pool())
        .await
        .store_context("Failed to fetch location by name")?;

        row.ok_or_else(|| LocationStoreError::NotFound(name.to_string()))?
            .try_into()
    }

    #[tracing::instrument(err, skip(self), level = "info")]
    async fn find_by_id(&self, id: &LocationId) -> StoreResult<Location> {
        let row = sqlx::query_as::<_, LocationRow>(
            r#"
              SELECT id, name, latitude, longitude, created_at
              FROM public.locations WHERE id = $1
            "#,
        )
        .bind(parse_id(id)?)
        .fetch_optional(self.pool())
        .await
        .store_context("Failed to fetch location by id")?;

        row.ok_or_else(|| LocationStoreError::NotFound(id.to_string()))?
            .try_into()
    }

    #[tracing::instrument(err, skip(self), level = "info")]
    async fn find_all(&self) -> StoreResult<Vec<Location>> {
        let rows = sqlx::query_as::<_, LocationRow>(
            r#"
              SELECT id, name, latitude, longitude, created_at
              FROM public.locations ORDER BY id
            "#,
        )
        .fetch_all(self.pool())
        .await
        .store_context("Failed to fetch locations")?;

        rows.into_iter().map(Location::try_from).collect()
    }

    #[tracing::instrument(err, skip(self), level = "info")]
    async fn delete(&self, name: &LocationName) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM public.locations WHERE name = $1")
            .bind(name.as_ref())
            .execute(self.pool())
            .await
            .store_context("Failed to delete location")?;

        if result.rows_affected() == 0 {
            return Err(LocationStoreError::NotFound(name.to_string()));
        }
        Ok(())
    }

    #[tracing::instrument(err, skip(self), level = "info")]
    async fn find_nearest(&self, query: Coordinate) -> StoreResult<NearestLocation> {
        let row = sqlx::query_as::<_, NearestLocationRow>(
            r#"
              WITH query AS (
                SELECT ST_SetSRID(ST_MakePoint($1, $2), 4326)::geography AS point
              )
              SELECT l.id, l.name, l.latitude, l.longitude, l.created_at,
                     ST_Distance(l.geom, query.point, false) / 1000.0 AS distance_km
              FROM public.locations l, query
              ORDER BY l.geom <-> query.point, l.id
              LIMIT 1
            "#,
        )
        .bind(query.longitude())
        .bind(query.latitude())
        .fetch_optional(self.pool())
        .await
        .store_context("Failed to fetch the nearest location")?;

        let (location, distance_km) = row
            .ok_or_else(LocationStoreError::empty_store)?
            .into_parts();
        if !distance_km.is_finite() {
            return Err(anyhow!("Non finite distance for location {}", location.id).into());
        }
        Ok(NearestLocation {
            location: location.try_into()?,
            distance_km,
        })
    }
}
