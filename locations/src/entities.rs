use crate::distance::{km_to_miles, km_to_nautical_miles};
use crate::errors::InvalidLocation;
use chrono::{DateTime, Utc};
use serde::Serialize;
use shared_kernel::{non_empty_string, string_key};
use std::fmt::{Display, Formatter};
use std::ops::RangeInclusive;

const LATITUDE_RANGE: RangeInclusive<f64> = -90.0..=90.0;
const LONGITUDE_RANGE: RangeInclusive<f64> = -180.0..=180.0;

string_key!(LocationId);
non_empty_string!(LocationName);

impl LocationName {
    pub fn parse(value: impl Into<String>) -> Result<Self, InvalidLocation> {
        let value: String = value.into();
        LocationName::try_from(value).map_err(|_| InvalidLocation::EmptyName)
    }
}

/// A point on the earth's surface, always within the valid latitude and
/// longitude ranges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidLocation> {
        if !LATITUDE_RANGE.contains(&latitude) {
            return Err(InvalidLocation::InvalidLatitude(latitude));
        }
        if !LONGITUDE_RANGE.contains(&longitude) {
            return Err(InvalidLocation::InvalidLongitude(longitude));
        }
        Ok(Coordinate {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {})",
            format_degrees(self.latitude),
            format_degrees(self.longitude)
        )
    }
}

/// Six decimal places without trailing zeros.
fn format_degrees(value: f64) -> String {
    let formatted = format!("{value:.6}");
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// A validated location that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLocation {
    pub name: LocationName,
    pub coordinate: Coordinate,
}

impl NewLocation {
    pub fn new(
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Result<Self, InvalidLocation> {
        let name = LocationName::parse(name)?;
        let coordinate = Coordinate::new(latitude, longitude)?;
        Ok(NewLocation { name, coordinate })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub id: LocationId,
    pub name: LocationName,
    pub coordinate: Coordinate,
    pub created_at: DateTime<Utc>,
}

impl Location {
    pub fn from_new(location: NewLocation, id: LocationId, created_at: DateTime<Utc>) -> Self {
        Location {
            id,
            name: location.name,
            coordinate: location.coordinate,
            created_at,
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.name, self.coordinate)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NearestLocation {
    pub location: Location,
    pub distance_km: f64,
}

impl NearestLocation {
    pub fn distance_miles(&self) -> f64 {
        km_to_miles(self.distance_km)
    }

    pub fn distance_nautical_miles(&self) -> f64 {
        km_to_nautical_miles(self.distance_km)
    }
}
