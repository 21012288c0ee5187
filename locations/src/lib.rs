pub mod distance;
pub mod entities;
pub mod errors;
pub mod interactor;
pub mod memory;
pub mod store;

pub use entities::{Coordinate, Location, LocationId, LocationName, NearestLocation, NewLocation};
pub use errors::{InvalidLocation, LocationStoreError};
pub use interactor::LocationInteractor;
pub use memory::InMemoryLocationStore;
pub use store::{LocationStore, StoreResult};
