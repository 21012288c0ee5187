use crate::configuration::{Settings, StorageBackend};
use anyhow::Context;
use locations::{InMemoryLocationStore, LocationInteractor, LocationStore};
use sqlx_postgres::migrations::MigrationManager;
use sqlx_postgres::repository::Repository;
use std::sync::Arc;

pub struct Application {
    pub locations: LocationInteractor,
}

impl Application {
    pub fn new(store: Arc<dyn LocationStore>) -> Self {
        Application {
            locations: LocationInteractor::new(store),
        }
    }

    pub async fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let store = location_store(settings).await?;
        Ok(Self::new(store))
    }
}

async fn location_store(settings: &Settings) -> anyhow::Result<Arc<dyn LocationStore>> {
    match settings.storage.backend {
        StorageBackend::Memory => Ok(Arc::new(InMemoryLocationStore::new())),
        StorageBackend::Postgres => {
            let db_settings = settings
                .database
                .as_ref()
                .context("`database` settings are required by the postgres backend")?;
            let repository = Repository::new(db_settings).await?;
            MigrationManager::new(repository.clone()).migrate().await?;
            Ok(Arc::new(repository))
        }
    }
}

#[cfg(test)]
pub(crate) fn in_memory_application() -> actix_web::web::Data<Application> {
    actix_web::web::Data::new(Application::new(Arc::new(InMemoryLocationStore::new())))
}
