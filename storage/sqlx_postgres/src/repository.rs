use crate::configuration::DbSettings;
use anyhow::Context;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::sync::Arc;

/// PostGIS backed location store. Cheap to clone, clones share one pool.
#[derive(Clone)]
pub struct Repository {
    pg_pool: Arc<PgPool>,
}

impl Repository {
    pub fn pool(&self) -> &PgPool {
        self.pg_pool.as_ref()
    }

    pub async fn new(settings: &DbSettings) -> anyhow::Result<Self> {
        let pg_pool = PgPoolOptions::new()
            .max_connections(settings.max_connections())
            .acquire_timeout(settings.acquire_timeout())
            .connect_with(settings.with_db())
            .await
            .context("Failed to connect to DB")
            .map(Arc::new)?;

        Ok(Self { pg_pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            pg_pool: Arc::new(pool),
        }
    }

    /// Creates a fresh database with a random name and runs every migration on it.
    #[cfg(any(test, feature = "testing"))]
    pub async fn new_test_repo() -> Self {
        use crate::configuration::Settings;
        use sqlx::Executor;
        use sqlx::{Connection, PgConnection};
        use uuid::Uuid;
        let settings = Settings::parse().expect("Failed to read database settings");
        let connection_options = settings.database.without_db().0;

        let mut connection = PgConnection::connect_with(&connection_options)
            .await
            .expect("Failed to connect to Postgres");

        let db_name = Uuid::new_v4();
        connection
            .execute(&*format!(r#"CREATE DATABASE "{}";"#, db_name))
            .await
            .expect("Failed to create database.");
        println!("The db name is {db_name}");

        let connection_with_db_name = connection_options.database(&db_name.to_string());

        let connection_pool = PgPool::connect_with(connection_with_db_name)
            .await
            .expect("Failed to connect to Postgres.");
        sqlx::migrate!()
            .run(&connection_pool)
            .await
            .expect("Failed to migrate the database");

        Self::from_pool(connection_pool)
    }
}
