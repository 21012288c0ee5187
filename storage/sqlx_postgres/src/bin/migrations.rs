use sqlx_postgres::configuration::Settings;
use sqlx_postgres::migrations::MigrationManager;
use sqlx_postgres::repository::Repository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::parse()?;
    let repo = Repository::new(&settings.database).await?;
    MigrationManager::new(repo).migrate().await
}
