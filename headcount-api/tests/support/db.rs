use headcount_api::db::{DbConfig, PgSiteStore};

/// Store backed by the database named in `DATABASE_URL`, with the table
/// created and seeded if empty.
pub async fn test_store() -> PgSiteStore {
    let config = DbConfig::from_env();
    assert!(
        config.database_url.is_some(),
        "DATABASE_URL must be set for db-tests"
    );
    let store = PgSiteStore::from_config(&config);
    store
        .initialize(true)
        .await
        .expect("Failed to initialize site_data");
    store
}
