use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::storage::{LocalStorage, StorageClient};
use crate::users::{MemoryUserStore, PgUserStore, UserStore};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn UserStore>,
    pub storage: Arc<dyn StorageClient>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let store = match &config.database_url {
            Some(url) => {
                let db = PgPoolOptions::new()
                    .max_connections(10)
                    .connect(url)
                    .await
                    .context("connect to database")?;
                sqlx::migrate!("./migrations")
                    .run(&db)
                    .await
                    .context("run migrations")?;
                info!("using postgres user store");
                Arc::new(PgUserStore::new(db)) as Arc<dyn UserStore>
            }
            None => {
                warn!("DATABASE_URL not set; users are kept in memory and lost on restart");
                Arc::new(MemoryUserStore::new()) as Arc<dyn UserStore>
            }
        };

        let storage =
            Arc::new(LocalStorage::new(&config.upload_dir).await?) as Arc<dyn StorageClient>;

        Ok(Self::from_parts(config, store, storage))
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        store: Arc<dyn UserStore>,
        storage: Arc<dyn StorageClient>,
    ) -> Self {
        Self {
            config,
            store,
            storage,
        }
    }
}
