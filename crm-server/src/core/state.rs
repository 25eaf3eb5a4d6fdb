use crate::core::Config;
use crate::db::DbService;
use crate::services::Services;
use crate::utils::AppResult;
use sqlx::SqlitePool;

/// Server state, shared by every handler
///
/// Cloning is cheap: the pool and the services are reference counted, and
/// the order workflow's reserve lock is shared by all clones.
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub services: Services,
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("database_url", &self.config.database_url)
            .field("pool_size", &self.db.pool.size())
            .finish()
    }
}

impl ServerState {
    pub fn new(config: Config, db: DbService) -> Self {
        let services = Services::new(db.pool.clone(), config.page_limits());
        Self {
            config,
            db,
            services,
        }
    }

    /// Open and migrate the database, then build the services
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let db = DbService::new(&config.database_url, config.db_max_connections).await?;
        Ok(Self::new(config.clone(), db))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db.pool
    }
}
