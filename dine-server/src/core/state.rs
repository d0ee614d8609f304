use std::path::PathBuf;
use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::{Config, Result, ServerError};
use crate::db::DbService;
use crate::orders::OrdersManager;

/// Server state - shared handles for every handler
///
/// Cloning is cheap: the database handle, the JWT service and the order
/// manager are all reference counted.
///
/// | Field | Type | Notes |
/// |-------|------|-------|
/// | config | Config | immutable |
/// | db | Surreal<Db> | embedded database |
/// | jwt_service | Arc<JwtService> | token validation |
/// | orders | OrdersManager | order lifecycle |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub jwt_service: Arc<JwtService>,
    pub orders: OrdersManager,
}

impl ServerState {
    /// Build state around an already prepared database
    pub fn with_db(config: Config, db: Surreal<Db>) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let orders = OrdersManager::new(db.clone());
        Self {
            config,
            db,
            jwt_service,
            orders,
        }
    }

    /// Initialize server state
    ///
    /// 1. Work directory structure
    /// 2. Database at WORK_DIR/database/dine.db
    /// 3. Services
    pub async fn initialize(config: &Config) -> Result<Self> {
        config.ensure_work_dir_structure()?;

        let db_path = config.database_dir().join("dine.db");
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .map_err(ServerError::Database)?;

        Ok(Self::with_db(config.clone(), db_service.db))
    }

    /// State backed by the in-memory engine
    pub async fn for_tests(config: Config) -> Result<Self> {
        let db_service = DbService::memory().await.map_err(ServerError::Database)?;
        Ok(Self::with_db(config, db_service.db))
    }

    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    pub fn work_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.work_dir)
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
