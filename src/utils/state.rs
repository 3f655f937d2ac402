use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::domain::asset::{AssetRepository, PgAssetRepository};
use crate::storage::MediaStore;
use crate::storage::driver::memory::MemoryMediaStore;
use crate::storage::driver::s3::S3MediaStore;
use crate::utils::auth::{Authorizer, StaticTokenAuthorizer};

#[derive(Clone)]
pub struct AppState {
    pub assets: Arc<dyn AssetRepository>,
    pub media: Arc<dyn MediaStore>,
    pub authorizer: Arc<dyn Authorizer>,
}

impl AppState {
    pub fn new(config: Config, pool: Arc<PgPool>) -> Self {
        let media: Arc<dyn MediaStore> = match config.storage_typ.as_str() {
            "MEMORY" => Arc::new(MemoryMediaStore::default()),
            _ => Arc::new(S3MediaStore::new(&config)),
        };

        AppState {
            assets: Arc::new(PgAssetRepository::new(pool)),
            media,
            authorizer: Arc::new(StaticTokenAuthorizer::new(&config)),
        }
    }
}
