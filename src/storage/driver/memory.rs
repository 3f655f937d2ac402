use std::collections::HashSet;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::AppError;
use crate::storage::{MediaStore, media_key_for};

/// Media driver holding keys in memory. Backs the test suite and local runs
/// without an object-store account.
#[derive(Debug, Default)]
pub struct MemoryMediaStore {
    keys: RwLock<HashSet<String>>,
}

#[allow(dead_code)]
impl MemoryMediaStore {
    pub async fn put(&self, asset_id: Uuid) {
        self.keys.write().await.insert(media_key_for(asset_id));
    }

    pub async fn contains(&self, asset_id: Uuid) -> bool {
        self.keys.read().await.contains(&media_key_for(asset_id))
    }
}

#[async_trait::async_trait]
impl MediaStore for MemoryMediaStore {
    async fn exists(&self, asset_id: Uuid) -> Result<Option<String>, AppError> {
        let key = media_key_for(asset_id);
        let found = self.keys.read().await.contains(&key);
        Ok(found.then_some(key))
    }

    async fn presigned_download_url(&self, asset_id: Uuid) -> Result<Option<String>, AppError> {
        Ok(self
            .exists(asset_id)
            .await?
            .map(|key| format!("memory://{key}?signature=none")))
    }

    async fn delete(&self, asset_id: Uuid) -> Result<(), AppError> {
        self.keys.write().await.remove(&media_key_for(asset_id));
        Ok(())
    }
}
