use std::sync::Arc;

use sqlx::PgPool;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::asset::Asset;
use crate::error::AppError;

type Result<T> = std::result::Result<T, AppError>;

#[async_trait::async_trait]
pub trait AssetRepository: Send + Sync {
    async fn insert(&self, asset: Asset) -> Result<()>;

    async fn get_by_id(&self, id: Uuid) -> Result<Asset>;

    async fn delete_by_id(&self, id: Uuid) -> Result<()>;

    /// Row order is not part of the contract.
    async fn list_all(&self) -> Result<Vec<Asset>>;
}

#[derive(Debug)]
pub struct PgAssetRepository {
    pub pool: Arc<PgPool>,
}

impl PgAssetRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl AssetRepository for PgAssetRepository {
    async fn insert(&self, asset: Asset) -> Result<()> {
        let result =
            sqlx::query("INSERT INTO assets (id, title, author, body, date) VALUES ($1, $2, $3, $4, $5)")
                .bind(asset.id)
                .bind(asset.title)
                .bind(asset.author)
                .bind(asset.body)
                .bind(asset.date)
                .execute(self.pool.as_ref())
                .await;
        match result {
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(AppError::DuplicateKey(asset.id))
            }
            Err(e) => Err(e.into()),
            Ok(r) if r.rows_affected() == 0 => {
                Err(AppError::Storage("insert reported no rows affected".to_string()))
            }
            Ok(_) => Ok(()),
        }
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Asset> {
        sqlx::query_as::<_, Asset>("select * from assets where id = $1")
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Asset {id} not found")))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM assets WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;
        match result.rows_affected() {
            0 => Err(AppError::NotFound(format!("Asset {id} not found"))),
            _ => Ok(()),
        }
    }

    async fn list_all(&self) -> Result<Vec<Asset>> {
        Ok(sqlx::query_as::<_, Asset>("select * from assets")
            .fetch_all(self.pool.as_ref())
            .await?)
    }
}

/// Record store backed by a process-local list, for tests and local hacking.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct InMemoryAssetRepository {
    assets: RwLock<Vec<Asset>>,
}

#[async_trait::async_trait]
impl AssetRepository for InMemoryAssetRepository {
    async fn insert(&self, asset: Asset) -> Result<()> {
        let mut assets = self.assets.write().await;
        if assets.iter().any(|a| a.id == asset.id) {
            return Err(AppError::DuplicateKey(asset.id));
        }
        assets.push(asset);
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Asset> {
        self.assets
            .read()
            .await
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Asset {id} not found")))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<()> {
        let mut assets = self.assets.write().await;
        let before = assets.len();
        assets.retain(|a| a.id != id);
        if assets.len() == before {
            return Err(AppError::NotFound(format!("Asset {id} not found")));
        }
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Asset>> {
        Ok(self.assets.read().await.clone())
    }
}
