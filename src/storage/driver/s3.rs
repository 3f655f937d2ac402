use std::time::Duration;

use aws_sdk_s3::Client;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::presigning::PresigningConfig;
use uuid::Uuid;

use crate::config::Config;
use crate::error::AppError;
use crate::storage::{MediaStore, media_key_for};

/// Media driver for S3-compatible object storage (Cellar, MinIO, AWS).
pub struct S3MediaStore {
    client: Client,
    bucket: String,
    presign_ttl: Duration,
}

impl S3MediaStore {
    pub fn new(config: &Config) -> Self {
        let credentials = Credentials::new(
            config.s3_key.clone(),
            config.s3_secret.clone(),
            None,
            None,
            "static",
        );
        let s3_config = aws_sdk_s3::config::Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .endpoint_url(format!("https://{}", config.s3_host))
            .credentials_provider(credentials)
            // Cellar-style endpoints do not resolve virtual-hosted buckets.
            .force_path_style(true)
            .build();

        Self {
            client: Client::from_conf(s3_config),
            bucket: config.bucket.clone(),
            presign_ttl: Duration::from_secs(config.presign_ttl_secs),
        }
    }
}

#[async_trait::async_trait]
impl MediaStore for S3MediaStore {
    async fn exists(&self, asset_id: Uuid) -> Result<Option<String>, AppError> {
        let key = media_key_for(asset_id);
        let listed = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .prefix(&key)
            .max_keys(1)
            .send()
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;
        // A prefix listing may return a partial match that is not the target.
        let found = listed
            .contents()
            .iter()
            .any(|obj| obj.key() == Some(key.as_str()));
        Ok(found.then_some(key))
    }

    async fn presigned_download_url(&self, asset_id: Uuid) -> Result<Option<String>, AppError> {
        let Some(key) = self.exists(asset_id).await? else {
            return Ok(None);
        };
        let presigning = PresigningConfig::expires_in(self.presign_ttl)
            .map_err(|e| AppError::Storage(e.to_string()))?;
        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(&key)
            .presigned(presigning)
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;
        Ok(Some(presigned.uri().to_string()))
    }

    async fn delete(&self, asset_id: Uuid) -> Result<(), AppError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(media_key_for(asset_id))
            .send()
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;
        Ok(())
    }
}
