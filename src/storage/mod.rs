use uuid::Uuid;

use crate::error::AppError;

pub mod driver;

/// Storage key for an asset's audio blob. Fixed convention, case-sensitive.
pub fn media_key_for(asset_id: Uuid) -> String {
    format!("audio/{asset_id}.mp3")
}

/// Object-store side of an asset. A missing blob is a normal outcome; only
/// connectivity or auth failures surface as errors.
#[async_trait::async_trait]
pub trait MediaStore: Send + Sync {
    /// Returns the storage key when the blob for `asset_id` exists.
    async fn exists(&self, asset_id: Uuid) -> Result<Option<String>, AppError>;

    /// Time-bounded download url for the blob, or `None` when it is absent.
    async fn presigned_download_url(&self, asset_id: Uuid) -> Result<Option<String>, AppError>;

    /// Deleting a key that does not exist is a success.
    async fn delete(&self, asset_id: Uuid) -> Result<(), AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_key_convention() {
        let id = Uuid::new_v4();
        assert_eq!(media_key_for(id), format!("audio/{id}.mp3"));
    }
}
