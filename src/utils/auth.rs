use axum::http::HeaderMap;

use crate::config::Config;
use crate::error::AppError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    CreateAsset,
    DeleteAsset,
}

/// Capability check for mutating routes. Kept behind a trait so the fixed
/// shared-secret scheme can be swapped for real per-user credentials.
pub trait Authorizer: Send + Sync {
    fn authorize(&self, operation: Operation, credential: &str) -> bool;
}

/// Compares against two independently configured secrets. Create and delete
/// intentionally use distinct tokens.
pub struct StaticTokenAuthorizer {
    create_token: String,
    delete_token: String,
}

impl StaticTokenAuthorizer {
    pub fn new(config: &Config) -> Self {
        Self {
            create_token: config.create_token.clone(),
            delete_token: config.delete_token.clone(),
        }
    }
}

impl Authorizer for StaticTokenAuthorizer {
    fn authorize(&self, operation: Operation, credential: &str) -> bool {
        match operation {
            Operation::CreateAsset => credential == self.create_token,
            Operation::DeleteAsset => credential == self.delete_token,
        }
    }
}

pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, AppError> {
    headers
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("Missing or malformed Bearer token".to_string()))
}
