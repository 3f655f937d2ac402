use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::domain::asset::Asset;
use crate::error::AppError;
use crate::storage::media_key_for;
use crate::utils::auth::{Operation, extract_bearer};
use crate::utils::state::AppState;

/// Create body schema: exactly these three fields. Anything extra (including a
/// client-supplied `id` or `date`) is rejected before the stores are touched.
#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct CreateAssetRequest {
    title: String,
    author: String,
    body: String,
}

#[derive(Serialize)]
pub struct MediaStatus {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    uri: Option<String>,
}

pub async fn list_assets_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let assets = state.assets.list_all().await?;
    Ok(Json(assets))
}

pub async fn create_asset_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Json<CreateAssetRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let token = extract_bearer(&headers)?;
    if !state.authorizer.authorize(Operation::CreateAsset, token) {
        return Err(AppError::Unauthorized("not authorized to create assets".to_string()));
    }

    let Json(req) = body.map_err(|e| AppError::Validation(e.body_text()))?;
    let asset = Asset::new(req.title, req.author, req.body);
    state.assets.insert(asset.clone()).await?;
    Ok(Json(asset))
}

pub async fn get_asset_handler(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(asset_id) = path.map_err(|e| AppError::Validation(e.body_text()))?;
    let asset = state.assets.get_by_id(asset_id).await?;
    Ok(Json(asset))
}

pub async fn delete_asset_handler(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let Path(asset_id) = path.map_err(|e| AppError::Validation(e.body_text()))?;
    let token = extract_bearer(&headers)?;
    if !state.authorizer.authorize(Operation::DeleteAsset, token) {
        return Err(AppError::Unauthorized("not authorized to delete assets".to_string()));
    }

    // Media goes first and absence is ignored; the record delete decides
    // whether the asset existed. The two are not coupled transactionally.
    state.media.delete(asset_id).await?;
    state.assets.delete_by_id(asset_id).await?;
    Ok(Json(json!({ "id": asset_id })))
}

pub async fn get_media_status_handler(
    State(state): State<Arc<AppState>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(asset_id) = path.map_err(|e| AppError::Validation(e.body_text()))?;
    let key = media_key_for(asset_id);
    let status = match state.media.presigned_download_url(asset_id).await? {
        Some(uri) => MediaStatus {
            status: format!("Media available in s3 storage. ({key})"),
            uri: Some(uri),
        },
        None => MediaStatus {
            status: format!("Media {asset_id} not found. ({key})"),
            uri: None,
        },
    };
    Ok(Json(status))
}
