use std::sync::Arc;

use axum::Router;
use axum::http::{Method, Uri};
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::service::asset::{
    create_asset_handler, delete_asset_handler, get_asset_handler, get_media_status_handler,
    list_assets_handler,
};
use crate::utils::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/assets", get(list_assets_handler).post(create_asset_handler))
        .route(
            "/assets/{id}",
            get(get_asset_handler).delete(delete_asset_handler),
        )
        .route("/assets/{id}/media_status", get(get_media_status_handler))
        .fallback(unknown_route_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn unknown_route_handler(method: Method, uri: Uri) -> AppError {
    AppError::NotFound(format!("Endpoint {} {} not found", method, uri.path()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::domain::asset::{AssetRepository, InMemoryAssetRepository};
    use crate::storage::driver::memory::MemoryMediaStore;
    use crate::utils::auth::StaticTokenAuthorizer;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use uuid::Uuid;

    const CREATE_TOKEN: &str = "super-secure-token";
    const DELETE_TOKEN: &str = "super-secure-delete-token";

    struct TestApp {
        state: Arc<AppState>,
        assets: Arc<InMemoryAssetRepository>,
        media: Arc<MemoryMediaStore>,
    }

    fn test_app() -> TestApp {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            storage_typ: "MEMORY".to_string(),
            bucket: "pam-medias".to_string(),
            s3_host: String::new(),
            s3_key: String::new(),
            s3_secret: String::new(),
            presign_ttl_secs: 60,
            db_url: String::new(),
            create_token: CREATE_TOKEN.to_string(),
            delete_token: DELETE_TOKEN.to_string(),
        };
        let assets = Arc::new(InMemoryAssetRepository::default());
        let media = Arc::new(MemoryMediaStore::default());
        let state = Arc::new(AppState {
            assets: assets.clone(),
            media: media.clone(),
            authorizer: Arc::new(StaticTokenAuthorizer::new(&config)),
        });
        TestApp { state, assets, media }
    }

    async fn send(state: Arc<AppState>, req: Request<Body>) -> (StatusCode, Value) {
        let res = create_router(state).oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn post_asset(body: Value, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/assets")
            .header("Content-Type", "application/json");
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn delete(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("DELETE").uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_date_server_side() {
        let app = test_app();
        let body = json!({"title": "T", "author": "A", "body": "B"});
        let (status, res) = send(app.state.clone(), post_asset(body, Some(CREATE_TOKEN))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(res["title"], "T");
        assert_eq!(res["author"], "A");
        assert_eq!(res["body"], "B");
        let id: Uuid = res["id"].as_str().unwrap().parse().unwrap();
        let date = res["date"].as_str().unwrap();
        chrono::DateTime::parse_from_rfc3339(date).unwrap();

        let (status, fetched) = send(app.state, get(&format!("/assets/{id}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, res);
    }

    #[tokio::test]
    async fn test_create_rejects_missing_field() {
        let app = test_app();
        let body = json!({"title": "T", "author": "A"});
        let (status, res) = send(app.state, post_asset(body, Some(CREATE_TOKEN))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(res["message"].is_string());
        assert!(app.assets.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_extra_field() {
        let app = test_app();
        let body = json!({"title": "T", "author": "A", "body": "B", "id": "mine"});
        let (status, _) = send(app.state, post_asset(body, Some(CREATE_TOKEN))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(app.assets.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_requires_create_token() {
        let app = test_app();
        let body = json!({"title": "T", "author": "A", "body": "B"});

        let (status, _) = send(app.state.clone(), post_asset(body.clone(), None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        // The delete secret grants no create capability.
        let (status, _) =
            send(app.state.clone(), post_asset(body, Some(DELETE_TOKEN))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(app.assets.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_unknown_asset_is_404_with_id() {
        let app = test_app();
        let id = Uuid::new_v4();
        let (status, res) = send(app.state, get(&format!("/assets/{id}"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(res["message"].as_str().unwrap().contains(&id.to_string()));
    }

    #[tokio::test]
    async fn test_list_returns_created_assets() {
        let app = test_app();
        for i in 0..2 {
            let body = json!({"title": format!("T{i}"), "author": "A", "body": "B"});
            let (status, _) =
                send(app.state.clone(), post_asset(body, Some(CREATE_TOKEN))).await;
            assert_eq!(status, StatusCode::OK);
        }
        let (status, res) = send(app.state, get("/assets")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(res.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_requires_delete_token() {
        let app = test_app();
        let body = json!({"title": "T", "author": "A", "body": "B"});
        let (_, res) = send(app.state.clone(), post_asset(body, Some(CREATE_TOKEN))).await;
        let id: Uuid = res["id"].as_str().unwrap().parse().unwrap();
        app.media.put(id).await;

        let uri = format!("/assets/{id}");
        let (status, _) = send(app.state.clone(), delete(&uri, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let (status, _) = send(app.state.clone(), delete(&uri, Some(CREATE_TOKEN))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        // Record and media are untouched.
        assert!(app.assets.get_by_id(id).await.is_ok());
        assert!(app.media.contains(id).await);
    }

    #[tokio::test]
    async fn test_delete_removes_record_and_media() {
        let app = test_app();
        let body = json!({"title": "T", "author": "A", "body": "B"});
        let (_, res) = send(app.state.clone(), post_asset(body, Some(CREATE_TOKEN))).await;
        let id: Uuid = res["id"].as_str().unwrap().parse().unwrap();
        app.media.put(id).await;

        let (status, res) =
            send(app.state.clone(), delete(&format!("/assets/{id}"), Some(DELETE_TOKEN))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(res["id"], id.to_string());
        assert!(!app.media.contains(id).await);

        let (status, _) = send(app.state, get(&format!("/assets/{id}"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_succeeds_without_media_blob() {
        let app = test_app();
        let body = json!({"title": "T", "author": "A", "body": "B"});
        let (_, res) = send(app.state.clone(), post_asset(body, Some(CREATE_TOKEN))).await;
        let id: Uuid = res["id"].as_str().unwrap().parse().unwrap();

        let (status, _) =
            send(app.state, delete(&format!("/assets/{id}"), Some(DELETE_TOKEN))).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_delete_unknown_asset_is_404() {
        let app = test_app();
        let id = Uuid::new_v4();
        let (status, _) =
            send(app.state, delete(&format!("/assets/{id}"), Some(DELETE_TOKEN))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_media_status_reports_uri_only_when_blob_exists() {
        let app = test_app();
        let id = Uuid::new_v4();

        let uri = format!("/assets/{id}/media_status");
        let (status, res) = send(app.state.clone(), get(&uri)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(res["status"].as_str().unwrap().contains(&id.to_string()));
        assert!(res.get("uri").is_none());

        app.media.put(id).await;
        let (status, res) = send(app.state, get(&uri)).await;
        assert_eq!(status, StatusCode::OK);
        let key = format!("audio/{id}.mp3");
        assert!(res["status"].as_str().unwrap().contains(&key));
        assert!(!res["uri"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_uuid_id_keeps_json_error_shape() {
        let app = test_app();

        let (status, res) = send(app.state.clone(), get("/assets/not-a-uuid")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(res["message"].is_string());

        let (status, res) =
            send(app.state.clone(), get("/assets/not-a-uuid/media_status")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(res["message"].is_string());

        let (status, res) =
            send(app.state, delete("/assets/not-a-uuid", Some(DELETE_TOKEN))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(res["message"].is_string());
    }

    #[tokio::test]
    async fn test_unknown_route_is_404_with_message() {
        let app = test_app();
        let (status, res) = send(app.state, get("/nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(res["message"], "Endpoint GET /nope not found");
    }
}
