use std::sync::Arc;

use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use tokio::signal;

use crate::config::Config;
use crate::utils::cli::Args;
use crate::utils::state::AppState;

mod api;
mod config;
mod domain;
mod error;
mod service;
mod storage;
mod utils;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();
    let args = Args::parse();
    let config = validate_config(&args);

    let pool = PgPoolOptions::new()
        .max_connections(12)
        .connect(config.db_url.as_str())
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let addr = format!("{}:{}", config.host, config.port);
    let state = Arc::new(AppState::new(config, Arc::new(pool)));

    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down...");
}

fn validate_config(args: &Args) -> Config {
    let mut validation_errors = Vec::new();

    if args.storage == "S3" {
        if args.s3_host.is_empty() {
            validation_errors.push("CELLAR_ADDON_HOST is not set".to_string());
        }
        if args.s3_key.is_empty() {
            validation_errors.push("CELLAR_ADDON_KEY_ID is not set".to_string());
        }
        if args.s3_secret.is_empty() {
            validation_errors.push("CELLAR_ADDON_KEY_SECRET is not set".to_string());
        }
    }

    if !validation_errors.is_empty() {
        eprintln!("{}", validation_errors.join("\n"));
        std::process::exit(1);
    }

    let create_token = std::env::var("ASSET_CREATE_TOKEN").unwrap_or_else(|_| {
        eprintln!("WARNING: ASSET_CREATE_TOKEN is not set. Use default value: `super-secure-token`");
        "super-secure-token".into()
    });
    let delete_token = std::env::var("ASSET_DELETE_TOKEN").unwrap_or_else(|_| {
        eprintln!(
            "WARNING: ASSET_DELETE_TOKEN is not set. Use default value: `super-secure-delete-token`"
        );
        "super-secure-delete-token".into()
    });

    let db_url = format!(
        "postgres://{}:{}@{}:{}/{}",
        args.db_user, args.db_password, args.db_host, args.db_port, args.db_name
    );

    Config {
        host: args.host.clone(),
        port: args.port,
        storage_typ: args.storage.clone(),
        bucket: args.bucket.clone(),
        s3_host: args.s3_host.clone(),
        s3_key: args.s3_key.clone(),
        s3_secret: args.s3_secret.clone(),
        presign_ttl_secs: args.presign_ttl_secs,
        db_url,
        create_token,
        delete_token,
    }
}
