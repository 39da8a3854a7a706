use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::middleware as axum_mw;
use clap::Parser;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

use echoday_webhooks::dispatch::HttpTransport;
use echoday_webhooks::store::{FileStore, KeyValueStore, MemoryStore};
use echoday_webhooks::{middleware, routes, state};

#[derive(Parser)]
#[command(name = "echoday-webhooks", about = "Outbound webhook dispatcher for EchoDay")]
struct Cli {
    /// Listen address for the HTTP API
    #[arg(long, env = "ECHODAY_LISTEN", default_value = "127.0.0.1:8080")]
    listen: String,

    /// Directory holding the persisted webhook configurations
    #[arg(long, env = "ECHODAY_DATA_DIR", default_value = ".")]
    data_dir: PathBuf,

    /// Keep configurations in memory only; nothing is written to disk
    #[arg(long, env = "ECHODAY_EPHEMERAL")]
    ephemeral: bool,

    /// Path to TLS certificate file (PEM format). Enables HTTPS when set.
    #[arg(long, env = "ECHODAY_TLS_CERT")]
    tls_cert: Option<String>,

    /// Path to TLS private key file (PEM format). Required with --tls-cert.
    #[arg(long, env = "ECHODAY_TLS_KEY")]
    tls_key: Option<String>,
}

/// Bind `requested`, or an OS-assigned localhost port if it's taken.
async fn bind_or_fallback(requested: SocketAddr) -> anyhow::Result<tokio::net::TcpListener> {
    match tokio::net::TcpListener::bind(requested).await {
        Ok(l) => Ok(l),
        Err(_) => {
            let fallback = SocketAddr::from(([127, 0, 0, 1], 0));
            let l = tokio::net::TcpListener::bind(fallback).await?;
            tracing::warn!(
                "Port {} busy, using {} instead",
                requested.port(),
                l.local_addr()?
            );
            Ok(l)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    let backend: Box<dyn KeyValueStore> = if cli.ephemeral {
        tracing::info!("Using in-memory webhook store");
        Box::new(MemoryStore::new())
    } else {
        tracing::info!("Persisting webhooks under {}", cli.data_dir.display());
        Box::new(FileStore::new(&cli.data_dir))
    };

    let app_state = state::AppState::new(backend, Arc::new(HttpTransport::new()));

    let app = routes::router(app_state)
        .layer(axum_mw::from_fn(middleware::request_tracing))
        .layer(CorsLayer::permissive());

    let requested: SocketAddr = cli.listen.parse()?;

    match (cli.tls_cert, cli.tls_key) {
        (Some(cert), Some(key)) => {
            let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(&cert, &key).await?;
            // axum-server binds itself; probe first so a busy port falls back.
            let addr = {
                let probe = bind_or_fallback(requested).await?;
                probe.local_addr()?
            };
            tracing::info!("Listening on https://{addr} (TLS)");
            axum_server::bind_rustls(addr, tls_config)
                .serve(app.into_make_service())
                .await?;
        }
        (None, None) => {
            let listener = bind_or_fallback(requested).await?;
            tracing::info!("Listening on http://{}", listener.local_addr()?);
            axum::serve(listener, app).await?;
        }
        _ => {
            anyhow::bail!("Both --tls-cert and --tls-key must be provided together");
        }
    }

    Ok(())
}
