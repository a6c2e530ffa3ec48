use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::extract::MatchedPath;
use dotenvy::dotenv;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use link_api::application::ports::link_repository::LinkRepository;
use link_api::application::ports::storage_port::StoragePort;
use link_api::bootstrap::app_context::{AppContext, AppServices};
use link_api::bootstrap::config::{Config, LinkStore, StorageBackend};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
        paths(
            link_api::presentation::http::links::list_links,
            link_api::presentation::http::links::create_link,
            link_api::presentation::http::links::get_link,
            link_api::presentation::http::links::update_link,
            link_api::presentation::http::links::delete_link,
            link_api::presentation::http::links::get_link_items,
            link_api::presentation::http::links::attach_link_items,
            link_api::presentation::http::links::set_link_content,
            link_api::presentation::http::links::get_link_content,
            link_api::presentation::http::links::delete_link_content,
            link_api::presentation::http::health::health,
        ),
        components(schemas(
            link_api::presentation::http::links::Link,
            link_api::presentation::http::links::Item,
            link_api::presentation::http::links::CreateLinkRequest,
            link_api::presentation::http::links::UpdateLinkRequest,
            link_api::presentation::http::links::AttachItemsRequest,
            link_api::presentation::http::links::LinkContent,
            link_api::presentation::http::links::ErrorResponse,
            link_api::presentation::http::health::HealthResp,
        )),
        tags(
            (name = "Links", description = "Links and their items"),
            (name = "Link Content", description = "Markdown content stored per link"),
            (name = "Health", description = "System health checks")
        )
    )]
struct ApiDoc;

fn cors_layer(cfg: &Config) -> CorsLayer {
    let methods = [
        http::Method::GET,
        http::Method::POST,
        http::Method::PUT,
        http::Method::DELETE,
        http::Method::OPTIONS,
    ];
    let headers = [http::header::CONTENT_TYPE];
    match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(methods)
            .allow_headers(headers),
        // Production requires FRONTEND_URL (enforced in Config); deny all if it is unusable
        _ if cfg.is_production => CorsLayer::new()
            .allow_origin(AllowOrigin::exact(HeaderValue::from_static(
                "http://invalid",
            )))
            .allow_methods(methods)
            .allow_headers(headers),
        // Development convenience
        _ => CorsLayer::new()
            .allow_origin(AllowOrigin::mirror_request())
            .allow_methods(methods)
            .allow_headers(headers),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = ?e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "link_api=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(?cfg, "Starting links API");

    let link_repo: Arc<dyn LinkRepository> = match cfg.link_store {
        LinkStore::Postgres => {
            let pool = link_api::infrastructure::db::connect_pool(&cfg.database_url).await?;
            link_api::infrastructure::db::migrate(&pool).await?;
            Arc::new(
                link_api::infrastructure::db::repositories::link_repository_sqlx::SqlxLinkRepository::new(
                    pool,
                ),
            )
        }
        LinkStore::Memory => {
            tracing::warn!(items = cfg.memory_items.len(), "memory_link_store_enabled");
            Arc::new(
                link_api::infrastructure::db::repositories::link_repository_memory::MemoryLinkRepository::with_items(
                    cfg.memory_items.clone(),
                ),
            )
        }
    };

    let storage_port: Arc<dyn StoragePort> = match cfg.storage_backend {
        StorageBackend::Filesystem => {
            // Ensure storage root exists
            if let Err(e) = tokio::fs::create_dir_all(&cfg.storage_root).await {
                tracing::warn!(error = ?e, dir = %cfg.storage_root, "Failed to create storage dir");
            }
            Arc::new(link_api::infrastructure::storage::fs::FsStoragePort::new(
                &cfg.storage_root,
            ))
        }
        StorageBackend::S3 => {
            Arc::new(link_api::infrastructure::storage::s3::S3StoragePort::new(&cfg).await?)
        }
        StorageBackend::Memory => {
            tracing::warn!("memory_content_storage_enabled");
            Arc::new(link_api::infrastructure::storage::memory::MemoryStoragePort::new())
        }
    };

    let services = AppServices::new(link_repo, storage_port);
    let ctx = AppContext::new(cfg.clone(), services);

    let app = link_api::presentation::http::api_router(ctx)
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(cors_layer(&cfg))
        .layer(DefaultBodyLimit::max(cfg.body_max_bytes))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
