use axum::Router;

use crate::bootstrap::app_context::AppContext;

pub mod health;
pub mod links;

/// Every HTTP route of the service, mounted under `/api`.
pub fn api_router(ctx: AppContext) -> Router {
    let routes = Router::new()
        .merge(health::routes(ctx.clone()))
        .merge(links::routes(ctx));
    Router::new().nest("/api", routes)
}
