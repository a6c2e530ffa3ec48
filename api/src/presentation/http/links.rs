use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::use_cases::links::attach_link_items::AttachLinkItems;
use crate::application::use_cases::links::create_link::CreateLink;
use crate::application::use_cases::links::delete_link::DeleteLink;
use crate::application::use_cases::links::delete_link_content::DeleteLinkContent;
use crate::application::use_cases::links::get_link::GetLink;
use crate::application::use_cases::links::get_link_content::GetLinkContent;
use crate::application::use_cases::links::get_link_items::GetLinkItems;
use crate::application::use_cases::links::list_links::ListLinks;
use crate::application::use_cases::links::set_link_content::SetLinkContent;
use crate::application::use_cases::links::update_link::UpdateLink;
use crate::bootstrap::app_context::AppContext;
use crate::domain::links::content::LinkContentError;
use crate::domain::links::link::{self as domain, LinkFields, UnknownItems};

#[derive(Debug, Serialize, ToSchema)]
pub struct Link {
    pub id: i64,
    pub name: String,
    pub url: Option<String>,
    pub description: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<domain::Link> for Link {
    fn from(l: domain::Link) -> Self {
        Link {
            id: l.id,
            name: l.name,
            url: l.url,
            description: l.description,
            created_at: l.created_at,
            updated_at: l.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<domain::Item> for Item {
    fn from(i: domain::Item) -> Self {
        Item {
            id: i.id,
            name: i.name,
            created_at: i.created_at,
            updated_at: i.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateLinkRequest {
    pub name: String,
    pub url: Option<String>,
    pub description: Option<String>,
    /// Ids of existing items to attach
    #[serde(default)]
    pub items: Vec<i64>,
}

/// Full replacement payload. Omitted optional columns are cleared.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateLinkRequest {
    pub name: String,
    pub url: Option<String>,
    pub description: Option<String>,
    /// When present, replaces the attached items
    pub items: Option<Vec<i64>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AttachItemsRequest {
    pub items: Vec<i64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LinkContent {
    pub content: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<i64>,
}

fn link_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Link not found.".into(),
            missing: Vec::new(),
        }),
    )
        .into_response()
}

// Unknown item ids are a client error; everything else is logged and hidden
fn repository_failure(link_id: Option<i64>, err: anyhow::Error) -> Response {
    if let Some(unknown) = err.downcast_ref::<UnknownItems>() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse {
                error: "Unknown item ids.".into(),
                missing: unknown.missing.clone(),
            }),
        )
            .into_response();
    }
    tracing::error!(link_id = ?link_id, error = ?err, "link_repository_failed");
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}

fn content_failure(link_id: i64, err: LinkContentError) -> Response {
    let status = match &err {
        LinkContentError::NotFound => StatusCode::NOT_FOUND,
        LinkContentError::WriteFailed(source) | LinkContentError::Storage(source) => {
            tracing::error!(link_id, error = ?source, "link_content_storage_failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (
        status,
        Json(LinkContent {
            content: err.to_string(),
        }),
    )
        .into_response()
}

#[utoipa::path(get, path = "/api/links", tag = "Links",
    responses((status = 200, body = [Link])))]
pub async fn list_links(State(ctx): State<AppContext>) -> Result<Json<Vec<Link>>, Response> {
    let repo = ctx.link_repo();
    let uc = ListLinks {
        repo: repo.as_ref(),
    };
    let links = uc
        .execute()
        .await
        .map_err(|e| repository_failure(None, e))?;
    Ok(Json(links.into_iter().map(Into::into).collect()))
}

#[utoipa::path(post, path = "/api/links", tag = "Links", request_body = CreateLinkRequest,
    responses(
        (status = 200, body = Link),
        (status = 422, description = "Unknown item ids", body = ErrorResponse)
    ))]
pub async fn create_link(
    State(ctx): State<AppContext>,
    Json(req): Json<CreateLinkRequest>,
) -> Result<Json<Link>, Response> {
    let repo = ctx.link_repo();
    let uc = CreateLink {
        repo: repo.as_ref(),
    };
    let fields = LinkFields {
        name: req.name,
        url: req.url,
        description: req.description,
    };
    let link = uc
        .execute(fields, &req.items)
        .await
        .map_err(|e| repository_failure(None, e))?;
    Ok(Json(link.into()))
}

#[utoipa::path(get, path = "/api/links/{id}", tag = "Links",
    params(("id" = i64, Path, description = "Link ID")),
    responses((status = 200, body = Link), (status = 404, body = ErrorResponse)))]
pub async fn get_link(
    State(ctx): State<AppContext>,
    Path(id): Path<i64>,
) -> Result<Json<Link>, Response> {
    let repo = ctx.link_repo();
    let uc = GetLink {
        repo: repo.as_ref(),
    };
    let link = uc
        .execute(id)
        .await
        .map_err(|e| repository_failure(Some(id), e))?
        .ok_or_else(link_not_found)?;
    Ok(Json(link.into()))
}

#[utoipa::path(put, path = "/api/links/{id}", tag = "Links", request_body = UpdateLinkRequest,
    params(("id" = i64, Path, description = "Link ID")),
    responses(
        (status = 200, body = Link),
        (status = 404, body = ErrorResponse),
        (status = 422, description = "Unknown item ids", body = ErrorResponse)
    ))]
pub async fn update_link(
    State(ctx): State<AppContext>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateLinkRequest>,
) -> Result<Json<Link>, Response> {
    let repo = ctx.link_repo();
    let uc = UpdateLink {
        repo: repo.as_ref(),
    };
    let fields = LinkFields {
        name: req.name,
        url: req.url,
        description: req.description,
    };
    let link = uc
        .execute(id, fields, req.items)
        .await
        .map_err(|e| repository_failure(Some(id), e))?
        .ok_or_else(link_not_found)?;
    Ok(Json(link.into()))
}

/// Responds with the number of deleted links (`0` when the id is unknown).
/// The link's content file is left in place.
#[utoipa::path(delete, path = "/api/links/{id}", tag = "Links",
    params(("id" = i64, Path, description = "Link ID")),
    responses((status = 200, body = u64)))]
pub async fn delete_link(
    State(ctx): State<AppContext>,
    Path(id): Path<i64>,
) -> Result<Json<u64>, Response> {
    let repo = ctx.link_repo();
    let uc = DeleteLink {
        repo: repo.as_ref(),
    };
    let deleted = uc
        .execute(id)
        .await
        .map_err(|e| repository_failure(Some(id), e))?;
    Ok(Json(deleted))
}

#[utoipa::path(get, path = "/api/links/{id}/items", tag = "Links",
    params(("id" = i64, Path, description = "Link ID")),
    responses((status = 200, body = [Item]), (status = 404, body = ErrorResponse)))]
pub async fn get_link_items(
    State(ctx): State<AppContext>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Item>>, Response> {
    let repo = ctx.link_repo();
    let uc = GetLinkItems {
        repo: repo.as_ref(),
    };
    let items = uc
        .execute(id)
        .await
        .map_err(|e| repository_failure(Some(id), e))?
        .ok_or_else(link_not_found)?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

#[utoipa::path(post, path = "/api/links/{id}/items", tag = "Links", request_body = AttachItemsRequest,
    params(("id" = i64, Path, description = "Link ID")),
    responses(
        (status = 200, body = [Item]),
        (status = 404, body = ErrorResponse),
        (status = 422, description = "Unknown item ids", body = ErrorResponse)
    ))]
pub async fn attach_link_items(
    State(ctx): State<AppContext>,
    Path(id): Path<i64>,
    Json(req): Json<AttachItemsRequest>,
) -> Result<Json<Vec<Item>>, Response> {
    let repo = ctx.link_repo();
    let uc = AttachLinkItems {
        repo: repo.as_ref(),
    };
    let items = uc
        .execute(id, &req.items)
        .await
        .map_err(|e| repository_failure(Some(id), e))?
        .ok_or_else(link_not_found)?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

/// Stores the markdown content of a link at `links/{id}.md`. Also mounted on PUT.
#[utoipa::path(post, path = "/api/links/{id}/content", tag = "Link Content", request_body = LinkContent,
    params(("id" = i64, Path, description = "Link ID")),
    responses(
        (status = 200, body = LinkContent),
        (status = 500, description = "Error: Could not write file.", body = LinkContent)
    ))]
pub async fn set_link_content(
    State(ctx): State<AppContext>,
    Path(id): Path<i64>,
    Json(req): Json<LinkContent>,
) -> Result<Json<LinkContent>, Response> {
    let storage = ctx.storage_port();
    let uc = SetLinkContent {
        storage: storage.as_ref(),
    };
    let content = uc
        .execute(id, &req.content)
        .await
        .map_err(|e| content_failure(id, e))?;
    Ok(Json(LinkContent { content }))
}

#[utoipa::path(get, path = "/api/links/{id}/content", tag = "Link Content",
    params(("id" = i64, Path, description = "Link ID")),
    responses(
        (status = 200, body = LinkContent),
        (status = 404, description = "Error: Link content not found.", body = LinkContent)
    ))]
pub async fn get_link_content(
    State(ctx): State<AppContext>,
    Path(id): Path<i64>,
) -> Result<Json<LinkContent>, Response> {
    let storage = ctx.storage_port();
    let uc = GetLinkContent {
        storage: storage.as_ref(),
    };
    let content = uc.execute(id).await.map_err(|e| content_failure(id, e))?;
    Ok(Json(LinkContent { content }))
}

#[utoipa::path(delete, path = "/api/links/{id}/content", tag = "Link Content",
    params(("id" = i64, Path, description = "Link ID")),
    responses(
        (status = 200, body = bool),
        (status = 404, description = "Error: Link content not found.", body = LinkContent)
    ))]
pub async fn delete_link_content(
    State(ctx): State<AppContext>,
    Path(id): Path<i64>,
) -> Result<Json<bool>, Response> {
    let storage = ctx.storage_port();
    let uc = DeleteLinkContent {
        storage: storage.as_ref(),
    };
    let removed = uc.execute(id).await.map_err(|e| content_failure(id, e))?;
    Ok(Json(removed))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/links", get(list_links).post(create_link))
        .route(
            "/links/:id",
            get(get_link).put(update_link).delete(delete_link),
        )
        .route(
            "/links/:id/items",
            get(get_link_items).post(attach_link_items),
        )
        .route(
            "/links/:id/content",
            get(get_link_content)
                .post(set_link_content)
                .put(set_link_content)
                .delete(delete_link_content),
        )
        .with_state(ctx)
}
