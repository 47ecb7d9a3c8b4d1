//! Entity CRUD handlers: one template serving every registered entity.
//! Handlers resolve the entity by path segment, bind and validate the
//! request, then delegate to the registered service.

use crate::error::{AppError, ErrorBody};
use crate::identity::RequestIdentity;
use crate::listing::ListParams;
use crate::patch::PatchDocument;
use crate::registry::RegisteredEntity;
use crate::response::{CreatedBody, DeleteBody, RecordBody};
use crate::service::RequestContext;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use utoipa::IntoParams;
use uuid::Uuid;

fn resolve<'a>(state: &'a AppState, segment: &str) -> Result<&'a RegisteredEntity, AppError> {
    state
        .registry
        .resolve(segment)
        .ok_or_else(|| AppError::NotFound(format!("unknown entity: {}", segment)))
}

fn parse_id(id_str: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id_str).map_err(|_| AppError::BadRequest("invalid uuid".into()))
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReadParams {
    /// Comma-separated projection, passed through to the service.
    #[serde(default)]
    pub fields: Option<String>,
}

impl ReadParams {
    fn field_list(self) -> Option<Vec<String>> {
        let fields: Vec<String> = self
            .fields
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if fields.is_empty() {
            None
        } else {
            Some(fields)
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/{entity}",
    tag = "entities",
    params(("entity" = String, Path, description = "Entity path segment")),
    responses(
        (status = 201, description = "Record created", body = CreatedBody),
        (status = 400, description = "Malformed body or missing tenant header", body = ErrorBody),
        (status = 404, description = "Unknown entity", body = ErrorBody),
        (status = 422, description = "Field rule violated", body = ErrorBody)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    identity: RequestIdentity,
    Path(segment): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let entity = resolve(&state, &segment)?;
    let ctx = RequestContext::from(identity);
    tracing::debug!(entity = entity.meta().name, tenant = %ctx.tenant_id, "create");
    let id = entity.service().create(&ctx, body).await?;
    Ok((StatusCode::CREATED, Json(CreatedBody { id })))
}

#[utoipa::path(
    get,
    path = "/api/{entity}",
    tag = "entities",
    params(("entity" = String, Path, description = "Entity path segment"), ListParams),
    responses(
        (status = 200, description = "One page of records"),
        (status = 400, description = "Invalid paging or filters", body = ErrorBody),
        (status = 404, description = "Unknown entity", body = ErrorBody)
    )
)]
pub async fn list(
    State(state): State<AppState>,
    identity: RequestIdentity,
    Path(segment): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let entity = resolve(&state, &segment)?;
    let ctx = RequestContext::from(identity);
    let query = params.into_query()?;
    tracing::debug!(entity = entity.meta().name, tenant = %ctx.tenant_id, page = query.page.number, "list");
    let page = entity.service().list(&ctx, query).await?;
    Ok((StatusCode::OK, Json(page)))
}

#[utoipa::path(
    get,
    path = "/api/{entity}/{id}",
    tag = "entities",
    params(
        ("entity" = String, Path, description = "Entity path segment"),
        ("id" = Uuid, Path, description = "Record id"),
        ReadParams
    ),
    responses(
        (status = 200, description = "The record"),
        (status = 400, description = "Invalid id", body = ErrorBody),
        (status = 404, description = "Unknown entity or record", body = ErrorBody)
    )
)]
pub async fn read(
    State(state): State<AppState>,
    identity: RequestIdentity,
    Path((segment, id_str)): Path<(String, String)>,
    Query(params): Query<ReadParams>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let entity = resolve(&state, &segment)?;
    let ctx = RequestContext::from(identity);
    let id = parse_id(&id_str)?;
    let record = entity
        .service()
        .get_by_id(&ctx, id, params.field_list())
        .await?
        .ok_or_else(|| AppError::NotFound(id_str))?;
    Ok((StatusCode::OK, Json(RecordBody { data: record })))
}

#[utoipa::path(
    put,
    path = "/api/{entity}/{id}",
    tag = "entities",
    params(
        ("entity" = String, Path, description = "Entity path segment"),
        ("id" = Uuid, Path, description = "Record id")
    ),
    responses(
        (status = 200, description = "The updated record"),
        (status = 400, description = "Mismatched or invalid id", body = ErrorBody),
        (status = 404, description = "Unknown entity or record", body = ErrorBody),
        (status = 422, description = "Field rule violated", body = ErrorBody)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    identity: RequestIdentity,
    Path((segment, id_str)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let entity = resolve(&state, &segment)?;
    let ctx = RequestContext::from(identity);
    let id = parse_id(&id_str)?;
    let body_id = body
        .get("id")
        .and_then(Value::as_str)
        .and_then(|s| Uuid::parse_str(s).ok());
    if body_id != Some(id) {
        return Err(AppError::BadRequest("mismatched id".into()));
    }
    tracing::debug!(entity = entity.meta().name, %id, "update");
    let record = entity
        .service()
        .update(&ctx, id, body)
        .await?
        .ok_or_else(|| AppError::NotFound(id_str))?;
    Ok((StatusCode::OK, Json(RecordBody { data: record })))
}

#[utoipa::path(
    patch,
    path = "/api/{entity}/{id}",
    tag = "entities",
    params(
        ("entity" = String, Path, description = "Entity path segment"),
        ("id" = Uuid, Path, description = "Record id")
    ),
    responses(
        (status = 200, description = "The patched record"),
        (status = 400, description = "Missing or empty patch document", body = ErrorBody),
        (status = 404, description = "Unknown entity or record", body = ErrorBody),
        (status = 422, description = "Patch could not be applied", body = ErrorBody)
    )
)]
pub async fn patch_record(
    State(state): State<AppState>,
    identity: RequestIdentity,
    Path((segment, id_str)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let entity = resolve(&state, &segment)?;
    let ctx = RequestContext::from(identity);
    let id = parse_id(&id_str)?;
    if body.is_null() {
        return Err(AppError::BadRequest("patch document is required".into()));
    }
    let document: PatchDocument = serde_json::from_value(body)
        .map_err(|_| AppError::BadRequest("invalid patch document".into()))?;
    if document.is_empty() {
        return Err(AppError::BadRequest("patch document is empty".into()));
    }
    tracing::debug!(entity = entity.meta().name, %id, ops = document.ops().len(), "patch");
    let record = entity
        .service()
        .patch(&ctx, id, document)
        .await?
        .ok_or_else(|| AppError::NotFound(id_str))?;
    Ok((StatusCode::OK, Json(RecordBody { data: record })))
}

#[utoipa::path(
    delete,
    path = "/api/{entity}/{id}",
    tag = "entities",
    params(
        ("entity" = String, Path, description = "Entity path segment"),
        ("id" = Uuid, Path, description = "Record id")
    ),
    responses(
        (status = 200, description = "Record deleted", body = DeleteBody),
        (status = 400, description = "Invalid id", body = ErrorBody),
        (status = 404, description = "Unknown entity or record", body = ErrorBody)
    )
)]
pub async fn delete_record(
    State(state): State<AppState>,
    identity: RequestIdentity,
    Path((segment, id_str)): Path<(String, String)>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let entity = resolve(&state, &segment)?;
    let ctx = RequestContext::from(identity);
    let id = parse_id(&id_str)?;
    tracing::debug!(entity = entity.meta().name, %id, "delete");
    if !entity.service().delete(&ctx, id).await? {
        return Err(AppError::NotFound(id_str));
    }
    Ok((StatusCode::OK, Json(DeleteBody { status: true })))
}
