use super::models::{ActiveModel, Column, Entity, Model, ProductionRunCreate, ProductionRunUpdate};
use crate::common::auth::protect;
use crate::common::crud::{delete_or_404, find_or_404, mark_all_changed};
use crate::common::errors::{BusinessResult, DbErrorExt};
use crate::common::list::{ListQuery, fetch_page};
use crate::common::state::AppState;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Json;
use sea_orm::{ActiveModelTrait, IntoActiveModel};
use utoipa_axum::{router::OpenApiRouter, routes};

const RESOURCE: &str = "production_run";

pub fn router(state: &AppState) -> OpenApiRouter {
    let router = OpenApiRouter::new()
        .routes(routes!(list_production_runs, create_production_run))
        .routes(routes!(
            get_production_run,
            update_production_run,
            delete_production_run
        ))
        .with_state(state.clone());

    protect(router, state, "production")
}

#[utoipa::path(
    get,
    path = "/",
    params(ListQuery),
    responses(
        (status = OK, description = "One page of production runs", body = Vec<Model>),
        (status = BAD_REQUEST, description = "Malformed filter, range or sort")
    ),
    tag = "production"
)]
pub async fn list_production_runs(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> BusinessResult<(HeaderMap, Json<Vec<Model>>)> {
    let page = fetch_page::<Entity, _>(&state.db, &query, Column::ProduksiId, RESOURCE).await?;
    Ok((page.content_range("production"), Json(page.items)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    params(("id" = i32, Path, description = "Production run id")),
    responses(
        (status = OK, body = Model),
        (status = NOT_FOUND, description = "No such production run")
    ),
    tag = "production"
)]
pub async fn get_production_run(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> BusinessResult<Json<Model>> {
    Ok(Json(find_or_404::<Entity, _>(&state.db, id, RESOURCE).await?))
}

#[utoipa::path(
    post,
    path = "/",
    request_body = ProductionRunCreate,
    responses(
        (status = CREATED, body = Model),
        (status = BAD_REQUEST, description = "Invalid production run")
    ),
    tag = "production"
)]
pub async fn create_production_run(
    State(state): State<AppState>,
    Json(payload): Json<ProductionRunCreate>,
) -> BusinessResult<(StatusCode, Json<Model>)> {
    payload.validate()?;

    let created = ActiveModel::from(payload)
        .insert(&state.db)
        .await
        .map_err(|e| e.to_business_error(RESOURCE))?;

    tracing::info!(produksi_id = created.produksi_id, "Created production run");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/{id}",
    params(("id" = i32, Path, description = "Production run id")),
    request_body = ProductionRunUpdate,
    responses(
        (status = OK, body = Model),
        (status = BAD_REQUEST, description = "Invalid production run"),
        (status = NOT_FOUND, description = "No such production run")
    ),
    tag = "production"
)]
pub async fn update_production_run(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ProductionRunUpdate>,
) -> BusinessResult<Json<Model>> {
    let existing = find_or_404::<Entity, _>(&state.db, id, RESOURCE).await?;
    let merged = payload.merge_into(existing);
    merged.validate()?;

    let updated = mark_all_changed(merged.into_active_model())
        .update(&state.db)
        .await
        .map_err(|e| e.to_business_error(RESOURCE))?;

    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    params(("id" = i32, Path, description = "Production run id")),
    responses(
        (status = NO_CONTENT, description = "Production run deleted"),
        (status = NOT_FOUND, description = "No such production run")
    ),
    tag = "production"
)]
pub async fn delete_production_run(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> BusinessResult<StatusCode> {
    delete_or_404::<Entity, _>(&state.db, id, RESOURCE).await
}
