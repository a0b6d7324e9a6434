use super::models::{ActiveModel, Column, Entity, Model, OverhaulJobCreate, OverhaulJobUpdate};
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

const RESOURCE: &str = "overhaul_job";

pub fn router(state: &AppState) -> OpenApiRouter {
    let router = OpenApiRouter::new()
        .routes(routes!(list_overhaul_jobs, create_overhaul_job))
        .routes(routes!(
            get_overhaul_job,
            update_overhaul_job,
            delete_overhaul_job
        ))
        .with_state(state.clone());

    protect(router, state, "overhaul")
}

#[utoipa::path(
    get,
    path = "/",
    params(ListQuery),
    responses(
        (status = OK, description = "One page of overhaul jobs", body = Vec<Model>),
        (status = BAD_REQUEST, description = "Malformed filter, range or sort")
    ),
    tag = "overhaul"
)]
pub async fn list_overhaul_jobs(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> BusinessResult<(HeaderMap, Json<Vec<Model>>)> {
    let page = fetch_page::<Entity, _>(&state.db, &query, Column::OverhaulId, RESOURCE).await?;
    Ok((page.content_range("overhaul"), Json(page.items)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    params(("id" = i32, Path, description = "Overhaul job id")),
    responses(
        (status = OK, body = Model),
        (status = NOT_FOUND, description = "No such overhaul job")
    ),
    tag = "overhaul"
)]
pub async fn get_overhaul_job(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> BusinessResult<Json<Model>> {
    Ok(Json(find_or_404::<Entity, _>(&state.db, id, RESOURCE).await?))
}

#[utoipa::path(
    post,
    path = "/",
    request_body = OverhaulJobCreate,
    responses(
        (status = CREATED, body = Model),
        (status = BAD_REQUEST, description = "Invalid overhaul job")
    ),
    tag = "overhaul"
)]
pub async fn create_overhaul_job(
    State(state): State<AppState>,
    Json(payload): Json<OverhaulJobCreate>,
) -> BusinessResult<(StatusCode, Json<Model>)> {
    payload.validate()?;

    let created = ActiveModel::from(payload)
        .insert(&state.db)
        .await
        .map_err(|e| e.to_business_error(RESOURCE))?;

    tracing::info!(overhaul_id = created.overhaul_id, "Created overhaul job");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/{id}",
    params(("id" = i32, Path, description = "Overhaul job id")),
    request_body = OverhaulJobUpdate,
    responses(
        (status = OK, body = Model),
        (status = BAD_REQUEST, description = "Invalid overhaul job"),
        (status = NOT_FOUND, description = "No such overhaul job")
    ),
    tag = "overhaul"
)]
pub async fn update_overhaul_job(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<OverhaulJobUpdate>,
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
    params(("id" = i32, Path, description = "Overhaul job id")),
    responses(
        (status = NO_CONTENT, description = "Overhaul job deleted"),
        (status = NOT_FOUND, description = "No such overhaul job")
    ),
    tag = "overhaul"
)]
pub async fn delete_overhaul_job(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> BusinessResult<StatusCode> {
    delete_or_404::<Entity, _>(&state.db, id, RESOURCE).await
}
