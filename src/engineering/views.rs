use super::models::{ActiveModel, Column, Entity, Model, EngineeringProjectCreate, EngineeringProjectUpdate};
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

const RESOURCE: &str = "engineering_project";

pub fn router(state: &AppState) -> OpenApiRouter {
    let router = OpenApiRouter::new()
        .routes(routes!(list_engineering_projects, create_engineering_project))
        .routes(routes!(
            get_engineering_project,
            update_engineering_project,
            delete_engineering_project
        ))
        .with_state(state.clone());

    protect(router, state, "engineering")
}

#[utoipa::path(
    get,
    path = "/",
    params(ListQuery),
    responses(
        (status = OK, description = "One page of engineering projects", body = Vec<Model>),
        (status = BAD_REQUEST, description = "Malformed filter, range or sort")
    ),
    tag = "engineering"
)]
pub async fn list_engineering_projects(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> BusinessResult<(HeaderMap, Json<Vec<Model>>)> {
    let page = fetch_page::<Entity, _>(&state.db, &query, Column::RekayasaId, RESOURCE).await?;
    Ok((page.content_range("engineering"), Json(page.items)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    params(("id" = i32, Path, description = "Engineering project id")),
    responses(
        (status = OK, body = Model),
        (status = NOT_FOUND, description = "No such engineering project")
    ),
    tag = "engineering"
)]
pub async fn get_engineering_project(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> BusinessResult<Json<Model>> {
    Ok(Json(find_or_404::<Entity, _>(&state.db, id, RESOURCE).await?))
}

#[utoipa::path(
    post,
    path = "/",
    request_body = EngineeringProjectCreate,
    responses(
        (status = CREATED, body = Model),
        (status = BAD_REQUEST, description = "Invalid engineering project")
    ),
    tag = "engineering"
)]
pub async fn create_engineering_project(
    State(state): State<AppState>,
    Json(payload): Json<EngineeringProjectCreate>,
) -> BusinessResult<(StatusCode, Json<Model>)> {
    payload.validate()?;

    let created = ActiveModel::from(payload)
        .insert(&state.db)
        .await
        .map_err(|e| e.to_business_error(RESOURCE))?;

    tracing::info!(rekayasa_id = created.rekayasa_id, "Created engineering project");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/{id}",
    params(("id" = i32, Path, description = "Engineering project id")),
    request_body = EngineeringProjectUpdate,
    responses(
        (status = OK, body = Model),
        (status = BAD_REQUEST, description = "Invalid engineering project"),
        (status = NOT_FOUND, description = "No such engineering project")
    ),
    tag = "engineering"
)]
pub async fn update_engineering_project(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<EngineeringProjectUpdate>,
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
    params(("id" = i32, Path, description = "Engineering project id")),
    responses(
        (status = NO_CONTENT, description = "Engineering project deleted"),
        (status = NOT_FOUND, description = "No such engineering project")
    ),
    tag = "engineering"
)]
pub async fn delete_engineering_project(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> BusinessResult<StatusCode> {
    delete_or_404::<Entity, _>(&state.db, id, RESOURCE).await
}
