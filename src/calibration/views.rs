use super::models::{ActiveModel, Column, Entity, Model, CalibrationRecordCreate, CalibrationRecordUpdate};
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

const RESOURCE: &str = "calibration_record";

pub fn router(state: &AppState) -> OpenApiRouter {
    let router = OpenApiRouter::new()
        .routes(routes!(list_calibration_records, create_calibration_record))
        .routes(routes!(
            get_calibration_record,
            update_calibration_record,
            delete_calibration_record
        ))
        .with_state(state.clone());

    protect(router, state, "calibration")
}

#[utoipa::path(
    get,
    path = "/",
    params(ListQuery),
    responses(
        (status = OK, description = "One page of calibration records", body = Vec<Model>),
        (status = BAD_REQUEST, description = "Malformed filter, range or sort")
    ),
    tag = "calibration"
)]
pub async fn list_calibration_records(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> BusinessResult<(HeaderMap, Json<Vec<Model>>)> {
    let page = fetch_page::<Entity, _>(&state.db, &query, Column::CalibrationId, RESOURCE).await?;
    Ok((page.content_range("calibration"), Json(page.items)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    params(("id" = i32, Path, description = "Calibration record id")),
    responses(
        (status = OK, body = Model),
        (status = NOT_FOUND, description = "No such calibration record")
    ),
    tag = "calibration"
)]
pub async fn get_calibration_record(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> BusinessResult<Json<Model>> {
    Ok(Json(find_or_404::<Entity, _>(&state.db, id, RESOURCE).await?))
}

#[utoipa::path(
    post,
    path = "/",
    request_body = CalibrationRecordCreate,
    responses(
        (status = CREATED, body = Model),
        (status = BAD_REQUEST, description = "Invalid calibration record")
    ),
    tag = "calibration"
)]
pub async fn create_calibration_record(
    State(state): State<AppState>,
    Json(payload): Json<CalibrationRecordCreate>,
) -> BusinessResult<(StatusCode, Json<Model>)> {
    payload.validate()?;

    let created = ActiveModel::from(payload)
        .insert(&state.db)
        .await
        .map_err(|e| e.to_business_error(RESOURCE))?;

    tracing::info!(calibration_id = created.calibration_id, "Created calibration record");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/{id}",
    params(("id" = i32, Path, description = "Calibration record id")),
    request_body = CalibrationRecordUpdate,
    responses(
        (status = OK, body = Model),
        (status = BAD_REQUEST, description = "Invalid calibration record"),
        (status = NOT_FOUND, description = "No such calibration record")
    ),
    tag = "calibration"
)]
pub async fn update_calibration_record(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<CalibrationRecordUpdate>,
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
    params(("id" = i32, Path, description = "Calibration record id")),
    responses(
        (status = NO_CONTENT, description = "Calibration record deleted"),
        (status = NOT_FOUND, description = "No such calibration record")
    ),
    tag = "calibration"
)]
pub async fn delete_calibration_record(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> BusinessResult<StatusCode> {
    delete_or_404::<Entity, _>(&state.db, id, RESOURCE).await
}
