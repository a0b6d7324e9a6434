use super::models::{ActiveModel, Column, Entity, QualityControlEntry, QualityControlInput};
use crate::common::auth::protect;
use crate::common::crud::{delete_or_404, find_or_404};
use crate::common::errors::{BusinessResult, DbErrorExt};
use crate::common::list::{ListQuery, fetch_page};
use crate::common::state::AppState;
use crate::not_found;
use crate::services::department::Department;
use crate::services::department_resolver::SeaOrmLookup;
use crate::services::frontend_code::{CodeError, decode};
use crate::services::linking_service::{DepartmentLinks, LinkReport, apply_frontend_code};
use crate::validation_error;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Json;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, TransactionTrait,
};
use utoipa_axum::{router::OpenApiRouter, routes};

const RESOURCE: &str = "quality_control_entry";

pub fn router(state: &AppState) -> OpenApiRouter {
    let router = OpenApiRouter::new()
        .routes(routes!(list_entries, create_entry))
        .routes(routes!(get_entry, update_entry, delete_entry))
        .routes(routes!(get_entry_by_code))
        .with_state(state.clone());

    protect(router, state, "quality control")
}

#[utoipa::path(
    get,
    path = "/",
    params(ListQuery),
    responses(
        (status = OK, description = "One page of quality-control entries", body = Vec<QualityControlEntry>),
        (status = BAD_REQUEST, description = "Malformed filter, range or sort")
    ),
    tag = "quality_control"
)]
pub async fn list_entries(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> BusinessResult<(HeaderMap, Json<Vec<QualityControlEntry>>)> {
    let page = fetch_page::<Entity, _>(&state.db, &query, Column::QcId, RESOURCE)
        .await?
        .map(QualityControlEntry::from);
    Ok((page.content_range("quality_control"), Json(page.items)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    params(("id" = i32, Path, description = "Quality-control entry id (qc_id)")),
    responses(
        (status = OK, body = QualityControlEntry),
        (status = NOT_FOUND, description = "No such entry")
    ),
    tag = "quality_control"
)]
pub async fn get_entry(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> BusinessResult<Json<QualityControlEntry>> {
    let model = find_or_404::<Entity, _>(&state.db, id, RESOURCE).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    get,
    path = "/frontend/{code}",
    params(("code" = String, Path, description = "Display code of the entry, e.g. PRD-7")),
    responses(
        (status = OK, body = QualityControlEntry),
        (status = BAD_REQUEST, description = "Code is not PREFIX-NUMBER"),
        (status = NOT_FOUND, description = "No entry has this code")
    ),
    tag = "quality_control",
    summary = "Get entry by display code"
)]
pub async fn get_entry_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> BusinessResult<Json<QualityControlEntry>> {
    let decoded = decode(&code).map_err(|err| validation_error!("code", err))?;

    let department = match Department::from_prefix(&decoded.prefix) {
        Ok(department) => department,
        Err(CodeError::UnknownDepartment(_)) => return Err(not_found!(RESOURCE, code)),
        Err(err) => return Err(validation_error!("code", err)),
    };
    let qc_id = i32::try_from(decoded.numeric_id).map_err(|_| not_found!(RESOURCE, &code))?;

    let model = Entity::find()
        .filter(Column::QcId.eq(qc_id))
        .filter(Column::Department.eq(department.name()))
        .one(&state.db)
        .await
        .map_err(|e| e.to_business_error(RESOURCE))?
        .ok_or_else(|| not_found!(RESOURCE, &code))?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    post,
    path = "/",
    request_body = QualityControlInput,
    responses(
        (status = CREATED, description = "Entry stored; `link` reports how the frontend code resolved", body = QualityControlEntry),
        (status = BAD_REQUEST, description = "Invalid entry fields")
    ),
    tag = "quality_control"
)]
pub async fn create_entry(
    State(state): State<AppState>,
    Json(payload): Json<QualityControlInput>,
) -> BusinessResult<(StatusCode, Json<QualityControlEntry>)> {
    let entry = payload.validate()?;

    let txn = state.db.begin().await.map_err(|e| e.to_business_error(RESOURCE))?;

    let mut links = DepartmentLinks::default();
    let outcome = apply_frontend_code(&mut links, payload.frontend_code(), &SeaOrmLookup::new(&txn))
        .await
        .map_err(|e| e.to_business_error(RESOURCE))?;

    let mut active = <ActiveModel as Default>::default();
    entry.apply(&mut active, links);
    let created = active
        .insert(&txn)
        .await
        .map_err(|e| e.to_business_error(RESOURCE))?;

    txn.commit().await.map_err(|e| e.to_business_error(RESOURCE))?;

    tracing::info!(
        qc_id = created.qc_id,
        linked = links.linked_count(),
        "Created quality-control entry"
    );
    let response = QualityControlEntry::from(created).with_link(LinkReport::from(&outcome));
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/{id}",
    params(("id" = i32, Path, description = "Quality-control entry id (qc_id)")),
    request_body = QualityControlInput,
    responses(
        (status = OK, description = "Entry stored; `link` reports how the frontend code resolved", body = QualityControlEntry),
        (status = BAD_REQUEST, description = "Invalid entry fields"),
        (status = NOT_FOUND, description = "No such entry")
    ),
    tag = "quality_control"
)]
pub async fn update_entry(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<QualityControlInput>,
) -> BusinessResult<Json<QualityControlEntry>> {
    let entry = payload.validate()?;

    let txn = state.db.begin().await.map_err(|e| e.to_business_error(RESOURCE))?;
    let existing = find_or_404::<Entity, _>(&txn, id, RESOURCE).await?;
    let previous = existing.links();

    let mut links = previous;
    let outcome = apply_frontend_code(&mut links, payload.frontend_code(), &SeaOrmLookup::new(&txn))
        .await
        .map_err(|e| e.to_business_error(RESOURCE))?;

    let mut active = existing.into_active_model();
    entry.apply(&mut active, links);
    let updated = active
        .update(&txn)
        .await
        .map_err(|e| e.to_business_error(RESOURCE))?;

    txn.commit().await.map_err(|e| e.to_business_error(RESOURCE))?;

    if previous != links {
        tracing::debug!(qc_id = id, ?previous, current = ?links, "Department links changed");
    }
    let response = QualityControlEntry::from(updated).with_link(LinkReport::from(&outcome));
    Ok(Json(response))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    params(("id" = i32, Path, description = "Quality-control entry id (qc_id)")),
    responses(
        (status = NO_CONTENT, description = "Entry deleted"),
        (status = NOT_FOUND, description = "No such entry")
    ),
    tag = "quality_control"
)]
pub async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> BusinessResult<StatusCode> {
    delete_or_404::<Entity, _>(&state.db, id, RESOURCE).await
}
