use super::models::{ActiveModel, Column, Entity, Model, InventoryItemCreate, InventoryItemUpdate};
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

const RESOURCE: &str = "inventory_item";

pub fn router(state: &AppState) -> OpenApiRouter {
    let router = OpenApiRouter::new()
        .routes(routes!(list_inventory_items, create_inventory_item))
        .routes(routes!(
            get_inventory_item,
            update_inventory_item,
            delete_inventory_item
        ))
        .with_state(state.clone());

    protect(router, state, "inventory")
}

#[utoipa::path(
    get,
    path = "/",
    params(ListQuery),
    responses(
        (status = OK, description = "One page of inventory items", body = Vec<Model>),
        (status = BAD_REQUEST, description = "Malformed filter, range or sort")
    ),
    tag = "inventory"
)]
pub async fn list_inventory_items(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> BusinessResult<(HeaderMap, Json<Vec<Model>>)> {
    let page = fetch_page::<Entity, _>(&state.db, &query, Column::InventoryId, RESOURCE).await?;
    Ok((page.content_range("inventory"), Json(page.items)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    params(("id" = i32, Path, description = "Inventory item id")),
    responses(
        (status = OK, body = Model),
        (status = NOT_FOUND, description = "No such inventory item")
    ),
    tag = "inventory"
)]
pub async fn get_inventory_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> BusinessResult<Json<Model>> {
    Ok(Json(find_or_404::<Entity, _>(&state.db, id, RESOURCE).await?))
}

#[utoipa::path(
    post,
    path = "/",
    request_body = InventoryItemCreate,
    responses(
        (status = CREATED, body = Model),
        (status = BAD_REQUEST, description = "Invalid inventory item"),
        (status = CONFLICT, description = "Item code already in use")
    ),
    tag = "inventory"
)]
pub async fn create_inventory_item(
    State(state): State<AppState>,
    Json(payload): Json<InventoryItemCreate>,
) -> BusinessResult<(StatusCode, Json<Model>)> {
    payload.validate()?;

    let created = ActiveModel::from(payload)
        .insert(&state.db)
        .await
        .map_err(|e| e.to_business_error(RESOURCE))?;

    tracing::info!(inventory_id = created.inventory_id, "Created inventory item");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/{id}",
    params(("id" = i32, Path, description = "Inventory item id")),
    request_body = InventoryItemUpdate,
    responses(
        (status = OK, body = Model),
        (status = BAD_REQUEST, description = "Invalid inventory item"),
        (status = NOT_FOUND, description = "No such inventory item"),
        (status = CONFLICT, description = "Item code already in use")
    ),
    tag = "inventory"
)]
pub async fn update_inventory_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<InventoryItemUpdate>,
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
    params(("id" = i32, Path, description = "Inventory item id")),
    responses(
        (status = NO_CONTENT, description = "Inventory item deleted"),
        (status = NOT_FOUND, description = "No such inventory item")
    ),
    tag = "inventory"
)]
pub async fn delete_inventory_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> BusinessResult<StatusCode> {
    delete_or_404::<Entity, _>(&state.db, id, RESOURCE).await
}
