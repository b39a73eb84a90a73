//! Equipment list ordering endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{CreateEquipmentListEntry, EquipmentListEntry},
    ordering::{
        Container, DropPosition, DropTarget, MoveDirection, OrderedRow, OrderingChanges, RowRef,
    },
};

/// Move request
#[derive(Deserialize, ToSchema)]
pub struct MoveRequest {
    /// Entry or heading to move
    pub item: RowRef,
}

/// Drag and drop request
#[derive(Deserialize, ToSchema)]
pub struct DropRequest {
    pub dragged: RowRef,
    pub target: RowRef,
    pub position: DropPosition,
}

/// Move an entry to the list or to one of its headings
#[derive(Deserialize, ToSchema)]
pub struct MoveIntoContainerRequest {
    pub container: Container,
    /// Row to drop next to; the entry is appended when absent
    pub target: Option<RowRef>,
    /// Side of `target`, `after` by default
    pub position: Option<DropPosition>,
}

impl MoveIntoContainerRequest {
    fn drop_target(&self) -> AppResult<Option<DropTarget<RowRef>>> {
        match (self.target, self.position) {
            (Some(key), position) => Ok(Some(DropTarget {
                key,
                position: position.unwrap_or(DropPosition::After),
            })),
            (None, Some(_)) => Err(AppError::BadRequest(
                "position requires a target".to_string(),
            )),
            (None, None) => Ok(None),
        }
    }
}

/// Get the sorted rows of an equipment list
#[utoipa::path(
    get,
    path = "/equipment-lists/{id}/ordering",
    tag = "equipment_lists",
    params(("id" = i32, Path, description = "Equipment list ID")),
    responses(
        (status = 200, description = "Sorted rows with move guards", body = Vec<OrderedRow>),
        (status = 404, description = "Equipment list not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_ordering(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<OrderedRow>>> {
    let rows = state.services.ordering.view(id).await?;
    Ok(Json(rows))
}

/// Append an entry to an equipment list or one of its headings
#[utoipa::path(
    post,
    path = "/equipment-lists/{id}/entries",
    tag = "equipment_lists",
    params(("id" = i32, Path, description = "Equipment list ID")),
    request_body = CreateEquipmentListEntry,
    responses(
        (status = 201, description = "Entry created", body = EquipmentListEntry),
        (status = 404, description = "Unknown list or heading", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_entry(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<CreateEquipmentListEntry>,
) -> AppResult<(StatusCode, Json<EquipmentListEntry>)> {
    if data.number_of_units < 0 {
        return Err(AppError::Validation(
            "number_of_units cannot be negative".to_string(),
        ));
    }
    let entry = state.services.ordering.append_entry(id, &data).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// Move an entry or heading one position up
#[utoipa::path(
    post,
    path = "/equipment-lists/{id}/move-up",
    tag = "equipment_lists",
    params(("id" = i32, Path, description = "Equipment list ID")),
    request_body = MoveRequest,
    responses(
        (status = 200, description = "Applied changes", body = OrderingChanges)
    )
)]
pub async fn move_up(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(request): Json<MoveRequest>,
) -> AppResult<Json<OrderingChanges>> {
    let changes = state
        .services
        .ordering
        .move_item(id, request.item, MoveDirection::Up)
        .await?;
    Ok(Json(changes))
}

/// Move an entry or heading one position down
#[utoipa::path(
    post,
    path = "/equipment-lists/{id}/move-down",
    tag = "equipment_lists",
    params(("id" = i32, Path, description = "Equipment list ID")),
    request_body = MoveRequest,
    responses(
        (status = 200, description = "Applied changes", body = OrderingChanges)
    )
)]
pub async fn move_down(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(request): Json<MoveRequest>,
) -> AppResult<Json<OrderingChanges>> {
    let changes = state
        .services
        .ordering
        .move_item(id, request.item, MoveDirection::Down)
        .await?;
    Ok(Json(changes))
}

/// Drop a row before or after another row
#[utoipa::path(
    post,
    path = "/equipment-lists/{id}/drop",
    tag = "equipment_lists",
    params(("id" = i32, Path, description = "Equipment list ID")),
    request_body = DropRequest,
    responses(
        (status = 200, description = "Applied changes", body = OrderingChanges),
        (status = 422, description = "Heading dropped inside a heading", body = crate::error::ErrorResponse)
    )
)]
pub async fn drop_item(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(request): Json<DropRequest>,
) -> AppResult<Json<OrderingChanges>> {
    let changes = state
        .services
        .ordering
        .drop_item(id, request.dragged, request.target, request.position)
        .await?;
    Ok(Json(changes))
}

/// Move an entry into the list or one of its headings
#[utoipa::path(
    post,
    path = "/equipment-lists/{id}/entries/{entry_id}/container",
    tag = "equipment_lists",
    params(
        ("id" = i32, Path, description = "Equipment list ID"),
        ("entry_id" = i32, Path, description = "Entry ID")
    ),
    request_body = MoveIntoContainerRequest,
    responses(
        (status = 200, description = "Applied changes", body = OrderingChanges),
        (status = 400, description = "Position without target", body = crate::error::ErrorResponse)
    )
)]
pub async fn move_into_container(
    State(state): State<crate::AppState>,
    Path((id, entry_id)): Path<(i32, i32)>,
    Json(request): Json<MoveIntoContainerRequest>,
) -> AppResult<Json<OrderingChanges>> {
    let target = request.drop_target()?;
    let changes = state
        .services
        .ordering
        .move_into_container(id, entry_id, request.container, target)
        .await?;
    Ok(Json(changes))
}
