//! Conflict check endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    conflict::{ConflictReport, ConflictStatus},
    error::AppResult,
    models::EquipmentList,
    services::conflicts::{ConflictCheck, ConflictCheckKey},
};

/// Conflict check request
#[derive(Deserialize, ToSchema)]
pub struct ConflictCheckRequest {
    /// List being edited, possibly with unsaved changes
    pub equipment_list: EquipmentList,
    /// Other lists open in the same editing session
    #[serde(default)]
    pub other_lists: Vec<EquipmentList>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ConflictState {
    NotApplicable,
    Unavailable,
    Loading,
    Resolved,
}

/// Conflict check response
#[derive(Serialize, ToSchema)]
pub struct ConflictCheckResponse {
    /// Inputs this answer was computed for
    pub key: ConflictCheckKey,
    pub state: ConflictState,
    /// True only for a resolved over-reservation
    pub is_conflict: bool,
    pub report: Option<ConflictReport>,
    /// Failure reason, or the breakdown summary of a resolved check
    pub message: Option<String>,
}

impl From<ConflictCheck> for ConflictCheckResponse {
    fn from(check: ConflictCheck) -> Self {
        let (state, report, message) = match check.status {
            ConflictStatus::NotApplicable => (ConflictState::NotApplicable, None, None),
            ConflictStatus::Unavailable { reason } => (ConflictState::Unavailable, None, Some(reason)),
            ConflictStatus::Loading => (ConflictState::Loading, None, None),
            ConflictStatus::Resolved(report) => {
                let summary = report.summary();
                (ConflictState::Resolved, Some(report), Some(summary))
            }
        };
        Self {
            key: check.key,
            state,
            is_conflict: report.as_ref().is_some_and(ConflictReport::is_conflict),
            report,
            message,
        }
    }
}

/// Check an equipment list for reservation conflicts on one equipment
#[utoipa::path(
    post,
    path = "/equipment/{id}/conflicts",
    tag = "conflicts",
    params(("id" = i32, Path, description = "Equipment ID")),
    request_body = ConflictCheckRequest,
    responses(
        (status = 200, description = "Conflict state", body = ConflictCheckResponse),
        (status = 400, description = "Invalid dates or units in a submitted list", body = crate::error::ErrorResponse),
        (status = 404, description = "Equipment not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn check_conflicts(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(request): Json<ConflictCheckRequest>,
) -> AppResult<Json<ConflictCheckResponse>> {
    let check = state
        .services
        .conflicts
        .check(id, &request.equipment_list, &request.other_lists)
        .await?;
    Ok(Json(check.into()))
}
