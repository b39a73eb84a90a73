//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{conflicts, equipment_lists, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Backstage API",
        version = "0.4.0",
        description = "Rental equipment booking REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Conflicts
        conflicts::check_conflicts,
        // Equipment lists
        equipment_lists::get_ordering,
        equipment_lists::create_entry,
        equipment_lists::move_up,
        equipment_lists::move_down,
        equipment_lists::drop_item,
        equipment_lists::move_into_container,
    ),
    components(
        schemas(
            // Models
            crate::models::Equipment,
            crate::models::Booking,
            crate::models::BookingStatus,
            crate::models::EquipmentList,
            crate::models::EquipmentListEntry,
            crate::models::EquipmentListHeading,
            crate::models::CreateEquipmentListEntry,
            crate::models::ReservationWindow,
            // Conflicts
            conflicts::ConflictCheckRequest,
            conflicts::ConflictCheckResponse,
            conflicts::ConflictState,
            crate::services::conflicts::ConflictCheckKey,
            crate::conflict::ConflictReport,
            crate::conflict::ConflictContribution,
            crate::conflict::Classification,
            crate::conflict::ContributionSource,
            // Ordering
            equipment_lists::MoveRequest,
            equipment_lists::DropRequest,
            equipment_lists::MoveIntoContainerRequest,
            crate::ordering::RowRef,
            crate::ordering::RowKind,
            crate::ordering::Container,
            crate::ordering::ContainerKind,
            crate::ordering::DropPosition,
            crate::ordering::MoveGuards,
            crate::ordering::OrderedRow,
            crate::ordering::OrderedEntry,
            crate::ordering::OrderingChanges,
            crate::ordering::SortIndexUpdate,
            crate::ordering::Reparent,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "conflicts", description = "Equipment reservation conflicts"),
        (name = "equipment_lists", description = "Equipment list ordering")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
