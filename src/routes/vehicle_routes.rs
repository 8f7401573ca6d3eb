use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::vehicle_dto::{
    AvailabilityQuery, AvailableVehicleResponse, CreateVehicleRequest, UpdateVehicleStatusRequest,
    VehicleResponse,
};
use crate::dto::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_vehicle))
        .route("/", get(list_vehicles))
        .route("/available", get(find_available_vehicles))
        .route("/:id", get(get_vehicle))
        .route("/:id/status", put(update_vehicle_status))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<VehicleResponse>>), AppError> {
    let controller = VehicleController::new(state.vehicles.clone(), state.availability.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_vehicles(
    State(state): State<AppState>,
) -> Result<Json<Vec<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.vehicles.clone(), state.availability.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn find_available_vehicles(
    State(state): State<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Vec<AvailableVehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.vehicles.clone(), state.availability.clone());
    let response = controller.find_available(query).await?;
    Ok(Json(response))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<VehicleResponse>, AppError> {
    let controller = VehicleController::new(state.vehicles.clone(), state.availability.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_vehicle_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateVehicleStatusRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.vehicles.clone(), state.availability.clone());
    let response = controller.update_status(id, request).await?;
    Ok(Json(response))
}
