use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::booking_controller::BookingController;
use crate::dto::booking_dto::{
    BookingListQuery, BookingResponse, CreateBookingRequest, UpdateBookingStatusRequest,
};
use crate::dto::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_booking_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_booking))
        .route("/", get(list_bookings))
        .route("/:id", get(get_booking))
        .route("/:id/cancel", post(cancel_booking))
        .route("/:id/status", put(update_booking_status))
}

async fn create_booking(
    State(state): State<AppState>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BookingResponse>>), AppError> {
    let controller = BookingController::new(state.bookings.clone(), state.booking_service.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_bookings(
    State(state): State<AppState>,
    Query(query): Query<BookingListQuery>,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    let controller = BookingController::new(state.bookings.clone(), state.booking_service.clone());
    let response = controller.list(query).await?;
    Ok(Json(response))
}

async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingResponse>, AppError> {
    let controller = BookingController::new(state.bookings.clone(), state.booking_service.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn cancel_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<BookingResponse>>, AppError> {
    let controller = BookingController::new(state.bookings.clone(), state.booking_service.clone());
    let response = controller.cancel(id).await?;
    Ok(Json(response))
}

async fn update_booking_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateBookingStatusRequest>,
) -> Result<Json<ApiResponse<BookingResponse>>, AppError> {
    let controller = BookingController::new(state.bookings.clone(), state.booking_service.clone());
    let response = controller.update_status(id, request).await?;
    Ok(Json(response))
}
