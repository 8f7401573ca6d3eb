use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::dto::booking_dto::{
    BookingListQuery, BookingResponse, CreateBookingRequest, UpdateBookingStatusRequest,
};
use crate::dto::ApiResponse;
use crate::models::booking::{BookingFilters, BookingStatus};
use crate::repositories::BookingRepository;
use crate::services::BookingService;
use crate::utils::errors::AppError;

pub struct BookingController {
    repository: Arc<dyn BookingRepository>,
    service: Arc<BookingService>,
}

impl BookingController {
    pub fn new(repository: Arc<dyn BookingRepository>, service: Arc<BookingService>) -> Self {
        Self {
            repository,
            service,
        }
    }

    pub async fn create(
        &self,
        request: CreateBookingRequest,
    ) -> Result<ApiResponse<BookingResponse>, AppError> {
        // Validar campos (pincodes, cliente, inicio en el futuro)
        request.validate()?;

        let booking = self
            .service
            .create_booking(
                request.vehicle_id,
                request.customer_id.trim(),
                &request.from_pincode,
                &request.to_pincode,
                request.start_time,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            BookingResponse::from(booking),
            "Reserva confirmada exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<BookingResponse, AppError> {
        let booking = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Reserva no encontrada".to_string()))?;

        Ok(BookingResponse::from(booking))
    }

    pub async fn list(&self, query: BookingListQuery) -> Result<Vec<BookingResponse>, AppError> {
        let status = query
            .status
            .as_deref()
            .map(|s| s.parse::<BookingStatus>())
            .transpose()?;

        let bookings = self
            .repository
            .list(BookingFilters {
                vehicle_id: query.vehicle_id,
                customer_id: query.customer_id,
                status,
                limit: query.limit,
                offset: query.offset,
            })
            .await?;

        Ok(bookings.into_iter().map(BookingResponse::from).collect())
    }

    pub async fn cancel(&self, id: Uuid) -> Result<ApiResponse<BookingResponse>, AppError> {
        let booking = self.service.cancel_booking(id).await?;

        Ok(ApiResponse::success_with_message(
            BookingResponse::from(booking),
            "Reserva cancelada exitosamente".to_string(),
        ))
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        request: UpdateBookingStatusRequest,
    ) -> Result<ApiResponse<BookingResponse>, AppError> {
        let status: BookingStatus = request.status.parse()?;

        let booking = self.service.update_status(id, status).await?;

        Ok(ApiResponse::success_with_message(
            BookingResponse::from(booking),
            "Estado de la reserva actualizado".to_string(),
        ))
    }
}
