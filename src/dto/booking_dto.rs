//! DTOs de Booking
//!
//! Formas de entrada/salida de la API de reservas. Campos camelCase en el
//! wire (`vehicleId`, `fromPincode`, `estimatedRideDurationHours`, ...) por
//! compatibilidad con los clientes existentes; `totalCost` se serializa como
//! string decimal exacto.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::booking::{Booking, BookingStatus};
use crate::utils::validation::{validate_future_start, PINCODE_RE};

/// Request de admisión de una reserva nueva
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub vehicle_id: Uuid,

    #[validate(length(min = 1, max = 100, message = "customerId must be 1-100 characters"))]
    pub customer_id: String,

    #[validate(regex(path = "PINCODE_RE", message = "fromPincode must be exactly 6 digits"))]
    pub from_pincode: String,

    #[validate(regex(path = "PINCODE_RE", message = "toPincode must be exactly 6 digits"))]
    pub to_pincode: String,

    #[validate(custom = "validate_future_start")]
    pub start_time: DateTime<Utc>,
}

/// Request administrativo de cambio de estado.
/// Valida el vocabulario y escribe sin verificar el grafo de transiciones;
/// la cancelación con ventana de gracia va por su propia ruta.
#[derive(Debug, Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: String,
}

/// Query string para listados de reservas
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingListQuery {
    pub vehicle_id: Option<Uuid>,
    pub customer_id: Option<String>,
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Response de reserva para la API
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub customer_id: String,
    pub from_pincode: String,
    pub to_pincode: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub estimated_ride_duration_hours: i64,
    pub status: BookingStatus,
    pub total_cost: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            vehicle_id: booking.vehicle_id,
            customer_id: booking.customer_id,
            from_pincode: booking.from_pincode,
            to_pincode: booking.to_pincode,
            start_time: booking.start_time,
            end_time: booking.end_time,
            estimated_ride_duration_hours: booking.estimated_ride_duration_hours,
            status: booking.status,
            total_cost: booking.total_cost,
            created_at: booking.created_at,
        }
    }
}
