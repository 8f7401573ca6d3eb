//! Verificador de conflictos de ventana
//!
//! Pregunta única del motor: ¿qué reservas activas de este vehículo
//! solapan con la ventana propuesta? Devuelve los registros en
//! conflicto (los llamadores reportan la cardinalidad), nunca un
//! booleano. Solo lectura, seguro bajo concurrencia.

use std::sync::Arc;

use uuid::Uuid;

use crate::models::booking::Booking;
use crate::models::window::BookingWindow;
use crate::repositories::BookingRepository;
use crate::utils::errors::AppResult;

#[derive(Clone)]
pub struct ConflictChecker {
    bookings: Arc<dyn BookingRepository>,
}

impl ConflictChecker {
    pub fn new(bookings: Arc<dyn BookingRepository>) -> Self {
        Self { bookings }
    }

    /// Reservas activas (`confirmed` o `in-progress`) del vehículo cuya
    /// ventana solapa con `window`. `exclude_booking_id` omite una reserva
    /// concreta, para revalidar una reserva contra sí misma.
    pub async fn find_conflicts(
        &self,
        vehicle_id: Uuid,
        window: BookingWindow,
        exclude_booking_id: Option<Uuid>,
    ) -> AppResult<Vec<Booking>> {
        self.bookings
            .find_overlapping(vehicle_id, window, exclude_booking_id)
            .await
    }
}
