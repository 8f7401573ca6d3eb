//! Admisión y ciclo de vida de reservas
//!
//! Único punto de escritura sobre reservas. La admisión serializa por
//! vehículo mediante un registro de mutexes asíncronos: el chequeo de
//! conflictos y la persistencia ocurren dentro de la sección crítica
//! del vehículo, de modo que entre admisiones concurrentes solapadas
//! sobre el mismo vehículo gana exactamente una. La búsqueda de
//! disponibilidad previa es consultiva y no reserva nada.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::booking::{Booking, BookingStatus, NewBooking};
use crate::models::vehicle::VehicleStatus;
use crate::models::window::BookingWindow;
use crate::repositories::{BookingRepository, VehicleRepository};
use crate::services::conflict_checker::ConflictChecker;
use crate::services::estimator::{estimate_cost, estimate_ride_duration};
use crate::services::observer::{BookingEvent, BookingObserver};
use crate::utils::errors::{AppError, AppResult};

/// Margen mínimo entre la cancelación y el inicio del viaje.
pub const CANCELLATION_CUTOFF_HOURS: i64 = 1;

pub struct BookingService {
    vehicles: Arc<dyn VehicleRepository>,
    bookings: Arc<dyn BookingRepository>,
    conflict_checker: ConflictChecker,
    observer: Arc<dyn BookingObserver>,
    admission_locks: Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
}

impl BookingService {
    pub fn new(
        vehicles: Arc<dyn VehicleRepository>,
        bookings: Arc<dyn BookingRepository>,
        conflict_checker: ConflictChecker,
        observer: Arc<dyn BookingObserver>,
    ) -> Self {
        Self {
            vehicles,
            bookings,
            conflict_checker,
            observer,
            admission_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Mutex de admisión del vehículo, creado en el primer uso.
    async fn admission_lock(&self, vehicle_id: Uuid) -> Arc<Mutex<()>> {
        let mut locks = self.admission_locks.lock().await;
        locks
            .entry(vehicle_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Admite una reserva nueva.
    ///
    /// Resuelve el vehículo, estima duración y ventana, y dentro de la
    /// sección crítica del vehículo revalida conflictos contra el estado
    /// actual del store antes de persistir como `confirmed`. Cualquier
    /// conflicto rechaza la admisión sin escribir nada.
    pub async fn create_booking(
        &self,
        vehicle_id: Uuid,
        customer_id: &str,
        from_pincode: &str,
        to_pincode: &str,
        start_time: DateTime<Utc>,
    ) -> AppResult<Booking> {
        let vehicle = self
            .vehicles
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Vehículo {} no encontrado", vehicle_id)))?;

        if vehicle.status != VehicleStatus::Active {
            return Err(AppError::NotAvailable(format!(
                "Vehículo {} no disponible para reservas (estado: {})",
                vehicle.id, vehicle.status
            )));
        }

        let estimate = estimate_ride_duration(from_pincode, to_pincode);
        if estimate.degraded {
            self.observer.notify(&BookingEvent::DegradedEstimate {
                from_pincode: from_pincode.to_string(),
                to_pincode: to_pincode.to_string(),
            });
        }
        let window = BookingWindow::from_start(start_time, estimate.duration())?;

        // sección crítica por vehículo: chequeo + persistencia
        let lock = self.admission_lock(vehicle_id).await;
        let _guard = lock.lock().await;

        let conflicts = self
            .conflict_checker
            .find_conflicts(vehicle_id, window, None)
            .await?;
        if !conflicts.is_empty() {
            self.observer.notify(&BookingEvent::AdmissionRejected {
                vehicle_id,
                conflicts: conflicts.len(),
            });
            return Err(AppError::Conflict {
                conflicts: conflicts.len(),
            });
        }

        let total_cost = estimate_cost(from_pincode, to_pincode, vehicle.capacity_kg, estimate.hours);

        let booking = self
            .bookings
            .create(NewBooking {
                vehicle_id,
                customer_id: customer_id.to_string(),
                from_pincode: from_pincode.to_string(),
                to_pincode: to_pincode.to_string(),
                start_time: window.start,
                end_time: window.end,
                estimated_ride_duration_hours: estimate.hours,
                total_cost,
            })
            .await?;

        self.observer.notify(&BookingEvent::Admitted {
            booking_id: booking.id,
            vehicle_id,
            customer_id: booking.customer_id.clone(),
        });

        Ok(booking)
    }

    /// Cancelación con guarda: solo desde `confirmed` y con al menos una
    /// hora de margen hasta el inicio del viaje.
    pub async fn cancel_booking(&self, booking_id: Uuid) -> AppResult<Booking> {
        let booking = self
            .bookings
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Reserva {} no encontrada", booking_id)))?;

        if booking.status != BookingStatus::Confirmed {
            return Err(AppError::InvalidState(format!(
                "Solo se cancelan reservas confirmadas (estado actual: {})",
                booking.status
            )));
        }

        if booking.start_time - Utc::now() < Duration::hours(CANCELLATION_CUTOFF_HOURS) {
            return Err(AppError::TooLate(format!(
                "La reserva {} inicia en menos de {} hora(s); ya no puede cancelarse",
                booking_id, CANCELLATION_CUTOFF_HOURS
            )));
        }

        let cancelled = self
            .bookings
            .update_status(booking_id, BookingStatus::Cancelled)
            .await?;
        self.observer
            .notify(&BookingEvent::Cancelled { booking_id });
        Ok(cancelled)
    }

    /// Override administrativo de estado: escritura incondicional a
    /// cualquiera de los cuatro estados conocidos. Camino deliberadamente
    /// permisivo, separado de la cancelación con guarda.
    pub async fn update_status(
        &self,
        booking_id: Uuid,
        status: BookingStatus,
    ) -> AppResult<Booking> {
        let current = self
            .bookings
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Reserva {} no encontrada", booking_id)))?;

        let updated = self.bookings.update_status(booking_id, status).await?;
        self.observer.notify(&BookingEvent::StatusOverridden {
            booking_id,
            from: current.status,
            to: status,
        });
        Ok(updated)
    }
}
