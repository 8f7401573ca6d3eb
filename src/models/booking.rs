//! Modelo de Booking
//!
//! Una reserva ocupa una ventana semiabierta `[start_time, end_time)` de un
//! vehículo. La referencia al vehículo se fija en la creación y nunca se
//! reasigna. Solo las reservas activas (`confirmed` / `in-progress`) cuentan
//! para la detección de conflictos.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::window::BookingWindow;
use crate::utils::errors::AppError;

/// Estado de la reserva.
///
/// Transiciones vigiladas: `confirmed -> in-progress -> completed` y
/// `confirmed -> cancelled`. La ruta administrativa de actualización de
/// estado escribe sin verificar el grafo (ver `BookingService`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum BookingStatus {
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::InProgress => "in-progress",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Una reserva activa ocupa su ventana y cuenta para conflictos.
    pub fn is_active(&self) -> bool {
        matches!(self, BookingStatus::Confirmed | BookingStatus::InProgress)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "confirmed" => Ok(BookingStatus::Confirmed),
            "in-progress" => Ok(BookingStatus::InProgress),
            "completed" => Ok(BookingStatus::Completed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(AppError::BadRequest(format!(
                "Estado de reserva desconocido: '{}'",
                other
            ))),
        }
    }
}

/// Booking principal - mapea a la tabla bookings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
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

impl Booking {
    /// Ventana ocupada por esta reserva.
    pub fn window(&self) -> BookingWindow {
        BookingWindow::new(self.start_time, self.end_time)
    }
}

/// Datos para persistir una reserva nueva. El repositorio asigna `id`,
/// `created_at` y el estado inicial `confirmed`.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub vehicle_id: Uuid,
    pub customer_id: String,
    pub from_pincode: String,
    pub to_pincode: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub estimated_ride_duration_hours: i64,
    pub total_cost: Decimal,
}

/// Filtros para listados de reservas
#[derive(Debug, Clone, Default)]
pub struct BookingFilters {
    pub vehicle_id: Option<Uuid>,
    pub customer_id: Option<String>,
    pub status: Option<BookingStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_states_are_confirmed_and_in_progress() {
        assert!(BookingStatus::Confirmed.is_active());
        assert!(BookingStatus::InProgress.is_active());
        assert!(!BookingStatus::Completed.is_active());
        assert!(!BookingStatus::Cancelled.is_active());
    }

    #[test]
    fn status_parses_kebab_case() {
        assert_eq!(
            "in-progress".parse::<BookingStatus>().unwrap(),
            BookingStatus::InProgress
        );
        assert!("in_progress".parse::<BookingStatus>().is_err());
        assert!("unknown".parse::<BookingStatus>().is_err());
    }
}
