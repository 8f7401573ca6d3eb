//! Ventana de reserva
//!
//! Intervalo semiabierto `[start, end)` sobre el tiempo de un vehículo.
//! Dos ventanas se solapan si y solo si `a.start < b.end && b.start < a.end`:
//! el predicado es simétrico y excluye la adyacencia exacta (una reserva que
//! termina justo cuando otra empieza no es conflicto).

use chrono::{DateTime, Duration, Utc};

use crate::utils::errors::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl BookingWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Construye la ventana `[start, start + duration)`. La duración mínima
    /// de 1 hora la garantiza el estimador. Un inicio tan lejano que el
    /// final ya no cabe en el calendario de `chrono` se rechaza como
    /// `BadRequest`: el validador de entrada solo exige que el inicio sea
    /// futuro, sin cota superior.
    pub fn from_start(start: DateTime<Utc>, duration: Duration) -> AppResult<Self> {
        let end = start.checked_add_signed(duration).ok_or_else(|| {
            AppError::BadRequest(format!(
                "Hora de inicio {} demasiado lejana: la ventana excede el rango de fechas soportado",
                start
            ))
        })?;
        Ok(Self { start, end })
    }

    /// Predicado de solape sobre intervalos semiabiertos.
    pub fn overlaps(&self, other: &BookingWindow) -> bool {
        self.start < other.end && other.start < self.end
    }
}
