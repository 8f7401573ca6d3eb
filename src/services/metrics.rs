//! Métricas Prometheus del motor de reservas
//!
//! Contadores incrementados desde el observador de métricas y
//! expuestos en `GET /metrics` en formato de texto Prometheus.

use prometheus::{Encoder, IntCounter, Registry, TextEncoder};

use crate::services::observer::{BookingEvent, BookingObserver, TracingObserver};
use crate::utils::errors::{AppError, AppResult};

/// Contadores del ciclo de vida de reservas.
#[derive(Clone)]
pub struct BookingMetrics {
    /// Total de reservas admitidas.
    pub bookings_admitted_total: IntCounter,
    /// Total de admisiones rechazadas por conflicto de ventana.
    pub bookings_rejected_conflict_total: IntCounter,
    /// Total de cancelaciones aceptadas.
    pub bookings_cancelled_total: IntCounter,
    /// Total de overrides de estado por operador.
    pub booking_status_overrides_total: IntCounter,
    /// Total de estimaciones degradadas por pincodes no numéricos.
    pub degraded_estimates_total: IntCounter,
}

impl BookingMetrics {
    /// Crea los contadores y los registra en `registry`.
    pub fn register(registry: &Registry) -> prometheus::Result<Self> {
        let bookings_admitted_total = IntCounter::new(
            "fleet_bookings_admitted_total",
            "Reservas admitidas y confirmadas",
        )?;
        let bookings_rejected_conflict_total = IntCounter::new(
            "fleet_bookings_rejected_conflict_total",
            "Admisiones rechazadas por solape con reservas activas",
        )?;
        let bookings_cancelled_total = IntCounter::new(
            "fleet_bookings_cancelled_total",
            "Cancelaciones aceptadas dentro de la ventana permitida",
        )?;
        let booking_status_overrides_total = IntCounter::new(
            "fleet_booking_status_overrides_total",
            "Estados de reserva sobreescritos por un operador",
        )?;
        let degraded_estimates_total = IntCounter::new(
            "fleet_degraded_estimates_total",
            "Estimaciones con duración de contingencia",
        )?;

        registry.register(Box::new(bookings_admitted_total.clone()))?;
        registry.register(Box::new(bookings_rejected_conflict_total.clone()))?;
        registry.register(Box::new(bookings_cancelled_total.clone()))?;
        registry.register(Box::new(booking_status_overrides_total.clone()))?;
        registry.register(Box::new(degraded_estimates_total.clone()))?;

        Ok(Self {
            bookings_admitted_total,
            bookings_rejected_conflict_total,
            bookings_cancelled_total,
            booking_status_overrides_total,
            degraded_estimates_total,
        })
    }
}

/// Observador que incrementa contadores y delega el trazado al
/// observador por defecto.
#[derive(Clone)]
pub struct MetricsObserver {
    metrics: BookingMetrics,
    tracing: TracingObserver,
}

impl MetricsObserver {
    pub fn new(metrics: BookingMetrics) -> Self {
        Self {
            metrics,
            tracing: TracingObserver,
        }
    }
}

impl BookingObserver for MetricsObserver {
    fn notify(&self, event: &BookingEvent) {
        match event {
            BookingEvent::Admitted { .. } => self.metrics.bookings_admitted_total.inc(),
            BookingEvent::AdmissionRejected { .. } => {
                self.metrics.bookings_rejected_conflict_total.inc()
            }
            BookingEvent::Cancelled { .. } => self.metrics.bookings_cancelled_total.inc(),
            BookingEvent::StatusOverridden { .. } => {
                self.metrics.booking_status_overrides_total.inc()
            }
            BookingEvent::DegradedEstimate { .. } => self.metrics.degraded_estimates_total.inc(),
        }
        self.tracing.notify(event);
    }
}

/// Serializa el registro en el formato de texto Prometheus.
pub fn render(registry: &Registry) -> AppResult<String> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder
        .encode(&registry.gather(), &mut buffer)
        .map_err(|e| AppError::Internal(format!("Error codificando métricas: {}", e)))?;
    String::from_utf8(buffer)
        .map_err(|e| AppError::Internal(format!("Métricas no UTF-8: {}", e)))
}
