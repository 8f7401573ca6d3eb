//! Services module
//!
//! Este módulo contiene la lógica de negocio del motor de reservas:
//! estimación de duración/coste, detección de conflictos de ventana,
//! selección de disponibilidad y admisión/ciclo de vida de reservas,
//! más los observadores que traducen eventos de dominio a trazas y
//! métricas.

pub mod availability_service;
pub mod booking_service;
pub mod conflict_checker;
pub mod estimator;
pub mod metrics;
pub mod observer;

pub use availability_service::{AvailabilityService, AvailableVehicle};
pub use booking_service::{BookingService, CANCELLATION_CUTOFF_HOURS};
pub use conflict_checker::ConflictChecker;
pub use estimator::{estimate_cost, estimate_ride_duration, RideEstimate};
pub use metrics::{BookingMetrics, MetricsObserver};
pub use observer::{BookingEvent, BookingObserver, TracingObserver};
