//! Observador del ciclo de vida de reservas
//!
//! El servicio de reservas emite eventos de dominio en los puntos de
//! decisión (admisión, rechazo, cancelación, override de estado,
//! estimación degradada) y los entrega a un observador inyectado. El
//! observador por defecto traza; el de métricas además incrementa
//! contadores Prometheus.

use uuid::Uuid;

use crate::models::booking::BookingStatus;

/// Eventos de negocio emitidos por el motor de reservas.
#[derive(Debug, Clone)]
pub enum BookingEvent {
    /// Reserva admitida y persistida como `confirmed`.
    Admitted {
        booking_id: Uuid,
        vehicle_id: Uuid,
        customer_id: String,
    },
    /// Admisión rechazada por solape con reservas activas.
    AdmissionRejected { vehicle_id: Uuid, conflicts: usize },
    /// Cancelación aceptada dentro de la ventana permitida.
    Cancelled { booking_id: Uuid },
    /// Estado sobreescrito por un operador.
    StatusOverridden {
        booking_id: Uuid,
        from: BookingStatus,
        to: BookingStatus,
    },
    /// El estimador aplicó la duración de contingencia.
    DegradedEstimate {
        from_pincode: String,
        to_pincode: String,
    },
}

/// Receptor de eventos del motor. Las implementaciones no deben
/// bloquear ni fallar: observar nunca altera el resultado de la
/// operación observada.
pub trait BookingObserver: Send + Sync {
    fn notify(&self, event: &BookingEvent);
}

/// Observador por defecto: traza cada evento con `tracing`.
#[derive(Debug, Default, Clone)]
pub struct TracingObserver;

impl BookingObserver for TracingObserver {
    fn notify(&self, event: &BookingEvent) {
        match event {
            BookingEvent::Admitted {
                booking_id,
                vehicle_id,
                customer_id,
            } => {
                tracing::info!(
                    "✅ Reserva {} admitida: vehículo {} para cliente {}",
                    booking_id,
                    vehicle_id,
                    customer_id
                );
            }
            BookingEvent::AdmissionRejected {
                vehicle_id,
                conflicts,
            } => {
                tracing::warn!(
                    "❌ Admisión rechazada para vehículo {}: {} reservas en conflicto",
                    vehicle_id,
                    conflicts
                );
            }
            BookingEvent::Cancelled { booking_id } => {
                tracing::info!("🚫 Reserva {} cancelada", booking_id);
            }
            BookingEvent::StatusOverridden { booking_id, from, to } => {
                tracing::info!(
                    "🔧 Estado de reserva {} sobreescrito: {} -> {}",
                    booking_id,
                    from,
                    to
                );
            }
            BookingEvent::DegradedEstimate {
                from_pincode,
                to_pincode,
            } => {
                tracing::warn!(
                    "⚠️ Pincodes no numéricos ({} -> {}): usando duración de contingencia",
                    from_pincode,
                    to_pincode
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Observador de prueba que acumula los eventos recibidos.
    #[derive(Default)]
    pub struct RecordingObserver {
        pub events: Mutex<Vec<BookingEvent>>,
    }

    impl BookingObserver for RecordingObserver {
        fn notify(&self, event: &BookingEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    #[test]
    fn recording_observer_captures_events() {
        let observer = RecordingObserver::default();
        observer.notify(&BookingEvent::Cancelled {
            booking_id: Uuid::new_v4(),
        });
        observer.notify(&BookingEvent::AdmissionRejected {
            vehicle_id: Uuid::new_v4(),
            conflicts: 2,
        });

        let events = observer.events.lock().unwrap();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], BookingEvent::Cancelled { .. }));
        assert!(matches!(
            events[1],
            BookingEvent::AdmissionRejected { conflicts: 2, .. }
        ));
    }
}
