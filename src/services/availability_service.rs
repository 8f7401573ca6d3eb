//! Selector de disponibilidad
//!
//! Búsqueda de vehículos libres para una ventana propuesta: filtra por
//! capacidad, recorre los candidatos en orden de capacidad ascendente
//! (política de right-sizing: primero el vehículo más justo) y descarta
//! los que tienen reservas activas en conflicto. Solo lectura; la
//! búsqueda no reserva nada.

use std::sync::Arc;

use crate::models::vehicle::Vehicle;
use crate::models::window::BookingWindow;
use crate::repositories::VehicleRepository;
use crate::services::conflict_checker::ConflictChecker;
use crate::services::estimator::{estimate_ride_duration, RideEstimate};
use crate::utils::errors::AppResult;

/// Candidato libre, anotado con la ruta consultada, la estimación y la
/// ventana evaluada.
#[derive(Debug, Clone)]
pub struct AvailableVehicle {
    pub vehicle: Vehicle,
    pub from_pincode: String,
    pub to_pincode: String,
    pub estimate: RideEstimate,
    pub window: BookingWindow,
}

#[derive(Clone)]
pub struct AvailabilityService {
    vehicles: Arc<dyn VehicleRepository>,
    conflict_checker: ConflictChecker,
}

impl AvailabilityService {
    pub fn new(vehicles: Arc<dyn VehicleRepository>, conflict_checker: ConflictChecker) -> Self {
        Self {
            vehicles,
            conflict_checker,
        }
    }

    /// Vehículos activos con capacidad suficiente y sin conflicto en la
    /// ventana `[start, start + duración estimada)`. Que nada califique
    /// no es un error: se responde con la lista vacía.
    pub async fn find_available(
        &self,
        capacity_required: i32,
        from_pincode: &str,
        to_pincode: &str,
        start_time: chrono::DateTime<chrono::Utc>,
    ) -> AppResult<Vec<AvailableVehicle>> {
        let estimate = estimate_ride_duration(from_pincode, to_pincode);
        let window = BookingWindow::from_start(start_time, estimate.duration())?;

        let candidates = self
            .vehicles
            .find_active_by_min_capacity(capacity_required)
            .await?;

        tracing::debug!(
            "🔍 Disponibilidad: {} candidatos con capacidad >= {} kg para ventana {} -> {}",
            candidates.len(),
            capacity_required,
            window.start,
            window.end
        );

        // chequeo secuencial candidato a candidato, conservando el orden
        let mut available = Vec::new();
        for vehicle in candidates {
            let conflicts = self
                .conflict_checker
                .find_conflicts(vehicle.id, window, None)
                .await?;
            if conflicts.is_empty() {
                available.push(AvailableVehicle {
                    vehicle,
                    from_pincode: from_pincode.to_string(),
                    to_pincode: to_pincode.to_string(),
                    estimate,
                    window,
                });
            }
        }

        Ok(available)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::booking::NewBooking;
    use crate::repositories::{BookingRepository, MemoryStore};
    use chrono::{Duration, Utc};
    use rust_decimal::Decimal;

    fn service_over(store: Arc<MemoryStore>) -> AvailabilityService {
        let checker = ConflictChecker::new(store.clone());
        AvailabilityService::new(store, checker)
    }

    #[tokio::test]
    async fn orders_by_ascending_capacity_and_skips_busy() {
        let store = Arc::new(MemoryStore::new());
        let service = service_over(store.clone());

        let small = VehicleRepository::create(store.as_ref(), "Furgoneta", 2000, 4)
            .await
            .unwrap();
        let big = VehicleRepository::create(store.as_ref(), "Camión", 8000, 10)
            .await
            .unwrap();

        let start = Utc::now() + Duration::hours(3);

        // el grande queda ocupado en la ventana consultada
        BookingRepository::create(
            store.as_ref(),
            NewBooking {
                vehicle_id: big.id,
                customer_id: "cust-1".to_string(),
                from_pincode: "110001".to_string(),
                to_pincode: "110005".to_string(),
                start_time: start,
                end_time: start + Duration::hours(4),
                estimated_ride_duration_hours: 4,
                total_cost: Decimal::new(1000000, 2),
            },
        )
        .await
        .unwrap();

        let available = service
            .find_available(1000, "110001", "110005", start)
            .await
            .unwrap();
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].vehicle.id, small.id);
        assert_eq!(available[0].estimate.hours, 4);
        assert_eq!(available[0].from_pincode, "110001");
        assert_eq!(available[0].to_pincode, "110005");

        // fuera de la ventana ocupada vuelven los dos, el chico primero
        let later = start + Duration::hours(10);
        let available = service
            .find_available(1000, "110001", "110005", later)
            .await
            .unwrap();
        let ids: Vec<_> = available.iter().map(|a| a.vehicle.id).collect();
        assert_eq!(ids, vec![small.id, big.id]);
    }

    #[tokio::test]
    async fn empty_result_when_capacity_filters_everything() {
        let store = Arc::new(MemoryStore::new());
        let service = service_over(store.clone());

        VehicleRepository::create(store.as_ref(), "Furgoneta", 2000, 4)
            .await
            .unwrap();

        let available = service
            .find_available(50000, "110001", "110005", Utc::now() + Duration::hours(1))
            .await
            .unwrap();
        assert!(available.is_empty());
    }
}
