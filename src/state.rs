//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. Los servicios se construyen una sola
//! vez aquí: el registro de locks de admisión del `BookingService` debe
//! ser único por proceso para que la serialización por vehículo valga.

use std::sync::Arc;

use prometheus::Registry;
use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::{
    BookingRepository, MemoryStore, PgBookingRepository, PgVehicleRepository, VehicleRepository,
};
use crate::services::{
    AvailabilityService, BookingMetrics, BookingService, ConflictChecker, MetricsObserver,
};
use crate::utils::errors::{AppError, AppResult};

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub vehicles: Arc<dyn VehicleRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub availability: AvailabilityService,
    pub booking_service: Arc<BookingService>,
    pub metrics_registry: Arc<Registry>,
}

impl AppState {
    pub fn new(
        config: EnvironmentConfig,
        vehicles: Arc<dyn VehicleRepository>,
        bookings: Arc<dyn BookingRepository>,
    ) -> AppResult<Self> {
        let metrics_registry = Arc::new(Registry::new());
        let metrics = BookingMetrics::register(&metrics_registry)
            .map_err(|e| AppError::Internal(format!("Error registrando métricas: {}", e)))?;
        let observer = Arc::new(MetricsObserver::new(metrics));

        let conflict_checker = ConflictChecker::new(bookings.clone());
        let availability = AvailabilityService::new(vehicles.clone(), conflict_checker.clone());
        let booking_service = Arc::new(BookingService::new(
            vehicles.clone(),
            bookings.clone(),
            conflict_checker,
            observer,
        ));

        Ok(Self {
            config,
            vehicles,
            bookings,
            availability,
            booking_service,
            metrics_registry,
        })
    }

    /// Estado sobre el store en memoria (sin `DATABASE_URL`; también el
    /// backend de las pruebas).
    pub fn with_memory_store(config: EnvironmentConfig) -> AppResult<Self> {
        let store = Arc::new(MemoryStore::new());
        Self::new(config, store.clone(), store)
    }

    /// Estado sobre PostgreSQL.
    pub fn with_postgres(config: EnvironmentConfig, pool: PgPool) -> AppResult<Self> {
        Self::new(
            config,
            Arc::new(PgVehicleRepository::new(pool.clone())),
            Arc::new(PgBookingRepository::new(pool)),
        )
    }
}
