//! Flujos de reserva de punta a punta sobre el store en memoria:
//! admisión, conflictos, cancelación, disponibilidad y la garantía de
//! serialización por vehículo bajo concurrencia.

use std::sync::Arc;

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use tokio::task::JoinSet;
use uuid::Uuid;

use fleet_booking::models::booking::{BookingFilters, BookingStatus};
use fleet_booking::models::vehicle::{Vehicle, VehicleStatus};
use fleet_booking::models::window::BookingWindow;
use fleet_booking::repositories::{BookingRepository, MemoryStore, VehicleRepository};
use fleet_booking::services::{
    AvailabilityService, BookingService, ConflictChecker, TracingObserver,
};
use fleet_booking::utils::errors::AppError;

struct TestHarness {
    store: Arc<MemoryStore>,
    availability: AvailabilityService,
    bookings: Arc<BookingService>,
}

fn harness() -> TestHarness {
    let store = Arc::new(MemoryStore::new());
    let checker = ConflictChecker::new(store.clone());
    let availability = AvailabilityService::new(store.clone(), checker.clone());
    let bookings = Arc::new(BookingService::new(
        store.clone(),
        store.clone(),
        checker,
        Arc::new(TracingObserver),
    ));
    TestHarness {
        store,
        availability,
        bookings,
    }
}

async fn add_vehicle(store: &MemoryStore, name: &str, capacity_kg: i32) -> Vehicle {
    VehicleRepository::create(store, name, capacity_kg, 10)
        .await
        .unwrap()
}

#[tokio::test]
async fn admission_derives_duration_window_and_cost() {
    let h = harness();
    let vehicle = add_vehicle(&h.store, "Camión Norte", 5000).await;
    let start = Utc::now() + Duration::hours(3);

    let booking = h
        .bookings
        .create_booking(vehicle.id, "cust-1", "110001", "110005", start)
        .await
        .unwrap();

    // |110001 - 110005| mod 24 = 4h; 500 * 4 * 5 * 1 = 10000.00
    assert_eq!(booking.estimated_ride_duration_hours, 4);
    assert_eq!(booking.start_time, start);
    assert_eq!(booking.end_time, start + Duration::hours(4));
    assert_eq!(booking.total_cost, Decimal::new(1000000, 2));
    assert_eq!(booking.status, BookingStatus::Confirmed);

    let stored = BookingRepository::find_by_id(h.store.as_ref(), booking.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.vehicle_id, vehicle.id);
}

#[tokio::test]
async fn overlapping_admissions_conflict_adjacent_do_not() {
    let h = harness();
    let vehicle = add_vehicle(&h.store, "Camión Norte", 5000).await;
    let start = Utc::now() + Duration::hours(2);

    // primera reserva: [start+0h, start+4h)
    h.bookings
        .create_booking(vehicle.id, "cust-1", "110001", "110005", start)
        .await
        .unwrap();

    // solapa las últimas dos horas -> rechazada con cardinalidad 1
    let err = h
        .bookings
        .create_booking(
            vehicle.id,
            "cust-2",
            "110001",
            "110005",
            start + Duration::hours(2),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict { conflicts: 1 }));

    // adyacente exacta: [start+4h, start+8h) entra
    let adjacent = h
        .bookings
        .create_booking(
            vehicle.id,
            "cust-3",
            "110001",
            "110005",
            start + Duration::hours(4),
        )
        .await
        .unwrap();
    assert_eq!(adjacent.status, BookingStatus::Confirmed);

    // una ventana que pisa ambas reporta cardinalidad 2
    let err = h
        .bookings
        .create_booking(
            vehicle.id,
            "cust-4",
            "110001",
            "110005",
            start + Duration::hours(3),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict { conflicts: 2 }));
}

#[tokio::test]
async fn cancelled_and_completed_bookings_free_the_window() {
    let h = harness();
    let vehicle = add_vehicle(&h.store, "Camión Norte", 5000).await;
    let start = Utc::now() + Duration::hours(5);

    let first = h
        .bookings
        .create_booking(vehicle.id, "cust-1", "110001", "110005", start)
        .await
        .unwrap();
    h.bookings.cancel_booking(first.id).await.unwrap();

    // misma ventana exacta: ahora entra
    let second = h
        .bookings
        .create_booking(vehicle.id, "cust-2", "110001", "110005", start)
        .await
        .unwrap();

    // completarla también libera la ventana
    h.bookings
        .update_status(second.id, BookingStatus::Completed)
        .await
        .unwrap();
    h.bookings
        .create_booking(vehicle.id, "cust-3", "110001", "110005", start)
        .await
        .unwrap();
}

#[tokio::test]
async fn cancellation_respects_the_one_hour_cutoff() {
    let h = harness();
    let vehicle = add_vehicle(&h.store, "Camión Norte", 5000).await;

    // inicia en 90 minutos: todavía se puede cancelar
    let cancellable = h
        .bookings
        .create_booking(
            vehicle.id,
            "cust-1",
            "110001",
            "110005",
            Utc::now() + Duration::minutes(90),
        )
        .await
        .unwrap();
    let cancelled = h.bookings.cancel_booking(cancellable.id).await.unwrap();
    assert_eq!(cancelled.status, BookingStatus::Cancelled);

    // inicia en 30 minutos: demasiado tarde
    let too_late = h
        .bookings
        .create_booking(
            vehicle.id,
            "cust-2",
            "110001",
            "110005",
            Utc::now() + Duration::minutes(30),
        )
        .await
        .unwrap();
    let err = h.bookings.cancel_booking(too_late.id).await.unwrap_err();
    assert!(matches!(err, AppError::TooLate(_)));

    // la reserva sigue confirmada y su ventana sigue ocupada
    let still = BookingRepository::find_by_id(h.store.as_ref(), too_late.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(still.status, BookingStatus::Confirmed);
}

#[tokio::test]
async fn availability_orders_by_capacity_and_skips_conflicts() {
    let h = harness();
    let big = add_vehicle(&h.store, "Camión Grande", 9000).await;
    let small = add_vehicle(&h.store, "Furgoneta", 2000).await;
    let medium = add_vehicle(&h.store, "Camión Medio", 5000).await;
    let start = Utc::now() + Duration::hours(4);

    // sin reservas: orden por capacidad ascendente
    let available = h
        .availability
        .find_available(1500, "110001", "110005", start)
        .await
        .unwrap();
    let ids: Vec<Uuid> = available.iter().map(|a| a.vehicle.id).collect();
    assert_eq!(ids, vec![small.id, medium.id, big.id]);

    // el mediano queda ocupado en la ventana
    h.bookings
        .create_booking(medium.id, "cust-1", "110001", "110005", start)
        .await
        .unwrap();
    let available = h
        .availability
        .find_available(1500, "110001", "110005", start)
        .await
        .unwrap();
    let ids: Vec<Uuid> = available.iter().map(|a| a.vehicle.id).collect();
    assert_eq!(ids, vec![small.id, big.id]);

    // filtro de capacidad que excluye todo: lista vacía, no error
    let available = h
        .availability
        .find_available(20000, "110001", "110005", start)
        .await
        .unwrap();
    assert!(available.is_empty());
}

#[tokio::test]
async fn availability_excludes_non_active_vehicles() {
    let h = harness();
    let vehicle = add_vehicle(&h.store, "Camión Norte", 5000).await;
    VehicleRepository::update_status(h.store.as_ref(), vehicle.id, VehicleStatus::Maintenance)
        .await
        .unwrap();

    let available = h
        .availability
        .find_available(1000, "110001", "110005", Utc::now() + Duration::hours(2))
        .await
        .unwrap();
    assert!(available.is_empty());

    // y la admisión directa también lo rechaza
    let err = h
        .bookings
        .create_booking(
            vehicle.id,
            "cust-1",
            "110001",
            "110005",
            Utc::now() + Duration::hours(2),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotAvailable(_)));
}

#[tokio::test]
async fn degraded_pincodes_book_with_contingency_duration() {
    let h = harness();
    let vehicle = add_vehicle(&h.store, "Camión Norte", 5000).await;
    let start = Utc::now() + Duration::hours(3);

    let booking = h
        .bookings
        .create_booking(vehicle.id, "cust-1", "PTO-SUR", "110005", start)
        .await
        .unwrap();

    assert_eq!(booking.estimated_ride_duration_hours, 2);
    assert_eq!(booking.end_time, start + Duration::hours(2));
    // factor de distancia degradado a 1: 500 * 2 * 5 * 1
    assert_eq!(booking.total_cost, Decimal::new(500000, 2));
}

#[tokio::test]
async fn far_future_starts_are_rejected_not_admitted() {
    let h = harness();
    let vehicle = add_vehicle(&h.store, "Camión Norte", 5000).await;

    // el validador solo exige inicio futuro; un inicio a 2h del límite del
    // calendario pasa, pero la ventana de 23h (110001 -> 110024) ya no cabe
    let start = chrono::DateTime::<Utc>::MAX_UTC - Duration::hours(2);

    let err = h
        .bookings
        .create_booking(vehicle.id, "cust-1", "110001", "110024", start)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    // la búsqueda de disponibilidad sobre el mismo inicio responde igual
    let err = h
        .availability
        .find_available(1000, "110001", "110024", start)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    // nada quedó persistido
    let all = BookingRepository::list(h.store.as_ref(), BookingFilters::default())
        .await
        .unwrap();
    assert!(all.is_empty());
}

#[tokio::test]
async fn booking_listing_filters_by_vehicle_and_status() {
    let h = harness();
    let vehicle_a = add_vehicle(&h.store, "Camión A", 5000).await;
    let vehicle_b = add_vehicle(&h.store, "Camión B", 5000).await;
    let start = Utc::now() + Duration::hours(4);

    let on_a = h
        .bookings
        .create_booking(vehicle_a.id, "cust-1", "110001", "110005", start)
        .await
        .unwrap();
    let on_b = h
        .bookings
        .create_booking(vehicle_b.id, "cust-1", "110001", "110005", start)
        .await
        .unwrap();
    h.bookings.cancel_booking(on_b.id).await.unwrap();

    let by_vehicle = BookingRepository::list(
        h.store.as_ref(),
        BookingFilters {
            vehicle_id: Some(vehicle_a.id),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_vehicle.len(), 1);
    assert_eq!(by_vehicle[0].id, on_a.id);

    let cancelled = BookingRepository::list(
        h.store.as_ref(),
        BookingFilters {
            status: Some(BookingStatus::Cancelled),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(cancelled.len(), 1);
    assert_eq!(cancelled[0].id, on_b.id);
}

#[tokio::test]
async fn concurrent_identical_admissions_admit_exactly_one() {
    let h = harness();
    let vehicle = add_vehicle(&h.store, "Camión Norte", 5000).await;
    let start = Utc::now() + Duration::hours(3);

    let mut tasks = JoinSet::new();
    for i in 0..8 {
        let service = h.bookings.clone();
        let vehicle_id = vehicle.id;
        tasks.spawn(async move {
            service
                .create_booking(
                    vehicle_id,
                    &format!("cust-{}", i),
                    "110001",
                    "110005",
                    start,
                )
                .await
        });
    }

    let mut admitted = 0;
    let mut rejected = 0;
    while let Some(result) = tasks.join_next().await {
        match result.unwrap() {
            Ok(_) => admitted += 1,
            Err(AppError::Conflict { .. }) => rejected += 1,
            Err(other) => panic!("error inesperado: {}", other),
        }
    }
    assert_eq!(admitted, 1);
    assert_eq!(rejected, 7);

    // el store quedó con una sola reserva activa en esa ventana
    let window = BookingWindow::from_start(start, Duration::hours(4)).unwrap();
    let active = h
        .store
        .find_overlapping(vehicle.id, window, None)
        .await
        .unwrap();
    assert_eq!(active.len(), 1);
}

#[tokio::test]
async fn concurrent_disjoint_admissions_all_succeed() {
    let h = harness();
    let vehicle = add_vehicle(&h.store, "Camión Norte", 5000).await;
    let base = Utc::now() + Duration::hours(2);

    let mut tasks = JoinSet::new();
    for i in 0..4i64 {
        let service = h.bookings.clone();
        let vehicle_id = vehicle.id;
        // ventanas de 4h pegadas una tras otra: sin solapes
        let start = base + Duration::hours(4 * i);
        tasks.spawn(async move {
            service
                .create_booking(
                    vehicle_id,
                    &format!("cust-{}", i),
                    "110001",
                    "110005",
                    start,
                )
                .await
        });
    }

    while let Some(result) = tasks.join_next().await {
        result.unwrap().unwrap();
    }

    let all = BookingRepository::list(h.store.as_ref(), BookingFilters::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 4);
}
