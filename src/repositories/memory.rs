//! Store en memoria
//!
//! Implementación de ambos repositorios sobre `tokio::sync::RwLock`.
//! Es el backend por defecto cuando no hay `DATABASE_URL` y el que usan
//! las pruebas. Reproduce la semántica de orden del backend Postgres:
//! capacidad ascendente con empates por inserción, listados más
//! recientes primero.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::booking::{Booking, BookingFilters, BookingStatus, NewBooking};
use crate::models::vehicle::{Vehicle, VehicleStatus};
use crate::models::window::BookingWindow;
use crate::repositories::booking_repository::BookingRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{AppError, AppResult};

#[derive(Default)]
pub struct MemoryStore {
    vehicles: RwLock<Vec<Vehicle>>,
    bookings: RwLock<Vec<Booking>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VehicleRepository for MemoryStore {
    async fn create(&self, name: &str, capacity_kg: i32, tyres: i32) -> AppResult<Vehicle> {
        let vehicle = Vehicle {
            id: Uuid::new_v4(),
            name: name.to_string(),
            capacity_kg,
            tyres,
            status: VehicleStatus::Active,
            created_at: Utc::now(),
        };
        self.vehicles.write().await.push(vehicle.clone());
        Ok(vehicle)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        let vehicles = self.vehicles.read().await;
        Ok(vehicles.iter().find(|v| v.id == id).cloned())
    }

    async fn list(&self) -> AppResult<Vec<Vehicle>> {
        let vehicles = self.vehicles.read().await;
        Ok(vehicles.iter().rev().cloned().collect())
    }

    async fn find_active_by_min_capacity(&self, capacity_kg: i32) -> AppResult<Vec<Vehicle>> {
        let vehicles = self.vehicles.read().await;
        let mut matching: Vec<Vehicle> = vehicles
            .iter()
            .filter(|v| v.status == VehicleStatus::Active && v.capacity_kg >= capacity_kg)
            .cloned()
            .collect();
        // sort estable: los empates de capacidad conservan el orden de alta
        matching.sort_by_key(|v| v.capacity_kg);
        Ok(matching)
    }

    async fn update_status(&self, id: Uuid, status: VehicleStatus) -> AppResult<Vehicle> {
        let mut vehicles = self.vehicles.write().await;
        match vehicles.iter_mut().find(|v| v.id == id) {
            Some(vehicle) => {
                vehicle.status = status;
                Ok(vehicle.clone())
            }
            None => Err(AppError::NotFound(format!("Vehículo {} no encontrado", id))),
        }
    }
}

#[async_trait]
impl BookingRepository for MemoryStore {
    async fn create(&self, booking: NewBooking) -> AppResult<Booking> {
        let booking = Booking {
            id: Uuid::new_v4(),
            vehicle_id: booking.vehicle_id,
            customer_id: booking.customer_id,
            from_pincode: booking.from_pincode,
            to_pincode: booking.to_pincode,
            start_time: booking.start_time,
            end_time: booking.end_time,
            estimated_ride_duration_hours: booking.estimated_ride_duration_hours,
            status: BookingStatus::Confirmed,
            total_cost: booking.total_cost,
            created_at: Utc::now(),
        };
        self.bookings.write().await.push(booking.clone());
        Ok(booking)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Booking>> {
        let bookings = self.bookings.read().await;
        Ok(bookings.iter().find(|b| b.id == id).cloned())
    }

    async fn list(&self, filters: BookingFilters) -> AppResult<Vec<Booking>> {
        let limit = filters.limit.unwrap_or(100).clamp(1, 500) as usize;
        let offset = filters.offset.unwrap_or(0).max(0) as usize;

        let bookings = self.bookings.read().await;
        let result = bookings
            .iter()
            .rev()
            .filter(|b| filters.vehicle_id.map_or(true, |id| b.vehicle_id == id))
            .filter(|b| {
                filters
                    .customer_id
                    .as_deref()
                    .map_or(true, |c| b.customer_id == c)
            })
            .filter(|b| filters.status.map_or(true, |s| b.status == s))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        Ok(result)
    }

    async fn find_overlapping(
        &self,
        vehicle_id: Uuid,
        window: BookingWindow,
        exclude: Option<Uuid>,
    ) -> AppResult<Vec<Booking>> {
        let bookings = self.bookings.read().await;
        let mut overlapping: Vec<Booking> = bookings
            .iter()
            .filter(|b| b.vehicle_id == vehicle_id)
            .filter(|b| b.status.is_active())
            .filter(|b| exclude.map_or(true, |id| b.id != id))
            .filter(|b| b.window().overlaps(&window))
            .cloned()
            .collect();
        overlapping.sort_by_key(|b| b.start_time);
        Ok(overlapping)
    }

    async fn update_status(&self, id: Uuid, status: BookingStatus) -> AppResult<Booking> {
        let mut bookings = self.bookings.write().await;
        match bookings.iter_mut().find(|b| b.id == id) {
            Some(booking) => {
                booking.status = status;
                Ok(booking.clone())
            }
            None => Err(AppError::NotFound(format!("Reserva {} no encontrada", id))),
        }
    }
}
