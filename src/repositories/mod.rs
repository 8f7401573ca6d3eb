//! Capa de acceso a datos
//!
//! Los servicios hablan con la flota y las reservas a través de estos
//! traits; el binario elige backend al arrancar (Postgres si hay
//! `DATABASE_URL`, memoria si no). Esquema esperado por el backend
//! Postgres:
//!
//! ```sql
//! CREATE TABLE vehicles (
//!     id UUID PRIMARY KEY,
//!     name TEXT NOT NULL,
//!     capacity_kg INTEGER NOT NULL,
//!     tyres INTEGER NOT NULL,
//!     status TEXT NOT NULL DEFAULT 'active',
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT now()
//! );
//!
//! CREATE TABLE bookings (
//!     id UUID PRIMARY KEY,
//!     vehicle_id UUID NOT NULL REFERENCES vehicles(id),
//!     customer_id TEXT NOT NULL,
//!     from_pincode TEXT NOT NULL,
//!     to_pincode TEXT NOT NULL,
//!     start_time TIMESTAMPTZ NOT NULL,
//!     end_time TIMESTAMPTZ NOT NULL,
//!     estimated_ride_duration_hours BIGINT NOT NULL,
//!     status TEXT NOT NULL DEFAULT 'confirmed',
//!     total_cost NUMERIC(12, 2) NOT NULL,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT now()
//! );
//!
//! CREATE INDEX idx_bookings_vehicle_window
//!     ON bookings (vehicle_id, start_time, end_time);
//! ```

pub mod booking_repository;
pub mod memory;
pub mod vehicle_repository;

pub use booking_repository::{BookingRepository, PgBookingRepository};
pub use memory::MemoryStore;
pub use vehicle_repository::{PgVehicleRepository, VehicleRepository};
