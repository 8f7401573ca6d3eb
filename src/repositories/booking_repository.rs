//! Repositorio de reservas
//!
//! La consulta central del motor de disponibilidad vive aquí:
//! `find_overlapping` materializa el predicado de solape semiabierto
//! (`start_time < fin AND end_time > inicio`) restringido a reservas
//! activas. Las reservas canceladas o completadas nunca bloquean.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::booking::{Booking, BookingFilters, BookingStatus, NewBooking};
use crate::models::window::BookingWindow;
use crate::utils::errors::{AppError, AppResult};

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Persiste una reserva ya admitida, en estado `confirmed`.
    async fn create(&self, booking: NewBooking) -> AppResult<Booking>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Booking>>;

    /// Listado con filtros opcionales, más recientes primero.
    async fn list(&self, filters: BookingFilters) -> AppResult<Vec<Booking>>;

    /// Reservas activas del vehículo cuya ventana solapa con `window`,
    /// ordenadas por inicio. `exclude` permite omitir una reserva concreta
    /// (la propia, al reevaluar).
    async fn find_overlapping(
        &self,
        vehicle_id: Uuid,
        window: BookingWindow,
        exclude: Option<Uuid>,
    ) -> AppResult<Vec<Booking>>;

    /// Escritura directa del estado; la validación de transiciones queda
    /// en la capa de negocio.
    async fn update_status(&self, id: Uuid, status: BookingStatus) -> AppResult<Booking>;
}

#[derive(Debug, sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    vehicle_id: Uuid,
    customer_id: String,
    from_pincode: String,
    to_pincode: String,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    estimated_ride_duration_hours: i64,
    status: String,
    total_cost: Decimal,
    created_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = AppError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<BookingStatus>()
            .map_err(|_| AppError::Internal(format!("Estado de reserva corrupto: '{}'", row.status)))?;
        Ok(Booking {
            id: row.id,
            vehicle_id: row.vehicle_id,
            customer_id: row.customer_id,
            from_pincode: row.from_pincode,
            to_pincode: row.to_pincode,
            start_time: row.start_time,
            end_time: row.end_time,
            estimated_ride_duration_hours: row.estimated_ride_duration_hours,
            status,
            total_cost: row.total_cost,
            created_at: row.created_at,
        })
    }
}

pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn create(&self, booking: NewBooking) -> AppResult<Booking> {
        let row = sqlx::query_as::<_, BookingRow>(
            r#"
            INSERT INTO bookings (
                id, vehicle_id, customer_id, from_pincode, to_pincode,
                start_time, end_time, estimated_ride_duration_hours,
                status, total_cost, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'confirmed', $9, $10)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(booking.vehicle_id)
        .bind(&booking.customer_id)
        .bind(&booking.from_pincode)
        .bind(&booking.to_pincode)
        .bind(booking.start_time)
        .bind(booking.end_time)
        .bind(booking.estimated_ride_duration_hours)
        .bind(booking.total_cost)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Booking::try_from(row)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Booking>> {
        let row = sqlx::query_as::<_, BookingRow>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Booking::try_from).transpose()
    }

    async fn list(&self, filters: BookingFilters) -> AppResult<Vec<Booking>> {
        let limit = filters.limit.unwrap_or(100).clamp(1, 500);
        let offset = filters.offset.unwrap_or(0).max(0);

        let rows = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT * FROM bookings
            WHERE ($1::uuid IS NULL OR vehicle_id = $1)
              AND ($2::text IS NULL OR customer_id = $2)
              AND ($3::text IS NULL OR status = $3)
            ORDER BY created_at DESC
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(filters.vehicle_id)
        .bind(filters.customer_id.as_deref())
        .bind(filters.status.map(|s| s.as_str().to_string()))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Booking::try_from).collect()
    }

    async fn find_overlapping(
        &self,
        vehicle_id: Uuid,
        window: BookingWindow,
        exclude: Option<Uuid>,
    ) -> AppResult<Vec<Booking>> {
        let rows = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT * FROM bookings
            WHERE vehicle_id = $1
              AND status IN ('confirmed', 'in-progress')
              AND start_time < $3
              AND end_time > $2
              AND ($4::uuid IS NULL OR id <> $4)
            ORDER BY start_time ASC
            "#,
        )
        .bind(vehicle_id)
        .bind(window.start)
        .bind(window.end)
        .bind(exclude)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Booking::try_from).collect()
    }

    async fn update_status(&self, id: Uuid, status: BookingStatus) -> AppResult<Booking> {
        let row = sqlx::query_as::<_, BookingRow>(
            "UPDATE bookings SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Booking::try_from(row),
            None => Err(AppError::NotFound(format!("Reserva {} no encontrada", id))),
        }
    }
}
