//! Repositorio de vehículos
//!
//! Interfaz de consulta nombrada sobre la flota y su implementación
//! PostgreSQL. El orden de `find_active_by_min_capacity` es parte del
//! contrato: capacidad ascendente, empates por orden de llegada.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::vehicle::{Vehicle, VehicleStatus};
use crate::utils::errors::{AppError, AppResult};

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    /// Registra un vehículo nuevo en estado `active`.
    async fn create(&self, name: &str, capacity_kg: i32, tyres: i32) -> AppResult<Vehicle>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>>;

    /// Flota completa, más recientes primero.
    async fn list(&self) -> AppResult<Vec<Vehicle>>;

    /// Vehículos `active` con `capacity_kg >= capacity_kg`, ordenados por
    /// capacidad ascendente (política de right-sizing) y, a igual capacidad,
    /// por orden de llegada al store.
    async fn find_active_by_min_capacity(&self, capacity_kg: i32) -> AppResult<Vec<Vehicle>>;

    /// Escribe el nuevo estado. Las reglas de transición (p. ej. `retired`
    /// es terminal) se verifican en la capa de negocio.
    async fn update_status(&self, id: Uuid, status: VehicleStatus) -> AppResult<Vehicle>;
}

// Fila cruda: el estado viaja como TEXT y se parsea al borde.
#[derive(Debug, sqlx::FromRow)]
struct VehicleRow {
    id: Uuid,
    name: String,
    capacity_kg: i32,
    tyres: i32,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<VehicleRow> for Vehicle {
    type Error = AppError;

    fn try_from(row: VehicleRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<VehicleStatus>()
            .map_err(|_| AppError::Internal(format!("Estado de vehículo corrupto: '{}'", row.status)))?;
        Ok(Vehicle {
            id: row.id,
            name: row.name,
            capacity_kg: row.capacity_kg,
            tyres: row.tyres,
            status,
            created_at: row.created_at,
        })
    }
}

pub struct PgVehicleRepository {
    pool: PgPool,
}

impl PgVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleRepository for PgVehicleRepository {
    async fn create(&self, name: &str, capacity_kg: i32, tyres: i32) -> AppResult<Vehicle> {
        let row = sqlx::query_as::<_, VehicleRow>(
            r#"
            INSERT INTO vehicles (id, name, capacity_kg, tyres, status, created_at)
            VALUES ($1, $2, $3, $4, 'active', $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(capacity_kg)
        .bind(tyres)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Vehicle::try_from(row)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        let row = sqlx::query_as::<_, VehicleRow>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Vehicle::try_from).transpose()
    }

    async fn list(&self) -> AppResult<Vec<Vehicle>> {
        let rows = sqlx::query_as::<_, VehicleRow>(
            "SELECT * FROM vehicles ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Vehicle::try_from).collect()
    }

    async fn find_active_by_min_capacity(&self, capacity_kg: i32) -> AppResult<Vec<Vehicle>> {
        let rows = sqlx::query_as::<_, VehicleRow>(
            r#"
            SELECT * FROM vehicles
            WHERE status = 'active' AND capacity_kg >= $1
            ORDER BY capacity_kg ASC, created_at ASC, id ASC
            "#,
        )
        .bind(capacity_kg)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Vehicle::try_from).collect()
    }

    async fn update_status(&self, id: Uuid, status: VehicleStatus) -> AppResult<Vehicle> {
        let row = sqlx::query_as::<_, VehicleRow>(
            "UPDATE vehicles SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Vehicle::try_from(row),
            None => Err(AppError::NotFound(format!("Vehículo {} no encontrado", id))),
        }
    }
}
