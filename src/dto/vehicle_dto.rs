//! DTOs de Vehicle
//!
//! Formas de entrada/salida de la API de vehículos. Los nombres de campo en
//! el wire son camelCase (`capacityKg`, `tyres`) por compatibilidad con los
//! clientes existentes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::vehicle::{Vehicle, VehicleStatus};
use crate::utils::validation::PINCODE_RE;

/// Request para registrar un vehículo en la flota
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,

    #[validate(range(min = 1, max = 100000, message = "capacityKg must be between 1 and 100000"))]
    pub capacity_kg: i32,

    #[validate(range(min = 2, max = 18, message = "tyres must be between 2 and 18"))]
    pub tyres: i32,
}

/// Request para transicionar el estado del vehículo.
/// No existe DELETE: `retired` es el estado terminal.
#[derive(Debug, Deserialize)]
pub struct UpdateVehicleStatusRequest {
    pub status: String,
}

/// Response de vehículo para la API
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleResponse {
    pub id: Uuid,
    pub name: String,
    pub capacity_kg: i32,
    pub tyres: i32,
    pub status: VehicleStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            name: vehicle.name,
            capacity_kg: vehicle.capacity_kg,
            tyres: vehicle.tyres,
            status: vehicle.status,
            created_at: vehicle.created_at,
        }
    }
}

/// Query string de búsqueda de disponibilidad
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    #[validate(range(min = 1, max = 100000, message = "capacityRequired must be between 1 and 100000"))]
    pub capacity_required: i32,

    #[validate(regex(path = "PINCODE_RE", message = "fromPincode must be exactly 6 digits"))]
    pub from_pincode: String,

    #[validate(regex(path = "PINCODE_RE", message = "toPincode must be exactly 6 digits"))]
    pub to_pincode: String,

    pub start_time: DateTime<Utc>,
}

/// Un vehículo disponible, anotado con la ventana y duración calculadas
/// para la ruta solicitada. La búsqueda es solo una vista previa: no
/// reserva nada.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableVehicleResponse {
    pub id: Uuid,
    pub name: String,
    pub capacity_kg: i32,
    pub tyres: i32,
    pub from_pincode: String,
    pub to_pincode: String,
    pub estimated_ride_duration_hours: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}
