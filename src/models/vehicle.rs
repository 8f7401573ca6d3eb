//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y su ciclo de vida. Los vehículos
//! nunca se eliminan: `retired` es terminal pero se conserva para historial.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::errors::AppError;

/// Estado del vehículo. Solo `active` es elegible para nuevas reservas.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    Active,
    Maintenance,
    Retired,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Active => "active",
            VehicleStatus::Maintenance => "maintenance",
            VehicleStatus::Retired => "retired",
        }
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(VehicleStatus::Active),
            "maintenance" => Ok(VehicleStatus::Maintenance),
            "retired" => Ok(VehicleStatus::Retired),
            other => Err(AppError::BadRequest(format!(
                "Estado de vehículo desconocido: '{}'",
                other
            ))),
        }
    }
}

/// Vehicle principal - una unidad de la flota
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: Uuid,
    pub name: String,
    pub capacity_kg: i32,
    pub tyres: i32,
    pub status: VehicleStatus,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_str() {
        for status in [
            VehicleStatus::Active,
            VehicleStatus::Maintenance,
            VehicleStatus::Retired,
        ] {
            assert_eq!(status.as_str().parse::<VehicleStatus>().unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!("out_of_service".parse::<VehicleStatus>().is_err());
    }
}
