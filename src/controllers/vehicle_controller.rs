use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::dto::vehicle_dto::{
    AvailabilityQuery, AvailableVehicleResponse, CreateVehicleRequest, UpdateVehicleStatusRequest,
    VehicleResponse,
};
use crate::dto::ApiResponse;
use crate::models::vehicle::VehicleStatus;
use crate::repositories::VehicleRepository;
use crate::services::AvailabilityService;
use crate::utils::errors::AppError;

pub struct VehicleController {
    repository: Arc<dyn VehicleRepository>,
    availability: AvailabilityService,
}

impl VehicleController {
    pub fn new(repository: Arc<dyn VehicleRepository>, availability: AvailabilityService) -> Self {
        Self {
            repository,
            availability,
        }
    }

    pub async fn create(
        &self,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        // Validar campos
        request.validate()?;

        let vehicle = self
            .repository
            .create(request.name.trim(), request.capacity_kg, request.tyres)
            .await?;

        Ok(ApiResponse::success_with_message(
            VehicleResponse::from(vehicle),
            "Vehículo registrado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<VehicleResponse, AppError> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        Ok(VehicleResponse::from(vehicle))
    }

    pub async fn list(&self) -> Result<Vec<VehicleResponse>, AppError> {
        let vehicles = self.repository.list().await?;
        Ok(vehicles.into_iter().map(VehicleResponse::from).collect())
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        request: UpdateVehicleStatusRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        let status: VehicleStatus = request.status.parse()?;

        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        // retired es terminal: no hay vuelta a la flota
        if vehicle.status == VehicleStatus::Retired {
            return Err(AppError::InvalidState(
                "Un vehículo retirado no puede cambiar de estado".to_string(),
            ));
        }

        let updated = self.repository.update_status(id, status).await?;
        tracing::info!("🚚 Vehículo {} ahora en estado '{}'", updated.id, updated.status);

        Ok(ApiResponse::success_with_message(
            VehicleResponse::from(updated),
            "Estado del vehículo actualizado".to_string(),
        ))
    }

    pub async fn find_available(
        &self,
        query: AvailabilityQuery,
    ) -> Result<Vec<AvailableVehicleResponse>, AppError> {
        query.validate()?;

        let available = self
            .availability
            .find_available(
                query.capacity_required,
                &query.from_pincode,
                &query.to_pincode,
                query.start_time,
            )
            .await?;

        let response = available
            .into_iter()
            .map(|a| AvailableVehicleResponse {
                id: a.vehicle.id,
                name: a.vehicle.name,
                capacity_kg: a.vehicle.capacity_kg,
                tyres: a.vehicle.tyres,
                from_pincode: a.from_pincode,
                to_pincode: a.to_pincode,
                estimated_ride_duration_hours: a.estimate.hours,
                start_time: a.window.start,
                end_time: a.window.end,
            })
            .collect();

        Ok(response)
    }
}
