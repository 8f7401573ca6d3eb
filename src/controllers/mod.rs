//! Controllers
//!
//! Capa de orquestación entre handlers HTTP y servicios: valida DTOs,
//! delega en servicios/repositorios y arma las respuestas.

pub mod booking_controller;
pub mod vehicle_controller;

pub use booking_controller::BookingController;
pub use vehicle_controller::VehicleController;
