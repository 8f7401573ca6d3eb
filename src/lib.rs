//! Fleet Booking - motor de reservas de flota
//!
//! Sistema de reservas de vehículos de carga: registro de flota,
//! búsqueda de disponibilidad por capacidad y ventana temporal, y
//! admisión de reservas con resolución de conflictos serializada por
//! vehículo. El binario expone la API HTTP; la librería expone los
//! servicios para pruebas e integraciones.

pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
