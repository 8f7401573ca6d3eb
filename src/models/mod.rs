//! Modelos del sistema
//!
//! Este módulo contiene los modelos de dominio: vehículos, reservas y la
//! ventana de tiempo que una reserva ocupa.

pub mod booking;
pub mod vehicle;
pub mod window;
