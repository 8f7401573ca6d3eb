//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de
//! configuración. Todas las variables tienen default razonable: el
//! servicio arranca sin `.env` usando el store en memoria.

use std::env;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    /// Backend Postgres si está presente; store en memoria si no.
    pub database_url: Option<String>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl EnvironmentConfig {
    pub fn from_env() -> Self {
        Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            database_url: env::var("DATABASE_URL").ok(),
        }
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_url_joins_host_and_port() {
        let config = EnvironmentConfig {
            environment: "development".to_string(),
            port: 3000,
            host: "127.0.0.1".to_string(),
            database_url: None,
        };
        assert_eq!(config.server_url(), "127.0.0.1:3000");
        assert!(config.is_development());
        assert!(!config.is_production());
    }
}
