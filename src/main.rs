use anyhow::Result;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};
use dotenvy::dotenv;

use fleet_booking::config::database::DatabaseConfig;
use fleet_booking::config::environment::EnvironmentConfig;
use fleet_booking::routes::build_app;
use fleet_booking::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚚 Fleet Booking - Motor de reservas de flota");
    info!("=============================================");

    let config = EnvironmentConfig::from_env();

    // Elegir backend de datos: Postgres si hay DATABASE_URL, memoria si no
    let state = match config.database_url.clone() {
        Some(url) => {
            let db_config = DatabaseConfig::new(url);
            let pool = match db_config.create_pool().await {
                Ok(pool) => {
                    info!("✅ PostgreSQL conectado exitosamente");
                    pool
                }
                Err(e) => {
                    error!("❌ Error conectando a la base de datos: {}", e);
                    return Err(anyhow::anyhow!("Error de base de datos: {}", e));
                }
            };
            AppState::with_postgres(config.clone(), pool)?
        }
        None => {
            warn!("⚠️ DATABASE_URL no definida: usando store en memoria (los datos no persisten)");
            AppState::with_memory_store(config.clone())?
        }
    };

    let app = build_app(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("   GET  /metrics - Métricas Prometheus");
    info!("🚗 Endpoints MVC - Vehicle:");
    info!("   POST /api/vehicles - Registrar vehículo");
    info!("   GET  /api/vehicles - Listar flota");
    info!("   GET  /api/vehicles/available - Buscar disponibilidad");
    info!("   GET  /api/vehicles/:id - Obtener vehículo");
    info!("   PUT  /api/vehicles/:id/status - Transicionar estado");
    info!("📋 Endpoints MVC - Booking:");
    info!("   POST /api/bookings - Admitir reserva");
    info!("   GET  /api/bookings - Listar reservas (filtros)");
    info!("   GET  /api/bookings/:id - Obtener reserva");
    info!("   POST /api/bookings/:id/cancel - Cancelar reserva");
    info!("   PUT  /api/bookings/:id/status - Override de estado");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!("Error del servidor: {}", e)
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
