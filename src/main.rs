use anyhow::Result;
use axum::{extract::State, response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use fleet_dispatch::cache::{CacheConfig, RedisClient};
use fleet_dispatch::config::environment::EnvironmentConfig;
use fleet_dispatch::database::DatabaseConnection;
use fleet_dispatch::middleware::cors::cors_for_environment;
use fleet_dispatch::routes;
use fleet_dispatch::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚐 Fleet Dispatch - Motor de despachos y liquidación de siniestros");
    info!("==================================================================");

    let config = EnvironmentConfig::default();

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    if let Err(e) = db_connection.run_migrations().await {
        error!("❌ Error aplicando migraciones: {}", e);
        return Err(anyhow::anyhow!("Error de migraciones: {}", e));
    }

    let pool = db_connection.pool().clone();

    // Inicializar Redis
    let redis_config = CacheConfig {
        redis_url: config.redis_url.clone(),
        default_ttl: config.calendar_cache_ttl,
        max_connections: 10,
    };

    let redis_client = match RedisClient::new(redis_config).await {
        Ok(client) => client,
        Err(e) => {
            error!("❌ Error conectando a Redis: {}", e);
            return Err(anyhow::anyhow!("Error de Redis: {}", e));
        }
    };

    // Crear router de la API
    let cors = cors_for_environment(config.is_production(), &config.cors_origins);
    let app_state = AppState::new(pool, config.clone(), redis_client);

    let app = Router::new()
        .route("/health", get(health_endpoint))
        .nest("/api/operation", routes::operation_routes::create_operation_router())
        .nest("/api/dispatch", routes::dispatch_routes::create_dispatch_router())
        .nest("/api/calendar", routes::calendar_routes::create_calendar_router())
        .nest(
            "/api/schedule-block",
            routes::schedule_block_routes::create_schedule_block_router(),
        )
        .layer(cors)
        .with_state(app_state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Estado del servicio");
    info!("📦 Endpoints - Operaciones:");
    info!("   POST /api/operation - Crear operación de despacho");
    info!("   GET  /api/operation - Listar operaciones");
    info!("   GET  /api/operation/:id - Obtener operación");
    info!("   PUT  /api/operation/:id - Editar operación");
    info!("   POST /api/operation/:id/complete - Completar operación");
    info!("   POST /api/operation/:id/cancel - Cancelar operación");
    info!("🚗 Endpoints - Despachos orquestados:");
    info!("   POST /api/dispatch/insurance - Despacho por siniestro");
    info!("   POST /api/dispatch/rental - Alquiler de mostrador");
    info!("📅 Endpoints - Calendario:");
    info!("   GET  /api/calendar - Índice por día de un rango");
    info!("   GET  /api/calendar/day - Detalle de un día");
    info!("   GET  /api/calendar/month - Cuadrícula mensual (42 celdas)");
    info!("   GET  /api/calendar/week - Cuadrícula semanal");
    info!("🗓️ Endpoints - Bloqueos de agenda:");
    info!("   POST /api/schedule-block - Crear bloqueo manual");
    info!("   DELETE /api/schedule-block/:id - Liberar bloqueo manual");

    // Iniciar servidor en background
    let server_handle = tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                error!("❌ Error del servidor: {}", e);
                e
            })
    });

    // Esperar a que el servidor termine
    if let Err(e) = server_handle.await? {
        error!("❌ Servidor terminó con error: {}", e);
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Estado del servicio: conectividad de base de datos y cache
async fn health_endpoint(State(state): State<AppState>) -> Json<serde_json::Value> {
    let db_ok = sqlx::query("SELECT 1").execute(&state.pool).await.is_ok();
    let redis_ok = state.redis.is_connected().await;

    Json(json!({
        "service": "fleet-dispatch",
        "status": if db_ok { "healthy" } else { "degraded" },
        "database": db_ok,
        "cache": redis_ok,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
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
