mod config;

use std::sync::Arc;
use std::time::Duration;

use actix_cors::Cors;
use actix_web::{middleware as actix_middleware, web, App, HttpServer};
use dotenvy::dotenv;
use tracing::{error, info};

use registry_core::health::{HealthSupervisor, ReqwestHealthProbe};
use registry_core::{RegistryConfig, RegistryCore};
use registry_http::{init_routes, AppState};

use config::AppConfig;

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .json()
        .init();
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    init_logging();

    let app_config = AppConfig::from_env().map_err(|e| {
        std::io::Error::new(std::io::ErrorKind::Other, format!("invalid application config: {e}"))
    })?;
    let registry_config = RegistryConfig::from_env().map_err(|e| {
        std::io::Error::new(std::io::ErrorKind::Other, format!("invalid registry config: {e}"))
    })?;

    let registry = RegistryCore::new(registry_config.registration_key.clone());
    registry.init();

    let health_config = registry_config.health;
    let supervisor_handle = if health_config.enabled {
        let probe = Arc::new(ReqwestHealthProbe::new(Duration::from_millis(health_config.ttl_ms)));
        let supervisor = Arc::new(HealthSupervisor::new(
            registry.index_handle(),
            registry.events().clone(),
            probe,
            health_config,
        ));
        Some(supervisor.spawn())
    } else {
        None
    };

    let state = web::Data::new(AppState::new(registry.clone(), app_config.admin_key.clone()));
    let shutdown = state.shutdown.clone();
    let server_address = app_config.server_address();

    info!(address = %server_address, "starting service registry");

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(state.clone())
            .wrap(actix_middleware::Logger::default())
            .wrap(cors)
            .configure(init_routes)
    })
    .bind(&server_address)?
    .run();

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    shutdown.notified().await;
    info!("shutdown requested, stopping http server");
    server_handle.stop(true).await;

    tokio::select! {
        result = server_task => {
            if let Err(err) = result {
                error!(%err, "http server task panicked during shutdown");
            }
        }
        _ = tokio::time::sleep(Duration::from_secs(10)) => {
            error!("graceful shutdown timed out after 10s, forcing exit");
            std::process::exit(1);
        }
    }

    if let Some(handle) = supervisor_handle {
        handle.abort();
    }

    Ok(())
}
