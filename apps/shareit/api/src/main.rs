use axum_helpers::server::{CleanupCoordinator, close_postgres, create_production_app};
use core_config::tracing::{init_tracing, install_color_eyre};
use migration::Migrator;
use shareit_api::config::{Config, StorageConfig};
use shareit_api::state::AppState;
use tracing::info;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    let db = match &config.storage {
        StorageConfig::Postgres(pg) => {
            let db = database::postgres::connect_from_config_with_retry(pg.clone(), None)
                .await
                .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

            database::postgres::run_migrations::<Migrator>(&db, config.app.name)
                .await
                .map_err(|e| eyre::eyre!("Database migration failed: {}", e))?;
            Some(db)
        }
        StorageConfig::Memory => {
            tracing::warn!("STORAGE=memory: data will not survive a restart");
            None
        }
    };

    let state = AppState { config, db };
    let app = shareit_api::build_app(&state)?;

    info!(
        app = state.config.app.name,
        version = state.config.app.version,
        "Starting ShareIt API"
    );

    let server = state.config.server.clone();
    create_production_app(app, &server, async move {
        let mut cleanup = CleanupCoordinator::new();
        if let Some(db) = state.db {
            cleanup.add_task("postgres", close_postgres(db, "shareit"));
        }
        cleanup.run().await;
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("ShareIt API shutdown complete");
    Ok(())
}
