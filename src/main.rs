use std::sync::Arc;

use actix_web::{App, HttpServer, middleware, web};
use anyhow::Context;
use clap::Parser;
use tracing::info;

mod api;
mod cli;
mod config;
mod db;
mod shutdown;
mod telemetry;
mod ui;

use crate::api::{api_config, health::health_config, job::JobService, validation};
use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::db::{JobRepository, JobStore, MemoryJobStore};
use crate::shutdown::ShutdownCoordinator;
use crate::ui::{JobsClient, UiState, ui_config};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;
    telemetry::init_tracing(&config.log_dir)?;

    match cli.command() {
        Command::Migrate => migrate(&config).await,
        Command::Serve { in_memory } => serve(config, in_memory).await,
    }
}

async fn migrate(config: &Config) -> anyhow::Result<()> {
    let pool = db::connection::get_connection(&config.database)
        .await
        .context("Failed to connect to database")?;
    db::migrations::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    pool.close().await;
    Ok(())
}

async fn open_store(config: &Config, in_memory: bool) -> anyhow::Result<Arc<dyn JobStore>> {
    if in_memory {
        info!("Using in-memory job store; jobs are lost on exit");
        return Ok(Arc::new(MemoryJobStore::new()));
    }

    let pool = db::connection::get_connection(&config.database)
        .await
        .context("Failed to connect to database")?;
    info!("Database connection pool established");

    if config.database.sync {
        db::migrations::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;
    }

    Ok(Arc::new(JobRepository::new(pool)))
}

async fn serve(config: Config, in_memory: bool) -> anyhow::Result<()> {
    info!("Starting job-board application");
    info!("Configuration loaded successfully:");
    info!("  - Max payload size: {} bytes", config.max_payload_size);
    info!("  - Max database connections: {}", config.database.max_connections);
    info!("  - Job API for the UI: {}", config.api_base_url);

    let store = open_store(&config, in_memory).await?;
    let job_service = web::Data::new(JobService::new(store));
    let ui_state = web::Data::new(UiState::new(JobsClient::new(config.api_base_url.clone())));

    let max_payload_size = config.max_payload_size;
    let server_service = job_service.clone();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(server_service.clone())
            .app_data(ui_state.clone())
            .app_data(web::PayloadConfig::default().limit(max_payload_size))
            .app_data(web::FormConfig::default().limit(max_payload_size))
            .app_data(validation::json_config(max_payload_size))
            .app_data(validation::query_config())
            .app_data(validation::path_config())
            .configure(health_config)
            .configure(api_config)
            .configure(ui_config)
    })
    .disable_signals();

    info!("Server starting on http://{}:{}", config.host, config.port);
    let server = server
        .bind((config.host.as_str(), config.port))
        .with_context(|| format!("Failed to bind {}:{}", config.host, config.port))?
        .run();

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    ShutdownCoordinator::new(server_handle, server_task, job_service)
        .wait_for_shutdown()
        .await?;
    Ok(())
}
