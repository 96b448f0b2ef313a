use std::sync::Arc;

use anyhow::Context;
use axum::extract::Request;
use axum::ServiceExt;
use clap::Parser;
use golink_core::{Repository, SubstitutionPolicy};
use golink_directory::DirectoryService;
use golink_gateway::config::{StorageBackendArg, CLI};
use golink_gateway::{telemetry, App, AppState, RenderConfig};
use golink_redirector::RedirectorService;
use golink_storage::{InMemoryRepository, MySqlRepository, SqliteRepository};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();
    telemetry::init(config.log_format);

    info!(
        listen_addr = %config.listen_addr,
        storage_backend = %config.storage,
        "starting gateway server"
    );

    let render = RenderConfig::builder()
        .public_base_url(config.public_base_url.clone())
        .build();
    let policy = SubstitutionPolicy::from(config.substitution_policy);

    let state = match config.storage {
        StorageBackendArg::InMemory => build_state(InMemoryRepository::new(), policy, render),
        StorageBackendArg::Sqlite => {
            let repository = SqliteRepository::connect(config.sqlite_url())
                .await
                .context("failed to open sqlite database")?;
            repository
                .migrate()
                .await
                .context("failed to migrate sqlite database")?;
            build_state(repository, policy, render)
        }
        StorageBackendArg::Mysql => {
            let database_url = config
                .database_url
                .as_deref()
                .context("database url is required when storage backend is mysql")?;
            let repository = MySqlRepository::connect(database_url)
                .await
                .context("failed to connect to mysql")?;
            repository
                .migrate()
                .await
                .context("failed to migrate mysql database")?;
            build_state(repository, policy, render)
        }
    };

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!(listen_addr = %listener.local_addr()?, "gateway listening");

    let app = App::service(state);
    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("gateway stopped");
    Ok(())
}

/// Both services share one repository instance.
fn build_state<R: Repository>(
    repository: R,
    policy: SubstitutionPolicy,
    render: RenderConfig,
) -> AppState {
    let repository = Arc::new(repository);
    let directory = DirectoryService::from_shared(Arc::clone(&repository));
    let redirector = RedirectorService::from_shared(repository, policy);
    AppState::new(Arc::new(directory), Arc::new(redirector), render)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
