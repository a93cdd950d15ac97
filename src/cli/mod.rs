use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::info;

use crate::config::AppConfig;
use crate::database::Database;
use crate::server;
use crate::state::AppState;

#[derive(Debug, Parser)]
#[command(name = "contact-api")]
#[command(about = "Contact management REST API")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Bind address, overrides API_HOST")]
        host: Option<String>,

        #[arg(long, help = "Listen port, overrides API_PORT")]
        port: Option<u16>,

        #[arg(long, help = "Do not apply migrations on startup")]
        skip_migrations: bool,
    },

    #[command(about = "Apply database migrations and exit")]
    Migrate,
}

pub async fn run(cli: Cli, mut config: AppConfig) -> anyhow::Result<()> {
    let command = cli.command.unwrap_or(Commands::Serve {
        host: None,
        port: None,
        skip_migrations: false,
    });

    match command {
        Commands::Serve {
            host,
            port,
            skip_migrations,
        } => {
            if let Some(host) = host {
                config.api.host = host;
            }
            if let Some(port) = port {
                config.api.port = port;
            }
            if skip_migrations {
                config.database.run_migrations = false;
            }
            serve(config).await
        }
        Commands::Migrate => {
            let db = Database::connect(&config.database).await?;
            db.migrate().await?;
            db.close().await;
            Ok(())
        }
    }
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    info!("Starting contact API in {:?} mode", config.environment);

    let db = Database::connect(&config.database).await?;
    if config.database.run_migrations {
        db.migrate().await?;
    }

    let bind_addr = format!("{}:{}", config.api.host, config.api.port);
    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {}: {}", bind_addr, e))?;
    info!("Listening on http://{}", listener.local_addr()?);

    let state = AppState::new(db.clone(), config);
    axum::serve(listener, server::app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received, draining connections");
}
