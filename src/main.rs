//src/main.rs

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use cafeteria_reports::{
    config::{AppState, Config},
    db::{self, ReportsRepository},
    routes::build_router,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cafeteria_reports=info,tower_http=info")),
        )
        .with_target(false)
        .compact()
        .init();

    // Configuração inválida: nem chega a abrir o socket
    let config = Config::from_env().inspect_err(|e| tracing::error!("Configuração inválida: {}", e))?;

    // Sem pool não há servidor; não existe retry
    let pool = db::connect(&config)
        .await
        .inspect_err(|e| tracing::error!("Falha ao conectar no banco: {}", e))?;

    let repository = ReportsRepository::new(pool.clone());
    let app_state = AppState::new(Arc::new(repository), config.stock_thresholds);
    let app = build_router(app_state);

    let listener = TcpListener::bind(config.bind_addr.as_str()).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Pool de conexões fechado, até mais");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Falha ao escutar Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Falha ao escutar SIGTERM: {}", e);
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

    tracing::info!("Sinal de desligamento recebido");
}
