use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use outreach_ai::{AiClient, AiConfig};
use outreach_api::config::ServerConfig;
use outreach_api::router::build_app_router;
use outreach_api::state::AppState;
use outreach_db::memory::MemoryStore;
use outreach_db::pg::PgStore;
use outreach_db::store::{ConsultationStore, ProspectStore, TemplateStore};
use outreach_mailer::{EmailTransport, SmtpConfig, SmtpMailer};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "outreach_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Backing store ---
    let pool = match std::env::var("DATABASE_URL") {
        Ok(database_url) => {
            let pool = outreach_db::create_pool(&database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            outreach_db::health_check(&pool)
                .await
                .expect("Database health check failed");
            tracing::info!("Database health check passed");

            outreach_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            Some(pool)
        }
        Err(_) => {
            tracing::warn!(
                "DATABASE_URL is not set, using the seeded in-memory store; \
                 data will not survive a restart"
            );
            None
        }
    };

    let templates: Arc<dyn TemplateStore>;
    let prospects: Arc<dyn ProspectStore>;
    let consultations: Arc<dyn ConsultationStore>;
    match &pool {
        Some(pool) => {
            let store = Arc::new(PgStore::new(pool.clone()));
            templates = store.clone();
            prospects = store.clone();
            consultations = store;
        }
        None => {
            let store = Arc::new(MemoryStore::seeded());
            templates = store.clone();
            prospects = store.clone();
            consultations = store;
        }
    }

    // --- AI client ---
    let ai = AiConfig::from_env().map(|cfg| Arc::new(AiClient::new(cfg)));
    if ai.is_none() {
        tracing::warn!("OPENAI_API_KEY is not set, AI endpoints will be unavailable");
    }

    // --- Email transport ---
    let mailer: Option<Arc<dyn EmailTransport>> = SmtpConfig::from_env().map(|cfg| {
        tracing::info!(
            host = %cfg.host,
            port = cfg.port,
            implicit_tls = cfg.implicit_tls(),
            "SMTP transport configured"
        );
        Arc::new(SmtpMailer::new(cfg)) as Arc<dyn EmailTransport>
    });
    if mailer.is_none() {
        tracing::warn!("SMTP_HOST is not set, send endpoints will be unavailable");
    }

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        pool,
        templates,
        prospects,
        consultations,
        ai,
        mailer,
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
