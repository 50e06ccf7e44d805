use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use drilldeck::config::Config;
use drilldeck::handlers::{drills, history, templates, workouts};
use drilldeck::repositories::{DrillRepository, HistoryRepository, TemplateRepository};
use drilldeck::{db, migrations, routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "drilldeck=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    tracing::info!("Connecting to database: {}", config.database_url);

    // Create database pool
    let pool = db::create_pool(&config.database_url)?;

    // Run migrations
    migrations::run_migrations(&pool)?;

    // Create repositories
    let drill_repo = DrillRepository::new(pool.clone());
    let template_repo = TemplateRepository::new(pool.clone());
    let history_repo = HistoryRepository::new(pool.clone());

    // Create handler states
    let drills_state = drills::DrillsState {
        drill_repo: drill_repo.clone(),
    };
    let workouts_state = workouts::WorkoutsState {
        drill_repo: drill_repo.clone(),
        template_repo: template_repo.clone(),
        history_repo: history_repo.clone(),
    };
    let templates_state = templates::TemplatesState {
        template_repo: template_repo.clone(),
    };
    let history_state = history::HistoryState {
        history_repo: history_repo.clone(),
    };

    // Build router
    let app = routes::create_router(drills_state, workouts_state, templates_state, history_state);

    // Start server
    let addr = config.server_addr();
    tracing::info!("Starting server at http://{}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install shutdown signal handler: {}", e);
        return;
    }
    tracing::info!("Shutting down");
}
