use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use heimdall::server::{
    config::Config, model::app::AppState, router, scheduler::cron::start_scheduler,
    service::auth::rate_limit::RateLimiter, startup,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let db = startup::connect_to_database(&config).await.unwrap();
    let notifier = startup::build_notifier(&config).unwrap();

    start_scheduler(&db, &notifier).await.unwrap();

    let session = startup::session_layer();
    let listen_addr = config.listen_addr.clone();

    let state = AppState {
        db,
        config: Arc::new(config),
        notifier,
        rate_limiter: Arc::new(RateLimiter::default()),
    };

    let app = router::routes().with_state(state).layer(session);

    tracing::info!("Starting server on {}", listen_addr);

    let listener = tokio::net::TcpListener::bind(&listen_addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
