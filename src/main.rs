use clap::Parser; // for cli
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use user_service::app::{build_state, router, serve};
use user_service::clock::SystemClock;
use user_service::config::{Args, ConfigError, LogFormat};
use user_service::notify::{NotificationSink, notification_worker};
use user_service::rate_limit::sweep_idle_clients;
use user_service::shutdown::shutdown_signal;

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("server i/o: {0}")]
    Io(#[from] std::io::Error),
}

fn init_tracing(format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().flatten_event(true).with_current_span(false))
            .init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer())
            .init(),
    }
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    // parse cli arguments
    let args = Args::parse();
    init_tracing(args.log_format);

    let rate_config = args.rate_limit_config()?;

    let (notifications, notify_rx) = NotificationSink::channel(args.notify_queue);
    tokio::spawn(notification_worker(notify_rx));

    let state = build_state(
        &rate_config,
        &args.rate_limit_prefix,
        Arc::new(SystemClock),
        notifications,
    );

    if state.rate_limiter.evicts_idle_clients() {
        tokio::spawn(sweep_idle_clients(
            Arc::clone(&state.rate_limiter),
            args.sweep_interval(),
        ));
    }

    let app = router(state);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(%addr, "user service listening");
    tracing::info!(
        max_requests = rate_config.max_requests,
        window_ms = rate_config.window_ms,
        prefix = %args.rate_limit_prefix,
        idle_ms = ?rate_config.idle_ms,
        "rate limit configured"
    );

    serve(listener, app, shutdown_signal()).await?;
    tracing::info!("server stopped");
    Ok(())
}
