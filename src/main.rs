use actix_web::{App, HttpServer, middleware, web};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer, filter::LevelFilter};
mod api;
use crate::api::{
    cors::cors_policy,
    health::health_config,
    jobs::{handlers::job_config, JobService},
};
mod cli;
mod client;
mod config;
mod shutdown;
#[cfg(test)]
mod test_support;
use crate::cli::{Cli, Command};
use crate::shutdown::ShutdownCoordinator;

/// Console plus daily rotating per-level files in `log_dir`
/// (logs/info.log.2024-12-22, logs/error.log.2024-12-22, ...)
fn init_server_tracing(log_dir: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());

    let info_file = tracing_appender::rolling::daily(log_dir, "info.log");
    let warn_file = tracing_appender::rolling::daily(log_dir, "warn.log");
    let error_file = tracing_appender::rolling::daily(log_dir, "error.log");
    let debug_file = tracing_appender::rolling::daily(log_dir, "debug.log");

    let info_layer = tracing_subscriber::fmt::layer()
        .with_writer(info_file)
        .with_ansi(false)
        .with_filter(LevelFilter::INFO);

    let warn_layer = tracing_subscriber::fmt::layer()
        .with_writer(warn_file)
        .with_ansi(false)
        .with_filter(LevelFilter::WARN);

    let error_layer = tracing_subscriber::fmt::layer()
        .with_writer(error_file)
        .with_ansi(false)
        .with_filter(LevelFilter::ERROR);

    let debug_layer = tracing_subscriber::fmt::layer()
        .with_writer(debug_file)
        .with_ansi(false)
        .with_filter(LevelFilter::DEBUG);

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(info_layer)
        .with(warn_layer)
        .with(error_layer)
        .with(debug_layer)
        .init();
}

/// The terminal client prints results on stdout, so its logs go to stderr
fn init_client_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn serve() -> std::io::Result<()> {
    // Load configuration from environment
    let config = config::Config::from_env()
        .expect("Failed to load configuration");

    std::fs::create_dir_all(&config.log_dir)
        .expect("Failed to create logs directory");

    init_server_tracing(&config.log_dir);

    info!("Starting job-tracker proxy");
    info!("Configuration loaded successfully:");
    info!("  - Upstream: {}", config.upstream_url);
    info!("  - Upstream timeout: {:?}", config.upstream_timeout);

    let job_service = web::Data::new(
        JobService::new(&config).expect("Failed to create upstream HTTP client"),
    );

    let server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::from_fn(cors_policy))
            .wrap(middleware::Logger::default())
            .app_data(job_service.clone())
            .configure(health_config)
            .configure(job_config)
    })
    .disable_signals();

    info!("Server starting on http://{}:{}", config.host, config.port);

    let server = server
        .bind((config.host.as_str(), config.port))?
        .run();

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    ShutdownCoordinator::new(server_handle, server_task)
        .wait_for_shutdown()
        .await
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve().await,
        Command::Search(args) => {
            dotenv::dotenv().ok();
            init_client_tracing();
            client::session::run(args)
                .await
                .map_err(|e| std::io::Error::other(format!("{e:#}")))
        }
    }
}
