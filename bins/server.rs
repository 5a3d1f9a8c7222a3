use clap::Parser;
use configs::{AppConfig, LogFormat};
use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

/// In-memory users router.
#[derive(Debug, Parser)]
#[command(name = "server", version, about)]
struct Cli {
    /// HTTP port; overrides config file and SERVER_PORT
    #[arg(long)]
    port: Option<u16>,
    /// Bind host; overrides config file and SERVER_HOST
    #[arg(long)]
    host: Option<String>,
    /// Path to a TOML config file (defaults to CONFIG_PATH or ./config.toml)
    #[arg(long, env = "CONFIG_PATH")]
    config: Option<String>,
    /// Emit JSON log lines
    #[arg(long)]
    log_json: bool,
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!(service = "server", event = "shutdown_signal", "received Ctrl+C, shutting down");
    }
}

fn main() -> std::process::ExitCode {
    // load .env before anything reads RUST_LOG or SERVER_*
    dotenv().ok();
    let cli = Cli::parse();

    let mut cfg = match AppConfig::load(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            common::utils::logging::init_logging_default();
            error!(service = "server", event = "config_load_failed", error = %e, "failed to load configuration");
            return std::process::ExitCode::FAILURE;
        }
    };
    if let Some(port) = cli.port { cfg.server.port = port; }
    if let Some(host) = cli.host { cfg.server.host = host; }

    common::utils::logging::init_logging(cli.log_json || cfg.logging.format == LogFormat::Json);
    info!(service = "server", event = "logger_init", "tracing subscriber initialized");

    if let Err(e) = cfg.normalize_and_validate() {
        error!(service = "server", event = "config_invalid", error = %e, "invalid configuration");
        return std::process::ExitCode::FAILURE;
    }

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "server",
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    let worker_threads = cfg.server.worker_threads;
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "server", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "server",
        event = "start",
        %service_id,
        pid,
        version,
        addr = %cfg.bind_addr(),
        threads = worker_threads.unwrap_or_default(),
        "server service starting"
    );

    match rt.block_on(server::run(cfg, shutdown_signal())) {
        Ok(()) => {
            info!(service = "server", event = "stop", %service_id, pid, "server stopped normally");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "server", event = "run_failed", error = %e, "server::run returned error");
            std::process::ExitCode::FAILURE
        }
    }
}
