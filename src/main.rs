use std::sync::Arc;

use clap::Parser;
use docserve::cli::Args;
use docserve::config::{Config, LoggingConfig};
use docserve::logs::ServerLog;
use docserve::server;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let args = Args::parse();

    let mut cfg = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            let log = ServerLog::new(LoggingConfig::default().dir);
            report_fatal(&log, &anyhow::Error::new(e)).await;
            std::process::exit(1);
        }
    };
    if let Some(port) = args.port {
        cfg.server.port = port;
    }

    let log = ServerLog::new(&cfg.logging.dir);
    let cfg = Arc::new(cfg);

    tokio::select! {
        res = server::run(cfg) => {
            if let Err(e) = res {
                report_fatal(&log, &e).await;
                std::process::exit(1);
            }
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }
}

async fn report_fatal(log: &ServerLog, e: &anyhow::Error) {
    tracing::error!("{:#}", e);
    log.error(format!("{e:#}")).await;
}
