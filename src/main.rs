use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal::unix::{signal, SignalKind};

mod app_context;
mod cli;
mod http;
mod logging;
mod thumbnails;

#[tokio::main]
async fn main() {
    let args = cli::Args::parse();
    logging::init(&args);

    let listen_address = match args.listen_address() {
        Ok(listen_address) => listen_address,
        Err(err) => {
            tracing::error!(error = %err, port = ?args.port, "Invalid listen address.");
            std::process::exit(1);
        }
    };
    let app_context = match app_context::init(&args) {
        Ok(app_context) => app_context,
        Err(err) => {
            tracing::error!(error = %err, "Failed to initialize HTTP client.");
            std::process::exit(1);
        }
    };
    let router = http::router::new(&args, app_context);

    let listener = match TcpListener::bind(listen_address).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(error = %err, address = %listen_address, "Failed to bind listener.");
            std::process::exit(1);
        }
    };
    tracing::info!(address = %listen_address, "Server started.");

    tokio::select! {
        result = axum::serve(listener, router) => {
            if let Err(err) = result {
                tracing::error!(error = %err, "Server stopped unexpectedly.");
                std::process::exit(1);
            }
        }
        signal_name = shutdown_signal() => {
            tracing::info!(signal = signal_name, "Server stopped with signal.");
        }
    }
}

/// Resolves once SIGINT or SIGTERM arrives. In-flight requests are not drained.
async fn shutdown_signal() -> &'static str {
    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sigterm) => sigterm,
        Err(err) => {
            tracing::error!(error = %err, "Failed to install SIGTERM handler.");
            return match tokio::signal::ctrl_c().await {
                Ok(()) => "SIGINT",
                Err(_) => std::future::pending().await,
            };
        }
    };
    tokio::select! {
        _ = tokio::signal::ctrl_c() => "SIGINT",
        _ = sigterm.recv() => "SIGTERM",
    }
}
