//! pathmux server and route inspection CLI.
//!
//! ```text
//! pathmux [--config FILE] serve [--bind ADDR]   run the HTTP host (default)
//! pathmux [--config FILE] check                 validate templates, list variables
//! pathmux [--config FILE] match PATH            show the route and values PATH binds
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use pathmux::config::{load_config, load_or_default};
use pathmux::http::{build_router, HttpServer};
use pathmux::observability::logging;
use pathmux::routing::Pattern;

#[derive(Parser)]
#[command(name = "pathmux")]
#[command(about = "Template-based request router", long_about = None)]
struct Cli {
    /// Configuration file (TOML).
    #[arg(short, long, default_value = "pathmux.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve requests over HTTP
    Serve {
        /// Override the configured bind address
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Validate the configured templates
    Check,
    /// Show which route a path dispatches to
    Match {
        /// Request path, e.g. /item/42
        path: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve { bind: None }) {
        Commands::Serve { bind } => serve(&cli.config, bind).await,
        Commands::Check => check(&cli.config),
        Commands::Match { path } => match_path(&cli.config, &path),
    }
}

async fn serve(path: &Path, bind: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let (mut config, found) = load_or_default(path)?;
    logging::init(&config.observability.log_level);

    if !found {
        tracing::warn!(path = %path.display(), "Config file not found, using defaults");
    }

    if let Some(bind) = bind {
        config.listener.bind_address = bind;
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        routes = config.routes.len(),
        fallbacks = config.fallbacks.len(),
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = HttpServer::new(config)?;
    server.run(listener, shutdown_signal()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn check(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(path)?;

    for route in &config.routes {
        let pattern = Pattern::compile(&route.template)?;
        let variables: Vec<String> = pattern
            .variables()
            .map(|spec| format!("{}:{}", spec.name, spec.kind))
            .collect();
        println!(
            "{}  {} variable(s) [{}]",
            route.template,
            pattern.variable_count(),
            variables.join(", ")
        );
    }
    println!(
        "{} routes, {} fallbacks OK",
        config.routes.len(),
        config.fallbacks.len()
    );
    Ok(())
}

fn match_path(path: &Path, request_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let (config, found) = load_or_default(path)?;
    if !found {
        eprintln!("{} not found, using defaults", path.display());
    }
    let router = build_router(&config)?;

    match router.matched_template(request_path) {
        Some(template) => {
            println!("route: {}", template);
            match router.variables_for(request_path) {
                Ok(values) => println!("variables: {}", serde_json::to_string(&values)?),
                Err(e) => println!("variables: none ({})", e),
            }
        }
        None => println!("no route matched; the not-found fallback would run"),
    }
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
