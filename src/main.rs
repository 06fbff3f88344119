//! Diet Recipe Generator
//!
//! A small web backend that turns a dietary preference and a caller-supplied
//! API key into a generated recipe, via one chat-completion call to an
//! external provider. Serves a single static page at the root route.

mod api;
mod core;
mod models;

use crate::api::endpoints::{AppState, create_router};
use crate::core::assets::resolve_static_dir;
use crate::core::client::OpenAIClient;
use crate::core::config::Config;
use crate::core::logging::init_logging;
use crate::core::provider::Provider;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if std::env::args().any(|arg| arg == "--help") {
        print_help();
        return;
    }

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            eprintln!("Configuration Error: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    init_logging(&config.log_level);

    // Print startup banner
    print_startup_banner(&config);

    // Resolve static assets relative to the binary, not the working directory
    let static_dir = resolve_static_dir(&config.static_dir);
    if !static_dir.join("index.html").exists() {
        error!(
            "index.html not found under {} - GET / will fail until it exists",
            static_dir.display()
        );
    }

    // Create provider client (no credential: keys arrive per request)
    let provider: Arc<dyn Provider> = Arc::new(OpenAIClient::new(
        config.base_url.clone(),
        config.request_timeout,
        config.max_retries,
    ));

    info!("Using provider: {}", provider.provider_name());

    // Create application state
    let app_state = AppState {
        config: config.clone(),
        provider,
        static_dir,
    };

    // Create router
    let app = create_router(app_state);

    // Bind to address
    let addr = format!("{}:{}", config.host, config.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    info!("Server listening on http://{}", addr);

    // Run server
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Print startup banner with configuration
fn print_startup_banner(config: &Config) {
    println!("🍳 Diet Recipe Generator v0.1.0");
    println!("✅ Configuration loaded successfully");
    println!("   Model: {}", config.model);
    println!("   Provider Base URL: {}", config.base_url);
    println!("   Request Timeout: {}s", config.request_timeout);
    println!("   Max Retries: {}", config.max_retries);
    println!("   Static Dir: {}", config.static_dir.display());
    println!("   Server: {}:{}", config.host, config.port);
    println!();
}

/// Print help message
fn print_help() {
    println!("Diet Recipe Generator v0.1.0");
    println!();
    println!("Usage: diet-recipe-server [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --help    Display this help message");
    println!();
    println!("Environment variables:");
    println!("  CONFIG_PATH - Path to TOML config file (default: config.toml)");
    println!("  RUST_LOG    - Log filter override");
    println!();
    println!("All configuration is optional. Built-in defaults:");
    println!("  [server]   host = 0.0.0.0, port = 8000, log_level = info");
    println!("  [provider] model = gpt-4o, base_url = https://api.openai.com/v1,");
    println!("             request_timeout = 60, max_retries = 2");
    println!("  [assets]   static_dir = static (resolved next to the binary)");
    println!();
    println!("The OpenAI API key is supplied by each caller in the request body;");
    println!("the server itself holds no credential.");
}
