use calc_rules::{api, config::Config, InMemoryRuleSetResolver, RuleSetResolver};
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let port = config.port;

    // Load the rule set; rules are immutable and shared read-only from here on
    let resolver = match InMemoryRuleSetResolver::from_json_file(&config.rules_path) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Failed to load rules from {}: {}", config.rules_path, e);
            std::process::exit(1);
        }
    };
    let resolver: Arc<dyn RuleSetResolver> = Arc::new(resolver);

    let app = api::create_router(api::AppState::new(resolver, config));

    // Bind to address
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Server listening on {}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
