use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use syncspace_api::api::{self, AppState};
use syncspace_api::config::Settings;
use syncspace_api::inference::{build_http_client, Backends};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::from_env().expect("Invalid configuration");

    if settings.backend.accepts_credentials() && settings.openai_api_key.is_none() {
        tracing::info!("No OPENAI_API_KEY set; the alternate provider is used only with caller credentials");
    }
    if settings.hf_api_token.is_none() {
        tracing::warn!("HF_API_TOKEN not set, calling the hosted inference API anonymously");
    }

    // Build model backends
    let client = build_http_client(settings.request_timeout).expect("Failed to create HTTP client");
    let backends = Backends::from_settings(&settings, client).expect("Failed to configure backends");

    tracing::info!(
        "Backend selection: {} (hosted model {}, alternate model {})",
        settings.backend,
        settings.hf_model,
        settings.openai_model
    );
    tracing::info!("Employee roster: {}", settings.roles.join(", "));

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = api::router(AppState::from_settings(&settings, backends))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = settings.bind_addr;
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app)
        .await
        .expect("Server failed");
}
