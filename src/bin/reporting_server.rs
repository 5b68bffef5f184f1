//! Reporting REST API server.
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/biotrack cargo run --bin reporting_server
//!
//! curl "http://localhost:3000/api/reporting/matrix?workPackageId=1&outputNumber=2"
//! curl "http://localhost:3000/api/reporting/delivery-analysis?indicatorCode=1.2"
//! curl "http://localhost:3000/api/reporting/output-performance?output=1"
//! curl http://localhost:3000/api/health
//! ```

use std::sync::Arc;

use anyhow::Result;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use biotrack::api::create_reporting_router;
use biotrack::config::{DatabaseConfig, ServerConfig};
use biotrack::database::{connect, PgRowSource};
use biotrack::reporting::ReportingService;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("biotrack=info,tower_http=info")),
        )
        .init();

    dotenvy::dotenv().ok();

    let db_config = DatabaseConfig::default();
    let server_config = ServerConfig::default();

    let pool = connect(&db_config).await?;
    let service = ReportingService::new(Arc::new(PgRowSource::new(pool)));

    let app = create_reporting_router(service).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
    );

    let addr = format!("0.0.0.0:{}", server_config.port);
    info!("Starting reporting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
