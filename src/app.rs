use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::booking_client::BookingClient;
use crate::config::Config;
use crate::db::Database;
use crate::handlers::{self, AppState};
use crate::joke_client::JokeClient;
use crate::services::StudentService;
use crate::student_repository::StudentRepository;

/// Serves the OpenAPI specification YAML file.
async fn serve_openapi_spec() -> impl IntoResponse {
    match tokio::fs::read_to_string("openapi.yml").await {
        Ok(content) => (
            StatusCode::OK,
            [(axum::http::header::CONTENT_TYPE, "text/yaml")],
            content,
        )
            .into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "OpenAPI spec not found").into_response(),
    }
}

/// Serves a Swagger UI page pointed at `/api-docs/openapi.yml`.
async fn serve_swagger_ui() -> impl IntoResponse {
    let html = r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Student Registry - Swagger UI</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
    <style>
        body { margin: 0; padding: 0; }
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-standalone-preset.js"></script>
    <script>
        window.onload = function() {
            window.ui = SwaggerUIBundle({
                url: "/api-docs/openapi.yml",
                dom_id: '#swagger-ui',
                deepLinking: true,
                presets: [
                    SwaggerUIBundle.presets.apis,
                    SwaggerUIStandalonePreset
                ],
                layout: "StandaloneLayout"
            });
        };
    </script>
</body>
</html>
"#;
    (
        StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, "text/html; charset=utf-8")],
        html,
    )
}

/// Wires storage and both outbound clients from the configuration.
///
/// Connects to Postgres when `database_url` is set, otherwise keeps students in memory.
pub async fn build_state(config: Config) -> anyhow::Result<Arc<AppState>> {
    let repository = match &config.database_url {
        Some(url) => {
            let db = Database::new(url).await?;
            tracing::info!("Database connection pool established");
            StudentRepository::postgres(db.pool)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, students are kept in memory");
            StudentRepository::in_memory()
        }
    };

    let timeout = Duration::from_secs(config.http_timeout_secs);
    let joke_client = JokeClient::new(config.joke_url.clone(), timeout)?;
    let booking_client = BookingClient::new(config.booking_base_url.clone(), timeout)?;
    tracing::info!(
        "✓ Outbound clients initialized (booking: {}, joke: {})",
        config.booking_base_url,
        config.joke_url
    );

    Ok(Arc::new(AppState {
        config,
        students: StudentService::new(repository, joke_client, booking_client),
    }))
}

/// Student API routes with body-size limit, tracing and CORS.
///
/// Rate limiting is layered on by the binary, which owns the connect info it needs.
pub fn student_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/docs", get(serve_swagger_ui))
        .route("/api-docs/openapi.yml", get(serve_openapi_spec))
        .route(
            "/api/v1/students",
            get(handlers::list_students).post(handlers::create_student),
        )
        .route(
            "/api/v1/students/:id",
            get(handlers::get_student).delete(handlers::delete_student),
        )
        .layer(ServiceBuilder::new().layer(RequestBodyLimitLayer::new(1024 * 1024)))
}

pub fn build_router(state: Arc<AppState>, protected_routes: Router<Arc<AppState>>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .merge(protected_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
