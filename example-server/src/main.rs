use axum::{extract::State, http::StatusCode, routing::get, Router};
use axum_grid_builder::{DataSourceSettings, GridBuilderLayer};
use sqlx::sqlite::SqlitePoolOptions;
use tower_http::cors::CorsLayer;

mod database;

#[derive(Clone)]
struct ApplicationState {
    pool: sqlx::SqlitePool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,axum_grid_builder=debug".into()),
        )
        .init();

    // Required settings, no baked-in fallbacks. For a local demo:
    //   GRID_DB_HOST=localhost GRID_DB_NAME=example \
    //   GRID_DB_USERNAME=demo GRID_DB_PASSWORD=demo cargo run
    let settings = DataSourceSettings::from_env().expect(
        "set GRID_DB_HOST, GRID_DB_NAME, GRID_DB_USERNAME and GRID_DB_PASSWORD",
    );

    // A single connection keeps the in-memory demo database shared
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open SQLite database");

    // Create and seed the demo tables
    database::setup(&pool)
        .await
        .expect("Failed to setup database");

    let application_state = ApplicationState { pool: pool.clone() };

    // Note: GridBuilderLayer must be merged before with_state() since it
    // returns a stateless Router
    let app = Router::new()
        .route("/", get(root_handler))
        .route("/api/health", get(health_handler))
        .with_state(application_state)
        .merge(
            GridBuilderLayer::sqlite("/grid", pool, "schemas/allowed_tables.json", settings)
                .into_router(),
        )
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000")
        .await
        .expect("Failed to bind to port 3000");

    tracing::info!("Server running at http://127.0.0.1:3000");
    tracing::info!("Allow-list at http://127.0.0.1:3000/grid/tables");
    tracing::info!("Dashboards at http://127.0.0.1:3000/grid/dashboard/{{name}}");

    axum::serve(listener, app).await.expect("Server error");
}

async fn root_handler() -> &'static str {
    "Welcome to the axum-grid-builder example server"
}

async fn health_handler(
    State(state): State<ApplicationState>,
) -> Result<(StatusCode, &'static str), StatusCode> {
    sqlx::query("SELECT 1")
        .fetch_one(&state.pool)
        .await
        .map_err(|_| StatusCode::SERVICE_UNAVAILABLE)?;

    Ok((StatusCode::OK, "Server is healthy"))
}
