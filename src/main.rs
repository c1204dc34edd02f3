use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::{delete, get, post, put};
use axum::{extract::State, Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use practice_api::config;
use practice_api::database::pool;
use practice_api::middleware::bearer_auth_middleware;
use practice_api::services::{IdentityClient, Mailer, OtpStore, StorageClient};
use practice_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL and friends
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("Starting Practice API in {:?} mode", config.environment);

    let pool = pool::connect(&config.database).await?;
    sqlx::migrate!().run(&pool).await?;

    let state = AppState {
        pool,
        identity: IdentityClient::new(&config.auth),
        storage: StorageClient::new(&config.storage).await,
        mailer: Arc::new(Mailer::new(&config.email)?),
        otp: OtpStore::new(Duration::from_secs(config.otp.ttl_secs)),
    };

    let app = app(state);

    // Allow tests or deployments to override port via env
    let port = std::env::var("PRACTICE_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(config.server.port);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}

fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Public auth forwarding
        .merge(auth_routes())
        // Protected API
        .merge(api_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    use practice_api::handlers::auth;

    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/signup", post(auth::signup))
        .route("/auth/verify", get(auth::verify))
        .route("/auth/recover", post(auth::recover))
        .route("/auth/password", put(auth::update_password))
        .route("/auth/otp", post(auth::request_otp))
        .route("/auth/otp/verify", post(auth::verify_otp))
}

fn api_routes() -> Router<AppState> {
    use practice_api::handlers::{
        auth, files, game_results, resources, session_resources, sessions, students, themes,
        therapists,
    };

    Router::new()
        .route("/api/students", get(students::list).post(students::create))
        .route(
            "/api/students/:id",
            get(students::get).patch(students::update).delete(students::delete),
        )
        .route("/api/therapists", get(therapists::list).post(therapists::create))
        .route(
            "/api/therapists/:id",
            get(therapists::get).patch(therapists::update).delete(therapists::delete),
        )
        .route("/api/themes", get(themes::list).post(themes::create))
        .route(
            "/api/themes/:id",
            get(themes::get).patch(themes::update).delete(themes::delete),
        )
        .route("/api/resources", get(resources::list).post(resources::create))
        .route(
            "/api/resources/:id",
            get(resources::get).patch(resources::update).delete(resources::delete),
        )
        .route("/api/sessions", get(sessions::list).post(sessions::create))
        .route(
            "/api/sessions/:id",
            get(sessions::get).patch(sessions::update).delete(sessions::delete),
        )
        .route("/api/game-results", get(game_results::list).post(game_results::create))
        .route(
            "/api/game-results/:id",
            get(game_results::get).delete(game_results::delete),
        )
        .route(
            "/api/session-resources",
            get(session_resources::list).post(session_resources::create),
        )
        .route(
            "/api/session-resources/:id",
            get(session_resources::get).delete(session_resources::delete),
        )
        .route("/api/files", get(files::list))
        .route("/api/files/presign", get(files::presign))
        .route("/api/auth/users/:id", delete(auth::admin_delete_user))
        .route_layer(axum::middleware::from_fn(bearer_auth_middleware))
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Practice API",
        "version": version,
        "description": "Therapy practice management backend",
        "endpoints": {
            "home": "/ (public)",
            "health": "/health (public)",
            "auth": "/auth/* (public - credential forwarding)",
            "students": "/api/students[/:id] (protected)",
            "therapists": "/api/therapists[/:id] (protected)",
            "themes": "/api/themes[/:id] (protected)",
            "resources": "/api/resources[/:id] (protected)",
            "sessions": "/api/sessions[/:id] (protected)",
            "game_results": "/api/game-results[/:id] (protected)",
            "session_resources": "/api/session-resources[/:id] (protected)",
            "files": "/api/files, /api/files/presign (protected)",
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match pool::health_check(&state.pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "timestamp": now,
                "database_error": e.to_string()
            })),
        ),
    }
}
