use axum::{
    extract::State,
    http::{header, HeaderValue, Method, StatusCode},
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Router,
};
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{auth, queries, recommendations};
use crate::middleware::require_auth;
use crate::state::AppState;

/// Build the full application router.
///
/// Token acquisition, public browsing and recommendation submission stay
/// open; everything that reads or mutates identity-scoped data sits behind
/// the auth middleware.
pub fn app(state: AppState) -> Router {
    let auth_gate = from_fn_with_state(state.config.clone(), require_auth);

    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Token issuance and logout
        .route("/jwt", post(auth::login))
        .route("/logout", post(auth::logout))
        // Queries
        .route("/query", get(queries::search))
        .route("/query/add", post(queries::create).layer(auth_gate.clone()))
        .route("/query/all", get(queries::mine).layer(auth_gate.clone()))
        .route(
            "/query/:id",
            put(queries::update)
                .delete(queries::remove)
                .layer(auth_gate.clone())
                .get(queries::show),
        )
        // Recommendations
        .route("/recommendation/add", post(recommendations::create))
        .route(
            "/recommendation/all",
            get(recommendations::mine).layer(auth_gate.clone()),
        )
        .route(
            "/recommendation/foruser",
            get(recommendations::for_user).layer(auth_gate.clone()),
        )
        .route("/recommendation/all/:query_id", get(recommendations::for_query))
        .route(
            "/recommendation/:id",
            delete(recommendations::remove)
                .layer(auth_gate)
                .get(recommendations::show),
        )
        // Global middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&state.config.security.cors_origins)),
        )
        .with_state(state)
}

/// Credentialed CORS: cookies only flow cross-site with explicit origins,
/// so the permissive wildcard setup is not an option here.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| o.parse::<HeaderValue>().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "AlQuest API",
            "version": version,
            "description": "Product query and recommendation backend",
            "endpoints": {
                "home": "/ (public)",
                "auth": "/jwt, /logout (public - token acquisition)",
                "queries": "/query[...] (mixed - mutations require auth)",
                "recommendations": "/recommendation[...] (mixed - owner-scoped routes require auth)",
            }
        }
    }))
}

async fn health(State(pool): State<PgPool>) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match crate::database::health_check(&pool).await {
        Ok(_) => (
            StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
