//! Route table and the layers wrapped around it

use std::any::Any;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{warn, Level};

use crate::handlers;
use crate::middleware::require_session;
use crate::response::ApiError;
use crate::state::AppState;

const MAX_BODY_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    // Public routes (no session)
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/register", post(handlers::auth::register))
        .route("/api/login", post(handlers::auth::login))
        .route("/api/logout", post(handlers::auth::logout));

    // Protected routes (session middleware)
    let protected_routes = Router::new()
        .route("/api/user", get(handlers::auth::current_user))
        .route(
            "/api/tenants",
            get(handlers::tenants::list_tenants).post(handlers::tenants::create_tenant),
        )
        .route(
            "/api/tenants/{id}",
            get(handlers::tenants::get_tenant)
                .patch(handlers::tenants::update_tenant)
                .delete(handlers::tenants::delete_tenant),
        )
        .route(
            "/api/tenants/{id}/bills",
            get(handlers::tenants::list_bills).post(handlers::tenants::create_bill),
        )
        .route(
            "/api/bills/{id}",
            get(handlers::bills::get_bill)
                .patch(handlers::bills::update_bill)
                .delete(handlers::bills::delete_bill),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session));

    let mut router = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CatchPanicLayer::custom(handle_panic));

    if let Some(cors) = cors_layer(state.config.app.cors_origin.as_deref()) {
        router = router.layer(cors);
    }

    router
        // Tracing (headers stay out of spans: they carry the session cookie)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

/// Credentialed CORS for a single configured origin. `None` when unset or unparsable.
fn cors_layer(origin: Option<&str>) -> Option<CorsLayer> {
    let origin = origin?;
    let Ok(origin) = origin.parse::<HeaderValue>() else {
        warn!("Ignoring invalid CORS origin: {}", origin);
        return None;
    };

    Some(
        CorsLayer::new()
            .allow_origin(origin)
            .allow_credentials(true)
            .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
    )
}

fn handle_panic(_err: Box<dyn Any + Send + 'static>) -> Response {
    ApiError::InternalError("handler panicked".to_string()).into_response()
}
