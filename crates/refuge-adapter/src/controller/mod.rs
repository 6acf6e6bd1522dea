//! Inbound Adapter - HTTP API
//!
//! ## Endpoints
//!
//! - `GET /survivors` - List survivors (404 when none)
//! - `POST /survivor` - Register a survivor
//! - `GET /survivor/:id` - Survivor details
//! - `PUT /survivor/:id` - Update last known location
//! - `DELETE /survivor/:id` - Remove a survivor
//! - `POST /report/survivor/:id` - Report a survivor as infected
//! - `GET /report` - Situational report with robots
//! - `GET /health` - Liveness

pub mod dto;
pub mod error;
pub mod handlers;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use refuge_domain::{RobotFeed, SurvivorRepository};

pub use error::{ApiError, ApiResult};
pub use state::AppState;

/// Build the router over the given adapters.
pub fn create_router<R, F>(state: AppState<R, F>) -> Router
where
    R: SurvivorRepository + Clone + Send + Sync + 'static,
    F: RobotFeed + Send + Sync + 'static,
{
    Router::new()
        .route("/survivors", get(handlers::list_survivors::<R, F>))
        .route("/survivor", post(handlers::create_survivor::<R, F>))
        .route(
            "/survivor/:id",
            get(handlers::get_survivor::<R, F>)
                .put(handlers::update_location::<R, F>)
                .delete(handlers::delete_survivor::<R, F>),
        )
        .route("/report/survivor/:id", post(handlers::flag_infection::<R, F>))
        .route("/report", get(handlers::report::<R, F>))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
