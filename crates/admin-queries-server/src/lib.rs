// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! HTTP admin API for the identity directory.
//!
//! Request flow: authorization gate, response timer, payload extraction,
//! schema validation, one directory call, response.

pub mod cors;
pub mod error;
pub mod gate;
pub mod payload;
pub mod routes;
pub mod state;
pub mod timing;
pub mod validation;

use std::sync::Arc;

use admin_queries_config::CorsConfig;
use axum::Router;
use tower_http::trace::TraceLayer;

pub use error::{AdminApiError, ErrorResponse};
pub use gate::AuthorizationGate;
pub use routes::{create_router, AdminRoute, ResponseShape};
pub use state::AppState;
pub use timing::RESPONSE_TIME_HEADER;

/// The complete application: admin routes plus request tracing and CORS.
pub fn create_app(state: AppState, gate: Arc<AuthorizationGate>, cors: &CorsConfig) -> Router {
	create_router(state, gate)
		.layer(TraceLayer::new_for_http())
		.layer(cors::cors_layer(cors))
}
