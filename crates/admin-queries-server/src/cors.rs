// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::time::Duration;

use admin_queries_config::CorsConfig;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, DATE};
use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;

use crate::timing::RESPONSE_TIME_HEADER;

const API_ID_HEADER: HeaderName = HeaderName::from_static("x-api-id");

pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
	let origins = if config.allows_any_origin() {
		AllowOrigin::any()
	} else {
		AllowOrigin::list(config.allowed_origins.iter().filter_map(|origin| {
			HeaderValue::from_str(origin)
				.inspect_err(|_| warn!(origin = %origin, "ignoring invalid CORS origin"))
				.ok()
		}))
	};

	CorsLayer::new()
		.allow_origin(origins)
		.allow_methods([Method::GET, Method::POST, Method::OPTIONS, Method::HEAD])
		.allow_headers([CONTENT_TYPE, AUTHORIZATION])
		.expose_headers([DATE, API_ID_HEADER, RESPONSE_TIME_HEADER])
		.max_age(Duration::from_secs(config.max_age_secs))
}
