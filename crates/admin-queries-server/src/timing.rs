// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `X-Response-Time` header.

use std::time::Instant;

use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;

pub const RESPONSE_TIME_HEADER: HeaderName = HeaderName::from_static("x-response-time");

/// Records how long the inner service took, in whole milliseconds.
pub async fn response_timer(request: Request, next: Next) -> Response {
	let started = Instant::now();
	let mut response = next.run(request).await;
	stamp(&mut response, started);
	response
}

pub fn stamp(response: &mut Response, started: Instant) {
	let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
	response
		.headers_mut()
		.insert(RESPONSE_TIME_HEADER, HeaderValue::from(elapsed_ms));
}
