// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Request bodies that fail validation are refused before any directory call.

use admin_queries_server::{AdminRoute, RESPONSE_TIME_HEADER};
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};

use super::support::{body_json, valid_fields, Caller, TestApp};

async fn assert_invalid(response: axum::response::Response, context: &str) -> String {
	assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{context}");
	assert!(
		response.headers().contains_key(&RESPONSE_TIME_HEADER),
		"timing header missing: {context}"
	);
	let body = body_json(response).await;
	assert_eq!(body["error"], "invalid_body", "{context}");
	body["message"].as_str().unwrap_or_default().to_string()
}

#[tokio::test]
async fn each_missing_field_is_rejected() {
	let app = TestApp::new();

	for route in AdminRoute::ALL {
		let fields = valid_fields(route);
		for omitted in 0..fields.len() {
			let partial: Vec<_> = fields
				.iter()
				.enumerate()
				.filter(|(i, _)| *i != omitted)
				.map(|(_, f)| *f)
				.collect();

			let response = app.call(route, Caller::Admin, &partial).await;
			let context = format!("{} without {}", route.path(), fields[omitted].0);
			let message = assert_invalid(response, &context).await;
			assert!(message.contains(fields[omitted].0), "{context}: {message}");
		}
	}

	assert_eq!(app.backend.call_count(), 0);
}

#[tokio::test]
async fn empty_post_body_is_missing_fields() {
	let app = TestApp::new();
	let request = Request::builder()
		.method(Method::POST)
		.uri("/enable-user")
		.header(header::AUTHORIZATION, "Bearer admin-token")
		.body(Body::empty())
		.unwrap();

	let message = assert_invalid(app.send(request).await, "empty body").await;

	assert!(message.contains("username"), "{message}");
	assert_eq!(app.backend.call_count(), 0);
}

#[tokio::test]
async fn unknown_fields_are_rejected() {
	let app = TestApp::new();

	let response = app
		.post_form(
			"/disable-user",
			Caller::Admin,
			&[("username", "alice"), ("reason", "spam")],
		)
		.await;
	let message = assert_invalid(response, "extra field").await;

	assert!(message.contains("reason"), "{message}");
	assert_eq!(app.backend.call_count(), 0);
}

#[tokio::test]
async fn fields_on_a_fieldless_route_are_rejected() {
	let app = TestApp::new();

	let response = app
		.get("/list-groups", Caller::Admin, &[("limit", "10")])
		.await;
	assert_invalid(response, "list-groups with limit").await;

	assert_eq!(app.backend.call_count(), 0);
}

#[tokio::test]
async fn repeated_fields_are_rejected() {
	let app = TestApp::new();

	let response = app
		.post_form(
			"/enable-user",
			Caller::Admin,
			&[("username", "alice"), ("username", "mallory")],
		)
		.await;
	assert_invalid(response, "repeated username").await;

	assert_eq!(app.backend.call_count(), 0);
}

#[tokio::test]
async fn json_bodies_are_not_accepted() {
	let app = TestApp::new();
	let request = Request::builder()
		.method(Method::POST)
		.uri("/enable-user")
		.header(header::AUTHORIZATION, "Bearer admin-token")
		.header(header::CONTENT_TYPE, "application/json")
		.body(Body::from(r#"{"username":"alice"}"#))
		.unwrap();

	assert_invalid(app.send(request).await, "json body").await;
	assert_eq!(app.backend.call_count(), 0);
}

#[tokio::test]
async fn multipart_text_fields_are_accepted() {
	let app = TestApp::new();
	let body = "--BOUNDARY\r\n\
		Content-Disposition: form-data; name=\"username\"\r\n\
		\r\n\
		alice\r\n\
		--BOUNDARY\r\n\
		Content-Disposition: form-data; name=\"group\"\r\n\
		\r\n\
		ADMINS\r\n\
		--BOUNDARY--\r\n"
		.to_string();

	let response = app
		.post_multipart("/remove-user-from-group", Caller::Admin, body)
		.await;

	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(app.backend.call_count(), 1);
}

#[tokio::test]
async fn multipart_part_without_filename_is_a_string() {
	let app = TestApp::new();
	let body = "--BOUNDARY\r\n\
		Content-Disposition: form-data; name=\"username\"\r\n\
		Content-Type: application/json\r\n\
		\r\n\
		alice\r\n\
		--BOUNDARY--\r\n"
		.to_string();

	let response = app.post_multipart("/enable-user", Caller::Admin, body).await;

	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(app.backend.call_count(), 1);
}

#[tokio::test]
async fn multipart_file_is_not_a_string() {
	let app = TestApp::new();
	let body = "--BOUNDARY\r\n\
		Content-Disposition: form-data; name=\"username\"; filename=\"alice.bin\"\r\n\
		Content-Type: application/octet-stream\r\n\
		\r\n\
		alice\r\n\
		--BOUNDARY--\r\n"
		.to_string();

	let response = app.post_multipart("/enable-user", Caller::Admin, body).await;
	let message = assert_invalid(response, "file upload").await;

	assert!(message.contains("must be a string"), "{message}");
	assert_eq!(app.backend.call_count(), 0);
}

#[tokio::test]
async fn malformed_multipart_is_rejected() {
	let app = TestApp::new();

	let response = app
		.post_multipart("/enable-user", Caller::Admin, "not multipart at all".to_string())
		.await;
	assert_invalid(response, "broken multipart").await;

	assert_eq!(app.backend.call_count(), 0);
}
