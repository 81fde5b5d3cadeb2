// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Extraction of raw request fields from query strings and form bodies.

use axum::body::{to_bytes, Body};
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::Method;
use thiserror::Error;
use url::form_urlencoded;

use crate::validation::{RawPayload, RawValue};

pub const MAX_BODY_BYTES: usize = 64 * 1024;

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
const MULTIPART_FORM_DATA: &str = "multipart/form-data";

#[derive(Debug, Error)]
pub enum PayloadError {
	#[error("unsupported content type '{0}'")]
	UnsupportedContentType(String),

	#[error("request body could not be read: {0}")]
	Unreadable(String),

	#[error("malformed form data: {0}")]
	Malformed(String),
}

/// Reads the fields of a request: the query string for GET and HEAD, the
/// form body otherwise.
pub async fn read_payload(request: Request) -> Result<RawPayload, PayloadError> {
	if matches!(*request.method(), Method::GET | Method::HEAD) {
		let query = request.uri().query().unwrap_or_default();
		return Ok(parse_urlencoded(query.as_bytes()));
	}

	let content_type = request
		.headers()
		.get(CONTENT_TYPE)
		.map(|v| {
			v.to_str()
				.map(|s| s.to_string())
				.map_err(|_| PayloadError::Malformed("content type is not valid text".to_string()))
		})
		.transpose()?;

	let (parts, body) = request.into_parts();
	let bytes = to_bytes(body, MAX_BODY_BYTES)
		.await
		.map_err(|e| PayloadError::Unreadable(e.to_string()))?;

	let Some(content_type) = content_type else {
		return if bytes.is_empty() {
			Ok(RawPayload::default())
		} else {
			Err(PayloadError::UnsupportedContentType("none".to_string()))
		};
	};

	match essence(&content_type).as_str() {
		FORM_URLENCODED => Ok(parse_urlencoded(&bytes)),
		MULTIPART_FORM_DATA => {
			let request = Request::from_parts(parts, Body::from(bytes));
			read_multipart(request).await
		}
		other => Err(PayloadError::UnsupportedContentType(other.to_string())),
	}
}

/// The media type without parameters, lowercased.
fn essence(content_type: &str) -> String {
	content_type
		.split(';')
		.next()
		.unwrap_or_default()
		.trim()
		.to_ascii_lowercase()
}

fn parse_urlencoded(bytes: &[u8]) -> RawPayload {
	form_urlencoded::parse(bytes)
		.map(|(name, value)| (name.into_owned(), RawValue::Text(value.into_owned())))
		.collect()
}

async fn read_multipart(request: Request) -> Result<RawPayload, PayloadError> {
	let mut multipart = Multipart::from_request(request, &())
		.await
		.map_err(|e| PayloadError::Malformed(e.body_text()))?;

	let mut payload = RawPayload::default();
	while let Some(field) = multipart
		.next_field()
		.await
		.map_err(|e| PayloadError::Malformed(e.body_text()))?
	{
		let name = field.name().unwrap_or_default().to_string();
		let file_name = field.file_name().map(str::to_string);

		// Any part without a filename is a string, whatever its content type.
		if file_name.is_none() {
			let text = field
				.text()
				.await
				.map_err(|e| PayloadError::Malformed(e.body_text()))?;
			payload.push(name, RawValue::Text(text));
		} else {
			let data = field
				.bytes()
				.await
				.map_err(|e| PayloadError::Malformed(e.body_text()))?;
			payload.push(
				name,
				RawValue::Blob {
					file_name,
					len: data.len(),
				},
			);
		}
	}
	Ok(payload)
}
