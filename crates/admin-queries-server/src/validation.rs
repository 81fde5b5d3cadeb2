// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Declarative request schemas and the single validator that enforces them.

use std::collections::BTreeMap;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
	String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
	pub name: &'static str,
	pub required: bool,
	pub kind: FieldKind,
}

impl FieldSpec {
	pub const fn required_string(name: &'static str) -> Self {
		Self {
			name,
			required: true,
			kind: FieldKind::String,
		}
	}
}

/// The exact set of fields a route accepts.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
	pub fields: &'static [FieldSpec],
}

impl Schema {
	pub const fn new(fields: &'static [FieldSpec]) -> Self {
		Self { fields }
	}

	pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
		self.fields.iter().find(|f| f.name == name)
	}
}

/// A value as it arrived on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
	Text(String),
	Blob {
		file_name: Option<String>,
		len: usize,
	},
}

/// Unvalidated request fields in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawPayload {
	entries: Vec<(String, RawValue)>,
}

impl RawPayload {
	pub fn push(&mut self, name: impl Into<String>, value: RawValue) {
		self.entries.push((name.into(), value));
	}

	pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.push(name, RawValue::Text(value.into()));
		self
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
		self.entries.iter().map(|(n, v)| (n.as_str(), v))
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl FromIterator<(String, RawValue)> for RawPayload {
	fn from_iter<I: IntoIterator<Item = (String, RawValue)>>(iter: I) -> Self {
		Self {
			entries: iter.into_iter().collect(),
		}
	}
}

/// Fields that passed validation. Only [`validate`] builds one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPayload {
	fields: BTreeMap<&'static str, String>,
}

impl ValidatedPayload {
	pub fn get(&self, name: &str) -> Option<&str> {
		self.fields.get(name).map(String::as_str)
	}

	pub fn required(&self, name: &'static str) -> Result<&str, ValidationError> {
		self.get(name).ok_or(ValidationError::Missing(name))
	}

	pub fn len(&self) -> usize {
		self.fields.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
	#[error("missing required field '{0}'")]
	Missing(&'static str),

	#[error("field '{0}' must be a string")]
	NotAString(String),

	#[error("field '{0}' appears more than once")]
	Repeated(String),

	#[error("unexpected field '{0}'")]
	Unexpected(String),
}

pub fn validate(schema: &Schema, raw: &RawPayload) -> Result<ValidatedPayload, ValidationError> {
	let mut fields = BTreeMap::new();

	for (name, value) in raw.iter() {
		let spec = schema
			.field(name)
			.ok_or_else(|| ValidationError::Unexpected(name.to_string()))?;

		if fields.contains_key(spec.name) {
			return Err(ValidationError::Repeated(name.to_string()));
		}

		let text = match (spec.kind, value) {
			(FieldKind::String, RawValue::Text(text)) => text.clone(),
			(FieldKind::String, RawValue::Blob { .. }) => {
				return Err(ValidationError::NotAString(name.to_string()))
			}
		};
		fields.insert(spec.name, text);
	}

	if let Some(missing) = schema
		.fields
		.iter()
		.find(|f| f.required && !fields.contains_key(f.name))
	{
		return Err(ValidationError::Missing(missing.name));
	}

	Ok(ValidatedPayload { fields })
}
