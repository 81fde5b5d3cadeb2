// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: built-in defaults, TOML files and environment variables.

use std::path::PathBuf;

use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::AdminConfigLayer;
use crate::sections::{
	AuthConfigLayer, CorsConfigLayer, DirectoryConfigLayer, HttpConfigLayer, LogFormat,
	LoggingConfigLayer,
};

pub const SYSTEM_CONFIG_PATH: &str = "/etc/admin-queries/server.toml";

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<AdminConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<AdminConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(AdminConfigLayer::default())
	}
}

/// TOML file source. A missing file contributes nothing.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn system() -> Self {
		Self::new(SYSTEM_CONFIG_PATH)
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<AdminConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(AdminConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: AdminConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: ADMIN_QUERIES_<FIELD>. The unprefixed names used by earlier
/// deployments (`COGNITO_USER_POOL_ID`, `ALLOWED_GROUPS`,
/// `ACCESS_CONTROL_ALLOW_ORIGINS`) are honored as fallbacks.
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<AdminConfigLayer, ConfigError> {
		debug!("loading environment variables");
		Ok(AdminConfigLayer {
			http: Some(load_http_from_env()?),
			directory: Some(load_directory_from_env()),
			auth: Some(load_auth_from_env()?),
			cors: Some(load_cors_from_env()?),
			logging: Some(load_logging_from_env()?),
		})
	}
}

fn env_var(name: &str) -> Option<String> {
	std::env::var(name).ok().filter(|s| !s.trim().is_empty())
}

fn env_var_or(name: &str, fallback: &str) -> Option<(String, String)> {
	env_var(name)
		.map(|v| (name.to_string(), v))
		.or_else(|| env_var(fallback).map(|v| (fallback.to_string(), v)))
}

fn env_u16(name: &str) -> Result<Option<u16>, ConfigError> {
	match env_var(name) {
		Some(v) => v.trim().parse().map(Some).map_err(|_| ConfigError::InvalidValue {
			key: name.to_string(),
			message: format!("invalid u16 value '{v}'"),
		}),
		None => Ok(None),
	}
}

fn env_u64(name: &str) -> Result<Option<u64>, ConfigError> {
	match env_var(name) {
		Some(v) => v.trim().parse().map(Some).map_err(|_| ConfigError::InvalidValue {
			key: name.to_string(),
			message: format!("invalid u64 value '{v}'"),
		}),
		None => Ok(None),
	}
}

fn env_list(name: &str, fallback: &str) -> Result<Option<Vec<String>>, ConfigError> {
	env_var_or(name, fallback)
		.map(|(key, value)| parse_list(&key, &value))
		.transpose()
}

/// Parses a list given either as a JSON array of strings or as a
/// comma-separated string. Blank entries are dropped.
pub fn parse_list(key: &str, value: &str) -> Result<Vec<String>, ConfigError> {
	let value = value.trim();
	let items: Vec<String> = if value.starts_with('[') {
		serde_json::from_str(value).map_err(|e| ConfigError::InvalidValue {
			key: key.to_string(),
			message: format!("expected a JSON array of strings: {e}"),
		})?
	} else {
		value.split(',').map(str::to_string).collect()
	};

	Ok(items
		.into_iter()
		.map(|s| s.trim().to_string())
		.filter(|s| !s.is_empty())
		.collect())
}

fn load_http_from_env() -> Result<HttpConfigLayer, ConfigError> {
	Ok(HttpConfigLayer {
		host: env_var("ADMIN_QUERIES_HOST"),
		port: env_u16("ADMIN_QUERIES_PORT")?,
	})
}

fn load_directory_from_env() -> DirectoryConfigLayer {
	DirectoryConfigLayer {
		user_pool_id: env_var_or("ADMIN_QUERIES_USER_POOL_ID", "COGNITO_USER_POOL_ID")
			.map(|(_, v)| v),
		region: env_var("ADMIN_QUERIES_DIRECTORY_REGION"),
		endpoint_url: env_var("ADMIN_QUERIES_DIRECTORY_ENDPOINT_URL"),
	}
}

fn load_auth_from_env() -> Result<AuthConfigLayer, ConfigError> {
	Ok(AuthConfigLayer {
		allowed_groups: env_list("ADMIN_QUERIES_ALLOWED_GROUPS", "ALLOWED_GROUPS")?,
		client_ids: env_var("ADMIN_QUERIES_CLIENT_IDS")
			.map(|v| parse_list("ADMIN_QUERIES_CLIENT_IDS", &v))
			.transpose()?,
	})
}

fn load_cors_from_env() -> Result<CorsConfigLayer, ConfigError> {
	Ok(CorsConfigLayer {
		allowed_origins: env_list(
			"ADMIN_QUERIES_CORS_ALLOWED_ORIGINS",
			"ACCESS_CONTROL_ALLOW_ORIGINS",
		)?,
		max_age_secs: env_u64("ADMIN_QUERIES_CORS_MAX_AGE_SECS")?,
	})
}

fn load_logging_from_env() -> Result<LoggingConfigLayer, ConfigError> {
	let format = env_var("ADMIN_QUERIES_LOG_FORMAT")
		.map(|v| {
			v.parse::<LogFormat>()
				.map_err(|message| ConfigError::InvalidValue {
					key: "ADMIN_QUERIES_LOG_FORMAT".to_string(),
					message,
				})
		})
		.transpose()?;

	Ok(LoggingConfigLayer {
		level: env_var("ADMIN_QUERIES_LOG_LEVEL"),
		format,
	})
}
