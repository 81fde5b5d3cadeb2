// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Verification of user pool tokens against the pool's published JWKS.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use crate::error::AuthError;
use crate::identity::{CallerIdentity, CognitoClaims};
use crate::verifier::TokenVerifier;

const JWKS_FETCH_TIMEOUT_SECS: u64 = 10;
const LEEWAY_SECS: u64 = 60;
const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct VerifierSettings {
	/// Expected `iss` claim.
	pub issuer: String,
	pub jwks_url: String,
	/// App clients whose tokens are accepted. Empty accepts any client.
	pub client_ids: Vec<String>,
	/// Minimum time between two JWKS fetches triggered by unknown key ids.
	pub min_refresh_interval: Duration,
}

impl VerifierSettings {
	pub fn for_user_pool(region: &str, user_pool_id: &str, client_ids: Vec<String>) -> Self {
		let issuer = format!("https://cognito-idp.{region}.amazonaws.com/{user_pool_id}");
		Self {
			jwks_url: format!("{issuer}/.well-known/jwks.json"),
			issuer,
			client_ids,
			min_refresh_interval: MIN_REFRESH_INTERVAL,
		}
	}
}

#[derive(Debug, Deserialize)]
struct JwkSet {
	keys: Vec<Jwk>,
}

#[derive(Debug, Deserialize)]
struct Jwk {
	kid: Option<String>,
	kty: String,
	n: Option<String>,
	e: Option<String>,
}

#[derive(Default)]
struct KeyCache {
	keys: HashMap<String, DecodingKey>,
	last_fetch: Option<Instant>,
}

impl KeyCache {
	fn fetched_within(&self, interval: Duration) -> bool {
		self.last_fetch.is_some_and(|at| at.elapsed() < interval)
	}
}

pub struct CognitoVerifier {
	http: Client,
	settings: VerifierSettings,
	keys: RwLock<KeyCache>,
}

impl CognitoVerifier {
	pub fn new(settings: VerifierSettings) -> Result<Self, AuthError> {
		let http = Client::builder()
			.timeout(Duration::from_secs(JWKS_FETCH_TIMEOUT_SECS))
			.build()
			.map_err(|e| AuthError::KeyFetch(e.to_string()))?;
		Ok(Self {
			http,
			settings,
			keys: RwLock::new(KeyCache::default()),
		})
	}

	pub fn settings(&self) -> &VerifierSettings {
		&self.settings
	}

	async fn fetch_keys(&self) -> Result<HashMap<String, DecodingKey>, AuthError> {
		let response = self
			.http
			.get(&self.settings.jwks_url)
			.send()
			.await
			.map_err(|e| AuthError::KeyFetch(e.to_string()))?;

		if !response.status().is_success() {
			return Err(AuthError::KeyFetch(format!(
				"JWKS endpoint returned {}",
				response.status()
			)));
		}

		let jwks: JwkSet = response
			.json()
			.await
			.map_err(|e| AuthError::KeyFetch(e.to_string()))?;

		let mut keys = HashMap::new();
		for jwk in jwks.keys {
			let (Some(kid), Some(n), Some(e)) = (jwk.kid, jwk.n, jwk.e) else {
				continue;
			};
			if jwk.kty != "RSA" {
				continue;
			}
			match DecodingKey::from_rsa_components(&n, &e) {
				Ok(key) => {
					keys.insert(kid, key);
				}
				Err(err) => debug!(kid = %kid, error = %err, "skipping unusable JWK"),
			}
		}

		info!(url = %self.settings.jwks_url, keys = keys.len(), "fetched user pool signing keys");
		Ok(keys)
	}

	/// Looks up a signing key, refreshing the key set if `kid` is unknown.
	///
	/// Fetches are attempted at most once per `min_refresh_interval`; inside
	/// that window an unknown `kid` fails without contacting the endpoint.
	async fn key_for(&self, kid: &str) -> Result<DecodingKey, AuthError> {
		let interval = self.settings.min_refresh_interval;
		{
			let cache = self.keys.read().await;
			if let Some(key) = cache.keys.get(kid) {
				return Ok(key.clone());
			}
			if cache.fetched_within(interval) {
				return Err(AuthError::UnknownSigningKey(kid.to_string()));
			}
		}

		let mut cache = self.keys.write().await;
		// A concurrent request may have refreshed while we waited for the lock.
		if let Some(key) = cache.keys.get(kid) {
			return Ok(key.clone());
		}
		if cache.fetched_within(interval) {
			debug!(kid = %kid, "unknown key id inside refresh interval");
			return Err(AuthError::UnknownSigningKey(kid.to_string()));
		}

		cache.last_fetch = Some(Instant::now());
		cache.keys = self.fetch_keys().await?;
		cache
			.keys
			.get(kid)
			.cloned()
			.ok_or_else(|| AuthError::UnknownSigningKey(kid.to_string()))
	}

	fn validation(&self) -> Validation {
		let mut validation = Validation::new(Algorithm::RS256);
		validation.set_issuer(&[&self.settings.issuer]);
		validation.validate_aud = false;
		validation.leeway = LEEWAY_SECS;
		validation
	}

	fn check_client(&self, claims: &CognitoClaims) -> Result<(), AuthError> {
		if self.settings.client_ids.is_empty() {
			return Ok(());
		}
		match claims.client() {
			Some(client) if self.settings.client_ids.iter().any(|id| id == client) => Ok(()),
			_ => Err(AuthError::InvalidToken(
				"token was issued to an unexpected client".to_string(),
			)),
		}
	}
}

#[async_trait]
impl TokenVerifier for CognitoVerifier {
	#[instrument(skip_all)]
	async fn verify(&self, token: &str) -> Result<CallerIdentity, AuthError> {
		let header = decode_header(token).map_err(|e| AuthError::InvalidToken(e.to_string()))?;
		if header.alg != Algorithm::RS256 {
			return Err(AuthError::InvalidToken(format!(
				"unsupported algorithm {:?}",
				header.alg
			)));
		}
		let kid = header
			.kid
			.ok_or_else(|| AuthError::InvalidToken("token header has no kid".to_string()))?;

		let key = self.key_for(&kid).await?;
		let data = decode::<CognitoClaims>(token, &key, &self.validation())
			.map_err(|e| AuthError::InvalidToken(e.to_string()))?;

		self.check_client(&data.claims)?;
		Ok(CallerIdentity::from(data.claims))
	}
}
