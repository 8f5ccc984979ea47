use std::{collections::BTreeMap, env, time::Duration};

use thiserror::Error;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const API_URL_VAR: &str = "HP_API_URL";
const API_TIMEOUT_VAR: &str = "HP_API_TIMEOUT_SECS";
const API_HEADERS_VAR: &str = "HP_API_HEADERS";

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("env var '{0}' missing")]
	MissingVar(&'static str),
	#[error("env var '{var}' is invalid: {reason}")]
	InvalidVar { var: &'static str, reason: String },
}

/// Module-level transport defaults shared by every operation of a [`Client`](crate::Client).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
	pub base_url: String,
	pub timeout: Duration,
	pub headers: BTreeMap<String, String>,
}

/// Per-invocation transport settings. Every field that is set wins over the default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportOverrides {
	pub base_url: Option<String>,
	pub timeout: Option<Duration>,
	pub headers: BTreeMap<String, String>,
}

impl TransportConfig {
	pub fn new(base_url: impl Into<String>) -> Self {
		Self {
			base_url: base_url.into(),
			timeout: DEFAULT_TIMEOUT,
			headers: BTreeMap::new(),
		}
	}

	#[must_use]
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	#[must_use]
	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.insert(name.into(), value.into());
		self
	}

	/// Reads `HP_API_URL` (required), `HP_API_TIMEOUT_SECS` and `HP_API_HEADERS`
	/// (a JSON object of default headers).
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|var| env::var(var).ok())
	}

	pub(crate) fn from_lookup(
		lookup: impl Fn(&'static str) -> Option<String>,
	) -> Result<Self, ConfigError> {
		let base_url = lookup(API_URL_VAR).ok_or(ConfigError::MissingVar(API_URL_VAR))?;

		let timeout = lookup(API_TIMEOUT_VAR)
			.map(|secs| {
				secs.trim()
					.parse::<u64>()
					.map(Duration::from_secs)
					.map_err(|e| ConfigError::InvalidVar {
						var: API_TIMEOUT_VAR,
						reason: e.to_string(),
					})
			})
			.transpose()?
			.unwrap_or(DEFAULT_TIMEOUT);

		let headers = lookup(API_HEADERS_VAR)
			.map(|json| {
				serde_json::from_str::<BTreeMap<String, String>>(&json).map_err(|e| {
					ConfigError::InvalidVar {
						var: API_HEADERS_VAR,
						reason: e.to_string(),
					}
				})
			})
			.transpose()?
			.unwrap_or_default();

		Ok(Self {
			base_url,
			timeout,
			headers,
		})
	}

	/// Applies `overrides` on top of these defaults.
	#[must_use]
	pub fn merge(&self, overrides: &TransportOverrides) -> Self {
		let mut headers = self.headers.clone();
		headers.extend(overrides.headers.clone());

		Self {
			base_url: overrides
				.base_url
				.clone()
				.unwrap_or_else(|| self.base_url.clone()),
			timeout: overrides.timeout.unwrap_or(self.timeout),
			headers,
		}
	}
}

impl TransportOverrides {
	#[must_use]
	pub fn timeout(timeout: Duration) -> Self {
		Self {
			timeout: Some(timeout),
			..Self::default()
		}
	}

	#[must_use]
	pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = Some(base_url.into());
		self
	}

	#[must_use]
	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.insert(name.into(), value.into());
		self
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use super::*;

	#[test]
	fn overrides_win_over_defaults() {
		let defaults = TransportConfig::new("http://localhost:8080")
			.with_timeout(Duration::from_secs(30))
			.with_header("x-portal", "default")
			.with_header("accept-language", "en");

		let merged = defaults.merge(
			&TransportOverrides::timeout(Duration::from_secs(5)).with_header("x-portal", "override"),
		);

		assert_eq!(merged.timeout, Duration::from_secs(5));
		assert_eq!(merged.base_url, "http://localhost:8080");
		assert_eq!(merged.headers["x-portal"], "override");
		assert_eq!(merged.headers["accept-language"], "en");
	}

	#[test]
	fn empty_overrides_keep_defaults() {
		let defaults = TransportConfig::new("http://localhost:8080");
		assert_eq!(defaults.merge(&TransportOverrides::default()), defaults);
	}

	#[test]
	fn reads_config_from_env_lookup() {
		let vars = HashMap::from([
			(API_URL_VAR, "https://portal.example".to_string()),
			(API_TIMEOUT_VAR, "12".to_string()),
			(API_HEADERS_VAR, r#"{"x-impersonate":"admin"}"#.to_string()),
		]);

		let config = TransportConfig::from_lookup(|var| vars.get(var).cloned()).unwrap();

		assert_eq!(config.base_url, "https://portal.example");
		assert_eq!(config.timeout, Duration::from_secs(12));
		assert_eq!(config.headers["x-impersonate"], "admin");
	}

	#[test]
	fn env_defaults_and_failures() {
		let config = TransportConfig::from_lookup(|var| {
			(var == API_URL_VAR).then(|| "http://localhost:8080".to_string())
		})
		.unwrap();
		assert_eq!(config.timeout, DEFAULT_TIMEOUT);
		assert!(config.headers.is_empty());

		assert!(matches!(
			TransportConfig::from_lookup(|_| None),
			Err(ConfigError::MissingVar(API_URL_VAR))
		));

		assert!(matches!(
			TransportConfig::from_lookup(|var| match var {
				API_URL_VAR => Some("http://localhost:8080".to_string()),
				API_TIMEOUT_VAR => Some("soon".to_string()),
				_ => None,
			}),
			Err(ConfigError::InvalidVar {
				var: API_TIMEOUT_VAR,
				..
			})
		));
	}
}
