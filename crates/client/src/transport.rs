use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use thiserror::Error;
use tracing::trace;

use super::{config::TransportConfig, key::QueryParams};

/// One fully resolved HTTP exchange. The URL is relative to the config's base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
	pub method: Method,
	pub url: String,
	pub query: Option<QueryParams>,
	pub body: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
	pub status: StatusCode,
	pub body: Vec<u8>,
}

impl TransportResponse {
	pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
		Self {
			status,
			body: body.into(),
		}
	}
}

#[derive(Debug, Error)]
pub enum TransportError {
	#[error("request <method='{method}', url='{url}'> timed out")]
	Timeout { method: Method, url: String },
	#[error("request <method='{method}', url='{url}'> failed: {reason}")]
	Request {
		method: Method,
		url: String,
		reason: String,
	},
	#[error("failed to read response body of <method='{method}', url='{url}'>: {reason}")]
	Body {
		method: Method,
		url: String,
		reason: String,
	},
}

/// Performs exactly one HTTP exchange. Knows nothing about endpoints.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
	async fn send(
		&self,
		request: TransportRequest,
		config: &TransportConfig,
	) -> Result<TransportResponse, TransportError>;
}

#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
	client: reqwest::Client,
}

impl ReqwestTransport {
	pub fn new() -> Self {
		Self::default()
	}

	pub const fn with_client(client: reqwest::Client) -> Self {
		Self { client }
	}
}

#[async_trait]
impl Transport for ReqwestTransport {
	async fn send(
		&self,
		request: TransportRequest,
		config: &TransportConfig,
	) -> Result<TransportResponse, TransportError> {
		let TransportRequest {
			method,
			url,
			query,
			body,
		} = request;

		let full_url = format!("{}{url}", config.base_url.trim_end_matches('/'));

		let mut req = self
			.client
			.request(method.clone(), &full_url)
			.timeout(config.timeout);

		for (name, value) in &config.headers {
			req = req.header(name.as_str(), value.as_str());
		}

		if let Some(query) = &query {
			req = req.query(&query.to_pairs());
		}

		if let Some(body) = &body {
			req = req.json(body);
		}

		trace!(%method, url = %full_url, "Sending request");

		let response = req.send().await.map_err(|e| {
			if e.is_timeout() {
				TransportError::Timeout {
					method: method.clone(),
					url: full_url.clone(),
				}
			} else {
				TransportError::Request {
					method: method.clone(),
					url: full_url.clone(),
					reason: e.to_string(),
				}
			}
		})?;

		let status = response.status();

		let body = response
			.bytes()
			.await
			.map_err(|e| TransportError::Body {
				method,
				url: full_url,
				reason: e.to_string(),
			})?;

		Ok(TransportResponse::new(status, body.to_vec()))
	}
}
