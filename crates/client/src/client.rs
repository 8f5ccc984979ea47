use std::{fmt, sync::Arc};

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::{
	cache::QueryCache,
	config::{TransportConfig, TransportOverrides},
	endpoint::{resolve_url, Endpoint, MutationEndpoint, QueryEndpoint},
	error::{ErrorShape, ErrorSource},
	mutation::Mutation,
	query::Query,
	transport::{Transport, TransportRequest, TransportResponse},
};

type ErrorObserver = Arc<dyn Fn(&ErrorSource, &Value) + Send + Sync>;

/// Entry point for every remote operation.
///
/// Binds one [`Transport`], the module-level [`TransportConfig`] and the [`QueryCache`]
/// queries read and write. Cloning shares all of them.
#[derive(Clone)]
pub struct Client {
	inner: Arc<Inner>,
}

struct Inner {
	transport: Arc<dyn Transport>,
	config: TransportConfig,
	cache: QueryCache,
	error_observer: Option<ErrorObserver>,
}

impl fmt::Debug for Client {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Client")
			.field("config", &self.inner.config)
			.field("cache_entries", &self.inner.cache.len())
			.field("error_observer", &self.inner.error_observer.is_some())
			.finish_non_exhaustive()
	}
}

impl Client {
	pub fn new(transport: impl Transport, config: TransportConfig, cache: QueryCache) -> Self {
		Self::with_shared_transport(Arc::new(transport), config, cache)
	}

	pub fn with_shared_transport(
		transport: Arc<dyn Transport>,
		config: TransportConfig,
		cache: QueryCache,
	) -> Self {
		Self {
			inner: Arc::new(Inner {
				transport,
				config,
				cache,
				error_observer: None,
			}),
		}
	}

	/// Installs an application-wide sink that sees every failed query fetch and every
	/// failed mutation, in addition to the caller that issued it. The error is passed in
	/// its serialized form.
	#[must_use]
	pub fn with_error_observer(
		self,
		observer: impl Fn(&ErrorSource, &Value) + Send + Sync + 'static,
	) -> Self {
		Self {
			inner: Arc::new(Inner {
				transport: Arc::clone(&self.inner.transport),
				config: self.inner.config.clone(),
				cache: self.inner.cache.clone(),
				error_observer: Some(Arc::new(observer)),
			}),
		}
	}

	pub(crate) fn report_error(&self, source: &ErrorSource, error: &Value) {
		if let Some(observer) = &self.inner.error_observer {
			observer(source, error);
		}
	}

	pub fn query<E: QueryEndpoint>(&self, endpoint: E) -> Query<E> {
		Query::new(self.clone(), endpoint)
	}

	pub fn mutation<E: MutationEndpoint>(&self, endpoint: E) -> Mutation<E> {
		Mutation::new(self.clone(), endpoint)
	}

	pub fn cache(&self) -> &QueryCache {
		&self.inner.cache
	}

	pub fn config(&self) -> &TransportConfig {
		&self.inner.config
	}

	/// Runs one exchange and decodes it as `E::Response`.
	pub(crate) async fn execute<E: Endpoint>(
		&self,
		endpoint: &E,
		body: Option<&E::Body>,
		overrides: &TransportOverrides,
	) -> Result<E::Response, E::Error> {
		let (status, value) = self.exchange(endpoint, body, overrides).await?;

		serde_json::from_value(value).map_err(|e| {
			E::Error::synthesize(Some(status), format!("failed to decode response: {e}"))
		})
	}

	/// Like [`Client::execute`] but hands back the JSON document, after checking that it
	/// decodes as `E::Response`. This is what the cache stores.
	pub(crate) async fn execute_raw<E: Endpoint>(
		&self,
		endpoint: &E,
		overrides: &TransportOverrides,
	) -> Result<Value, E::Error> {
		let (status, value) = self.exchange(endpoint, None, overrides).await?;

		E::Response::deserialize(&value).map_err(|e| {
			E::Error::synthesize(Some(status), format!("failed to decode response: {e}"))
		})?;

		Ok(value)
	}

	async fn exchange<E: Endpoint>(
		&self,
		endpoint: &E,
		body: Option<&E::Body>,
		overrides: &TransportOverrides,
	) -> Result<(StatusCode, Value), E::Error> {
		let url = resolve_url(E::URL, &endpoint.path_params())
			.map_err(|e| E::Error::synthesize(None, e.to_string()))?;

		let body = body
			.map(serde_json::to_value)
			.transpose()
			.map_err(|e| E::Error::synthesize(None, format!("failed to encode body: {e}")))?
			.filter(|body| !body.is_null());

		let config = self.inner.config.merge(overrides);

		debug!(
			method = %E::METHOD,
			url = %url,
			timeout = ?config.timeout,
			"Executing request"
		);

		let response = self
			.inner
			.transport
			.send(
				TransportRequest {
					method: E::METHOD,
					url: url.clone(),
					query: endpoint.query_params(),
					body,
				},
				&config,
			)
			.await
			.map_err(|e| {
				warn!(method = %E::METHOD, url = %url, error = %e, "Request failed");
				E::Error::synthesize(None, e.to_string())
			})?;

		decode_body::<E>(&url, response)
	}
}

fn decode_body<E: Endpoint>(
	url: &str,
	TransportResponse { status, body }: TransportResponse,
) -> Result<(StatusCode, Value), E::Error> {
	if !status.is_success() {
		warn!(
			method = %E::METHOD,
			%url,
			status = status.as_u16(),
			"Remote returned an error response"
		);

		return Err(serde_json::from_slice::<E::Error>(&body).unwrap_or_else(|_| {
			let text = String::from_utf8_lossy(&body).trim().to_string();
			let message = if text.is_empty() {
				status
					.canonical_reason()
					.unwrap_or("unknown error")
					.to_string()
			} else {
				text
			};

			E::Error::synthesize(Some(status), message)
		}));
	}

	if body.iter().all(u8::is_ascii_whitespace) {
		return Ok((status, Value::Null));
	}

	serde_json::from_slice(&body)
		.map(|value| (status, value))
		.map_err(|e| E::Error::synthesize(Some(status), format!("failed to decode response: {e}")))
}

#[cfg(test)]
mod tests {
	use reqwest::Method;
	use serde_json::json;
	use tracing_test::traced_test;

	use crate::{mock::MockTransport, PathParams, PublicError};

	use super::*;

	#[derive(Debug, Clone)]
	struct DeleteTeam {
		team_id: &'static str,
	}

	impl Endpoint for DeleteTeam {
		const METHOD: Method = Method::DELETE;
		const URL: &'static str = "/api/teams/:team_id";

		type Body = ();
		type Response = ();
		type Error = PublicError;

		fn path_params(&self) -> PathParams {
			PathParams::new().with("team_id", self.team_id)
		}
	}

	#[derive(Debug, Clone)]
	struct BrokenTemplate;

	impl Endpoint for BrokenTemplate {
		const METHOD: Method = Method::GET;
		const URL: &'static str = "/api/teams/:team_id";

		type Body = ();
		type Response = Value;
		type Error = PublicError;
	}

	fn client(transport: &MockTransport) -> Client {
		Client::new(
			transport.clone(),
			TransportConfig::new("http://portal.test"),
			QueryCache::new(),
		)
	}

	#[tokio::test]
	#[traced_test]
	async fn empty_success_body_decodes_as_unit() {
		let transport = MockTransport::new();
		transport.respond(Method::DELETE, "/api/teams/t1", 204, "");

		let result = client(&transport)
			.execute(&DeleteTeam { team_id: "t1" }, None, &TransportOverrides::default())
			.await;

		assert_eq!(result, Ok(()));
		assert!(logs_contain("Executing request"));
	}

	#[tokio::test]
	#[traced_test]
	async fn error_bodies_of_the_declared_shape_pass_through() {
		let transport = MockTransport::new();
		transport.respond_json(
			Method::DELETE,
			"/api/teams/t1",
			403,
			json!({ "message": "not an admin", "status": 403 }),
		);

		let error = client(&transport)
			.execute(&DeleteTeam { team_id: "t1" }, None, &TransportOverrides::default())
			.await
			.unwrap_err();

		assert_eq!(error, PublicError::new(403, "not an admin"));
		assert!(logs_contain("Remote returned an error response"));
	}

	#[tokio::test]
	async fn unparseable_error_bodies_keep_the_http_status() {
		let transport = MockTransport::new();
		transport.respond(Method::DELETE, "/api/teams/t1", 502, "<html>bad gateway</html>");
		transport.respond(Method::DELETE, "/api/teams/t2", 503, "");

		let client = client(&transport);
		let overrides = TransportOverrides::default();

		let error = client
			.execute(&DeleteTeam { team_id: "t1" }, None, &overrides)
			.await
			.unwrap_err();
		assert_eq!(error, PublicError::new(502, "<html>bad gateway</html>"));

		let error = client
			.execute(&DeleteTeam { team_id: "t2" }, None, &overrides)
			.await
			.unwrap_err();
		assert_eq!(error, PublicError::new(503, "Service Unavailable"));
	}

	#[tokio::test]
	async fn unresolvable_templates_never_reach_the_transport() {
		let transport = MockTransport::new();

		let error = client(&transport)
			.execute(&BrokenTemplate, None, &TransportOverrides::default())
			.await
			.unwrap_err();

		assert!(error.is_local());
		assert!(error.message.contains("team_id"));
		assert_eq!(transport.call_count(), 0);
	}

	#[tokio::test]
	async fn unreachable_routes_are_local_errors() {
		let transport = MockTransport::new();
		transport.fail(Method::DELETE, "/api/teams/t1", "connection refused");

		let error = client(&transport)
			.execute(&DeleteTeam { team_id: "t1" }, None, &TransportOverrides::default())
			.await
			.unwrap_err();

		assert!(error.is_local());
		assert!(error.message.contains("connection refused"));
	}
}
