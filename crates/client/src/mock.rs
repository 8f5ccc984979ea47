//! Scripted in-process [`Transport`] for tests and demos.
//!
//! Routes are keyed by method and resolved path (query string excluded). Every exchange is
//! recorded together with the effective [`TransportConfig`], so tests can assert on merged
//! overrides as well as on the request itself.
//!
//! Handlers answer as soon as the request arrives; latency only delays the delivery of that
//! answer. A slow read therefore reports the remote state at the time it was issued.

use std::{
	collections::HashMap,
	fmt,
	sync::{Arc, Mutex, MutexGuard, PoisonError},
	time::Duration,
};

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::Serialize;

use super::{
	config::TransportConfig,
	transport::{Transport, TransportError, TransportRequest, TransportResponse},
};

type Handler =
	dyn Fn(&TransportRequest) -> Result<TransportResponse, TransportError> + Send + Sync;

/// One recorded exchange.
#[derive(Debug, Clone)]
pub struct RecordedCall {
	pub request: TransportRequest,
	pub config: TransportConfig,
}

#[derive(Clone, Default)]
pub struct MockTransport {
	inner: Arc<Mutex<State>>,
}

#[derive(Default)]
struct State {
	routes: HashMap<(Method, String), Arc<Handler>>,
	calls: Vec<RecordedCall>,
	latency: Option<Duration>,
	delays: HashMap<(Method, String), Duration>,
}

impl fmt::Debug for MockTransport {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let state = self.lock();
		f.debug_struct("MockTransport")
			.field("routes", &state.routes.keys().collect::<Vec<_>>())
			.field("calls", &state.calls.len())
			.field("latency", &state.latency)
			.field("delays", &state.delays)
			.finish()
	}
}

impl MockTransport {
	pub fn new() -> Self {
		Self::default()
	}

	fn lock(&self) -> MutexGuard<'_, State> {
		self.inner.lock().unwrap_or_else(PoisonError::into_inner)
	}

	/// Delays every response by `latency`. Pair with a paused tokio clock in tests.
	#[must_use]
	pub fn with_latency(self, latency: Duration) -> Self {
		self.lock().latency = Some(latency);
		self
	}

	/// Delays responses of `method path` by `delay`, overriding [`MockTransport::with_latency`].
	pub fn delay(&self, method: Method, path: impl Into<String>, delay: Duration) {
		self.lock().delays.insert((method, path.into()), delay);
	}

	/// Routes `method path` to a custom handler, replacing any previous route.
	pub fn route<F>(&self, method: Method, path: impl Into<String>, handler: F)
	where
		F: Fn(&TransportRequest) -> Result<TransportResponse, TransportError>
			+ Send
			+ Sync
			+ 'static,
	{
		self.lock()
			.routes
			.insert((method, path.into()), Arc::new(handler));
	}

	/// Answers with a fixed status and raw body.
	pub fn respond(
		&self,
		method: Method,
		path: impl Into<String>,
		status: u16,
		body: impl Into<Vec<u8>>,
	) {
		let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
		let body = body.into();
		self.route(method, path, move |_| {
			Ok(TransportResponse::new(status, body.clone()))
		});
	}

	/// Answers with a fixed status and `body` encoded as JSON.
	pub fn respond_json(
		&self,
		method: Method,
		path: impl Into<String>,
		status: u16,
		body: impl Serialize,
	) {
		let body = serde_json::to_vec(&body).unwrap_or_default();
		self.respond(method, path, status, body);
	}

	/// Fails every exchange on this route before any HTTP status is produced.
	pub fn fail(&self, method: Method, path: impl Into<String>, reason: impl Into<String>) {
		let reason = reason.into();
		self.route(method, path, move |request| {
			Err(TransportError::Request {
				method: request.method.clone(),
				url: request.url.clone(),
				reason: reason.clone(),
			})
		});
	}

	pub fn calls(&self) -> Vec<RecordedCall> {
		self.lock().calls.clone()
	}

	pub fn call_count(&self) -> usize {
		self.lock().calls.len()
	}

	pub fn calls_to(&self, method: &Method, path: &str) -> usize {
		self.lock()
			.calls
			.iter()
			.filter(|call| &call.request.method == method && call.request.url == path)
			.count()
	}

	pub fn last_call(&self) -> Option<RecordedCall> {
		self.lock().calls.last().cloned()
	}
}

#[async_trait]
impl Transport for MockTransport {
	async fn send(
		&self,
		request: TransportRequest,
		config: &TransportConfig,
	) -> Result<TransportResponse, TransportError> {
		let route = (request.method.clone(), request.url.clone());

		let (handler, delay) = {
			let mut state = self.lock();
			state.calls.push(RecordedCall {
				request: request.clone(),
				config: config.clone(),
			});
			(
				state.routes.get(&route).cloned(),
				state.delays.get(&route).copied().or(state.latency),
			)
		};

		let response = match handler {
			Some(handler) => handler(&request),
			None => Ok(TransportResponse::new(
				StatusCode::NOT_FOUND,
				serde_json::to_vec(&serde_json::json!({
					"message": format!("no route for {} {}", request.method, request.url),
					"status": 404,
				}))
				.unwrap_or_default(),
			)),
		};

		if let Some(delay) = delay {
			tokio::time::sleep(delay).await;
		}

		response
	}
}
