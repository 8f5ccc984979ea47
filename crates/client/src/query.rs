use std::{any::type_name, fmt};

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, trace};

use super::{
	cache::{CacheEntry, FetchTicket},
	client::Client,
	config::TransportOverrides,
	endpoint::{Endpoint, QueryEndpoint},
	error::{ErrorShape, ErrorSource},
	key::CacheKey,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
	Pending,
	Success,
	Error,
}

/// Phase value handed back by the tolerant mode.
///
/// `data` is the last known successful payload and survives later failures, so a
/// [`QueryStatus::Error`] state may still carry data.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<T, E> {
	pub status: QueryStatus,
	pub data: Option<T>,
	pub error: Option<E>,
	pub is_fetching: bool,
}

impl<T, E> QueryState<T, E> {
	pub const fn is_pending(&self) -> bool {
		matches!(self.status, QueryStatus::Pending)
	}

	pub const fn is_success(&self) -> bool {
		matches!(self.status, QueryStatus::Success)
	}

	pub const fn is_error(&self) -> bool {
		matches!(self.status, QueryStatus::Error)
	}
}

/// A read operation bound to its cache key.
///
/// Two ways to consume it:
///
/// - tolerant: [`Query::state`], [`Query::fetch`] and [`Query::refetch`] always return a
///   [`QueryState`], never an `Err`;
/// - suspending: [`Query::suspend`] awaits until data is available and propagates the
///   operation's declared error.
///
/// Both address the entry at [`Query::key`], so they observe and populate the same data.
/// Fetches run on spawned tasks, so a caller dropping its future never strands an
/// in-flight entry; a tokio runtime must be running.
pub struct Query<E: QueryEndpoint> {
	client: Client,
	endpoint: E,
	key: CacheKey,
	overrides: TransportOverrides,
}

impl<E: QueryEndpoint + fmt::Debug> fmt::Debug for Query<E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Query")
			.field("endpoint", &self.endpoint)
			.field("key", &self.key)
			.field("overrides", &self.overrides)
			.finish_non_exhaustive()
	}
}

impl<E: QueryEndpoint> Query<E> {
	pub(crate) fn new(client: Client, endpoint: E) -> Self {
		Self {
			key: CacheKey::derive(&endpoint),
			client,
			endpoint,
			overrides: TransportOverrides::default(),
		}
	}

	/// Replaces the derived key. Queries sharing a key share one cache entry, so the
	/// caller is responsible for only sharing keys between compatible response types.
	#[must_use]
	pub fn with_key(mut self, key: CacheKey) -> Self {
		self.key = key;
		self
	}

	#[must_use]
	pub fn with_overrides(mut self, overrides: TransportOverrides) -> Self {
		self.overrides = overrides;
		self
	}

	pub const fn key(&self) -> &CacheKey {
		&self.key
	}

	pub const fn endpoint(&self) -> &E {
		&self.endpoint
	}

	/// Current phase, without waiting. Kicks off a background fetch when nothing is
	/// cached yet.
	pub fn state(&self) -> QueryState<E::Response, E::Error> {
		let cache = self.client.cache();

		match cache.get(&self.key) {
			Some(entry) if entry.is_resolved() || entry.is_fetching => decode_state::<E>(&entry),
			_ => {
				self.start_fetch();
				decode_state::<E>(&cache.get(&self.key).unwrap_or_default())
			}
		}
	}

	/// Waits until the entry has been resolved at least once and returns its phase.
	/// Cached results are returned without a new request.
	pub async fn fetch(&self) -> QueryState<E::Response, E::Error> {
		let entry = self.settle(1).await;
		decode_state::<E>(&entry)
	}

	/// Always issues a new request and returns the phase once that request completed.
	/// A request already in flight for this key is superseded and its result dropped, so
	/// the returned state never predates this call.
	pub async fn refetch(&self) -> QueryState<E::Response, E::Error> {
		let ticket = self.client.cache().begin_forced(&self.key);

		debug!(key = %self.key, url = E::URL, request = ticket.request, "Refetching query");
		self.spawn_fetch(ticket);

		let entry = self.settle(ticket.generation + 1).await;
		decode_state::<E>(&entry)
	}

	/// Suspends until data is available. The latest completed fetch's error, if any, is
	/// returned as `Err`.
	pub async fn suspend(&self) -> Result<E::Response, E::Error> {
		let entry = self.settle(1).await;

		if let Some(error) = &entry.error {
			return Err(decode_error::<E>(error));
		}

		entry.data.as_deref().map_or_else(
			|| {
				Err(E::Error::synthesize(
					None,
					format!("cache entry {} resolved without data", self.key),
				))
			},
			decode_data::<E>,
		)
	}

	/// Starts a fetch on a spawned task unless one is already in flight for this key.
	fn start_fetch(&self) {
		let Some(ticket) = self.client.cache().try_begin(&self.key) else {
			trace!(key = %self.key, "Joining in-flight fetch");
			return;
		};

		debug!(key = %self.key, url = E::URL, request = ticket.request, "Fetching query");
		self.spawn_fetch(ticket);
	}

	fn spawn_fetch(&self, ticket: FetchTicket) {
		tokio::spawn({
			let client = self.client.clone();
			let endpoint = self.endpoint.clone();
			let key = self.key.clone();
			let overrides = self.overrides.clone();
			async move {
				let outcome = client
					.execute_raw(&endpoint, &overrides)
					.await
					.map_err(|e| {
						serde_json::to_value(&e).unwrap_or_else(|e| Value::String(e.to_string()))
					});

				let error = outcome.as_ref().err().cloned();

				if client.cache().complete(&key, ticket.request, outcome) {
					if let Some(error) = error {
						client.report_error(&ErrorSource::Query(key), &error);
					}
				}
			}
		});
	}

	/// Waits for an entry whose generation reached `min_generation`, starting fetches as
	/// needed.
	async fn settle(&self, mut min_generation: u64) -> CacheEntry {
		let cache = self.client.cache();
		let mut rx = cache.subscribe(&self.key);
		let mut last_generation = 0;

		loop {
			let entry = rx.borrow_and_update().clone();

			// The entry was removed from the store and started over.
			if entry.generation < last_generation {
				min_generation = 1;
			}
			last_generation = entry.generation;

			if entry.generation >= min_generation {
				return entry;
			}

			if !entry.is_fetching {
				self.start_fetch();
				rx = cache.subscribe(&self.key);
				continue;
			}

			if rx.changed().await.is_err() {
				rx = cache.subscribe(&self.key);
			}
		}
	}
}

fn decode_data<E: Endpoint>(data: &Value) -> Result<E::Response, E::Error> {
	E::Response::deserialize(data).map_err(|e| {
		E::Error::synthesize(
			None,
			format!("cached data does not decode as {}: {e}", type_name::<E::Response>()),
		)
	})
}

fn decode_error<E: Endpoint>(error: &Value) -> E::Error {
	E::Error::deserialize(error).unwrap_or_else(|_| E::Error::synthesize(None, error.to_string()))
}

fn decode_state<E: Endpoint>(entry: &CacheEntry) -> QueryState<E::Response, E::Error> {
	let (data, data_error) = match entry.data.as_deref().map(decode_data::<E>) {
		Some(Ok(data)) => (Some(data), None),
		Some(Err(e)) => (None, Some(e)),
		None => (None, None),
	};

	let error = entry
		.error
		.as_deref()
		.map(decode_error::<E>)
		.or(data_error);

	let status = if error.is_some() {
		QueryStatus::Error
	} else if data.is_some() {
		QueryStatus::Success
	} else {
		QueryStatus::Pending
	};

	QueryState {
		status,
		data,
		error,
		is_fetching: entry.is_fetching,
	}
}

#[cfg(test)]
mod tests {
	use std::time::Duration;

	use reqwest::Method;
	use serde_json::json;
	use tracing_test::traced_test;

	use crate::{mock::MockTransport, PathParams, PublicError, QueryCache, TransportConfig};

	use super::*;

	#[derive(Debug, Clone)]
	struct GetTeamRoles {
		team_id: &'static str,
	}

	impl Endpoint for GetTeamRoles {
		const METHOD: Method = Method::GET;
		const URL: &'static str = "/api/teams/:team_id/roles";

		type Body = ();
		type Response = Vec<String>;
		type Error = PublicError;

		fn path_params(&self) -> PathParams {
			PathParams::new().with("team_id", self.team_id)
		}
	}

	impl QueryEndpoint for GetTeamRoles {}

	fn client(transport: &MockTransport) -> Client {
		Client::new(
			transport.clone(),
			TransportConfig::new("http://portal.test"),
			QueryCache::new(),
		)
	}

	#[tokio::test(start_paused = true)]
	#[traced_test]
	async fn tolerant_state_starts_pending_then_succeeds() {
		let transport = MockTransport::new().with_latency(Duration::from_millis(50));
		transport.respond_json(Method::GET, "/api/teams/t1/roles", 200, ["Member"]);

		let query = client(&transport).query(GetTeamRoles { team_id: "t1" });

		let state = query.state();
		assert!(state.is_pending());
		assert!(state.is_fetching);
		assert_eq!(state.data, None);

		let state = query.fetch().await;
		assert!(state.is_success());
		assert!(!state.is_fetching);
		assert_eq!(state.data, Some(vec!["Member".to_string()]));
		assert_eq!(transport.call_count(), 1);
		assert!(logs_contain("Fetching query"));
	}

	#[tokio::test]
	async fn tolerant_mode_reports_errors_as_state() {
		let transport = MockTransport::new();
		transport.respond_json(
			Method::GET,
			"/api/teams/t1/roles",
			500,
			json!({ "message": "x", "status": 500 }),
		);

		let state = client(&transport)
			.query(GetTeamRoles { team_id: "t1" })
			.fetch()
			.await;

		assert!(state.is_error());
		assert_eq!(state.error, Some(PublicError::new(500, "x")));
		assert_eq!(state.data, None);
	}

	#[tokio::test]
	async fn suspend_serves_cached_data_without_refetching() {
		let transport = MockTransport::new();
		transport.respond_json(Method::GET, "/api/teams/t1/roles", 200, ["Mentor"]);

		let query = client(&transport).query(GetTeamRoles { team_id: "t1" });

		assert_eq!(query.suspend().await.unwrap(), vec!["Mentor".to_string()]);
		assert_eq!(query.suspend().await.unwrap(), vec!["Mentor".to_string()]);
		assert_eq!(transport.call_count(), 1);

		let state = query.refetch().await;
		assert!(state.is_success());
		assert_eq!(transport.call_count(), 2);
	}

	#[tokio::test]
	async fn refetch_errors_keep_last_known_data() {
		let transport = MockTransport::new();
		transport.respond_json(Method::GET, "/api/teams/t1/roles", 200, ["Mentor"]);

		let query = client(&transport).query(GetTeamRoles { team_id: "t1" });
		query.fetch().await;

		transport.respond_json(
			Method::GET,
			"/api/teams/t1/roles",
			503,
			json!({ "message": "maintenance", "status": 503 }),
		);

		let state = query.refetch().await;
		assert!(state.is_error());
		assert_eq!(state.data, Some(vec!["Mentor".to_string()]));
		assert_eq!(query.suspend().await, Err(PublicError::new(503, "maintenance")));
	}

	#[tokio::test(start_paused = true)]
	async fn concurrent_readers_collapse_onto_one_request() {
		let transport = MockTransport::new().with_latency(Duration::from_millis(100));
		transport.respond_json(Method::GET, "/api/teams/t1/roles", 200, ["Member"]);

		let client = client(&transport);
		let a = client.query(GetTeamRoles { team_id: "t1" });
		let b = client.query(GetTeamRoles { team_id: "t1" });

		let (a, b) = tokio::join!(a.suspend(), b.fetch());

		assert_eq!(a.unwrap(), vec!["Member".to_string()]);
		assert_eq!(b.data, Some(vec!["Member".to_string()]));
		assert_eq!(transport.call_count(), 1);
	}

	#[tokio::test]
	async fn undecodable_shared_entries_surface_as_local_errors() {
		let transport = MockTransport::new();
		let client = client(&transport);
		let key = CacheKey::custom("shared");
		client.cache().set(&key, json!({ "not": "a list" }));

		let query = client.query(GetTeamRoles { team_id: "t1" }).with_key(key);

		let error = query.suspend().await.unwrap_err();
		assert!(error.is_local());
		assert!(query.state().is_error());
		assert_eq!(transport.call_count(), 0);
	}

	#[tokio::test]
	async fn removed_entries_are_fetched_again() {
		let transport = MockTransport::new();
		transport.respond_json(Method::GET, "/api/teams/t1/roles", 200, ["Member"]);

		let query = client(&transport).query(GetTeamRoles { team_id: "t1" });
		query.suspend().await.unwrap();

		query.client.cache().remove(query.key());
		query.suspend().await.unwrap();

		assert_eq!(transport.call_count(), 2);
	}
}
