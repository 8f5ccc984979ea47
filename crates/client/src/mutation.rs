use std::fmt;

use serde_json::Value;
use tracing::debug;

use super::{
	client::Client,
	config::TransportOverrides,
	endpoint::{Endpoint, MutationEndpoint},
	error::ErrorSource,
};

type SuccessCallback<E> = Box<dyn FnOnce(&<E as Endpoint>::Response) + Send>;
type ErrorCallback<E> = Box<dyn FnOnce(&<E as Endpoint>::Error) + Send>;

/// A write operation. Configured once, consumed by [`Mutation::send`].
///
/// Mutations never read, write or invalidate the query cache. Callers that need fresh
/// query data re-invoke the relevant query, typically from `on_success`.
pub struct Mutation<E: MutationEndpoint> {
	client: Client,
	endpoint: E,
	overrides: TransportOverrides,
	on_success: Option<SuccessCallback<E>>,
	on_error: Option<ErrorCallback<E>>,
}

impl<E: MutationEndpoint + fmt::Debug> fmt::Debug for Mutation<E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Mutation")
			.field("endpoint", &self.endpoint)
			.field("overrides", &self.overrides)
			.field("on_success", &self.on_success.is_some())
			.field("on_error", &self.on_error.is_some())
			.finish_non_exhaustive()
	}
}

impl<E: MutationEndpoint> Mutation<E> {
	pub(crate) fn new(client: Client, endpoint: E) -> Self {
		Self {
			client,
			endpoint,
			overrides: TransportOverrides::default(),
			on_success: None,
			on_error: None,
		}
	}

	#[must_use]
	pub fn on_success(mut self, callback: impl FnOnce(&E::Response) + Send + 'static) -> Self {
		self.on_success = Some(Box::new(callback));
		self
	}

	#[must_use]
	pub fn on_error(mut self, callback: impl FnOnce(&E::Error) + Send + 'static) -> Self {
		self.on_error = Some(Box::new(callback));
		self
	}

	#[must_use]
	pub fn with_overrides(mut self, overrides: TransportOverrides) -> Self {
		self.overrides = overrides;
		self
	}

	pub const fn endpoint(&self) -> &E {
		&self.endpoint
	}

	/// Sends the request and fires the matching callback before returning the outcome.
	/// Pass `()` for operations without a body.
	pub async fn send(self, body: E::Body) -> Result<E::Response, E::Error> {
		let Self {
			client,
			endpoint,
			overrides,
			on_success,
			on_error,
		} = self;

		debug!(
			method = %E::METHOD,
			url = E::URL,
			path_params = ?endpoint.path_params(),
			query = ?endpoint.query_params(),
			"Sending mutation"
		);

		let result = client.execute(&endpoint, Some(&body), &overrides).await;

		match &result {
			Ok(response) => {
				if let Some(callback) = on_success {
					callback(response);
				}
			}
			Err(error) => {
				if let Some(callback) = on_error {
					callback(error);
				}

				client.report_error(
					&ErrorSource::Mutation {
						method: E::METHOD,
						url: E::URL,
					},
					&serde_json::to_value(error).unwrap_or_else(|e| Value::String(e.to_string())),
				);
			}
		}

		result
	}
}

#[cfg(test)]
mod tests {
	use std::sync::{Arc, Mutex};

	use reqwest::Method;
	use serde::{Deserialize, Serialize};
	use serde_json::json;
	use tracing_test::traced_test;

	use crate::{mock::MockTransport, PathParams, PublicError, QueryCache, TransportConfig};

	use super::*;

	#[derive(Debug, Clone, Serialize)]
	struct TeamForUpdate {
		name: String,
	}

	#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
	struct Team {
		id: String,
		name: String,
	}

	#[derive(Debug, Clone)]
	struct UpdateTeam {
		team_id: &'static str,
	}

	impl Endpoint for UpdateTeam {
		const METHOD: Method = Method::PATCH;
		const URL: &'static str = "/api/teams/:team_id";

		type Body = TeamForUpdate;
		type Response = Team;
		type Error = PublicError;

		fn path_params(&self) -> PathParams {
			PathParams::new().with("team_id", self.team_id)
		}
	}

	impl MutationEndpoint for UpdateTeam {}

	fn client(transport: &MockTransport) -> Client {
		Client::new(
			transport.clone(),
			TransportConfig::new("http://portal.test"),
			QueryCache::new(),
		)
	}

	#[tokio::test]
	#[traced_test]
	async fn success_fires_on_success_only() {
		let transport = MockTransport::new();
		transport.respond_json(
			Method::PATCH,
			"/api/teams/t1",
			200,
			json!({ "id": "t1", "name": "Crabs" }),
		);

		let seen = Arc::new(Mutex::new(Vec::new()));

		let team = client(&transport)
			.mutation(UpdateTeam { team_id: "t1" })
			.on_success({
				let seen = Arc::clone(&seen);
				move |team: &Team| seen.lock().unwrap().push(format!("ok {}", team.name))
			})
			.on_error({
				let seen = Arc::clone(&seen);
				move |error: &PublicError| seen.lock().unwrap().push(format!("err {error}"))
			})
			.send(TeamForUpdate {
				name: "Crabs".to_string(),
			})
			.await
			.unwrap();

		assert_eq!(team.name, "Crabs");
		assert_eq!(*seen.lock().unwrap(), vec!["ok Crabs".to_string()]);
		assert_eq!(
			transport.last_call().unwrap().request.body,
			Some(json!({ "name": "Crabs" }))
		);
		assert!(logs_contain("Sending mutation"));
	}

	#[tokio::test]
	async fn failure_fires_on_error_with_declared_shape() {
		let transport = MockTransport::new();
		transport.respond_json(
			Method::PATCH,
			"/api/teams/t1",
			500,
			json!({ "message": "x", "status": 500 }),
		);

		let seen = Arc::new(Mutex::new(None));

		let result = client(&transport)
			.mutation(UpdateTeam { team_id: "t1" })
			.on_error({
				let seen = Arc::clone(&seen);
				move |error: &PublicError| *seen.lock().unwrap() = Some(error.clone())
			})
			.send(TeamForUpdate {
				name: "Crabs".to_string(),
			})
			.await;

		assert_eq!(result, Err(PublicError::new(500, "x")));
		assert_eq!(*seen.lock().unwrap(), Some(PublicError::new(500, "x")));
	}

	#[tokio::test]
	async fn mutations_leave_the_cache_alone() {
		let transport = MockTransport::new();
		transport.respond_json(
			Method::PATCH,
			"/api/teams/t1",
			200,
			json!({ "id": "t1", "name": "Crabs" }),
		);

		let client = client(&transport);
		client
			.mutation(UpdateTeam { team_id: "t1" })
			.send(TeamForUpdate {
				name: "Crabs".to_string(),
			})
			.await
			.unwrap();

		assert!(client.cache().is_empty());
	}
}
