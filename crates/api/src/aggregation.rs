use hp_client::{Client, ErrorShape, Mutation, PublicError, Query};
use tracing::debug;
use uuid::Uuid;

use crate::{
	events::{AggregateAction, GetAggregateStatus},
	types::{AggregationAction, AggregatorStatus},
};

/// Handle on one event's aggregation loop, which lives on the remote service.
///
/// Nothing is enforced locally: starting a running loop or stopping a missing one is sent
/// as-is and any rejection comes back as the operation's error. The loop status is only
/// known through [`AggregationLoop::status`], and it may lag behind a just-acknowledged
/// start or stop.
#[derive(Clone)]
pub struct AggregationLoop {
	client: Client,
	event_id: Uuid,
}

impl AggregationLoop {
	pub const fn new(client: Client, event_id: Uuid) -> Self {
		Self { client, event_id }
	}

	pub const fn event_id(&self) -> Uuid {
		self.event_id
	}

	/// `POST /api/events/:event_id/aggregate?aggregate_action=Start`. Send with `()`.
	pub fn start(&self) -> Mutation<AggregateAction> {
		self.action(AggregationAction::Start)
	}

	/// `POST /api/events/:event_id/aggregate?aggregate_action=Stop`. Send with `()`.
	pub fn stop(&self) -> Mutation<AggregateAction> {
		self.action(AggregationAction::Stop)
	}

	pub fn action(&self, aggregate_action: AggregationAction) -> Mutation<AggregateAction> {
		debug!(event_id = %self.event_id, %aggregate_action, "Prepared aggregation loop action");

		self.client.mutation(AggregateAction {
			event_id: self.event_id,
			aggregate_action,
		})
	}

	/// `GET /api/events/:event_id/aggregate`, cached per event id.
	pub fn status(&self) -> Query<GetAggregateStatus> {
		self.client.query(GetAggregateStatus {
			event_id: self.event_id,
		})
	}

	/// Re-reads the status from the remote service with a new request, bypassing whatever
	/// is cached or already in flight.
	pub async fn poll(&self) -> Result<AggregatorStatus, PublicError> {
		let state = self.status().refetch().await;

		debug!(event_id = %self.event_id, status = ?state.status, "Polled aggregation loop");

		match (state.error, state.data) {
			(Some(error), _) => Err(error),
			(None, Some(status)) => Ok(status),
			(None, None) => Err(PublicError::synthesize(
				None,
				format!("aggregation status of event {} unavailable", self.event_id),
			)),
		}
	}
}

#[cfg(test)]
mod tests {
	use std::{
		sync::{
			atomic::{AtomicUsize, Ordering},
			Arc, Mutex,
		},
		time::Duration,
	};

	use hp_client::{
		mock::MockTransport, CacheKey, Method, QueryCache, QueryValue, StatusCode, TransportConfig,
		TransportResponse,
	};
	use serde_json::json;
	use tracing_test::traced_test;

	use crate::types::LoopStatus;

	use super::*;

	const EVENT: Uuid = Uuid::from_u128(0x0e0e);

	fn aggregate_path() -> String {
		format!("/api/events/{EVENT}/aggregate")
	}

	fn status_body(status: LoopStatus) -> Vec<u8> {
		serde_json::to_vec(&AggregatorStatus {
			event_id: EVENT,
			status,
		})
		.unwrap()
	}

	/// Remote loop that acknowledges actions at once but only reports the new state after
	/// `lag` further status reads.
	fn lagging_remote(transport: &MockTransport, lag: usize) {
		let actual = Arc::new(Mutex::new(LoopStatus::NonExisting));
		let reported = Arc::new(Mutex::new(LoopStatus::NonExisting));
		let reads_until_visible = Arc::new(AtomicUsize::new(0));

		transport.route(Method::POST, aggregate_path(), {
			let actual = Arc::clone(&actual);
			let reads_until_visible = Arc::clone(&reads_until_visible);
			move |request| {
				let action = match request.query.as_ref().and_then(|q| q.get("aggregate_action")) {
					Some(QueryValue::One(action)) => action.clone(),
					_ => {
						return Ok(TransportResponse::new(
							StatusCode::BAD_REQUEST,
							serde_json::to_vec(&json!({ "message": "missing action", "status": 400 }))
								.unwrap(),
						))
					}
				};

				let mut actual = actual.lock().unwrap();
				*actual = if action == "Start" {
					LoopStatus::Running
				} else {
					LoopStatus::Exited
				};
				reads_until_visible.store(lag, Ordering::SeqCst);

				Ok(TransportResponse::new(
					StatusCode::OK,
					status_body(*actual),
				))
			}
		});

		transport.route(Method::GET, aggregate_path(), move |_| {
			let mut reported = reported.lock().unwrap();
			if reads_until_visible
				.try_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
				.is_err()
			{
				*reported = *actual.lock().unwrap();
			}

			Ok(TransportResponse::new(
				StatusCode::OK,
				status_body(*reported),
			))
		});
	}

	async fn poll_until(aggregation: &AggregationLoop, wanted: LoopStatus) -> usize {
		for attempt in 1..=10 {
			if aggregation.poll().await.unwrap().status == wanted {
				return attempt;
			}
			tokio::time::sleep(Duration::from_secs(1)).await;
		}
		panic!("loop never reached {wanted}");
	}

	fn aggregation(transport: &MockTransport) -> AggregationLoop {
		AggregationLoop::new(
			Client::new(
				transport.clone(),
				TransportConfig::new("http://portal.test"),
				QueryCache::new(),
			),
			EVENT,
		)
	}

	#[tokio::test(start_paused = true)]
	#[traced_test]
	async fn start_then_stop_eventually_shows_in_status() {
		let transport = MockTransport::new();
		lagging_remote(&transport, 2);
		let aggregation = aggregation(&transport);

		assert_eq!(
			aggregation.status().suspend().await.unwrap().status,
			LoopStatus::NonExisting
		);

		let ack = aggregation.start().send(()).await.unwrap();
		assert_eq!(ack.status, LoopStatus::Running);
		assert_eq!(poll_until(&aggregation, LoopStatus::Running).await, 3);

		aggregation.stop().send(()).await.unwrap();
		assert_eq!(poll_until(&aggregation, LoopStatus::Exited).await, 3);

		assert!(logs_contain("Prepared aggregation loop action"));
		assert!(logs_contain("Sending mutation"));
	}

	#[tokio::test(start_paused = true)]
	#[traced_test]
	async fn poll_after_start_ignores_reads_issued_before_it() {
		let transport = MockTransport::new();
		lagging_remote(&transport, 0);
		transport.delay(Method::GET, aggregate_path(), Duration::from_millis(500));
		let aggregation = aggregation(&transport);

		// A slow status read is still in flight when the loop gets started.
		assert!(aggregation.status().state().is_fetching);
		while transport.calls_to(&Method::GET, &aggregate_path()) == 0 {
			tokio::task::yield_now().await;
		}

		aggregation.start().send(()).await.unwrap();

		assert_eq!(aggregation.poll().await.unwrap().status, LoopStatus::Running);
		assert_eq!(transport.calls_to(&Method::GET, &aggregate_path()), 2);
	}

	#[tokio::test]
	async fn actions_travel_as_query_parameters() {
		let transport = MockTransport::new();
		lagging_remote(&transport, 0);

		aggregation(&transport).stop().send(()).await.unwrap();

		let request = transport.last_call().unwrap().request;
		assert_eq!(request.method, Method::POST);
		assert_eq!(request.url, aggregate_path());
		assert_eq!(request.body, None);
		assert_eq!(
			request.query.unwrap().to_pairs(),
			vec![("aggregate_action".to_string(), "Stop".to_string())]
		);
	}

	#[tokio::test]
	async fn rejections_surface_as_errors() {
		let transport = MockTransport::new();
		transport.respond_json(
			Method::POST,
			aggregate_path(),
			409,
			json!({ "message": "loop already running", "status": 409 }),
		);

		let error = aggregation(&transport)
			.start()
			.send(())
			.await
			.unwrap_err();

		assert_eq!(error, PublicError::new(409, "loop already running"));
	}

	#[tokio::test]
	async fn status_is_cached_per_event() {
		let transport = MockTransport::new();
		lagging_remote(&transport, 0);
		let aggregation = aggregation(&transport);

		let status = aggregation.status();
		assert_eq!(
			serde_json::to_value(status.key()).unwrap(),
			json!([{ "url": "/api/events/:event_id/aggregate", "params": { "event_id": EVENT } }])
		);

		status.suspend().await.unwrap();
		aggregation.status().suspend().await.unwrap();
		assert_eq!(transport.calls_to(&Method::GET, &aggregate_path()), 1);

		let other = AggregationLoop::new(
			Client::new(
				transport.clone(),
				TransportConfig::new("http://portal.test"),
				aggregation.client.cache().clone(),
			),
			Uuid::from_u128(0x0f0f),
		);
		assert_ne!(other.status().key(), aggregation.status().key());
		assert!(aggregation
			.client
			.cache()
			.contains(&CacheKey::derive(&GetAggregateStatus { event_id: EVENT })));
	}
}
