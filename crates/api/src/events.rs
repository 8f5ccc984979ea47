use hp_client::{
	Endpoint, Method, MutationEndpoint, PathParams, PublicError, QueryEndpoint, QueryParams,
};
use uuid::Uuid;

use crate::types::{
	AffectedRowsDto, AggregationAction, AggregatorStatus, EventDto, EventForPatch, EventRole,
	EventRolesMap, InviteUsersDto, Team,
};

fn event_path(event_id: Uuid) -> PathParams {
	PathParams::new().with("event_id", event_id)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GetEvents;

impl Endpoint for GetEvents {
	const METHOD: Method = Method::GET;
	const URL: &'static str = "/api/events";

	type Body = ();
	type Response = Vec<EventDto>;
	type Error = PublicError;
}

impl QueryEndpoint for GetEvents {}

#[derive(Debug, Clone, Copy)]
pub struct GetEvent {
	pub event_id: Uuid,
}

impl Endpoint for GetEvent {
	const METHOD: Method = Method::GET;
	const URL: &'static str = "/api/events/:event_id";

	type Body = ();
	type Response = EventDto;
	type Error = PublicError;

	fn path_params(&self) -> PathParams {
		event_path(self.event_id)
	}
}

impl QueryEndpoint for GetEvent {}

#[derive(Debug, Clone, Copy)]
pub struct PatchEvent {
	pub event_id: Uuid,
}

impl Endpoint for PatchEvent {
	const METHOD: Method = Method::PATCH;
	const URL: &'static str = "/api/events/:event_id";

	type Body = EventForPatch;
	type Response = EventDto;
	type Error = PublicError;

	fn path_params(&self) -> PathParams {
		event_path(self.event_id)
	}
}

impl MutationEndpoint for PatchEvent {}

/// The caller's roles in every event, keyed by event id.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetEventsRoles;

impl Endpoint for GetEventsRoles {
	const METHOD: Method = Method::GET;
	const URL: &'static str = "/api/events/roles";

	type Body = ();
	type Response = EventRolesMap;
	type Error = PublicError;
}

impl QueryEndpoint for GetEventsRoles {}

#[derive(Debug, Clone, Copy)]
pub struct GetEventRoles {
	pub event_id: Uuid,
}

impl Endpoint for GetEventRoles {
	const METHOD: Method = Method::GET;
	const URL: &'static str = "/api/events/:event_id/roles";

	type Body = ();
	type Response = Vec<EventRole>;
	type Error = PublicError;

	fn path_params(&self) -> PathParams {
		event_path(self.event_id)
	}
}

impl QueryEndpoint for GetEventRoles {}

/// Grants roles, keyed by user id.
#[derive(Debug, Clone, Copy)]
pub struct PutEventRoles {
	pub event_id: Uuid,
}

impl Endpoint for PutEventRoles {
	const METHOD: Method = Method::PUT;
	const URL: &'static str = "/api/events/:event_id/roles";

	type Body = EventRolesMap;
	type Response = AffectedRowsDto;
	type Error = PublicError;

	fn path_params(&self) -> PathParams {
		event_path(self.event_id)
	}
}

impl MutationEndpoint for PutEventRoles {}

/// Revokes roles, keyed by user id.
#[derive(Debug, Clone, Copy)]
pub struct DeleteEventRoles {
	pub event_id: Uuid,
}

impl Endpoint for DeleteEventRoles {
	const METHOD: Method = Method::DELETE;
	const URL: &'static str = "/api/events/:event_id/roles";

	type Body = EventRolesMap;
	type Response = AffectedRowsDto;
	type Error = PublicError;

	fn path_params(&self) -> PathParams {
		event_path(self.event_id)
	}
}

impl MutationEndpoint for DeleteEventRoles {}

#[derive(Debug, Clone, Copy)]
pub struct InviteUsers {
	pub event_id: Uuid,
}

impl Endpoint for InviteUsers {
	const METHOD: Method = Method::POST;
	const URL: &'static str = "/api/events/:event_id/invite";

	type Body = InviteUsersDto;
	type Response = AffectedRowsDto;
	type Error = PublicError;

	fn path_params(&self) -> PathParams {
		event_path(self.event_id)
	}
}

impl MutationEndpoint for InviteUsers {}

/// Renumbers the teams of an event.
#[derive(Debug, Clone, Copy)]
pub struct UpdateTeamsIndex {
	pub event_id: Uuid,
}

impl Endpoint for UpdateTeamsIndex {
	const METHOD: Method = Method::POST;
	const URL: &'static str = "/api/events/:event_id/teams/index";

	type Body = ();
	type Response = Vec<Team>;
	type Error = PublicError;

	fn path_params(&self) -> PathParams {
		event_path(self.event_id)
	}
}

impl MutationEndpoint for UpdateTeamsIndex {}

#[derive(Debug, Clone, Copy)]
pub struct GetAggregateStatus {
	pub event_id: Uuid,
}

impl Endpoint for GetAggregateStatus {
	const METHOD: Method = Method::GET;
	const URL: &'static str = "/api/events/:event_id/aggregate";

	type Body = ();
	type Response = AggregatorStatus;
	type Error = PublicError;

	fn path_params(&self) -> PathParams {
		event_path(self.event_id)
	}
}

impl QueryEndpoint for GetAggregateStatus {}

#[derive(Debug, Clone, Copy)]
pub struct AggregateAction {
	pub event_id: Uuid,
	pub aggregate_action: AggregationAction,
}

impl Endpoint for AggregateAction {
	const METHOD: Method = Method::POST;
	const URL: &'static str = "/api/events/:event_id/aggregate";
	const QUERY_PARAMS: &'static [&'static str] = &["aggregate_action"];

	type Body = ();
	type Response = AggregatorStatus;
	type Error = PublicError;

	fn path_params(&self) -> PathParams {
		event_path(self.event_id)
	}

	fn query_params(&self) -> Option<QueryParams> {
		Some(QueryParams::new().with("aggregate_action", self.aggregate_action))
	}
}

impl MutationEndpoint for AggregateAction {}
