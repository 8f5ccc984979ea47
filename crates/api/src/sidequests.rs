use chrono::NaiveDateTime;
use hp_client::{
	Endpoint, Method, MutationEndpoint, PathParams, PublicError, QueryEndpoint, QueryParams,
};
use uuid::Uuid;

use crate::types::{
	query_datetime, AttemptForCreate, FullInfoSidequestEntryForLeaderboard,
	FullInfoTeamEntryForLeaderboard, SidequestDto, SidequestForCreate, SidequestForPatch,
	TimelineData, UserWithSidequestInfo,
};

fn sidequest_path(sidequest_id: Uuid) -> PathParams {
	PathParams::new().with("sidequest_id", sidequest_id)
}

fn event_query(event_id: Uuid) -> QueryParams {
	QueryParams::new().with("event_id", event_id)
}

#[derive(Debug, Clone, Copy)]
pub struct GetSidequests {
	pub event_id: Uuid,
}

impl Endpoint for GetSidequests {
	const METHOD: Method = Method::GET;
	const URL: &'static str = "/api/sidequests";
	const QUERY_PARAMS: &'static [&'static str] = &["event_id"];

	type Body = ();
	type Response = Vec<SidequestDto>;
	type Error = PublicError;

	fn query_params(&self) -> Option<QueryParams> {
		Some(event_query(self.event_id))
	}
}

impl QueryEndpoint for GetSidequests {}

/// Creates a sidequest and answers with its number of affected rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostSidequests;

impl Endpoint for PostSidequests {
	const METHOD: Method = Method::POST;
	const URL: &'static str = "/api/sidequests";

	type Body = SidequestForCreate;
	type Response = u64;
	type Error = PublicError;
}

impl MutationEndpoint for PostSidequests {}

#[derive(Debug, Clone, Copy)]
pub struct GetSidequest {
	pub sidequest_id: Uuid,
}

impl Endpoint for GetSidequest {
	const METHOD: Method = Method::GET;
	const URL: &'static str = "/api/sidequests/:sidequest_id";

	type Body = ();
	type Response = SidequestDto;
	type Error = PublicError;

	fn path_params(&self) -> PathParams {
		sidequest_path(self.sidequest_id)
	}
}

impl QueryEndpoint for GetSidequest {}

#[derive(Debug, Clone, Copy)]
pub struct PatchSidequests {
	pub sidequest_id: Uuid,
}

impl Endpoint for PatchSidequests {
	const METHOD: Method = Method::PATCH;
	const URL: &'static str = "/api/sidequests/:sidequest_id";

	type Body = SidequestForPatch;
	type Response = SidequestDto;
	type Error = PublicError;

	fn path_params(&self) -> PathParams {
		sidequest_path(self.sidequest_id)
	}
}

impl MutationEndpoint for PatchSidequests {}

#[derive(Debug, Clone, Copy)]
pub struct PostSidequestsAttempts {
	pub sidequest_id: Uuid,
}

impl Endpoint for PostSidequestsAttempts {
	const METHOD: Method = Method::POST;
	const URL: &'static str = "/api/sidequests/:sidequest_id/attempts";

	type Body = AttemptForCreate;
	type Response = u64;
	type Error = PublicError;

	fn path_params(&self) -> PathParams {
		sidequest_path(self.sidequest_id)
	}
}

impl MutationEndpoint for PostSidequestsAttempts {}

#[derive(Debug, Clone, Copy)]
pub struct GetLeaderboard {
	pub sidequest_id: Uuid,
}

impl Endpoint for GetLeaderboard {
	const METHOD: Method = Method::GET;
	const URL: &'static str = "/api/sidequests/:sidequest_id/leaderboard";

	type Body = ();
	type Response = Vec<FullInfoSidequestEntryForLeaderboard>;
	type Error = PublicError;

	fn path_params(&self) -> PathParams {
		sidequest_path(self.sidequest_id)
	}
}

impl QueryEndpoint for GetLeaderboard {}

#[derive(Debug, Clone, Copy)]
pub struct GetTeamLeaderboard {
	pub event_id: Uuid,
}

impl Endpoint for GetTeamLeaderboard {
	const METHOD: Method = Method::GET;
	const URL: &'static str = "/api/sidequests/leaderboard";
	const QUERY_PARAMS: &'static [&'static str] = &["event_id"];

	type Body = ();
	type Response = Vec<FullInfoTeamEntryForLeaderboard>;
	type Error = PublicError;

	fn query_params(&self) -> Option<QueryParams> {
		Some(event_query(self.event_id))
	}
}

impl QueryEndpoint for GetTeamLeaderboard {}

/// Score history of an event, optionally bounded by `after` and `before`.
#[derive(Debug, Clone, Copy)]
pub struct GetLeaderboardTimeline {
	pub event_id: Uuid,
	pub before: Option<NaiveDateTime>,
	pub after: Option<NaiveDateTime>,
}

impl Endpoint for GetLeaderboardTimeline {
	const METHOD: Method = Method::GET;
	const URL: &'static str = "/api/sidequests/leaderboard/timeline";
	const QUERY_PARAMS: &'static [&'static str] = &["event_id", "before", "after"];

	type Body = ();
	type Response = TimelineData;
	type Error = PublicError;

	fn query_params(&self) -> Option<QueryParams> {
		Some(
			event_query(self.event_id)
				.with_opt("before", self.before.as_ref().map(query_datetime))
				.with_opt("after", self.after.as_ref().map(query_datetime)),
		)
	}
}

impl QueryEndpoint for GetLeaderboardTimeline {}

#[derive(Debug, Clone, Copy)]
pub struct GetParticipantsWithSidequestInfo {
	pub event_id: Uuid,
}

impl Endpoint for GetParticipantsWithSidequestInfo {
	const METHOD: Method = Method::GET;
	const URL: &'static str = "/api/sidequests/participants";
	const QUERY_PARAMS: &'static [&'static str] = &["event_id"];

	type Body = ();
	type Response = Vec<UserWithSidequestInfo>;
	type Error = PublicError;

	fn query_params(&self) -> Option<QueryParams> {
		Some(event_query(self.event_id))
	}
}

impl QueryEndpoint for GetParticipantsWithSidequestInfo {}
