#![allow(dead_code)]

use hp_client::{
	mock::MockTransport, Client, Endpoint, Method, MutationEndpoint, PathParams, PublicError,
	QueryCache, QueryEndpoint, QueryParams, TransportConfig,
};
use serde::{Deserialize, Serialize};

pub const BASE_URL: &str = "http://portal.test";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
	pub id: String,
	pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamForUpdate {
	pub name: String,
}

/// `GET /api/teams?event_id=..`
#[derive(Debug, Clone)]
pub struct GetTeams {
	pub event_id: Option<String>,
}

impl Endpoint for GetTeams {
	const METHOD: Method = Method::GET;
	const URL: &'static str = "/api/teams";
	const QUERY_PARAMS: &'static [&'static str] = &["event_id"];

	type Body = ();
	type Response = Vec<Team>;
	type Error = PublicError;

	fn query_params(&self) -> Option<QueryParams> {
		Some(QueryParams::new().with_opt("event_id", self.event_id.as_deref()))
	}
}

impl QueryEndpoint for GetTeams {}

/// `GET /api/teams/:team_id`
#[derive(Debug, Clone)]
pub struct GetTeam {
	pub team_id: String,
}

impl Endpoint for GetTeam {
	const METHOD: Method = Method::GET;
	const URL: &'static str = "/api/teams/:team_id";

	type Body = ();
	type Response = Team;
	type Error = PublicError;

	fn path_params(&self) -> PathParams {
		PathParams::new().with("team_id", &self.team_id)
	}
}

impl QueryEndpoint for GetTeam {}

/// `PATCH /api/teams/:team_id`
#[derive(Debug, Clone)]
pub struct UpdateTeam {
	pub team_id: String,
}

impl Endpoint for UpdateTeam {
	const METHOD: Method = Method::PATCH;
	const URL: &'static str = "/api/teams/:team_id";

	type Body = TeamForUpdate;
	type Response = Team;
	type Error = PublicError;

	fn path_params(&self) -> PathParams {
		PathParams::new().with("team_id", &self.team_id)
	}
}

impl MutationEndpoint for UpdateTeam {}

pub fn team(id: &str, name: &str) -> Team {
	Team {
		id: id.to_string(),
		name: name.to_string(),
	}
}

pub fn client(transport: &MockTransport) -> Client {
	Client::new(
		transport.clone(),
		TransportConfig::new(BASE_URL),
		QueryCache::new(),
	)
}
