use hp_client::{
	Endpoint, Method, MutationEndpoint, PathParams, PublicError, QueryEndpoint, QueryParams,
};
use uuid::Uuid;

use crate::types::{
	AffectedRowsDto, ProjectPreferences, Team, TeamAffiliate, TeamForCreate, TeamForUpdate,
	TeamPasswordDto, TeamProjectDto, TeamRole, TeamRolesMap,
};

fn team_path(team_id: Uuid) -> PathParams {
	PathParams::new().with("team_id", team_id)
}

#[derive(Debug, Clone, Copy)]
pub struct GetTeams {
	pub event_id: Uuid,
}

impl Endpoint for GetTeams {
	const METHOD: Method = Method::GET;
	const URL: &'static str = "/api/teams";
	const QUERY_PARAMS: &'static [&'static str] = &["event_id"];

	type Body = ();
	type Response = Vec<Team>;
	type Error = PublicError;

	fn query_params(&self) -> Option<QueryParams> {
		Some(QueryParams::new().with("event_id", self.event_id))
	}
}

impl QueryEndpoint for GetTeams {}

#[derive(Debug, Clone, Copy, Default)]
pub struct CreateTeam;

impl Endpoint for CreateTeam {
	const METHOD: Method = Method::POST;
	const URL: &'static str = "/api/teams";

	type Body = TeamForCreate;
	type Response = Team;
	type Error = PublicError;
}

impl MutationEndpoint for CreateTeam {}

#[derive(Debug, Clone, Copy)]
pub struct GetTeam {
	pub team_id: Uuid,
}

impl Endpoint for GetTeam {
	const METHOD: Method = Method::GET;
	const URL: &'static str = "/api/teams/:team_id";

	type Body = ();
	type Response = Team;
	type Error = PublicError;

	fn path_params(&self) -> PathParams {
		team_path(self.team_id)
	}
}

impl QueryEndpoint for GetTeam {}

#[derive(Debug, Clone)]
pub struct GetTeamBySlug {
	pub event_slug: String,
	pub team_slug: String,
}

impl Endpoint for GetTeamBySlug {
	const METHOD: Method = Method::GET;
	const URL: &'static str = "/api/teams/:event_slug/:team_slug";

	type Body = ();
	type Response = Team;
	type Error = PublicError;

	fn path_params(&self) -> PathParams {
		PathParams::new()
			.with("event_slug", &self.event_slug)
			.with("team_slug", &self.team_slug)
	}
}

impl QueryEndpoint for GetTeamBySlug {}

#[derive(Debug, Clone, Copy)]
pub struct UpdateTeam {
	pub team_id: Uuid,
}

impl Endpoint for UpdateTeam {
	const METHOD: Method = Method::PATCH;
	const URL: &'static str = "/api/teams/:team_id";

	type Body = TeamForUpdate;
	type Response = Team;
	type Error = PublicError;

	fn path_params(&self) -> PathParams {
		team_path(self.team_id)
	}
}

impl MutationEndpoint for UpdateTeam {}

#[derive(Debug, Clone, Copy)]
pub struct DeleteTeam {
	pub team_id: Uuid,
}

impl Endpoint for DeleteTeam {
	const METHOD: Method = Method::DELETE;
	const URL: &'static str = "/api/teams/:team_id";

	type Body = ();
	type Response = Team;
	type Error = PublicError;

	fn path_params(&self) -> PathParams {
		team_path(self.team_id)
	}
}

impl MutationEndpoint for DeleteTeam {}

#[derive(Debug, Clone, Copy)]
pub struct GetTeamRoles {
	pub team_id: Uuid,
}

impl Endpoint for GetTeamRoles {
	const METHOD: Method = Method::GET;
	const URL: &'static str = "/api/teams/:team_id/roles";

	type Body = ();
	type Response = Vec<TeamRole>;
	type Error = PublicError;

	fn path_params(&self) -> PathParams {
		team_path(self.team_id)
	}
}

impl QueryEndpoint for GetTeamRoles {}

#[derive(Debug, Clone, Copy)]
pub struct PutTeamRoles {
	pub team_id: Uuid,
}

impl Endpoint for PutTeamRoles {
	const METHOD: Method = Method::PUT;
	const URL: &'static str = "/api/teams/:team_id/roles";

	type Body = TeamRolesMap;
	type Response = AffectedRowsDto;
	type Error = PublicError;

	fn path_params(&self) -> PathParams {
		team_path(self.team_id)
	}
}

impl MutationEndpoint for PutTeamRoles {}

#[derive(Debug, Clone, Copy)]
pub struct DeleteTeamRoles {
	pub team_id: Uuid,
}

impl Endpoint for DeleteTeamRoles {
	const METHOD: Method = Method::DELETE;
	const URL: &'static str = "/api/teams/:team_id/roles";

	type Body = TeamRolesMap;
	type Response = AffectedRowsDto;
	type Error = PublicError;

	fn path_params(&self) -> PathParams {
		team_path(self.team_id)
	}
}

impl MutationEndpoint for DeleteTeamRoles {}

/// Members and mentors of a team, optionally narrowed to one role.
#[derive(Debug, Clone, Copy)]
pub struct GetTeamAffiliates {
	pub team_id: Uuid,
	pub role: Option<TeamRole>,
}

impl Endpoint for GetTeamAffiliates {
	const METHOD: Method = Method::GET;
	const URL: &'static str = "/api/teams/:team_id/affiliates";
	const QUERY_PARAMS: &'static [&'static str] = &["role"];

	type Body = ();
	type Response = Vec<TeamAffiliate>;
	type Error = PublicError;

	fn path_params(&self) -> PathParams {
		team_path(self.team_id)
	}

	fn query_params(&self) -> Option<QueryParams> {
		Some(QueryParams::new().with_opt("role", self.role))
	}
}

impl QueryEndpoint for GetTeamAffiliates {}

#[derive(Debug, Clone, Copy)]
pub struct GetTeamPassword {
	pub team_id: Uuid,
}

impl Endpoint for GetTeamPassword {
	const METHOD: Method = Method::GET;
	const URL: &'static str = "/api/teams/:team_id/password";

	type Body = ();
	type Response = TeamPasswordDto;
	type Error = PublicError;

	fn path_params(&self) -> PathParams {
		team_path(self.team_id)
	}
}

impl QueryEndpoint for GetTeamPassword {}

#[derive(Debug, Clone, Copy)]
pub struct UpdateTeamPassword {
	pub team_id: Uuid,
}

impl Endpoint for UpdateTeamPassword {
	const METHOD: Method = Method::PATCH;
	const URL: &'static str = "/api/teams/:team_id/password";

	type Body = TeamPasswordDto;
	type Response = Team;
	type Error = PublicError;

	fn path_params(&self) -> PathParams {
		team_path(self.team_id)
	}
}

impl MutationEndpoint for UpdateTeamPassword {}

#[derive(Debug, Clone, Copy)]
pub struct UpdateTeamProject {
	pub team_id: Uuid,
}

impl Endpoint for UpdateTeamProject {
	const METHOD: Method = Method::PATCH;
	const URL: &'static str = "/api/teams/:team_id/project";

	type Body = TeamProjectDto;
	type Response = Team;
	type Error = PublicError;

	fn path_params(&self) -> PathParams {
		team_path(self.team_id)
	}
}

impl MutationEndpoint for UpdateTeamProject {}

#[derive(Debug, Clone, Copy)]
pub struct GetTeamProjectPreferences {
	pub team_id: Uuid,
}

impl Endpoint for GetTeamProjectPreferences {
	const METHOD: Method = Method::GET;
	const URL: &'static str = "/api/teams/:team_id/project-preferences";

	type Body = ();
	type Response = ProjectPreferences;
	type Error = PublicError;

	fn path_params(&self) -> PathParams {
		team_path(self.team_id)
	}
}

impl QueryEndpoint for GetTeamProjectPreferences {}

#[derive(Debug, Clone, Copy)]
pub struct UpdateTeamProjectPreferences {
	pub team_id: Uuid,
}

impl Endpoint for UpdateTeamProjectPreferences {
	const METHOD: Method = Method::PATCH;
	const URL: &'static str = "/api/teams/:team_id/project-preferences";

	type Body = ProjectPreferences;
	type Response = ProjectPreferences;
	type Error = PublicError;

	fn path_params(&self) -> PathParams {
		team_path(self.team_id)
	}
}

impl MutationEndpoint for UpdateTeamProjectPreferences {}
