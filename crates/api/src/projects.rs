use hp_client::{
	Endpoint, Method, MutationEndpoint, PathParams, PublicError, QueryEndpoint, QueryParams,
};
use uuid::Uuid;

use crate::types::{Project, ProjectForCreate, ProjectForUpdate};

fn project_path(project_id: Uuid) -> PathParams {
	PathParams::new().with("project_id", project_id)
}

#[derive(Debug, Clone, Copy)]
pub struct GetProjects {
	pub event_id: Uuid,
}

impl Endpoint for GetProjects {
	const METHOD: Method = Method::GET;
	const URL: &'static str = "/api/projects";
	const QUERY_PARAMS: &'static [&'static str] = &["event_id"];

	type Body = ();
	type Response = Vec<Project>;
	type Error = PublicError;

	fn query_params(&self) -> Option<QueryParams> {
		Some(QueryParams::new().with("event_id", self.event_id))
	}
}

impl QueryEndpoint for GetProjects {}

#[derive(Debug, Clone, Copy, Default)]
pub struct CreateProject;

impl Endpoint for CreateProject {
	const METHOD: Method = Method::POST;
	const URL: &'static str = "/api/projects";

	type Body = ProjectForCreate;
	type Response = Project;
	type Error = PublicError;
}

impl MutationEndpoint for CreateProject {}

#[derive(Debug, Clone, Copy)]
pub struct GetProject {
	pub project_id: Uuid,
}

impl Endpoint for GetProject {
	const METHOD: Method = Method::GET;
	const URL: &'static str = "/api/projects/:project_id";

	type Body = ();
	type Response = Project;
	type Error = PublicError;

	fn path_params(&self) -> PathParams {
		project_path(self.project_id)
	}
}

impl QueryEndpoint for GetProject {}

#[derive(Debug, Clone)]
pub struct GetProjectBySlug {
	pub event_slug: String,
	pub project_slug: String,
}

impl Endpoint for GetProjectBySlug {
	const METHOD: Method = Method::GET;
	const URL: &'static str = "/api/projects/:event_slug/:project_slug";

	type Body = ();
	type Response = Project;
	type Error = PublicError;

	fn path_params(&self) -> PathParams {
		PathParams::new()
			.with("event_slug", &self.event_slug)
			.with("project_slug", &self.project_slug)
	}
}

impl QueryEndpoint for GetProjectBySlug {}

#[derive(Debug, Clone, Copy)]
pub struct UpdateProject {
	pub project_id: Uuid,
}

impl Endpoint for UpdateProject {
	const METHOD: Method = Method::PATCH;
	const URL: &'static str = "/api/projects/:project_id";

	type Body = ProjectForUpdate;
	type Response = Project;
	type Error = PublicError;

	fn path_params(&self) -> PathParams {
		project_path(self.project_id)
	}
}

impl MutationEndpoint for UpdateProject {}

#[derive(Debug, Clone, Copy)]
pub struct DeleteProject {
	pub project_id: Uuid,
}

impl Endpoint for DeleteProject {
	const METHOD: Method = Method::DELETE;
	const URL: &'static str = "/api/projects/:project_id";

	type Body = ();
	type Response = Project;
	type Error = PublicError;

	fn path_params(&self) -> PathParams {
		project_path(self.project_id)
	}
}

impl MutationEndpoint for DeleteProject {}
