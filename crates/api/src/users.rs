use hp_client::{Endpoint, Method, PublicError, QueryEndpoint};

use crate::types::User;

/// Every user known to the portal. Mounted outside `/api`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetUsers;

impl Endpoint for GetUsers {
	const METHOD: Method = Method::GET;
	const URL: &'static str = "/users";

	type Body = ();
	type Response = Vec<User>;
	type Error = PublicError;
}

impl QueryEndpoint for GetUsers {}
