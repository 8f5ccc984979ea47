use std::{any::type_name, collections::BTreeMap, fmt::Display};

use reqwest::Method;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use super::{error::ErrorShape, key::QueryParams};

/// A single remote operation: where it lives and what it sends and receives.
///
/// Implementors are the per-operation parameter structs; the associated constants and types
/// never change at runtime, the instance only carries the resolved parameters.
pub trait Endpoint: Send + Sync + 'static {
	const METHOD: Method;
	/// URL template with `:name` path slots, e.g. `/api/teams/:team_id/roles`.
	const URL: &'static str;
	/// Names of the query parameters this operation accepts.
	const QUERY_PARAMS: &'static [&'static str] = &[];

	/// Request body. `()` for operations without one.
	type Body: Serialize + Send + Sync;
	type Response: DeserializeOwned + Send + 'static;
	type Error: ErrorShape;

	fn path_params(&self) -> PathParams {
		PathParams::default()
	}

	/// `None` means "no query parameters at all", which is distinct from an empty map.
	fn query_params(&self) -> Option<QueryParams> {
		None
	}

	fn descriptor() -> EndpointDescriptor
	where
		Self: Sized,
	{
		EndpointDescriptor {
			method: Self::METHOD,
			url_template: Self::URL,
			path_param_names: path_param_names(Self::URL),
			query_param_names: Self::QUERY_PARAMS,
			request_schema: schema_name::<Self::Body>(),
			response_schema: type_name::<Self::Response>(),
			error_schema: type_name::<Self::Error>(),
		}
	}
}

/// Read-only operations, the only ones a [`Query`](crate::Query) accepts.
pub trait QueryEndpoint: Endpoint<Body = ()> + Clone {}

/// Side-effecting operations, the only ones a [`Mutation`](crate::Mutation) accepts.
pub trait MutationEndpoint: Endpoint {}

/// Static metadata of an [`Endpoint`], mostly useful for logging and tooling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointDescriptor {
	pub method: Method,
	pub url_template: &'static str,
	pub path_param_names: Vec<&'static str>,
	pub query_param_names: &'static [&'static str],
	pub request_schema: Option<&'static str>,
	pub response_schema: &'static str,
	pub error_schema: &'static str,
}

fn schema_name<T>() -> Option<&'static str> {
	let name = type_name::<T>();
	(name != "()").then_some(name)
}

fn path_param_names(template: &'static str) -> Vec<&'static str> {
	template
		.split('/')
		.filter_map(|segment| segment.strip_prefix(':'))
		.collect()
}

/// Resolved path parameter values, keyed by slot name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PathParams(BTreeMap<String, String>);

impl PathParams {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn with(mut self, name: impl Into<String>, value: impl Display) -> Self {
		self.0.insert(name.into(), value.to_string());
		self
	}

	pub fn get(&self, name: &str) -> Option<&str> {
		self.0.get(name).map(String::as_str)
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub(crate) const fn as_map(&self) -> &BTreeMap<String, String> {
		&self.0
	}
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UrlError {
	#[error("missing path parameter '{name}' for template '{template}'")]
	MissingPathParam { template: String, name: String },
}

/// Substitutes every `:name` segment of `template` with its value from `params`.
///
/// Plain interpolation: values are inserted as given, unused params are ignored.
pub fn resolve_url(template: &str, params: &PathParams) -> Result<String, UrlError> {
	template
		.split('/')
		.map(|segment| {
			segment.strip_prefix(':').map_or(Ok(segment), |name| {
				params
					.get(name)
					.ok_or_else(|| UrlError::MissingPathParam {
						template: template.to_string(),
						name: name.to_string(),
					})
			})
		})
		.collect::<Result<Vec<_>, _>>()
		.map(|segments| segments.join("/"))
}
