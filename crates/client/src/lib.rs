//!
//! # Hackathon Portal client
//!
//! Typed contract between the portal's REST API and its callers. Every remote operation is
//! a type implementing [`Endpoint`]: a method, a URL template with `:name` path slots, and
//! the shapes of its body, response and error. On top of that contract the [`Client`]
//! offers two operation kinds:
//!
//! - [`Query`]: read operations addressed by a deterministic [`CacheKey`], usable in a
//!   tolerant mode ([`Query::state`], [`Query::fetch`]) that only ever hands back a phase
//!   value, or a suspending mode ([`Query::suspend`]) that awaits the data and propagates
//!   the declared error;
//! - [`Mutation`]: write operations with `on_success`/`on_error` callbacks, never touching
//!   the cache.
//!
//! The [`Transport`] is injected, so tests swap in [`mock::MockTransport`] and production
//! code uses [`ReqwestTransport`].
//!
//! ## Basic example
//!
//! ```
//! use hp_client::{
//! 	mock::MockTransport, Client, Endpoint, PathParams, PublicError, QueryCache,
//! 	QueryEndpoint, TransportConfig,
//! };
//! use reqwest::Method;
//!
//! #[derive(Debug, Clone)]
//! struct GetTeamName {
//! 	team_id: String,
//! }
//!
//! impl Endpoint for GetTeamName {
//! 	const METHOD: Method = Method::GET;
//! 	const URL: &'static str = "/api/teams/:team_id/name";
//!
//! 	type Body = ();
//! 	type Response = String;
//! 	type Error = PublicError;
//!
//! 	fn path_params(&self) -> PathParams {
//! 		PathParams::new().with("team_id", &self.team_id)
//! 	}
//! }
//!
//! impl QueryEndpoint for GetTeamName {}
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//! 	let transport = MockTransport::new();
//! 	transport.respond_json(Method::GET, "/api/teams/abc/name", 200, "Rustaceans");
//!
//! 	let client = Client::new(
//! 		transport,
//! 		TransportConfig::new("http://localhost:8080"),
//! 		QueryCache::new(),
//! 	);
//!
//! 	let name = client
//! 		.query(GetTeamName { team_id: "abc".to_string() })
//! 		.suspend()
//! 		.await
//! 		.unwrap();
//!
//! 	assert_eq!(name, "Rustaceans");
//! }
//! ```

#![warn(
	clippy::all,
	clippy::pedantic,
	clippy::correctness,
	clippy::perf,
	clippy::style,
	clippy::suspicious,
	clippy::complexity,
	clippy::nursery,
	clippy::unwrap_used,
	unused_qualifications,
	rust_2018_idioms,
	trivial_casts,
	trivial_numeric_casts,
	unused_allocation,
	clippy::unnecessary_cast,
	clippy::cast_lossless,
	clippy::cast_possible_truncation,
	clippy::cast_possible_wrap,
	clippy::cast_precision_loss,
	clippy::cast_sign_loss,
	clippy::dbg_macro,
	clippy::deprecated_cfg_attr,
	clippy::separated_literal_suffix,
	deprecated
)]
#![forbid(deprecated_in_future)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

mod cache;
mod client;
mod config;
mod endpoint;
mod error;
mod key;
pub mod mock;
mod mutation;
mod query;
mod transport;

pub use cache::{CacheEntry, FetchTicket, QueryCache};
pub use client::Client;
pub use config::{ConfigError, TransportConfig, TransportOverrides, DEFAULT_TIMEOUT};
pub use endpoint::{
	resolve_url, Endpoint, EndpointDescriptor, MutationEndpoint, PathParams, QueryEndpoint,
	UrlError,
};
pub use error::{ErrorShape, ErrorSource, PublicError};
pub use key::{CacheKey, QueryParams, QueryValue};
pub use mutation::Mutation;
pub use query::{Query, QueryState, QueryStatus};
pub use transport::{
	ReqwestTransport, Transport, TransportError, TransportRequest, TransportResponse,
};

pub use reqwest::{Method, StatusCode};
