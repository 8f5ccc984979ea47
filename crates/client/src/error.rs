use std::fmt::Debug;

use reqwest::{Method, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

use super::key::CacheKey;

/// Status used when an error did not come from an HTTP response at all
/// (unreachable host, timeout, unresolvable URL, undecodable cache entry).
pub(crate) const NO_STATUS: u16 = 0;

/// An operation's declared error shape.
///
/// Operations surface every failure as this type; when the remote side did not hand back a
/// decodable error body, the client synthesises one through [`ErrorShape::synthesize`].
pub trait ErrorShape:
	DeserializeOwned + Serialize + Clone + Debug + Send + Sync + 'static
{
	/// Builds an error value for failures that carry no declared error body.
	/// `status` is `None` when no HTTP response was received.
	fn synthesize(status: Option<StatusCode>, message: String) -> Self;
}

/// The portal's single error payload: `{ "message": string, "status": integer }`.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{message} (status {status})")]
pub struct PublicError {
	pub message: String,
	pub status: u16,
}

impl PublicError {
	pub fn new(status: u16, message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
			status,
		}
	}

	/// `true` when the error was produced locally, without an HTTP status.
	pub const fn is_local(&self) -> bool {
		self.status == NO_STATUS
	}
}

impl ErrorShape for PublicError {
	fn synthesize(status: Option<StatusCode>, message: String) -> Self {
		Self {
			message,
			status: status.map_or(NO_STATUS, |status| status.as_u16()),
		}
	}
}

/// Where an error reported to a [`Client`](crate::Client) error observer came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorSource {
	/// A query fetch, identified by its cache key.
	Query(CacheKey),
	/// A mutation, identified by its method and URL template.
	Mutation { method: Method, url: &'static str },
}
