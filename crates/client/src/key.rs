use std::{collections::BTreeMap, fmt};

use serde::{ser::SerializeSeq, Serialize, Serializer};

use super::endpoint::{Endpoint, PathParams};

/// Identity of a cached query result.
///
/// Serializes as `[{ "url": <template>, "params": {..} }, {<query params>}]`, where `params`
/// is omitted for operations without path slots and the second element only exists when
/// the operation was given query parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey {
	base: KeyBase,
	query: Option<QueryParams>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
struct KeyBase {
	url: String,
	#[serde(skip_serializing_if = "BTreeMap::is_empty")]
	params: BTreeMap<String, String>,
}

impl CacheKey {
	/// Derives the key of `endpoint`. Tolerant and suspending reads share this function, so
	/// both modes always address the same entry.
	pub fn derive<E: Endpoint>(endpoint: &E) -> Self {
		Self {
			base: KeyBase {
				url: E::URL.to_string(),
				params: endpoint.path_params().as_map().clone(),
			},
			query: endpoint.query_params(),
		}
	}

	/// A hand-built key, for call sites that deliberately share or split cache entries.
	pub fn custom(url: impl Into<String>) -> Self {
		Self {
			base: KeyBase {
				url: url.into(),
				params: BTreeMap::new(),
			},
			query: None,
		}
	}

	#[must_use]
	pub fn with_path_params(mut self, params: &PathParams) -> Self {
		self.base.params.extend(
			params
				.as_map()
				.iter()
				.map(|(name, value)| (name.clone(), value.clone())),
		);
		self
	}

	#[must_use]
	pub fn with_query(mut self, query: QueryParams) -> Self {
		self.query = Some(query);
		self
	}

	pub fn url(&self) -> &str {
		&self.base.url
	}

	pub fn param(&self, name: &str) -> Option<&str> {
		self.base.params.get(name).map(String::as_str)
	}

	pub const fn query(&self) -> Option<&QueryParams> {
		self.query.as_ref()
	}
}

impl Serialize for CacheKey {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut seq = serializer.serialize_seq(Some(1 + usize::from(self.query.is_some())))?;
		seq.serialize_element(&self.base)?;
		if let Some(query) = &self.query {
			seq.serialize_element(query)?;
		}
		seq.end()
	}
}

impl fmt::Display for CacheKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match serde_json::to_string(self) {
			Ok(json) => f.write_str(&json),
			Err(_) => write!(f, "{:?}", self),
		}
	}
}

/// A flat `key -> value` (or `key -> [values]`) query string map, ordered by key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct QueryParams(BTreeMap<String, QueryValue>);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum QueryValue {
	One(String),
	Many(Vec<String>),
}

impl QueryParams {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn with(mut self, name: impl Into<String>, value: impl fmt::Display) -> Self {
		self.0.insert(name.into(), QueryValue::One(value.to_string()));
		self
	}

	/// Absent values are skipped rather than written as empty strings.
	#[must_use]
	pub fn with_opt(self, name: impl Into<String>, value: Option<impl fmt::Display>) -> Self {
		match value {
			Some(value) => self.with(name, value),
			None => self,
		}
	}

	#[must_use]
	pub fn with_many<T: fmt::Display>(
		mut self,
		name: impl Into<String>,
		values: impl IntoIterator<Item = T>,
	) -> Self {
		self.0.insert(
			name.into(),
			QueryValue::Many(values.into_iter().map(|v| v.to_string()).collect()),
		);
		self
	}

	pub fn get(&self, name: &str) -> Option<&QueryValue> {
		self.0.get(name)
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Expands into `(name, value)` pairs, repeating the name for list values.
	pub fn to_pairs(&self) -> Vec<(String, String)> {
		self.0
			.iter()
			.flat_map(|(name, value)| match value {
				QueryValue::One(value) => vec![(name.clone(), value.clone())],
				QueryValue::Many(values) => values
					.iter()
					.map(|value| (name.clone(), value.clone()))
					.collect(),
			})
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use reqwest::Method;
	use serde_json::json;

	use crate::PublicError;

	use super::*;

	#[derive(Clone)]
	struct GetTeamAffiliates {
		team_id: String,
		role: Option<&'static str>,
	}

	impl Endpoint for GetTeamAffiliates {
		const METHOD: Method = Method::GET;
		const URL: &'static str = "/api/teams/:team_id/affiliates";
		const QUERY_PARAMS: &'static [&'static str] = &["role"];

		type Body = ();
		type Response = Vec<String>;
		type Error = PublicError;

		fn path_params(&self) -> PathParams {
			PathParams::new().with("team_id", &self.team_id)
		}

		fn query_params(&self) -> Option<QueryParams> {
			Some(QueryParams::new().with_opt("role", self.role))
		}
	}

	struct GetEvents;

	impl Endpoint for GetEvents {
		const METHOD: Method = Method::GET;
		const URL: &'static str = "/api/events";

		type Body = ();
		type Response = Vec<String>;
		type Error = PublicError;
	}

	fn affiliates(team_id: &str, role: Option<&'static str>) -> GetTeamAffiliates {
		GetTeamAffiliates {
			team_id: team_id.to_string(),
			role,
		}
	}

	#[test]
	fn equal_params_derive_equal_keys() {
		let a = CacheKey::derive(&affiliates("abc", Some("Mentor")));
		let b = CacheKey::derive(&affiliates("abc", Some("Mentor")));

		assert_eq!(a, b);
		assert_eq!(HashSet::from([a.clone(), b]).len(), 1);
		assert_eq!(a.to_string(), CacheKey::derive(&affiliates("abc", Some("Mentor"))).to_string());
	}

	#[test]
	fn differing_params_derive_differing_keys() {
		let keys = [
			CacheKey::derive(&affiliates("abc", Some("Mentor"))),
			CacheKey::derive(&affiliates("abc", Some("Member"))),
			CacheKey::derive(&affiliates("abc", None)),
			CacheKey::derive(&affiliates("xyz", Some("Mentor"))),
		];

		assert_eq!(keys.iter().collect::<HashSet<_>>().len(), keys.len());
	}

	#[test]
	fn key_serializes_as_template_then_query() {
		let key = CacheKey::derive(&affiliates("abc", Some("Mentor")));

		assert_eq!(
			serde_json::to_value(&key).unwrap(),
			json!([
				{ "url": "/api/teams/:team_id/affiliates", "params": { "team_id": "abc" } },
				{ "role": "Mentor" }
			])
		);
	}

	#[test]
	fn operations_without_params_have_a_single_element() {
		assert_eq!(
			serde_json::to_value(CacheKey::derive(&GetEvents)).unwrap(),
			json!([{ "url": "/api/events" }])
		);
	}

	#[test]
	fn absent_and_empty_query_are_distinct() {
		let absent = CacheKey::custom("/api/teams");
		let empty = CacheKey::custom("/api/teams").with_query(QueryParams::new());

		assert_ne!(absent, empty);
		assert_eq!(
			serde_json::to_value(&empty).unwrap(),
			json!([{ "url": "/api/teams" }, {}])
		);
	}

	#[test]
	fn param_insertion_order_does_not_matter() {
		let a = QueryParams::new().with("event_id", "e").with("after", "t");
		let b = QueryParams::new().with("after", "t").with("event_id", "e");

		assert_eq!(a, b);
		assert_eq!(
			a.to_pairs(),
			vec![
				("after".to_string(), "t".to_string()),
				("event_id".to_string(), "e".to_string())
			]
		);
	}

	#[test]
	fn list_values_repeat_their_name() {
		let params = QueryParams::new().with_many("id", ["1", "2"]);

		assert_eq!(
			params.to_pairs(),
			vec![
				("id".to_string(), "1".to_string()),
				("id".to_string(), "2".to_string())
			]
		);
		assert_eq!(serde_json::to_value(&params).unwrap(), json!({ "id": ["1", "2"] }));
	}
}
