use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use specta::Type;
use strum_macros::{Display, EnumIter, EnumString};
use uuid::Uuid;

#[derive(
	Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, Display, EnumString, EnumIter,
)]
pub enum EventPhase {
	Registration,
	Hacking,
	Grading,
	Finished,
}

#[derive(
	Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, Display, EnumString, EnumIter,
)]
pub enum EventVisibility {
	Hidden,
	Public,
}

#[derive(
	Debug,
	Clone,
	Copy,
	PartialEq,
	Eq,
	Hash,
	PartialOrd,
	Ord,
	Serialize,
	Deserialize,
	Type,
	Display,
	EnumString,
	EnumIter,
)]
pub enum EventRole {
	Admin,
	Mentor,
	Participant,
	SidequestMaster,
	Stakeholder,
}

#[derive(
	Debug,
	Clone,
	Copy,
	PartialEq,
	Eq,
	Hash,
	PartialOrd,
	Ord,
	Serialize,
	Deserialize,
	Type,
	Display,
	EnumString,
	EnumIter,
)]
pub enum TeamRole {
	Member,
	Mentor,
}

/// Role assignments keyed by user id, as sent to the role put/delete operations.
pub type EventRolesMap = BTreeMap<Uuid, Vec<EventRole>>;
pub type TeamRolesMap = BTreeMap<Uuid, Vec<TeamRole>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Type)]
pub struct EventDto {
	pub id: Uuid,
	pub name: String,
	pub slug: String,
	pub start: NaiveDateTime,
	pub end: NaiveDateTime,
	pub max_team_size: u32,
	pub is_feedback_visible: bool,
	pub visibility: EventVisibility,
	pub phase: EventPhase,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Type)]
pub struct EventForPatch {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub start: Option<NaiveDateTime>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub end: Option<NaiveDateTime>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub max_team_size: Option<u32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub is_feedback_visible: Option<bool>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub visibility: Option<EventVisibility>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub phase: Option<EventPhase>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct UserForCreate {
	pub auth_id: String,
	pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct InviteUsersDto {
	pub users: Vec<UserForCreate>,
	pub roles: Vec<EventRole>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct AffectedRowsDto {
	pub affected_rows: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct User {
	pub id: Uuid,
	pub auth_id: String,
	pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct Team {
	pub id: Uuid,
	pub event_id: Uuid,
	pub project_id: Option<Uuid>,
	pub name: String,
	pub slug: String,
	pub index: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct TeamForCreate {
	pub event_id: Uuid,
	pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct TeamForUpdate {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub project_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct TeamAffiliate {
	pub id: Uuid,
	pub name: String,
	pub roles: Vec<TeamRole>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct TeamPasswordDto {
	pub password: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct TeamProjectDto {
	pub project_id: Option<Uuid>,
}

/// Ranked project choices of a team, most preferred first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct ProjectPreferences {
	pub project_preferences: Vec<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct Project {
	pub id: Uuid,
	pub event_id: Uuid,
	pub name: String,
	pub slug: String,
	pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct ProjectForCreate {
	pub event_id: Uuid,
	pub name: String,
	pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct ProjectForUpdate {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct SidequestDto {
	pub id: Uuid,
	pub event_id: Uuid,
	pub name: String,
	pub slug: String,
	pub description: String,
	pub is_higher_result_better: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct SidequestForCreate {
	pub event_id: Uuid,
	pub name: String,
	pub description: String,
	pub is_higher_result_better: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct SidequestForPatch {
	pub event_id: Uuid,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub is_higher_result_better: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Type)]
pub struct AttemptForCreate {
	pub user_id: Uuid,
	pub result: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Type)]
pub struct FullInfoSidequestEntryForLeaderboard {
	pub user_id: Uuid,
	pub user_name: String,
	pub group_id: Uuid,
	pub group_name: String,
	pub result: f64,
	pub points: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Type)]
pub struct FullInfoTeamEntryForLeaderboard {
	pub team_id: Uuid,
	pub team_name: String,
	pub result: f64,
}

/// Score history per team name: `(timestamp, score)` points in chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Type)]
pub struct TimelineData {
	pub event_id: Uuid,
	pub start: Option<NaiveDateTime>,
	pub end: Option<NaiveDateTime>,
	pub scores: BTreeMap<String, Vec<(NaiveDateTime, f64)>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct UserWithSidequestInfo {
	pub user_id: Uuid,
	pub user_name: String,
	pub allowed: bool,
	pub allowed_at: Option<NaiveDateTime>,
	pub last_quest: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct Appointment {
	pub id: Uuid,
	pub event_id: Uuid,
	pub title: String,
	pub description: Option<String>,
	pub content: Option<String>,
	pub start: NaiveDateTime,
	pub end: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct AppointmentForCreate {
	pub event_id: Uuid,
	pub title: String,
	pub description: Option<String>,
	pub content: Option<String>,
	pub start: NaiveDateTime,
	pub end: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct AppointmentForUpdate {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub content: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub start: Option<NaiveDateTime>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub end: Option<NaiveDateTime>,
}

/// State of an event's aggregation loop on the remote service.
#[derive(
	Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, Display, EnumString, EnumIter,
)]
pub enum LoopStatus {
	NonExisting,
	Running,
	Exited,
}

#[derive(
	Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, Display, EnumString, EnumIter,
)]
pub enum AggregationAction {
	Start,
	Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct AggregatorStatus {
	pub event_id: Uuid,
	pub status: LoopStatus,
}

/// Formats a date-time the way the portal expects it in query strings.
pub(crate) fn query_datetime(value: &NaiveDateTime) -> String {
	value.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}
