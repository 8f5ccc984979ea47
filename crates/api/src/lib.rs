//! Operations of the hackathon portal REST API.
//!
//! One type per remote operation, grouped by resource, each implementing
//! [`hp_client::Endpoint`] together with [`hp_client::QueryEndpoint`] or
//! [`hp_client::MutationEndpoint`]. DTOs live in [`types`] and derive [`specta::Type`] for
//! TypeScript export. [`AggregationLoop`] wraps the per-event aggregation loop operations.

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

use hp_client::{Endpoint, EndpointDescriptor};

pub mod aggregation;
pub mod appointments;
pub mod events;
pub mod projects;
pub mod sidequests;
pub mod teams;
pub mod types;
pub mod users;

pub use aggregation::AggregationLoop;

/// Descriptors of every operation in this crate.
pub fn catalog() -> Vec<EndpointDescriptor> {
	vec![
		events::GetEvents::descriptor(),
		events::GetEvent::descriptor(),
		events::PatchEvent::descriptor(),
		events::GetEventsRoles::descriptor(),
		events::GetEventRoles::descriptor(),
		events::PutEventRoles::descriptor(),
		events::DeleteEventRoles::descriptor(),
		events::InviteUsers::descriptor(),
		events::UpdateTeamsIndex::descriptor(),
		events::GetAggregateStatus::descriptor(),
		events::AggregateAction::descriptor(),
		teams::GetTeams::descriptor(),
		teams::CreateTeam::descriptor(),
		teams::GetTeam::descriptor(),
		teams::GetTeamBySlug::descriptor(),
		teams::UpdateTeam::descriptor(),
		teams::DeleteTeam::descriptor(),
		teams::GetTeamRoles::descriptor(),
		teams::PutTeamRoles::descriptor(),
		teams::DeleteTeamRoles::descriptor(),
		teams::GetTeamAffiliates::descriptor(),
		teams::GetTeamPassword::descriptor(),
		teams::UpdateTeamPassword::descriptor(),
		teams::UpdateTeamProject::descriptor(),
		teams::GetTeamProjectPreferences::descriptor(),
		teams::UpdateTeamProjectPreferences::descriptor(),
		projects::GetProjects::descriptor(),
		projects::CreateProject::descriptor(),
		projects::GetProject::descriptor(),
		projects::GetProjectBySlug::descriptor(),
		projects::UpdateProject::descriptor(),
		projects::DeleteProject::descriptor(),
		sidequests::GetSidequests::descriptor(),
		sidequests::PostSidequests::descriptor(),
		sidequests::GetSidequest::descriptor(),
		sidequests::PatchSidequests::descriptor(),
		sidequests::PostSidequestsAttempts::descriptor(),
		sidequests::GetLeaderboard::descriptor(),
		sidequests::GetTeamLeaderboard::descriptor(),
		sidequests::GetLeaderboardTimeline::descriptor(),
		sidequests::GetParticipantsWithSidequestInfo::descriptor(),
		appointments::GetAppointments::descriptor(),
		appointments::CreateAppointment::descriptor(),
		appointments::GetAppointment::descriptor(),
		appointments::UpdateAppointment::descriptor(),
		appointments::DeleteAppointment::descriptor(),
		users::GetUsers::descriptor(),
	]
}
