use hp_client::{
	Endpoint, Method, MutationEndpoint, PathParams, PublicError, QueryEndpoint, QueryParams,
};
use uuid::Uuid;

use crate::types::{Appointment, AppointmentForCreate, AppointmentForUpdate};

fn appointment_path(appointment_id: Uuid) -> PathParams {
	PathParams::new().with("appointment_id", appointment_id)
}

#[derive(Debug, Clone, Copy)]
pub struct GetAppointments {
	pub event_id: Uuid,
}

impl Endpoint for GetAppointments {
	const METHOD: Method = Method::GET;
	const URL: &'static str = "/api/appointments";
	const QUERY_PARAMS: &'static [&'static str] = &["event_id"];

	type Body = ();
	type Response = Vec<Appointment>;
	type Error = PublicError;

	fn query_params(&self) -> Option<QueryParams> {
		Some(QueryParams::new().with("event_id", self.event_id))
	}
}

impl QueryEndpoint for GetAppointments {}

#[derive(Debug, Clone, Copy, Default)]
pub struct CreateAppointment;

impl Endpoint for CreateAppointment {
	const METHOD: Method = Method::POST;
	const URL: &'static str = "/api/appointments";

	type Body = AppointmentForCreate;
	type Response = Appointment;
	type Error = PublicError;
}

impl MutationEndpoint for CreateAppointment {}

#[derive(Debug, Clone, Copy)]
pub struct GetAppointment {
	pub appointment_id: Uuid,
}

impl Endpoint for GetAppointment {
	const METHOD: Method = Method::GET;
	const URL: &'static str = "/api/appointments/:appointment_id";

	type Body = ();
	type Response = Appointment;
	type Error = PublicError;

	fn path_params(&self) -> PathParams {
		appointment_path(self.appointment_id)
	}
}

impl QueryEndpoint for GetAppointment {}

#[derive(Debug, Clone, Copy)]
pub struct UpdateAppointment {
	pub appointment_id: Uuid,
}

impl Endpoint for UpdateAppointment {
	const METHOD: Method = Method::PATCH;
	const URL: &'static str = "/api/appointments/:appointment_id";

	type Body = AppointmentForUpdate;
	type Response = Appointment;
	type Error = PublicError;

	fn path_params(&self) -> PathParams {
		appointment_path(self.appointment_id)
	}
}

impl MutationEndpoint for UpdateAppointment {}

#[derive(Debug, Clone, Copy)]
pub struct DeleteAppointment {
	pub appointment_id: Uuid,
}

impl Endpoint for DeleteAppointment {
	const METHOD: Method = Method::DELETE;
	const URL: &'static str = "/api/appointments/:appointment_id";

	type Body = ();
	type Response = Appointment;
	type Error = PublicError;

	fn path_params(&self) -> PathParams {
		appointment_path(self.appointment_id)
	}
}

impl MutationEndpoint for DeleteAppointment {}
