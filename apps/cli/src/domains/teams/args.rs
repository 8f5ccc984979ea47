use clap::Args;
use hp_api::teams::GetTeams;
use uuid::Uuid;

#[derive(Args, Debug)]
pub struct TeamListArgs {
	#[arg(long)]
	pub event_id: Uuid,
}

impl TeamListArgs {
	pub const fn to_query(&self) -> GetTeams {
		GetTeams {
			event_id: self.event_id,
		}
	}
}
