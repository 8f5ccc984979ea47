use clap::Args;
use hp_api::types::EventPhase;

#[derive(Args, Debug)]
pub struct EventListArgs {
	/// Only show events in this phase
	#[arg(long)]
	pub phase: Option<EventPhase>,
}
