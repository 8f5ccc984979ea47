use clap::Args;
use uuid::Uuid;

#[derive(Args, Debug)]
pub struct AggregateArgs {
	/// Event whose aggregation loop is targeted
	pub event_id: Uuid,
}
