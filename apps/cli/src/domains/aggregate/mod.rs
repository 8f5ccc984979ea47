mod args;

use anyhow::Result;
use clap::Subcommand;
use hp_api::{types::AggregatorStatus, AggregationLoop};

use crate::{context::Context, print_output};

use self::args::AggregateArgs;

#[derive(Subcommand, Debug)]
pub enum AggregateCmd {
	/// Start the loop
	Start(AggregateArgs),
	/// Stop the loop
	Stop(AggregateArgs),
	/// Current loop status
	Status(AggregateArgs),
}

fn print_status(status: &AggregatorStatus) {
	println!("{} {}", status.event_id, status.status);
}

pub async fn run(ctx: &Context, cmd: AggregateCmd) -> Result<()> {
	match cmd {
		AggregateCmd::Start(args) => {
			let aggregation = AggregationLoop::new(ctx.client.clone(), args.event_id);
			let status = aggregation.start().send(()).await?;
			print_output!(ctx, &status, print_status);
		}
		AggregateCmd::Stop(args) => {
			let aggregation = AggregationLoop::new(ctx.client.clone(), args.event_id);
			let status = aggregation.stop().send(()).await?;
			print_output!(ctx, &status, print_status);
		}
		AggregateCmd::Status(args) => {
			let aggregation = AggregationLoop::new(ctx.client.clone(), args.event_id);
			let status = aggregation.status().suspend().await?;
			print_output!(ctx, &status, print_status);
		}
	}

	Ok(())
}
