mod args;

use anyhow::Result;
use clap::Subcommand;
use hp_api::{events::GetEvents, types::EventDto};

use crate::{context::Context, print_output, suspend_query};

use self::args::EventListArgs;

#[derive(Subcommand, Debug)]
pub enum EventsCmd {
	/// List events
	List(EventListArgs),
}

pub async fn run(ctx: &Context, cmd: EventsCmd) -> Result<()> {
	match cmd {
		EventsCmd::List(args) => {
			let events: Vec<EventDto> = suspend_query!(ctx, GetEvents)
				.into_iter()
				.filter(|event| args.phase.map_or(true, |phase| event.phase == phase))
				.collect();

			print_output!(ctx, &events, |events: &Vec<EventDto>| {
				if events.is_empty() {
					println!("No events found");
				}
				for event in events {
					println!(
						"- {} {} ({}) {} {}",
						event.id, event.name, event.slug, event.phase, event.start
					);
				}
			});
		}
	}

	Ok(())
}
