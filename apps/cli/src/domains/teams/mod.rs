mod args;

use anyhow::Result;
use clap::Subcommand;
use hp_api::types::Team;

use crate::{context::Context, print_output, suspend_query};

use self::args::TeamListArgs;

#[derive(Subcommand, Debug)]
pub enum TeamsCmd {
	/// List the teams of an event
	List(TeamListArgs),
}

pub async fn run(ctx: &Context, cmd: TeamsCmd) -> Result<()> {
	match cmd {
		TeamsCmd::List(args) => {
			let teams: Vec<Team> = suspend_query!(ctx, args.to_query());

			print_output!(ctx, &teams, |teams: &Vec<Team>| {
				if teams.is_empty() {
					println!("No teams found");
				}
				for team in teams {
					println!("- #{} {} {} ({})", team.index, team.id, team.name, team.slug);
				}
			});
		}
	}

	Ok(())
}
