use hp_client::Client;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
	Human,
	Json,
}

#[derive(Clone)]
pub struct Context {
	pub client: Client,
	pub format: OutputFormat,
}

impl Context {
	pub const fn new(client: Client, format: OutputFormat) -> Self {
		Self { client, format }
	}
}
