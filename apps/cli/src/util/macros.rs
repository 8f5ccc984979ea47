//! Macros for handling CLI command output

/// Run a suspending query and turn its declared error into an [`anyhow::Error`]
#[macro_export]
macro_rules! suspend_query {
	($ctx:expr, $endpoint:expr) => {{
		$ctx.client.query($endpoint).suspend().await?
	}};
}

/// Print output in the configured format (human or JSON)
#[macro_export]
macro_rules! print_output {
	($ctx:expr, $output:expr, $human:expr) => {{
		match $ctx.format {
			$crate::context::OutputFormat::Human => {
				$human($output);
			}
			$crate::context::OutputFormat::Json => {
				$crate::util::output::print_json($output)?;
			}
		}
	}};
}
