use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "job-tracker")]
#[command(about = "Search German job listings through the Arbeitsagentur API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP proxy (default)
    Serve,
    /// Search jobs from the terminal through a running proxy
    Search(SearchArgs),
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Keyword, e.g. "entwickler"
    #[arg(long)]
    pub was: Option<String>,

    /// Location, e.g. "berlin"
    #[arg(long)]
    pub wo: Option<String>,

    /// Page number; invalid values fall back to 1
    #[arg(long, allow_hyphen_values = true)]
    pub page: Option<String>,

    /// Page size; invalid values fall back to the default
    #[arg(long, allow_hyphen_values = true)]
    pub size: Option<String>,

    /// Base URL of the proxy
    #[arg(long, default_value = "http://localhost:3001")]
    pub api_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    /// Keep reading navigation commands from stdin
    #[arg(short, long)]
    pub interactive: bool,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn search_args_parse() {
        let cli = Cli::parse_from([
            "job-tracker",
            "search",
            "--was",
            "rust",
            "--page",
            "abc",
            "-i",
        ]);

        let Some(Command::Search(args)) = cli.command else {
            panic!("expected search command");
        };
        assert_eq!(args.was.as_deref(), Some("rust"));
        assert_eq!(args.page.as_deref(), Some("abc"));
        assert_eq!(args.api_url, "http://localhost:3001");
        assert!(args.interactive);
    }

    #[test]
    fn every_search_argument_is_documented() {
        let mut command = Cli::command();
        let search = command.find_subcommand_mut("search").unwrap();
        for arg in search.get_arguments() {
            if matches!(arg.get_id().as_str(), "help" | "version") {
                continue;
            }
            assert!(arg.get_help().is_some(), "--{} has no help text", arg.get_id());
        }
    }

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::parse_from(["job-tracker"]);
        assert!(cli.command.is_none());
    }
}
