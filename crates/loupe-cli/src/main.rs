//! Loupe CLI - command-line interface for the Loupe linter.

mod commands;
mod output;

use clap::Parser;
use commands::Commands;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "loupe",
    author,
    version,
    about = "JavaScript/TypeScript loop-modernization linter",
    long_about = "Loupe inspects JavaScript and TypeScript sources for index-based\n\
                  for loops whose index is only used to access the iterated array,\n\
                  and recommends for...of loops instead."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check(args) => args.run(),
        Commands::ListRules(args) => args.run(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_check_command() {
        let cli = Cli::try_parse_from(["loupe", "check", "./src"]).unwrap();
        match cli.command {
            Commands::Check(args) => {
                assert_eq!(args.path.to_str().unwrap(), "./src");
                assert_eq!(args.format, "pretty");
            }
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn cli_parses_check_with_format() {
        let cli = Cli::try_parse_from(["loupe", "check", "./src", "--format", "json"]).unwrap();
        match cli.command {
            Commands::Check(args) => {
                assert_eq!(args.format, "json");
            }
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn cli_parses_fail_on_warnings() {
        let cli = Cli::try_parse_from(["loupe", "check", ".", "--fail-on-warnings"]).unwrap();
        match cli.command {
            Commands::Check(args) => {
                assert!(args.fail_on_warnings);
                assert!(!args.no_color);
            }
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn cli_parses_list_rules() {
        let cli = Cli::try_parse_from(["loupe", "list-rules"]).unwrap();
        assert!(matches!(cli.command, Commands::ListRules(_)));
    }

    #[test]
    fn cli_requires_path_for_check() {
        assert!(Cli::try_parse_from(["loupe", "check"]).is_err());
    }
}
