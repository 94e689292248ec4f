use crate::api_cli::error::Result;
use clap::{Parser, Subcommand};

/// One line typed at the REPL.
#[derive(Parser, Debug)]
#[command(
    name = "apidocs",
    no_binary_name = true,
    disable_help_subcommand = true,
    disable_version_flag = true,
    help_template = "{subcommands}"
)]
pub struct ReplLine {
    #[command(subcommand)]
    pub command: ReplCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// List the documentation sections.
    Sections,
    /// Jump to a section, e.g. `go entities`.
    Go { section: String },
    /// Open a resource of the active section.
    Open { resource: String },
    /// Return to the landing page of the active section.
    Back,
    /// Set the language of code samples.
    Lang {
        #[arg(value_parser = ["js", "bash"])]
        language: String,
    },
    /// Show or hide live API keys in code samples.
    Keys {
        #[arg(value_parser = ["show", "hide"])]
        visibility: String,
    },
    /// Search the resources of the active section. No query lists them all.
    Search { query: Vec<String> },
    /// Load the next page of search results.
    More,
    /// Open a resource from the search results.
    Pick { name: String },
    /// Render the active page.
    Show,
    /// Re-fetch the resource listing of the active section.
    Refresh,
    /// Print the current navigation path.
    Path,
}

/// Splits `line` like a shell would and parses it as a REPL command.
pub fn parse_line(line: &str) -> Result<ReplCommand> {
    let args = shlex::split(line).unwrap_or_else(|| line.split_whitespace().map(String::from).collect());
    Ok(ReplLine::try_parse_from(args)?.command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_navigation_commands() {
        assert_eq!(
            parse_line("go stored-procedures").unwrap(),
            ReplCommand::Go {
                section: "stored-procedures".into()
            }
        );
        assert_eq!(parse_line("back").unwrap(), ReplCommand::Back);
        assert_eq!(parse_line("refresh").unwrap(), ReplCommand::Refresh);
        assert_eq!(
            parse_line("open \"user roles\"").unwrap(),
            ReplCommand::Open {
                resource: "user roles".into()
            }
        );
    }

    #[test]
    fn search_collects_words() {
        assert_eq!(
            parse_line("search user roles").unwrap(),
            ReplCommand::Search {
                query: vec!["user".into(), "roles".into()]
            }
        );
        assert_eq!(parse_line("search").unwrap(), ReplCommand::Search { query: vec![] });
    }

    #[test]
    fn restricted_values_are_enforced() {
        assert!(parse_line("lang cobol").is_err());
        assert!(parse_line("keys maybe").is_err());
        assert!(parse_line("frobnicate").is_err());
    }
}
