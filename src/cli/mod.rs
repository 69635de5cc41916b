//! Command-line interface definitions and parsing
//!
//! Defines the CLI structure using Clap, including all commands and their
//! arguments.

use clap::{Parser, Subcommand, ValueEnum};
use promptvault::query::SortKey;

/// Every command name and alias, for typo suggestions
pub const COMMAND_NAMES: &[&str] = &[
    "tui", "t", "ls", "l", "list", "show", "s", "new", "n", "edit", "e", "delete", "d", "rm",
    "fav", "f", "copy", "c", "tags", "config",
];

#[derive(Parser)]
#[command(name = "pv")]
#[command(version)]
#[command(arg_required_else_help = false)]
#[command(about = "PromptVault - a personal library of reusable AI prompts")]
#[command(help_template = "{about}

Usage: {usage}

Options:
  -h, --help     Print help
  -V, --version  Print version

{after-help}")]
#[command(after_help = "COMMANDS:

BROWSE:
  tui, t          Launch the interactive library
  ls, l, list     List prompts (filter by tag, favorites, search)
  show, s         Display a prompt in full
  tags            List tags with prompt counts

MANAGE:
  new, n          Create a new prompt
  edit, e         Change a prompt's title, tags or content
  delete, d, rm   Delete a prompt
  fav, f          Toggle a prompt's favorite flag
  copy, c         Copy a prompt's content to the clipboard

SYSTEM:
  config          Show configuration and paths

EXAMPLES:
  pv ls --favorites --sort most-used     # Favorites, most used first
  pv ls --tag Coding --search refactor   # Narrow by tag and text
  echo \"Explain this\" | pv new Explain   # Content from stdin
  pv copy \"code refactoring\" | less      # Pipes when stdout is not a terminal

Run 'pv COMMAND --help' for more information on a command.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive library
    #[command(alias = "t")]
    Tui,
    /// List prompts
    #[command(alias = "l", alias = "list")]
    Ls {
        /// Only prompts carrying this tag (exact, case-sensitive)
        #[arg(long, short = 't', value_name = "TAG")]
        tag: Option<String>,
        /// Only favorites
        #[arg(long = "favorites", short = 'f')]
        favorites: bool,
        /// Sort order
        #[arg(long, short = 's', value_enum, default_value_t = SortKey::Newest)]
        sort: SortKey,
        /// Case-insensitive text search over title, content, description and tags
        #[arg(long, short = 'q', value_name = "TERM")]
        search: Option<String>,
    },
    /// Display a prompt in full
    #[command(alias = "s")]
    Show {
        /// Id or title of the prompt
        reference: String,
    },
    /// Create a new prompt
    #[command(alias = "n")]
    New {
        /// Title of the new prompt
        title: String,
        /// Comma-separated tags
        #[arg(long, short = 't', value_name = "TAGS", default_value = "")]
        tags: String,
        /// Prompt content (read from stdin when piped and not given)
        #[arg(long, short = 'c', value_name = "TEXT")]
        content: Option<String>,
    },
    /// Change a prompt's title, tags or content
    #[command(alias = "e")]
    Edit {
        /// Id or title of the prompt
        reference: String,
        /// New title
        #[arg(long, value_name = "TITLE")]
        title: Option<String>,
        /// New comma-separated tags
        #[arg(long, short = 't', value_name = "TAGS")]
        tags: Option<String>,
        /// New content
        #[arg(long, short = 'c', value_name = "TEXT")]
        content: Option<String>,
    },
    /// Delete a prompt
    #[command(alias = "d", alias = "rm")]
    Delete {
        /// Id or title of the prompt
        reference: String,
        /// Skip the confirmation question
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Toggle a prompt's favorite flag
    #[command(alias = "f")]
    Fav {
        /// Id or title of the prompt
        reference: String,
    },
    /// Copy a prompt's content and count the use
    #[command(alias = "c")]
    Copy {
        /// Id or title of the prompt
        reference: String,
    },
    /// List tags with prompt counts
    Tags,
    /// Show configuration and paths
    Config {
        #[arg(value_enum, default_value_t = ConfigAction::Show)]
        action: ConfigAction,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigAction {
    /// Resolved configuration as TOML
    Show,
    /// Base directory, config file and slot file
    Path,
    /// Environment variables PromptVault reads
    Env,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_ls_flags_parse() {
        let cli = Cli::try_parse_from([
            "pv", "list", "--tag", "Coding", "--favorites", "--sort", "most-used", "-q", "bug",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Ls {
                tag,
                favorites,
                sort,
                search,
            }) => {
                assert_eq!(tag.as_deref(), Some("Coding"));
                assert!(favorites);
                assert_eq!(sort, SortKey::MostUsed);
                assert_eq!(search.as_deref(), Some("bug"));
            }
            _ => panic!("Expected ls command"),
        }
    }

    #[test]
    fn test_aliases_resolve() {
        assert!(matches!(
            Cli::try_parse_from(["pv", "rm", "prompt-1", "-y"]).unwrap().command,
            Some(Commands::Delete { yes: true, .. })
        ));
        assert!(matches!(
            Cli::try_parse_from(["pv", "c", "prompt-1"]).unwrap().command,
            Some(Commands::Copy { .. })
        ));
        assert!(matches!(
            Cli::try_parse_from(["pv", "config"]).unwrap().command,
            Some(Commands::Config {
                action: ConfigAction::Show
            })
        ));
    }

    #[test]
    fn test_every_listed_name_parses() {
        for name in COMMAND_NAMES {
            let needs_ref = matches!(
                *name,
                "show" | "s" | "edit" | "e" | "delete" | "d" | "rm" | "fav" | "f" | "copy" | "c"
                    | "new" | "n"
            );
            let args: Vec<&str> = if needs_ref {
                vec!["pv", name, "x"]
            } else {
                vec!["pv", name]
            };
            assert!(Cli::try_parse_from(args).is_ok(), "{} failed to parse", name);
        }
    }
}
