use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

pub const MV_USAGE: &str = "zk mv usage:\n\tzk mv frompath topath\tMove the item(s) at frompath to topath, updating references to them";

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.1.0" for releases, "0.1.0@abc1234 2024-01-15 14:30" for dev builds
pub fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "zk", bin_name = "zk", version = get_version())]
#[command(about = "ZK is a command line tool for managing zettelkastens", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// More log output (-v info, -vv debug, -vvv trace); ZK_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Get the current ZK CLI version
    Version,

    /// Serve a ZK in the current working directory
    #[command(alias = "run")]
    Serve {
        /// The port to which the server will bind
        #[arg(short, long)]
        port: Option<u16>,

        /// The directory that will be served
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Move the item(s) at frompath to topath, updating references to them
    #[command(alias = "move")]
    Mv {
        from: Option<PathBuf>,

        to: Option<PathBuf>,

        /// Show which documents would change without touching anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Mark a directory as the root of a zettelkasten
    Init {
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
}

pub fn help_text() -> String {
    Cli::command().render_help().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_command() {
        assert!(parse(&["zk"]).command.is_none());
    }

    #[test]
    fn test_serve_defaults() {
        match parse(&["zk", "serve"]).command {
            Some(Commands::Serve { port, dir }) => {
                assert_eq!(port, None);
                assert_eq!(dir, PathBuf::from("."));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_run_alias_with_short_flags() {
        match parse(&["zk", "run", "-p", "9000", "-d", "notes"]).command {
            Some(Commands::Serve { port, dir }) => {
                assert_eq!(port, Some(9000));
                assert_eq!(dir, PathBuf::from("notes"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_move_alias() {
        match parse(&["zk", "move", "a.html", "b.html"]).command {
            Some(Commands::Mv { from, to, dry_run }) => {
                assert_eq!(from, Some(PathBuf::from("a.html")));
                assert_eq!(to, Some(PathBuf::from("b.html")));
                assert!(!dry_run);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_mv_arguments_are_optional_for_custom_usage() {
        match parse(&["zk", "mv", "a.html"]).command {
            Some(Commands::Mv { from, to, .. }) => {
                assert!(from.is_some());
                assert!(to.is_none());
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_verbosity_counts() {
        assert_eq!(parse(&["zk", "-vv", "version"]).verbose, 2);
    }

    #[test]
    fn test_unknown_command_fails_to_parse() {
        assert!(Cli::try_parse_from(["zk", "frobnicate"]).is_err());
    }
}
