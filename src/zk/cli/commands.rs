//! Dispatch from parsed arguments to the command layer.
//!
//! - `run()`: parses arguments, sets up logging, calls into `zk::commands`
//! - `handle_*()`: one per subcommand, each printing the returned messages

use super::print::print_messages;
use super::setup::{get_version, help_text, Cli, Commands, MV_USAGE};
use clap::error::ErrorKind;
use clap::Parser;
use std::path::Path;
use tracing_subscriber::EnvFilter;
use zk::commands::{init, mv, serve};
use zk::error::{Result, ZkError};

const LOG_ENV: &str = "ZK_LOG";

pub fn run() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{}", err.render());
                return Ok(());
            }
            ErrorKind::InvalidSubcommand => return Err(ZkError::Usage(help_text())),
            _ => return Err(ZkError::Usage(err.render().to_string())),
        },
    };

    init_logging(cli.verbose);

    let Some(command) = cli.command else {
        return Err(ZkError::Usage(help_text()));
    };

    let cwd = std::env::current_dir()?;

    match command {
        Commands::Version => {
            println!("ZK Version: {}", get_version());
            Ok(())
        }
        Commands::Serve { port, dir } => handle_serve(&cwd, &dir, port),
        Commands::Mv { from, to, dry_run } => match (from, to) {
            (Some(from), Some(to)) => handle_mv(&cwd, &from, &to, dry_run),
            _ => Err(ZkError::MissingArguments(MV_USAGE.to_string())),
        },
        Commands::Init { dir } => handle_init(&cwd.join(dir)),
    }
}

fn init_logging(verbose: u8) {
    let filter = match std::env::var(LOG_ENV) {
        Ok(spec) if !spec.trim().is_empty() => EnvFilter::new(spec),
        _ => {
            let level = match verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            };
            EnvFilter::new(format!("warn,zk={}", level))
        }
    };

    // A second call (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .try_init();
}

fn handle_serve(cwd: &Path, dir: &Path, port: Option<u16>) -> Result<()> {
    let target = serve::resolve(cwd, dir, port)?;
    println!("Serving {}", target.root.display());
    serve::run(target, |addr| {
        println!("Listening on http://localhost:{}", addr.port());
    })
}

fn handle_mv(cwd: &Path, from: &Path, to: &Path, dry_run: bool) -> Result<()> {
    let result = mv::run(cwd, from, to, mv::MoveOptions { dry_run })?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_init(dir: &Path) -> Result<()> {
    let result = init::run(dir)?;
    print_messages(&result.messages);
    Ok(())
}
