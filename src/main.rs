use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use findversion::cli::{run_resolve, ResolveArgs};
use findversion::ui;

#[derive(clap::Parser)]
#[command(
    name = "findversion",
    about = "Print a version string for a source tree from its VERSION file or git history"
)]
struct Args {
    #[arg(help = "Root of the source tree (defaults to the current directory)")]
    path: Option<PathBuf>,

    #[arg(
        short,
        long,
        help = "Release branch prefix that enables the closest tag search [default: release-branch.]"
    )]
    prefix: Option<String>,

    #[arg(long, help = "Mainline branch excluded from the closest tag search [default: master]")]
    mainline: Option<String>,

    #[arg(
        short,
        long,
        help = "Custom configuration file path (configuration is loaded before the VERSION file is checked)"
    )]
    config: Option<PathBuf>,

    #[arg(short, long, help = "Log resolution steps to stderr")]
    verbose: bool,

    #[arg(long, help = "Print version information and quit")]
    version: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if args.version {
        ui::display_tool_version();
        return ExitCode::SUCCESS;
    }

    init_logging(args.verbose);

    match run(args) {
        Ok(version) => {
            ui::display_version(&version);
            ExitCode::SUCCESS
        }
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<String> {
    let root = match args.path {
        Some(path) => path,
        None => std::env::current_dir().context("cannot determine the current directory")?,
    };

    let resolution = run_resolve(ResolveArgs {
        root,
        config_path: args.config,
        prefix: args.prefix,
        mainline: args.mainline,
    })?;

    Ok(resolution.version)
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "findversion=debug" } else { "warn" };

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_env("FINDVERSION_LOG")
                .unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
