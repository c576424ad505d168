use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// CLI tool that infers a Python project's requirements from its imports
#[derive(Parser, Debug)]
#[command(name = "pyreqs")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output machine-readable JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List third-party packages imported by a project, without resolving versions
    Scan {
        /// Project directory
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Extra directory name to skip (repeatable)
        #[arg(long = "ignore", value_name = "DIR")]
        ignore: Vec<String>,
    },
    /// Pin every imported package of a local project to its latest version
    Resolve {
        /// Project directory
        #[arg(default_value = ".")]
        path: PathBuf,

        #[command(flatten)]
        opts: ResolveOpts,
    },
    /// Clone a git repository and pin its imported packages
    Remote {
        /// Repository URL
        url: String,

        /// Access token used as the HTTP password when cloning
        #[arg(long, env = "PYREQS_TOKEN", hide_env_values = true)]
        token: Option<String>,

        #[command(flatten)]
        opts: ResolveOpts,
    },
}

/// Options shared by the resolving commands
#[derive(Args, Debug)]
pub struct ResolveOpts {
    /// Extra directory name to skip (repeatable)
    #[arg(long = "ignore", value_name = "DIR")]
    pub ignore: Vec<String>,

    /// Write the manifest to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Package index JSON API base URL
    #[arg(long, value_name = "URL")]
    pub index: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}
