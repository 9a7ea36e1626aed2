use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use tagbump::cli::{resolve_bump, run_workflow, WorkflowArgs, WorkflowOutcome};
use tagbump::git::Backend;
use tagbump::{config, git, logging, ui};

#[derive(clap::Parser)]
#[command(
    name = "tagbump",
    version,
    about = "Create the next semantic-version git tag (vMAJOR.MINOR.PATCH)"
)]
struct Args {
    #[arg(help = "Part of the version to bump: major, minor or patch [default: patch]")]
    bump: Option<String>,

    #[arg(short, long, help = "Create the tag without asking for confirmation")]
    yes: bool,

    #[arg(long, help = "Push the new tag to the remote after creating it")]
    push: bool,

    #[arg(long, help = "Remote to push the tag to [default: origin]")]
    remote: Option<String>,

    #[arg(long, help = "Do not list commits since the latest tag")]
    no_log: bool,

    #[arg(long, help = "Preview the new tag without creating it")]
    dry_run: bool,

    #[arg(
        short = 'C',
        long = "repo",
        default_value = ".",
        help = "Run as if started in this directory"
    )]
    repo: PathBuf,

    #[arg(long, help = "Git implementation to use: cli or libgit2")]
    backend: Option<Backend>,

    #[arg(long, value_name = "SECS", help = "Timeout for each git command")]
    timeout: Option<u64>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(short, long, help = "Log git invocations to stderr")]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config =
        config::load_config(args.config.as_deref(), &args.repo).context("Error loading config")?;

    if let Some(backend) = args.backend {
        config.backend = backend;
    }
    if let Some(secs) = args.timeout {
        if secs == 0 {
            anyhow::bail!("--timeout must be greater than zero");
        }
        config.timeout_secs = secs;
    }

    let mut workflow_args = WorkflowArgs::from_config(&config);
    workflow_args.bump = resolve_bump(args.bump.as_deref(), &config.default_bump);
    workflow_args.confirm = config.confirm && !args.yes;
    workflow_args.push = config.push || args.push;
    workflow_args.show_log = config.show_log && !args.no_log;
    workflow_args.dry_run = args.dry_run;
    if let Some(remote) = args.remote {
        workflow_args.remote = remote;
    }

    let repo = git::open(config.backend, &args.repo, config.timeout())
        .with_context(|| format!("Cannot open repository at {}", args.repo.display()))?;

    let stdin = io::stdin();
    let mut input = stdin.lock();

    match run_workflow(&repo, &workflow_args, &mut input)? {
        WorkflowOutcome::Created { tag, pushed: true } => {
            println!(
                "\n{} Successfully published tag {} to {}\n",
                console::style("✓").green(),
                tag,
                workflow_args.remote
            );
        }
        WorkflowOutcome::Created { tag, pushed: false } => {
            println!(
                "\n{} Tag {} created locally\n",
                console::style("✓").green(),
                tag
            );
        }
        WorkflowOutcome::Cancelled { .. } => {
            println!("Tag creation cancelled.");
        }
        WorkflowOutcome::DryRun { .. } => {}
    }

    Ok(())
}
