//! Main workflow orchestration logic
//!
//! Takes the repository and the input stream as parameters so the whole
//! flow can run against [crate::git::MockRepository] and an in-memory reader.

use std::io::BufRead;

use tracing::info;

use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::domain::{BumpKind, Version, BASELINE_TAG};
use crate::error::Result;
use crate::git::TagRepository;
use crate::ui;

/// Arguments for the tagging workflow
///
/// The defaults (confirm, no push, show log) give the interactive
/// create-only flow; `confirm: false, push: true, show_log: false`
/// gives the unattended create-and-push flow.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowArgs {
    /// Requested bump kind, any case
    pub bump: String,
    /// Ask before creating the tag
    pub confirm: bool,
    /// Push the tag after creating it
    pub push: bool,
    /// List commits since the latest tag
    pub show_log: bool,
    /// Stop before creating anything
    pub dry_run: bool,
    /// Remote to push to
    pub remote: String,
}

impl WorkflowArgs {
    pub fn from_config(config: &Config) -> Self {
        WorkflowArgs {
            bump: config.default_bump.clone(),
            confirm: config.confirm,
            push: config.push,
            show_log: config.show_log,
            dry_run: false,
            remote: config.remote.clone(),
        }
    }
}

impl Default for WorkflowArgs {
    fn default() -> Self {
        WorkflowArgs::from_config(&Config::default())
    }
}

/// How a workflow run ended, short of an error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowOutcome {
    /// The tag was created, and pushed if requested
    Created { tag: String, pushed: bool },
    /// The user declined at the confirmation prompt
    Cancelled { tag: String },
    /// Dry run; nothing was created
    DryRun { tag: String },
}

impl WorkflowOutcome {
    pub fn tag(&self) -> &str {
        match self {
            WorkflowOutcome::Created { tag, .. }
            | WorkflowOutcome::Cancelled { tag }
            | WorkflowOutcome::DryRun { tag } => tag,
        }
    }
}

/// Picks the bump kind from the command line, falling back to `default`,
/// lowercased for [BumpKind]'s exact matching.
pub fn resolve_bump(arg: Option<&str>, default: &str) -> String {
    arg.unwrap_or(default).to_lowercase()
}

/// Main tagging workflow
///
/// 1. Fetch the latest tag (baseline `v0.0.0` when there are none)
/// 2. Parse it and apply the bump
/// 3. Optionally list commits since the latest tag
/// 4. Optionally confirm with the user
/// 5. Create the tag, then optionally push it
///
/// A push failure leaves the local tag in place; the error is returned
/// after printing how to push manually.
pub fn run_workflow<R, I>(repo: &R, args: &WorkflowArgs, input: &mut I) -> Result<WorkflowOutcome>
where
    R: TagRepository + ?Sized,
    I: BufRead,
{
    let bump = args.bump.to_lowercase();

    let previous_tag = repo.latest_tag()?;
    let latest_tag = match &previous_tag {
        Some(tag) => tag.clone(),
        None => {
            ui::display_boundary_warning(&BoundaryWarning::NoTagsYet {
                baseline: BASELINE_TAG.to_string(),
            });
            BASELINE_TAG.to_string()
        }
    };

    let current = Version::parse(&latest_tag)?;
    let kind: BumpKind = bump.parse()?;
    let new_tag = current.bump(kind)?.to_tag();
    info!(from = %latest_tag, to = %new_tag, %kind, "computed next tag");

    if args.show_log {
        let commits = repo.commits_since(previous_tag.as_deref())?;
        if commits.is_empty() {
            ui::display_boundary_warning(&BoundaryWarning::NoNewCommits {
                latest_tag: latest_tag.clone(),
            });
        } else {
            ui::display_commit_log(previous_tag.as_deref(), &commits);
        }
    }

    ui::display_proposed_tag(previous_tag.as_deref(), &new_tag);

    if args.dry_run {
        ui::display_status(&format!("Dry run: would create tag {}", new_tag));
        if args.push {
            ui::display_status(&format!("Dry run: would push {} to {}", new_tag, args.remote));
        }
        return Ok(WorkflowOutcome::DryRun { tag: new_tag });
    }

    if args.confirm && !ui::confirm_tag_creation(input, &new_tag)? {
        info!(tag = %new_tag, "tag creation declined");
        return Ok(WorkflowOutcome::Cancelled { tag: new_tag });
    }

    ui::display_status(&format!("Creating tag: {}", new_tag));
    repo.create_tag(&new_tag)?;
    ui::display_success(&format!("Created tag: {}", new_tag));

    if args.push {
        ui::display_status(&format!("Pushing tag {} to {}", new_tag, args.remote));
        if let Err(e) = repo.push_tag(&new_tag, &args.remote) {
            ui::display_manual_push_instruction(&new_tag, &args.remote);
            return Err(e);
        }
        ui::display_success(&format!("Pushed tag {} to {}", new_tag, args.remote));
    }

    Ok(WorkflowOutcome::Created {
        tag: new_tag,
        pushed: args.push,
    })
}
