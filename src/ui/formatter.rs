//! Pure formatting functions for UI output.
//!
//! This module contains all display logic separated from user interaction.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::git::CommitSummary;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Render a boundary warning as a single line.
pub fn format_boundary_warning(warning: &BoundaryWarning) -> String {
    format!("{} {}", style("⚠ WARNING:").yellow(), warning)
}

/// Display a boundary warning to the user.
///
/// These are informational notices and go to stdout; stderr is kept for errors.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    println!("{}", format_boundary_warning(warning));
}

/// Render the commit listing shown before confirmation.
///
/// Returns `None` when there is nothing to list; the caller reports that
/// case as a boundary warning instead.
pub fn format_commit_log(since: Option<&str>, commits: &[CommitSummary]) -> Option<String> {
    if commits.is_empty() {
        return None;
    }

    let header = match since {
        Some(tag) => format!("Changes since {}:", tag),
        None => "Changes (no previous tag):".to_string(),
    };

    let mut out = style(header).bold().to_string();
    for commit in commits {
        out.push_str(&format!(
            "\n  {} {}",
            style(&commit.hash).dim(),
            commit.subject
        ));
    }
    Some(out)
}

/// Display the commits between the latest tag and HEAD.
pub fn display_commit_log(since: Option<&str>, commits: &[CommitSummary]) {
    if let Some(listing) = format_commit_log(since, commits) {
        println!("\n{}", listing);
    }
}

/// Display the proposed tag change.
///
/// # Arguments
/// * `old_tag` - Latest existing tag (None if the repository had no tags)
/// * `new_tag` - The new tag being proposed
pub fn display_proposed_tag(old_tag: Option<&str>, new_tag: &str) {
    match old_tag {
        Some(old) => {
            println!("\n{}", style("Proposed Tag Change:").bold());
            println!("  From: {}", style(old).red());
            println!("  To:   {}", style(new_tag).green());
        }
        None => {
            println!("\n{}", style("Initial Tag:").bold());
            println!("  New tag: {}", style(new_tag).green());
        }
    }
}

/// Display manual push instruction for a tag.
pub fn display_manual_push_instruction(tag: &str, remote: &str) {
    println!(
        "\n{} The tag '{}' was kept locally. To push it later, run:\n  {}",
        style("→").yellow(),
        tag,
        style(format!("git push {} {}", remote, tag)).cyan()
    );
}
