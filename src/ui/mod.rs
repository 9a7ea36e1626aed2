//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Display functions
//! - This module - Interactive prompts and user input handling

use std::io::{self, BufRead, Write};

use crate::error::Result;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_boundary_warning, display_commit_log, display_error, display_manual_push_instruction,
    display_proposed_tag, display_status, display_success, format_boundary_warning,
    format_commit_log,
};

/// Whether a line of input counts as a "yes".
///
/// Only "y" or "yes" after trimming and lowercasing; everything else,
/// including an empty line, is a "no".
pub fn is_affirmative(input: &str) -> bool {
    let response = input.trim().to_lowercase();
    response == "y" || response == "yes"
}

/// Prompts on stdout and reads one line of confirmation from `input`.
///
/// Default is "no" if the user presses Enter or input is at EOF.
///
/// # Returns
/// * `Ok(true)` - If user entered "y" or "yes"
/// * `Ok(false)` - Otherwise
/// * `Err` - If reading input fails
pub fn confirm_action<R: BufRead>(input: &mut R, prompt: &str) -> Result<bool> {
    print!("\n{} [y/N]: ", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    Ok(is_affirmative(&line))
}

/// Asks whether the candidate tag should be created.
pub fn confirm_tag_creation<R: BufRead>(input: &mut R, tag: &str) -> Result<bool> {
    confirm_action(input, &format!("Create new tag {}?", tag))
}
