//! Pure formatting functions for terminal output.
//!
//! All display logic lives here, separated from workflow decisions, so the
//! workflow modules stay testable without capturing stdout.

use console::style;

use crate::boundary::BoundaryWarning;

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

/// Display a boundary warning with a yellow warning icon.
pub fn display_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Print a bold section header.
pub fn display_header(title: &str) {
    println!("\n{}", style(title).bold());
}

/// Display the proposed version change (or the initial version).
pub fn display_proposed_bump(previous: &str, next: &str, bump: &str) {
    println!("\n{}", style("Proposed Version Change:").bold());
    println!("  From: {}", style(previous).red());
    println!("  To:   {}", style(next).green());
    println!("  Bump: {}", bump);
}

/// Display the dry-run plan: what would be executed, without running it.
pub fn display_dry_run_plan(previous: &str, next: &str, bump: &str, message: &str, push: bool, remote: &str) {
    println!("\n{}", style("Dry-run summary:").bold());
    println!("  Current version: {}", previous);
    println!("  New version:     {}", next);
    println!("  Bump type:       {}", bump);
    println!("\n{}", style("Commands that would be executed:").bold());
    println!("  git tag -a {} -m \"{}\"", next, message);
    if push {
        println!("  git push {} {}", remote, next);
    } else {
        println!("\n{} Tag would be created locally only", style("→").yellow());
        println!("  To push: git push {} {}", remote, next);
    }
    display_success("Dry-run completed - no changes made");
}

/// Display the git command needed to push a locally created tag later.
pub fn display_manual_push_instruction(tag: &str, remote: &str) {
    println!(
        "\n{} To push this tag later, run:\n  {}",
        style("→").yellow(),
        style(format!("git push {} {}", remote, tag)).cyan()
    );
}
