//! Workflow orchestration for the version namespace.
//!
//! Sequences discovery, planning and reconciliation into the bump state
//! machine, and hosts the smaller changelog and show flows. All decisions
//! come from the injected [CommandRunner] and the resolved option structs;
//! nothing here reads the environment.

use crate::boundary::BoundaryWarning;
use crate::config::{BumpOptions, ChangelogOptions, Config};
use crate::discovery;
use crate::domain::{BumpKind, SemanticVersion};
use crate::error::{Result, TagBumpError};
use crate::git::CommandRunner;
use crate::planner;
use crate::reconcile;
use crate::ui;

/// Result of a bump workflow run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpOutcome {
    /// Version the bump started from (`v0.0.0` for a never-tagged repo)
    pub previous: String,
    /// Version that was (or would be) released
    pub version: String,
    pub kind: BumpKind,
    /// Candidates skipped because their tags point at other commits
    pub skipped: Vec<String>,
    /// Whether a new tag was created (false on reuse and dry-run)
    pub created: bool,
    /// Whether the tag was pushed to the remote
    pub pushed: bool,
    pub dry_run: bool,
}

/// Run the version bump workflow.
///
/// Step order: major-confirm gate, clean-tree check, existing-HEAD-tag
/// check, current-version discovery, collision-aware planning, optional
/// branch reconciliation, jump validation, then either the dry-run report
/// or tag creation and optional push. Precondition failures downgrade to
/// warnings under dry-run so a preview always works.
pub fn run_bump_workflow(
    runner: &dyn CommandRunner,
    config: &Config,
    options: &BumpOptions,
) -> Result<BumpOutcome> {
    ui::display_header("Bumping Version");

    if options.dry_run {
        ui::display_status("Running in dry-run mode - no changes will be made");
    }

    if options.kind == BumpKind::Major && !options.dry_run && !options.major_confirm {
        if let Some(tag) = discovery::current_tag(runner) {
            if let Ok(current) = SemanticVersion::parse(&tag) {
                ui::display_status(&format!(
                    "A major bump would release {} -> {} (a breaking change)",
                    current,
                    current.bump(BumpKind::Major)
                ));
            }
        }
        return Err(TagBumpError::MajorBumpRequiresConfirm);
    }

    if discovery::is_dirty(runner) {
        if options.dry_run {
            ui::display_warning(&BoundaryWarning::DirtyWorkingTree);
        } else {
            return Err(TagBumpError::UncommittedChanges);
        }
    }

    let head_tags = discovery::tags_on_head(runner)?;
    if !head_tags.is_empty() {
        ui::display_warning(&BoundaryWarning::TagsAlreadyOnHead {
            tags: head_tags.clone(),
        });
        if !options.dry_run {
            return Err(TagBumpError::MultipleTagsOnCommit {
                tags: head_tags.join(", "),
            });
        }
    }

    let current = match discovery::current_tag(runner) {
        Some(tag) => SemanticVersion::parse(&tag)?,
        None => {
            ui::display_status("No previous tags found, starting from v0.0.0");
            SemanticVersion::new(0, 0, 0)
        }
    };

    let plan = planner::plan_bump(runner, &current, options.kind)?;
    if !plan.skipped.is_empty() {
        ui::display_warning(&BoundaryWarning::VersionsSkipped {
            versions: plan.skipped.iter().map(ToString::to_string).collect(),
        });
    }

    // Held until return so the original branch is restored on every path
    let _guard = reconcile::reconcile_branch(
        runner,
        &config.remote,
        options.branch.as_deref(),
        options.dry_run,
    )?;

    // Collision skips are expected to diverge from a single step, so the
    // progression checks only run on unskipped plans
    if plan.skipped.is_empty() && !options.dry_run {
        planner::validate_progression(&current, &plan.final_version, options.kind)?;
        if let Err(anomaly) =
            planner::check_unexpected_jump(&current, &plan.final_version, options.kind)
        {
            if options.force {
                ui::display_status(&format!(
                    "Proceeding despite safety check (force set): {}",
                    anomaly
                ));
            } else {
                return Err(TagBumpError::VersionBumpBlocked {
                    reason: anomaly.to_string(),
                });
            }
        }
    }

    let previous = current.to_string();
    let next = plan.final_version.to_string();
    let message = config.format_tag_message(&next);
    let skipped: Vec<String> = plan.skipped.iter().map(ToString::to_string).collect();

    ui::display_proposed_bump(&previous, &next, &options.kind.to_string());

    if options.dry_run {
        ui::display_dry_run_plan(
            &previous,
            &next,
            &options.kind.to_string(),
            &message,
            options.push,
            &config.remote,
        );
        return Ok(BumpOutcome {
            previous,
            version: next,
            kind: options.kind,
            skipped,
            created: false,
            pushed: false,
            dry_run: true,
        });
    }

    let created = if plan.reuse_existing {
        ui::display_status(&format!("Tag {} already points at HEAD, reusing it", next));
        false
    } else {
        runner.run_cmd("git", &["tag", "-a", &next, "-m", &message])?;
        ui::display_success(&format!("Created tag: {}", next));
        true
    };

    let mut pushed = false;
    if options.push {
        if !reconcile::remote_reachable(runner, &config.remote) {
            ui::display_warning(&BoundaryWarning::RemoteUnreachable {
                remote: config.remote.clone(),
            });
            ui::display_manual_push_instruction(&next, &config.remote);
        } else if reconcile::tag_exists_on_remote(runner, &config.remote, &next)? {
            return Err(TagBumpError::TagAlreadyExistsOnRemote {
                tag: next,
                remote: config.remote.clone(),
            });
        } else {
            ui::display_status("Pushing tag to remote...");
            if let Err(err) = runner.run_cmd("git", &["push", &config.remote, &next]) {
                // The local tag stays; pushing later is always possible
                ui::display_manual_push_instruction(&next, &config.remote);
                return Err(err);
            }
            ui::display_success("Tag pushed to remote");
            pushed = true;
        }
    } else {
        ui::display_manual_push_instruction(&next, &config.remote);
    }

    Ok(BumpOutcome {
        previous,
        version: next,
        kind: options.kind,
        skipped,
        created,
        pushed,
        dry_run: false,
    })
}

/// Print the commit log between two tags.
pub fn run_changelog(runner: &dyn CommandRunner, options: &ChangelogOptions) -> Result<()> {
    ui::display_header("Generating Changelog");

    let from = options
        .from
        .clone()
        .or_else(|| discovery::previous_tag(runner));
    if from.is_none() {
        ui::display_status("No previous tag found, showing all commits");
    }

    let range = match &from {
        Some(from) => format!("{}..{}", from, options.to),
        None => options.to.clone(),
    };

    let output = runner.run_cmd_output("git", &["log", "--pretty=format:- %s (%h)", &range])?;

    match &from {
        Some(from) => println!("\n## Changes from {} to {}\n", from, options.to),
        None => println!("\n## All Changes\n"),
    }

    if output.trim().is_empty() {
        ui::display_status("No changes found");
    } else {
        println!("{}", output);
    }

    if let Ok(count) = runner.run_cmd_output("git", &["rev-list", "--count", &range]) {
        println!("\n{} commits", count.trim());
    }

    Ok(())
}

/// Print the current version, commit and working-tree state.
pub fn run_show(runner: &dyn CommandRunner) -> Result<()> {
    ui::display_header("Version Information");

    let version = discovery::current_tag(runner).unwrap_or_else(|| "dev".to_string());
    println!("Version: {}", version);
    println!("Commit:  {}", discovery::head_commit(runner));

    if discovery::is_git_repo(runner) && discovery::is_dirty(runner) {
        ui::display_warning(&BoundaryWarning::DirtyWorkingTree);
    }

    Ok(())
}
