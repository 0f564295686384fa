//! Branch and remote reconciliation.
//!
//! Optional branch switching with guaranteed checkout-back on exit, tag
//! fetching with clobber recovery, and remote-side tag checks performed
//! before any push.

use crate::boundary::BoundaryWarning;
use crate::discovery;
use crate::error::{Result, TagBumpError};
use crate::git::CommandRunner;
use crate::ui;

/// Restores the original branch when dropped.
///
/// Created by [reconcile_branch]; holds a branch name only when a checkout
/// actually happened, so drops after same-branch, no-target and dry-run
/// flows are no-ops. Restore failures are reported but cannot propagate
/// out of `drop`.
pub struct BranchGuard<'a> {
    runner: &'a dyn CommandRunner,
    restore: Option<String>,
}

impl std::fmt::Debug for BranchGuard<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BranchGuard")
            .field("restore", &self.restore)
            .finish()
    }
}

impl<'a> BranchGuard<'a> {
    fn noop(runner: &'a dyn CommandRunner) -> Self {
        BranchGuard {
            runner,
            restore: None,
        }
    }

    /// The branch this guard will check out on drop, if any
    pub fn restores_to(&self) -> Option<&str> {
        self.restore.as_deref()
    }
}

impl Drop for BranchGuard<'_> {
    fn drop(&mut self) {
        if let Some(branch) = self.restore.take() {
            ui::display_status(&format!("Returning to branch '{}'", branch));
            if let Err(err) = self.runner.run_cmd("git", &["checkout", &branch]) {
                ui::display_error(&format!(
                    "Could not return to branch '{}': {}",
                    branch, err
                ));
            }
        }
    }
}

/// Prepare the requested branch for tagging.
///
/// - no target: warn and stay on the current branch
/// - target is the current branch: fetch and rebase-pull for freshness
/// - target differs: verify it exists, check it out, fetch and rebase-pull,
///   and arm the returned guard so the original branch is restored on exit
///   whatever happens downstream
///
/// Under dry-run every transition only logs its intended action.
pub fn reconcile_branch<'a>(
    runner: &'a dyn CommandRunner,
    remote: &str,
    target: Option<&str>,
    dry_run: bool,
) -> Result<BranchGuard<'a>> {
    let current = discovery::current_branch(runner)?;

    let target = match target {
        None => {
            ui::display_warning(&BoundaryWarning::NoBranchSpecified {
                current: current.clone(),
            });
            return Ok(BranchGuard::noop(runner));
        }
        Some(target) => target,
    };

    if target == current.as_str() {
        if dry_run {
            ui::display_status(&format!(
                "Would fetch tags and rebase-pull '{}' from {}",
                target, remote
            ));
        } else {
            pull_latest(runner, remote)?;
        }
        return Ok(BranchGuard::noop(runner));
    }

    let location = locate_branch(runner, remote, target)?;
    if location == BranchLocation::Missing {
        return Err(TagBumpError::BranchNotFound(target.to_string()));
    }

    if dry_run {
        ui::display_status(&format!(
            "Would check out '{}', pull latest, then return to '{}'",
            target, current
        ));
        return Ok(BranchGuard::noop(runner));
    }

    match location {
        BranchLocation::Local => runner.run_cmd("git", &["checkout", target])?,
        BranchLocation::RemoteOnly => {
            let tracking = format!("{}/{}", remote, target);
            runner.run_cmd("git", &["checkout", "-b", target, &tracking])?;
        }
        BranchLocation::Missing => unreachable!(),
    }

    // Armed before the pull so a pull failure still checks the caller back out
    let guard = BranchGuard {
        runner,
        restore: Some(current),
    };
    pull_latest(runner, remote)?;
    Ok(guard)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BranchLocation {
    Local,
    RemoteOnly,
    Missing,
}

fn locate_branch(
    runner: &dyn CommandRunner,
    remote: &str,
    target: &str,
) -> Result<BranchLocation> {
    let output = runner.run_cmd_output("git", &["branch", "-a"])?;
    let tracking = format!("remotes/{}/{}", remote, target);

    let mut location = BranchLocation::Missing;
    for line in output.lines() {
        let name = line.trim().trim_start_matches("* ").trim();
        if name == target {
            return Ok(BranchLocation::Local);
        }
        if name == tracking {
            location = BranchLocation::RemoteOnly;
        }
    }
    Ok(location)
}

/// Fetch tags and rebase-pull from the remote.
///
/// A fetch rejected with git's "would clobber existing tag" signature is
/// retried once with a forced tag fetch, accepting the remote tag object as
/// authoritative. Any other fetch failure is fatal.
pub fn pull_latest(runner: &dyn CommandRunner, remote: &str) -> Result<()> {
    if let Err(err) = runner.run_cmd("git", &["fetch", "--tags", remote]) {
        if is_tag_clobber(&err) {
            ui::display_warning(&BoundaryWarning::TagClobberDetected {
                remote: remote.to_string(),
            });
            runner
                .run_cmd("git", &["fetch", "--tags", "--force", remote])
                .map_err(|e| fetch_failure(remote, &e))?;
        } else {
            return Err(fetch_failure(remote, &err));
        }
    }

    runner.run_cmd("git", &["pull", "--rebase", remote])
}

fn fetch_failure(remote: &str, err: &TagBumpError) -> TagBumpError {
    let detail = match err {
        TagBumpError::Git { message, .. } => message.clone(),
        other => other.to_string(),
    };
    TagBumpError::git(
        format!("git fetch --tags {}", remote),
        format!("failed to fetch from {}: {}", remote, detail),
    )
}

fn is_tag_clobber(err: &TagBumpError) -> bool {
    matches!(err, TagBumpError::Git { message, .. } if message.contains("would clobber existing tag"))
}

/// Whether the remote is configured and answers a lightweight query.
pub fn remote_reachable(runner: &dyn CommandRunner, remote: &str) -> bool {
    let configured = match runner.run_cmd_output("git", &["remote", "-v"]) {
        Ok(output) => output
            .lines()
            .any(|line| line.split_whitespace().next() == Some(remote)),
        Err(_) => false,
    };
    if !configured {
        return false;
    }

    runner
        .run_cmd_output("git", &["ls-remote", "--exit-code", remote, "HEAD"])
        .is_ok()
}

/// Whether a tag of this name already exists on the remote.
pub fn tag_exists_on_remote(
    runner: &dyn CommandRunner,
    remote: &str,
    tag: &str,
) -> Result<bool> {
    let output = runner.run_cmd_output("git", &["ls-remote", "--tags", remote, tag])?;
    Ok(!output.trim().is_empty())
}
