//! Version bump planning.
//!
//! Computes the next version for a bump, auto-incrementing past versions
//! already claimed by tags on other commits, and validates that the result
//! is a sane progression from the current version.

use crate::discovery;
use crate::domain::{BumpKind, SemanticVersion};
use crate::error::{Result, TagBumpError};
use crate::git::CommandRunner;

/// Upper bound on collision auto-increment attempts. Exceeding it means the
/// tag namespace is saturated in a way no release flow produces legitimately.
pub const MAX_AUTO_INCREMENT_ATTEMPTS: u32 = 100;

/// Result of planning a bump from the current version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpPlan {
    pub current: SemanticVersion,
    pub kind: BumpKind,
    /// The version to release
    pub final_version: SemanticVersion,
    /// Candidates rejected because a tag of that name points at another commit
    pub skipped: Vec<SemanticVersion>,
    /// The final tag already exists and points at HEAD; nothing to create
    pub reuse_existing: bool,
}

/// Compute the next version for `kind`, skipping past tags that already
/// exist on other commits.
///
/// Collisions are resolved by re-applying the SAME bump type, never by
/// downgrading to a patch bump to fill a gap: parallel branches may have
/// claimed `v1.4.0`, and a minor bump from `v1.3.0` must then land on
/// `v1.5.0`, not `v1.4.1`. A candidate whose tag already points at HEAD is
/// reused idempotently.
pub fn plan_bump(
    runner: &dyn CommandRunner,
    current: &SemanticVersion,
    kind: BumpKind,
) -> Result<BumpPlan> {
    let mut candidate = current.bump(kind);
    let mut skipped = Vec::new();

    for _ in 0..MAX_AUTO_INCREMENT_ATTEMPTS {
        let name = candidate.to_string();

        // Queried fresh each round; fetches may have changed the namespace
        let local = discovery::local_tags(runner)?;
        if !local.iter().any(|tag| tag == &name) {
            return Ok(BumpPlan {
                current: current.clone(),
                kind,
                final_version: candidate,
                skipped,
                reuse_existing: false,
            });
        }

        let head_tags = discovery::tags_on_head(runner)?;
        if head_tags.iter().any(|tag| tag == &name) {
            return Ok(BumpPlan {
                current: current.clone(),
                kind,
                final_version: candidate,
                skipped,
                reuse_existing: true,
            });
        }

        skipped.push(candidate.clone());
        candidate = candidate.bump(kind);
    }

    Err(TagBumpError::MaxAutoIncrementAttempts(
        MAX_AUTO_INCREMENT_ATTEMPTS,
    ))
}

/// Check that `new` is exactly one `kind` step from `current`.
///
/// Callers skip this when the planner auto-incremented past collisions,
/// since those results diverge from a single step by design.
pub fn validate_progression(
    current: &SemanticVersion,
    new: &SemanticVersion,
    kind: BumpKind,
) -> Result<()> {
    let expected = current.bump(kind);
    if *new != expected {
        return Err(TagBumpError::IllogicalVersionJump {
            current: current.to_string(),
            expected: expected.to_string(),
            actual: new.to_string(),
        });
    }
    Ok(())
}

/// Heuristic guard against environment contamination: a patch bump must not
/// raise the major version, and no bump should raise it by more than one.
pub fn check_unexpected_jump(
    current: &SemanticVersion,
    new: &SemanticVersion,
    kind: BumpKind,
) -> Result<()> {
    if kind == BumpKind::Patch && new.major > current.major {
        return Err(TagBumpError::UnexpectedMajorJump {
            from: current.to_string(),
            to: new.to_string(),
            bump: kind.to_string(),
        });
    }

    let delta = new.major.saturating_sub(current.major);
    if delta > 1 {
        return Err(TagBumpError::OversizedVersionJump {
            from: current.to_string(),
            to: new.to_string(),
            delta,
        });
    }

    Ok(())
}
