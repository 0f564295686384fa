use std::fmt;

/// Non-fatal conditions surfaced while reconciling version and tag state.
/// These are reported to the user but do not abort the workflow on their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundaryWarning {
    /// Working tree is dirty while previewing a bump
    DirtyWorkingTree,
    /// HEAD already carries version tags
    TagsAlreadyOnHead { tags: Vec<String> },
    /// No target branch was given; the bump proceeds on the current branch
    NoBranchSpecified { current: String },
    /// The configured remote is missing or unreachable; push is skipped
    RemoteUnreachable { remote: String },
    /// A tag fetch was rejected because a local tag diverged from the remote
    TagClobberDetected { remote: String },
    /// Candidate versions were taken by tags pointing at other commits
    VersionsSkipped { versions: Vec<String> },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::DirtyWorkingTree => {
                write!(f, "Working directory has uncommitted changes")
            }
            BoundaryWarning::TagsAlreadyOnHead { tags } => {
                write!(
                    f,
                    "Current commit already has version tags: {}",
                    tags.join(", ")
                )
            }
            BoundaryWarning::NoBranchSpecified { current } => {
                write!(f, "No branch specified, tagging current branch '{}'", current)
            }
            BoundaryWarning::RemoteUnreachable { remote } => {
                write!(
                    f,
                    "Remote '{}' is missing or unreachable, skipping push (tag remains local)",
                    remote
                )
            }
            BoundaryWarning::TagClobberDetected { remote } => {
                write!(
                    f,
                    "Local tag diverged from '{}', retrying fetch with --force",
                    remote
                )
            }
            BoundaryWarning::VersionsSkipped { versions } => {
                write!(
                    f,
                    "Skipped versions already tagged elsewhere: {}",
                    versions.join(", ")
                )
            }
        }
    }
}
