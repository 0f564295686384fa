use thiserror::Error;

/// Unified error type for git-tagbump operations.
///
/// Each variant corresponds to one failure class so callers can match on
/// kind instead of sniffing message text.
#[derive(Error, Debug)]
pub enum TagBumpError {
    #[error("Invalid version format: '{input}' - expected X.Y.Z")]
    InvalidFormat { input: String },

    #[error("Invalid major version '{segment}' in '{input}'")]
    InvalidMajor { segment: String, input: String },

    #[error("Invalid minor version '{segment}' in '{input}'")]
    InvalidMinor { segment: String, input: String },

    #[error("Invalid patch version '{segment}' in '{input}'")]
    InvalidPatch { segment: String, input: String },

    #[error("Invalid bump type '{0}' (must be major, minor, or patch)")]
    InvalidBumpType(String),

    #[error("Working directory has uncommitted changes")]
    UncommittedChanges,

    #[error("Current commit already has version tags: {tags}")]
    MultipleTagsOnCommit { tags: String },

    #[error("Version jump appears illogical: expected {current} -> {expected}, got {actual}")]
    IllogicalVersionJump {
        current: String,
        expected: String,
        actual: String,
    },

    #[error("Unexpected major version jump from {from} to {to} when bump={bump}")]
    UnexpectedMajorJump {
        from: String,
        to: String,
        bump: String,
    },

    #[error(
        "Unexpectedly large version jump from {from} to {to} (major version increased by {delta})"
    )]
    OversizedVersionJump { from: String, to: String, delta: u64 },

    #[error("Major version bump requires explicit confirmation (pass major-confirm)")]
    MajorBumpRequiresConfirm,

    #[error("Version bump blocked by safety check: {reason} (pass force to override)")]
    VersionBumpBlocked { reason: String },

    #[error("Gave up searching for a free tag after {0} auto-increment attempts")]
    MaxAutoIncrementAttempts(u32),

    #[error("Tag {tag} already exists on remote '{remote}' - fetch and re-run the bump, or remove the remote tag first")]
    TagAlreadyExistsOnRemote { tag: String, remote: String },

    #[error("Branch '{0}' not found locally or on the remote")]
    BranchNotFound(String),

    #[error("Git command failed: {command}: {message}")]
    Git { command: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-tagbump
pub type Result<T> = std::result::Result<T, TagBumpError>;

impl TagBumpError {
    /// Create a git command error with the failing command line attached
    pub fn git(command: impl Into<String>, message: impl Into<String>) -> Self {
        TagBumpError::Git {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        TagBumpError::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TagBumpError::config("missing remote");
        assert_eq!(err.to_string(), "Configuration error: missing remote");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TagBumpError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_git_error_carries_command() {
        let err = TagBumpError::git("git fetch --tags origin", "network error");
        let msg = err.to_string();
        assert!(msg.contains("git fetch --tags origin"));
        assert!(msg.contains("network error"));
    }

    #[test]
    fn test_segment_errors_name_the_segment() {
        let err = TagBumpError::InvalidMinor {
            segment: "b".to_string(),
            input: "v1.b.3".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'b'"));
        assert!(msg.contains("v1.b.3"));
    }

    #[test]
    fn test_remote_tag_error_has_remediation() {
        let err = TagBumpError::TagAlreadyExistsOnRemote {
            tag: "v1.4.0".to_string(),
            remote: "origin".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("already exists on remote"));
        assert!(msg.contains("v1.4.0"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (
                TagBumpError::UncommittedChanges,
                "Working directory has uncommitted changes",
            ),
            (
                TagBumpError::MajorBumpRequiresConfirm,
                "Major version bump requires explicit confirmation",
            ),
            (
                TagBumpError::InvalidBumpType("hotfix".to_string()),
                "Invalid bump type 'hotfix'",
            ),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
