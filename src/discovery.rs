//! Tag discovery - read-only queries over git state.
//!
//! Every function queries git fresh on each call; tag state is never cached
//! because it may change between invocations (fetch, commit, tag).

use crate::domain::tag;
use crate::error::Result;
use crate::git::CommandRunner;

/// Outcome of the nearest-tag describe fallback chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescribeOutcome {
    /// A reachable tag was found, `distance` commits behind HEAD
    Tagged { tag: String, distance: u64 },
    /// No tags are reachable from HEAD
    NoTags,
}

/// Find the nearest reachable tag via `git describe`.
///
/// Tries the long form first (`TAG-N-gSHA`, which carries the distance),
/// falls back to a plain describe with the distance recovered through
/// `git rev-list --count`, and reports [DescribeOutcome::NoTags] when both
/// fail.
pub fn describe_nearest(runner: &dyn CommandRunner) -> DescribeOutcome {
    if let Ok(output) = runner.run_cmd_output("git", &["describe", "--tags", "--long", "--abbrev=0"])
    {
        let described = output.trim();
        if !described.is_empty() {
            if let Some(outcome) = parse_long_describe(described) {
                return outcome;
            }
        }
    }

    let tag = match runner.run_cmd_output("git", &["describe", "--tags", "--abbrev=0"]) {
        Ok(output) if !output.trim().is_empty() => output.trim().to_string(),
        _ => return DescribeOutcome::NoTags,
    };

    let distance = distance_from(runner, &tag);
    DescribeOutcome::Tagged { tag, distance }
}

/// Parse `v1.3.0-22-gabcdef` into a tag and its distance from HEAD.
/// The tag itself may contain hyphens (pre-release suffixes), so the split
/// works from the right.
fn parse_long_describe(described: &str) -> Option<DescribeOutcome> {
    let mut parts = described.rsplitn(3, '-');
    let sha = parts.next()?;
    let count = parts.next()?;
    let tag = parts.next()?;

    if !sha.starts_with('g') {
        return None;
    }
    let distance = count.parse::<u64>().ok()?;

    Some(DescribeOutcome::Tagged {
        tag: tag.to_string(),
        distance,
    })
}

fn distance_from(runner: &dyn CommandRunner, tag: &str) -> u64 {
    let range = format!("{}..HEAD", tag);
    runner
        .run_cmd_output("git", &["rev-list", "--count", &range])
        .ok()
        .and_then(|out| out.trim().parse::<u64>().ok())
        .unwrap_or(0)
}

/// The "current" version tag, or `None` when the project has never been
/// tagged (callers default to `v0.0.0`).
///
/// Prefers the highest version tag pointing exactly at HEAD, then the
/// nearest reachable tag via the describe chain.
pub fn current_tag(runner: &dyn CommandRunner) -> Option<String> {
    if let Ok(output) =
        runner.run_cmd_output("git", &["tag", "--sort=-version:refname", "--points-at", "HEAD"])
    {
        if let Some(first) = output.lines().map(str::trim).find(|l| !l.is_empty()) {
            return Some(first.to_string());
        }
    }

    match describe_nearest(runner) {
        DescribeOutcome::Tagged { tag, .. } => Some(tag),
        DescribeOutcome::NoTags => None,
    }
}

/// All version tags pointing at HEAD, highest first.
///
/// Non-version tags (anything not matching `v<digit>...`) are excluded.
/// An empty result is not an error; a failing tag query is.
pub fn tags_on_head(runner: &dyn CommandRunner) -> Result<Vec<String>> {
    let output = runner.run_cmd_output("git", &["tag", "--points-at", "HEAD"])?;

    let mut tags: Vec<String> = output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && tag::is_version_tag(line))
        .map(str::to_string)
        .collect();
    tag::sort_descending(&mut tags);
    Ok(tags)
}

/// Full local tag list, version-sorted descending by git.
pub fn local_tags(runner: &dyn CommandRunner) -> Result<Vec<String>> {
    let output = runner.run_cmd_output("git", &["tag", "--sort=-version:refname"])?;
    Ok(output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// The tag preceding the most recent one, used as the default changelog base.
pub fn previous_tag(runner: &dyn CommandRunner) -> Option<String> {
    let tags = local_tags(runner).ok()?;
    tags.get(1).cloned()
}

/// Whether the working directory has uncommitted changes.
pub fn is_dirty(runner: &dyn CommandRunner) -> bool {
    matches!(
        runner.run_cmd_output("git", &["status", "--porcelain"]),
        Ok(output) if !output.trim().is_empty()
    )
}

/// Whether the current directory is inside a git repository.
pub fn is_git_repo(runner: &dyn CommandRunner) -> bool {
    runner.run_cmd("git", &["rev-parse", "--git-dir"]).is_ok()
}

/// Short hash of HEAD, or "unknown" if git cannot answer.
pub fn head_commit(runner: &dyn CommandRunner) -> String {
    runner
        .run_cmd_output("git", &["rev-parse", "--short", "HEAD"])
        .map(|out| out.trim().to_string())
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Name of the currently checked-out branch.
pub fn current_branch(runner: &dyn CommandRunner) -> Result<String> {
    let output = runner.run_cmd_output("git", &["branch", "--show-current"])?;
    Ok(output.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockRunner;

    #[test]
    fn test_current_tag_multiple_tags_on_head() {
        let mock = MockRunner::new();
        mock.set_output(
            "git tag --sort=-version:refname --points-at HEAD",
            "v2.1.0\nv2.0.0\nv1.0.0\nv0.0.5",
        );

        assert_eq!(current_tag(&mock), Some("v2.1.0".to_string()));
    }

    #[test]
    fn test_current_tag_falls_back_to_long_describe() {
        let mock = MockRunner::new();
        mock.set_error("git tag --sort=-version:refname --points-at HEAD", "no tags");
        mock.set_output("git describe --tags --long --abbrev=0", "v1.3.27-3-gabcdef");

        assert_eq!(current_tag(&mock), Some("v1.3.27".to_string()));
    }

    #[test]
    fn test_current_tag_falls_back_to_plain_describe() {
        let mock = MockRunner::new();
        mock.set_error("git tag --sort=-version:refname --points-at HEAD", "no tags");
        mock.set_error("git describe --tags --long --abbrev=0", "unsupported");
        mock.set_output("git describe --tags --abbrev=0", "v0.0.5");

        assert_eq!(current_tag(&mock), Some("v0.0.5".to_string()));
    }

    #[test]
    fn test_current_tag_empty_head_list_uses_describe() {
        let mock = MockRunner::new();
        mock.set_output("git tag --sort=-version:refname --points-at HEAD", "");
        mock.set_error("git describe --tags --long --abbrev=0", "unsupported");
        mock.set_output("git describe --tags --abbrev=0", "v0.0.3");

        assert_eq!(current_tag(&mock), Some("v0.0.3".to_string()));
    }

    #[test]
    fn test_current_tag_no_tags_at_all() {
        let mock = MockRunner::new();
        mock.set_error("git tag --sort=-version:refname --points-at HEAD", "no tags");
        mock.set_error("git describe --tags --long --abbrev=0", "no tags");
        mock.set_error("git describe --tags --abbrev=0", "no tags");

        assert_eq!(current_tag(&mock), None);
    }

    #[test]
    fn test_describe_nearest_parses_distance() {
        let mock = MockRunner::new();
        mock.set_output("git describe --tags --long --abbrev=0", "v1.3.0-22-g78baa5e");

        assert_eq!(
            describe_nearest(&mock),
            DescribeOutcome::Tagged {
                tag: "v1.3.0".to_string(),
                distance: 22,
            }
        );
    }

    #[test]
    fn test_describe_nearest_prerelease_tag_with_hyphens() {
        let mock = MockRunner::new();
        mock.set_output(
            "git describe --tags --long --abbrev=0",
            "v1.3.0-rc.1-5-gabcdef",
        );

        assert_eq!(
            describe_nearest(&mock),
            DescribeOutcome::Tagged {
                tag: "v1.3.0-rc.1".to_string(),
                distance: 5,
            }
        );
    }

    #[test]
    fn test_describe_nearest_recovers_distance_via_rev_list() {
        let mock = MockRunner::new();
        mock.set_error("git describe --tags --long --abbrev=0", "unsupported");
        mock.set_output("git describe --tags --abbrev=0", "v1.0.6");
        mock.set_output("git rev-list --count v1.0.6..HEAD", "7");

        assert_eq!(
            describe_nearest(&mock),
            DescribeOutcome::Tagged {
                tag: "v1.0.6".to_string(),
                distance: 7,
            }
        );
    }

    #[test]
    fn test_tags_on_head_filters_non_version_tags() {
        let mock = MockRunner::new();
        mock.set_output(
            "git tag --points-at HEAD",
            "v1.0.0\nv2.0.0\nrelease-tag\nv3.0.0",
        );

        let tags = tags_on_head(&mock).unwrap();
        assert_eq!(tags, vec!["v3.0.0", "v2.0.0", "v1.0.0"]);
    }

    #[test]
    fn test_tags_on_head_mixed_tags() {
        let mock = MockRunner::new();
        mock.set_output(
            "git tag --points-at HEAD",
            "v1.0.0\nbuild-123\nvX.Y.Z\nv2.0.0\nfeature-tag",
        );

        let tags = tags_on_head(&mock).unwrap();
        assert_eq!(tags, vec!["v2.0.0", "v1.0.0"]);
    }

    #[test]
    fn test_tags_on_head_empty_is_not_an_error() {
        let mock = MockRunner::new();
        mock.set_output("git tag --points-at HEAD", "");

        assert!(tags_on_head(&mock).unwrap().is_empty());
    }

    #[test]
    fn test_tags_on_head_propagates_query_failure() {
        let mock = MockRunner::new();
        mock.set_error("git tag --points-at HEAD", "fatal: not a git repository");

        assert!(tags_on_head(&mock).is_err());
    }

    #[test]
    fn test_previous_tag() {
        let mock = MockRunner::new();
        mock.set_output("git tag --sort=-version:refname", "v2.0.0\nv1.5.0\nv1.0.0");
        assert_eq!(previous_tag(&mock), Some("v1.5.0".to_string()));
    }

    #[test]
    fn test_previous_tag_single_tag() {
        let mock = MockRunner::new();
        mock.set_output("git tag --sort=-version:refname", "v1.0.0");
        assert_eq!(previous_tag(&mock), None);
    }

    #[test]
    fn test_is_dirty() {
        let mock = MockRunner::new();
        mock.set_output("git status --porcelain", "M file.txt");
        assert!(is_dirty(&mock));

        let clean = MockRunner::new();
        clean.set_output("git status --porcelain", "");
        assert!(!is_dirty(&clean));
    }

    #[test]
    fn test_head_commit_unknown_on_failure() {
        let mock = MockRunner::new();
        mock.set_error("git rev-parse --short HEAD", "not a git repository");
        assert_eq!(head_commit(&mock), "unknown");
    }
}
