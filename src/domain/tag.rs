use crate::domain::version::SemanticVersion;

/// Check whether a tag name looks like a version tag (`v` followed by a digit).
///
/// Tags that fail this filter (e.g. `release-tag`, `build-123`) are invisible
/// to discovery and the bump planner.
pub fn is_version_tag(tag: &str) -> bool {
    if let Ok(re) = regex::Regex::new(r"^v\d") {
        re.is_match(tag)
    } else {
        false
    }
}

/// Sort tag names descending by version precedence.
///
/// Tags that pass the `v<digit>` filter but do not parse as full semantic
/// versions sink to the end, keeping their relative order.
pub fn sort_descending(tags: &mut [String]) {
    tags.sort_by(|a, b| {
        let pa = SemanticVersion::parse(a).ok();
        let pb = SemanticVersion::parse(b).ok();
        match (pa, pb) {
            (Some(va), Some(vb)) => vb.cmp(&va),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        }
    });
}
