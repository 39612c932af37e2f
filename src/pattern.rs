//! `{level}` template expansion for file and directory names.

/// Placeholder substituted with the level number.
pub const LEVEL_PLACEHOLDER: &str = "{level}";

/// Expand the first `{level}` in `pattern`; literal patterns come back verbatim.
pub fn expand_pattern(pattern: &str, level: u32) -> String {
    pattern.replacen(LEVEL_PLACEHOLDER, &level.to_string(), 1)
}

pub fn placeholder_count(pattern: &str) -> usize {
    pattern.matches(LEVEL_PLACEHOLDER).count()
}

/// Expand every pattern for one level, preserving configured order.
pub fn expand_all(patterns: &[String], level: u32) -> Vec<String> {
    patterns
        .iter()
        .map(|pattern| expand_pattern(pattern, level))
        .collect()
}
