/// Exact literal substring matching over the full contents held in memory.
/// No pattern language, no whitespace relaxation, no line ending
/// normalization: a CRLF embedded in the needle only matches a CRLF in the
/// haystack. An empty needle never matches.
pub fn contains_literal(haystack: &str, needle: &str) -> bool {
    !needle.is_empty() && haystack.contains(needle)
}

/// Number of non-overlapping occurrences of `needle` in `haystack`.
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count()
}
