use crate::models::Tag;
use std::collections::HashSet;

/// Tag names present in both sequences
///
/// Names are compared exactly, weights are ignored. The result follows the
/// order of `b` and holds each name once.
pub fn common_tags<'b>(a: &[Tag], b: &'b [Tag]) -> Vec<&'b str> {
    let names_a: HashSet<&str> = a.iter().map(|t| t.name.as_str()).collect();
    let mut seen = HashSet::new();

    b.iter()
        .map(|t| t.name.as_str())
        .filter(|name| names_a.contains(name) && seen.insert(*name))
        .collect()
}

/// Number of distinct tag names shared by both sequences
#[inline]
pub fn common_tag_count(a: &[Tag], b: &[Tag]) -> usize {
    common_tags(a, b).len()
}
