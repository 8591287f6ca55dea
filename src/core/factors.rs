use crate::core::scoring::{location_match, LocationMatch};
use crate::core::tags::common_tags;
use crate::models::UserProfile;

/// Shared tags shown in the "shared tags" factor
pub const MAX_DISPLAYED_TAGS: usize = 3;

/// Human-readable reasons behind a match
///
/// Computed independently of the score so that externally scored candidates
/// get the same explanations. Order: location, age, shared tags.
pub fn match_factors(requester: &UserProfile, candidate: &UserProfile) -> Vec<String> {
    let mut factors = Vec::new();

    match location_match(requester, candidate) {
        LocationMatch::SameCity => factors.push("same city".to_string()),
        LocationMatch::SameState => factors.push("same state".to_string()),
        LocationMatch::None => {}
    }

    if matches!(requester.age_gap(candidate), Some(gap) if gap <= 2) {
        factors.push("age match".to_string());
    }

    let shared = common_tags(&requester.tags, &candidate.tags);
    if !shared.is_empty() {
        let shown: Vec<&str> = shared.into_iter().take(MAX_DISPLAYED_TAGS).collect();
        factors.push(format!("shared tags: {}", shown.join(", ")));
    }

    factors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tag;

    fn profile(city: Option<&str>, state: Option<&str>, age: Option<u32>, tags: &[&str]) -> UserProfile {
        UserProfile {
            id: "p".to_string(),
            age,
            location_city: city.map(str::to_string),
            location_state: state.map(str::to_string),
            tags: tags.iter().map(|t| Tag::new(*t, 5)).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_no_factors() {
        let a = profile(None, None, None, &[]);
        let b = profile(None, None, None, &[]);

        assert!(match_factors(&a, &b).is_empty());
    }

    #[test]
    fn test_same_state_without_city() {
        let a = profile(Some("Shenzhen"), Some("Guangdong"), Some(20), &[]);
        let b = profile(Some("Guangzhou"), Some("Guangdong"), Some(30), &[]);

        assert_eq!(match_factors(&a, &b), vec!["same state"]);
    }

    #[test]
    fn test_shared_tags_truncated_to_three() {
        let a = profile(None, None, Some(30), &["a", "b", "c", "d"]);
        let b = profile(None, None, Some(28), &["d", "c", "b", "a"]);

        assert_eq!(
            match_factors(&a, &b),
            vec!["age match", "shared tags: d, c, b"]
        );
    }

    #[test]
    fn test_age_gap_of_three_is_not_a_match() {
        let a = profile(None, None, Some(30), &[]);
        let b = profile(None, None, Some(33), &[]);

        assert!(match_factors(&a, &b).is_empty());
    }
}
