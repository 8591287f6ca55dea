use crate::models::{MatchMode, UserProfile};

/// Goals that qualify a candidate for romantic matching
pub const ROMANTIC_GOALS: &[&str] = &[
    "find-love",
    "long-term-relationship",
    "marriage",
    "romance",
    "life-partner",
];

/// Goals that qualify a candidate for collaboration matching
pub const COLLABORATION_GOALS: &[&str] = &[
    "find-teammate",
    "business-partner",
    "creative-collaboration",
    "tech-collaboration",
];

/// Goal vocabulary for a mode
pub fn goals_for(mode: MatchMode) -> &'static [&'static str] {
    match mode {
        MatchMode::Romantic => ROMANTIC_GOALS,
        MatchMode::Collaboration => COLLABORATION_GOALS,
    }
}

/// Check whether a single candidate is eligible for the requester in `mode`
///
/// Romantic mode only pairs strictly opposite binary genders; non-binary,
/// other and unspecified profiles never pass it, on either side.
#[inline]
pub fn is_eligible(candidate: &UserProfile, requester: &UserProfile, mode: MatchMode) -> bool {
    if candidate.id == requester.id {
        return false;
    }

    if mode == MatchMode::Romantic && requester.gender.opposite() != Some(candidate.gender) {
        return false;
    }

    candidate.seeks_any(goals_for(mode))
}

/// Eligibility filter
///
/// Excludes the requester and every candidate inconsistent with `mode`.
/// Pool order is preserved.
pub fn filter_by_mode<'a>(
    pool: &'a [UserProfile],
    requester: &UserProfile,
    mode: MatchMode,
) -> Vec<&'a UserProfile> {
    pool.iter()
        .filter(|candidate| is_eligible(candidate, requester, mode))
        .collect()
}

/// Lower-cased text a free-text query is matched against
///
/// Bio, occupation, city, state, goals and tag names, space separated.
pub fn searchable_text(profile: &UserProfile) -> String {
    let mut parts: Vec<&str> = vec![
        profile.bio_text(),
        profile.occupation_text(),
        profile.location_city.as_deref().unwrap_or(""),
        profile.location_state.as_deref().unwrap_or(""),
    ];
    parts.extend(profile.looking_for.iter().map(String::as_str));
    parts.extend(profile.tags.iter().map(|t| t.name.as_str()));

    parts.join(" ").to_lowercase()
}

/// Split a query into lower-cased whitespace separated terms
pub fn query_terms(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Query filter
///
/// A blank query keeps the pool as is. Otherwise a candidate survives when
/// any term is a substring of its searchable text.
pub fn filter_by_query<'a>(pool: Vec<&'a UserProfile>, query: &str) -> Vec<&'a UserProfile> {
    let terms = query_terms(query);
    if terms.is_empty() {
        return pool;
    }

    pool.into_iter()
        .filter(|candidate| {
            let text = searchable_text(candidate);
            terms.iter().any(|term| text.contains(term.as_str()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, Tag};

    fn create_test_profile(id: &str, gender: Gender, goals: &[&str]) -> UserProfile {
        UserProfile {
            id: id.to_string(),
            username: format!("user_{}", id),
            age: Some(25),
            gender,
            looking_for: goals.iter().map(|g| g.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_requester_excluded() {
        let requester = create_test_profile("me", Gender::Male, &["find-teammate"]);
        let pool = vec![
            requester.clone(),
            create_test_profile("other", Gender::Male, &["find-teammate"]),
        ];

        let result = filter_by_mode(&pool, &requester, MatchMode::Collaboration);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "other");
    }

    #[test]
    fn test_romantic_requires_opposite_gender() {
        let requester = create_test_profile("me", Gender::Male, &["find-love"]);
        let pool = vec![
            create_test_profile("f", Gender::Female, &["find-love"]),
            create_test_profile("m", Gender::Male, &["find-love"]),
            create_test_profile("nb", Gender::NonBinary, &["find-love"]),
            create_test_profile("u", Gender::Unspecified, &["romance"]),
        ];

        let result = filter_by_mode(&pool, &requester, MatchMode::Romantic);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "f");
    }

    #[test]
    fn test_romantic_requires_romantic_goal() {
        let requester = create_test_profile("me", Gender::Female, &["find-love"]);
        let pool = vec![
            create_test_profile("a", Gender::Male, &["business-partner"]),
            create_test_profile("b", Gender::Male, &["marriage"]),
        ];

        let result = filter_by_mode(&pool, &requester, MatchMode::Romantic);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "b");
    }

    #[test]
    fn test_non_binary_requester_gets_no_romantic_matches() {
        let requester = create_test_profile("me", Gender::NonBinary, &["find-love"]);
        let pool = vec![
            create_test_profile("f", Gender::Female, &["find-love"]),
            create_test_profile("m", Gender::Male, &["find-love"]),
        ];

        assert!(filter_by_mode(&pool, &requester, MatchMode::Romantic).is_empty());
    }

    #[test]
    fn test_collaboration_ignores_gender() {
        let requester = create_test_profile("me", Gender::Male, &[]);
        let pool = vec![
            create_test_profile("m", Gender::Male, &["tech-collaboration"]),
            create_test_profile("o", Gender::Other, &["creative-collaboration"]),
            create_test_profile("f", Gender::Female, &["find-love"]),
        ];

        let result = filter_by_mode(&pool, &requester, MatchMode::Collaboration);
        let ids: Vec<&str> = result.iter().map(|p| p.id.as_str()).collect();

        assert_eq!(ids, vec!["m", "o"]);
    }

    #[test]
    fn test_empty_pool() {
        let requester = create_test_profile("me", Gender::Male, &[]);
        assert!(filter_by_mode(&[], &requester, MatchMode::Romantic).is_empty());
    }

    #[test]
    fn test_searchable_text_contents() {
        let mut profile = create_test_profile("a", Gender::Female, &["find-love"]);
        profile.bio = Some("Loves Hiking".to_string());
        profile.occupation = Some("Engineer".to_string());
        profile.location_city = Some("Shenzhen".to_string());
        profile.tags = vec![Tag::new("Tech", 8)];

        let text = searchable_text(&profile);

        assert!(text.contains("loves hiking"));
        assert!(text.contains("engineer"));
        assert!(text.contains("shenzhen"));
        assert!(text.contains("find-love"));
        assert!(text.contains("tech"));
    }

    #[test]
    fn test_blank_query_is_identity() {
        let a = create_test_profile("a", Gender::Female, &[]);
        let b = create_test_profile("b", Gender::Male, &[]);
        let pool = vec![&a, &b];

        assert_eq!(filter_by_query(pool.clone(), "   ").len(), 2);
        assert_eq!(filter_by_query(pool, "").len(), 2);
    }

    #[test]
    fn test_query_terms_use_or_substring_semantics() {
        let mut a = create_test_profile("a", Gender::Female, &[]);
        a.occupation = Some("Photographer".to_string());
        let mut b = create_test_profile("b", Gender::Male, &[]);
        b.bio = Some("guitar player".to_string());
        let c = create_test_profile("c", Gender::Male, &[]);

        let result = filter_by_query(vec![&a, &b, &c], "PHOTO guitar");
        let ids: Vec<&str> = result.iter().map(|p| p.id.as_str()).collect();

        assert_eq!(ids, vec!["a", "b"]);
    }
}
