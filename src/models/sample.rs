use crate::models::domain::{Gender, Tag, UserProfile};

/// Built-in pool served when the profile backend cannot be reached
pub fn sample_profiles() -> Vec<UserProfile> {
    vec![
        profile(
            "sample-1", "lin_xiao", 26, Gender::Female, "深圳", "广东",
            "Product designer who loves hiking and indie games",
            "UI Designer",
            &["find-love", "long-term-relationship"],
            &[("design", 9), ("hiking", 7), ("games", 6)],
        ),
        profile(
            "sample-2", "chen_hao", 28, Gender::Male, "深圳", "广东",
            "Backend engineer, weekend climber, coffee nerd",
            "Software Engineer",
            &["find-love", "find-teammate"],
            &[("tech", 9), ("climbing", 7), ("coffee", 5)],
        ),
        profile(
            "sample-3", "wang_yue", 31, Gender::Female, "北京", "北京",
            "Founder looking for a technical co-founder in fintech",
            "Entrepreneur",
            &["business-partner", "tech-collaboration"],
            &[("startup", 10), ("finance", 8), ("tech", 6)],
        ),
        profile(
            "sample-4", "zhao_ming", 24, Gender::Male, "广州", "广东",
            "Musician and part-time photographer",
            "Photographer",
            &["creative-collaboration", "romance"],
            &[("music", 9), ("photography", 8), ("art", 6)],
        ),
        profile(
            "sample-5", "sun_qing", 27, Gender::NonBinary, "上海", "上海",
            "Writer exploring interactive fiction",
            "Writer",
            &["creative-collaboration"],
            &[("writing", 9), ("games", 7), ("art", 5)],
        ),
        profile(
            "sample-6", "li_na", 25, Gender::Female, "深圳", "广东",
            "Yoga teacher, foodie, learning to code",
            "Yoga Instructor",
            &["marriage", "life-partner"],
            &[("fitness", 9), ("food", 7), ("tech", 4)],
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn profile(
    id: &str,
    username: &str,
    age: u32,
    gender: Gender,
    city: &str,
    state: &str,
    bio: &str,
    occupation: &str,
    looking_for: &[&str],
    tags: &[(&str, u8)],
) -> UserProfile {
    UserProfile {
        id: id.to_string(),
        username: username.to_string(),
        age: Some(age),
        gender,
        location_city: Some(city.to_string()),
        location_state: Some(state.to_string()),
        bio: Some(bio.to_string()),
        occupation: Some(occupation.to_string()),
        looking_for: looking_for.iter().map(|g| g.to_string()).collect(),
        tags: tags.iter().map(|(name, weight)| Tag::new(*name, *weight)).collect(),
    }
}
