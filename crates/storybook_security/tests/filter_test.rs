use storybook_core::ContentPolicy;
use storybook_error::ValidationErrorKind;
use storybook_security::SafetyFilter;

fn default_filter() -> SafetyFilter {
    SafetyFilter::new(&ContentPolicy::default())
}

#[test]
fn kind_story_is_safe() {
    assert!(default_filter().is_safe("a story about a kind dragon"));
}

#[test]
fn banned_topics_are_unsafe() {
    assert!(!default_filter().is_safe("a story about violence and blood"));
}

#[test]
fn matching_ignores_case() {
    let filter = default_filter();
    assert!(!filter.is_safe("The WEAPON shop"));
    assert!(!filter.is_safe("Death Valley"));
}

#[test]
fn substring_matches_are_flagged() {
    // No word-boundary handling.
    assert!(!default_filter().is_safe("a skill tree"));
}

#[test]
fn empty_text_is_safe() {
    assert!(default_filter().is_safe(""));
}

#[test]
fn all_values_are_checked_together() {
    let filter = default_filter();
    assert!(filter.is_all_safe(["The Brave Fox", "Adventure"]));
    assert!(!filter.is_all_safe(["The Brave Fox", "Blood Moon"]));
}

#[test]
fn flagged_topics_lists_every_match() {
    let flagged = default_filter().flagged_topics("Drugs and violence and more violence");
    assert_eq!(flagged, vec!["violence".to_string(), "drugs".to_string()]);
}

#[test]
fn validate_names_field_and_topic() {
    let err = default_filter()
        .validate("title", "The Weapon of Doom")
        .unwrap_err();
    assert_eq!(
        err.kind,
        ValidationErrorKind::UnsafeInput {
            field: "title".into(),
            topic: "weapon".into()
        }
    );
}

#[test]
fn validate_rejects_blank_input() {
    let err = default_filter().validate("genre", "   ").unwrap_err();
    assert_eq!(err.kind, ValidationErrorKind::MissingInput("genre".into()));
}

#[test]
fn custom_topics_replace_defaults() {
    let policy = ContentPolicy::default().with_banned_topics(["Spiders"]);
    let filter = SafetyFilter::new(&policy);
    assert!(filter.is_safe("a story about blood oranges"));
    assert!(!filter.is_safe("a house full of spiders"));
}
