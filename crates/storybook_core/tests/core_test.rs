use storybook_core::{
    ContentPolicy, FinishReason, GenerateRequest, ImageRequest, Page, PollPolicy, ReadingLevel,
    StoryRequest, Storybook,
};
use storybook_error::BuilderErrorKind;

#[test]
fn story_request_defaults_age_group() {
    let request = StoryRequest::builder()
        .title("The Brave Fox")
        .genre("Adventure")
        .build()
        .unwrap();
    assert_eq!(request.title(), "The Brave Fox");
    assert_eq!(request.age_group(), "5–10");
}

#[test]
fn story_request_requires_title() {
    let err = StoryRequest::builder().genre("Adventure").build().unwrap_err();
    assert!(matches!(err.kind(), BuilderErrorKind::MissingField(field) if field.contains("title")));
}

#[test]
fn failed_page_serializes_null_image() {
    let book = Storybook {
        title: "The Brave Fox".into(),
        genre: "Adventure".into(),
        character: "Fern the fox".into(),
        story: "Fern ran.".into(),
        pages: vec![
            Page {
                image: Some("/tmp/page_01.png".into()),
                image_prompt: Some("Fern running".into()),
                ..Page::new(1, "Fern ran.")
            },
            Page::new(2, ""),
        ],
    };

    let json = serde_json::to_value(&book).unwrap();
    assert_eq!(json["pages"][0]["image"], "/tmp/page_01.png");
    assert!(json["pages"][1].get("image").is_some());
    assert!(json["pages"][1]["image"].is_null());
    assert_eq!(book.illustrated_pages(), 1);
}

#[test]
fn content_policy_fills_missing_fields() {
    let policy: ContentPolicy = serde_json::from_str(r#"{"tone": "calm"}"#).unwrap();
    assert_eq!(policy.tone(), "calm");
    assert_eq!(policy.banned_topics().len(), 6);
    assert_eq!(*policy.story_pages(), 20);
}

#[test]
fn content_policy_overrides() {
    let policy = ContentPolicy::default()
        .with_banned_topics(["dragons"])
        .with_story_pages(8);
    assert_eq!(policy.banned_list(), "dragons");
    assert_eq!(*policy.story_pages(), 8);
}

#[test]
fn poll_policy_makes_at_least_one_attempt() {
    let policy = PollPolicy::new(0, std::time::Duration::ZERO);
    assert_eq!(policy.max_attempts(), 1);
}

#[test]
fn generate_request_prompt_is_last_user_message() {
    let request = GenerateRequest::from_prompt("Tell me a story");
    assert_eq!(request.prompt(), Some("Tell me a story"));
    assert_eq!(request.temperature, None);
}

#[test]
fn image_request_requires_prompt() {
    assert!(ImageRequest::builder().model_id("m").build().is_err());
}

#[test]
fn finish_reason_maps_provider_strings() {
    assert_eq!(FinishReason::from_provider("stop"), FinishReason::Stop);
    assert_eq!(FinishReason::from_provider("length"), FinishReason::Length);
    assert_eq!(FinishReason::from_provider("tool_calls"), FinishReason::Other);
}

#[test]
fn reading_levels_group_sentences() {
    assert_eq!(ReadingLevel::Early.sentences_per_page(), 1);
    assert_eq!(ReadingLevel::default(), ReadingLevel::Intermediate);
    assert_eq!(ReadingLevel::Advanced.sentences_per_page(), 4);
}
