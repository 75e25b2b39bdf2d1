//! End-to-end pipeline tests against a mock generation service.

mod test_utils;

use storybook_core::{ContentPolicy, StoryRequest};
use storybook_error::{StorybookErrorKind, ValidationErrorKind};
use storybook_narrative::{PipelineConfig, StoryPipeline};
use test_utils::{ImageFailure, MockRenderer, MockService};

const CHARACTER: &str = "Fern is a small red fox with a green scarf.";
const STORY: &str = "Title: The Brave Fox\n\
    Fern woke early. She found a map. The map showed a hill. She climbed the hill. \
    A bird said hello. They became friends. They watched the sunset. Fern went home.";

fn config(pages: usize) -> PipelineConfig {
    PipelineConfig::builder().total_pages(pages).build().unwrap()
}

#[tokio::test]
async fn brave_fox_survives_two_image_failures() {
    let service = MockService::new(CHARACTER, STORY)
        .failing(3, ImageFailure::Timeout)
        .failing(6, ImageFailure::Transport);
    let pipeline = StoryPipeline::new(service, config(8));

    let report = pipeline
        .run(&StoryRequest::new("The Brave Fox", "Adventure"))
        .await
        .unwrap();
    let book = report.storybook();

    assert_eq!(book.title, "The Brave Fox");
    assert_eq!(book.genre, "Adventure");
    assert_eq!(book.character, CHARACTER);
    assert_eq!(book.pages.len(), 8);
    assert_eq!(book.illustrated_pages(), 6);

    for page in &book.pages {
        if page.index == 3 || page.index == 6 {
            assert!(page.image.is_none(), "page {} should have failed", page.index);
        } else {
            assert_eq!(
                page.image.as_deref(),
                Some(format!("/images/page_{:02}.png", page.index).as_str())
            );
        }
        assert!(page.image_prompt.is_some());
    }

    let json = serde_json::to_value(book).unwrap();
    assert!(json["pages"][2]["image"].is_null());
    assert!(report.document().is_none());
}

#[tokio::test]
async fn pages_stay_in_order_with_concurrency() {
    let service = MockService::new(CHARACTER, STORY);
    let config = PipelineConfig::builder()
        .total_pages(8_usize)
        .max_concurrent_illustrations(4_usize)
        .build()
        .unwrap();
    let pipeline = StoryPipeline::new(service, config);

    let report = pipeline
        .run(&StoryRequest::new("The Brave Fox", "Adventure"))
        .await
        .unwrap();

    let indices: Vec<usize> = report.storybook().pages.iter().map(|p| p.index).collect();
    assert_eq!(indices, (1..=8).collect::<Vec<_>>());
    assert_eq!(report.storybook().pages[0].text, "Fern woke early.");
    assert_eq!(pipeline.service().image_pages().len(), 8);
}

#[tokio::test]
async fn character_feeds_story_and_image_prompts() {
    let service = MockService::new(CHARACTER, STORY);
    let pipeline = StoryPipeline::new(service, config(2));

    pipeline
        .run(&StoryRequest::new("The Brave Fox", "Adventure"))
        .await
        .unwrap();

    let prompts = pipeline.service().text_prompts();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[0].contains("main character for a story titled \"The Brave Fox\""));
    assert!(prompts[1].contains(CHARACTER));
}

#[tokio::test]
async fn unsafe_title_stops_before_any_generation() {
    let service = MockService::new(CHARACTER, STORY);
    let pipeline = StoryPipeline::new(service, config(4));

    let err = pipeline
        .run(&StoryRequest::new("Blood Moon", "Adventure"))
        .await
        .unwrap_err();

    assert!(matches!(
        err.kind(),
        StorybookErrorKind::Validation(v)
            if v.kind == (ValidationErrorKind::UnsafeInput { field: "title".into(), topic: "blood".into() })
    ));
    assert_eq!(pipeline.service().text_calls(), 0);
    assert_eq!(pipeline.service().image_calls(), 0);
}

#[tokio::test]
async fn empty_genre_is_rejected() {
    let service = MockService::new(CHARACTER, STORY);
    let pipeline = StoryPipeline::new(service, config(4));

    let err = pipeline
        .run(&StoryRequest::new("The Brave Fox", "  "))
        .await
        .unwrap_err();

    assert!(matches!(err.kind(), StorybookErrorKind::Validation(_)));
    assert_eq!(pipeline.service().text_calls(), 0);
}

#[tokio::test]
async fn custom_policy_applies_to_validation() {
    let service = MockService::new(CHARACTER, STORY);
    let config = PipelineConfig::builder()
        .policy(ContentPolicy::default().with_banned_topics(["foxes"]))
        .total_pages(2_usize)
        .build()
        .unwrap();
    let pipeline = StoryPipeline::new(service, config);

    assert!(pipeline
        .run(&StoryRequest::new("Three Little Foxes", "Adventure"))
        .await
        .is_err());
}

#[tokio::test]
async fn text_failure_is_fatal() {
    // The first run uses up both scripted replies.
    let service = MockService::new(CHARACTER, STORY);
    let pipeline = StoryPipeline::new(service, config(2));
    pipeline
        .run(&StoryRequest::new("The Brave Fox", "Adventure"))
        .await
        .unwrap();

    let err = pipeline
        .run(&StoryRequest::new("The Brave Fox", "Adventure"))
        .await
        .unwrap_err();
    assert!(matches!(err.kind(), StorybookErrorKind::Transport(_)));
    assert_eq!(pipeline.service().image_calls(), 2);
}

#[tokio::test]
async fn rejected_image_credential_is_fatal() {
    let service = MockService::new(CHARACTER, STORY).failing(2, ImageFailure::Auth);
    let pipeline = StoryPipeline::new(service, config(4));

    let err = pipeline
        .run(&StoryRequest::new("The Brave Fox", "Adventure"))
        .await
        .unwrap_err();
    assert!(err.is_auth());
}

#[tokio::test]
async fn empty_pages_are_still_illustrated() {
    let service = MockService::new(CHARACTER, "Only one sentence.");
    let pipeline = StoryPipeline::new(service, config(3));

    let report = pipeline
        .run(&StoryRequest::new("The Brave Fox", "Adventure"))
        .await
        .unwrap();

    assert_eq!(report.storybook().pages[1].text, "");
    assert_eq!(pipeline.service().image_calls(), 3);
}

#[tokio::test]
async fn renderer_receives_storybook() {
    let dir = tempfile::TempDir::new().unwrap();
    let output = dir.path().join("fox.pdf");
    let renderer = MockRenderer::default();
    let config = PipelineConfig::builder()
        .total_pages(4_usize)
        .output_path(output.clone())
        .build()
        .unwrap();
    let service = MockService::new(CHARACTER, STORY).failing(1, ImageFailure::Transport);
    let pipeline = StoryPipeline::new(service, config).with_renderer(renderer.clone());

    let report = pipeline
        .run(&StoryRequest::new("The Brave Fox", "Adventure"))
        .await
        .unwrap();

    let summary = report.document().as_ref().unwrap();
    assert_eq!(summary.path(), &output);
    assert_eq!(*summary.rendered_pages(), 3);
    assert_eq!(*summary.skipped_pages(), 1);
    assert_eq!(renderer.rendered().len(), 1);
}

#[tokio::test]
async fn rendering_runs_off_the_async_thread() {
    let dir = tempfile::TempDir::new().unwrap();
    let renderer = MockRenderer::default();
    let config = PipelineConfig::builder()
        .total_pages(2_usize)
        .output_path(dir.path().join("fox.pdf"))
        .build()
        .unwrap();
    let pipeline =
        StoryPipeline::new(MockService::new(CHARACTER, STORY), config).with_renderer(renderer.clone());

    let report = pipeline
        .run(&StoryRequest::new("The Brave Fox", "Adventure"))
        .await
        .unwrap();

    assert!(report.document().is_some());
    // The default test runtime is single-threaded on this thread.
    assert_eq!(renderer.threads().len(), 1);
    assert_ne!(renderer.threads()[0], std::thread::current().id());
}

#[tokio::test]
async fn render_failure_keeps_storybook() {
    let config = PipelineConfig::builder()
        .total_pages(2_usize)
        .output_path("/nonexistent/fox.pdf")
        .build()
        .unwrap();
    let service = MockService::new(CHARACTER, STORY);
    let pipeline = StoryPipeline::new(service, config).with_renderer(MockRenderer::failing());

    let report = pipeline
        .run(&StoryRequest::new("The Brave Fox", "Adventure"))
        .await
        .unwrap();

    assert!(report.document().is_none());
    assert_eq!(report.storybook().pages.len(), 2);
}

#[tokio::test]
async fn renderer_without_output_path_is_skipped() {
    let renderer = MockRenderer::default();
    let pipeline =
        StoryPipeline::new(MockService::new(CHARACTER, STORY), config(2)).with_renderer(renderer.clone());

    pipeline
        .run(&StoryRequest::new("The Brave Fox", "Adventure"))
        .await
        .unwrap();
    assert!(renderer.rendered().is_empty());
}

#[test]
fn zero_concurrency_is_rejected() {
    assert!(PipelineConfig::builder()
        .max_concurrent_illustrations(0_usize)
        .build()
        .is_err());
}
