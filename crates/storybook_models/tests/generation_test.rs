//! Tests for the generation client's text and polling behavior.

mod test_utils;

use std::sync::Arc;
use std::time::Duration;
use storybook_core::PollPolicy;
use storybook_error::{StorybookErrorKind, TransportErrorKind};
use storybook_interface::GenerationService;
use storybook_models::{GenerationClient, ImageSettings};
use storybook_storage::FileSystemStorage;
use tempfile::TempDir;
use test_utils::{MockImageGenerator, MockTextGenerator, PollResponse};

const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

fn client(
    text: MockTextGenerator,
    image: MockImageGenerator,
    dir: &TempDir,
    max_attempts: u32,
) -> GenerationClient<MockTextGenerator, MockImageGenerator> {
    GenerationClient::builder()
        .text(text)
        .image(image)
        .storage(Arc::new(FileSystemStorage::new(dir.path()).unwrap()))
        .poll_policy(PollPolicy::new(max_attempts, Duration::ZERO))
        .build()
        .unwrap()
}

#[tokio::test]
async fn generate_text_trims_and_sends_one_user_message() {
    let dir = TempDir::new().unwrap();
    let client = client(
        MockTextGenerator::new_success("\n  Fern is a small red fox.  \n"),
        MockImageGenerator::ready("https://cdn/1.png", PNG),
        &dir,
        3,
    );

    let text = client.generate_text("Describe a fox").await.unwrap();
    assert_eq!(text, "Fern is a small red fox.");

    let requests = client.text().requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].messages.len(), 1);
    assert_eq!(requests[0].prompt(), Some("Describe a fox"));
    assert_eq!(requests[0].temperature, Some(0.7));
}

#[tokio::test]
async fn generate_text_surfaces_transport_errors() {
    let dir = TempDir::new().unwrap();
    let client = client(
        MockTextGenerator::new_error(TransportErrorKind::Status {
            status: 500,
            body: "boom".into(),
        }),
        MockImageGenerator::ready("https://cdn/1.png", PNG),
        &dir,
        3,
    );

    let err = client.generate_text("Describe a fox").await.unwrap_err();
    assert!(matches!(err.kind(), StorybookErrorKind::Transport(e) if e.status() == Some(500)));
}

#[tokio::test]
async fn image_is_stored_under_page_name() {
    let dir = TempDir::new().unwrap();
    let client = client(
        MockTextGenerator::new_success(""),
        MockImageGenerator::ready("https://cdn/1.png", PNG),
        &dir,
        3,
    );

    let path = client.generate_image("A fox", 5).await.unwrap();

    assert!(path.starts_with(dir.path()));
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("page_05_"));
    assert_eq!(std::fs::read(&path).unwrap(), PNG);
    assert_eq!(client.image().downloaded(), vec!["https://cdn/1.png".to_string()]);
}

#[tokio::test]
async fn image_request_uses_settings() {
    let dir = TempDir::new().unwrap();
    let client = GenerationClient::builder()
        .text(MockTextGenerator::new_success(""))
        .image(MockImageGenerator::ready("https://cdn/1.png", PNG))
        .storage(Arc::new(FileSystemStorage::new(dir.path()).unwrap()))
        .image_settings(ImageSettings::new("model-x", 512, 768, 7.0, 20))
        .poll_policy(PollPolicy::new(1, Duration::ZERO))
        .build()
        .unwrap();

    client.generate_image("A fox", 1).await.unwrap();

    let submitted = client.image().submitted();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].prompt(), "A fox");
    assert_eq!(submitted[0].model_id(), "model-x");
    assert_eq!(*submitted[0].width(), 512);
    assert_eq!(*submitted[0].height(), 768);
}

#[tokio::test]
async fn polling_retries_until_ready_and_takes_first_url() {
    let dir = TempDir::new().unwrap();
    let image = MockImageGenerator::new(
        vec![
            PollResponse::Pending,
            PollResponse::Pending,
            PollResponse::Ready(vec!["https://cdn/a.png".into(), "https://cdn/b.png".into()]),
        ],
        PNG,
    );
    let client = client(MockTextGenerator::new_success(""), image, &dir, 5);

    client.generate_image("A fox", 2).await.unwrap();

    assert_eq!(client.image().poll_count(), 3);
    assert_eq!(client.image().downloaded(), vec!["https://cdn/a.png".to_string()]);
}

#[tokio::test]
async fn polling_retries_after_errors() {
    let dir = TempDir::new().unwrap();
    let image = MockImageGenerator::new(
        vec![
            PollResponse::Error(TransportErrorKind::Request("reset".into())),
            PollResponse::Ready(vec!["https://cdn/a.png".into()]),
        ],
        PNG,
    );
    let client = client(MockTextGenerator::new_success(""), image, &dir, 5);

    assert!(client.generate_image("A fox", 1).await.is_ok());
    assert_eq!(client.image().poll_count(), 2);
}

#[tokio::test]
async fn polling_times_out_after_max_attempts() {
    let dir = TempDir::new().unwrap();
    let image = MockImageGenerator::new(vec![PollResponse::Pending], PNG);
    let client = client(MockTextGenerator::new_success(""), image, &dir, 4);

    let err = client.generate_image("A fox", 1).await.unwrap_err();

    assert!(err.is_timeout());
    assert!(matches!(err.kind(), StorybookErrorKind::Timeout(t) if t.attempts == 4));
    assert_eq!(client.image().poll_count(), 4);
    assert!(client.image().downloaded().is_empty());
}

#[tokio::test]
async fn polling_stops_on_rejected_credential() {
    let dir = TempDir::new().unwrap();
    let image = MockImageGenerator::new(vec![PollResponse::Unauthorized], PNG);
    let client = client(MockTextGenerator::new_success(""), image, &dir, 10);

    let err = client.generate_image("A fox", 1).await.unwrap_err();

    assert!(err.is_auth());
    assert_eq!(client.image().poll_count(), 1);
}

#[test]
fn builder_requires_storage() {
    let result = GenerationClient::builder()
        .text(MockTextGenerator::new_success(""))
        .image(MockImageGenerator::ready("https://cdn/1.png", PNG))
        .build();
    assert!(result.is_err());
}

#[tokio::test]
async fn every_poll_waits_one_interval() {
    let dir = TempDir::new().unwrap();
    let interval = Duration::from_millis(40);
    let client = GenerationClient::builder()
        .text(MockTextGenerator::new_success(""))
        .image(MockImageGenerator::new(
            vec![PollResponse::Pending, PollResponse::Ready(vec!["https://cdn/1.png".to_string()])],
            PNG,
        ))
        .storage(Arc::new(FileSystemStorage::new(dir.path()).unwrap()))
        .poll_policy(PollPolicy::new(5, interval))
        .build()
        .unwrap();

    let started = std::time::Instant::now();
    client.generate_image("A fox", 1).await.unwrap();

    assert_eq!(client.image().poll_count(), 2);
    assert!(started.elapsed() >= interval * 2);
}
