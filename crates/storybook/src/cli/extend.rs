//! `storybook extend` handler.

use std::path::Path;
use storybook::prompts::extend_story_prompt;
use storybook::{OpenAiClient, StorybookConfig, StorybookResult, TextGenerator};
use storybook_error::{StorageError, StorageErrorKind};
use tracing::{info, instrument};

/// Continue a saved story with one more scene and print it.
#[instrument(skip(config), fields(story = %story.display(), character = %character.display()))]
pub async fn extend_story(
    story: &Path,
    character: &Path,
    tone: Option<&str>,
    config: &StorybookConfig,
) -> StorybookResult<()> {
    let existing = read(story).await?;
    let character = read(character).await?;

    let prompt = extend_story_prompt(&config.content, existing.trim(), character.trim(), tone);
    let client =
        OpenAiClient::from_env(&config.text.model)?.with_base_url(&config.text.base_url);
    let request = config.text_request(prompt)?;
    let response = client.generate(&request).await?;
    info!(chars = response.text.len(), "Generated continuation");

    println!("{}", response.text.trim());
    Ok(())
}

async fn read(path: &Path) -> StorybookResult<String> {
    let text = tokio::fs::read_to_string(path).await.map_err(|e| {
        StorageError::new(StorageErrorKind::FileRead(format!("{}: {}", path.display(), e)))
    })?;
    Ok(text)
}
