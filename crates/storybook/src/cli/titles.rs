//! `storybook titles` handler.

use storybook::prompts::{parse_title_suggestions, story_title_prompt};
use storybook::{OpenAiClient, SafetyFilter, StorybookConfig, StorybookResult, TextGenerator};
use tracing::{debug, instrument};

/// Ask the text model for story titles and print them.
#[instrument(skip(config))]
pub async fn suggest_titles(
    theme: &str,
    genre: &str,
    age_group: Option<&str>,
    config: &StorybookConfig,
) -> StorybookResult<()> {
    let filter = SafetyFilter::new(&config.content);
    filter.validate("theme", theme)?;
    filter.validate("genre", genre)?;

    let age_group = age_group.unwrap_or(config.content.age_group());
    let prompt = story_title_prompt(&config.content, theme, genre, age_group);

    let client =
        OpenAiClient::from_env(&config.text.model)?.with_base_url(&config.text.base_url);
    let request = config.text_request(prompt)?;
    let response = client.generate(&request).await?;
    debug!(chars = response.text.len(), "Received title suggestions");

    let titles = parse_title_suggestions(&response.text);
    if titles.is_empty() {
        println!("No titles suggested.");
    }
    for (i, title) in titles.iter().enumerate() {
        println!("{}. {}", i + 1, title);
    }
    Ok(())
}
