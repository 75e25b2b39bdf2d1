//! Storybook CLI binary.
//!
//! This binary provides command-line access to Storybook's functionality:
//! - Generate a full illustrated storybook
//! - Suggest titles and extend existing stories
//! - Check text against the safety filter

use clap::Parser;
use storybook::StorybookConfig;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, check_text, create_storybook, extend_story, suggest_titles};

    // Credentials may live in a .env file
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    let config = StorybookConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Create(args) => {
            create_storybook(args, config).await?;
        }

        Commands::Titles {
            theme,
            genre,
            age_group,
        } => {
            suggest_titles(&theme, &genre, age_group.as_deref(), &config).await?;
        }

        Commands::Extend {
            story,
            character,
            tone,
        } => {
            extend_story(&story, &character, tone.as_deref(), &config).await?;
        }

        Commands::Check { text } => {
            check_text(&text, &config);
        }
    }

    Ok(())
}
