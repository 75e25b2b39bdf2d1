//! `storybook create` handler.

use super::CreateArgs;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use storybook::{
    FileSystemStorage, GenerationClient, LeonardoClient, OpenAiClient, PdfRenderer,
    StoryPipeline, StoryRequest, Storybook, StorybookConfig, StorybookResult,
};
use storybook_error::{StorageError, StorageErrorKind};
use tracing::{info, instrument};

/// Generate a storybook, print it, and write the requested files.
#[instrument(skip_all)]
pub async fn create_storybook(
    args: CreateArgs,
    mut config: StorybookConfig,
) -> StorybookResult<()> {
    let title = match args.title {
        Some(title) => title,
        None => ask("Enter story title: ")?,
    };
    let genre = match args.genre {
        Some(genre) => genre,
        None => ask("Enter genre (e.g., Adventure, Fantasy): ")?,
    };
    let (title, genre) = (title.trim(), genre.trim());
    if title.is_empty() || genre.is_empty() {
        println!("Both title and genre are required.");
        return Ok(());
    }

    if let Some(pages) = args.pages {
        config.pipeline.total_pages = pages;
    }
    if let Some(output) = args.output {
        config.pipeline.output_path = Some(output);
    }
    if args.no_pdf {
        config.pipeline.output_path = None;
    }
    config.validate()?;

    let age_group = args
        .age_group
        .unwrap_or_else(|| config.content.age_group().clone());
    let request = StoryRequest::builder()
        .title(title)
        .genre(genre)
        .age_group(age_group)
        .build()?;

    let text = OpenAiClient::from_env(&config.text.model)?.with_base_url(&config.text.base_url);
    let image = LeonardoClient::from_env()?.with_base_url(&config.image.base_url);
    let service = GenerationClient::builder()
        .text(text)
        .image(image)
        .storage(Arc::new(FileSystemStorage::new(config.image_dir())?))
        .image_settings(config.image_settings())
        .poll_policy(config.poll_policy())
        .temperature(config.text.temperature)
        .build()?;

    let pipeline = StoryPipeline::new(service, config.pipeline_config()?)
        .with_renderer(PdfRenderer::default());
    let report = pipeline.run(&request).await?;

    print_storybook(report.storybook());

    if let Some(summary) = report.document() {
        println!(
            "\nPDF written to {} ({} pages, {} without images)",
            summary.path().display(),
            summary.rendered_pages(),
            summary.skipped_pages()
        );
    }

    if let Some(path) = args.json {
        let json = serde_json::to_string_pretty(report.storybook()).map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "Failed to serialize storybook: {}",
                e
            )))
        })?;
        tokio::fs::write(&path, json).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;
        info!(path = %path.display(), "Wrote storybook JSON");
    }

    Ok(())
}

fn print_storybook(book: &Storybook) {
    println!("\n{} ({})\n", book.title, book.genre);
    for page in &book.pages {
        println!("Page {}:", page.index);
        println!("{}", page.text);
        match &page.image {
            Some(image) => println!("Image: {}\n", image),
            None => println!("No image found\n"),
        }
    }
}

fn ask(label: &str) -> StorybookResult<String> {
    let read_error =
        |e: io::Error| StorageError::new(StorageErrorKind::FileRead(format!("stdin: {}", e)));

    print!("{}", label);
    io::stdout().flush().map_err(read_error)?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line).map_err(read_error)?;
    Ok(line)
}
