//! Layered configuration for the storybook binary.
//!
//! Sources, lowest precedence first:
//! - Bundled defaults (include_str! from storybook.toml)
//! - `~/.config/storybook/storybook.toml`
//! - `./storybook.toml`
//! - An explicit file passed on the command line
//! - `STORYBOOK__SECTION__KEY` environment variables

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use storybook_core::{ContentPolicy, GenerateRequest, Message, PollPolicy};
use storybook_error::{ConfigError, StorybookError, StorybookResult};
use storybook_models::{DEFAULT_IMAGE_MODEL, ImageSettings, LEONARDO_BASE_URL, OPENAI_BASE_URL};
use storybook_narrative::PipelineConfig;
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../storybook.toml");
const ENV_PREFIX: &str = "STORYBOOK";

/// Page splitting and illustration settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PipelineSettings {
    /// Number of pages the story is split into
    pub total_pages: usize,
    /// Illustration requests allowed in flight at once
    pub max_concurrent_illustrations: usize,
    /// Where the PDF is written; no PDF when unset
    pub output_path: Option<PathBuf>,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            total_pages: 5,
            max_concurrent_illustrations: 2,
            output_path: None,
        }
    }
}

/// Text model settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TextModelConfig {
    /// Chat model name
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// API root, without a trailing slash
    pub base_url: String,
}

impl Default for TextModelConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4".to_string(),
            temperature: 0.7,
            base_url: OPENAI_BASE_URL.to_string(),
        }
    }
}

/// Image model and polling settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ImageModelConfig {
    /// Provider model identifier
    pub model_id: String,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Prompt adherence strength
    pub guidance_scale: f32,
    /// Number of diffusion steps
    pub inference_steps: u32,
    /// Delay between status checks
    pub poll_interval_ms: u64,
    /// Status checks before giving up on a job
    pub max_poll_attempts: u32,
    /// API root, without a trailing slash
    pub base_url: String,
}

impl Default for ImageModelConfig {
    fn default() -> Self {
        Self {
            model_id: DEFAULT_IMAGE_MODEL.to_string(),
            width: 1024,
            height: 1024,
            guidance_scale: 8.0,
            inference_steps: 30,
            poll_interval_ms: 2000,
            max_poll_attempts: 20,
            base_url: LEONARDO_BASE_URL.to_string(),
        }
    }
}

/// Where illustrations are kept.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Image directory; a leading `~` expands to the home directory
    pub image_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            image_dir: "~/leonardo_images".to_string(),
        }
    }
}

/// Top-level storybook configuration.
///
/// # Example
///
/// ```no_run
/// use storybook::StorybookConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = StorybookConfig::load(None)?;
/// println!("splitting into {} pages", config.pipeline.total_pages);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct StorybookConfig {
    /// Banned topics, tone, art style and age group
    #[serde(default)]
    pub content: ContentPolicy,
    /// Page splitting and illustration
    #[serde(default)]
    pub pipeline: PipelineSettings,
    /// Text model
    #[serde(default)]
    pub text: TextModelConfig,
    /// Image model and polling
    #[serde(default)]
    pub image: ImageModelConfig,
    /// Image storage
    #[serde(default)]
    pub storage: StorageConfig,
}

impl StorybookConfig {
    /// Load configuration from every source, reading overrides from the
    /// process environment.
    ///
    /// Missing user files are skipped. An explicit `config_file` must exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source cannot be read or parsed, or the
    /// result fails [`validate`](Self::validate).
    #[instrument]
    pub fn load(config_file: Option<&Path>) -> StorybookResult<Self> {
        Self::build(config_file, Environment::with_prefix(ENV_PREFIX))
    }

    /// Like [`load`](Self::load), but reads overrides from `vars` instead of
    /// the process environment.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load).
    #[instrument(skip(vars))]
    pub fn load_with_env(
        config_file: Option<&Path>,
        vars: HashMap<String, String>,
    ) -> StorybookResult<Self> {
        Self::build(config_file, Environment::with_prefix(ENV_PREFIX).source(Some(vars)))
    }

    /// Load configuration from a single file, with built-in defaults for missing keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> StorybookResult<Self> {
        debug!("Loading configuration from file");

        let config: Self = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                StorybookError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                StorybookError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;
        config.validate()?;
        Ok(config)
    }

    fn build(config_file: Option<&Path>, env: Environment) -> StorybookResult<Self> {
        debug!("Loading configuration with precedence: env > explicit file > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/storybook/storybook.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("storybook").required(false));

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            env.separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("content.banned_topics"),
        );

        let config: Self = builder
            .build()
            .map_err(|e| {
                StorybookError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                StorybookError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that would make a run impossible.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pipeline.total_pages == 0 {
            return Err(ConfigError::new("pipeline.total_pages must be at least 1"));
        }
        if self.pipeline.max_concurrent_illustrations == 0 {
            return Err(ConfigError::new(
                "pipeline.max_concurrent_illustrations must be at least 1",
            ));
        }
        if self.image.max_poll_attempts == 0 {
            return Err(ConfigError::new("image.max_poll_attempts must be at least 1"));
        }
        Ok(())
    }

    /// Polling policy for image jobs.
    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy::new(
            self.image.max_poll_attempts,
            Duration::from_millis(self.image.poll_interval_ms),
        )
    }

    /// Parameters for every image request.
    pub fn image_settings(&self) -> ImageSettings {
        ImageSettings::new(
            self.image.model_id.as_str(),
            self.image.width,
            self.image.height,
            self.image.guidance_scale,
            self.image.inference_steps,
        )
    }

    /// Pipeline settings, with the content policy attached.
    ///
    /// # Errors
    ///
    /// Returns an error if the pipeline values are out of range.
    pub fn pipeline_config(&self) -> StorybookResult<PipelineConfig> {
        let mut builder = PipelineConfig::builder();
        builder
            .policy(self.content.clone())
            .total_pages(self.pipeline.total_pages)
            .max_concurrent_illustrations(self.pipeline.max_concurrent_illustrations);
        if let Some(path) = &self.pipeline.output_path {
            builder.output_path(path.clone());
        }
        Ok(builder.build()?)
    }

    /// A single-prompt text request at the configured temperature.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be built.
    pub fn text_request(&self, prompt: impl Into<String>) -> StorybookResult<GenerateRequest> {
        Ok(GenerateRequest::builder()
            .messages(vec![Message::user(prompt)])
            .temperature(self.text.temperature)
            .build()?)
    }

    /// Image directory with `~` expanded.
    pub fn image_dir(&self) -> PathBuf {
        expand_home(&self.storage.image_dir)
    }
}

fn expand_home(path: &str) -> PathBuf {
    let rest = if path == "~" {
        Some("")
    } else {
        path.strip_prefix("~/")
    };
    match (rest, dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_leading_tilde() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        assert_eq!(expand_home("~/leonardo_images"), home.join("leonardo_images"));
        assert_eq!(expand_home("~"), home);
    }

    #[test]
    fn leaves_other_paths_alone() {
        assert_eq!(expand_home("/tmp/images"), PathBuf::from("/tmp/images"));
        assert_eq!(expand_home("images/~x"), PathBuf::from("images/~x"));
    }
}
