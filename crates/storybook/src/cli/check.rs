//! `storybook check` handler.

use storybook::{SafetyFilter, StorybookConfig};

/// Report whether `text` passes the safety filter.
pub fn check_text(text: &str, config: &StorybookConfig) {
    let flagged = SafetyFilter::new(&config.content).flagged_topics(text);
    if flagged.is_empty() {
        println!("Safe: no banned topics found.");
    } else {
        println!("Unsafe: mentions {}", flagged.join(", "));
    }
}
