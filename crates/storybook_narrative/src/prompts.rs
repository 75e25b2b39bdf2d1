//! Prompt builders.
//!
//! Every builder is a pure function of its arguments and a [`ContentPolicy`].
//! The policy's banned topics are written into the character, story and
//! continuation prompts so the model is told what to avoid.

use storybook_core::ContentPolicy;

/// Prompt asking for the main character of a story.
///
/// # Examples
///
/// ```
/// use storybook_core::ContentPolicy;
/// use storybook_narrative::prompts::character_prompt;
///
/// let prompt = character_prompt(&ContentPolicy::default(), "The Brave Fox", "Adventure", "5–10");
/// assert!(prompt.contains("\"The Brave Fox\""));
/// assert!(prompt.contains("violence, drugs, kill, blood, weapon, death"));
/// ```
pub fn character_prompt(policy: &ContentPolicy, title: &str, genre: &str, age_group: &str) -> String {
    format!(
        "You are a children's author creating a main character for a story titled \"{title}\" in the genre \"{genre}\".\n\
         The story is for children aged {age_group}. The character should have:\n\
         - a memorable name,\n\
         - clear physical traits (color, clothing, species if non-human),\n\
         - positive personality traits,\n\
         - a simple and heartwarming backstory.\n\
         \n\
         Keep the description safe and friendly, under 100 words, and free from any content involving {banned}.",
        banned = policy.banned_list(),
    )
}

/// Prompt asking for the full story.
///
/// `tone` falls back to the policy's tone. The requested page count is the
/// policy's `story_pages`.
pub fn story_prompt(
    policy: &ContentPolicy,
    title: &str,
    genre: &str,
    character_description: &str,
    tone: Option<&str>,
    age_group: &str,
) -> String {
    format!(
        "Write a {pages}-page illustrated children's story titled \"{title}\".\n\
         The genre is \"{genre}\", and the main character is described as follows:\n\
         \n\
         {character_description}\n\
         \n\
         The tone should be {tone}, appropriate for children aged {age_group}.\n\
         Avoid any themes of {banned}. Each page should describe a distinct scene or moment in the story.",
        pages = policy.story_pages(),
        tone = tone.unwrap_or(policy.tone()),
        banned = policy.banned_list(),
    )
}

/// Prompt asking for the next scene of an existing story.
pub fn extend_story_prompt(
    policy: &ContentPolicy,
    existing_text: &str,
    character_description: &str,
    tone: Option<&str>,
) -> String {
    format!(
        "You are continuing a children's story using a consistent tone and character style.\n\
         Main character:\n\
         {character_description}\n\
         \n\
         Current story:\n\
         {existing_text}\n\
         \n\
         Write the next scene, keeping the tone {tone}, and do not introduce any themes of {banned}.",
        tone = tone.unwrap_or(policy.tone()),
        banned = policy.banned_list(),
    )
}

/// Prompt for one page illustration.
///
/// `art_style` falls back to the policy's art style.
///
/// # Examples
///
/// ```
/// use storybook_core::ContentPolicy;
/// use storybook_narrative::prompts::image_prompt;
///
/// let prompt = image_prompt(&ContentPolicy::default(), "Fern, a red fox", "Fern finds a map.", None);
/// assert_eq!(
///     prompt,
///     "Illustrate this children's book scene: Fern finds a map. \
///      The main character appears as: Fern, a red fox \
///      Use a warm, colorful, hand-drawn style suitable for children."
/// );
/// ```
pub fn image_prompt(
    policy: &ContentPolicy,
    character_description: &str,
    scene_text: &str,
    art_style: Option<&str>,
) -> String {
    format!(
        "Illustrate this children's book scene: {scene_text} \
         The main character appears as: {character_description} \
         Use a {style}.",
        style = art_style.unwrap_or(policy.art_style()),
    )
}

/// Prompt asking for three title ideas for a theme.
pub fn story_title_prompt(policy: &ContentPolicy, theme: &str, genre: &str, age_group: &str) -> String {
    format!(
        "Suggest 3 creative and catchy titles for a children's story themed around \"{theme}\", in the genre \"{genre}\".\n\
         The titles should appeal to children aged {age_group}, be {tone}, and avoid complex or scary words.",
        tone = policy.tone(),
    )
}

/// Pull title suggestions out of a model reply.
///
/// Accepts numbered (`1.`, `2)`), bulleted and plain lines, strips
/// surrounding quotes and drops lead-in lines ending in `:`.
pub fn parse_title_suggestions(reply: &str) -> Vec<String> {
    reply
        .lines()
        .map(|line| {
            line.trim()
                .trim_start_matches(|c: char| c.is_ascii_digit())
                .trim_start_matches(['.', ')', '-', '*', '•'])
                .trim()
                .trim_matches(['"', '“', '”'])
                .trim()
                .to_string()
        })
        .filter(|line| !line.is_empty() && !line.ends_with(':'))
        .collect()
}
